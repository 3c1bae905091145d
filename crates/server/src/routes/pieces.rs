use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use service::pieces::{validation::validate_piece, Piece};
use tracing::{debug, info};

use common::types::SuccessAck;

use crate::{errors::JsonApiError, state::ServerState};

const YEAR_NOT_INTEGER_ERR: &str = "Les années doivent être des entiers";

/// `{"piece": {...}}`. A null or absent piece counts as missing.
#[derive(Debug, Deserialize)]
pub struct PieceEnvelope {
    #[serde(default)]
    pub piece: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PieceBody { pub piece: Piece }

#[derive(Debug, Serialize)]
pub struct PiecesBody { pub pieces: Vec<Piece> }

fn require_piece(body: Result<Json<PieceEnvelope>, JsonRejection>) -> Result<Value, JsonApiError> {
    match body {
        Ok(Json(PieceEnvelope { piece: Some(piece) })) => Ok(piece),
        Ok(_) => Err(JsonApiError::piece_required()),
        Err(rejection) => {
            debug!(error = %rejection, "unreadable piece body");
            Err(JsonApiError::piece_required())
        }
    }
}

fn parse_year(raw: &str) -> Result<i32, JsonApiError> {
    raw.trim().parse::<i32>().map_err(|_| JsonApiError::bad_request(YEAR_NOT_INTEGER_ERR))
}

#[utoipa::path(
    get, path = "/pieces/all", tag = "Pieces",
    responses(
        (status = 200, description = "Every stored piece", body = crate::openapi::PiecesResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_all(State(state): State<ServerState>) -> Result<Json<PiecesBody>, JsonApiError> {
    let pieces = state.pieces.get_all().await?;
    Ok(Json(PiecesBody { pieces }))
}

#[utoipa::path(
    get, path = "/pieces/one/{id}", tag = "Pieces",
    params(("id" = String, Path, description = "Piece identifier")),
    responses(
        (status = 200, description = "The piece", body = crate::openapi::PieceResponseDoc),
        (status = 404, description = "Piece not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_one(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<PieceBody>, JsonApiError> {
    let piece = state.pieces.get_one(&id).await?;
    Ok(Json(PieceBody { piece }))
}

/// Only the literal `true` selects living composers; anything else means false.
#[utoipa::path(
    get, path = "/pieces/alive/{isAlive}", tag = "Pieces",
    params(("isAlive" = String, Path, description = "`true` for living composers, anything else for the others")),
    responses(
        (status = 200, description = "Pieces filtered by composer status", body = crate::openapi::PiecesResponseDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_by_alive_status(
    State(state): State<ServerState>,
    Path(is_alive): Path<String>,
) -> Result<Json<PiecesBody>, JsonApiError> {
    let pieces = state.pieces.get_by_alive_status(is_alive == "true").await?;
    Ok(Json(PiecesBody { pieces }))
}

#[utoipa::path(
    get, path = "/pieces/between/{start}/{end}", tag = "Pieces",
    params(
        ("start" = i32, Path, description = "First year, inclusive"),
        ("end" = i32, Path, description = "Last year, inclusive")
    ),
    responses(
        (status = 200, description = "Pieces released between the two years", body = crate::openapi::PiecesResponseDoc),
        (status = 400, description = "Invalid year", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn get_by_year_range(
    State(state): State<ServerState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<PiecesBody>, JsonApiError> {
    let (start, end) = (parse_year(&start)?, parse_year(&end)?);
    let pieces = state.pieces.get_by_year_range(start, end).await?;
    Ok(Json(PiecesBody { pieces }))
}

#[utoipa::path(
    post, path = "/pieces/add", tag = "Pieces",
    request_body = crate::openapi::PieceEnvelopeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::SuccessDoc),
        (status = 400, description = "Piece requise", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn add(
    State(state): State<ServerState>,
    body: Result<Json<PieceEnvelope>, JsonRejection>,
) -> Result<(StatusCode, Json<SuccessAck>), JsonApiError> {
    let raw = require_piece(body)?;
    let piece = validate_piece(&raw).map_err(JsonApiError::invalid_piece)?;
    let created = state.pieces.add(piece).await?;
    info!(id = %created.id, "piece_add_ok");
    Ok((StatusCode::CREATED, Json(SuccessAck::created(created.id.to_string()))))
}

/// Full replacement. The target is the `_id` carried inside the piece.
#[utoipa::path(
    put, path = "/pieces/update", tag = "Pieces",
    request_body = crate::openapi::PieceUpdateEnvelopeDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::SuccessDoc),
        (status = 400, description = "Piece requise", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Piece not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn update(
    State(state): State<ServerState>,
    body: Result<Json<PieceEnvelope>, JsonRejection>,
) -> Result<Json<SuccessAck>, JsonApiError> {
    let raw = require_piece(body)?;
    let id = raw.get("_id").and_then(Value::as_str).map(str::to_owned);
    let piece = validate_piece(&raw).map_err(JsonApiError::invalid_piece)?;
    state.pieces.update(id.as_deref(), piece).await?;
    Ok(Json(SuccessAck::ok()))
}

#[utoipa::path(
    delete, path = "/pieces/delete/{id}", tag = "Pieces",
    params(("id" = String, Path, description = "Piece identifier")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::SuccessDoc),
        (status = 404, description = "Piece not found", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    ),
    security(("bearerAuth" = []))
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<SuccessAck>, JsonApiError> {
    state.pieces.delete(&id).await?;
    Ok(Json(SuccessAck::ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn years_must_be_integers() {
        assert_eq!(parse_year("2020").unwrap(), 2020);
        assert_eq!(parse_year(" 1999 ").unwrap(), 1999);
        for bad in ["abc", "2020.5", ""] {
            let err = parse_year(bad).unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.error, YEAR_NOT_INTEGER_ERR);
        }
    }

    #[test]
    fn null_piece_is_missing() {
        let envelope: PieceEnvelope = serde_json::from_str(r#"{"piece": null}"#).unwrap();
        assert!(envelope.piece.is_none());
        let envelope: PieceEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.piece.is_none());
    }
}
