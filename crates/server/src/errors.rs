use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use models::errors::ModelError;
use service::errors::ServiceError;
use service::pieces::validation::ValidationErrors;
use tracing::error;

pub const PIECE_REQUIRED_ERR: &str = "Piece requise";
const INTERNAL_ERR: &str = "Internal Server Error";

/// JSON error body: `{"error": "...", "errors": [{field, message}]?}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: String,
    pub errors: Option<ValidationErrors>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, errors: Option<ValidationErrors>) -> Self {
        Self { status, error: error.into(), errors }
    }

    pub fn piece_required() -> Self {
        Self::new(StatusCode::BAD_REQUEST, PIECE_REQUIRED_ERR, None)
    }

    pub fn invalid_piece(errors: ValidationErrors) -> Self {
        Self::new(StatusCode::BAD_REQUEST, PIECE_REQUIRED_ERR, Some(errors))
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, None)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.errors {
            Some(errors) => serde_json::json!({"error": self.error, "errors": errors}),
            None => serde_json::json!({"error": self.error}),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, msg, None),
            ServiceError::Validation(errs) => Self::new(StatusCode::BAD_REQUEST, errs.to_string(), Some(errs)),
            ServiceError::Model(ModelError::Validation(msg)) => {
                Self::new(StatusCode::BAD_REQUEST, format!("Validation Error: {msg}"), None)
            }
            other => {
                error!(err = %other, "unhandled service error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERR, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: JsonApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_keeps_the_service_message() {
        let (status, body) = body_of(ServiceError::not_found("Piece not found").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Piece not found"}));
    }

    #[tokio::test]
    async fn storage_failures_are_hidden_behind_a_generic_500() {
        let (status, body) = body_of(ServiceError::Db("connection refused".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_ERR);
        assert!(!body.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn invalid_piece_lists_field_errors() {
        let errs = ValidationErrors::single("difficultyLevel", "La difficulté maximale est 6");
        let (status, body) = body_of(JsonApiError::invalid_piece(errs)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], PIECE_REQUIRED_ERR);
        assert_eq!(body["errors"][0]["field"], "difficultyLevel");
        assert_eq!(body["errors"][0]["message"], "La difficulté maximale est 6");
    }
}
