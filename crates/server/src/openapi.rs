#![allow(non_snake_case)]

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PieceInputDoc {
    #[schema(example = "Gymnopédie No.1")]
    pub pieceName: String,
    pub compositorName: String,
    #[schema(minimum = 0.0)]
    pub durationMinutes: f64,
    #[schema(format = Date, example = "1888-01-01")]
    pub dateOfRelease: String,
    pub compositorIsAlive: bool,
    pub instruments: Vec<String>,
    #[schema(minimum = 1, maximum = 6)]
    pub difficultyLevel: i32,
    pub styles: Vec<String>,
    pub compositorImageUrl: String,
}

#[derive(ToSchema)]
pub struct PieceDoc {
    #[schema(example = "6f1c2a8e-3b7d-4e0a-9c55-2d8b1f4a7e90")]
    pub _id: String,
    pub pieceName: String,
    pub compositorName: String,
    pub durationMinutes: f64,
    #[schema(format = Date)]
    pub dateOfRelease: String,
    pub compositorIsAlive: bool,
    pub instruments: Vec<String>,
    pub difficultyLevel: i32,
    pub styles: Vec<String>,
    pub compositorImageUrl: String,
}

#[derive(ToSchema)]
pub struct PieceEnvelopeDoc { pub piece: PieceInputDoc }

/// Update body: the input fields plus the `_id` of the record to replace.
#[derive(ToSchema)]
pub struct PieceUpdateEnvelopeDoc { pub piece: PieceDoc }

#[derive(ToSchema)]
pub struct PieceResponseDoc { pub piece: PieceDoc }

#[derive(ToSchema)]
pub struct PiecesResponseDoc { pub pieces: Vec<PieceDoc> }

#[derive(ToSchema)]
pub struct SuccessDoc {
    pub success: bool,
    #[schema(example = "6f1c2a8e-3b7d-4e0a-9c55-2d8b1f4a7e90")]
    pub _id: Option<String>,
}

#[derive(ToSchema)]
pub struct FieldErrorDoc { pub field: String, pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub errors: Option<Vec<FieldErrorDoc>>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "API Pieces", description = "API documentation for Pieces"),
    paths(
        crate::routes::health,
        crate::routes::pieces::get_all,
        crate::routes::pieces::get_one,
        crate::routes::pieces::get_by_alive_status,
        crate::routes::pieces::get_by_year_range,
        crate::routes::pieces::add,
        crate::routes::pieces::update,
        crate::routes::pieces::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PieceInputDoc,
            PieceDoc,
            PieceEnvelopeDoc,
            PieceUpdateEnvelopeDoc,
            PieceResponseDoc,
            PiecesResponseDoc,
            SuccessDoc,
            FieldErrorDoc,
            ErrorDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags((name = "Pieces"), (name = "health"))
)]
pub struct ApiDoc;
