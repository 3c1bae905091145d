pub mod pieces;

use axum::{
    http::{header, HeaderName, HeaderValue},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics, types::Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub const WELCOME: &str = "Bienvenue sur l'API Pieces !";

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn welcome() -> &'static str {
    WELCOME
}

/// Hardening headers added to every response unless a handler already set them.
pub const SECURITY_HEADERS: [(HeaderName, &str); 5] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "SAMEORIGIN"),
    (header::REFERRER_POLICY, "no-referrer"),
    (header::X_DNS_PREFETCH_CONTROL, "off"),
    (header::STRICT_TRANSPORT_SECURITY, "max-age=15552000; includeSubDomains"),
];

fn with_security_headers(mut app: Router) -> Router {
    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::if_not_present(name, HeaderValue::from_static(value)));
    }
    app
}

fn piece_routes() -> Router<ServerState> {
    Router::new()
        .route("/all", get(pieces::get_all))
        .route("/one/:id", get(pieces::get_one))
        .route("/alive/:isAlive", get(pieces::get_by_alive_status))
        .route("/between/:start/:end", get(pieces::get_by_year_range))
        .route("/add", post(pieces::add))
        .route("/update", put(pieces::update))
        .route("/delete/:id", delete(pieces::delete))
}

/// Build the full application router. Docs are served at `/doc` (UI) and `/doc.json`.
pub fn build_router(state: ServerState, cors: CorsLayer, docs_enabled: bool) -> Router {
    let mut app = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/pieces", piece_routes());

    if docs_enabled {
        app = app.merge(SwaggerUi::new("/doc").url("/doc.json", ApiDoc::openapi()));
    }

    let app = app.route_layer(middleware::from_fn(metrics::track_requests)).with_state(state);
    with_security_headers(app)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
