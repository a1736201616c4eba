pub mod alerts;
pub mod inventory;
pub mod products;

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    extract::State,
    Json, Router,
};
use common::types::Health;
use service::{catalog::CatalogService, executor::ProcedureExecutor};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::errors::JsonApiError;
use crate::openapi::ApiDoc;

/// Shared, immutable per-process state. Nothing request-specific lives here.
#[derive(Clone)]
pub struct ServerState {
    pub catalog: CatalogService,
}

impl ServerState {
    pub fn new(executor: Arc<dyn ProcedureExecutor>) -> Self {
        Self { catalog: CatalogService::new(executor) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses(
    (status = 200, description = "Database reachable", body = crate::openapi::HealthResponse),
    (status = 500, description = "Database unreachable", body = crate::openapi::ErrorBodyDoc)
))]
pub async fn health(State(state): State<ServerState>) -> Result<Json<Health>, JsonApiError> {
    state
        .catalog
        .health()
        .await
        .map_err(|e| JsonApiError::internal("database health check failed", e.to_string()))?;
    Ok(Json(Health { status: "ok" }))
}

pub async fn metrics() -> impl IntoResponse {
    match service::metrics::render() {
        Ok(text) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text).into_response(),
        Err(e) => JsonApiError::internal("failed to encode metrics", e).into_response(),
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Catalog routes, relative to the `/api` prefix.
fn api_routes() -> Router<ServerState> {
    Router::new()
        .route("/products", get(products::list))
        .route("/products/transfer", get(products::get_transfer).post(inventory::transfer))
        .route("/products/:id", get(products::get))
        .route("/registerProducts", post(products::create))
        .route("/editProducts/:id", put(products::update))
        .route("/deleteProducts/:id", delete(products::delete))
        .route("/inventory/:storeId", get(inventory::store_inventory))
        .route("/alerts/low-stock", get(alerts::low_stock))
}

/// Build the full application router: catalog API under `/api`, plus health, metrics and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes())
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
