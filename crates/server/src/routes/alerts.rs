use axum::extract::State;
use axum::Json;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::errors::JsonApiError;
use crate::routes::ServerState;
use crate::vendor_codes;

#[utoipa::path(
    get, path = "/api/alerts/low-stock", tag = "alerts",
    responses(
        (status = 200, description = "Products under their stock threshold"),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn low_stock(State(state): State<ServerState>) -> Result<Json<Vec<JsonValue>>, JsonApiError> {
    let rows = state
        .catalog
        .low_stock_alerts()
        .await
        .map_err(|e| vendor_codes::LOW_STOCK_ALERTS.map(e))?;
    info!(count = rows.len(), "low stock alerts");
    Ok(Json(rows))
}
