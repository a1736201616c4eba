use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use common::types::Message;
use models::inventory::{validate_store_id, TransferInput};
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::routes::ServerState;
use crate::vendor_codes;

#[utoipa::path(
    get, path = "/api/inventory/{storeId}", tag = "inventory",
    params(("storeId" = String, Path, description = "Store identifier")),
    responses(
        (status = 200, description = "Inventory rows of the store"),
        (status = 400, description = "Blank store id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "45002", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn store_inventory(
    State(state): State<ServerState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<JsonValue>>, JsonApiError> {
    let store_id = validate_store_id(&store_id)?;
    let rows = state
        .catalog
        .store_inventory(&store_id)
        .await
        .map_err(|e| vendor_codes::STORE_INVENTORY.map(e))?;
    info!(store_id = %store_id, count = rows.len(), "listed store inventory");
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/products/transfer", tag = "inventory",
    request_body = crate::openapi::TransferInputDoc,
    responses(
        (status = 200, description = "Transferred", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation or 45004", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "45003", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn transfer(
    State(state): State<ServerState>,
    payload: Result<Json<TransferInput>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let Json(input) = payload?;
    let transfer = input.validate().map_err(|e| {
        warn!(error = %e, "rejected transfer body");
        JsonApiError::from(e)
    })?;
    let quantity = transfer.quantity;
    state
        .catalog
        .transfer(transfer)
        .await
        .map_err(|e| vendor_codes::TRANSFER_PRODUCT.map(e))?;
    info!(quantity, "transferred stock");
    Ok(Json(Message::new("transfer completed successfully")))
}
