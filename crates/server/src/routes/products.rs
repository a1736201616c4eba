use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::types::Message;
use models::filter::{ProductFilter, ProductListQuery};
use models::input::parse_positive_id;
use models::product::ProductInput;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::errors::JsonApiError;
use crate::routes::ServerState;
use crate::vendor_codes;

const PRODUCT_ID: &str = "product id";

fn product_id(raw: &str) -> Result<i64, JsonApiError> {
    parse_positive_id(raw, PRODUCT_ID).map_err(|e| {
        warn!(raw = %raw, "rejected product id");
        e.into()
    })
}

#[utoipa::path(
    get, path = "/api/products", tag = "products",
    params(
        ("category" = Option<String>, Query, description = "Category filter"),
        ("minPrice" = Option<f64>, Query, description = "Lower price bound"),
        ("maxPrice" = Option<f64>, Query, description = "Upper price bound"),
        ("minStock" = Option<i64>, Query, description = "Lower stock bound"),
        ("maxStock" = Option<i64>, Query, description = "Upper stock bound"),
        ("page" = Option<i64>, Query, description = "Page, default 1"),
        ("limit" = Option<i64>, Query, description = "Page size, default 10")
    ),
    responses(
        (status = 200, description = "Matching products"),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ProductListQuery>, QueryRejection>,
) -> Result<Json<Vec<JsonValue>>, JsonApiError> {
    let Query(q) = query?;
    let filter = ProductFilter::from(q);
    let rows = state
        .catalog
        .list_products(&filter)
        .await
        .map_err(|e| vendor_codes::LIST_PRODUCTS.map(e))?;
    info!(count = rows.len(), page = filter.page, limit = filter.limit, "listed products");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/api/products/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id, positive")),
    responses(
        (status = 200, description = "Product row"),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "Not found", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<JsonValue>, JsonApiError> {
    let id = product_id(&id)?;
    let row = state
        .catalog
        .product_details(id)
        .await
        .map_err(|e| vendor_codes::PRODUCT_DETAILS.map(e))?;
    Ok(Json(row))
}

/// `GET /products/transfer` lands on the literal `transfer` route; it is judged as a product id.
pub async fn get_transfer() -> JsonApiError {
    warn!(raw = "transfer", "rejected product id");
    JsonApiError::bad_request(format!("{PRODUCT_ID} must be a positive integer"))
}

#[utoipa::path(
    post, path = "/api/registerProducts", tag = "products",
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation or 45000", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Message>), JsonApiError> {
    let Json(input) = payload?;
    let fields = input.validate().map_err(|e| {
        warn!(error = %e, "rejected product body");
        JsonApiError::from(e)
    })?;
    state
        .catalog
        .create_product(&fields)
        .await
        .map_err(|e| vendor_codes::CREATE_PRODUCT.map(e))?;
    info!(sku = %fields.sku, "created product");
    Ok((StatusCode::CREATED, Json(Message::new("product created successfully"))))
}

#[utoipa::path(
    put, path = "/api/editProducts/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id, positive")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MessageDoc),
        (status = 400, description = "Validation, 45000 or 45001", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Message>, JsonApiError> {
    let id = product_id(&id)?;
    let Json(input) = payload?;
    let fields = input.validate().map_err(|e| {
        warn!(error = %e, id, "rejected product body");
        JsonApiError::from(e)
    })?;
    state
        .catalog
        .update_product(id, &fields)
        .await
        .map_err(|e| vendor_codes::UPDATE_PRODUCT.map(e))?;
    info!(id, "updated product");
    Ok(Json(Message::new("product updated successfully")))
}

#[utoipa::path(
    delete, path = "/api/deleteProducts/{id}", tag = "products",
    params(("id" = i64, Path, description = "Product id, positive")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 400, description = "Invalid id", body = crate::openapi::ErrorBodyDoc),
        (status = 404, description = "45001", body = crate::openapi::ErrorBodyDoc),
        (status = 500, description = "Procedure failed", body = crate::openapi::ErrorBodyDoc)
    )
)]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Message>, JsonApiError> {
    let id = product_id(&id)?;
    state
        .catalog
        .delete_product(id)
        .await
        .map_err(|e| vendor_codes::DELETE_PRODUCT.map(e))?;
    info!(id, "deleted product");
    Ok(Json(Message::new("product deleted successfully")))
}
