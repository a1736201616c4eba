use std::sync::Arc;
use std::time::Instant;

use models::filter::ProductFilter;
use models::inventory::Transfer;
use models::procedure::{self, ProcedureCall};
use models::product::ProductFields;
use sea_orm::JsonValue;
use tracing::{debug, instrument};

use crate::errors::ServiceError;
use crate::executor::ProcedureExecutor;
use crate::metrics;

/// Thin application service over the catalog's stored procedures.
/// Inputs arrive already validated; this layer only shapes the calls and their results.
#[derive(Clone)]
pub struct CatalogService {
    executor: Arc<dyn ProcedureExecutor>,
}

impl CatalogService {
    pub fn new(executor: Arc<dyn ProcedureExecutor>) -> Self { Self { executor } }

    async fn run(&self, call: ProcedureCall) -> Result<Vec<JsonValue>, ServiceError> {
        let name = call.name();
        let started = Instant::now();
        let result = self.executor.call(call).await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::observe(name, outcome, started.elapsed().as_secs_f64());
        debug!(procedure = name, outcome, elapsed_ms = started.elapsed().as_millis() as u64, "procedure call finished");
        result
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<JsonValue>, ServiceError> {
        let call = ProcedureCall::new(procedure::GET_PRODUCTS)
            .bind(filter.category.clone())
            .bind(filter.min_price)
            .bind(filter.max_price)
            .bind(filter.min_stock)
            .bind(filter.max_stock)
            .bind(filter.page)
            .bind(filter.limit);
        self.run(call).await
    }

    /// First row of `GetProductDetails`, or `NotFound` when the result set is empty.
    #[instrument(skip(self))]
    pub async fn product_details(&self, id: i64) -> Result<JsonValue, ServiceError> {
        let rows = self.run(ProcedureCall::new(procedure::GET_PRODUCT_DETAILS).bind(id)).await?;
        rows.into_iter().next().ok_or_else(|| ServiceError::not_found("product"))
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn create_product(&self, product: &ProductFields) -> Result<(), ServiceError> {
        let call = ProcedureCall::new(procedure::CREATE_PRODUCT)
            .bind(product.name.clone())
            .bind(product.description.clone())
            .bind(product.category.clone())
            .bind(product.price)
            .bind(product.sku.clone());
        self.run(call).await.map(|_| ())
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn update_product(&self, id: i64, product: &ProductFields) -> Result<(), ServiceError> {
        let call = ProcedureCall::new(procedure::UPDATE_PRODUCT)
            .bind(id)
            .bind(product.name.clone())
            .bind(product.description.clone())
            .bind(product.category.clone())
            .bind(product.price)
            .bind(product.sku.clone());
        self.run(call).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> Result<(), ServiceError> {
        self.run(ProcedureCall::new(procedure::DELETE_PRODUCT).bind(id)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn store_inventory(&self, store_id: &str) -> Result<Vec<JsonValue>, ServiceError> {
        self.run(ProcedureCall::new(procedure::GET_STORE_INVENTORY).bind(store_id)).await
    }

    /// Atomicity of the move is the procedure's concern; this is a single call.
    #[instrument(skip(self, transfer), fields(quantity = transfer.quantity))]
    pub async fn transfer(&self, transfer: Transfer) -> Result<(), ServiceError> {
        let call = ProcedureCall::new(procedure::TRANSFER_PRODUCT)
            .bind(transfer.product_id)
            .bind(transfer.source_store_id)
            .bind(transfer.target_store_id)
            .bind(transfer.quantity);
        self.run(call).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn low_stock_alerts(&self) -> Result<Vec<JsonValue>, ServiceError> {
        self.run(ProcedureCall::new(procedure::GET_LOW_STOCK_ALERTS)).await
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        self.executor.ping().await
    }
}
