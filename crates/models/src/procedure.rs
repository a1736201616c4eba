//! Stored-procedure call value type.
//!
//! Every catalog operation is a single `CALL Name(?, ...)` with positional binds.

use sea_orm::{DbBackend, Statement, Value};

pub const GET_PRODUCTS: &str = "GetProducts";
pub const GET_PRODUCT_DETAILS: &str = "GetProductDetails";
pub const CREATE_PRODUCT: &str = "CreateProduct";
pub const UPDATE_PRODUCT: &str = "UpdateProduct";
pub const DELETE_PRODUCT: &str = "DeleteProduct";
pub const GET_STORE_INVENTORY: &str = "GetStoreInventory";
pub const TRANSFER_PRODUCT: &str = "TransferProduct";
pub const GET_LOW_STOCK_ALERTS: &str = "GetLowStockAlerts";

#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureCall {
    name: &'static str,
    params: Vec<Value>,
}

impl ProcedureCall {
    pub fn new(name: &'static str) -> Self {
        Self { name, params: Vec::new() }
    }

    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn name(&self) -> &'static str { self.name }

    pub fn params(&self) -> &[Value] { &self.params }

    pub fn sql(&self) -> String {
        let placeholders = vec!["?"; self.params.len()].join(", ");
        format!("CALL {}({})", self.name, placeholders)
    }

    pub fn into_statement(self, backend: DbBackend) -> Statement {
        let sql = self.sql();
        Statement::from_sql_and_values(backend, sql, self.params)
    }
}
