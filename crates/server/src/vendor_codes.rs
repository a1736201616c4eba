//! Per-route SQLSTATE tables.
//!
//! A procedure failure whose code appears in the route's table becomes a 4xx; every other
//! failure is a 500 with a generic message and the underlying error as `details`.

use axum::http::StatusCode;
use service::errors::ServiceError;

use crate::errors::JsonApiError;

pub const GENERIC_PROCEDURE_ERROR: &str = "failed to execute stored procedure";
pub const GENERIC_CONNECTION_ERROR: &str = "failed to connect to the database";

#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Forward the procedure's own message verbatim.
    Vendor,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub code: &'static str,
    pub status: StatusCode,
    pub message: Message,
}

#[derive(Debug, Clone, Copy)]
pub struct VendorCodeTable {
    pub rules: &'static [Rule],
}

const fn vendor(code: &'static str, status: StatusCode) -> Rule {
    Rule { code, status, message: Message::Vendor }
}

const fn fixed(code: &'static str, status: StatusCode, text: &'static str) -> Rule {
    Rule { code, status, message: Message::Fixed(text) }
}

pub const LIST_PRODUCTS: VendorCodeTable = VendorCodeTable { rules: &[] };
pub const PRODUCT_DETAILS: VendorCodeTable = VendorCodeTable { rules: &[] };
pub const CREATE_PRODUCT: VendorCodeTable = VendorCodeTable { rules: &[vendor("45000", StatusCode::BAD_REQUEST)] };
pub const UPDATE_PRODUCT: VendorCodeTable = VendorCodeTable {
    rules: &[vendor("45000", StatusCode::BAD_REQUEST), vendor("45001", StatusCode::BAD_REQUEST)],
};
pub const DELETE_PRODUCT: VendorCodeTable = VendorCodeTable { rules: &[vendor("45001", StatusCode::NOT_FOUND)] };
pub const STORE_INVENTORY: VendorCodeTable = VendorCodeTable { rules: &[vendor("45002", StatusCode::NOT_FOUND)] };
pub const TRANSFER_PRODUCT: VendorCodeTable = VendorCodeTable {
    rules: &[
        fixed("45003", StatusCode::NOT_FOUND, "product does not exist in the source store"),
        fixed("45004", StatusCode::BAD_REQUEST, "insufficient stock in the source store"),
    ],
};
pub const LOW_STOCK_ALERTS: VendorCodeTable = VendorCodeTable { rules: &[] };

impl VendorCodeTable {
    pub fn rule(&self, code: &str) -> Option<&'static Rule> {
        self.rules.iter().find(|r| r.code == code)
    }

    pub fn map(&self, err: ServiceError) -> JsonApiError {
        match err {
            ServiceError::Procedure { code, message } => match self.rule(&code) {
                Some(rule) => {
                    let text = match rule.message {
                        Message::Vendor => message,
                        Message::Fixed(t) => t.to_string(),
                    };
                    JsonApiError::new(rule.status, text, None)
                }
                None => JsonApiError::internal(
                    GENERIC_PROCEDURE_ERROR,
                    ServiceError::Procedure { code, message }.to_string(),
                ),
            },
            ServiceError::NotFound(msg) => JsonApiError::not_found(msg),
            ServiceError::Validation(msg) => JsonApiError::bad_request(msg),
            ServiceError::Model(e) => e.into(),
            ServiceError::Connection(msg) => {
                JsonApiError::internal(GENERIC_CONNECTION_ERROR, format!("connection error: {msg}"))
            }
            e @ ServiceError::Db(_) => JsonApiError::internal(GENERIC_PROCEDURE_ERROR, e.to_string()),
        }
    }
}
