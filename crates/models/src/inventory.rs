use sea_orm::Value as SqlValue;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ModelError;
use crate::input::{json_int, json_param, missing};

/// Transfer body; identifiers are forwarded with whatever scalar type the client sent.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInput {
    #[serde(default)]
    pub products_id: Option<Value>,
    #[serde(default)]
    pub source_store_id: Option<Value>,
    #[serde(default)]
    pub target_store_id: Option<Value>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub product_id: SqlValue,
    pub source_store_id: SqlValue,
    pub target_store_id: SqlValue,
    pub quantity: i64,
}

impl TransferInput {
    pub fn validate(&self) -> Result<Transfer, ModelError> {
        let absent = missing(&[
            ("productsId", self.products_id.as_ref()),
            ("sourceStoreId", self.source_store_id.as_ref()),
            ("targetStoreId", self.target_store_id.as_ref()),
            ("quantity", self.quantity.as_ref()),
        ]);
        if !absent.is_empty() {
            return Err(ModelError::validation(format!(
                "all fields are required: productsId, sourceStoreId, targetStoreId, quantity; missing: {}",
                absent.join(", ")
            )));
        }
        let (Some(product), Some(source), Some(target), Some(quantity)) = (
            self.products_id.as_ref(),
            self.source_store_id.as_ref(),
            self.target_store_id.as_ref(),
            self.quantity.as_ref(),
        ) else {
            return Err(ModelError::validation("all fields are required"));
        };

        let quantity = match json_int(quantity) {
            Some(q) if q > 0 => q,
            _ => return Err(ModelError::validation("quantity must be a positive integer")),
        };

        Ok(Transfer {
            product_id: json_param(product, "productsId")?,
            source_store_id: json_param(source, "sourceStoreId")?,
            target_store_id: json_param(target, "targetStoreId")?,
            quantity,
        })
    }
}

pub fn validate_store_id(raw: &str) -> Result<String, ModelError> {
    if raw.trim().is_empty() {
        return Err(ModelError::validation("storeId is required"));
    }
    Ok(raw.to_string())
}
