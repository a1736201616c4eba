use serde::Deserialize;
use serde_json::Value;

use crate::errors::ModelError;
use crate::input::{json_decimal, json_text, missing};

/// Product body accepted by the register and edit endpoints.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default)]
    pub products_name: Option<Value>,
    #[serde(default)]
    pub product_desc: Option<Value>,
    #[serde(default)]
    pub product_category: Option<Value>,
    #[serde(default)]
    pub product_price: Option<Value>,
    #[serde(default)]
    pub product_sku: Option<Value>,
}

/// Product fields after presence and number checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub sku: String,
}

impl ProductInput {
    pub fn validate(&self) -> Result<ProductFields, ModelError> {
        let absent = missing(&[
            ("productsName", self.products_name.as_ref()),
            ("productDesc", self.product_desc.as_ref()),
            ("productCategory", self.product_category.as_ref()),
            ("productPrice", self.product_price.as_ref()),
            ("productSku", self.product_sku.as_ref()),
        ]);
        if !absent.is_empty() {
            return Err(ModelError::validation(format!(
                "all fields are required; missing: {}",
                absent.join(", ")
            )));
        }

        let (Some(name), Some(desc), Some(category), Some(price), Some(sku)) = (
            self.products_name.as_ref(),
            self.product_desc.as_ref(),
            self.product_category.as_ref(),
            self.product_price.as_ref(),
            self.product_sku.as_ref(),
        ) else {
            return Err(ModelError::validation("all fields are required"));
        };

        let price = json_decimal(price)
            .ok_or_else(|| ModelError::validation("productPrice must be a number"))?;

        Ok(ProductFields {
            name: json_text(name, "productsName")?,
            description: json_text(desc, "productDesc")?,
            category: json_text(category, "productCategory")?,
            price,
            sku: json_text(sku, "productSku")?,
        })
    }
}
