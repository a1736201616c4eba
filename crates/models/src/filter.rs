use serde::Deserialize;

use crate::input::{parse_decimal, parse_int};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw `/products` query string. Every value is kept as text so that a bad number
/// degrades to "no filter" instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_stock: Option<String>,
    pub max_stock: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Filter forwarded to `GetProducts`. `None` is bound as SQL NULL, never as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_stock: Option<i64>,
    pub max_stock: Option<i64>,
    pub page: i64,
    pub limit: i64,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: None,
            min_price: None,
            max_price: None,
            min_stock: None,
            max_stock: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl From<ProductListQuery> for ProductFilter {
    fn from(q: ProductListQuery) -> Self {
        let decimal = |v: &Option<String>| v.as_deref().and_then(parse_decimal);
        let int = |v: &Option<String>| v.as_deref().and_then(parse_int);
        Self {
            min_price: decimal(&q.min_price),
            max_price: decimal(&q.max_price),
            min_stock: int(&q.min_stock),
            max_stock: int(&q.max_stock),
            page: int(&q.page).unwrap_or(DEFAULT_PAGE),
            limit: int(&q.limit).unwrap_or(DEFAULT_LIMIT),
            category: q.category.filter(|c| !c.is_empty()),
        }
    }
}
