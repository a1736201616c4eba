//! Request-scoped value types and validation rules for the catalog façade.
//! Nothing here is persisted; the stored procedures own every entity.

pub mod errors;
pub mod db;
pub mod input;
pub mod procedure;
pub mod product;
pub mod inventory;
pub mod filter;
