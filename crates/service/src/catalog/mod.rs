//! Catalog operations: one stored-procedure call per operation, no state kept between calls.

pub mod service;

pub use service::CatalogService;
