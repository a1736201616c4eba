//! Service layer: the stored-procedure executor and the catalog operations built on it.
//! - `executor` is the only place that talks to the database.
//! - `catalog` shapes validated inputs into procedure calls.

pub mod errors;
pub mod executor;
pub mod catalog;
pub mod metrics;
