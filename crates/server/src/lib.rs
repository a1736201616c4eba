pub mod routes;
pub mod startup;
pub mod errors;
pub mod vendor_codes;
pub mod openapi;

pub use startup::{build_app, serve};
