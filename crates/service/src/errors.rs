use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A stored procedure signalled an error carrying a SQLSTATE.
    #[error("procedure error [{code}]: {message}")]
    Procedure { code: String, message: String },
    /// No connection could be obtained from the pool.
    #[error("connection error: {0}")]
    Connection(String),
    /// Anything else from the database layer: I/O, protocol, decoding.
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn procedure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Procedure { code: code.into(), message: message.into() }
    }

    /// SQLSTATE of a procedure failure, if any.
    pub fn vendor_code(&self) -> Option<&str> {
        match self {
            ServiceError::Procedure { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) | ServiceError::Model(_) => "validation",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Procedure { .. } => "vendor_error",
            ServiceError::Connection(_) => "connection_error",
            ServiceError::Db(_) => "db_error",
        }
    }
}
