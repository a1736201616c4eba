use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    /// Message without the error-kind prefix, suitable for a client-facing body.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation(m) => m,
        }
    }
}
