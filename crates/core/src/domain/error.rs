// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("wildcard filter with no text is not allowed: {0:?}")]
    InvalidFilter(String),

    #[error("Validation error: {field} {reason}")]
    ValidationError { field: String, reason: String },
}

impl DomainError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        DomainError::ValidationError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
