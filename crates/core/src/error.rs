// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    // Collaborator errors pass through with their message unchanged
    #[error(transparent)]
    Upstream(#[from] crate::port::QueueServiceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True for errors caused by the caller's input rather than the service
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::Domain(_))
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::port::QueueServiceError;

    #[test]
    fn test_upstream_message_is_verbatim() {
        let err: AppError = QueueServiceError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
        .into();

        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_invalid_filter_is_invalid_argument() {
        let err: AppError = DomainError::InvalidFilter("*".to_string()).into();
        assert!(err.is_invalid_argument());
        assert!(!AppError::Config("no token".to_string()).is_invalid_argument());
    }
}
