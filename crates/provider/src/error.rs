//! Provider Error Types
//!
//! Maps application errors to diagnostics shown to the end user.

use ironmq_core::error::AppError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Invalid attribute {attribute:?}: {message}")]
    InvalidConfig { attribute: String, message: String },

    #[error("Unknown data source: {0}")]
    UnknownDataSource(String),

    #[error(transparent)]
    App(#[from] AppError),
}

impl ProviderError {
    pub fn invalid(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::InvalidConfig {
            attribute: attribute.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// User-facing problem report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    /// Attribute the problem refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    fn error(summary: &str, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.into(),
            attribute: None,
        }
    }

    fn at(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

/// Convert ProviderError to a Diagnostic
pub fn to_diagnostic(err: &ProviderError) -> Diagnostic {
    match err {
        ProviderError::InvalidConfig { attribute, message } => {
            Diagnostic::error("Invalid attribute value", message.as_str()).at(attribute.as_str())
        }
        ProviderError::UnknownDataSource(name) => {
            Diagnostic::error("Unknown data source", format!("No data source named {:?}", name))
        }
        ProviderError::App(app) => match app {
            AppError::Domain(e) => Diagnostic::error("Invalid argument", e.to_string()),
            // Collaborator message is passed through verbatim
            AppError::Upstream(e) => Diagnostic::error("IronMQ request failed", e.to_string()),
            AppError::Config(msg) => Diagnostic::error("Provider configuration error", msg.as_str()),
        },
    }
}

impl From<&ProviderError> for Diagnostic {
    fn from(err: &ProviderError) -> Self {
        to_diagnostic(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironmq_core::port::QueueServiceError;

    #[test]
    fn test_invalid_config_points_at_attribute() {
        let diag = to_diagnostic(&ProviderError::invalid("filter_name", "bad"));
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.attribute.as_deref(), Some("filter_name"));
        assert_eq!(diag.detail, "bad");
    }

    #[test]
    fn test_upstream_detail_is_verbatim() {
        let err = ProviderError::from(AppError::from(QueueServiceError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        }));

        let diag = to_diagnostic(&err);
        assert_eq!(diag.summary, "IronMQ request failed");
        assert_eq!(diag.detail, "HTTP 500: Internal Server Error");
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }
}
