//! Error types for accountdesk-core
//!
//! Every failure the account layer can surface falls in one of three
//! classes: input rejected before any request was sent, a request that never
//! got a response, and a response that was not what the contract promises.
//! Controllers catch all three, log them and turn them into a notification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Client-side input rejected before any network call
    ValidationError,
    /// Request could not reach the server
    NetworkError,
    /// Server answered with a failure status or an unexpected body
    ProtocolError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::NetworkError => write!(f, "NETWORK_ERROR"),
            ErrorCode::ProtocolError => write!(f, "PROTOCOL_ERROR"),
        }
    }
}

/// Detailed error information for logs and notification surfaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Operator input needs fixing
    Warning,
    /// Operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

/// Main error type for accountdesk-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Protocol error{}: {message}", status_suffix(.status))]
    Protocol { status: Option<u16>, message: String },
}

impl ClientError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ClientError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        ClientError::Protocol {
            status: None,
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ClientError::Validation { .. } => ErrorCode::ValidationError,
            ClientError::Network { .. } => ErrorCode::NetworkError,
            ClientError::Protocol { .. } => ErrorCode::ProtocolError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::Validation { .. } => ErrorSeverity::Warning,
            ClientError::Network { .. } => ErrorSeverity::Error,
            ClientError::Protocol { .. } => ErrorSeverity::Error,
        }
    }

    /// Text for the notification surface.
    ///
    /// Validation messages are shown as is; transport and protocol failures
    /// are shown as the operation's own failure text.
    pub fn user_message(&self, operation_failed: &str) -> String {
        match self {
            ClientError::Validation { message, .. } => message.clone(),
            _ => operation_failed.to_string(),
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            ClientError::Validation { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
                details = details.with_suggestion(
                    "Correct the highlighted field and submit again.".to_string()
                );
            }
            ClientError::Network { .. } => {
                details = details.with_suggestion(
                    "Check that the accounts service is running and reachable.".to_string()
                );
                details = details.with_suggestion(
                    "Verify api.base_url in your configuration.".to_string()
                );
            }
            ClientError::Protocol { status, .. } => {
                if let Some(status) = status {
                    details = details.with_detail(serde_json::json!({ "status": status }));
                }
                if *status == Some(404) {
                    details = details.with_suggestion(
                        "The account may have been removed; refresh the list.".to_string()
                    );
                }
                details = details.with_suggestion(
                    "Verify api.accounts_path points at an accounts service.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with ClientError
pub type ClientResult<T> = Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            ClientError::Protocol {
                status: Some(status.as_u16()),
                message: error.to_string(),
            }
        } else if error.is_decode() {
            ClientError::protocol(error.to_string())
        } else {
            ClientError::Network {
                message: error.to_string(),
            }
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Account the operation targeted, if any
    pub account_id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            account_id: None,
        }
    }

    pub fn with_account_id(mut self, account_id: &str) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &ClientError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &ClientError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "accountdesk::error",
                "{} - Operation: {} - Account: {:?}",
                error.to_details(),
                context.operation,
                context.account_id
            ),
            ErrorSeverity::Error => log::error!(
                target: "accountdesk::error",
                "ERROR [{}] {} - Operation: {} - Account: {:?}",
                error.code(),
                error.to_details(),
                context.operation,
                context.account_id
            ),
        }
    }
}

// ==================== Tests ====================
