//! Error types module
//!
//! All request-level failures are unified under the `AppError` enum. Collaborator
//! failures (analysis, email) are deliberately NOT represented here: they are
//! reported as response fields on an otherwise successful submission, never as
//! a failed request. `AppError` covers validation failures and unexpected faults
//! only.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Internal(_) => 500,
        }
    }

    /// Machine-readable error type for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::Internal(_) => "internal",
        }
    }

    /// Client-facing message. Internal details are hidden for unexpected faults.
    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::PayloadTooLarge(_) => LogLevel::Warn,
            AppError::Internal(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_errors() {
        let err = AppError::InvalidInput("No files provided".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.client_message(), "No files provided");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn oversized_payload_maps_to_413_and_logs_at_warn() {
        let err = AppError::PayloadTooLarge("evidence.pdf exceeds 6 MB".to_string());
        assert_eq!(err.http_status_code(), 413);
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn internal_errors_hide_details_from_clients() {
        let err = AppError::Internal("smtp pool exhausted".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.log_level(), LogLevel::Error);
    }
}
