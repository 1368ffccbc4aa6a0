//! Error type with structured code and details

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the front-end facing error shape:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (remaining counts, expected codes, ...)
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Look up a detail value
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::ConferenceIncomplete)
            .with_detail("pending", 2)
            .with_detail("total", 5);

        assert_eq!(err.detail("pending").unwrap(), 2);
        assert_eq!(err.detail("total").unwrap(), 5);
        assert!(err.detail("missing").is_none());
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::OrderNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::VersionConflict).http_status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::ScanCodeMismatch, "code does not match");
        assert_eq!(format!("{}", err), "code does not match");
    }

    #[test]
    fn test_app_error_serialize() {
        let err = AppError::new(ErrorCode::ScanCodeMismatch).with_detail("item_index", 0);
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 4104);
        assert_eq!(json["details"]["item_index"], 0);
    }
}
