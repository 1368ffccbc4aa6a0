//! Unified error codes
//!
//! This module defines all error codes used across the conference core,
//! the HTTP client and the CLI. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order / conference errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility with the mobile front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order item not found
    OrderItemNotFound = 4006,
    /// Order has no items
    OrderEmpty = 4007,

    // ==================== 41xx: Conference ====================
    /// Quantity is negative
    InvalidQuantity = 4101,
    /// Quantity exceeds the required quantity
    QuantityExceedsRequired = 4102,
    /// Item already fully conferred
    /// Scanned code does not match the item
    ScanCodeMismatch = 4104,
    /// Conference still has pending items
    ConferenceIncomplete = 4105,
    /// Order changed on the server since it was loaded
    VersionConflict = 4106,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Operation cancelled before completion
    OperationCancelled = 9302,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderItemNotFound => "Order item not found",
            ErrorCode::OrderEmpty => "Order has no items",

            // Conference
            ErrorCode::InvalidQuantity => "Quantity cannot be negative",
            ErrorCode::QuantityExceedsRequired => "Quantity cannot exceed required quantity",
            ErrorCode::ScanCodeMismatch => "Scanned code does not match the selected item",
            ErrorCode::ConferenceIncomplete => "Conference still has pending items",
            ErrorCode::VersionConflict => "Order was modified by someone else",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::OperationCancelled => "Operation was cancelled",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4006 => Ok(ErrorCode::OrderItemNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),

            // Conference
            4101 => Ok(ErrorCode::InvalidQuantity),
            4102 => Ok(ErrorCode::QuantityExceedsRequired),
            4104 => Ok(ErrorCode::ScanCodeMismatch),
            4105 => Ok(ErrorCode::ConferenceIncomplete),
            4106 => Ok(ErrorCode::VersionConflict),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9302 => Ok(ErrorCode::OperationCancelled),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
