//! Conference errors
//!
//! [`ConferenceError`] covers everything the reconciler, the scan adapter and
//! the session can report. [`GatewayError`] is what an order-update
//! collaborator returns. Both convert into [`AppError`] so a front end gets a
//! stable numeric code plus structured details.

use shared::error::{AppError, ErrorCode};
use std::fmt;
use thiserror::Error;

/// Why a requested quantity was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityViolation {
    Negative,
    ExceedsRequired,
}

impl fmt::Display for QuantityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("quantity cannot be negative"),
            Self::ExceedsRequired => f.write_str("quantity cannot exceed required quantity"),
        }
    }
}

/// Errors returned by the order-update collaborator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Rejected by server: {0}")]
    Validation(String),

    #[error("Version conflict: expected {expected}, found {actual}")]
    Conflict { expected: u64, actual: u64 },

    #[error("Authentication required")]
    Unauthorized,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Conference errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConferenceError {
    #[error("Item not found at index {index} (order has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    #[error("Invalid quantity {requested} for item {item_index}: {violation}")]
    InvalidQuantity {
        item_index: usize,
        requested: i64,
        required: u32,
        violation: QuantityViolation,
    },

    #[error("Scanned code {scanned} does not match expected code {expected}")]
    CodeMismatch {
        item_index: usize,
        expected: String,
        scanned: String,
    },

    #[error("Conference incomplete: {pending} of {total} items still pending")]
    IncompleteConference { pending: usize, total: usize },

    #[error("Order has no items")]
    EmptyOrder,

    #[error("No item selected for scanning")]
    NoScanTarget,

    #[error("Order {order_id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        order_id: String,
        expected: u64,
        actual: u64,
    },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ConferenceError {
    /// Error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ItemNotFound { .. } => ErrorCode::OrderItemNotFound,
            Self::InvalidQuantity { violation, .. } => match violation {
                QuantityViolation::Negative => ErrorCode::InvalidQuantity,
                QuantityViolation::ExceedsRequired => ErrorCode::QuantityExceedsRequired,
            },
            Self::CodeMismatch { .. } => ErrorCode::ScanCodeMismatch,
            Self::IncompleteConference { .. } => ErrorCode::ConferenceIncomplete,
            Self::EmptyOrder => ErrorCode::OrderEmpty,
            Self::NoScanTarget => ErrorCode::InvalidRequest,
            Self::Conflict { .. } => ErrorCode::VersionConflict,
            Self::Cancelled => ErrorCode::OperationCancelled,
            Self::Gateway(e) => e.code(),
        }
    }

    /// Whether the caller recovers locally (inline message, no network involved)
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound { .. }
                | Self::InvalidQuantity { .. }
                | Self::CodeMismatch { .. }
                | Self::IncompleteConference { .. }
                | Self::EmptyOrder
                | Self::NoScanTarget
        )
    }
}

impl GatewayError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::OrderNotFound,
            Self::Network(_) => ErrorCode::NetworkError,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Conflict { .. } => ErrorCode::VersionConflict,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl From<&ConferenceError> for AppError {
    fn from(err: &ConferenceError) -> Self {
        let app = AppError::with_message(err.code(), err.to_string());
        match err {
            ConferenceError::ItemNotFound { index, len } => {
                app.with_detail("item_index", *index).with_detail("item_count", *len)
            }
            ConferenceError::InvalidQuantity {
                item_index,
                requested,
                required,
                ..
            } => app
                .with_detail("item_index", *item_index)
                .with_detail("requested", *requested)
                .with_detail("required", *required),
            ConferenceError::CodeMismatch {
                item_index,
                expected,
                scanned,
            } => app
                .with_detail("item_index", *item_index)
                .with_detail("expected", expected.clone())
                .with_detail("scanned", scanned.clone()),
            ConferenceError::IncompleteConference { pending, total } => {
                app.with_detail("pending", *pending).with_detail("total", *total)
            }
            ConferenceError::Conflict {
                order_id,
                expected,
                actual,
            } => app
                .with_detail("order_id", order_id.clone())
                .with_detail("expected_version", *expected)
                .with_detail("actual_version", *actual),
            _ => app,
        }
    }
}

impl From<ConferenceError> for AppError {
    fn from(err: ConferenceError) -> Self {
        AppError::from(&err)
    }
}

/// Result type for conference operations
pub type ConferenceResult<T> = Result<T, ConferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_violation_codes() {
        let negative = ConferenceError::InvalidQuantity {
            item_index: 0,
            requested: -1,
            required: 3,
            violation: QuantityViolation::Negative,
        };
        assert_eq!(negative.code(), ErrorCode::InvalidQuantity);
        assert!(negative.to_string().contains("quantity cannot be negative"));

        let exceeds = ConferenceError::InvalidQuantity {
            item_index: 0,
            requested: 4,
            required: 3,
            violation: QuantityViolation::ExceedsRequired,
        };
        assert_eq!(exceeds.code(), ErrorCode::QuantityExceedsRequired);
        assert!(exceeds.to_string().contains("cannot exceed required quantity"));
    }

    #[test]
    fn test_app_error_details() {
        let err = ConferenceError::IncompleteConference { pending: 2, total: 5 };
        let app = AppError::from(&err);
        assert_eq!(app.code, ErrorCode::ConferenceIncomplete);
        assert_eq!(app.detail("pending").unwrap(), 2);
        assert_eq!(app.detail("total").unwrap(), 5);
    }

    #[test]
    fn test_gateway_error_codes() {
        let err: ConferenceError = GatewayError::Network("connection reset".into()).into();
        assert_eq!(err.code(), ErrorCode::NetworkError);
        assert!(!err.is_local());

        assert_eq!(GatewayError::NotFound("o-1".into()).code(), ErrorCode::OrderNotFound);
        assert_eq!(GatewayError::Unauthorized.code(), ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_is_local() {
        assert!(ConferenceError::EmptyOrder.is_local());
        assert!(!ConferenceError::Cancelled.is_local());
        assert!(
            !ConferenceError::Conflict {
                order_id: "o".into(),
                expected: 1,
                actual: 2
            }
            .is_local()
        );
    }
}
