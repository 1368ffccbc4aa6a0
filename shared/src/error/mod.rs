//! Unified error system
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order / conference errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! // Create a simple error
//! let err = AppError::new(ErrorCode::OrderNotFound);
//!
//! // Create an error with details
//! let err = AppError::with_message(ErrorCode::QuantityExceedsRequired, "quantity cannot exceed required quantity")
//!     .with_detail("required", 3)
//!     .with_detail("requested", 4);
//! assert_eq!(err.code.code(), 4102);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::AppError;
