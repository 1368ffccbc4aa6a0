//! Shared types for the conference workspace
//!
//! Common types used across multiple crates: the conference data model
//! mirrored from the remote API, the injectable status mapping, and the
//! unified error codes.

pub mod conference;
pub mod error;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use conference::{ConferenceProgress, ConferenceStatus, LineItem, Order, Product, StatusMapping};
pub use error::{AppError, ErrorCategory, ErrorCode};
