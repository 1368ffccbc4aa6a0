//! Conference data model
//!
//! Types mirrored from the remote order API:
//! - [`Order`] / [`LineItem`] / [`Product`]: the order snapshot as fetched
//! - [`ConferenceStatus`] / [`StatusMapping`]: semantic status and its
//!   environment-specific external identifiers
//! - [`ConferenceProgress`]: read-only summary used for notices

pub mod order;
pub mod progress;
pub mod status;

// Re-exports
pub use order::{LineItem, Order, Product};
pub use progress::ConferenceProgress;
pub use status::{ConferenceStatus, StatusMapping};
