//! Order conference
//!
//! Operators confer a picking order item by item, either by editing
//! quantities or by scanning barcodes. Every change is reconciled into a new
//! order value with a derived status, then written back through an
//! [`OrderGateway`].
//!
//! - **reconciler**: pure quantity rules and status derivation
//! - **scan**: barcode matching and duplicate-scan suppression
//! - **actions**: one action per [`ConferenceCommand`]
//! - **session**: snapshot ownership, guarded writes and cancellation
//! - **gateway**: the order-update collaborator seam

pub mod actions;
pub mod command;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod reconciler;
pub mod scan;
pub mod session;
pub mod traits;

pub use command::ConferenceCommand;
pub use config::{ConferenceConfig, ConfigError};
pub use error::{ConferenceError, ConferenceResult, GatewayError, QuantityViolation};
pub use gateway::{InMemoryGateway, OrderGateway};
pub use reconciler::{
    Increment, Reconciled, decrement_item_quantity, derive_status, finalize_order, increment_item_quantity,
    set_item_observation, set_item_quantity,
};
pub use scan::{ScanDebounceConfig, ScanDebouncer, ScanDecision, ScanMatch, handle_scan};
pub use session::{ConferenceSession, SessionResponse};
pub use traits::{ActionOutcome, ConferenceAction, Notice};

// Re-export shared conference types
pub use shared::conference::{ConferenceProgress, ConferenceStatus, LineItem, Order, Product, StatusMapping};
