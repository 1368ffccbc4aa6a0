//! Barcode scan handling
//!
//! - **adapter**: matches a scanned code against the selected item and counts it
//! - **debounce**: filters repeated frames from continuous camera scanning

pub mod adapter;
pub mod debounce;

pub use adapter::{ScanMatch, handle_scan};
pub use debounce::{ScanDebounceConfig, ScanDebouncer, ScanDecision};
