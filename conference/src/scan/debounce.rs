//! Duplicate-scan suppression
//!
//! Continuous camera scanning reports the same barcode on many consecutive
//! frames. Two windows filter those repeats, both measured from the last
//! accepted scan:
//! - a hard lock during which every code is ignored
//! - a longer window during which the same code is ignored
//!
//! Time is passed in explicitly so the filter can be tested without waiting.

use std::time::{Duration, Instant};

/// Default hard lock after an accepted scan
pub const DEFAULT_LOCK_WINDOW: Duration = Duration::from_millis(300);
/// Default suppression window for a repeated code
pub const DEFAULT_DUPLICATE_WINDOW: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanDebounceConfig {
    pub lock_window: Duration,
    pub duplicate_window: Duration,
}

impl Default for ScanDebounceConfig {
    fn default() -> Self {
        Self {
            lock_window: DEFAULT_LOCK_WINDOW,
            duplicate_window: DEFAULT_DUPLICATE_WINDOW,
        }
    }
}

/// Decision for one raw scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDecision {
    Accept,
    /// Inside the hard lock window
    Locked,
    /// Same code inside the duplicate window
    Duplicate,
}

impl ScanDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept)
    }
}

#[derive(Debug, Clone)]
struct LastScan {
    code: String,
    at: Instant,
}

#[derive(Debug, Clone)]
pub struct ScanDebouncer {
    config: ScanDebounceConfig,
    last: Option<LastScan>,
}

impl ScanDebouncer {
    pub fn new(config: ScanDebounceConfig) -> Self {
        Self { config, last: None }
    }

    pub fn config(&self) -> &ScanDebounceConfig {
        &self.config
    }

    /// Decide whether a scan at `now` counts; accepted scans are recorded
    pub fn check(&mut self, code: &str, now: Instant) -> ScanDecision {
        let code = code.trim();

        if let Some(last) = &self.last {
            let elapsed = now.saturating_duration_since(last.at);
            if elapsed < self.config.lock_window {
                tracing::trace!(code, elapsed_ms = elapsed.as_millis() as u64, "Scan ignored: locked");
                return ScanDecision::Locked;
            }
            if last.code == code && elapsed < self.config.duplicate_window {
                tracing::trace!(code, elapsed_ms = elapsed.as_millis() as u64, "Scan ignored: duplicate");
                return ScanDecision::Duplicate;
            }
        }

        self.last = Some(LastScan {
            code: code.to_string(),
            at: now,
        });
        ScanDecision::Accept
    }

    /// Forget scan history
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ScanDebouncer {
    fn default() -> Self {
        Self::new(ScanDebounceConfig::default())
    }
}
