//! Conference status and its external identifiers
//!
//! The API represents status as opaque IDs that differ per environment, so
//! the mapping is data injected at startup rather than constants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic conference status of an order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConferenceStatus {
    /// Nothing conferred yet
    #[default]
    Pending,
    /// Some quantities conferred, not all items complete
    InProgress,
    /// Every item complete
    Finalized,
}

impl ConferenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Finalized => "FINALIZED",
        }
    }
}

impl fmt::Display for ConferenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps semantic statuses to the API's opaque status IDs and back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMapping {
    pub pending: String,
    pub in_progress: String,
    pub finalized: String,
}

impl StatusMapping {
    pub fn new(
        pending: impl Into<String>,
        in_progress: impl Into<String>,
        finalized: impl Into<String>,
    ) -> Self {
        Self {
            pending: pending.into(),
            in_progress: in_progress.into(),
            finalized: finalized.into(),
        }
    }

    /// External ID for a status
    pub fn id_for(&self, status: ConferenceStatus) -> &str {
        match status {
            ConferenceStatus::Pending => &self.pending,
            ConferenceStatus::InProgress => &self.in_progress,
            ConferenceStatus::Finalized => &self.finalized,
        }
    }

    /// Exact reverse lookup
    pub fn lookup(&self, id: &str) -> Option<ConferenceStatus> {
        if id == self.pending {
            Some(ConferenceStatus::Pending)
        } else if id == self.in_progress {
            Some(ConferenceStatus::InProgress)
        } else if id == self.finalized {
            Some(ConferenceStatus::Finalized)
        } else {
            None
        }
    }

    /// Resolve an order's stored status ID
    ///
    /// Orders that were never touched carry no status; those and unknown IDs
    /// resolve to `Pending`.
    pub fn resolve(&self, id: Option<&str>) -> ConferenceStatus {
        match id {
            None => ConferenceStatus::Pending,
            Some(id) => self.lookup(id).unwrap_or_else(|| {
                tracing::warn!(status_id = %id, "Unknown status id, treating as pending");
                ConferenceStatus::Pending
            }),
        }
    }

    /// Whether all three IDs are set and distinct
    pub fn is_valid(&self) -> bool {
        let ids = [&self.pending, &self.in_progress, &self.finalized];
        ids.iter().all(|id| !id.trim().is_empty())
            && self.pending != self.in_progress
            && self.pending != self.finalized
            && self.in_progress != self.finalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> StatusMapping {
        StatusMapping::new("st-p", "st-ip", "st-f")
    }

    #[test]
    fn test_id_for_and_lookup() {
        let m = mapping();
        for status in [
            ConferenceStatus::Pending,
            ConferenceStatus::InProgress,
            ConferenceStatus::Finalized,
        ] {
            assert_eq!(m.lookup(m.id_for(status)), Some(status));
        }
        assert_eq!(m.lookup("nope"), None);
    }

    #[test]
    fn test_resolve_missing_or_unknown_is_pending() {
        let m = mapping();
        assert_eq!(m.resolve(None), ConferenceStatus::Pending);
        assert_eq!(m.resolve(Some("other")), ConferenceStatus::Pending);
        assert_eq!(m.resolve(Some("st-f")), ConferenceStatus::Finalized);
    }

    #[test]
    fn test_is_valid() {
        assert!(mapping().is_valid());
        assert!(!StatusMapping::new("a", "a", "b").is_valid());
        assert!(!StatusMapping::new("a", " ", "b").is_valid());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&ConferenceStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        assert_eq!(ConferenceStatus::Finalized.to_string(), "FINALIZED");
    }
}
