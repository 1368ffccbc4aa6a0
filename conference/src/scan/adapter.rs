//! Scan-to-reconciler bridge

use shared::conference::Order;

use crate::error::{ConferenceError, ConferenceResult};
use crate::reconciler::{self, Increment, Reconciled};

/// Outcome of a matched scan
#[derive(Debug, Clone, PartialEq)]
pub enum ScanMatch {
    /// Counted one unit; more scans are needed
    Counted { reconciled: Reconciled, remaining: u32 },
    /// Counted the last unit; the scan session should close
    Completed { reconciled: Reconciled },
    /// Item was already complete before this scan
    AlreadyComplete,
}

impl ScanMatch {
    /// Whether the scanner should stay open for this item
    pub fn keeps_scanning(&self) -> bool {
        matches!(self, Self::Counted { .. })
    }

    pub fn reconciled(&self) -> Option<&Reconciled> {
        match self {
            Self::Counted { reconciled, .. } | Self::Completed { reconciled } => Some(reconciled),
            Self::AlreadyComplete => None,
        }
    }
}

/// Match a scanned code against the target item and count it
///
/// A code that differs from the item's expected code fails with
/// `CodeMismatch` and changes nothing.
pub fn handle_scan(order: &Order, target_item_index: usize, scanned_code: &str) -> ConferenceResult<ScanMatch> {
    let item = order
        .item(target_item_index)
        .ok_or(ConferenceError::ItemNotFound {
            index: target_item_index,
            len: order.items.len(),
        })?;

    let scanned = scanned_code.trim();
    let expected = item.expected_scan_code().trim();
    // Items without a barcode can only be conferred by hand
    if expected.is_empty() || scanned != expected {
        tracing::warn!(
            order_id = %order.id,
            item_index = target_item_index,
            expected = %expected,
            scanned = %scanned,
            "Scanned code does not match selected item"
        );
        return Err(ConferenceError::CodeMismatch {
            item_index: target_item_index,
            expected: expected.to_string(),
            scanned: scanned.to_string(),
        });
    }

    match reconciler::increment_item_quantity(order, target_item_index)? {
        Increment::AlreadyComplete => Ok(ScanMatch::AlreadyComplete),
        Increment::Applied(reconciled) => {
            let remaining = reconciled.order.items[target_item_index].remaining();
            if remaining > 0 {
                Ok(ScanMatch::Counted {
                    reconciled,
                    remaining,
                })
            } else {
                Ok(ScanMatch::Completed { reconciled })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::conference::{ConferenceStatus, LineItem};

    fn order() -> Order {
        Order::new(
            "order-1",
            vec![
                LineItem::new("PN-1", "7891000100103", 2),
                LineItem::new("PN-2", "7891000200200", 1).with_conferred(1),
            ],
        )
    }

    #[test]
    fn test_mismatch_changes_nothing() {
        let order = order();
        let err = handle_scan(&order, 0, "0000000000000").unwrap_err();
        assert!(matches!(err, ConferenceError::CodeMismatch { item_index: 0, .. }));
        assert_eq!(order.items[0].conferred_quantity, 0);
    }

    #[test]
    fn test_match_counts_and_keeps_scanning() {
        let result = handle_scan(&order(), 0, "7891000100103").unwrap();
        assert!(result.keeps_scanning());
        match result {
            ScanMatch::Counted { reconciled, remaining } => {
                assert_eq!(remaining, 1);
                assert_eq!(reconciled.order.items[0].conferred_quantity, 1);
                assert_eq!(reconciled.status, ConferenceStatus::InProgress);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_last_unit_completes() {
        let first = handle_scan(&order(), 0, "7891000100103").unwrap();
        let order = first.reconciled().unwrap().order.clone();

        let second = handle_scan(&order, 0, " 7891000100103\n").unwrap();
        assert!(!second.keeps_scanning());
        let reconciled = second.reconciled().unwrap();
        assert_eq!(reconciled.order.items[0].conferred_quantity, 2);
        assert_eq!(reconciled.status, ConferenceStatus::Finalized);
    }

    #[test]
    fn test_scan_complete_item() {
        let result = handle_scan(&order(), 1, "7891000200200").unwrap();
        assert_eq!(result, ScanMatch::AlreadyComplete);
        assert!(result.reconciled().is_none());
    }

    #[test]
    fn test_item_without_barcode_never_matches() {
        let order = Order::new("order-1", vec![LineItem::new("PN-3", "", 2)]);
        for code in ["", "  ", "7891000100103"] {
            let err = handle_scan(&order, 0, code).unwrap_err();
            assert!(matches!(err, ConferenceError::CodeMismatch { item_index: 0, .. }));
        }
    }

    #[test]
    fn test_scan_unknown_item() {
        let err = handle_scan(&order(), 9, "x").unwrap_err();
        assert_eq!(err, ConferenceError::ItemNotFound { index: 9, len: 2 });
    }
}
