//! Quantity reconciliation and status derivation
//!
//! Every function here is pure: it takes an order snapshot by reference and
//! returns a new order value. Nothing is persisted and no state is kept
//! between calls. Persistence belongs to the session.
//!
//! Status is derived from the aggregate item state after every change:
//!
//! ```text
//! no item conferred      → Pending
//! every item conferred   → Finalized
//! otherwise              → InProgress
//! ```
//!
//! Status follows quantities in both directions, so resetting quantities to
//! zero moves an order back to `Pending`.

use shared::conference::{ConferenceStatus, LineItem, Order};

use crate::error::{ConferenceError, ConferenceResult, QuantityViolation};

/// A new order value plus the status derived from it
///
/// `order.status` still carries the external ID it was loaded with; the
/// session stamps the new ID through its status mapping on write.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub order: Order,
    pub status: ConferenceStatus,
}

/// Result of an increment request
#[derive(Debug, Clone, PartialEq)]
pub enum Increment {
    Applied(Reconciled),
    /// Item was already fully conferred; nothing changed
    AlreadyComplete,
}

/// Derive the order status from its items
pub fn derive_status(items: &[LineItem]) -> ConferenceStatus {
    let any_conferred = items.iter().any(|item| item.conferred_quantity > 0);
    let all_conferred = items.iter().all(LineItem::is_conferred);

    if !any_conferred {
        ConferenceStatus::Pending
    } else if all_conferred {
        ConferenceStatus::Finalized
    } else {
        ConferenceStatus::InProgress
    }
}

fn item_at(order: &Order, item_index: usize) -> ConferenceResult<&LineItem> {
    order.item(item_index).ok_or(ConferenceError::ItemNotFound {
        index: item_index,
        len: order.items.len(),
    })
}

/// Set one item's conferred quantity
///
/// Fails with `InvalidQuantity` when `new_quantity` is negative or above the
/// item's required quantity. On failure the input order is untouched.
pub fn set_item_quantity(
    order: &Order,
    item_index: usize,
    new_quantity: i64,
) -> ConferenceResult<Reconciled> {
    let item = item_at(order, item_index)?;

    let violation = if new_quantity < 0 {
        Some(QuantityViolation::Negative)
    } else if new_quantity > i64::from(item.required_quantity) {
        Some(QuantityViolation::ExceedsRequired)
    } else {
        None
    };
    if let Some(violation) = violation {
        return Err(ConferenceError::InvalidQuantity {
            item_index,
            requested: new_quantity,
            required: item.required_quantity,
            violation,
        });
    }

    // Bounded by required_quantity (a u32) above
    let quantity = new_quantity as u32;

    let mut next = order.clone();
    next.items[item_index].conferred_quantity = quantity;
    let status = derive_status(&next.items);

    tracing::debug!(
        order_id = %order.id,
        item_index,
        from = item.conferred_quantity,
        to = quantity,
        required = item.required_quantity,
        status = %status,
        "Reconciled item quantity"
    );

    Ok(Reconciled {
        order: next,
        status,
    })
}

/// Add one unit to an item
pub fn increment_item_quantity(order: &Order, item_index: usize) -> ConferenceResult<Increment> {
    let item = item_at(order, item_index)?;
    if item.is_conferred() {
        tracing::debug!(order_id = %order.id, item_index, "Item already fully conferred");
        return Ok(Increment::AlreadyComplete);
    }
    set_item_quantity(order, item_index, i64::from(item.conferred_quantity) + 1).map(Increment::Applied)
}

/// Remove one unit from an item, never going below zero
pub fn decrement_item_quantity(order: &Order, item_index: usize) -> ConferenceResult<Reconciled> {
    let item = item_at(order, item_index)?;
    let target = item.conferred_quantity.saturating_sub(1).min(item.required_quantity);
    set_item_quantity(order, item_index, i64::from(target))
}

/// Explicitly finalize the conference
///
/// Requires every item to be fully conferred. On an order whose quantities
/// already derive `Finalized` this is idempotent with the derived rule.
pub fn finalize_order(order: &Order) -> ConferenceResult<Reconciled> {
    if order.items.is_empty() {
        return Err(ConferenceError::EmptyOrder);
    }

    let pending = order.pending_items();
    if pending > 0 {
        return Err(ConferenceError::IncompleteConference {
            pending,
            total: order.items.len(),
        });
    }

    Ok(Reconciled {
        order: order.clone(),
        status: ConferenceStatus::Finalized,
    })
}

/// Set or clear an item's observation; quantities and status are unaffected
pub fn set_item_observation(
    order: &Order,
    item_index: usize,
    observation: Option<String>,
) -> ConferenceResult<Reconciled> {
    item_at(order, item_index)?;

    let observation = observation
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());

    let mut next = order.clone();
    next.items[item_index].observation = observation;
    let status = derive_status(&next.items);

    Ok(Reconciled {
        order: next,
        status,
    })
}
