//! # Purchase Orders
//!
//! Order creation from a form draft, and the status state machine.
//!
//! ## Status Machine
//! ```text
//!             ┌──────────► Shipped ──────────┐
//!             │               │              ▼
//!   Pending ──┼───────────────┼──────────► Delivered   (stock received)
//!             │               ▼
//!             └──────────► Cancelled
//!
//!   Same status again  → no-op
//!   Delivered/Cancelled → final, every update rejected
//!   Shipped → Pending   → rejected (no going back)
//! ```
//!
//! Receiving stock on delivery happens in `state`, which owns the items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{InventoryItem, OrderStatus, PurchaseOrder, PurchaseOrderLine, Supplier};

// =============================================================================
// Drafts
// =============================================================================

/// A line as entered on the order form. Lines without an item or with a
/// non-positive quantity are dropped when the order is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineDraft {
    pub item_id: Option<u64>,
    pub quantity: Quantity,
    /// Defaults to the item's current purchase price.
    pub purchase_price: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewPurchaseOrder {
    pub supplier_id: u64,
    #[ts(as = "String")]
    pub order_date: NaiveDate,
    #[ts(as = "String")]
    pub expected_delivery_date: NaiveDate,
    pub lines: Vec<OrderLineDraft>,
}

/// Builds a Pending order, snapshotting supplier and item details.
///
/// ## Errors
/// - `SupplierNotFound` for an unknown supplier
/// - `ItemNotFound` when a line names an item that does not exist
/// - `EmptyOrder` when no usable line remains
/// - Validation error for a delivery date before the order date or a
///   negative price
pub fn build_order(
    id: u64,
    draft: &NewPurchaseOrder,
    suppliers: &[Supplier],
    items: &[InventoryItem],
) -> CoreResult<PurchaseOrder> {
    let supplier = suppliers
        .iter()
        .find(|s| s.id == draft.supplier_id)
        .ok_or(CoreError::SupplierNotFound(draft.supplier_id))?;

    if draft.expected_delivery_date < draft.order_date {
        return Err(ValidationError::InvalidFormat {
            field: "expected delivery date".to_string(),
            reason: "cannot be before the order date".to_string(),
        }
        .into());
    }

    let mut lines = Vec::new();
    for line in &draft.lines {
        let Some(item_id) = line.item_id else { continue };
        if !line.quantity.is_positive() {
            continue;
        }

        let item = items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;

        let price = line.purchase_price.unwrap_or(item.purchase_price);
        if price.is_negative() {
            return Err(ValidationError::Negative {
                field: "purchase price".to_string(),
            }
            .into());
        }

        lines.push(PurchaseOrderLine {
            inventory_item_id: item.id,
            name: item.name.clone(),
            quantity: line.quantity,
            unit: item.unit.clone(),
            purchase_price: price,
        });
    }

    if lines.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    let total_value = lines.iter().map(PurchaseOrderLine::line_total).sum();

    Ok(PurchaseOrder {
        id,
        supplier_id: supplier.id,
        supplier_name: supplier.name.clone(),
        order_date: draft.order_date,
        expected_delivery_date: draft.expected_delivery_date,
        lines,
        status: OrderStatus::Pending,
        total_value,
    })
}

// =============================================================================
// Status Transitions
// =============================================================================

/// Whether `from → to` is a forward move of the machine.
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
        (from, to),
        (Pending, Shipped) | (Pending, Delivered) | (Pending, Cancelled)
            | (Shipped, Delivered) | (Shipped, Cancelled)
    )
}

/// Statuses the order can move to next, for the status picker.
pub fn next_statuses(from: OrderStatus) -> Vec<OrderStatus> {
    OrderStatus::ALL
        .into_iter()
        .filter(|to| can_transition(from, *to))
        .collect()
}

/// Checks a requested status change.
///
/// Returns `Ok(false)` when the order already has that status (nothing to
/// do), `Ok(true)` for a valid move.
pub fn check_transition(order: &PurchaseOrder, to: OrderStatus) -> CoreResult<bool> {
    if order.status.is_final() {
        return Err(CoreError::OrderFinalized {
            id: order.id,
            status: order.status,
        });
    }

    if order.status == to {
        return Ok(false);
    }

    if !can_transition(order.status, to) {
        return Err(CoreError::InvalidStatusTransition {
            from: order.status,
            to,
        });
    }

    Ok(true)
}

/// Note on the inwards transactions logged when an order is delivered.
pub fn delivery_note(order_id: u64) -> String {
    format!("Received via purchase order #{}", order_id)
}

// =============================================================================
// Unit Tests
// =============================================================================
