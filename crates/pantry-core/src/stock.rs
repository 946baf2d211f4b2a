//! # Stock Arithmetic
//!
//! The three ways stock moves, as pure functions from an item to its
//! updated copy:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┬─────────────────────────┐
//! │ Movement     │ Quantity                     │ Price / expiry          │
//! ├──────────────┼──────────────────────────────┼─────────────────────────┤
//! │ receive      │ old + added                  │ weighted average,       │
//! │ (inwards)    │                              │ earliest expiry kept    │
//! │ issue        │ max(0, old - used)           │ unchanged               │
//! │ (outwards)   │                              │                         │
//! │ bill         │ max(0, old - 1)              │ unchanged; refused when │
//! │              │                              │ expired or empty        │
//! └──────────────┴──────────────────────────────┴─────────────────────────┘
//! ```
//!
//! Transaction logging is the caller's job (see `state`); these functions
//! only compute the new item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::InventoryItem;
use crate::validation::{validate_positive, validate_price, ValidationResult};

/// An inwards delivery as entered on the receive form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub quantity: Quantity,
    pub price: Money,
    pub expiry_date: Option<NaiveDate>,
}

// =============================================================================
// Inwards
// =============================================================================

/// Receives a delivery into stock.
///
/// ## Rules
/// - Quantity must be positive, price must not be negative
/// - New price is the quantity-weighted average of old and new stock
/// - Expiry keeps the earlier of the two dates (see [`merge_expiry`])
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use pantry_core::stock::{receive, Receipt};
/// use pantry_core::{Money, NewItem, Quantity};
///
/// # let today = Utc::now().date_naive();
/// let rice = NewItem {
///     name: "Rice".into(), category: "Grains & Flours".into(),
///     quantity: Quantity::from_units(10), unit: "kg".into(),
///     purchase_price: Money::from_major(100), purchase_date: today,
///     expiry_date: None, low_stock_threshold: Quantity::from_units(2),
/// }.into_item(1, Utc::now());
///
/// let receipt = Receipt {
///     quantity: Quantity::from_units(10),
///     price: Money::from_major(200),
///     expiry_date: None,
/// };
/// let rice = receive(&rice, &receipt, Utc::now()).unwrap();
/// assert_eq!(rice.quantity, Quantity::from_units(20));
/// assert_eq!(rice.purchase_price, Money::from_major(150));
/// ```
pub fn receive(
    item: &InventoryItem,
    receipt: &Receipt,
    now: DateTime<Utc>,
) -> CoreResult<InventoryItem> {
    validate_positive("quantity", receipt.quantity)?;
    validate_price(receipt.price)?;

    let mut updated = add_stock(item, receipt.quantity, receipt.price, now)?;
    updated.expiry_date = merge_expiry(item.expiry_date, receipt.expiry_date);
    Ok(updated)
}

/// Adds stock at a price without touching expiry. Used for purchase-order
/// deliveries, whose lines carry no expiry date.
///
/// Fails when the new stock level would pass [`Quantity::MAX`].
pub fn add_stock(
    item: &InventoryItem,
    quantity: Quantity,
    price: Money,
    now: DateTime<Utc>,
) -> ValidationResult<InventoryItem> {
    let total = item
        .quantity
        .checked_add(quantity)
        .ok_or_else(|| ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: Quantity::MAX.to_string(),
        })?;

    let mut updated = item.clone();
    updated.purchase_price =
        Money::weighted_average(item.quantity, item.purchase_price, quantity, price);
    updated.quantity = total;
    updated.last_updated = now;
    Ok(updated)
}

/// Combines the expiry on the shelf with the expiry of a new batch.
///
/// ```text
///  shelf        incoming      result
///  2024-05-01   2024-04-20    2024-04-20   (earlier wins)
///  2024-05-01   none          2024-05-01
///  none         2024-04-20    2024-04-20
///  none         none          none
/// ```
pub fn merge_expiry(current: Option<NaiveDate>, incoming: Option<NaiveDate>) -> Option<NaiveDate> {
    match (current, incoming) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

// =============================================================================
// Outwards
// =============================================================================

/// Form-level check for an outwards entry: positive, and no more than is on
/// hand.
pub fn validate_issue(item: &InventoryItem, quantity: Quantity) -> ValidationResult<()> {
    validate_positive("quantity", quantity)?;

    if quantity > item.quantity {
        return Err(ValidationError::ExceedsAvailable {
            available: item.quantity.to_string(),
            unit: item.unit.clone(),
        });
    }

    Ok(())
}

/// Removes stock used in the kitchen. The result never goes below zero.
pub fn issue(
    item: &InventoryItem,
    quantity: Quantity,
    now: DateTime<Utc>,
) -> CoreResult<InventoryItem> {
    validate_positive("quantity", quantity)?;

    let mut updated = item.clone();
    updated.quantity = item.quantity.minus_clamped(quantity);
    updated.last_updated = now;
    Ok(updated)
}

// =============================================================================
// Billing
// =============================================================================

/// Sells one unit at the counter.
///
/// ## User Workflow
/// ```text
/// Billing list ──► click item
///                     │
///                     ├── expired (expiry < today)? ──► ItemExpired
///                     ├── quantity == 0?            ──► OutOfStock
///                     └── OK ──► quantity - 1 (floored at 0)
/// ```
pub fn bill(
    item: &InventoryItem,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> CoreResult<InventoryItem> {
    if item.is_expired(today) {
        return Err(CoreError::ItemExpired {
            name: item.name.clone(),
            expiry: item
                .expiry_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        });
    }

    if !item.quantity.is_positive() {
        return Err(CoreError::OutOfStock {
            name: item.name.clone(),
        });
    }

    let mut updated = item.clone();
    updated.quantity = item.quantity.minus_clamped(Quantity::ONE);
    updated.last_updated = now;
    Ok(updated)
}

// =============================================================================
// Unit Tests
// =============================================================================
