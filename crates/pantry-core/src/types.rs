//! # Domain Types
//!
//! Core domain types used throughout Pantry.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryItem   │◄──│  Transaction    │   │   Supplier      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │   │  item_id        │   │  id (u64)       │       │
//! │  │  quantity       │   │  item_name      │   │  name           │       │
//! │  │  purchase_price │   │  kind           │   │  contact info   │       │
//! │  │  expiry_date    │   │  before/after   │   └────────▲────────┘       │
//! │  └────────▲────────┘   │  purchase_order │            │                │
//! │           │            └─────────────────┘   ┌────────┴────────┐       │
//! │           └──────────────────────────────────│  PurchaseOrder  │       │
//! │                       PurchaseOrderLine      │  status (FSM)   │       │
//! │                                              │  total_value    │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! Transactions and purchase orders copy the names they display
//! (`item_name`, `supplier_name`, line `name`/`unit`) at the moment they are
//! created, so history still renders after the referenced record is deleted.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::EXPIRING_SOON_DAYS;

// =============================================================================
// Inventory Item
// =============================================================================

/// A stock item in the kitchen.
///
/// `quantity` never drops below zero: outward movements clamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: u64,

    /// Display name, unique in practice but not enforced.
    pub name: String,

    pub category: String,

    /// On-hand amount, in `unit`.
    pub quantity: Quantity,

    /// Unit of measure (kg, liters, units, ...).
    pub unit: String,

    /// Weighted-average cost per unit.
    pub purchase_price: Money,

    #[ts(as = "String")]
    pub purchase_date: NaiveDate,

    /// Earliest expiry of the stock on hand, if any batch is dated.
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,

    /// At or below this quantity the item is "low stock".
    pub low_stock_threshold: Quantity,

    #[ts(as = "String")]
    pub last_updated: DateTime<Utc>,
}

impl InventoryItem {
    /// Low stock means at or below the threshold (so a zero threshold still
    /// flags an empty shelf).
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }

    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::of(self.expiry_date, today)
    }

    /// Strictly before today. An item expiring today can still be used.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_status(today) == ExpiryStatus::Expired
    }

    /// Quantity × purchase price, rounded to the minor unit.
    pub fn stock_value(&self) -> Money {
        self.purchase_price.times(self.quantity)
    }
}

/// Fields of an item as typed into the add/edit form or produced by import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub quantity: Quantity,
    pub unit: String,
    pub purchase_price: Money,
    #[ts(as = "String")]
    pub purchase_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
    pub low_stock_threshold: Quantity,
}

impl NewItem {
    /// Materializes the form into a stored item.
    pub fn into_item(self, id: u64, now: DateTime<Utc>) -> InventoryItem {
        InventoryItem {
            id,
            name: self.name.trim().to_string(),
            category: self.category.trim().to_string(),
            quantity: self.quantity,
            unit: self.unit.trim().to_string(),
            purchase_price: self.purchase_price,
            purchase_date: self.purchase_date,
            expiry_date: self.expiry_date,
            low_stock_threshold: self.low_stock_threshold,
            last_updated: now,
        }
    }
}

impl From<&InventoryItem> for NewItem {
    /// Pre-fills an edit form from the stored item.
    fn from(item: &InventoryItem) -> Self {
        NewItem {
            name: item.name.clone(),
            category: item.category.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            purchase_price: item.purchase_price,
            purchase_date: item.purchase_date,
            expiry_date: item.expiry_date,
            low_stock_threshold: item.low_stock_threshold,
        }
    }
}

// =============================================================================
// Expiry Status
// =============================================================================

/// Where an item sits relative to its expiry date.
///
/// ```text
///          today                  today + 7
///   ─────────┼───────────────────────┼──────────────────►
///  Expired   │     ExpiringSoon      │      Fresh
///  (< today) │  (today ..= today+7)  │    (> today+7)
///
///  NoExpiry: no date recorded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
    NoExpiry,
}

impl ExpiryStatus {
    pub fn of(expiry: Option<NaiveDate>, today: NaiveDate) -> Self {
        match expiry {
            None => ExpiryStatus::NoExpiry,
            Some(date) if date < today => ExpiryStatus::Expired,
            Some(date) if date <= today + Duration::days(EXPIRING_SOON_DAYS) => {
                ExpiryStatus::ExpiringSoon
            }
            Some(_) => ExpiryStatus::Fresh,
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiringSoon => "Expiring Soon",
            ExpiryStatus::Fresh => "Fresh",
            ExpiryStatus::NoExpiry => "No Expiry",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// The kind of stock movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Item added (initial stock).
    Create,
    /// Item removed (full quantity written off).
    Delete,
    /// Quantity changed through the edit form.
    Edit,
    /// Stock received, manually or from a purchase order.
    Inwards,
    /// Stock used in the kitchen.
    Outwards,
    /// One unit sold at the counter.
    Billing,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 6] = [
        TransactionKind::Create,
        TransactionKind::Delete,
        TransactionKind::Edit,
        TransactionKind::Inwards,
        TransactionKind::Outwards,
        TransactionKind::Billing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Create => "create",
            TransactionKind::Delete => "delete",
            TransactionKind::Edit => "edit",
            TransactionKind::Inwards => "inwards",
            TransactionKind::Outwards => "outwards",
            TransactionKind::Billing => "billing",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TransactionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "type".to_string(),
                allowed: TransactionKind::ALL
                    .iter()
                    .map(|k| k.as_str().to_string())
                    .collect(),
            })
    }
}

/// An immutable record of one stock movement.
///
/// Logged only when the quantity actually changed
/// (`quantity_change != 0`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,

    pub item_id: u64,

    /// Item name at the time of the movement.
    pub item_name: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub quantity_before: Quantity,

    pub quantity_after: Quantity,

    /// `quantity_after - quantity_before`.
    pub quantity_change: Quantity,

    pub notes: Option<String>,

    /// Set when the movement came from receiving a purchase order.
    pub purchase_order_id: Option<u64>,

    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Supplier
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: u64,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Supplier form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewSupplier {
    pub fn into_supplier(self, id: u64) -> Supplier {
        Supplier {
            id,
            name: self.name.trim().to_string(),
            contact_person: non_blank(self.contact_person),
            phone: non_blank(self.phone),
            email: non_blank(self.email),
            address: non_blank(self.address),
        }
    }
}

/// Empty optional text is stored as `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// =============================================================================
// Purchase Order
// =============================================================================

/// Purchase order status.
///
/// ```text
///   Pending ──► Shipped ──► Delivered
///      │           │
///      │           └──────► Cancelled
///      ├──────────────────► Delivered
///      └──────────────────► Cancelled
/// ```
/// Delivered and Cancelled are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Delivered and Cancelled orders never change again.
    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Pending or Shipped: goods still on their way.
    pub fn is_open(&self) -> bool {
        !self.is_final()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|s| s.as_str().to_string())
                    .collect(),
            })
    }
}

/// One line of a purchase order, snapshotting the item at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub inventory_item_id: u64,
    pub name: String,
    pub quantity: Quantity,
    pub unit: String,
    pub purchase_price: Money,
}

impl PurchaseOrderLine {
    pub fn line_total(&self) -> Money {
        self.purchase_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: u64,

    pub supplier_id: u64,

    /// Supplier name when the order was placed.
    pub supplier_name: String,

    #[ts(as = "String")]
    pub order_date: NaiveDate,

    #[ts(as = "String")]
    pub expected_delivery_date: NaiveDate,

    pub lines: Vec<PurchaseOrderLine>,

    pub status: OrderStatus,

    /// Σ line quantity × price, fixed at creation.
    pub total_value: Money,
}

impl PurchaseOrder {
    /// Whole days between ordering and expected delivery.
    pub fn lead_time_days(&self) -> i64 {
        (self.expected_delivery_date - self.order_date).num_days()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(quantity: i64, threshold: i64, expiry: Option<NaiveDate>) -> InventoryItem {
        NewItem {
            name: "Paneer".to_string(),
            category: "Dairy".to_string(),
            quantity: Quantity::from_units(quantity),
            unit: "kg".to_string(),
            purchase_price: Money::from_cents(32050),
            purchase_date: date(2024, 3, 1),
            expiry_date: expiry,
            low_stock_threshold: Quantity::from_units(threshold),
        }
        .into_item(1, Utc::now())
    }

    #[test]
    fn test_expiry_status_boundaries() {
        let today = date(2024, 3, 10);
        assert_eq!(ExpiryStatus::of(None, today), ExpiryStatus::NoExpiry);
        assert_eq!(ExpiryStatus::of(Some(date(2024, 3, 9)), today), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::of(Some(today), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::of(Some(date(2024, 3, 17)), today), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::of(Some(date(2024, 3, 18)), today), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_low_stock_is_inclusive() {
        assert!(item(5, 5, None).is_low_stock());
        assert!(item(4, 5, None).is_low_stock());
        assert!(!item(6, 5, None).is_low_stock());
        assert!(item(0, 0, None).is_low_stock());
    }

    #[test]
    fn test_stock_value() {
        let paneer = item(3, 1, None);
        assert_eq!(paneer.stock_value(), Money::from_cents(96150));
    }

    #[test]
    fn test_item_serializes_camel_case() {
        let json = serde_json::to_value(item(2, 1, Some(date(2024, 4, 1)))).unwrap();
        assert_eq!(json["lowStockThreshold"], 1000);
        assert_eq!(json["purchasePrice"], 32050);
        assert_eq!(json["expiryDate"], "2024-04-01");
    }

    #[test]
    fn test_order_status_parse_and_finality() {
        assert_eq!("shipped".parse::<OrderStatus>().unwrap(), OrderStatus::Shipped);
        assert_eq!("Delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert!("lost".parse::<OrderStatus>().is_err());
        assert!(OrderStatus::Cancelled.is_final());
        assert!(OrderStatus::Shipped.is_open());
    }

    #[test]
    fn test_transaction_kind_parse() {
        assert_eq!("Billing".parse::<TransactionKind>().unwrap(), TransactionKind::Billing);
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_supplier_blank_fields_become_none() {
        let supplier = NewSupplier {
            name: "  Fresh Farms ".to_string(),
            contact_person: Some("Ravi".to_string()),
            phone: Some("   ".to_string()),
            email: None,
            address: Some(String::new()),
        }
        .into_supplier(4);
        assert_eq!(supplier.name, "Fresh Farms");
        assert_eq!(supplier.contact_person.as_deref(), Some("Ravi"));
        assert_eq!(supplier.phone, None);
        assert_eq!(supplier.address, None);
    }

    #[test]
    fn test_lead_time_days() {
        let order = PurchaseOrder {
            id: 1,
            supplier_id: 2,
            supplier_name: "Fresh Farms".to_string(),
            order_date: date(2024, 2, 27),
            expected_delivery_date: date(2024, 3, 2),
            lines: vec![],
            status: OrderStatus::Pending,
            total_value: Money::zero(),
        };
        assert_eq!(order.lead_time_days(), 4);
    }
}
