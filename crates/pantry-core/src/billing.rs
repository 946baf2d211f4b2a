//! # Billing View
//!
//! The counter screen lists stock "first to expire, first out" so staff
//! reach for the oldest batch first. Expired stock stays visible (so it
//! can be thrown out) but sinks to the bottom and cannot be billed.
//!
//! ```text
//!  ┌──────────────────────────────────────────────┐
//!  │  Milk          exp 2024-03-11   [USE FIRST]  │  ◄ dated, soonest
//!  │  Paneer        exp 2024-03-14   [USE FIRST]  │
//!  │  Toor Dal      exp 2024-09-01                │
//!  │  Basmati Rice  (no expiry)                   │  ◄ undated
//!  │  Salt          (no expiry)                   │
//!  │  Curd          exp 2024-03-08   [EXPIRED]    │  ◄ expired, last
//!  └──────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use ts_rs::TS;

use crate::filter::contains_ignore_case;
use crate::types::{ExpiryStatus, InventoryItem};

/// Badge shown next to an item on the billing screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillingBadge {
    Expired,
    /// Expires within the next week.
    UseFirst,
}

impl BillingBadge {
    pub fn for_item(item: &InventoryItem, today: NaiveDate) -> Option<Self> {
        match item.expiry_status(today) {
            ExpiryStatus::Expired => Some(BillingBadge::Expired),
            ExpiryStatus::ExpiringSoon => Some(BillingBadge::UseFirst),
            ExpiryStatus::Fresh | ExpiryStatus::NoExpiry => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillingBadge::Expired => "EXPIRED",
            BillingBadge::UseFirst => "USE FIRST",
        }
    }
}

/// One row of the billing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingEntry<'a> {
    pub item: &'a InventoryItem,
    pub badge: Option<BillingBadge>,
}

impl BillingEntry<'_> {
    /// Expired or empty rows are shown greyed out.
    pub fn is_billable(&self) -> bool {
        self.badge != Some(BillingBadge::Expired) && self.item.quantity.is_positive()
    }
}

/// FIFO-by-expiry ordering.
///
/// 1. Expired items last
/// 2. Dated items before undated ones
/// 3. Earlier expiry first
/// 4. Name, case-insensitive
pub fn fifo_cmp(a: &InventoryItem, b: &InventoryItem, today: NaiveDate) -> Ordering {
    let expired = |item: &InventoryItem| item.is_expired(today);

    expired(a)
        .cmp(&expired(b))
        .then_with(|| match (a.expiry_date, b.expiry_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
}

/// Items sorted for billing.
pub fn fifo_order(items: &[InventoryItem], today: NaiveDate) -> Vec<&InventoryItem> {
    let mut sorted: Vec<&InventoryItem> = items.iter().collect();
    sorted.sort_by(|a, b| fifo_cmp(a, b, today));
    sorted
}

/// The billing list: name search first, then FIFO order, with badges.
pub fn billing_list<'a>(
    items: &'a [InventoryItem],
    search: &str,
    today: NaiveDate,
) -> Vec<BillingEntry<'a>> {
    let search = search.trim();

    fifo_order(items, today)
        .into_iter()
        .filter(|item| search.is_empty() || contains_ignore_case(&item.name, search))
        .map(|item| BillingEntry {
            item,
            badge: BillingBadge::for_item(item, today),
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
