//! # Filters
//!
//! Criteria for the inventory list and the transaction history. Every
//! criterion is optional and they combine with logical AND: an empty filter
//! matches everything.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::Clock;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{ExpiryStatus, InventoryItem, Transaction, TransactionKind};

// =============================================================================
// Inventory Filter
// =============================================================================

/// Status column of the inventory list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    LowStock,
    ExpiringSoon,
    Expired,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryFilter {
    /// Case-insensitive substring of the item name.
    pub name: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub min_quantity: Option<Quantity>,
    pub max_quantity: Option<Quantity>,
    /// Inclusive. Undated items never match a date bound.
    #[ts(as = "Option<String>")]
    pub expiry_from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub expiry_to: Option<NaiveDate>,
    pub status: Option<StockStatus>,
}

impl InventoryFilter {
    pub fn is_empty(&self) -> bool {
        self == &InventoryFilter::default()
    }

    pub fn matches(&self, item: &InventoryItem, today: NaiveDate) -> bool {
        if let Some(name) = non_empty(&self.name) {
            if !contains_ignore_case(&item.name, name) {
                return false;
            }
        }

        if let Some(category) = non_empty(&self.category) {
            if item.category != category {
                return false;
            }
        }

        if self.min_price.is_some_and(|min| item.purchase_price < min)
            || self.max_price.is_some_and(|max| item.purchase_price > max)
        {
            return false;
        }

        if self.min_quantity.is_some_and(|min| item.quantity < min)
            || self.max_quantity.is_some_and(|max| item.quantity > max)
        {
            return false;
        }

        if self.expiry_from.is_some() || self.expiry_to.is_some() {
            let Some(expiry) = item.expiry_date else {
                return false;
            };
            if self.expiry_from.is_some_and(|from| expiry < from)
                || self.expiry_to.is_some_and(|to| expiry > to)
            {
                return false;
            }
        }

        match self.status {
            None => true,
            Some(StockStatus::LowStock) => item.is_low_stock(),
            Some(StockStatus::ExpiringSoon) => {
                item.expiry_status(today) == ExpiryStatus::ExpiringSoon
            }
            Some(StockStatus::Expired) => item.expiry_status(today) == ExpiryStatus::Expired,
        }
    }

    /// Matching items, in inventory order.
    pub fn apply<'a>(&self, items: &'a [InventoryItem], today: NaiveDate) -> Vec<&'a InventoryItem> {
        items.iter().filter(|item| self.matches(item, today)).collect()
    }
}

// =============================================================================
// History Filter
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    /// Case-insensitive substring of the item name snapshot.
    pub item_name: Option<String>,
    pub kind: Option<TransactionKind>,
    /// Inclusive bounds on the calendar date of the timestamp.
    #[ts(as = "Option<String>")]
    pub from: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub to: Option<NaiveDate>,
    pub min_change: Option<Quantity>,
    pub max_change: Option<Quantity>,
}

impl HistoryFilter {
    /// Date bounds are compared in `clock`'s calendar, the same one that
    /// decides "today".
    pub fn matches(&self, txn: &Transaction, clock: &dyn Clock) -> bool {
        if let Some(name) = non_empty(&self.item_name) {
            if !contains_ignore_case(&txn.item_name, name) {
                return false;
            }
        }

        if self.kind.is_some_and(|kind| txn.kind != kind) {
            return false;
        }

        let day = clock.date_of(txn.timestamp);
        if self.from.is_some_and(|from| day < from) || self.to.is_some_and(|to| day > to) {
            return false;
        }

        !(self.min_change.is_some_and(|min| txn.quantity_change < min)
            || self.max_change.is_some_and(|max| txn.quantity_change > max))
    }

    /// Matching transactions, newest first.
    pub fn apply<'a>(&self, transactions: &'a [Transaction], clock: &dyn Clock) -> Vec<&'a Transaction> {
        let mut matched: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| self.matches(txn, clock))
            .collect();
        sort_newest_first(&mut matched);
        matched
    }
}

/// Newest first; ties keep the later-logged transaction on top.
pub fn sort_newest_first(transactions: &mut [&Transaction]) {
    transactions.reverse();
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

// =============================================================================
// Alerts
// =============================================================================

/// Items at or below their low-stock threshold.
pub fn low_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|item| item.is_low_stock()).collect()
}

// =============================================================================
// Helpers
// =============================================================================

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::FixedClock;
    use crate::types::NewItem;
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: u64, name: &str, category: &str, qty: i64, price: i64, expiry: Option<NaiveDate>) -> InventoryItem {
        NewItem {
            name: name.to_string(),
            category: category.to_string(),
            quantity: Quantity::from_units(qty),
            unit: "kg".to_string(),
            purchase_price: Money::from_major(price),
            purchase_date: date(2024, 3, 1),
            expiry_date: expiry,
            low_stock_threshold: Quantity::from_units(5),
        }
        .into_item(id, Utc::now())
    }

    fn pantry() -> Vec<InventoryItem> {
        vec![
            item(1, "Basmati Rice", "Grains & Flours", 40, 120, None),
            item(2, "Paneer", "Dairy", 3, 320, Some(date(2024, 3, 12))),
            item(3, "Toor Dal", "Grains & Pulses", 25, 140, Some(date(2024, 9, 1))),
            item(4, "Curd", "Dairy", 8, 60, Some(date(2024, 3, 8))),
        ]
    }

    fn ids(items: Vec<&InventoryItem>) -> Vec<u64> {
        items.into_iter().map(|i| i.id).collect()
    }

    fn today() -> NaiveDate {
        date(2024, 3, 10)
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let items = pantry();
        let filter = InventoryFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&items, today()).len(), 4);
    }

    #[test]
    fn test_name_and_category() {
        let items = pantry();
        let filter = InventoryFilter {
            name: Some("RICE".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![1]);

        let filter = InventoryFilter {
            category: Some("Dairy".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![2, 4]);
    }

    #[test]
    fn test_ranges_are_inclusive() {
        let items = pantry();
        let filter = InventoryFilter {
            min_price: Some(Money::from_major(120)),
            max_price: Some(Money::from_major(140)),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![1, 3]);

        let filter = InventoryFilter {
            min_quantity: Some(Quantity::from_units(8)),
            max_quantity: Some(Quantity::from_units(25)),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![3, 4]);
    }

    #[test]
    fn test_expiry_bounds_exclude_undated() {
        let items = pantry();
        let filter = InventoryFilter {
            expiry_to: Some(date(2024, 3, 12)),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![2, 4]);

        let filter = InventoryFilter {
            expiry_from: Some(date(2024, 3, 1)),
            ..Default::default()
        };
        assert_eq!(ids(filter.apply(&items, today())), vec![2, 3, 4]);
    }

    #[test]
    fn test_status() {
        let items = pantry();
        let by_status = |status| {
            ids(InventoryFilter {
                status: Some(status),
                ..Default::default()
            }
            .apply(&items, today()))
        };
        assert_eq!(by_status(StockStatus::LowStock), vec![2]);
        assert_eq!(by_status(StockStatus::ExpiringSoon), vec![2]);
        assert_eq!(by_status(StockStatus::Expired), vec![4]);
    }

    #[test]
    fn test_low_stock_items() {
        let items = pantry();
        assert_eq!(ids(low_stock_items(&items)), vec![2]);
    }

    fn txn(id: u64, name: &str, kind: TransactionKind, change: i64, day: u32) -> Transaction {
        Transaction {
            id,
            item_id: id,
            item_name: name.to_string(),
            kind,
            quantity_before: Quantity::from_units(10),
            quantity_after: Quantity::from_units(10 + change),
            quantity_change: Quantity::from_units(change),
            notes: None,
            purchase_order_id: None,
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, 23, 30, 0).unwrap(),
        }
    }

    fn history() -> Vec<Transaction> {
        vec![
            txn(1, "Paneer", TransactionKind::Create, 10, 1),
            txn(2, "Paneer", TransactionKind::Billing, -1, 5),
            txn(3, "Basmati Rice", TransactionKind::Inwards, 20, 5),
            txn(4, "Basmati Rice", TransactionKind::Outwards, -4, 9),
        ]
    }

    fn txn_ids(txns: Vec<&Transaction>) -> Vec<u64> {
        txns.into_iter().map(|t| t.id).collect()
    }

    fn clock() -> FixedClock {
        FixedClock::on(today())
    }

    /// A kitchen on Indian Standard Time (UTC+05:30).
    struct IstClock;

    impl Clock for IstClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap()
        }

        fn today(&self) -> NaiveDate {
            self.date_of(self.now())
        }

        fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
            let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
            at.with_timezone(&ist).date_naive()
        }
    }

    #[test]
    fn test_history_newest_first() {
        let txns = history();
        assert_eq!(txn_ids(HistoryFilter::default().apply(&txns, &clock())), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_history_filters() {
        let txns = history();

        let filter = HistoryFilter {
            item_name: Some("paneer".to_string()),
            ..Default::default()
        };
        assert_eq!(txn_ids(filter.apply(&txns, &clock())), vec![2, 1]);

        let filter = HistoryFilter {
            kind: Some(TransactionKind::Inwards),
            ..Default::default()
        };
        assert_eq!(txn_ids(filter.apply(&txns, &clock())), vec![3]);

        // End date includes the whole day
        let filter = HistoryFilter {
            from: Some(date(2024, 3, 5)),
            to: Some(date(2024, 3, 5)),
            ..Default::default()
        };
        assert_eq!(txn_ids(filter.apply(&txns, &clock())), vec![3, 2]);

        let filter = HistoryFilter {
            max_change: Some(Quantity::zero()),
            ..Default::default()
        };
        assert_eq!(txn_ids(filter.apply(&txns, &clock())), vec![4, 2]);

        let filter = HistoryFilter {
            min_change: Some(Quantity::from_units(15)),
            ..Default::default()
        };
        assert_eq!(txn_ids(filter.apply(&txns, &clock())), vec![3]);
    }

    #[test]
    fn test_history_dates_follow_the_clock_calendar() {
        // Logged at 23:30 UTC on the 5th, which is already the 6th in IST
        let txns = history();
        let on = |day: u32| HistoryFilter {
            from: Some(date(2024, 3, day)),
            to: Some(date(2024, 3, day)),
            ..Default::default()
        };

        assert_eq!(txn_ids(on(6).apply(&txns, &IstClock)), vec![3, 2]);
        assert!(on(5).apply(&txns, &IstClock).is_empty());
        assert_eq!(txn_ids(on(5).apply(&txns, &clock())), vec![3, 2]);
    }
}
