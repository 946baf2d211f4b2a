//! # Store State
//!
//! The whole kitchen in one value, and the single transition function that
//! changes it.
//!
//! ## State Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   StoreState ──apply(Command, &mut Context)──► Ok(Transition {          │
//! │   (untouched)                                       state,              │
//! │        │                                            created_id,         │
//! │        │                                            logged,             │
//! │        │                                        })                      │
//! │        │                                                                │
//! │        └────────────────────────────────────► Err(CoreError)            │
//! │                                               "nothing happened":       │
//! │                                               caller keeps old state    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every quantity change goes through `apply`, and `apply` logs a
//! [`Transaction`] exactly when an item's quantity moved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::filter;
use crate::ids::Context;
use crate::money::Money;
use crate::purchase_order::{build_order, check_transition, delivery_note, NewPurchaseOrder};
use crate::quantity::Quantity;
use crate::stock::{self, Receipt};
use crate::types::{
    InventoryItem, NewItem, NewSupplier, OrderStatus, PurchaseOrder, Supplier, Transaction,
    TransactionKind,
};
use crate::validation::{validate_new_item, validate_new_supplier};
use crate::MANUAL_EDIT_NOTE;

// =============================================================================
// Commands
// =============================================================================

/// Everything a user can do that changes the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddItem(NewItem),
    /// Replaces every field of the item. `note` defaults to
    /// "Manual edit from form".
    EditItem {
        id: u64,
        changes: NewItem,
        note: Option<String>,
    },
    DeleteItem {
        id: u64,
    },
    /// Inwards.
    ReceiveStock {
        id: u64,
        quantity: Quantity,
        price: Money,
        expiry_date: Option<chrono::NaiveDate>,
    },
    /// Outwards.
    IssueStock {
        id: u64,
        quantity: Quantity,
        notes: Option<String>,
    },
    /// One unit sold at the counter.
    Bill {
        id: u64,
    },
    ImportItems(Vec<NewItem>),
    AddSupplier(NewSupplier),
    UpdateSupplier {
        id: u64,
        changes: NewSupplier,
    },
    DeleteSupplier {
        id: u64,
    },
    CreateOrder(NewPurchaseOrder),
    UpdateOrderStatus {
        id: u64,
        status: OrderStatus,
    },
}

impl Command {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddItem(_) => "add_item",
            Command::EditItem { .. } => "edit_item",
            Command::DeleteItem { .. } => "delete_item",
            Command::ReceiveStock { .. } => "receive_stock",
            Command::IssueStock { .. } => "issue_stock",
            Command::Bill { .. } => "bill",
            Command::ImportItems(_) => "import_items",
            Command::AddSupplier(_) => "add_supplier",
            Command::UpdateSupplier { .. } => "update_supplier",
            Command::DeleteSupplier { .. } => "delete_supplier",
            Command::CreateOrder(_) => "create_order",
            Command::UpdateOrderStatus { .. } => "update_order_status",
        }
    }
}

/// The result of a successful command.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: StoreState,
    /// Id of the item, supplier or order the command created.
    pub created_id: Option<u64>,
    /// Ids of the transactions the command logged, in order.
    pub logged: Vec<u64>,
}

// =============================================================================
// Store State
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub items: Vec<InventoryItem>,
    /// Append-only, oldest first.
    pub transactions: Vec<Transaction>,
    pub suppliers: Vec<Supplier>,
    pub purchase_orders: Vec<PurchaseOrder>,
}

/// A quantity change about to be logged.
struct Movement {
    item_id: u64,
    item_name: String,
    kind: TransactionKind,
    before: Quantity,
    after: Quantity,
    notes: Option<String>,
    purchase_order_id: Option<u64>,
}

impl StoreState {
    /// A store stocked with `items` as opening inventory. Opening stock is
    /// not a movement, so no transactions are logged.
    pub fn seeded(items: Vec<NewItem>, ctx: &mut Context<'_>) -> Self {
        let now = ctx.now();
        let items = items
            .into_iter()
            .map(|item| item.into_item(ctx.next_id(), now))
            .collect();
        StoreState {
            items,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Transition
    // -------------------------------------------------------------------------

    /// Applies `command` to a copy of this state.
    pub fn apply(&self, command: Command, ctx: &mut Context<'_>) -> CoreResult<Transition> {
        let mut next = self.clone();
        let mut created_id = None;
        let mut logged = Vec::new();
        let now = ctx.now();

        match command {
            Command::AddItem(new_item) => {
                let id = next.add_item(new_item, ctx, &mut logged)?;
                created_id = Some(id);
            }

            Command::ImportItems(new_items) => {
                for new_item in new_items {
                    next.add_item(new_item, ctx, &mut logged)?;
                }
            }

            Command::EditItem { id, changes, note } => {
                validate_new_item(&changes)?;
                let before = next.item_mut(id)?.clone();
                let after = changes.into_item(id, now);
                next.replace_item(after.clone());

                let notes = note
                    .filter(|n| !n.trim().is_empty())
                    .or_else(|| Some(MANUAL_EDIT_NOTE.to_string()));
                next.log(ctx, movement(&before, &after, TransactionKind::Edit, notes, None), &mut logged);
            }

            Command::DeleteItem { id } => {
                let before = next.item_mut(id)?.clone();
                next.items.retain(|item| item.id != id);

                let mut after = before.clone();
                after.quantity = Quantity::zero();
                next.log(ctx, movement(&before, &after, TransactionKind::Delete, None, None), &mut logged);
            }

            Command::ReceiveStock {
                id,
                quantity,
                price,
                expiry_date,
            } => {
                let before = next.item_mut(id)?.clone();
                let receipt = Receipt {
                    quantity,
                    price,
                    expiry_date,
                };
                let after = stock::receive(&before, &receipt, now)?;
                next.replace_item(after.clone());
                next.log(ctx, movement(&before, &after, TransactionKind::Inwards, None, None), &mut logged);
            }

            Command::IssueStock { id, quantity, notes } => {
                let before = next.item_mut(id)?.clone();
                let after = stock::issue(&before, quantity, now)?;
                next.replace_item(after.clone());

                let notes = notes.filter(|n| !n.trim().is_empty());
                next.log(ctx, movement(&before, &after, TransactionKind::Outwards, notes, None), &mut logged);
            }

            Command::Bill { id } => {
                let before = next.item_mut(id)?.clone();
                let after = stock::bill(&before, ctx.today(), now)?;
                next.replace_item(after.clone());
                next.log(ctx, movement(&before, &after, TransactionKind::Billing, None, None), &mut logged);
            }

            Command::AddSupplier(new_supplier) => {
                validate_new_supplier(&new_supplier)?;
                let id = ctx.next_id();
                next.suppliers.push(new_supplier.into_supplier(id));
                created_id = Some(id);
            }

            Command::UpdateSupplier { id, changes } => {
                validate_new_supplier(&changes)?;
                let supplier = next
                    .suppliers
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or(CoreError::SupplierNotFound(id))?;
                *supplier = changes.into_supplier(id);
            }

            Command::DeleteSupplier { id } => {
                next.supplier(id).ok_or(CoreError::SupplierNotFound(id))?;

                let open_orders = next.open_orders_for(id).len();
                if open_orders > 0 {
                    return Err(CoreError::SupplierHasOpenOrders { id, open_orders });
                }
                next.suppliers.retain(|s| s.id != id);
            }

            Command::CreateOrder(draft) => {
                let mut order = build_order(0, &draft, &next.suppliers, &next.items)?;
                order.id = ctx.next_id();
                created_id = Some(order.id);
                next.purchase_orders.push(order);
            }

            Command::UpdateOrderStatus { id, status } => {
                let order = next.order(id).ok_or(CoreError::OrderNotFound(id))?.clone();
                if check_transition(&order, status)? {
                    if status == OrderStatus::Delivered {
                        next.receive_order(&order, ctx, &mut logged)?;
                    }
                    if let Some(stored) = next.purchase_orders.iter_mut().find(|o| o.id == id) {
                        stored.status = status;
                    }
                }
            }
        }

        Ok(Transition {
            state: next,
            created_id,
            logged,
        })
    }

    // -------------------------------------------------------------------------
    // Mutation helpers (only ever called on the copy inside `apply`)
    // -------------------------------------------------------------------------

    fn add_item(
        &mut self,
        new_item: NewItem,
        ctx: &mut Context<'_>,
        logged: &mut Vec<u64>,
    ) -> CoreResult<u64> {
        validate_new_item(&new_item)?;
        let id = ctx.next_id();
        let item = new_item.into_item(id, ctx.now());

        let mut before = item.clone();
        before.quantity = Quantity::zero();
        let created = movement(&before, &item, TransactionKind::Create, None, None);

        self.items.push(item);
        self.log(ctx, created, logged);
        Ok(id)
    }

    /// Merges each line into stock. Lines whose item has since been deleted
    /// are skipped.
    fn receive_order(
        &mut self,
        order: &PurchaseOrder,
        ctx: &mut Context<'_>,
        logged: &mut Vec<u64>,
    ) -> CoreResult<()> {
        let now = ctx.now();
        for line in &order.lines {
            let Ok(item) = self.item_mut(line.inventory_item_id) else {
                continue;
            };
            let before = item.clone();
            let after = stock::add_stock(&before, line.quantity, line.purchase_price, now)?;
            *item = after.clone();

            let received = movement(
                &before,
                &after,
                TransactionKind::Inwards,
                Some(delivery_note(order.id)),
                Some(order.id),
            );
            self.log(ctx, received, logged);
        }
        Ok(())
    }

    fn item_mut(&mut self, id: u64) -> CoreResult<&mut InventoryItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(CoreError::ItemNotFound(id))
    }

    fn replace_item(&mut self, updated: InventoryItem) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == updated.id) {
            *item = updated;
        }
    }

    /// Appends a transaction unless the quantity did not move.
    fn log(&mut self, ctx: &mut Context<'_>, movement: Movement, logged: &mut Vec<u64>) {
        let change = movement.after - movement.before;
        if change.is_zero() {
            return;
        }

        let id = ctx.next_id();
        self.transactions.push(Transaction {
            id,
            item_id: movement.item_id,
            item_name: movement.item_name,
            kind: movement.kind,
            quantity_before: movement.before,
            quantity_after: movement.after,
            quantity_change: change,
            notes: movement.notes,
            purchase_order_id: movement.purchase_order_id,
            timestamp: ctx.now(),
        });
        logged.push(id);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn item(&self, id: u64) -> Option<&InventoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn supplier(&self, id: u64) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    pub fn order(&self, id: u64) -> Option<&PurchaseOrder> {
        self.purchase_orders.iter().find(|o| o.id == id)
    }

    pub fn transaction(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    /// All transactions, newest first.
    pub fn history(&self) -> Vec<&Transaction> {
        let mut all: Vec<&Transaction> = self.transactions.iter().collect();
        filter::sort_newest_first(&mut all);
        all
    }

    pub fn low_stock_items(&self) -> Vec<&InventoryItem> {
        filter::low_stock_items(&self.items)
    }

    /// Pending or Shipped orders placed with this supplier.
    pub fn open_orders_for(&self, supplier_id: u64) -> Vec<&PurchaseOrder> {
        self.purchase_orders
            .iter()
            .filter(|o| o.supplier_id == supplier_id && o.status.is_open())
            .collect()
    }

    /// Timestamp of the latest change to any item.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.items.iter().map(|item| item.last_updated).max()
    }
}

fn movement(
    before: &InventoryItem,
    after: &InventoryItem,
    kind: TransactionKind,
    notes: Option<String>,
    purchase_order_id: Option<u64>,
) -> Movement {
    Movement {
        item_id: after.id,
        item_name: after.name.clone(),
        kind,
        before: before.quantity,
        after: after.quantity,
        notes,
        purchase_order_id,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{Clock, FixedClock, SequentialIds};
    use crate::purchase_order::OrderLineDraft;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::on(date(2024, 3, 10))
    }

    fn new_item(name: &str, qty: i64, price: i64, expiry: Option<NaiveDate>) -> NewItem {
        NewItem {
            name: name.to_string(),
            category: "Dairy".to_string(),
            quantity: Quantity::from_units(qty),
            unit: "units".to_string(),
            purchase_price: Money::from_major(price),
            purchase_date: date(2024, 3, 1),
            expiry_date: expiry,
            low_stock_threshold: Quantity::from_units(2),
        }
    }

    /// Runs commands in order, panicking on the first failure.
    fn run(state: StoreState, commands: Vec<Command>, ctx: &mut Context<'_>) -> (StoreState, Vec<Transition>) {
        let mut state = state;
        let mut transitions = Vec::new();
        for command in commands {
            let t = state.apply(command, ctx).unwrap();
            state = t.state.clone();
            transitions.push(t);
        }
        (state, transitions)
    }

    #[test]
    fn test_add_item_logs_create() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);

        let t = StoreState::default()
            .apply(Command::AddItem(new_item("Milk", 6, 30, None)), &mut ctx)
            .unwrap();

        assert_eq!(t.created_id, Some(1));
        assert_eq!(t.logged, vec![2]);
        let txn = t.state.transaction(2).unwrap();
        assert_eq!(txn.kind, TransactionKind::Create);
        assert_eq!(txn.quantity_before, Quantity::zero());
        assert_eq!(txn.quantity_change, Quantity::from_units(6));
        assert_eq!(txn.timestamp, clock.now());
    }

    #[test]
    fn test_zero_quantity_create_and_delete_log_nothing() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);

        let added = StoreState::default()
            .apply(Command::AddItem(new_item("Saffron", 0, 500, None)), &mut ctx)
            .unwrap();
        assert!(added.logged.is_empty());

        let id = added.created_id.unwrap();
        let deleted = added.state.apply(Command::DeleteItem { id }, &mut ctx).unwrap();
        assert!(deleted.logged.is_empty());
        assert!(deleted.state.items.is_empty());
    }

    #[test]
    fn test_receive_example() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(vec![new_item("Ghee", 10, 100, None)], &mut ctx);

        let t = state
            .apply(
                Command::ReceiveStock {
                    id: 1,
                    quantity: Quantity::from_units(10),
                    price: Money::from_major(200),
                    expiry_date: None,
                },
                &mut ctx,
            )
            .unwrap();

        let ghee = t.state.item(1).unwrap();
        assert_eq!(ghee.quantity, Quantity::from_units(20));
        assert_eq!(ghee.purchase_price, Money::from_cents(15000));
        assert_eq!(t.logged.len(), 1);
        assert_eq!(t.state.transactions[0].kind, TransactionKind::Inwards);
        assert_eq!(t.state.transactions[0].quantity_change, Quantity::from_units(10));
    }

    #[test]
    fn test_bill_example() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(vec![new_item("Milk", 5, 30, None)], &mut ctx);

        let t = state.apply(Command::Bill { id: 1 }, &mut ctx).unwrap();

        assert_eq!(t.state.item(1).unwrap().quantity, Quantity::from_units(4));
        assert_eq!(t.state.transactions.len(), 1);
        let txn = &t.state.transactions[0];
        assert_eq!(txn.kind, TransactionKind::Billing);
        assert_eq!(txn.quantity_change, Quantity::from_units(-1));
    }

    #[test]
    fn test_failed_command_leaves_state_untouched() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(
            vec![new_item("Curd", 5, 60, Some(date(2024, 3, 8)))],
            &mut ctx,
        );
        let snapshot = state.clone();

        assert!(matches!(
            state.apply(Command::Bill { id: 1 }, &mut ctx),
            Err(CoreError::ItemExpired { .. })
        ));
        assert!(matches!(
            state.apply(Command::Bill { id: 42 }, &mut ctx),
            Err(CoreError::ItemNotFound(42))
        ));
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_issue_clamps_and_logs_actual_change() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(vec![new_item("Butter", 3, 55, None)], &mut ctx);

        let t = state
            .apply(
                Command::IssueStock {
                    id: 1,
                    quantity: Quantity::from_units(5),
                    notes: Some("Wedding order".to_string()),
                },
                &mut ctx,
            )
            .unwrap();

        assert_eq!(t.state.item(1).unwrap().quantity, Quantity::zero());
        let txn = &t.state.transactions[0];
        assert_eq!(txn.quantity_change, Quantity::from_units(-3));
        assert_eq!(txn.notes.as_deref(), Some("Wedding order"));
    }

    #[test]
    fn test_edit_logs_only_quantity_changes() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(vec![new_item("Paneer", 4, 320, None)], &mut ctx);

        let mut renamed = NewItem::from(state.item(1).unwrap());
        renamed.name = "Malai Paneer".to_string();
        let t = state
            .apply(
                Command::EditItem {
                    id: 1,
                    changes: renamed.clone(),
                    note: None,
                },
                &mut ctx,
            )
            .unwrap();
        assert!(t.logged.is_empty());
        assert_eq!(t.state.item(1).unwrap().name, "Malai Paneer");

        let mut recount = renamed;
        recount.quantity = Quantity::from_units(3);
        let t = t
            .state
            .apply(
                Command::EditItem {
                    id: 1,
                    changes: recount,
                    note: None,
                },
                &mut ctx,
            )
            .unwrap();
        let txn = &t.state.transactions[0];
        assert_eq!(txn.kind, TransactionKind::Edit);
        assert_eq!(txn.item_name, "Malai Paneer");
        assert_eq!(txn.notes.as_deref(), Some(MANUAL_EDIT_NOTE));
    }

    #[test]
    fn test_import_adds_each_item() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);

        let t = StoreState::default()
            .apply(
                Command::ImportItems(vec![new_item("Milk", 2, 30, None), new_item("Curd", 1, 60, None)]),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(t.state.items.len(), 2);
        assert_eq!(t.logged.len(), 2);
    }

    fn order_fixture(ctx: &mut Context<'_>) -> (StoreState, u64, u64) {
        let state = StoreState::seeded(vec![new_item("Onions", 10, 40, None)], ctx);
        let (state, transitions) = run(
            state,
            vec![Command::AddSupplier(NewSupplier {
                name: "Fresh Farms".to_string(),
                ..Default::default()
            })],
            ctx,
        );
        let supplier_id = transitions[0].created_id.unwrap();

        let t = state
            .apply(
                Command::CreateOrder(NewPurchaseOrder {
                    supplier_id,
                    order_date: date(2024, 3, 10),
                    expected_delivery_date: date(2024, 3, 12),
                    lines: vec![OrderLineDraft {
                        item_id: Some(1),
                        quantity: Quantity::from_units(20),
                        purchase_price: Some(Money::from_major(50)),
                    }],
                }),
                ctx,
            )
            .unwrap();
        let order_id = t.created_id.unwrap();
        (t.state, supplier_id, order_id)
    }

    #[test]
    fn test_delivered_order_receives_stock() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let (state, _, order_id) = order_fixture(&mut ctx);

        let t = state
            .apply(
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Delivered,
                },
                &mut ctx,
            )
            .unwrap();

        let onions = t.state.item(1).unwrap();
        assert_eq!(onions.quantity, Quantity::from_units(30));
        // (10 × 40 + 20 × 50) / 30 = 46.666… → 46.67
        assert_eq!(onions.purchase_price, Money::from_cents(4667));

        assert_eq!(t.logged.len(), 1);
        let txn = t.state.transaction(t.logged[0]).unwrap();
        assert_eq!(txn.kind, TransactionKind::Inwards);
        assert_eq!(txn.purchase_order_id, Some(order_id));
        assert_eq!(
            txn.notes.as_deref(),
            Some(format!("Received via purchase order #{}", order_id).as_str())
        );
        assert_eq!(t.state.order(order_id).unwrap().status, OrderStatus::Delivered);

        // Final: further updates rejected, nothing changes
        for status in OrderStatus::ALL {
            assert!(t
                .state
                .apply(Command::UpdateOrderStatus { id: order_id, status }, &mut ctx)
                .is_err());
        }
    }

    #[test]
    fn test_delivery_skips_deleted_items() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let (state, _, order_id) = order_fixture(&mut ctx);

        let (state, _) = run(
            state,
            vec![
                Command::DeleteItem { id: 1 },
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Shipped,
                },
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Delivered,
                },
            ],
            &mut ctx,
        );

        assert!(state.items.is_empty());
        assert_eq!(state.order(order_id).unwrap().status, OrderStatus::Delivered);
        assert!(state
            .transactions
            .iter()
            .all(|t| t.kind != TransactionKind::Inwards));
    }

    #[test]
    fn test_same_status_is_noop_and_cancel_receives_nothing() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let (state, _, order_id) = order_fixture(&mut ctx);

        let same = state
            .apply(
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Pending,
                },
                &mut ctx,
            )
            .unwrap();
        assert_eq!(same.state, state);

        let cancelled = state
            .apply(
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Cancelled,
                },
                &mut ctx,
            )
            .unwrap();
        assert_eq!(cancelled.state.item(1).unwrap().quantity, Quantity::from_units(10));
        assert!(cancelled.logged.is_empty());
    }

    #[test]
    fn test_supplier_with_open_orders_cannot_be_deleted() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let (state, supplier_id, order_id) = order_fixture(&mut ctx);

        assert!(matches!(
            state.apply(Command::DeleteSupplier { id: supplier_id }, &mut ctx),
            Err(CoreError::SupplierHasOpenOrders { open_orders: 1, .. })
        ));

        let (state, _) = run(
            state,
            vec![
                Command::UpdateOrderStatus {
                    id: order_id,
                    status: OrderStatus::Cancelled,
                },
                Command::DeleteSupplier { id: supplier_id },
            ],
            &mut ctx,
        );
        assert!(state.suppliers.is_empty());
        assert_eq!(state.order(order_id).unwrap().supplier_name, "Fresh Farms");
    }

    #[test]
    fn test_history_is_newest_first() {
        let clock = clock();
        let mut ids = SequentialIds::new();
        let mut ctx = Context::new(&mut ids, &clock);
        let state = StoreState::seeded(vec![new_item("Milk", 5, 30, None)], &mut ctx);

        let (state, transitions) = run(
            state,
            vec![Command::Bill { id: 1 }, Command::Bill { id: 1 }],
            &mut ctx,
        );
        let history: Vec<u64> = state.history().iter().map(|t| t.id).collect();
        assert_eq!(history, vec![transitions[1].logged[0], transitions[0].logged[0]]);
    }
}
