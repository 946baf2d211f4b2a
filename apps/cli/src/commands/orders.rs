//! # Purchase Order Commands
//!
//! ```text
//! order-create --supplier 3 --delivery 2024-03-13 --line 12:20 --line 15:5:42.50
//!                                                        │  │     │  │  │
//!                                                   item id │     │  │  price (optional,
//!                                                      quantity   │  │  defaults to the
//!                                                                 │  │  item's price)
//! ```

use chrono::NaiveDate;
use clap::Args;
use std::io::Write;

use pantry_core::purchase_order::{next_statuses, NewPurchaseOrder, OrderLineDraft};
use pantry_core::state::Command;
use pantry_core::validation::{parse_money, parse_quantity};
use pantry_core::{CoreError, OrderStatus};

use super::{date_arg, Shell};
use crate::error::CliResult;
use crate::render::{self, Table};

#[derive(Debug, Clone, Args)]
pub struct OrderCreateArgs {
    #[arg(long)]
    pub supplier: u64,
    /// Defaults to today
    #[arg(long, value_parser = date_arg)]
    pub date: Option<NaiveDate>,
    /// Expected delivery date
    #[arg(long, value_parser = date_arg)]
    pub delivery: NaiveDate,
    /// ITEM_ID:QUANTITY[:PRICE], repeatable
    #[arg(long = "line", value_parser = line_arg, required = true)]
    pub lines: Vec<OrderLineDraft>,
}

/// `12:20` or `12:20:42.50`
fn line_arg(text: &str) -> Result<OrderLineDraft, String> {
    let parts: Vec<&str> = text.split(':').collect();
    let (id, quantity, price) = match parts.as_slice() {
        [id, quantity] => (*id, *quantity, None),
        [id, quantity, price] => (*id, *quantity, Some(*price)),
        _ => return Err(format!("expected ITEM_ID:QUANTITY[:PRICE], got '{}'", text)),
    };

    let item_id = id
        .trim()
        .parse::<u64>()
        .map_err(|_| format!("'{}' is not an item id", id))?;
    let quantity = parse_quantity("quantity", quantity).map_err(|e| e.to_string())?;
    let purchase_price = price
        .map(|p| parse_money("purchase price", p))
        .transpose()
        .map_err(|e| e.to_string())?;

    Ok(OrderLineDraft {
        item_id: Some(item_id),
        quantity,
        purchase_price,
    })
}

pub fn list<W: Write>(shell: &Shell, status: Option<OrderStatus>, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let mut orders: Vec<_> = state
        .purchase_orders
        .iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .collect();
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(b.id.cmp(&a.id)));

    if orders.is_empty() {
        writeln!(out, "No purchase orders.")?;
        return Ok(());
    }

    let mut table = Table::new(&[
        "ID", "Supplier", "Ordered", "Expected", "Lines", "Total", "Status", "Next",
    ])
    .align_right(&[0, 4, 5]);

    for order in orders {
        let next: Vec<&str> = next_statuses(order.status).iter().map(|s| s.as_str()).collect();
        table.push(vec![
            order.id.to_string(),
            order.supplier_name.clone(),
            render::date(Some(order.order_date)),
            render::date(Some(order.expected_delivery_date)),
            order.lines.len().to_string(),
            shell.money(order.total_value),
            order.status.to_string(),
            next.join("/"),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

pub fn create<W: Write>(shell: &mut Shell, args: OrderCreateArgs, out: &mut W) -> CliResult<()> {
    let draft = NewPurchaseOrder {
        supplier_id: args.supplier,
        order_date: args.date.unwrap_or_else(|| shell.session.today()),
        expected_delivery_date: args.delivery,
        lines: args.lines,
    };

    let outcome = shell.session.dispatch(Command::CreateOrder(draft))?;
    if let Some(order) = outcome.created_id.and_then(|id| shell.session.state().order(id)) {
        writeln!(
            out,
            "Created purchase order #{} for {}: {} line(s), total {}.",
            order.id,
            order.supplier_name,
            order.lines.len(),
            shell.money(order.total_value)
        )?;
    }
    Ok(())
}

pub fn set_status<W: Write>(shell: &mut Shell, id: u64, status: OrderStatus, out: &mut W) -> CliResult<()> {
    let before = shell
        .session
        .state()
        .order(id)
        .ok_or(CoreError::OrderNotFound(id))?
        .status;

    let outcome = shell.session.dispatch(Command::UpdateOrderStatus { id, status })?;

    if before == status {
        writeln!(out, "Order #{} is already {}.", id, status)?;
        return Ok(());
    }

    writeln!(out, "Order #{} is now {}.", id, status)?;
    let state = shell.session.state();
    for txn in outcome.logged.iter().filter_map(|txn_id| state.transaction(*txn_id)) {
        writeln!(
            out,
            "  {} {} received ({} → {}).",
            txn.item_name,
            render::signed(txn.quantity_change),
            txn.quantity_before,
            txn.quantity_after
        )?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
