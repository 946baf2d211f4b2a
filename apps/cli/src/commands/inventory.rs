//! # Inventory Commands
//!
//! The inventory table, the item form (add/edit/delete), stock movements
//! and the alert lists.

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use std::io::Write;
use tracing::info;

use pantry_core::catalog::categorize;
use pantry_core::filter::{InventoryFilter, StockStatus};
use pantry_core::state::Command;
use pantry_core::stock::validate_issue;
use pantry_core::{CoreError, ExpiryStatus, InventoryItem, Money, NewItem, Quantity};

use super::{date_arg, Shell};
use crate::error::{CliError, CliResult};
use crate::render::{self, Table};

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    LowStock,
    ExpiringSoon,
    Expired,
}

impl From<StatusArg> for StockStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::LowStock => StockStatus::LowStock,
            StatusArg::ExpiringSoon => StockStatus::ExpiringSoon,
            StatusArg::Expired => StockStatus::Expired,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Name contains (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub min_price: Option<Money>,
    #[arg(long)]
    pub max_price: Option<Money>,
    #[arg(long)]
    pub min_qty: Option<Quantity>,
    #[arg(long)]
    pub max_qty: Option<Quantity>,
    /// Expiring on or after (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub expiry_from: Option<NaiveDate>,
    /// Expiring on or before (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub expiry_to: Option<NaiveDate>,
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,
}

impl ListArgs {
    pub fn filter(&self) -> InventoryFilter {
        InventoryFilter {
            name: self.name.clone(),
            category: self.category.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_quantity: self.min_qty,
            max_quantity: self.max_qty,
            expiry_from: self.expiry_from,
            expiry_to: self.expiry_to,
            status: self.status.map(StockStatus::from),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    pub name: String,
    /// Guessed from the name when omitted
    #[arg(long)]
    pub category: Option<String>,
    /// Guessed from the name when omitted
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long, short)]
    pub quantity: Quantity,
    /// Purchase price per unit
    #[arg(long, short)]
    pub price: Money,
    #[arg(long, short, default_value = "0")]
    pub threshold: Quantity,
    /// Defaults to today
    #[arg(long, value_parser = date_arg)]
    pub purchased: Option<NaiveDate>,
    #[arg(long, value_parser = date_arg)]
    pub expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct EditArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long, short)]
    pub quantity: Option<Quantity>,
    #[arg(long, short)]
    pub price: Option<Money>,
    #[arg(long, short)]
    pub threshold: Option<Quantity>,
    #[arg(long, value_parser = date_arg)]
    pub purchased: Option<NaiveDate>,
    #[arg(long, value_parser = date_arg, conflicts_with = "clear_expiry")]
    pub expiry: Option<NaiveDate>,
    /// Remove the expiry date
    #[arg(long)]
    pub clear_expiry: bool,
    /// Note on the edit transaction
    #[arg(long)]
    pub note: Option<String>,
}

impl EditArgs {
    /// The item's current fields with the given options applied.
    fn apply_to(self, item: &InventoryItem) -> (NewItem, Option<String>) {
        let mut changes = NewItem::from(item);
        if let Some(name) = self.name {
            changes.name = name;
        }
        if let Some(category) = self.category {
            changes.category = category;
        }
        if let Some(unit) = self.unit {
            changes.unit = unit;
        }
        if let Some(quantity) = self.quantity {
            changes.quantity = quantity;
        }
        if let Some(price) = self.price {
            changes.purchase_price = price;
        }
        if let Some(threshold) = self.threshold {
            changes.low_stock_threshold = threshold;
        }
        if let Some(purchased) = self.purchased {
            changes.purchase_date = purchased;
        }
        if self.clear_expiry {
            changes.expiry_date = None;
        } else if let Some(expiry) = self.expiry {
            changes.expiry_date = Some(expiry);
        }
        (changes, self.note)
    }
}

#[derive(Debug, Clone, Args)]
pub struct InwardsArgs {
    pub id: u64,
    #[arg(long, short)]
    pub quantity: Quantity,
    /// Price of this batch; defaults to the item's current price
    #[arg(long, short)]
    pub price: Option<Money>,
    /// Expiry of this batch (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, Args)]
pub struct OutwardsArgs {
    pub id: u64,
    #[arg(long, short)]
    pub quantity: Quantity,
    #[arg(long, short)]
    pub notes: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

fn find_item(shell: &Shell, id: u64) -> CliResult<&InventoryItem> {
    shell
        .session
        .state()
        .item(id)
        .ok_or(CliError::Core(CoreError::ItemNotFound(id)))
}

fn status_label(item: &InventoryItem, today: NaiveDate) -> String {
    let mut flags = Vec::new();
    if item.is_low_stock() {
        flags.push("Low Stock".to_string());
    }
    match item.expiry_status(today) {
        status @ (ExpiryStatus::Expired | ExpiryStatus::ExpiringSoon) => flags.push(status.to_string()),
        _ => {}
    }
    flags.join(", ")
}

pub fn list<W: Write>(shell: &Shell, args: &ListArgs, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let today = shell.session.today();
    let items = args.filter().apply(&state.items, today);

    if items.is_empty() {
        writeln!(out, "No items match the current filters.")?;
        return Ok(());
    }

    let mut table = Table::new(&[
        "ID", "Name", "Category", "Qty", "Unit", "Price", "Value", "Expiry", "Status",
    ])
    .align_right(&[0, 3, 5, 6]);

    for item in &items {
        table.push(vec![
            item.id.to_string(),
            render::truncate(&item.name, 32),
            item.category.clone(),
            item.quantity.to_string(),
            item.unit.clone(),
            shell.money(item.purchase_price),
            shell.money(item.stock_value()),
            render::date(item.expiry_date),
            status_label(item, today),
        ]);
    }

    writeln!(out, "{}", table.render())?;
    writeln!(out, "{} of {} items", items.len(), state.items.len())?;
    Ok(())
}

pub fn add<W: Write>(shell: &mut Shell, args: AddArgs, out: &mut W) -> CliResult<()> {
    let (guessed_category, guessed_unit) = categorize(&args.name);
    let new_item = NewItem {
        category: args.category.unwrap_or_else(|| guessed_category.to_string()),
        unit: args.unit.unwrap_or_else(|| guessed_unit.to_string()),
        quantity: args.quantity,
        purchase_price: args.price,
        purchase_date: args.purchased.unwrap_or_else(|| shell.session.today()),
        expiry_date: args.expiry,
        low_stock_threshold: args.threshold,
        name: args.name,
    };

    let outcome = shell.session.dispatch(Command::AddItem(new_item))?;
    if let Some(item) = outcome.created_id.and_then(|id| shell.session.state().item(id)) {
        info!(item_id = item.id, "Item added");
        writeln!(
            out,
            "Added {} (#{}) in {}: {} {}.",
            item.name, item.id, item.category, item.quantity, item.unit
        )?;
    }
    Ok(())
}

pub fn edit<W: Write>(shell: &mut Shell, args: EditArgs, out: &mut W) -> CliResult<()> {
    let id = args.id;
    let (changes, note) = args.apply_to(find_item(shell, id)?);

    let outcome = shell.session.dispatch(Command::EditItem { id, changes, note })?;
    let item = find_item(shell, id)?;
    write!(out, "Updated {}.", item.name)?;
    if outcome.logged.is_empty() {
        writeln!(out)?;
    } else {
        writeln!(out, " Quantity is now {} {}.", item.quantity, item.unit)?;
    }
    Ok(())
}

pub fn delete<W: Write>(shell: &mut Shell, id: u64, out: &mut W) -> CliResult<()> {
    let name = find_item(shell, id)?.name.clone();
    shell.session.dispatch(Command::DeleteItem { id })?;
    writeln!(out, "Deleted {}.", name)?;
    Ok(())
}

pub fn inwards<W: Write>(shell: &mut Shell, args: InwardsArgs, out: &mut W) -> CliResult<()> {
    let price = match args.price {
        Some(price) => price,
        None => find_item(shell, args.id)?.purchase_price,
    };

    shell.session.dispatch(Command::ReceiveStock {
        id: args.id,
        quantity: args.quantity,
        price,
        expiry_date: args.expiry,
    })?;

    let item = find_item(shell, args.id)?;
    writeln!(
        out,
        "Received {} {} of {}. Now {} {} at {}.",
        args.quantity,
        item.unit,
        item.name,
        item.quantity,
        item.unit,
        shell.money(item.purchase_price)
    )?;
    Ok(())
}

pub fn outwards<W: Write>(shell: &mut Shell, args: OutwardsArgs, out: &mut W) -> CliResult<()> {
    validate_issue(find_item(shell, args.id)?, args.quantity).map_err(CoreError::from)?;

    shell.session.dispatch(Command::IssueStock {
        id: args.id,
        quantity: args.quantity,
        notes: args.notes,
    })?;

    let item = find_item(shell, args.id)?;
    writeln!(
        out,
        "Issued {} {} of {}. {} {} left.",
        args.quantity, item.unit, item.name, item.quantity, item.unit
    )?;
    Ok(())
}

pub fn alerts<W: Write>(shell: &Shell, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let today = shell.session.today();

    writeln!(out, "Low Stock Alerts")?;
    let low = state.low_stock_items();
    if low.is_empty() {
        writeln!(out, "  No items are currently low on stock. Well done!")?;
    }
    for item in low {
        writeln!(
            out,
            "  {}: only {} {} left. Threshold is {}.",
            item.name, item.quantity, item.unit, item.low_stock_threshold
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Expiry Alerts")?;
    let mut dated: Vec<&InventoryItem> = state
        .items
        .iter()
        .filter(|i| {
            matches!(
                i.expiry_status(today),
                ExpiryStatus::Expired | ExpiryStatus::ExpiringSoon
            )
        })
        .collect();
    dated.sort_by_key(|i| i.expiry_date);

    if dated.is_empty() {
        writeln!(out, "  Nothing expires in the next week.")?;
    }
    for item in dated {
        writeln!(
            out,
            "  {}: {} on {}.",
            item.name,
            item.expiry_status(today),
            render::date(item.expiry_date)
        )?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
