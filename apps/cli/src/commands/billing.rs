//! # Billing Commands
//!
//! The counter view: items in FIFO-by-expiry order, one unit per `bill`.

use std::io::Write;

use pantry_core::billing::billing_list;
use pantry_core::state::Command;
use pantry_core::CoreError;

use super::Shell;
use crate::error::CliResult;
use crate::render::{self, Table};

pub fn list<W: Write>(shell: &Shell, search: Option<&str>, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let today = shell.session.today();
    let entries = billing_list(&state.items, search.unwrap_or(""), today);

    if entries.is_empty() {
        writeln!(out, "No items to bill.")?;
        return Ok(());
    }

    let mut table = Table::new(&["ID", "Name", "In Stock", "Expiry", "", "Billable"]).align_right(&[0, 2]);
    for entry in &entries {
        let item = entry.item;
        table.push(vec![
            item.id.to_string(),
            render::truncate(&item.name, 32),
            format!("{} {}", item.quantity, item.unit),
            render::date(item.expiry_date),
            entry.badge.map(|b| b.label().to_string()).unwrap_or_default(),
            if entry.is_billable() { "yes" } else { "no" }.to_string(),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

pub fn bill<W: Write>(shell: &mut Shell, id: u64, out: &mut W) -> CliResult<()> {
    shell.session.dispatch(Command::Bill { id })?;

    let item = shell
        .session
        .state()
        .item(id)
        .ok_or(CoreError::ItemNotFound(id))?;
    writeln!(
        out,
        "Billed 1 {} of {}. {} {} left.",
        item.unit, item.name, item.quantity, item.unit
    )?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
