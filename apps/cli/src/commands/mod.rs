//! # Session Commands
//!
//! One line of input is one command, parsed with the same `clap` machinery
//! as the top-level binary.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (grammar, Shell, dispatch)
//! ├── inventory.rs  ◄─── list, add, edit, delete, inwards, outwards, alerts
//! ├── billing.rs    ◄─── billing list, bill
//! ├── suppliers.rs  ◄─── suppliers, supplier-add/edit/delete
//! ├── orders.rs     ◄─── orders, order-create, order-status
//! ├── reports.rs    ◄─── dashboard, history, report, forecast
//! └── transfer.rs   ◄─── import, template
//! ```
//!
//! ## Line Flow
//! ```text
//! "inwards 12 --quantity 10 --price \"45.50\""
//!        │
//!        ▼  split_line (quote aware)
//! ["inwards", "12", "--quantity", "10", "--price", "45.50"]
//!        │
//!        ▼  SessionLine::try_parse_from
//! SessionCommand::Inwards(InwardsArgs { .. })
//!        │
//!        ▼  Shell::execute ──► handler ──► Session::dispatch
//! "Received 10 kg of Rice. Now 20 kg at ₹150.00."
//! ```

pub mod billing;
pub mod inventory;
pub mod orders;
pub mod reports;
pub mod suppliers;
pub mod transfer;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use pantry_core::validation::parse_date;
use pantry_core::{Money, OrderStatus};
use pantry_forecast::ForecastService;

use crate::config::StoreConfig;
use crate::error::{CliError, CliResult};
use crate::render;
use crate::state::Session;

// =============================================================================
// Grammar
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "pantry>",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Commands available in a pantry session"
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Stock value, alert counts and the stock-level chart
    Dashboard,

    /// List inventory items, optionally filtered
    List(inventory::ListArgs),

    /// Add a new item
    Add(inventory::AddArgs),

    /// Edit an item (only the given fields change)
    Edit(inventory::EditArgs),

    /// Delete an item
    Delete { id: u64 },

    /// Receive stock for an item
    Inwards(inventory::InwardsArgs),

    /// Use stock in the kitchen
    Outwards(inventory::OutwardsArgs),

    /// Items in FIFO-by-expiry order for billing
    Billing {
        /// Only items whose name contains this text
        #[arg(long, short)]
        search: Option<String>,
    },

    /// Sell one unit of an item
    Bill { id: u64 },

    /// Low stock and expiry alerts
    Alerts,

    /// Transaction history, newest first
    History(reports::HistoryArgs),

    /// Stock value by category
    Report,

    /// AI demand forecast for the current inventory
    Forecast,

    /// Bulk import items from a CSV file
    Import(transfer::ImportArgs),

    /// Print or save the import template
    Template {
        /// Write to this file instead of printing
        path: Option<PathBuf>,
    },

    /// List suppliers
    Suppliers,

    /// Add a supplier
    SupplierAdd(suppliers::SupplierArgs),

    /// Edit a supplier (only the given fields change)
    SupplierEdit(suppliers::SupplierEditArgs),

    /// Delete a supplier without open orders
    SupplierDelete { id: u64 },

    /// List purchase orders
    Orders {
        /// Only orders with this status
        #[arg(long)]
        status: Option<OrderStatus>,
    },

    /// Create a purchase order
    OrderCreate(orders::OrderCreateArgs),

    /// Move a purchase order to a new status
    OrderStatus {
        id: u64,
        /// pending, shipped, delivered or cancelled
        status: OrderStatus,
    },

    /// End the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session keeps reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// =============================================================================
// Shell
// =============================================================================

/// Everything a command handler can reach.
pub struct Shell {
    pub session: Session,
    pub forecast: ForecastService,
    pub store: StoreConfig,
}

impl Shell {
    pub fn new(session: Session, forecast: ForecastService, store: StoreConfig) -> Self {
        Shell {
            session,
            forecast,
            store,
        }
    }

    /// Formats `amount` with the configured currency symbol.
    pub fn money(&self, amount: Money) -> String {
        render::money(&self.store.currency_symbol, amount)
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, interactive: bool) -> CliResult<()> {
        if interactive {
            writeln!(out, "{}: type 'help' for the list of commands.", self.store.name)?;
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(out, "pantry> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else { break };
            if self.execute_line(&line?, out).await? == Flow::Quit {
                break;
            }
        }

        info!("Session ended");
        Ok(())
    }

    /// Parses and runs one line. Mistakes are printed, not returned.
    pub async fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> CliResult<Flow> {
        let args = match split_line(line) {
            Ok(args) if args.is_empty() => return Ok(Flow::Continue),
            Ok(args) => args,
            Err(err) => {
                writeln!(out, "Error: {}", err)?;
                return Ok(Flow::Continue);
            }
        };

        let parsed = match SessionLine::try_parse_from(&args) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Also covers `help` and `--help`
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        debug!(command = %args[0], "Session command");
        match self.execute(parsed.command, out).await {
            Ok(flow) => Ok(flow),
            Err(err) if err.is_recoverable() => {
                writeln!(out, "Error: {}", err)?;
                Ok(Flow::Continue)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> CliResult<Flow> {
        match command {
            SessionCommand::Dashboard => reports::dashboard(self, out)?,
            SessionCommand::List(args) => inventory::list(self, &args, out)?,
            SessionCommand::Add(args) => inventory::add(self, args, out)?,
            SessionCommand::Edit(args) => inventory::edit(self, args, out)?,
            SessionCommand::Delete { id } => inventory::delete(self, id, out)?,
            SessionCommand::Inwards(args) => inventory::inwards(self, args, out)?,
            SessionCommand::Outwards(args) => inventory::outwards(self, args, out)?,
            SessionCommand::Alerts => inventory::alerts(self, out)?,
            SessionCommand::Billing { search } => billing::list(self, search.as_deref(), out)?,
            SessionCommand::Bill { id } => billing::bill(self, id, out)?,
            SessionCommand::History(args) => reports::history(self, &args, out)?,
            SessionCommand::Report => reports::report(self, out)?,
            SessionCommand::Forecast => reports::forecast(self, out).await?,
            SessionCommand::Import(args) => transfer::import(self, &args, out)?,
            SessionCommand::Template { path } => transfer::template(path.as_deref(), out)?,
            SessionCommand::Suppliers => suppliers::list(self, out)?,
            SessionCommand::SupplierAdd(args) => suppliers::add(self, args, out)?,
            SessionCommand::SupplierEdit(args) => suppliers::edit(self, args, out)?,
            SessionCommand::SupplierDelete { id } => suppliers::delete(self, id, out)?,
            SessionCommand::Orders { status } => orders::list(self, status, out)?,
            SessionCommand::OrderCreate(args) => orders::create(self, args, out)?,
            SessionCommand::OrderStatus { id, status } => orders::set_status(self, id, status, out)?,
            SessionCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

// =============================================================================
// Line Splitting
// =============================================================================

/// Splits on whitespace; single or double quotes group words.
///
/// `add "Basmati Rice" -q 10` → `["add", "Basmati Rice", "-q", "10"]`
pub fn split_line(line: &str) -> Result<Vec<String>, CliError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    args.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err(CliError::Usage("Unterminated quote".to_string()));
    }
    if in_token {
        args.push(current);
    }
    Ok(args)
}

// =============================================================================
// Shared Argument Parsers
// =============================================================================

/// Strict `YYYY-MM-DD` for date options.
pub(crate) fn date_arg(text: &str) -> Result<NaiveDate, String> {
    parse_date("date", text).map_err(|e| e.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pantry_core::ids::{FixedClock, SequentialIds};

    pub(crate) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    pub(crate) fn shell() -> Shell {
        let session = Session::new(Box::new(SequentialIds::new()), Box::new(FixedClock::on(today())));
        Shell::new(session, ForecastService::disabled(), StoreConfig::default())
    }

    /// Runs `lines` and returns everything printed.
    pub(crate) async fn run_lines(shell: &mut Shell, lines: &[&str]) -> String {
        let mut out = Vec::new();
        for line in lines {
            shell.execute_line(line, &mut out).await.unwrap();
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_split_line_quotes() {
        assert_eq!(
            split_line(r#"add "Basmati Rice" --category 'Grains & Flours' -q 10"#).unwrap(),
            vec!["add", "Basmati Rice", "--category", "Grains & Flours", "-q", "10"]
        );
        assert_eq!(split_line("  list   ").unwrap(), vec!["list"]);
        assert_eq!(split_line(r#"edit 1 --note """#).unwrap(), vec!["edit", "1", "--note", ""]);
        assert!(split_line("   ").unwrap().is_empty());
        assert!(split_line(r#"add "Rice"#).is_err());
    }

    #[test]
    fn test_grammar_parses_every_command_name() {
        for line in [
            "dashboard",
            "list --status low-stock",
            "billing --search rice",
            "history --type billing",
            "order-status 4 delivered",
            "orders --status Shipped",
            "supplier-delete 3",
            "template",
            "exit",
        ] {
            let args = split_line(line).unwrap();
            assert!(SessionLine::try_parse_from(&args).is_ok(), "{}", line);
        }
    }

    #[test]
    fn test_date_arg_is_strict() {
        assert!(date_arg("2024-03-10").is_ok());
        assert!(date_arg("2024-3-10").is_err());
    }

    #[tokio::test]
    async fn test_unknown_command_prints_usage_and_continues() {
        let mut shell = shell();
        let mut out = Vec::new();
        let flow = shell.execute_line("frobnicate", &mut out).await.unwrap();

        assert_eq!(flow, Flow::Continue);
        assert!(String::from_utf8(out).unwrap().contains("frobnicate"));
    }

    #[tokio::test]
    async fn test_help_lists_commands() {
        let output = run_lines(&mut shell(), &["help"]).await;
        assert!(output.contains("order-status"));
        assert!(output.contains("supplier-add"));
    }

    #[tokio::test]
    async fn test_core_errors_are_printed_inline() {
        let output = run_lines(&mut shell(), &["bill 42"]).await;
        assert!(output.starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let mut shell = shell();
        let input = std::io::Cursor::new("dashboard\nquit\nlist\n");
        let mut out = Vec::new();
        shell.run(input, &mut out, false).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Total Stock Value"));
        assert!(!output.contains("No items match"));
    }
}
