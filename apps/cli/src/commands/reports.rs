//! # Report Commands
//!
//! Dashboard cards, transaction history, category value report and the
//! AI forecast.

use chrono::NaiveDate;
use clap::Args;
use std::io::Write;
use tracing::info;

use pantry_core::filter::HistoryFilter;
use pantry_core::report::{category_distribution, render_forecast, total_value, DashboardSummary};
use pantry_core::{Quantity, TransactionKind, DATE_FORMAT};

use super::{date_arg, Shell};
use crate::error::CliResult;
use crate::render::{self, Table};

/// Width of the longest bar in the text charts.
const BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, Default, Args)]
pub struct HistoryArgs {
    /// Item name contains (case-insensitive)
    #[arg(long)]
    pub item: Option<String>,
    /// create, delete, edit, inwards, outwards or billing
    #[arg(long = "type")]
    pub kind: Option<TransactionKind>,
    /// On or after (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub from: Option<NaiveDate>,
    /// On or before (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub to: Option<NaiveDate>,
    #[arg(long, allow_hyphen_values = true)]
    pub min_change: Option<Quantity>,
    #[arg(long, allow_hyphen_values = true)]
    pub max_change: Option<Quantity>,
    /// Show at most this many rows
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl HistoryArgs {
    pub fn filter(&self) -> HistoryFilter {
        HistoryFilter {
            item_name: self.item.clone(),
            kind: self.kind,
            from: self.from,
            to: self.to,
            min_change: self.min_change,
            max_change: self.max_change,
        }
    }
}

/// `█` bar scaled against `max`.
fn bar(value: i64, max: i64) -> String {
    if max <= 0 || value <= 0 {
        return String::new();
    }
    let len = ((value as i128 * BAR_WIDTH as i128) / max as i128).max(1) as usize;
    "█".repeat(len)
}

pub fn dashboard<W: Write>(shell: &Shell, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let summary = DashboardSummary::build(&state.items, shell.session.today());

    writeln!(out, "{} Dashboard", shell.store.name)?;
    writeln!(out, "  Total Stock Value   {}", shell.money(summary.total_value))?;
    writeln!(out, "  Product Types       {}", summary.product_types)?;
    writeln!(out, "  Low Stock Alerts    {}", summary.low_stock_count)?;
    writeln!(out, "  Expiring Soon       {}", summary.expiring_soon_count)?;

    if summary.chart.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Stock Levels Overview (quantity | threshold)")?;
    let max = summary
        .chart
        .iter()
        .map(|row| row.quantity.milli().max(row.low_stock_threshold.milli()))
        .max()
        .unwrap_or(0);
    let mut table = Table::new(&["Item", "Quantity", "", "Threshold"]).align_right(&[1]);
    for row in &summary.chart {
        table.push(vec![
            render::truncate(&row.name, 20),
            row.quantity.to_string(),
            bar(row.quantity.milli(), max),
            row.low_stock_threshold.to_string(),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

pub fn history<W: Write>(shell: &Shell, args: &HistoryArgs, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let rows = args.filter().apply(&state.transactions, shell.session.clock());

    if rows.is_empty() {
        writeln!(out, "No transactions match the current filters.")?;
        return Ok(());
    }

    let shown = args.limit.unwrap_or(rows.len()).min(rows.len());
    let mut table = Table::new(&["When", "Item", "Type", "Change", "Before", "After", "Notes"])
        .align_right(&[3, 4, 5]);
    for txn in rows.iter().take(shown) {
        table.push(vec![
            txn.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            render::truncate(&txn.item_name, 28),
            txn.kind.to_string(),
            render::signed(txn.quantity_change),
            txn.quantity_before.to_string(),
            txn.quantity_after.to_string(),
            txn.notes.clone().unwrap_or_default(),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    if shown < rows.len() {
        writeln!(out, "Showing {} of {} transactions", shown, rows.len())?;
    }
    Ok(())
}

pub fn report<W: Write>(shell: &Shell, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    let distribution = category_distribution(&state.items);

    if distribution.is_empty() {
        writeln!(out, "No inventory to report on.")?;
        return Ok(());
    }

    writeln!(out, "Inventory Value by Category")?;
    let max = distribution.iter().map(|c| c.value.cents()).max().unwrap_or(0);
    let mut table = Table::new(&["Category", "Value", ""]).align_right(&[1]);
    for category in &distribution {
        table.push(vec![
            category.category.clone(),
            shell.money(category.value),
            bar(category.value.cents(), max),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    writeln!(out, "Total {}", shell.money(total_value(state.items.iter())))?;
    Ok(())
}

pub async fn forecast<W: Write>(shell: &Shell, out: &mut W) -> CliResult<()> {
    let today = shell.session.today();
    info!(
        items = shell.session.state().items.len(),
        date = %today.format(DATE_FORMAT),
        "Requesting demand forecast"
    );

    let text = shell.forecast.forecast(&shell.session.state().items, today).await;
    writeln!(out, "AI Demand Forecast")?;
    writeln!(out, "{}", render_forecast(&text))?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{run_lines, shell};
    use async_trait::async_trait;
    use pantry_forecast::{ForecastResult, ForecastService, Forecaster, DISABLED_MESSAGE};
    use std::sync::Arc;

    struct CannedForecaster;

    #[async_trait]
    impl Forecaster for CannedForecaster {
        async fn generate(&self, prompt: &str) -> ForecastResult<String> {
            assert!(prompt.contains("Current Date: 2024-03-10"));
            Ok("Summary\n* Reorder paneer\n- Use curd first".to_string())
        }
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(1, 1_000).chars().count(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_cards() {
        let mut shell = shell();
        run_lines(
            &mut shell,
            &[
                "add Rice --category 'Grains & Flours' --unit kg -q 40 -p 120 -t 10",
                "add Paneer --category Dairy --unit kg -q 3 -p 320 -t 5 --expiry 2024-03-12",
            ],
        )
        .await;

        let output = run_lines(&mut shell, &["dashboard"]).await;
        assert!(output.contains("Total Stock Value   ₹5760.00"), "{}", output);
        assert!(output.contains("Product Types       2"));
        assert!(output.contains("Low Stock Alerts    1"));
        assert!(output.contains("Expiring Soon       1"));
        assert!(output.contains("Stock Levels Overview"));
    }

    #[tokio::test]
    async fn test_history_filters_and_limits() {
        let mut shell = shell();
        run_lines(&mut shell, &["add Samosa --category 'Ready Mixes & Snacks' --unit units -q 5 -p 15"]).await;
        let id = shell.session.state().items[0].id;
        run_lines(&mut shell, &[&format!("bill {}", id), &format!("bill {}", id)]).await;

        let output = run_lines(&mut shell, &["history --type billing"]).await;
        assert_eq!(output.matches("billing").count(), 2, "{}", output);

        let output = run_lines(&mut shell, &["history -n 1"]).await;
        assert!(output.contains("Showing 1 of 3 transactions"), "{}", output);

        let output = run_lines(&mut shell, &["history --min-change -1 --max-change -1"]).await;
        assert!(!output.contains("create"), "{}", output);
        assert_eq!(output.matches("billing").count(), 2);
    }

    #[tokio::test]
    async fn test_report_by_category() {
        let mut shell = shell();
        run_lines(
            &mut shell,
            &[
                "add Milk --category Dairy --unit liters -q 2 -p 30",
                "add Rice --category 'Grains & Flours' --unit kg -q 10 -p 100",
                "add Curd --category Dairy --unit kg -q 1.5 -p 60",
            ],
        )
        .await;

        let output = run_lines(&mut shell, &["report"]).await;
        let dairy = output.find("Dairy").unwrap();
        let grains = output.find("Grains").unwrap();
        assert!(dairy < grains);
        assert!(output.contains("₹150.00"));
        assert!(output.contains("Total ₹1150.00"));
    }

    #[tokio::test]
    async fn test_forecast_disabled_without_key() {
        let output = run_lines(&mut shell(), &["forecast"]).await;
        assert!(output.contains(DISABLED_MESSAGE));
    }

    #[tokio::test]
    async fn test_forecast_renders_bullets() {
        let mut shell = shell();
        shell.forecast = ForecastService::new(Arc::new(CannedForecaster));

        let output = run_lines(&mut shell, &["forecast"]).await;
        assert!(output.contains("Summary\n  • Reorder paneer\n  • Use curd first"), "{}", output);
    }
}
