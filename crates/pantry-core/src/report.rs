//! # Reports
//!
//! Read-only views over the store: the dashboard cards, the category value
//! breakdown, and the forecast prompt/response formatting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{clamp_to_i64, div_round_half_away, Money};
use crate::quantity::Quantity;
use crate::types::{ExpiryStatus, InventoryItem};
use crate::{DASHBOARD_CHART_ITEMS, DATE_FORMAT};

// =============================================================================
// Dashboard
// =============================================================================

/// One bar pair of the "Stock Levels Overview" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChartRow {
    pub name: String,
    pub quantity: Quantity,
    pub low_stock_threshold: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_value: Money,
    pub product_types: usize,
    pub low_stock_count: usize,
    /// Not yet expired, expiring within the week.
    pub expiring_soon_count: usize,
    /// First items in inventory order.
    pub chart: Vec<ChartRow>,
}

impl DashboardSummary {
    pub fn build(items: &[InventoryItem], today: NaiveDate) -> Self {
        DashboardSummary {
            total_value: total_value(items.iter()),
            product_types: items.len(),
            low_stock_count: items.iter().filter(|i| i.is_low_stock()).count(),
            expiring_soon_count: items
                .iter()
                .filter(|i| i.expiry_status(today) == ExpiryStatus::ExpiringSoon)
                .count(),
            chart: items
                .iter()
                .take(DASHBOARD_CHART_ITEMS)
                .map(|i| ChartRow {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    low_stock_threshold: i.low_stock_threshold,
                })
                .collect(),
        }
    }
}

/// Σ quantity × price, rounded once at the end.
pub fn total_value<'a>(items: impl Iterator<Item = &'a InventoryItem>) -> Money {
    let raw = items
        .map(|i| i.purchase_price.cents() as i128 * i.quantity.milli() as i128)
        .fold(0_i128, i128::saturating_add);
    Money::from_cents(clamp_to_i64(div_round_half_away(raw, Quantity::SCALE as i128)))
}

// =============================================================================
// Category Distribution
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValue {
    pub category: String,
    pub value: Money,
}

/// Stock value per category, in order of first appearance.
pub fn category_distribution(items: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut categories: Vec<&str> = Vec::new();
    for item in items {
        if !categories.contains(&item.category.as_str()) {
            categories.push(&item.category);
        }
    }

    categories
        .into_iter()
        .map(|category| CategoryValue {
            category: category.to_string(),
            value: total_value(items.iter().filter(|i| i.category == category)),
        })
        .collect()
}

// =============================================================================
// Forecast Prompt
// =============================================================================

/// The analyst prompt sent to the text-generation service.
pub fn forecast_prompt(items: &[InventoryItem], today: NaiveDate) -> String {
    let lines: Vec<String> = items
        .iter()
        .map(|i| {
            format!(
                "- {} ({}): {} {} (Low stock alert at {} {})",
                i.name, i.category, i.quantity, i.unit, i.low_stock_threshold, i.unit
            )
        })
        .collect();

    format!(
        "You are an expert inventory management analyst for a restaurant.\n\
         Analyze the following inventory data and provide a demand forecast and reordering recommendations.\n\
         The data includes item name, category, current quantity, unit, and low stock threshold.\n\
         Focus on items that are low in stock or have high potential for spoilage.\n\
         Provide actionable insights in a concise, bulleted list format.\n\
         \n\
         Current Date: {}\n\
         \n\
         Inventory Data:\n\
         {}\n\
         \n\
         Please provide your analysis.",
        today.format(DATE_FORMAT),
        lines.join("\n")
    )
}

/// A line of forecast text as it will be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastLine {
    Bullet(String),
    Text(String),
}

/// Lines starting with `* ` or `- ` become bullets (marker stripped),
/// everything else is plain text.
pub fn parse_forecast(text: &str) -> Vec<ForecastLine> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            match trimmed
                .strip_prefix("* ")
                .or_else(|| trimmed.strip_prefix("- "))
            {
                Some(rest) => ForecastLine::Bullet(rest.to_string()),
                None => ForecastLine::Text(line.to_string()),
            }
        })
        .collect()
}

/// Renders forecast text for a terminal: bullets indented with `•`.
pub fn render_forecast(text: &str) -> String {
    parse_forecast(text)
        .into_iter()
        .map(|line| match line {
            ForecastLine::Bullet(rest) => format!("  • {}", rest),
            ForecastLine::Text(plain) => plain,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================
