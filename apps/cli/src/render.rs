//! # Text Rendering
//!
//! Plain-text tables and value formatting for the terminal views.
//!
//! ```text
//! ID  Name     Qty  Unit
//! --  -------  ---  ----
//! 12  Rice      40  kg
//! ```

use chrono::NaiveDate;
use pantry_core::{Money, Quantity, DATE_FORMAT};

/// Column-aligned table. Widths are measured in characters.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    right_aligned: Vec<bool>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            right_aligned: vec![false; headers.len()],
            rows: Vec::new(),
        }
    }

    /// Right-aligns the given columns (numbers).
    pub fn align_right(mut self, columns: &[usize]) -> Self {
        for &column in columns {
            if let Some(flag) = self.right_aligned.get_mut(column) {
                *flag = true;
            }
        }
        self
    }

    pub fn push(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|column| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .chain(std::iter::once(&self.headers[column]))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = vec![self.line(&self.headers, &widths), self.line(&separator, &widths)];
        lines.extend(self.rows.iter().map(|row| self.line(row, &widths)));
        lines.join("\n")
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        widths
            .iter()
            .enumerate()
            .map(|(column, &width)| {
                let cell = cells.get(column).map(String::as_str).unwrap_or("");
                if self.right_aligned[column] {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }
}

// =============================================================================
// Value Formatting
// =============================================================================

/// `₹1,250.00` style without grouping: `₹1250.00`, `-₹5.00`.
pub fn money(symbol: &str, amount: Money) -> String {
    if amount.is_negative() {
        format!("-{}{}", symbol, Money::from_cents(-amount.cents()))
    } else {
        format!("{}{}", symbol, amount)
    }
}

pub fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Quantity change with an explicit sign: `+20`, `-1.5`.
pub fn signed(change: Quantity) -> String {
    if change.is_positive() {
        format!("+{}", change)
    } else {
        change.to_string()
    }
}

/// `name` cut to `max` characters with a trailing `…`.
pub fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let kept: String = name.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_alignment() {
        let mut table = Table::new(&["Name", "Qty"]).align_right(&[1]);
        table.push(vec!["Rice".to_string(), "40".to_string()]);
        table.push(vec!["Turmeric".to_string(), "0.5".to_string()]);

        assert_eq!(
            table.render(),
            "Name      Qty\n--------  ---\nRice       40\nTurmeric  0.5"
        );
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money("₹", Money::from_cents(125_050)), "₹1250.50");
        assert_eq!(money("$", Money::from_cents(-500)), "-$5.00");
    }

    #[test]
    fn test_value_helpers() {
        assert_eq!(date(None), "N/A");
        assert_eq!(date(NaiveDate::from_ymd_opt(2024, 3, 9)), "2024-03-09");
        assert_eq!(signed(Quantity::from_units(20)), "+20");
        assert_eq!(signed(Quantity::from_milli(-1_500)), "-1.5");
        assert_eq!(truncate("Kashmiri Red Chilli Powder", 10), "Kashmiri …");
        assert_eq!(truncate("Rice", 10), "Rice");
    }
}
