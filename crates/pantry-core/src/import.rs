//! # Bulk Import
//!
//! Turns a spreadsheet export into new inventory items.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  file text ──► parse_sheet ──► ImportSheet { headers, rows }            │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                  ColumnMapping::auto(headers)  (+ per-field overrides)  │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │                 check_rows ──► Vec<RowResult>  (preview)                │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │           ImportReport { items, failed, errors: ["Row 3: ...", ...] }   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The format is plain comma-separated text: no quoting, every cell is
//! trimmed and short rows are allowed. Row numbers in messages are file line
//! numbers, with the header on row 1.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::NewItem;
use crate::validation::{parse_date, validate_new_item};

// =============================================================================
// Importable Fields
// =============================================================================

/// A target field of the import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ImportField {
    Name,
    Category,
    Quantity,
    Unit,
    PurchasePrice,
    LowStockThreshold,
    ExpiryDate,
}

impl ImportField {
    /// Column order of the template.
    pub const ALL: [ImportField; 7] = [
        ImportField::Name,
        ImportField::Category,
        ImportField::Quantity,
        ImportField::Unit,
        ImportField::PurchasePrice,
        ImportField::LowStockThreshold,
        ImportField::ExpiryDate,
    ];

    /// Column header in the template, also used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            ImportField::Name => "Item Name",
            ImportField::Category => "Category",
            ImportField::Quantity => "Quantity",
            ImportField::Unit => "Unit",
            ImportField::PurchasePrice => "Purchase Price",
            ImportField::LowStockThreshold => "Low Stock Threshold",
            ImportField::ExpiryDate => "Expiry Date (YYYY-MM-DD)",
        }
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, ImportField::ExpiryDate)
    }

    /// Sample value for the template's second line.
    pub fn example(&self) -> &'static str {
        match self {
            ImportField::Name => "Wheat Flour",
            ImportField::Category => "Grains & Flours",
            ImportField::Quantity => "50",
            ImportField::Unit => "kg",
            ImportField::PurchasePrice => "45.50",
            ImportField::LowStockThreshold => "10",
            ImportField::ExpiryDate => "2025-12-31",
        }
    }

    /// Finds a field by label, ignoring case, spaces and any `(...)` hint.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = match_key(label);
        Self::ALL.into_iter().find(|f| match_key(f.label()) == wanted)
    }
}

/// `"Expiry Date (YYYY-MM-DD)"` → `"expirydate"`
fn match_key(text: &str) -> String {
    let without_hint = match (text.find('('), text.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            format!("{}{}", &text[..open], &text[close + 1..])
        }
        _ => text.to_string(),
    };

    without_hint
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Sheet
// =============================================================================

/// Parsed import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based line number in the file.
    pub line: u64,
    pub cells: Vec<String>,
}

impl SheetRow {
    fn cell(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Splits import text into a header row and data rows.
///
/// Quotes are ordinary characters and blank lines are skipped.
pub fn parse_sheet(text: &str) -> CoreResult<ImportSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(sheet_error)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ValidationError::Required {
            field: "header row".to_string(),
        }
        .into());
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(sheet_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(SheetRow {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(ImportSheet { headers, rows })
}

fn sheet_error(err: csv::Error) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "import file".to_string(),
        reason: err.to_string(),
    }
}

// =============================================================================
// Column Mapping
// =============================================================================

/// Which sheet column feeds each field. Unmapped fields are not imported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: HashMap<ImportField, usize>,
}

impl ColumnMapping {
    /// Maps every field whose label matches a header.
    ///
    /// ```rust
    /// use pantry_core::import::{ColumnMapping, ImportField};
    ///
    /// let headers = vec!["itemname".to_string(), "Expiry Date".to_string()];
    /// let mapping = ColumnMapping::auto(&headers);
    /// assert_eq!(mapping.column(ImportField::Name), Some(0));
    /// assert_eq!(mapping.column(ImportField::ExpiryDate), Some(1));
    /// assert_eq!(mapping.column(ImportField::Unit), None);
    /// ```
    pub fn auto(headers: &[String]) -> Self {
        let keys: Vec<String> = headers.iter().map(|h| match_key(h)).collect();
        let columns = ImportField::ALL
            .into_iter()
            .filter_map(|field| {
                let wanted = match_key(field.label());
                keys.iter()
                    .position(|key| *key == wanted)
                    .map(|column| (field, column))
            })
            .collect();
        ColumnMapping { columns }
    }

    pub fn column(&self, field: ImportField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Points `field` at `column`, or stops importing it with `None`.
    pub fn set(&mut self, field: ImportField, column: Option<usize>) {
        match column {
            Some(column) => self.columns.insert(field, column),
            None => self.columns.remove(&field),
        };
    }

    /// Points `field` at the column with this exact header.
    pub fn set_by_header(
        &mut self,
        field: ImportField,
        header: &str,
        headers: &[String],
    ) -> Result<(), ValidationError> {
        let column = headers
            .iter()
            .position(|h| h == header.trim())
            .ok_or_else(|| ValidationError::NotAllowed {
                field: field.label().to_string(),
                allowed: headers.to_vec(),
            })?;
        self.set(field, Some(column));
        Ok(())
    }
}

// =============================================================================
// Row Validation
// =============================================================================

/// Outcome of one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult {
    pub line: u64,
    /// Present only when `errors` is empty.
    pub item: Option<NewItem>,
    pub errors: Vec<String>,
}

/// Validates every row against the mapping. Nothing is raised: problems are
/// collected as `Row N: ...` messages.
pub fn check_rows(sheet: &ImportSheet, mapping: &ColumnMapping, today: NaiveDate) -> Vec<RowResult> {
    sheet
        .rows
        .iter()
        .map(|row| check_row(row, mapping, today))
        .collect()
}

fn check_row(row: &SheetRow, mapping: &ColumnMapping, today: NaiveDate) -> RowResult {
    let mut errors = Vec::new();
    let line = row.line;

    let value = |field: ImportField| {
        mapping
            .column(field)
            .and_then(|column| row.cell(column))
            .filter(|v| !v.is_empty())
    };

    for field in ImportField::ALL {
        if field.is_required() && value(field).is_none() {
            errors.push(format!(
                "Row {}: Missing required field '{}'.",
                line,
                field.label()
            ));
        }
    }

    let mut number = |field: ImportField| -> Option<Quantity> {
        let text = value(field)?;
        match text.parse::<Quantity>() {
            Ok(q) if q.is_negative() => {
                errors.push(format!("Row {}: '{}' cannot be negative.", line, field.label()));
                None
            }
            Ok(q) => Some(q),
            Err(_) => {
                errors.push(format!(
                    "Row {}: Invalid number for '{}': \"{}\".",
                    line,
                    field.label(),
                    text
                ));
                None
            }
        }
    };

    let quantity = number(ImportField::Quantity);
    let threshold = number(ImportField::LowStockThreshold);
    let price = value(ImportField::PurchasePrice).and_then(|text| match text.parse::<Money>() {
        Ok(m) if m.is_negative() => {
            errors.push(format!(
                "Row {}: '{}' cannot be negative.",
                line,
                ImportField::PurchasePrice.label()
            ));
            None
        }
        Ok(m) => Some(m),
        Err(_) => {
            errors.push(format!(
                "Row {}: Invalid number for '{}': \"{}\".",
                line,
                ImportField::PurchasePrice.label(),
                text
            ));
            None
        }
    });

    let expiry = match value(ImportField::ExpiryDate) {
        None => None,
        Some(text) => match parse_date(ImportField::ExpiryDate.label(), text) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(format!(
                    "Row {}: Invalid date format for Expiry Date. Use YYYY-MM-DD.",
                    line
                ));
                None
            }
        },
    };

    let item = match (
        errors.is_empty(),
        value(ImportField::Name),
        value(ImportField::Category),
        value(ImportField::Unit),
        quantity,
        price,
        threshold,
    ) {
        (true, Some(name), Some(category), Some(unit), Some(quantity), Some(price), Some(threshold)) => {
            Some(NewItem {
                name: name.to_string(),
                category: category.to_string(),
                quantity,
                unit: unit.to_string(),
                purchase_price: price,
                purchase_date: today,
                expiry_date: expiry,
                low_stock_threshold: threshold,
            })
        }
        _ => None,
    };

    // Same rules as the item form
    let item = item.and_then(|item| match validate_new_item(&item) {
        Ok(()) => Some(item),
        Err(err) => {
            errors.push(format!("Row {}: {}.", line, err));
            None
        }
    });

    RowResult { line, item, errors }
}

// =============================================================================
// Report
// =============================================================================

/// Result summary shown after an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Valid rows, in file order.
    pub items: Vec<NewItem>,
    /// Number of rows with at least one problem.
    pub failed: usize,
    /// Every problem of every failed row.
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn from_rows(rows: Vec<RowResult>) -> Self {
        let mut report = ImportReport::default();
        for row in rows {
            match row.item {
                Some(item) if row.errors.is_empty() => report.items.push(item),
                _ => {
                    report.failed += 1;
                    report.errors.extend(row.errors);
                }
            }
        }
        report
    }

    pub fn success_count(&self) -> usize {
        self.items.len()
    }
}

/// Parses, maps and validates in one go.
pub fn import_items(sheet: &ImportSheet, mapping: &ColumnMapping, today: NaiveDate) -> ImportReport {
    ImportReport::from_rows(check_rows(sheet, mapping, today))
}

// =============================================================================
// Template
// =============================================================================

/// The downloadable template: labels, then one example row.
///
/// ```rust
/// let template = pantry_core::import::template();
/// assert_eq!(template.lines().count(), 2);
/// assert!(template.starts_with("Item Name,Category,"));
/// ```
pub fn template() -> String {
    let labels: Vec<&str> = ImportField::ALL.iter().map(|f| f.label()).collect();
    let examples: Vec<&str> = ImportField::ALL.iter().map(|f| f.example()).collect();
    format!("{}\n{}", labels.join(","), examples.join(","))
}

// =============================================================================
// Unit Tests
// =============================================================================
