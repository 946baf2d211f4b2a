//! # Import Commands
//!
//! ```text
//! import stock.csv --map "Item Name=Product" --map "Expiry Date=Best Before"
//!     │
//!     ├─► parse_sheet        header row + data rows
//!     ├─► ColumnMapping      auto by header, then --map overrides
//!     ├─► import_items       every row checked, problems collected
//!     └─► Command::ImportItems (valid rows only, one state change)
//! ```

use clap::Args;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use pantry_core::import::{import_items, parse_sheet, template as import_template, ColumnMapping, ImportField};
use pantry_core::state::Command;
use pantry_core::CoreError;

use super::Shell;
use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// CSV file with a header row
    pub path: PathBuf,
    /// FIELD=HEADER, repeatable. Overrides the automatic header match.
    #[arg(long = "map")]
    pub maps: Vec<String>,
}

/// `"Item Name=Product"` → `(ImportField::Name, "Product")`
fn mapping_arg(text: &str) -> CliResult<(ImportField, &str)> {
    let (field, header) = text
        .split_once('=')
        .ok_or_else(|| CliError::Usage(format!("expected FIELD=HEADER, got '{}'", text)))?;
    let field = ImportField::from_label(field)
        .ok_or_else(|| CliError::Usage(format!("unknown import field '{}'", field.trim())))?;
    Ok((field, header))
}

pub fn import<W: Write>(shell: &mut Shell, args: &ImportArgs, out: &mut W) -> CliResult<()> {
    let text = fs::read_to_string(&args.path).map_err(|e| CliError::io(&args.path, e))?;
    let sheet = parse_sheet(&text)?;

    let mut mapping = ColumnMapping::auto(&sheet.headers);
    for map in &args.maps {
        let (field, header) = mapping_arg(map)?;
        mapping
            .set_by_header(field, header, &sheet.headers)
            .map_err(CoreError::from)?;
    }

    let missing: Vec<&str> = ImportField::ALL
        .iter()
        .filter(|f| f.is_required() && mapping.column(**f).is_none())
        .map(|f| f.label())
        .collect();
    if !missing.is_empty() {
        writeln!(out, "Unmapped required fields: {}", missing.join(", "))?;
    }

    let report = import_items(&sheet, &mapping, shell.session.today());
    let imported = report.success_count();
    if imported > 0 {
        shell.session.dispatch(Command::ImportItems(report.items.clone()))?;
    }

    info!(
        path = %args.path.display(),
        imported,
        failed = report.failed,
        "Import finished"
    );
    if report.failed > 0 {
        warn!(failed = report.failed, "Some import rows were rejected");
    }

    writeln!(out, "Imported {} item(s), {} row(s) failed.", imported, report.failed)?;
    for error in &report.errors {
        writeln!(out, "  {}", error)?;
    }
    Ok(())
}

pub fn template<W: Write>(path: Option<&Path>, out: &mut W) -> CliResult<()> {
    let text = import_template();
    match path {
        Some(path) => {
            fs::write(path, format!("{}\n", text)).map_err(|e| CliError::io(path, e))?;
            writeln!(out, "Template written to {}.", path.display())?;
        }
        None => writeln!(out, "{}", text)?,
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{run_lines, shell};
    use pantry_core::TransactionKind;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("pantry-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_mapping_arg() {
        let (field, header) = mapping_arg("Expiry Date=Best Before").unwrap();
        assert_eq!(field, ImportField::ExpiryDate);
        assert_eq!(header, "Best Before");

        assert!(matches!(mapping_arg("Item Name"), Err(CliError::Usage(_))));
        assert!(matches!(mapping_arg("Colour=Red"), Err(CliError::Usage(_))));
    }

    #[tokio::test]
    async fn test_import_keeps_valid_rows() {
        let path = temp_file(
            "valid.csv",
            "Item Name,Category,Quantity,Unit,Purchase Price,Low Stock Threshold,Expiry Date\n\
             Wheat Flour,Grains & Flours,50,kg,45.50,10,2024-12-31\n\
             ,Dairy,2,liters,30,1,\n\
             Ghee,Dairy,5,kg,550,1,\n",
        );

        let mut shell = shell();
        let output = run_lines(&mut shell, &[&format!("import {}", path.display())]).await;
        fs::remove_file(&path).ok();

        assert!(output.contains("Imported 2 item(s), 1 row(s) failed."), "{}", output);
        assert!(output.contains("Row 3"), "{}", output);

        let state = shell.session.state();
        assert_eq!(state.items.len(), 2);
        assert!(state.history().iter().all(|t| t.kind == TransactionKind::Create));
    }

    #[tokio::test]
    async fn test_import_with_manual_mapping() {
        let path = temp_file(
            "mapped.csv",
            "Product,Category,Quantity,Unit,Purchase Price,Low Stock Threshold\n\
             Basmati Rice,Grains & Flours,20,kg,110,5\n",
        );

        let mut shell = shell();
        let line = format!(r#"import {} --map "Item Name=Product""#, path.display());
        let output = run_lines(&mut shell, &[&line]).await;
        fs::remove_file(&path).ok();

        assert!(output.contains("Imported 1 item(s), 0 row(s) failed."), "{}", output);
        assert_eq!(shell.session.state().items[0].name, "Basmati Rice");
    }

    #[tokio::test]
    async fn test_import_skips_row_with_overlong_name() {
        let path = temp_file(
            "long-name.csv",
            &format!(
                "Item Name,Category,Quantity,Unit,Purchase Price,Low Stock Threshold\n\
                 Wheat Flour,Grains & Flours,50,kg,45.50,10\n\
                 {},Spices,1,kg,30,1\n",
                "x".repeat(201)
            ),
        );

        let mut shell = shell();
        let output = run_lines(&mut shell, &[&format!("import {}", path.display())]).await;
        fs::remove_file(&path).ok();

        assert!(output.contains("Imported 1 item(s), 1 row(s) failed."), "{}", output);
        assert!(output.contains("Row 3: name must be at most 200 characters."), "{}", output);
        assert_eq!(shell.session.state().items.len(), 1);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_reported() {
        let mut shell = shell();
        let output = run_lines(&mut shell, &["import /nonexistent/pantry.csv"]).await;
        assert!(output.starts_with("Error: /nonexistent/pantry.csv"), "{}", output);
        assert!(shell.session.state().items.is_empty());
    }

    #[tokio::test]
    async fn test_template_prints_or_writes() {
        let output = run_lines(&mut shell(), &["template"]).await;
        assert!(output.starts_with("Item Name,Category,Quantity"));

        let path = std::env::temp_dir().join(format!("pantry-{}-template.csv", std::process::id()));
        let output = run_lines(&mut shell(), &[&format!("template {}", path.display())]).await;
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(output.starts_with("Template written to"));
        assert_eq!(written.trim_end(), import_template());
    }
}
