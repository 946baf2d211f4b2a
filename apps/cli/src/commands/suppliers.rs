//! # Supplier Commands

use clap::Args;
use std::io::Write;

use pantry_core::state::Command;
use pantry_core::{CoreError, NewSupplier, Supplier};

use super::Shell;
use crate::error::CliResult;
use crate::render::Table;

#[derive(Debug, Clone, Args)]
pub struct SupplierArgs {
    pub name: String,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<SupplierArgs> for NewSupplier {
    fn from(args: SupplierArgs) -> Self {
        NewSupplier {
            name: args.name,
            contact_person: args.contact,
            phone: args.phone,
            email: args.email,
            address: args.address,
        }
    }
}

/// Only the given fields change. Pass `""` to clear an optional field.
#[derive(Debug, Clone, Args)]
pub struct SupplierEditArgs {
    pub id: u64,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub contact: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl SupplierEditArgs {
    fn apply_to(self, supplier: &Supplier) -> NewSupplier {
        NewSupplier {
            name: self.name.unwrap_or_else(|| supplier.name.clone()),
            contact_person: self.contact.or_else(|| supplier.contact_person.clone()),
            phone: self.phone.or_else(|| supplier.phone.clone()),
            email: self.email.or_else(|| supplier.email.clone()),
            address: self.address.or_else(|| supplier.address.clone()),
        }
    }
}

fn find_supplier(shell: &Shell, id: u64) -> Result<&Supplier, CoreError> {
    shell
        .session
        .state()
        .supplier(id)
        .ok_or(CoreError::SupplierNotFound(id))
}

pub fn list<W: Write>(shell: &Shell, out: &mut W) -> CliResult<()> {
    let state = shell.session.state();
    if state.suppliers.is_empty() {
        writeln!(out, "No suppliers yet. Add one with 'supplier-add'.")?;
        return Ok(());
    }

    let mut table = Table::new(&["ID", "Name", "Contact", "Phone", "Email", "Open Orders"]).align_right(&[0, 5]);
    for supplier in &state.suppliers {
        let dash = || "-".to_string();
        table.push(vec![
            supplier.id.to_string(),
            supplier.name.clone(),
            supplier.contact_person.clone().unwrap_or_else(dash),
            supplier.phone.clone().unwrap_or_else(dash),
            supplier.email.clone().unwrap_or_else(dash),
            state.open_orders_for(supplier.id).len().to_string(),
        ]);
    }
    writeln!(out, "{}", table.render())?;
    Ok(())
}

pub fn add<W: Write>(shell: &mut Shell, args: SupplierArgs, out: &mut W) -> CliResult<()> {
    let outcome = shell.session.dispatch(Command::AddSupplier(args.into()))?;
    if let Some(supplier) = outcome.created_id.and_then(|id| shell.session.state().supplier(id)) {
        writeln!(out, "Added supplier {} (#{}).", supplier.name, supplier.id)?;
    }
    Ok(())
}

pub fn edit<W: Write>(shell: &mut Shell, args: SupplierEditArgs, out: &mut W) -> CliResult<()> {
    let id = args.id;
    let changes = args.apply_to(find_supplier(shell, id)?);
    shell.session.dispatch(Command::UpdateSupplier { id, changes })?;
    writeln!(out, "Updated supplier {}.", find_supplier(shell, id)?.name)?;
    Ok(())
}

pub fn delete<W: Write>(shell: &mut Shell, id: u64, out: &mut W) -> CliResult<()> {
    let name = find_supplier(shell, id)?.name.clone();
    shell.session.dispatch(Command::DeleteSupplier { id })?;
    writeln!(out, "Deleted supplier {}.", name)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::commands::tests::{run_lines, shell};

    #[tokio::test]
    async fn test_add_edit_delete() {
        let mut shell = shell();
        let output = run_lines(
            &mut shell,
            &[r#"supplier-add "Fresh Farms" --contact Ravi --email ravi@freshfarms.in"#],
        )
        .await;
        assert!(output.contains("Added supplier Fresh Farms"));
        let id = shell.session.state().suppliers[0].id;

        run_lines(&mut shell, &[&format!(r#"supplier-edit {} --phone "98200 11111" --contact """#, id)]).await;
        let supplier = &shell.session.state().suppliers[0];
        assert_eq!(supplier.phone.as_deref(), Some("98200 11111"));
        assert_eq!(supplier.contact_person, None);
        assert_eq!(supplier.email.as_deref(), Some("ravi@freshfarms.in"));

        let output = run_lines(&mut shell, &[&format!("supplier-delete {}", id)]).await;
        assert_eq!(output.trim(), "Deleted supplier Fresh Farms.");
        assert!(shell.session.state().suppliers.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected() {
        let mut shell = shell();
        let output = run_lines(&mut shell, &["supplier-add Acme --email acme.example.com"]).await;
        assert!(output.starts_with("Error: "), "{}", output);
        assert!(shell.session.state().suppliers.is_empty());
    }

    #[tokio::test]
    async fn test_list() {
        let mut shell = shell();
        assert!(run_lines(&mut shell, &["suppliers"]).await.contains("No suppliers yet"));

        run_lines(&mut shell, &["supplier-add Acme --phone 555-0100"]).await;
        let output = run_lines(&mut shell, &["suppliers"]).await;
        assert!(output.contains("Acme"));
        assert!(output.contains("555-0100"));
    }
}
