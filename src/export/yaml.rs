//! YAML Export functionality
//!
//! Same content as the JSON export, in a human-readable format.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::models::ExpenseTable;

/// Export the table and its aggregations to YAML
pub fn export_full_yaml<W: Write>(table: &ExpenseTable, writer: &mut W) -> BudgetResult<()> {
    let export = FullExport::from_table(table);

    let header = format!(
        "# budget-dashboard export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let table = ExpenseTable::new().append(Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Food",
            Money::from_cents(2000),
        ));

        let mut output = Vec::new();
        export_full_yaml(&table, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# budget-dashboard export"));
        assert!(yaml.contains("schema_version"));
        assert!(yaml.contains("January 2024"));

        let parsed: FullExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.expenses.len(), 1);
        assert_eq!(parsed.metadata.total, "20.00");
    }
}
