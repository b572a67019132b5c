//! JSON Export functionality
//!
//! Exports the expense table and both aggregations with schema versioning.

use std::io::Write;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::ExpenseTable;
use crate::reports::{category_totals, monthly_totals};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Every expense in file order
    pub expenses: Vec<ExportedExpense>,

    /// Totals per calendar month, oldest first
    pub monthly_totals: Vec<ExportedMonth>,

    /// Totals per category, largest first
    pub category_totals: Vec<ExportedCategory>,

    pub metadata: ExportMetadata,
}

/// Amounts are written as decimal strings ("20.00") so no precision is lost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedExpense {
    pub date: NaiveDate,
    pub category: String,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedMonth {
    /// "2024-01"
    pub month: String,
    /// "January 2024"
    pub label: String,
    pub total: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedCategory {
    pub category: String,
    pub total: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,
    pub total: String,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Build an export from the loaded table
    pub fn from_table(table: &ExpenseTable) -> Self {
        let expenses = table
            .iter()
            .map(|e| ExportedExpense {
                date: e.date,
                category: e.category.clone(),
                amount: e.amount.to_decimal_string(),
            })
            .collect();

        let monthly_totals = monthly_totals(table)
            .into_iter()
            .map(|m| ExportedMonth {
                month: m.month.key(),
                label: m.month.label(),
                total: m.total.to_decimal_string(),
                count: m.count,
            })
            .collect();

        let category_totals = category_totals(table)
            .into_iter()
            .map(|c| ExportedCategory {
                category: c.category,
                total: c.total.to_decimal_string(),
                count: c.count,
            })
            .collect();

        let range = table.date_range();
        let metadata = ExportMetadata {
            expense_count: table.len(),
            total: table.total().to_decimal_string(),
            earliest_expense: range.map(|(first, _)| first.to_string()),
            latest_expense: range.map(|(_, last)| last.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            monthly_totals,
            category_totals,
            metadata,
        }
    }
}

/// Export the table and its aggregations to JSON
pub fn export_full_json<W: Write>(
    table: &ExpenseTable,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = FullExport::from_table(table);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};

    fn sample_table() -> ExpenseTable {
        let date = |m, d| NaiveDate::from_ymd_opt(2024, m, d).unwrap();
        ExpenseTable::from_vec(vec![
            Expense::new(date(1, 15), "Food", Money::from_cents(2000)),
            Expense::new(date(1, 20), "Rent", Money::from_cents(90000)),
            Expense::new(date(2, 1), "Food", Money::from_cents(1550)),
        ])
    }

    #[test]
    fn test_full_export() {
        let export = FullExport::from_table(&sample_table());

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.expenses.len(), 3);
        assert_eq!(export.monthly_totals.len(), 2);
        assert_eq!(export.monthly_totals[0].label, "January 2024");
        assert_eq!(export.monthly_totals[0].total, "920.00");
        assert_eq!(export.category_totals[0].category, "Rent");
        assert_eq!(export.metadata.total, "935.50");
        assert_eq!(export.metadata.earliest_expense.as_deref(), Some("2024-01-15"));
        assert_eq!(export.metadata.latest_expense.as_deref(), Some("2024-02-01"));
    }

    #[test]
    fn test_json_output_parses_back() {
        let mut output = Vec::new();
        export_full_json(&sample_table(), &mut output, true).unwrap();

        let parsed: FullExport = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed.expenses[2].amount, "15.50");
        assert_eq!(parsed.expenses[2].date.to_string(), "2024-02-01");
    }

    #[test]
    fn test_empty_export() {
        let export = FullExport::from_table(&ExpenseTable::new());
        assert!(export.expenses.is_empty());
        assert!(export.monthly_totals.is_empty());
        assert!(export.metadata.earliest_expense.is_none());
    }
}
