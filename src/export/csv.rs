//! CSV Export functionality
//!
//! The expense export uses the backing file format, so an export can be used
//! directly as a backing file with `--file`.

use std::io::Write;

use crate::error::BudgetResult;
use crate::models::ExpenseTable;
use crate::reports::{CategoryReport, MonthlyReport};
use crate::storage::expenses::write_expenses_csv;

/// Export every expense as `Date,Category,Amount`
pub fn export_expenses_csv<W: Write>(table: &ExpenseTable, writer: W) -> BudgetResult<()> {
    write_expenses_csv(table, writer)
}

/// Export totals per month
pub fn export_monthly_csv<W: Write>(table: &ExpenseTable, writer: W) -> BudgetResult<()> {
    MonthlyReport::generate(table).export_csv(writer)
}

/// Export totals per category
pub fn export_categories_csv<W: Write>(table: &ExpenseTable, writer: W) -> BudgetResult<()> {
    CategoryReport::generate(table).export_csv(writer)
}
