//! Monthly Report
//!
//! Buckets expenses by the calendar month they fall in.

use std::collections::BTreeMap;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator};
use crate::error::BudgetResult;
use crate::models::{ExpenseTable, Money, Month};

use super::percentage_of;

/// Sum of one calendar month
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    pub month: Month,
    pub total: Money,
    pub count: usize,
}

/// Sum amounts per calendar month
///
/// Ascending by month; months without expenses are absent.
pub fn monthly_totals(table: &ExpenseTable) -> Vec<MonthlyTotal> {
    let mut buckets: BTreeMap<Month, (Money, usize)> = BTreeMap::new();

    for expense in table {
        let entry = buckets
            .entry(Month::from_date(expense.date))
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(month, (total, count))| MonthlyTotal {
            month,
            total,
            count,
        })
        .collect()
}

/// One line of the monthly report
#[derive(Debug, Clone)]
pub struct MonthlyReportRow {
    pub month: Month,
    pub total: Money,
    pub count: usize,
    /// Percentage of overall spending
    pub percentage: f64,
}

/// Spending per month with overall totals
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub rows: Vec<MonthlyReportRow>,
    pub total: Money,
    pub count: usize,
}

impl MonthlyReport {
    /// Generate the report over every expense in `table`
    pub fn generate(table: &ExpenseTable) -> Self {
        let total = table.total();
        let rows = monthly_totals(table)
            .into_iter()
            .map(|m| MonthlyReportRow {
                percentage: percentage_of(m.total, total),
                month: m.month,
                total: m.total,
                count: m.count,
            })
            .collect();

        Self {
            rows,
            total,
            count: table.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest single-month total
    pub fn max_total(&self) -> Money {
        self.rows
            .iter()
            .map(|r| r.total)
            .max()
            .unwrap_or_default()
    }

    /// Mean spending over the months that have expenses
    pub fn average(&self) -> Money {
        if self.rows.is_empty() {
            Money::zero()
        } else {
            Money::from_cents(self.total.cents() / self.rows.len() as i64)
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Monthly Spending\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<16} {:>12} {:>6} {:>7}  {}\n",
            "Month", "Amount", "Count", "%", ""
        ));
        output.push_str(&separator(72));
        output.push('\n');

        let max = self.max_total().as_f64();
        for row in &self.rows {
            output.push_str(&format!(
                "{:<16} {:>12} {:>6} {:>7}  {}\n",
                row.month.label(),
                row.total.format_with_symbol(currency),
                row.count,
                format_percentage(row.percentage),
                format_bar(row.total.as_f64(), max, 24)
            ));
        }

        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>12} {:>6}\n",
            "TOTAL",
            self.total.format_with_symbol(currency),
            self.count
        ));
        output.push_str(&format!(
            "{:<16} {:>12}\n",
            "Monthly average",
            self.average().format_with_symbol(currency)
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(["Month", "Label", "Amount", "Count", "Percentage"])?;

        for row in &self.rows {
            writer.write_record([
                row.month.key(),
                row.month.label(),
                row.total.to_decimal_string(),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
