//! Category Report
//!
//! Buckets expenses by their exact category string.

use std::collections::HashMap;
use std::io::Write;

use crate::display::report::{format_bar, format_percentage, separator, truncate};
use crate::error::BudgetResult;
use crate::models::{ExpenseTable, Money};

use super::percentage_of;

/// Sum of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

/// Sum amounts per distinct category string
///
/// Largest total first, ties broken by name. Categories are compared
/// exactly, so "food" and "Food" are separate buckets.
pub fn category_totals(table: &ExpenseTable) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<&str, (Money, usize)> = HashMap::new();

    for expense in table {
        let entry = buckets
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(category, (total, count))| CategoryTotal {
            category: category.to_string(),
            total,
            count,
        })
        .collect();

    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    totals
}

/// One line of the category report
#[derive(Debug, Clone)]
pub struct CategoryReportRow {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Percentage of overall spending
    pub percentage: f64,
}

/// Spending per category with overall totals
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub rows: Vec<CategoryReportRow>,
    pub total: Money,
    pub count: usize,
}

impl CategoryReport {
    /// Generate the report over every expense in `table`
    pub fn generate(table: &ExpenseTable) -> Self {
        let total = table.total();
        let rows = category_totals(table)
            .into_iter()
            .map(|c| CategoryReportRow {
                percentage: percentage_of(c.total, total),
                category: c.category,
                total: c.total,
                count: c.count,
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

    /// The `limit` categories with the most spending
    pub fn top(&self, limit: usize) -> &[CategoryReportRow] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Spending by Category\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No expenses recorded.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<16} {:>12} {:>6} {:>7}  {}\n",
            "Category", "Amount", "Count", "%", ""
        ));
        output.push_str(&separator(72));
        output.push('\n');

        let max = self.rows.first().map(|r| r.total.as_f64()).unwrap_or(0.0);
        for row in &self.rows {
            output.push_str(&format!(
                "{:<16} {:>12} {:>6} {:>7}  {}\n",
                truncate(&row.category, 16),
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

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> BudgetResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(["Category", "Amount", "Count", "Percentage"])?;

        for row in &self.rows {
            writer.write_record([
                row.category.clone(),
                row.total.to_decimal_string(),
                row.count.to_string(),
                format!("{:.2}", row.percentage),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}
