//! Dashboard summary
//!
//! Both aggregations over one table, as shown by the TUI dashboard and by
//! `budget` without a subcommand.

use crate::models::{ExpenseTable, Money};

use super::category::CategoryReport;
use super::monthly::MonthlyReport;

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub expenses: ExpenseTable,
    pub monthly: MonthlyReport,
    pub categories: CategoryReport,
}

impl Dashboard {
    /// Aggregate `expenses` by month and by category
    pub fn build(expenses: ExpenseTable) -> Self {
        Self {
            monthly: MonthlyReport::generate(&expenses),
            categories: CategoryReport::generate(&expenses),
            expenses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> Money {
        self.expenses.total()
    }

    /// Plain-text summary for the terminal
    pub fn format_terminal(&self, currency: &str) -> String {
        if self.is_empty() {
            return "No expenses yet. Run `budget add <AMOUNT> -c <CATEGORY>` to add one.\n"
                .to_string();
        }

        let mut output = String::new();
        output.push_str(&format!(
            "Total spent: {} across {} expense(s)",
            self.total().format_with_symbol(currency),
            self.expenses.len()
        ));
        if let Some((first, last)) = self.expenses.date_range() {
            output.push_str(&format!(" from {} to {}", first, last));
        }
        output.push_str("\n\n");
        output.push_str(&self.monthly.format_terminal(currency));
        output.push('\n');
        output.push_str(&self.categories.format_terminal(currency));
        output
    }
}
