//! Expense display formatting

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Expense;
use crate::storage::RejectedRow;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, in the order given
pub fn format_expense_table(expenses: &[Expense], date_format: &str, currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        date: e.date.format(date_format).to_string(),
        category: e.category.clone(),
        amount: e.amount.format_with_symbol(currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format load diagnostics, one line per dropped row
pub fn format_rejected_rows(rows: &[RejectedRow]) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(&format!("  {}\n", row));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::RejectReason;
    use chrono::NaiveDate;

    #[test]
    fn test_format_expense_table() {
        let expenses = vec![Expense::new(
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Food",
            Money::from_cents(2000),
        )];

        let output = format_expense_table(&expenses, "%d/%m/%Y", "$");
        assert!(output.contains("Date"));
        assert!(output.contains("15/01/2024"));
        assert!(output.contains("Food"));
        assert!(output.contains("$20.00"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], "%Y-%m-%d", "$"), "No expenses found.\n");
    }

    #[test]
    fn test_format_rejected_rows() {
        let rows = vec![RejectedRow {
            line: 3,
            content: "nope,Rent,900.00".into(),
            reason: RejectReason::InvalidDate("nope".into()),
        }];
        assert_eq!(
            format_rejected_rows(&rows),
            "  line 3: unparseable date 'nope' (nope,Rent,900.00)\n"
        );
    }
}
