//! Expense record and expense table
//!
//! An `Expense` is one (date, category, amount) entry. The `ExpenseTable` is
//! the ordered collection loaded from and persisted to the backing file.
//! Insertion order is append order, not date order, and duplicates are legal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Date the money was spent
    pub date: NaiveDate,

    /// Category label; free-form at the storage layer
    pub category: String,

    /// Amount spent
    pub amount: Money,
}

impl Expense {
    /// Create a new expense
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: Money) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
        }
    }

    /// Validate an expense entered by the user
    ///
    /// Records read back from the backing file are not passed through this.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount(self.amount));
        }

        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount
        )
    }
}

/// Validation errors for user-entered expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::EmptyCategory => write!(f, "Category must not be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Ordered sequence of expenses in append order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseTable {
    expenses: Vec<Expense>,
}

impl ExpenseTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing records, keeping their order
    pub fn from_vec(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Return this table with `expense` added at the end
    ///
    /// Nothing is written to disk; see `ExpenseStore::persist`.
    #[must_use]
    pub fn append(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Expense> {
        self.expenses.iter()
    }

    pub fn as_slice(&self) -> &[Expense] {
        &self.expenses
    }

    /// Most recently appended record
    pub fn last(&self) -> Option<&Expense> {
        self.expenses.last()
    }

    /// Sum of all amounts
    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Records sorted newest first; ties keep append order
    pub fn sorted_by_date_desc(&self) -> Vec<Expense> {
        let mut sorted = self.expenses.clone();
        sorted.sort_by(|a, b| b.date.cmp(&a.date));
        sorted
    }

    /// Records whose date falls within the inclusive range
    pub fn between(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let expenses = self
            .expenses
            .iter()
            .filter(|e| start.map_or(true, |s| e.date >= s))
            .filter(|e| end.map_or(true, |en| e.date <= en))
            .cloned()
            .collect();
        Self { expenses }
    }

    /// Earliest and latest expense dates
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let earliest = self.expenses.iter().map(|e| e.date).min()?;
        let latest = self.expenses.iter().map(|e| e.date).max()?;
        Some((earliest, latest))
    }
}

impl<'a> IntoIterator for &'a ExpenseTable {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}

impl FromIterator<Expense> for ExpenseTable {
    fn from_iter<I: IntoIterator<Item = Expense>>(iter: I) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_adds_at_end() {
        let first = Expense::new(date(2024, 3, 1), "Food", Money::from_cents(500));
        let second = Expense::new(date(2024, 1, 1), "Rent", Money::from_cents(90000));

        let table = ExpenseTable::new().append(first.clone());
        let original = table.clone();
        let table = table.append(second.clone());

        assert_eq!(original.len(), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.as_slice()[0], first);
        assert_eq!(table.last(), Some(&second));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let expense = Expense::new(date(2024, 3, 1), "Food", Money::from_cents(500));
        let table = ExpenseTable::new()
            .append(expense.clone())
            .append(expense.clone());
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), Money::from_cents(1000));
    }

    #[test]
    fn test_sorted_by_date_desc() {
        let table: ExpenseTable = vec![
            Expense::new(date(2024, 1, 15), "Food", Money::from_cents(2000)),
            Expense::new(date(2024, 2, 1), "Food", Money::from_cents(1550)),
            Expense::new(date(2024, 1, 20), "Rent", Money::from_cents(90000)),
        ]
        .into_iter()
        .collect();

        let sorted = table.sorted_by_date_desc();
        let dates: Vec<_> = sorted.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 2, 1), date(2024, 1, 20), date(2024, 1, 15)]);

        // the table itself keeps append order
        assert_eq!(table.as_slice()[0].date, date(2024, 1, 15));
    }

    #[test]
    fn test_between_is_inclusive() {
        let table = ExpenseTable::from_vec(vec![
            Expense::new(date(2024, 1, 10), "Food", Money::from_cents(100)),
            Expense::new(date(2024, 1, 15), "Food", Money::from_cents(200)),
            Expense::new(date(2024, 1, 20), "Food", Money::from_cents(300)),
        ]);

        let range = table.between(Some(date(2024, 1, 15)), Some(date(2024, 1, 20)));
        assert_eq!(range.len(), 2);
        assert_eq!(range.total(), Money::from_cents(500));

        assert_eq!(table.between(None, None).len(), 3);
        assert_eq!(table.between(None, Some(date(2024, 1, 9))).len(), 0);
    }

    #[test]
    fn test_validate() {
        let ok = Expense::new(date(2024, 1, 1), "Food", Money::zero());
        assert!(ok.validate().is_ok());

        let negative = Expense::new(date(2024, 1, 1), "Food", Money::from_cents(-1));
        assert_eq!(
            negative.validate(),
            Err(ExpenseValidationError::NegativeAmount(Money::from_cents(-1)))
        );

        let blank = Expense::new(date(2024, 1, 1), "  ", Money::from_cents(1));
        assert_eq!(blank.validate(), Err(ExpenseValidationError::EmptyCategory));
    }

    #[test]
    fn test_date_range() {
        assert!(ExpenseTable::new().date_range().is_none());

        let table = ExpenseTable::from_vec(vec![
            Expense::new(date(2024, 2, 1), "Food", Money::from_cents(100)),
            Expense::new(date(2023, 12, 5), "Food", Money::from_cents(100)),
        ]);
        assert_eq!(
            table.date_range(),
            Some((date(2023, 12, 5), date(2024, 2, 1)))
        );
    }
}
