//! Expense service
//!
//! Business logic for recording expenses: input validation, the
//! load-append-persist cycle, audit logging and aggregation for display.

use chrono::{Local, NaiveDate};

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Expense, ExpenseTable, Money, MoneyParseError, UnknownCategory};
use crate::reports::Dashboard;
use crate::storage::{parse_date, LoadReport, RejectedRow, Storage};

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for recording a new expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExpenseInput {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
}

impl CreateExpenseInput {
    /// Validate raw text from the command line or the entry form
    ///
    /// An empty date means today.
    pub fn parse(date: &str, category: &str, amount: &str) -> BudgetResult<Self> {
        let date = if date.trim().is_empty() {
            Local::now().date_naive()
        } else {
            parse_date(date).ok_or_else(|| {
                BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", date.trim()))
            })?
        };

        let category: Category = category
            .parse()
            .map_err(|e: UnknownCategory| BudgetError::Validation(e.to_string()))?;

        let amount = Money::parse(amount).map_err(|e| {
            let hint = match e {
                MoneyParseError::TooManyDecimals(_) => "Use at most two decimal places",
                MoneyParseError::InvalidFormat(_) => "Use a number like 12.50",
            };
            BudgetError::Validation(format!("Invalid amount '{}'. {}", amount.trim(), hint))
        })?;

        Ok(Self {
            date,
            category,
            amount,
        })
    }
}

/// Options for filtering the expense list
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<usize>,
}

/// What `ExpenseService::add` did
#[derive(Debug, Clone)]
pub struct AddOutcome {
    /// The record that was appended
    pub expense: Expense,
    /// The table as persisted
    pub expenses: ExpenseTable,
    /// Unreadable rows that are no longer in the backing file
    pub discarded: Vec<RejectedRow>,
    /// Set when the expense was saved but the audit log could not be written
    pub audit_error: Option<String>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Load the current table with diagnostics
    pub fn load(&self) -> BudgetResult<LoadReport> {
        self.storage.expenses.load()
    }

    /// Append one expense and persist the table
    ///
    /// The table is reloaded first so records written by another process are
    /// kept. Rows that fail to load are not carried over; each one is
    /// recorded in the audit log. Once the table is persisted the call
    /// succeeds; an audit write failure is returned in `audit_error`.
    pub fn add(&self, input: CreateExpenseInput) -> BudgetResult<AddOutcome> {
        let expense = Expense::new(input.date, input.category.as_str(), input.amount);
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let LoadReport { expenses, rejected } = self.load()?;
        let expenses = expenses.append(expense.clone());
        self.storage.expenses.persist(&expenses)?;

        let audit_error = self
            .storage
            .log_create(
                EntityType::Expense,
                format!("row-{}", expenses.len()),
                Some(format!("{} {}", expense.date, expense.category)),
                &expense,
            )
            .and_then(|_| self.storage.log_discarded(&rejected))
            .err()
            .map(|e| e.to_string());

        Ok(AddOutcome {
            expense,
            expenses,
            discarded: rejected,
            audit_error,
        })
    }

    /// List expenses newest first
    pub fn list(&self, filter: &ExpenseFilter) -> BudgetResult<(Vec<Expense>, Vec<RejectedRow>)> {
        let report = self.load()?;
        let mut expenses = report
            .expenses
            .between(filter.start_date, filter.end_date)
            .sorted_by_date_desc();

        if let Some(limit) = filter.limit {
            expenses.truncate(limit);
        }

        Ok((expenses, report.rejected))
    }

    /// Load and aggregate everything the dashboard shows
    pub fn dashboard(&self) -> BudgetResult<(Dashboard, Vec<RejectedRow>)> {
        let report = self.load()?;
        Ok((Dashboard::build(report.expenses), report.rejected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::BudgetPaths;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let expenses_file = paths.expenses_file();
        let storage = Storage::new(paths, expenses_file).unwrap();
        (temp_dir, storage)
    }

    fn input(date: &str, category: &str, amount: &str) -> CreateExpenseInput {
        CreateExpenseInput::parse(date, category, amount).unwrap()
    }

    #[test]
    fn test_parse_input() {
        let parsed = input("2024-01-15", "food", "20");
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(parsed.category, Category::Food);
        assert_eq!(parsed.amount, Money::from_cents(2000));

        assert_eq!(input("", "Rent", "1").date, Local::now().date_naive());
    }

    #[test]
    fn test_parse_input_rejects_bad_values() {
        let err = CreateExpenseInput::parse("2024-13-01", "Food", "1").unwrap_err();
        assert!(err.is_validation());

        let err = CreateExpenseInput::parse("", "Groceries", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown category 'Groceries'"));

        let err = CreateExpenseInput::parse("", "Food", "abc").unwrap_err();
        assert!(err.to_string().contains("Invalid amount 'abc'"));

        let err = CreateExpenseInput::parse("", "Food", "12.999").unwrap_err();
        assert!(err.is_validation());
        assert!(err
            .to_string()
            .contains("Invalid amount '12.999'. Use at most two decimal places"));
    }

    #[test]
    fn test_add_scenario() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        service.add(input("2024-01-15", "Food", "20.00")).unwrap();
        service.add(input("2024-01-20", "Rent", "900.00")).unwrap();
        let outcome = service.add(input("2024-02-01", "Food", "15.50")).unwrap();
        assert_eq!(outcome.expenses.len(), 3);

        let (dashboard, rejected) = service.dashboard().unwrap();
        assert!(rejected.is_empty());

        let monthly: Vec<_> = dashboard
            .monthly
            .rows
            .iter()
            .map(|r| (r.month.label(), r.total))
            .collect();
        assert_eq!(
            monthly,
            vec![
                ("January 2024".to_string(), Money::from_cents(92000)),
                ("February 2024".to_string(), Money::from_cents(1550)),
            ]
        );

        let food = dashboard
            .categories
            .rows
            .iter()
            .find(|r| r.category == "Food")
            .unwrap();
        assert_eq!(food.total, Money::from_cents(3550));
    }

    #[test]
    fn test_add_rejects_negative_amount_without_writing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service.add(input("2024-01-15", "Food", "-5")).unwrap_err();
        assert!(err.is_validation());
        assert!(!storage.expenses.path().exists());
    }

    #[test]
    fn test_add_zero_amount_is_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        assert!(service.add(input("2024-01-15", "Other", "0")).is_ok());
    }

    #[test]
    fn test_add_logs_create() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add(input("2024-01-15", "Food", "20.00")).unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_id, "row-1");
        assert_eq!(entries[0].entity_name.as_deref(), Some("2024-01-15 Food"));
    }

    #[test]
    fn test_add_discards_rejected_rows_and_logs_them() {
        let (_temp_dir, storage) = create_test_storage();
        fs::write(
            storage.expenses.path(),
            "Date,Category,Amount\n2024-01-15,Food,20.00\nsoon,Rent,900.00\n",
        )
        .unwrap();

        let service = ExpenseService::new(&storage);
        let outcome = service.add(input("2024-02-01", "Food", "15.50")).unwrap();

        assert_eq!(outcome.discarded.len(), 1);
        assert_eq!(outcome.expenses.len(), 2);

        let contents = fs::read_to_string(storage.expenses.path()).unwrap();
        assert!(!contents.contains("soon"));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].operation, Operation::Discard);
        assert_eq!(entries[1].entity_id, "line-3");
    }

    #[test]
    fn test_add_succeeds_when_audit_log_is_unwritable() {
        let (_temp_dir, storage) = create_test_storage();
        // a directory where the log file should be makes every append fail
        fs::create_dir_all(storage.paths().audit_log()).unwrap();

        let service = ExpenseService::new(&storage);
        let outcome = service.add(input("2024-01-15", "Food", "20.00")).unwrap();

        assert!(outcome.audit_error.is_some());
        assert_eq!(outcome.expenses.len(), 1);
        assert_eq!(service.load().unwrap().expenses.len(), 1);
    }

    #[test]
    fn test_add_without_audit_problems_has_no_audit_error() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let outcome = service.add(input("2024-01-15", "Food", "20.00")).unwrap();
        assert!(outcome.audit_error.is_none());
    }

    #[test]
    fn test_list_filters_and_sorts() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add(input("2024-01-15", "Food", "20.00")).unwrap();
        service.add(input("2024-03-01", "Rent", "900.00")).unwrap();
        service.add(input("2024-02-01", "Food", "15.50")).unwrap();

        let (all, _) = service.list(&ExpenseFilter::default()).unwrap();
        let dates: Vec<_> = all.iter().map(|e| e.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-01", "2024-01-15"]);

        let filter = ExpenseFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 20),
            end_date: None,
            limit: Some(1),
        };
        let (limited, _) = service.list(&filter).unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].category, "Rent");
    }
}
