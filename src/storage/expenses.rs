//! Expense store backed by a CSV file
//!
//! The backing file has a `Date,Category,Amount` header and one row per
//! expense. Loading is tolerant: rows that cannot become an `Expense` are
//! dropped from the table and reported as `RejectedRow`s. Persisting replaces
//! the whole file atomically under a lock.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, ExpenseTable, Money};

use super::file_io::{write_atomic, PersistLock};

pub const DATE_COLUMN: &str = "Date";
pub const CATEGORY_COLUMN: &str = "Category";
pub const AMOUNT_COLUMN: &str = "Amount";

/// Date format written to the backing file
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Why a row was left out of the loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RejectReason {
    /// The Date field is not a recognizable date
    InvalidDate(String),
    /// The Amount field is not a decimal number
    InvalidAmount(String),
    /// The row has fewer fields than the header
    MissingField(String),
    /// The CSV reader could not decode the row
    Malformed(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate(v) => write!(f, "unparseable date '{}'", v),
            Self::InvalidAmount(v) => write!(f, "unparseable amount '{}'", v),
            Self::MissingField(name) => write!(f, "missing {} field", name),
            Self::Malformed(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}

/// Diagnostic for a row dropped during load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    /// 1-based line number in the backing file (the header is line 1)
    pub line: u64,
    /// Raw fields joined with commas
    pub content: String,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.reason, self.content)
    }
}

/// Result of loading the backing file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Every row that parsed, in file order
    pub expenses: ExpenseTable,
    /// Rows that were dropped
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    category: usize,
    amount: usize,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> BudgetResult<Self> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                BudgetError::Storage(format!(
                    "{} has no '{}' column (expected header {},{},{})",
                    path.display(),
                    name,
                    DATE_COLUMN,
                    CATEGORY_COLUMN,
                    AMOUNT_COLUMN
                ))
            })
        };

        Ok(Self {
            date: find(DATE_COLUMN)?,
            category: find(CATEGORY_COLUMN)?,
            amount: find(AMOUNT_COLUMN)?,
        })
    }
}

/// Store for the expense table
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    path: PathBuf,
}

impl ExpenseStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the expense table
    ///
    /// A missing file is the normal "no data yet" state and yields an empty
    /// table. A file without the expected header columns is an error.
    pub fn load(&self) -> BudgetResult<LoadReport> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(LoadReport::default()),
            Err(e) => {
                return Err(BudgetError::Storage(format!(
                    "Failed to open {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        read_expenses_csv(BufReader::new(file), &self.path)
    }

    /// Replace the backing file with `table`
    pub fn persist(&self, table: &ExpenseTable) -> BudgetResult<()> {
        let _lock = PersistLock::acquire(&self.path)?;
        write_atomic(&self.path, |writer| write_expenses_csv(table, writer))
    }
}

/// Parse the backing file format from any reader
///
/// `origin` is only used in error messages.
pub fn read_expenses_csv<R: Read>(reader: R, origin: &Path) -> BudgetResult<LoadReport> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(LoadReport::default());
    }
    let columns = Columns::from_headers(&headers, origin)?;

    let mut report = LoadReport::default();
    let mut expenses = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.rejected.push(RejectedRow {
                    line,
                    content: String::new(),
                    reason: RejectReason::Malformed(e.to_string()),
                });
                continue;
            }
        };

        match parse_record(&record, &columns) {
            Ok(expense) => expenses.push(expense),
            Err(reason) => report.rejected.push(RejectedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                content: record.iter().collect::<Vec<_>>().join(","),
                reason,
            }),
        }
    }

    report.expenses = ExpenseTable::from_vec(expenses);
    Ok(report)
}

/// Serialize a table in the backing file format
pub fn write_expenses_csv<W: Write>(table: &ExpenseTable, writer: W) -> BudgetResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record([DATE_COLUMN, CATEGORY_COLUMN, AMOUNT_COLUMN])?;
    for expense in table {
        writer.write_record([
            expense.date.format(STORAGE_DATE_FORMAT).to_string(),
            expense.category.clone(),
            expense.amount.to_decimal_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn parse_record(record: &csv::StringRecord, columns: &Columns) -> Result<Expense, RejectReason> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .ok_or_else(|| RejectReason::MissingField(name.to_string()))
    };

    let raw_date = field(columns.date, DATE_COLUMN)?;
    let category = field(columns.category, CATEGORY_COLUMN)?;
    let raw_amount = field(columns.amount, AMOUNT_COLUMN)?;

    let date =
        parse_date(raw_date).ok_or_else(|| RejectReason::InvalidDate(raw_date.to_string()))?;
    let amount = Money::parse(raw_amount)
        .map_err(|_| RejectReason::InvalidAmount(raw_amount.to_string()))?;

    Ok(Expense::new(date, category, amount))
}

/// Parse an ISO-8601-style date, discarding any time of day
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_store() -> (TempDir, ExpenseStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        (temp_dir, store)
    }

    fn sample_table() -> ExpenseTable {
        ExpenseTable::from_vec(vec![
            Expense::new(date(2024, 1, 15), "Food", Money::from_cents(2000)),
            Expense::new(date(2024, 1, 20), "Rent", Money::from_cents(90000)),
            Expense::new(date(2024, 2, 1), "Food", Money::from_cents(1550)),
        ])
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let (_temp_dir, store) = create_test_store();
        let report = store.load().unwrap();
        assert!(report.expenses.is_empty());
        assert!(!report.has_rejections());
    }

    #[test]
    fn test_empty_file_is_empty_table() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "").unwrap();
        assert!(store.load().unwrap().expenses.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let (_temp_dir, store) = create_test_store();
        let table = sample_table();

        store.persist(&table).unwrap();
        let report = store.load().unwrap();

        assert_eq!(report.expenses, table);
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn test_persisted_format() {
        let (_temp_dir, store) = create_test_store();
        store.persist(&sample_table()).unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            contents,
            "Date,Category,Amount\n2024-01-15,Food,20.00\n2024-01-20,Rent,900.00\n2024-02-01,Food,15.50\n"
        );
    }

    #[test]
    fn test_append_then_load_keeps_record_last() {
        let (_temp_dir, store) = create_test_store();
        store.persist(&sample_table()).unwrap();

        let record = Expense::new(date(2023, 12, 31), "Transport", Money::from_cents(325));
        let table = store.load().unwrap().expenses.append(record.clone());
        store.persist(&table).unwrap();

        let reloaded = store.load().unwrap().expenses;
        assert_eq!(reloaded.len(), 4);
        assert_eq!(reloaded.last(), Some(&record));
    }

    #[test]
    fn test_bad_date_row_is_dropped() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Date,Category,Amount\n2024-01-15,Food,20.00\nnot-a-date,Rent,900.00\n2024-02-01,Food,15.50\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 3);
        assert_eq!(
            report.rejected[0].reason,
            RejectReason::InvalidDate("not-a-date".into())
        );

        // the file itself is untouched by loading
        assert!(fs::read_to_string(store.path()).unwrap().contains("not-a-date"));
    }

    #[test]
    fn test_bad_amount_and_short_rows_are_dropped() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Date,Category,Amount\n2024-01-15,Food,twenty\n2024-01-16,Food\n2024-01-17,Food,1.00\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.rejected.len(), 2);
        assert!(matches!(report.rejected[0].reason, RejectReason::InvalidAmount(_)));
        assert_eq!(
            report.rejected[1].reason,
            RejectReason::MissingField("Amount".into())
        );
    }

    #[test]
    fn test_sub_cent_amount_is_rejected() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Date,Category,Amount\n2024-01-15,Food,0.129\n2024-01-16,Food,0.13\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.expenses.as_slice()[0].amount, Money::from_cents(13));
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].line, 2);
        assert_eq!(
            report.rejected[0].reason,
            RejectReason::InvalidAmount("0.129".into())
        );
    }

    #[test]
    fn test_unknown_categories_and_negative_amounts_load() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Date,Category,Amount\n2024-01-15,Groceries,-5.00\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        let expense = &report.expenses.as_slice()[0];
        assert_eq!(expense.category, "Groceries");
        assert_eq!(expense.amount, Money::from_cents(-500));
    }

    #[test]
    fn test_columns_matched_by_header_name() {
        let (_temp_dir, store) = create_test_store();
        fs::write(
            store.path(),
            "Amount,Date,Category\n12.5,2024-03-04 00:00:00,Food\n",
        )
        .unwrap();

        let report = store.load().unwrap();
        assert_eq!(
            report.expenses.as_slice(),
            &[Expense::new(date(2024, 3, 4), "Food", Money::from_cents(1250))]
        );
    }

    #[test]
    fn test_missing_column_fails_loudly() {
        let (_temp_dir, store) = create_test_store();
        fs::write(store.path(), "When,What\n2024-01-01,Food\n").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, BudgetError::Storage(_)));
        assert!(err.to_string().contains("'Date'"));
    }

    #[test]
    fn test_category_with_comma_round_trips() {
        let (_temp_dir, store) = create_test_store();
        let table = ExpenseTable::new().append(Expense::new(
            date(2024, 5, 5),
            "Gifts, birthdays",
            Money::from_cents(4200),
        ));

        store.persist(&table).unwrap();
        assert_eq!(store.load().unwrap().expenses, table);
    }

    #[test]
    fn test_persist_refuses_when_locked() {
        let (_temp_dir, store) = create_test_store();
        let _held = PersistLock::acquire(store.path()).unwrap();

        let err = store.persist(&sample_table()).unwrap_err();
        assert!(err.is_locked());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Some(date(2024, 1, 15));
        assert_eq!(parse_date("2024-01-15"), expected);
        assert_eq!(parse_date("2024/01/15"), expected);
        assert_eq!(parse_date("2024-01-15 13:45:00"), expected);
        assert_eq!(parse_date("2024-01-15T13:45:00.250"), expected);
        assert_eq!(parse_date("2024-01-15T23:30:00+02:00"), expected);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("15/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
