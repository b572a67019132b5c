//! CLI commands for recording and inspecting expenses

use clap::Args;

use crate::config::Settings;
use crate::display::{format_expense_table, format_rejected_rows};
use crate::error::BudgetResult;
use crate::models::Category;
use crate::services::{CreateExpenseInput, ExpenseFilter, ExpenseService};
use crate::storage::Storage;

use super::{parse_date_range, warn_rejected};

/// Arguments for `budget add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Amount spent, e.g. 12.50
    #[arg(allow_hyphen_values = true)]
    pub amount: String,

    /// Category (see `budget categories`)
    #[arg(short, long)]
    pub category: String,

    /// Date of the expense (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `budget list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Number of expenses to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Only expenses on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only expenses on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Record one expense
pub fn handle_add_command(storage: &Storage, settings: &Settings, args: AddArgs) -> BudgetResult<()> {
    let input = CreateExpenseInput::parse(
        args.date.as_deref().unwrap_or_default(),
        &args.category,
        &args.amount,
    )?;

    let outcome = ExpenseService::new(storage).add(input)?;

    println!(
        "Added {} {} on {}",
        outcome.expense.category,
        outcome.expense.amount.format_with_symbol(&settings.currency_symbol),
        outcome.expense.date.format(&settings.date_format)
    );

    if !outcome.discarded.is_empty() {
        eprintln!(
            "Warning: {} unreadable row(s) were dropped from {} (recorded in {}):",
            outcome.discarded.len(),
            storage.expenses.path().display(),
            storage.audit().path().display()
        );
        eprint!("{}", format_rejected_rows(&outcome.discarded));
    }

    if let Some(error) = &outcome.audit_error {
        eprintln!(
            "Warning: the expense was saved but the audit log was not updated: {}",
            error
        );
    }

    Ok(())
}

/// List expenses, newest first
pub fn handle_list_command(storage: &Storage, settings: &Settings, args: ListArgs) -> BudgetResult<()> {
    let (start_date, end_date) = parse_date_range(args.from.as_deref(), args.to.as_deref())?;
    let filter = ExpenseFilter {
        start_date,
        end_date,
        limit: args.limit,
    };

    let (expenses, rejected) = ExpenseService::new(storage).list(&filter)?;
    warn_rejected(settings, &rejected);

    print!(
        "{}",
        format_expense_table(&expenses, &settings.date_format, &settings.currency_symbol)
    );

    Ok(())
}

/// Load the backing file and report every row that would be dropped
pub fn handle_check_command(storage: &Storage) -> BudgetResult<()> {
    let report = ExpenseService::new(storage).load()?;
    let path = storage.expenses.path();

    if !path.exists() {
        println!("{} does not exist yet (no expenses recorded).", path.display());
        return Ok(());
    }

    println!(
        "{}: {} readable expense(s), {} unreadable row(s)",
        path.display(),
        report.expenses.len(),
        report.rejected.len()
    );
    if report.has_rejections() {
        print!("{}", format_rejected_rows(&report.rejected));
        println!();
        println!("Unreadable rows are removed from the file the next time an expense is added.");
    }

    Ok(())
}

/// List the categories accepted by `budget add`
pub fn handle_categories_command() -> BudgetResult<()> {
    for category in Category::ALL {
        println!("{}", category);
    }
    Ok(())
}

/// Summary printed when no subcommand is given
pub fn handle_summary_command(storage: &Storage, settings: &Settings) -> BudgetResult<()> {
    let (dashboard, rejected) = ExpenseService::new(storage).dashboard()?;
    warn_rejected(settings, &rejected);

    print!("{}", dashboard.format_terminal(&settings.currency_symbol));
    Ok(())
}
