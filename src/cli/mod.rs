//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod expense;
pub mod export;
pub mod report;

pub use audit::handle_log_command;
pub use expense::{
    handle_add_command, handle_categories_command, handle_check_command, handle_list_command,
    handle_summary_command, AddArgs, ListArgs,
};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::display::format_rejected_rows;
use crate::error::{BudgetError, BudgetResult};
use crate::storage::{parse_date, RejectedRow};

/// Parse a `--from`/`--to` style date argument
pub(crate) fn parse_date_arg(value: &str) -> BudgetResult<NaiveDate> {
    parse_date(value).ok_or_else(|| {
        BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", value))
    })
}

pub(crate) fn parse_date_range(
    from: Option<&str>,
    to: Option<&str>,
) -> BudgetResult<(Option<NaiveDate>, Option<NaiveDate>)> {
    let start = from.map(parse_date_arg).transpose()?;
    let end = to.map(parse_date_arg).transpose()?;

    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(BudgetError::Validation(format!(
                "--from {} is after --to {}",
                s, e
            )));
        }
    }

    Ok((start, end))
}

/// Print load diagnostics to stderr unless disabled in settings
pub(crate) fn warn_rejected(settings: &Settings, rejected: &[RejectedRow]) {
    if rejected.is_empty() || !settings.warn_on_rejected_rows {
        return;
    }

    eprintln!(
        "Warning: skipped {} unreadable row(s) in the expense file:",
        rejected.len()
    );
    eprint!("{}", format_rejected_rows(rejected));
}
