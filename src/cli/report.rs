//! CLI commands for reports
//!
//! Provides commands for generating and exporting spending reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::ExpenseTable;
use crate::reports::{CategoryReport, Dashboard, MonthlyReport};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::{parse_date_range, warn_rejected};

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Spending per calendar month
    #[command(alias = "month")]
    Monthly {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Spending per category
    #[command(alias = "categories")]
    Category {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Export to CSV file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show top N categories only
        #[arg(long)]
        top: Option<usize>,
    },

    /// Both reports with overall totals
    Summary {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    match cmd {
        ReportCommands::Monthly { from, to, output } => {
            let table = load_range(storage, settings, from.as_deref(), to.as_deref())?;
            let report = MonthlyReport::generate(&table);

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Monthly report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
            Ok(())
        }
        ReportCommands::Category {
            from,
            to,
            output,
            top,
        } => {
            let table = load_range(storage, settings, from.as_deref(), to.as_deref())?;
            let mut report = CategoryReport::generate(&table);
            if let Some(limit) = top {
                report.rows.truncate(limit);
            }

            if let Some(path) = output {
                write_csv(&path, |w| report.export_csv(w))?;
                println!("Category report exported to: {}", path.display());
            } else {
                print!("{}", report.format_terminal(&settings.currency_symbol));
            }
            Ok(())
        }
        ReportCommands::Summary { from, to } => {
            let table = load_range(storage, settings, from.as_deref(), to.as_deref())?;
            print!(
                "{}",
                Dashboard::build(table).format_terminal(&settings.currency_symbol)
            );
            Ok(())
        }
    }
}

fn load_range(
    storage: &Storage,
    settings: &Settings,
    from: Option<&str>,
    to: Option<&str>,
) -> BudgetResult<ExpenseTable> {
    let (start, end) = parse_date_range(from, to)?;
    let report = ExpenseService::new(storage).load()?;
    warn_rejected(settings, &report.rejected);
    Ok(report.expenses.between(start, end))
}

fn write_csv<F>(path: &Path, export: F) -> BudgetResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> BudgetResult<()>,
{
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);

    export(&mut writer)?;
    writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))
}
