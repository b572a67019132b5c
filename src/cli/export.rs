//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{csv, json, yaml};
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::warn_rejected;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (expenses only, same layout as the backing file)
    Csv,
    /// JSON format (expenses and totals)
    Json,
    /// YAML format (expenses and totals, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all data to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export monthly totals to CSV
    Monthly {
        /// Output file path
        output: PathBuf,
    },

    /// Export category totals to CSV
    Categories {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> BudgetResult<()> {
    let report = ExpenseService::new(storage).load()?;
    warn_rejected(settings, &report.rejected);
    let table = report.expenses;

    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Csv => csv::export_expenses_csv(&table, &mut writer)?,
                ExportFormat::Json => json::export_full_json(&table, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(&table, &mut writer)?,
            }
            finish(writer)?;
            println!(
                "Exported {} expense(s) to: {}",
                table.len(),
                output.display()
            );
        }
        ExportCommands::Monthly { output } => {
            let mut writer = create_output(&output)?;
            csv::export_monthly_csv(&table, &mut writer)?;
            finish(writer)?;
            println!("Monthly totals exported to: {}", output.display());
        }
        ExportCommands::Categories { output } => {
            let mut writer = create_output(&output)?;
            csv::export_categories_csv(&table, &mut writer)?;
            finish(writer)?;
            println!("Category totals exported to: {}", output.display());
        }
    }

    Ok(())
}

fn create_output(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> BudgetResult<()> {
    writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))
}
