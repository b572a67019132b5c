use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_dashboard::cli::{
    handle_add_command, handle_categories_command, handle_check_command, handle_export_command,
    handle_list_command, handle_log_command, handle_report_command, handle_summary_command,
    AddArgs, ExportCommands, ListArgs, ReportCommands,
};
use budget_dashboard::config::{paths::BudgetPaths, settings::Settings};
use budget_dashboard::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Terminal personal expense tracker",
    long_about = "budget-dashboard records expenses in a plain CSV file and shows \
                  where the money went, month by month and category by category, \
                  as terminal reports or an interactive dashboard."
)]
struct Cli {
    /// Expense file to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List expenses, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Spending reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export expenses and totals
    #[command(subcommand)]
    Export(ExportCommands),

    /// Check the expense file for unreadable rows
    Check,

    /// List the categories accepted by `add`
    Categories,

    /// Show recent changes from the audit log
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Launch the interactive dashboard
    #[command(aliases = ["ui", "dashboard"])]
    Tui,

    /// Create the settings file and an empty expense file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let expenses_file = cli
        .file
        .clone()
        .unwrap_or_else(|| settings.expenses_path(&paths));
    let storage = Storage::new(paths.clone(), expenses_file)?;

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&storage, &settings, args)?,
        Some(Commands::List(args)) => handle_list_command(&storage, &settings, args)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Check) => handle_check_command(&storage)?,
        Some(Commands::Categories) => handle_categories_command()?,
        Some(Commands::Log { limit }) => handle_log_command(&storage, limit)?,
        Some(Commands::Tui) => budget_dashboard::tui::run_tui(&storage, &settings)?,
        Some(Commands::Init) => {
            initialize_storage(&paths, &settings, &storage.expenses)?;
            println!("Initialized budget-dashboard at: {}", paths.base_dir().display());
            println!("Expense file: {}", storage.expenses.path().display());
            println!();
            println!("Run 'budget add <AMOUNT> -c <CATEGORY>' to record an expense.");
        }
        Some(Commands::Config) => {
            println!("budget-dashboard Configuration");
            println!("==============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Expense file:   {}", storage.expenses.path().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Date format:           {}", settings.date_format);
            println!("  Warn on rejected rows: {}", settings.warn_on_rejected_rows);
        }
        None => handle_summary_command(&storage, &settings)?,
    }

    Ok(())
}
