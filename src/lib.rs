//! budget-dashboard - Terminal personal expense tracker
//!
//! Records expenses (date, category, amount) in a flat CSV file and summarises
//! them by calendar month and by category, both as terminal reports and as an
//! interactive ratatui dashboard.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (money, categories, expenses, months)
//! - `storage`: CSV backing file with atomic writes and a persist lock
//! - `reports`: Monthly and category aggregation
//! - `services`: The load, append, persist and aggregate cycle
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting for CLI output
//! - `export`: JSON, YAML and CSV export
//! - `cli`: Command handlers
//! - `tui`: Interactive dashboard
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_dashboard::config::{paths::BudgetPaths, settings::Settings};
//! use budget_dashboard::services::ExpenseService;
//! use budget_dashboard::storage::Storage;
//!
//! let paths = BudgetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths.clone(), settings.expenses_path(&paths))?;
//! let (dashboard, _rejected) = ExpenseService::new(&storage).dashboard()?;
//! println!("{}", dashboard.format_terminal(&settings.currency_symbol));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{BudgetError, BudgetResult};
