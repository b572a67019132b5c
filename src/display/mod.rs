//! Display formatting for terminal output
//!
//! Provides utilities for formatting expenses and reports for the CLI.

pub mod expense;
pub mod report;

pub use expense::{format_expense_table, format_rejected_rows};
