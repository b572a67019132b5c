//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and an empty backing
//! file with just the header row.

use crate::config::{BudgetPaths, Settings};
use crate::error::BudgetResult;
use crate::models::ExpenseTable;

use super::expenses::ExpenseStore;

/// Initialize storage for a fresh installation
///
/// Existing settings and expense data are left untouched.
pub fn initialize_storage(
    paths: &BudgetPaths,
    settings: &Settings,
    store: &ExpenseStore,
) -> BudgetResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    if !store.path().exists() {
        store.persist(&ExpenseTable::new())?;
    }

    Ok(())
}
