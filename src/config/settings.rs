//! User settings for budget-dashboard
//!
//! Manages display preferences, the backing file location, and whether
//! rejected rows are reported on load.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::storage::write_json_atomic;

/// User settings for budget-dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for display (strftime format). The backing file always uses ISO dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Backing file override; relative paths resolve against the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expenses_file: Option<PathBuf>,

    /// Print a warning for every row dropped while loading
    #[serde(default = "default_warn_on_rejected_rows")]
    pub warn_on_rejected_rows: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_warn_on_rejected_rows() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            expenses_file: None,
            warn_on_rejected_rows: default_warn_on_rejected_rows(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return default settings if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject a display date format chrono cannot render
    pub fn validate(&self) -> Result<(), BudgetError> {
        let invalid = StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if invalid {
            return Err(BudgetError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        write_json_atomic(paths.settings_file(), self)
            .map_err(|e| BudgetError::Config(format!("Failed to write settings file: {}", e)))
    }

    /// Resolve the backing file path from settings and paths
    pub fn expenses_path(&self, paths: &BudgetPaths) -> PathBuf {
        match &self.expenses_file {
            Some(file) if file.is_absolute() => file.clone(),
            Some(file) => paths.data_dir().join(file),
            None => paths.expenses_file(),
        }
    }
}
