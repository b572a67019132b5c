//! Storage layer for budget-dashboard
//!
//! Provides the CSV-backed expense store with atomic writes and a persist
//! lock, plus the audit log that records every change to the backing file.

pub mod expenses;
pub mod file_io;
pub mod init;

pub use expenses::{parse_date, ExpenseStore, LoadReport, RejectReason, RejectedRow};
pub use file_io::{write_atomic, write_json_atomic, PersistLock};
pub use init::initialize_storage;

use std::path::PathBuf;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::BudgetPaths;
use crate::error::BudgetResult;

/// Main storage coordinator
pub struct Storage {
    paths: BudgetPaths,
    pub expenses: ExpenseStore,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance over the given backing file
    pub fn new(paths: BudgetPaths, expenses_file: PathBuf) -> BudgetResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseStore::new(expenses_file),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a newly appended entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record rows that were left out of a rewritten backing file
    pub fn log_discarded(&self, rows: &[RejectedRow]) -> BudgetResult<()> {
        let entries: Vec<AuditEntry> = rows
            .iter()
            .map(|row| {
                AuditEntry::discard(
                    format!("line-{}", row.line),
                    row.content.clone(),
                    row.reason.to_string(),
                )
            })
            .collect();

        self.audit.log_batch(&entries)
    }

    /// Check if settings have been written to disk
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }
}
