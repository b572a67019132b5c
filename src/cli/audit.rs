//! CLI command for reading the audit log

use crate::error::BudgetResult;
use crate::storage::Storage;

/// Show the most recent audit entries, oldest first
pub fn handle_log_command(storage: &Storage, limit: usize) -> BudgetResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("Audit log is empty.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
