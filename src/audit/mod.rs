//! Audit logging for budget-dashboard
//!
//! Records every appended expense, and every row that a persist discarded,
//! in an append-only audit log next to the settings file.
//!
//! - `AuditEntry`: a single log entry with timestamp, operation, entity
//!   information and the record as JSON.
//! - `AuditLogger`: writes entries to the log file as line-delimited JSON
//!   (JSONL) and reads them back for `budget log`.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
