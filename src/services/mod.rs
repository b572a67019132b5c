//! Service layer for budget-dashboard
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and audit logging.

pub mod expense;

pub use expense::{AddOutcome, CreateExpenseInput, ExpenseFilter, ExpenseService};
