//! Core data models for budget-dashboard
//!
//! This module contains the data structures of the expense domain:
//! amounts, categories, expense records and tables, and month buckets.

pub mod category;
pub mod expense;
pub mod money;
pub mod month;

pub use category::{Category, UnknownCategory};
pub use expense::{Expense, ExpenseTable, ExpenseValidationError};
pub use money::{Money, MoneyParseError};
pub use month::Month;
