//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod expense;
pub mod help;
