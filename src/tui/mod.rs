//! Terminal User Interface module
//!
//! Interactive dashboard built on ratatui: monthly and category charts, the
//! raw expense table and a form for adding expenses.

pub mod app;
pub mod event;
pub mod handler;
pub mod terminal;

// Views
pub mod views;

// Widgets
pub mod widgets;

// Dialogs
pub mod dialogs;

// Layout
pub mod layout;

pub use app::App;
pub use terminal::run_tui;
