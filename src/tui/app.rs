//! Application state for the TUI
//!
//! The App struct holds all state needed for rendering and handling events.

use crate::config::settings::Settings;
use crate::models::{Expense, ExpenseTable};
use crate::reports::Dashboard;
use crate::services::ExpenseService;
use crate::storage::{RejectedRow, Storage};

use super::dialogs::expense::ExpenseFormState;

/// Ticks (250ms each) a status message stays visible
const STATUS_TICKS: u16 = 16;

/// Which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Expenses,
}

impl ActiveView {
    pub const ALL: [ActiveView; 2] = [ActiveView::Dashboard, ActiveView::Expenses];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Expenses => "Expenses",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Expenses => 1,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Dashboard => Self::Expenses,
            Self::Expenses => Self::Dashboard,
        }
    }
}

/// Currently active dialog (if any)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    AddExpense,
    Help,
}

/// Main application state
pub struct App<'a> {
    /// The storage layer
    pub storage: &'a Storage,

    /// Application settings
    pub settings: &'a Settings,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Currently active view
    pub active_view: ActiveView,

    /// Currently active dialog
    pub active_dialog: ActiveDialog,

    /// Aggregates of the last successful load
    pub dashboard: Dashboard,

    /// Expenses newest first, as shown in the expenses view
    pub rows: Vec<Expense>,

    /// Rows the last load could not read
    pub rejected: Vec<RejectedRow>,

    /// Error from the last load, if it failed outright
    pub load_error: Option<String>,

    /// Selected row in the expenses view
    pub selected_index: usize,

    /// Status message to display
    pub status_message: Option<String>,

    /// Remaining ticks before the status message is cleared
    status_ticks: u16,

    /// Add-expense form state
    pub expense_form: ExpenseFormState,
}

impl<'a> App<'a> {
    /// Create the app and load the backing file
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        let mut app = Self {
            storage,
            settings,
            should_quit: false,
            active_view: ActiveView::default(),
            active_dialog: ActiveDialog::default(),
            dashboard: Dashboard::build(ExpenseTable::new()),
            rows: Vec::new(),
            rejected: Vec::new(),
            load_error: None,
            selected_index: 0,
            status_message: None,
            status_ticks: 0,
            expense_form: ExpenseFormState::new(),
        };
        app.reload();
        app
    }

    /// Re-read the backing file and rebuild the aggregates
    ///
    /// A failed load keeps the previous data on screen.
    pub fn reload(&mut self) {
        match ExpenseService::new(self.storage).dashboard() {
            Ok((dashboard, rejected)) => {
                self.rows = dashboard.expenses.sorted_by_date_desc();
                self.dashboard = dashboard;
                self.rejected = rejected;
                self.load_error = None;
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
            }
        }

        if self.selected_index >= self.rows.len() {
            self.selected_index = self.rows.len().saturating_sub(1);
        }
    }

    /// Save the add-expense form
    ///
    /// On success the dialog closes and the view refreshes; on failure the
    /// form stays open with the error shown inline.
    pub fn submit_expense(&mut self) {
        let input = match self.expense_form.to_input() {
            Ok(input) => input,
            Err(e) => {
                self.expense_form.set_error(e);
                return;
            }
        };

        match ExpenseService::new(self.storage).add(input) {
            Ok(outcome) => {
                self.close_dialog();
                self.reload();

                let mut message = format!(
                    "Added {} {} on {}",
                    outcome.expense.category,
                    outcome
                        .expense
                        .amount
                        .format_with_symbol(&self.settings.currency_symbol),
                    outcome.expense.date
                );
                if !outcome.discarded.is_empty() {
                    message.push_str(&format!(
                        " ({} unreadable row(s) dropped from the file)",
                        outcome.discarded.len()
                    ));
                }
                if let Some(error) = &outcome.audit_error {
                    message.push_str(&format!(" (audit log not updated: {})", error));
                }
                self.set_status(message);
            }
            Err(e) => self.expense_form.set_error(e.to_string()),
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_ticks = STATUS_TICKS;
    }

    /// Advance timers; called on every tick event
    pub fn on_tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    /// Switch to a different view
    pub fn switch_view(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    /// Open a dialog
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        if dialog == ActiveDialog::AddExpense {
            self.expense_form = ExpenseFormState::new();
        }
        self.active_dialog = dialog;
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
    }

    /// Check if a dialog is active
    pub fn has_dialog(&self) -> bool {
        !matches!(self.active_dialog, ActiveDialog::None)
    }

    /// Move selection up in the expenses view
    pub fn move_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Move selection down in the expenses view
    pub fn move_down(&mut self) {
        if self.selected_index + 1 < self.rows.len() {
            self.selected_index += 1;
        }
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.rows.len().saturating_sub(1);
    }
}
