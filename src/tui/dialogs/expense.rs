//! Add-expense dialog
//!
//! Form with a date, a category chosen from the fixed set and an amount.
//! Validation errors are shown inside the form and leave it open.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::Category;
use crate::services::CreateExpenseInput;
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::input::TextInput;

/// Which field in the expense form is focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Date,
    Category,
    Amount,
}

impl ExpenseField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Category,
            Self::Category => Self::Amount,
            Self::Amount => Self::Date,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
            Self::Amount => Self::Category,
        }
    }
}

/// State for the add-expense dialog
#[derive(Debug, Clone)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub date_input: TextInput,
    pub category: Category,
    pub amount_input: TextInput,
    pub error_message: Option<String>,
}

impl Default for ExpenseFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseFormState {
    /// A blank form dated today
    pub fn new() -> Self {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let mut form = Self {
            focused_field: ExpenseField::Date,
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(today),
            category: Category::default(),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            error_message: None,
        };
        form.update_focus();
        form
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.date_input.focused = self.focused_field == ExpenseField::Date;
        self.amount_input.focused = self.focused_field == ExpenseField::Amount;
    }

    /// The text input under focus; the category field has none
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            ExpenseField::Date => Some(&mut self.date_input),
            ExpenseField::Amount => Some(&mut self.amount_input),
            ExpenseField::Category => None,
        }
    }

    pub fn next_category(&mut self) {
        self.category = self.category.next();
    }

    pub fn prev_category(&mut self) {
        self.category = self.category.prev();
    }

    /// Jump to the first category starting with `c`
    pub fn jump_to_category(&mut self, c: char) {
        if let Some(category) = Category::ALL.iter().copied().find(|cat| {
            cat.as_str()
                .chars()
                .next()
                .is_some_and(|first| first.eq_ignore_ascii_case(&c))
        }) {
            self.category = category;
        }
    }

    /// Validate the form into service input
    pub fn to_input(&self) -> Result<CreateExpenseInput, String> {
        CreateExpenseInput::parse(
            self.date_input.value(),
            self.category.as_str(),
            self.amount_input.value(),
        )
        .map_err(|e| e.to_string())
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the add-expense dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(56, 11, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Add Expense ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date
            Constraint::Length(1), // Category
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Spacer
            Constraint::Length(2), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.expense_form;

    frame.render_widget(form.date_input.clone(), chunks[0]);
    render_category_field(frame, form, chunks[1]);
    frame.render_widget(form.amount_input.clone(), chunks[2]);

    if let Some(error) = &form.error_message {
        let error = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: true });
        frame.render_widget(error, chunks[4]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::White)),
        Span::raw(" Next  "),
        Span::styled("[←/→]", Style::default().fg(Color::White)),
        Span::raw(" Category  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Save  "),
        Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
        Span::raw(" Cancel"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

fn render_category_field(frame: &mut Frame, form: &ExpenseFormState, area: Rect) {
    let focused = form.focused_field == ExpenseField::Category;
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let arrow_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled("Category", Style::default().fg(Color::Cyan)),
        Span::raw(": "),
        Span::styled("◀ ", arrow_style),
        Span::styled(form.category.as_str(), value_style),
        Span::styled(" ▶", arrow_style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Handle key input for the add-expense dialog
///
/// Returns true if the key was consumed.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            true
        }
        KeyCode::Tab => {
            app.expense_form.next_field();
            true
        }
        KeyCode::BackTab => {
            app.expense_form.prev_field();
            true
        }
        KeyCode::Enter => {
            app.submit_expense();
            true
        }
        _ if app.expense_form.focused_field == ExpenseField::Category => {
            let form = &mut app.expense_form;
            match key.code {
                KeyCode::Left | KeyCode::Up => form.prev_category(),
                KeyCode::Right | KeyCode::Down | KeyCode::Char(' ') => form.next_category(),
                KeyCode::Char(c) => form.jump_to_category(c),
                _ => return false,
            }
            form.clear_error();
            true
        }
        _ => {
            let form = &mut app.expense_form;
            let Some(input) = form.focused_input() else {
                return false;
            };
            match key.code {
                KeyCode::Char(c) => input.insert(c),
                KeyCode::Backspace => input.backspace(),
                KeyCode::Delete => input.delete(),
                KeyCode::Left => input.move_left(),
                KeyCode::Right => input.move_right(),
                KeyCode::Home => input.move_start(),
                KeyCode::End => input.move_end(),
                _ => return false,
            }
            form.clear_error();
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_form_defaults() {
        let form = ExpenseFormState::new();
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

        assert_eq!(form.focused_field, ExpenseField::Date);
        assert_eq!(form.date_input.value(), today);
        assert!(form.date_input.focused);
        assert!(!form.amount_input.focused);
        assert_eq!(form.category, Category::Food);
    }

    #[test]
    fn test_field_navigation_wraps() {
        let mut form = ExpenseFormState::new();
        form.next_field();
        assert_eq!(form.focused_field, ExpenseField::Category);
        assert!(form.focused_input().is_none());
        form.next_field();
        assert!(form.amount_input.focused);
        form.next_field();
        assert_eq!(form.focused_field, ExpenseField::Date);
        form.prev_field();
        assert_eq!(form.focused_field, ExpenseField::Amount);
    }

    #[test]
    fn test_category_cycling() {
        let mut form = ExpenseFormState::new();
        form.prev_category();
        assert_eq!(form.category, Category::Other);
        form.next_category();
        form.next_category();
        assert_eq!(form.category, Category::Rent);

        form.jump_to_category('u');
        assert_eq!(form.category, Category::Utilities);
        form.jump_to_category('z');
        assert_eq!(form.category, Category::Utilities);
    }

    #[test]
    fn test_to_input() {
        let mut form = ExpenseFormState::new();
        form.date_input = form.date_input.clone().content("2024-02-01");
        form.category = Category::Transport;
        form.amount_input = form.amount_input.clone().content("3.25");

        let input = form.to_input().unwrap();
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(input.category, Category::Transport);
        assert_eq!(input.amount.cents(), 325);
    }

    #[test]
    fn test_to_input_reports_bad_date() {
        let mut form = ExpenseFormState::new();
        form.date_input = form.date_input.clone().content("31/31/2024");
        form.amount_input = form.amount_input.clone().content("1");

        let err = form.to_input().unwrap_err();
        assert!(err.contains("Invalid date"));
    }
}
