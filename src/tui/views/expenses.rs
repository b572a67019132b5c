//! Expenses view
//!
//! Every loaded expense, newest first, with a movable selection.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::report::truncate;
use crate::tui::app::App;

/// Render the expenses view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" Expenses ({}) ", app.rows.len()))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.rows.is_empty() {
        let text = Paragraph::new("No expenses yet. Press 'a' to add your first one.")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Min(15),    // Category
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("Date").style(bold),
        Cell::from("Category").style(bold),
        Cell::from("Amount").style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .bottom_margin(1);

    let currency = &app.settings.currency_symbol;
    let date_format = &app.settings.date_format;
    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|expense| {
            Row::new(vec![
                Cell::from(expense.date.format(date_format).to_string()),
                Cell::from(truncate(&expense.category, 30)),
                Cell::from(format!(
                    "{:>12}",
                    expense.amount.format_with_symbol(currency)
                ))
                .style(Style::default().fg(Color::Green)),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
