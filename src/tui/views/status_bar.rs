//! Status bar view
//!
//! Shows the running total, unreadable-row warnings, the latest status
//! message and key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Total: ", Style::default().fg(Color::White)),
        Span::styled(
            app.dashboard
                .total()
                .format_with_symbol(&app.settings.currency_symbol),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(
            format!("{} expense(s)", app.dashboard.expenses.len()),
            Style::default().fg(Color::Cyan),
        ),
    ];

    if !app.rejected.is_empty() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!(
                "{} unreadable row(s), see `budget check`",
                app.rejected.len()
            ),
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let hints = " a:Add  1/2:View  r:Reload  ?:Help  q:Quit ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());

    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
