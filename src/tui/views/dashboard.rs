//! Dashboard view
//!
//! Totals header, a bar chart of spending per month (chronological) and a
//! horizontal breakdown by category.

use ratatui::{
    layout::{Alignment, Direction, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use crate::display::report::format_percentage;
use crate::reports::{CategoryReport, MonthlyReport};
use crate::tui::app::App;
use crate::tui::layout::DashboardLayout;

const MONTH_BAR_WIDTH: u16 = 9;
const MONTH_BAR_GAP: u16 = 1;

/// Render the dashboard view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    if let Some(error) = &app.load_error {
        let text = Paragraph::new(format!("Could not load expenses: {}", error))
            .block(titled_block(" Dashboard ", Color::Red))
            .style(Style::default().fg(Color::Red));
        frame.render_widget(text, area);
        return;
    }

    if app.dashboard.is_empty() {
        let text = Paragraph::new("No expenses yet. Press 'a' to add your first one.")
            .block(titled_block(" Dashboard ", Color::Cyan))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    let layout = DashboardLayout::new(area);
    let currency = app.settings.currency_symbol.as_str();

    render_summary(frame, app, layout.summary, currency);
    render_monthly(frame, &app.dashboard.monthly, layout.monthly, currency);
    render_categories(frame, &app.dashboard.categories, layout.categories, currency);
}

fn titled_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

fn render_summary(frame: &mut Frame, app: &App, area: Rect, currency: &str) {
    let dashboard = &app.dashboard;
    let label = Style::default().fg(Color::White);
    let value = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(" Total spent: ", label),
        Span::styled(dashboard.total().format_with_symbol(currency), value),
        Span::raw("  │  "),
        Span::styled(format!("{} expense(s)", dashboard.expenses.len()), label),
        Span::raw("  │  "),
        Span::styled("Monthly average: ", label),
        Span::styled(dashboard.monthly.average().format_with_symbol(currency), value),
    ];
    if let Some((first, last)) = dashboard.expenses.date_range() {
        spans.push(Span::raw("  │  "));
        spans.push(Span::styled(
            format!("{} to {}", first, last),
            Style::default().fg(Color::Cyan),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

/// Number of month bars that fit in `width` columns of chart interior
fn visible_months(width: u16) -> usize {
    let slot = MONTH_BAR_WIDTH + MONTH_BAR_GAP;
    usize::from((width + MONTH_BAR_GAP) / slot).max(1)
}

fn render_monthly(frame: &mut Frame, report: &MonthlyReport, area: Rect, currency: &str) {
    let inner_width = area.width.saturating_sub(2);
    let shown = visible_months(inner_width).min(report.rows.len());
    let rows = &report.rows[report.rows.len() - shown..];

    let title = if shown < report.rows.len() {
        format!(" Spending by Month (last {} of {}) ", shown, report.rows.len())
    } else {
        " Spending by Month ".to_string()
    };

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(row.total.cents().max(0) as u64)
                .text_value(compact_amount(row.total.dollars(), currency))
                .label(Line::from(row.month.short_label()))
                .style(Style::default().fg(Color::Cyan))
                .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(&title, Color::Cyan))
        .data(BarGroup::default().bars(&bars))
        .bar_width(MONTH_BAR_WIDTH)
        .bar_gap(MONTH_BAR_GAP)
        .max(report.max_total().cents().max(1) as u64);

    frame.render_widget(chart, area);
}

fn render_categories(frame: &mut Frame, report: &CategoryReport, area: Rect, currency: &str) {
    // one bar per line plus a gap, inside the border
    let capacity = usize::from(area.height.saturating_sub(2) / 2).max(1);
    let rows = report.top(capacity);
    let max = rows
        .iter()
        .map(|row| row.total.cents())
        .max()
        .unwrap_or(0)
        .max(1) as u64;

    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(row.total.cents().max(0) as u64)
                .text_value(format!(
                    "{} ({})",
                    row.total.format_with_symbol(currency),
                    format_percentage(row.percentage)
                ))
                .label(Line::from(row.category.clone()))
                .style(Style::default().fg(Color::Green))
                .value_style(Style::default().fg(Color::Black).bg(Color::Green))
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block(" Spending by Category ", Color::Green))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .max(max);

    frame.render_widget(chart, area);
}

/// Whole-unit amount that fits under a narrow bar, e.g. "$1.2k"
fn compact_amount(whole_units: i64, currency: &str) -> String {
    if whole_units.abs() >= 1_000_000 {
        format!("{}{:.1}M", currency, whole_units as f64 / 1_000_000.0)
    } else if whole_units.abs() >= 10_000 {
        format!("{}{}k", currency, whole_units / 1000)
    } else if whole_units.abs() >= 1000 {
        format!("{}{:.1}k", currency, whole_units as f64 / 1000.0)
    } else {
        format!("{}{}", currency, whole_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_months() {
        assert_eq!(visible_months(0), 1);
        assert_eq!(visible_months(9), 1);
        assert_eq!(visible_months(19), 2);
        assert_eq!(visible_months(70), 7);
    }

    #[test]
    fn test_compact_amount() {
        assert_eq!(compact_amount(920, "$"), "$920");
        assert_eq!(compact_amount(1300, "$"), "$1.3k");
        assert_eq!(compact_amount(45_000, "$"), "$45k");
        assert_eq!(compact_amount(2_500_000, "€"), "€2.5M");
    }
}
