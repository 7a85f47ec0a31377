// src/ui/widgets/scan_form.rs

use crate::app::{mode_label, traversal_label, App, DashboardFocus};
use crate::ui::widgets::input::{render_input, InputField};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use rust_i18n::t;

/// Target, mode, traversal and thread fields of the scan form.
pub fn render_scan_form(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(t!("ui.scan.title").into_owned());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);
    let options = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let target_title = t!("ui.scan.target").into_owned();
    render_input(
        frame,
        &InputField {
            title: &target_title,
            value: &app.scan_form.target,
            focused: app.focus == DashboardFocus::Target,
            masked: false,
        },
        Color::Gray,
        rows[0],
    );

    render_option(
        frame,
        &t!("ui.scan.mode"),
        &mode_label(app.scan_form.mode),
        app.focus == DashboardFocus::Mode,
        options[0],
    );
    render_option(
        frame,
        &t!("ui.scan.traversal"),
        &traversal_label(app.scan_form.traversal),
        app.focus == DashboardFocus::Traversal,
        options[1],
    );

    let threads_title = t!("ui.scan.threads").into_owned();
    render_input(
        frame,
        &InputField {
            title: &threads_title,
            value: &app.scan_form.threads,
            focused: app.focus == DashboardFocus::Threads,
            masked: false,
        },
        Color::Gray,
        rows[2],
    );
}

/// A cycling selector, drawn as `◀ VALUE ▶`.
fn render_option(frame: &mut Frame, title: &str, value: &str, focused: bool, area: Rect) {
    let style = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let block = Block::default().borders(Borders::ALL).title(title.to_string()).border_style(style);
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::new().bold()),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center).block(block), area);
}
