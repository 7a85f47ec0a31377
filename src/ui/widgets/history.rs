// src/ui/widgets/history.rs

use crate::app::{App, DashboardFocus};
use crate::core::models::{RiskLevel, ScanRecord};
use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};
use rust_i18n::t;

pub fn risk_level_color(risk: Option<&RiskLevel>) -> Color {
    match risk {
        Some(RiskLevel::High) => Color::Red,
        Some(RiskLevel::Medium) => Color::Yellow,
        Some(RiskLevel::Low) => Color::Green,
        Some(RiskLevel::Safe) => Color::Cyan,
        _ => Color::Gray,
    }
}

fn record_row(record: &ScanRecord) -> Row<'static> {
    let ports = record.open_ports();
    let ports_cell = if ports.is_empty() {
        "-".to_string()
    } else {
        ports.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",")
    };
    let risk = record.risk_level();
    Row::new(vec![
        Cell::from(record.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()),
        Cell::from(record.target.clone()),
        Cell::from(record.mode.to_string().to_uppercase()),
        Cell::from(ports_cell),
        Cell::from(risk.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()))
            .style(Style::default().fg(risk_level_color(risk))),
    ])
}

/// Search bar plus the filtered history table.
pub fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let searching = app.focus == DashboardFocus::Search;
    let search_style = if searching { Style::default().fg(Color::Yellow) } else { Style::default() };
    let search = Paragraph::new(app.history_search.clone()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(search_style)
            .title(t!("ui.history.search", scope = app.history_scope).into_owned()),
    );
    frame.render_widget(search, chunks[0]);
    if searching {
        let x = chunks[0].x + app.history_search.chars().count() as u16 + 1;
        frame.set_cursor_position(Position::new(x, chunks[0].y + 1));
    }

    let records = app.filtered_history();
    let count = records.len();
    let rows: Vec<Row<'static>> = records.into_iter().map(record_row).collect();

    let focused = app.focus == DashboardFocus::History;
    let border_style = if focused { Style::default().fg(Color::Yellow) } else { Style::default() };
    let header = Row::new(vec![
        t!("ui.history.date").into_owned(),
        t!("ui.history.target").into_owned(),
        t!("ui.history.mode").into_owned(),
        t!("ui.history.ports").into_owned(),
        t!("ui.history.risk").into_owned(),
    ])
    .style(Style::new().bold().fg(Color::Cyan));

    let title = t!("ui.history.title", shown = count, total = app.history.len()).into_owned();
    let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);

    if count == 0 {
        let empty = Paragraph::new(t!("ui.history.empty").into_owned())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(15),
            Constraint::Length(5),
            Constraint::Min(10),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::new().reversed())
    .highlight_symbol("» ");
    frame.render_stateful_widget(table, chunks[1], &mut app.history_state);
}
