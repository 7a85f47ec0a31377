// src/ui/widgets/scan_output.rs

use crate::app::{App, SPINNER_CHARS};
use crate::core::knowledge_base::{self, PortRisk};
use crate::core::models::{ScanOutcome, ScanRecord};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rust_i18n::t;

pub fn risk_color(risk: PortRisk) -> Color {
    match risk {
        PortRisk::High => Color::Red,
        PortRisk::Medium => Color::Yellow,
        PortRisk::Low => Color::Green,
    }
}

/// One line per open port: number, service name and risk group.
pub fn port_lines(record: &ScanRecord) -> Vec<Line<'static>> {
    record
        .open_ports()
        .iter()
        .map(|port| {
            let risk = knowledge_base::port_risk(*port);
            Line::from(vec![
                Span::styled(format!("{port:>5}/tcp "), Style::new().bold()),
                Span::raw(format!("{:<14}", knowledge_base::service_name(*port))),
                Span::styled(risk.to_string(), Style::default().fg(risk_color(risk))),
            ])
        })
        .collect()
}

/// The output panel: a spinner while a scan runs, otherwise the last result text
/// followed by the open ports of the newest record.
pub fn render_scan_output(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(t!("ui.output.title").into_owned());

    if app.is_scanning() {
        let spinner_char = SPINNER_CHARS[app.spinner_frame % SPINNER_CHARS.len()];
        let content = Paragraph::new(Line::from(vec![
            Span::styled(format!("{spinner_char} "), Style::default().fg(Color::Cyan)),
            Span::raw(app.scan_output.clone()),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(content.block(block), area);
        return;
    }

    if app.scan_output.is_empty() {
        let placeholder = Paragraph::new(t!("ui.output.placeholder").into_owned())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(placeholder.block(block), area);
        return;
    }

    let mut lines: Vec<Line> = app.scan_output.lines().map(|l| Line::from(l.to_string())).collect();
    if let Some(latest) = app.history.records().first() {
        if matches!(latest.outcome, ScanOutcome::Completed { .. }) && !latest.open_ports().is_empty() {
            lines.push(Line::from(""));
            lines.extend(port_lines(latest));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}
