// src/ui/widgets/popup.rs

use crate::app::{App, Dialog};
use crate::core::feedback::FeedbackKind;
use crate::core::models::ScanRecord;
use crate::ui::layout::centered_rect;
use crate::ui::widgets::scan_output::port_lines;
use chrono::Local;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use rust_i18n::t;
use std::time::Instant;

pub fn kind_color(kind: FeedbackKind) -> Color {
    match kind {
        FeedbackKind::Info => Color::Cyan,
        FeedbackKind::Success => Color::Green,
        FeedbackKind::Warning => Color::Yellow,
        FeedbackKind::Error => Color::Red,
    }
}

/// Draws `text` in a bordered box over the existing UI.
///
/// `Clear` wipes the popup area first so the background does not bleed through.
fn render_popup(frame: &mut Frame, title: String, text: Text, color: Color, percent: (u16, u16), area: Rect) {
    let popup_area = centered_rect(percent.0, percent.1, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let popup = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

fn key_hint(key: &str, label: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(key.to_string(), Style::new().bold().fg(Color::Yellow)),
        Span::raw(format!(" {label}")),
    ])
}

fn details_text(record: &ScanRecord) -> Text<'static> {
    let field = |label: String, value: String| {
        Line::from(vec![Span::styled(format!("{label:<12}"), Style::new().bold()), Span::raw(value)])
    };
    let mut lines = vec![
        field(t!("ui.details.id").into_owned(), record.id.clone()),
        field(t!("ui.details.target").into_owned(), record.target.clone()),
        field(t!("ui.details.mode").into_owned(), record.mode.to_string().to_uppercase()),
        field(t!("ui.details.traversal").into_owned(), record.traversal.to_string().to_uppercase()),
        field(t!("ui.details.threads").into_owned(), record.threads.to_string()),
        field(
            t!("ui.details.started").into_owned(),
            record.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        field(t!("ui.details.status").into_owned(), record.status_label().to_string()),
        Line::from(""),
    ];
    if let Some(results) = record.results() {
        lines.extend(results.lines().map(|l| Line::from(l.to_string())));
    }
    if !record.open_ports().is_empty() {
        lines.push(Line::from(""));
        lines.extend(port_lines(record));
    }
    lines.push(Line::from(""));
    lines.push(key_hint("[E]", t!("ui.details.export").into_owned()));
    lines.push(key_hint("[D]", t!("ui.details.delete").into_owned()));
    lines.push(key_hint("[Esc]", t!("ui.details.close").into_owned()));
    Text::from(lines)
}

/// Renders the open dashboard dialog, if any.
pub fn render_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = &app.dialog else {
        return;
    };
    let confirm = |message: String| {
        Text::from(vec![
            Line::from(message),
            Line::from(""),
            Line::from(vec![
                Span::styled("[Y]", Style::new().bold().fg(Color::Yellow)),
                Span::raw(format!(" {}   ", t!("ui.confirm.accept"))),
                Span::styled("[N]", Style::new().bold().fg(Color::Yellow)),
                Span::raw(format!(" {}", t!("ui.confirm.decline"))),
            ]),
        ])
    };

    match dialog {
        Dialog::ScanDetails(id) => {
            if let Some(record) = app.history.get(id) {
                render_popup(frame, t!("ui.details.title").into_owned(), details_text(record), Color::Cyan, (60, 70), area);
            }
        }
        Dialog::ConfirmDelete(id) => {
            let target = app.history.get(id).map(|r| r.target.clone()).unwrap_or_default();
            let text = confirm(t!("ui.confirm.delete", target = target).into_owned());
            render_popup(frame, t!("ui.confirm.title").into_owned(), text, Color::Red, (50, 25), area);
        }
        Dialog::ConfirmClear => {
            let text = confirm(t!("ui.confirm.clear", count = app.history.len()).into_owned());
            render_popup(frame, t!("ui.confirm.title").into_owned(), text, Color::Red, (50, 25), area);
        }
        Dialog::ConfirmLogout => {
            let text = confirm(t!("ui.confirm.logout").into_owned());
            render_popup(frame, t!("ui.confirm.title").into_owned(), text, Color::Yellow, (50, 25), area);
        }
    }
}

/// Renders the feedback modal with its countdown.
pub fn render_modal(frame: &mut Frame, app: &App, area: Rect) {
    let Some(modal) = app.modals.active() else {
        return;
    };
    let color = kind_color(modal.kind);
    let seconds = modal.seconds_left(Instant::now());
    let text = Text::from(vec![
        Line::from(modal.message.clone()),
        Line::from(""),
        Line::from(t!("ui.modal.countdown", seconds = seconds).into_owned()).style(Style::default().fg(Color::DarkGray)),
        key_hint("[Enter]", t!("ui.modal.close").into_owned()),
    ])
    .alignment(Alignment::Center);
    render_popup(frame, modal.title.clone(), text, color, (50, 30), area);
}
