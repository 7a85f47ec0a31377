// src/ui/widgets/header.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use rust_i18n::t;

/// Title bar with the typing banner and, once logged in, the current user.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" SENA ", Style::new().bold().fg(Color::Black).bg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(app.typing.text(), Style::default().fg(Color::Cyan)),
        Span::styled("▌", Style::default().fg(Color::Cyan).add_modifier(Modifier::SLOW_BLINK)),
    ];
    if let Some(session) = &app.session {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            t!("ui.header.user", username = session.username).into_owned(),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}
