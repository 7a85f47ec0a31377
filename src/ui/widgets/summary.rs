// src/ui/widgets/summary.rs

use crate::app::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use rust_i18n::t;

/// Renders the three dashboard cards: scans today, total scans and threats found.
///
/// The numbers come from the animated counters, so they count up to the
/// current history aggregates after every change.
///
/// # Arguments
/// * `frame` - The `Frame` used for rendering the UI.
/// * `app` - The application state holding the counters.
/// * `area` - The `Rect` defining the drawable area for this widget.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(area);

    let labels = [t!("ui.stats.daily"), t!("ui.stats.total"), t!("ui.stats.threats")];
    let colors = [Color::Cyan, Color::Green, Color::Red];

    for (index, card) in cards.iter().enumerate() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(labels[index].to_string())
            .border_style(Style::default().fg(colors[index]));
        let value = Line::from(app.counters[index].displayed().to_string())
            .style(Style::new().bold().fg(colors[index]));
        frame.render_widget(Paragraph::new(value).alignment(Alignment::Center).block(block), *card);
    }
}
