// src/ui/widgets/notifications.rs

use crate::app::App;
use crate::ui::widgets::popup::kind_color;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 3;

/// Stacks the visible notifications in the top-right corner, newest on top.
pub fn render_notifications(frame: &mut Frame, app: &App, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;

    for (row, notification) in app.notifications.visible().iter().rev().enumerate() {
        let y = area.y + 1 + row as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
        let color = kind_color(notification.kind);
        let toast = Paragraph::new(notification.message.clone())
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
        frame.render_widget(Clear, toast_area);
        frame.render_widget(toast, toast_area);
    }
}
