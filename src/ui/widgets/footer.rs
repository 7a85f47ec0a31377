// src/ui/widgets/footer.rs

use crate::app::{App, DashboardFocus, Screen};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use rust_i18n::t;

fn hints(pairs: &[(&str, String)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, (key, label)) in pairs.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!("[{key}]"), Style::new().bold().fg(Color::Yellow)));
        spans.push(Span::raw(format!(" {label}")));
    }
    Line::from(spans)
}

/// Renders the footer with the keys available on the current screen.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match app.screen {
        Screen::Login => hints(&[
            ("Enter", t!("ui.footer.login").into_owned()),
            ("F2", t!("ui.footer.register").into_owned()),
            ("F3", t!("ui.footer.forgot").into_owned()),
            ("Esc", t!("ui.footer.quit").into_owned()),
        ]),
        Screen::Register | Screen::ForgotPassword => hints(&[
            ("Enter", t!("ui.footer.submit").into_owned()),
            ("Tab", t!("ui.footer.next_field").into_owned()),
            ("Esc", t!("ui.footer.back").into_owned()),
        ]),
        Screen::Dashboard if app.is_scanning() => Line::from(t!("ui.footer.scanning").into_owned()),
        Screen::Dashboard => match app.focus {
            DashboardFocus::History => hints(&[
                ("↑↓", t!("ui.footer.select").into_owned()),
                ("Enter", t!("ui.footer.details").into_owned()),
                ("/", t!("ui.footer.search").into_owned()),
                ("S", t!("ui.footer.scope").into_owned()),
                ("D", t!("ui.footer.delete").into_owned()),
                ("C", t!("ui.footer.clear").into_owned()),
                ("E", t!("ui.footer.export").into_owned()),
                ("N", t!("ui.footer.new_scan").into_owned()),
                ("Q", t!("ui.footer.quit").into_owned()),
            ]),
            DashboardFocus::Search => hints(&[("Enter", t!("ui.footer.done").into_owned())]),
            _ => hints(&[
                ("Enter", t!("ui.footer.scan").into_owned()),
                ("Tab", t!("ui.footer.next_field").into_owned()),
                ("←→", t!("ui.footer.change").into_owned()),
                ("Ctrl+L", t!("ui.footer.logout").into_owned()),
            ]),
        },
    };

    let footer = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
