// src/ui/mod.rs

use crate::app::{App, AuthForm, Screen};
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    match app.screen {
        Screen::Dashboard => render_dashboard(app, frame, area),
        screen => {
            let layout = layout::create_auth_layout(area, AuthForm::fields(screen).len() as u16);
            widgets::header::render_header(frame, app, layout.header);
            widgets::auth_form::render_auth_form(frame, app, layout.form);
            widgets::footer::render_footer(frame, app, layout.footer);
        }
    }

    // Overlays, drawn last so they sit above everything else.
    widgets::notifications::render_notifications(frame, app, area);
    widgets::popup::render_modal(frame, app, area);
}

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let layout = layout::create_dashboard_layout(area);

    widgets::header::render_header(frame, app, layout.header);
    widgets::scan_form::render_scan_form(frame, app, layout.scan_form);
    widgets::scan_output::render_scan_output(frame, app, layout.scan_output);
    widgets::summary::render_summary(frame, app, layout.stats);
    widgets::history::render_history(frame, app, layout.history);
    widgets::footer::render_footer(frame, app, layout.footer);
    widgets::popup::render_dialog(frame, app, area);
}
