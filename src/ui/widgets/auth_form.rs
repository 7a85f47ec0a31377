// src/ui/widgets/auth_form.rs

use crate::app::{App, AuthField, AuthForm, Screen};
use crate::ui::widgets::input::{render_hint, render_input, status_color, InputField};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders},
};
use rust_i18n::t;

fn field_title(field: AuthField) -> String {
    match field {
        AuthField::Email => t!("ui.auth.email"),
        AuthField::Username => t!("ui.auth.username"),
        AuthField::Password => t!("ui.auth.password"),
        AuthField::Confirm => t!("ui.auth.confirm"),
    }
    .into_owned()
}

fn form_title(screen: Screen) -> String {
    match screen {
        Screen::Register => t!("ui.auth.register_title"),
        Screen::ForgotPassword => t!("ui.auth.forgot_title"),
        _ => t!("ui.auth.login_title"),
    }
    .into_owned()
}

/// Renders the login, register or forgot-password form with live validation.
pub fn render_auth_form(frame: &mut Frame, app: &App, area: Rect) {
    let screen = app.screen;
    let mut title = form_title(screen);
    if app.auth.submitting {
        title = format!("{title} · {}", t!("ui.auth.submitting"));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = AuthForm::fields(screen);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(fields.iter().flat_map(|_| [Constraint::Length(3), Constraint::Length(1)]))
        .split(inner);

    for (index, field) in fields.iter().enumerate() {
        let validation = app.auth.validation(screen, *field);
        let title = field_title(*field);
        let input = InputField {
            title: &title,
            value: app.auth.value(*field),
            focused: app.auth.focus == index,
            masked: matches!(field, AuthField::Password | AuthField::Confirm),
        };
        render_input(frame, &input, status_color(validation.status), rows[index * 2]);
        render_hint(frame, &validation, rows[index * 2 + 1]);
    }
}
