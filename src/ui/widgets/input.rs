// src/ui/widgets/input.rs

use crate::core::validation::{FieldStatus, FieldValidation, PasswordStrength};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// One labelled text field.
pub struct InputField<'a> {
    pub title: &'a str,
    pub value: &'a str,
    pub focused: bool,
    /// Renders the value as bullets.
    pub masked: bool,
}

pub fn status_color(status: FieldStatus) -> Color {
    match status {
        FieldStatus::Neutral => Color::Gray,
        FieldStatus::Error => Color::Red,
        FieldStatus::Warning => Color::Yellow,
        FieldStatus::Success => Color::Green,
    }
}

/// Renders the input box and places the cursor in it when focused.
pub fn render_input(frame: &mut Frame, field: &InputField, border: Color, area: Rect) {
    let shown = if field.masked {
        "•".repeat(field.value.chars().count())
    } else {
        field.value.to_string()
    };
    let border_style = if field.focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(border)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .title(field.title)
        .border_style(border_style);
    let input_paragraph = Paragraph::new(shown.clone())
        .block(input_block)
        .style(Style::default().fg(Color::White));
    frame.render_widget(input_paragraph, area);

    if field.focused {
        frame.set_cursor_position(Position::new(area.x + shown.chars().count() as u16 + 1, area.y + 1));
    }
}

/// The hint line under a field: validation message plus a strength meter for passwords.
pub fn render_hint(frame: &mut Frame, validation: &FieldValidation, area: Rect) {
    let color = status_color(validation.status);
    let mut spans = Vec::new();
    if let Some(strength) = validation.strength {
        let filled = match strength {
            PasswordStrength::Weak => 1,
            PasswordStrength::Fair => 2,
            PasswordStrength::Good => 3,
            PasswordStrength::Strong => 4,
        };
        spans.push(Span::styled("■".repeat(filled), Style::default().fg(color)));
        spans.push(Span::styled("□".repeat(4 - filled), Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(validation.message.clone(), Style::default().fg(color)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
