// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Areas of the dashboard screen.
///
/// Computed once per frame so every widget draws into a fixed region.
pub struct DashboardLayout {
    pub header: Rect,
    pub scan_form: Rect,
    pub scan_output: Rect,
    pub stats: Rect,
    pub history: Rect,
    pub footer: Rect,
}

/// Splits the terminal into the dashboard regions.
///
/// The header and footer take the top and bottom rows. The middle is split
/// horizontally: the scan form and its output on the left, the stats cards
/// and history table on the right.
///
/// # Arguments
/// * `frame_size` - The `Rect` representing the total size of the terminal frame.
///
/// # Returns
/// A `DashboardLayout` with the `Rect` for each widget area.
pub fn create_dashboard_layout(frame_size: Rect) -> DashboardLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(content_chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(content_chunks[1]);

    DashboardLayout {
        header: main_chunks[0],
        scan_form: left[0],
        scan_output: left[1],
        stats: right[0],
        history: right[1],
        footer: main_chunks[2],
    }
}

/// Areas of an authentication screen: header, the centered form and the footer.
pub struct AuthLayout {
    pub header: Rect,
    pub form: Rect,
    pub footer: Rect,
}

pub fn create_auth_layout(frame_size: Rect, field_count: u16) -> AuthLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(frame_size);

    // Each field is a 3-row input plus one hint row; the block adds a border.
    let form_height = field_count * 4 + 2;
    let form = centered_fixed(60, form_height, main_chunks[1]);

    AuthLayout { header: main_chunks[0], form, footer: main_chunks[2] }
}

/// Helper to create a centered rectangle for a popup.
///
/// # Arguments
/// * `percent_x` - The desired width of the popup as a percentage of the parent area.
/// * `percent_y` - The desired height of the popup as a percentage of the parent area.
/// * `r` - The parent `Rect` to center the new area within.
///
/// # Returns
/// A new `Rect` that is centered within `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Centered rectangle with a fixed height, clamped to the parent.
fn centered_fixed(percent_x: u16, height: u16, r: Rect) -> Rect {
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)])
        .split(r);
    centered_rect(percent_x, 100, vertical[1])
}
