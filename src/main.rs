// src/main.rs

use color_eyre::eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use sena_console::app::{App, AppEvent, DashboardFocus, Dialog, Screen, SharedStorage};
use sena_console::config::Config;
use sena_console::core::storage::FileStore;
use sena_console::{logging, ui};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load(&logging::get_config_dir())?;
    let data_dir = config.data_dir.clone().unwrap_or_else(logging::get_data_dir);
    logging::initialize_logging(&data_dir)?;
    rust_i18n::set_locale(&config.locale);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        api_url = %config.api_url,
        locale = %config.locale,
        data_dir = %data_dir.display(),
        "SENA console started."
    );

    let storage: SharedStorage = Arc::new(FileStore::new(data_dir));
    let (tx, mut rx) = mpsc::channel(16);
    let mut app = App::new(&config, storage, logging::get_download_dir(), tx)?;

    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app, &mut rx);

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    info!("SENA console stopped.");
    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(50))? {
            handle_events(app)?;
        }

        while let Ok(event) = rx.try_recv() {
            app.apply_event(event);
        }
        app.on_tick(Instant::now());
    }
    Ok(())
}

fn handle_events(app: &mut App) -> Result<()> {
    let Event::Key(key) = event::read()? else {
        return Ok(());
    };
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return Ok(());
    }

    // A feedback modal takes every key until it is closed.
    if app.modals.is_open() {
        match key.code {
            KeyCode::Enter => {
                if let Some(redirect) = app.modals.dismiss() {
                    app.follow(redirect);
                }
            }
            KeyCode::Esc => app.modals.cancel(),
            _ => {}
        }
        return Ok(());
    }

    match app.screen {
        Screen::Dashboard => match app.dialog.clone() {
            Some(dialog) => handle_dialog_input(app, &dialog, key.code),
            None => handle_dashboard_input(app, key),
        },
        _ => handle_auth_input(app, key.code),
    }
    Ok(())
}

/// Login, register and forgot-password screens.
fn handle_auth_input(app: &mut App, key_code: KeyCode) {
    let screen = app.screen;
    match key_code {
        KeyCode::Esc if screen == Screen::Login => app.quit(),
        KeyCode::Esc => app.go_to(Screen::Login),
        KeyCode::F(2) if screen == Screen::Login => app.go_to(Screen::Register),
        KeyCode::F(3) if screen == Screen::Login => app.go_to(Screen::ForgotPassword),
        KeyCode::Tab | KeyCode::Down => app.auth.next_field(screen),
        KeyCode::BackTab | KeyCode::Up => app.auth.previous_field(screen),
        KeyCode::Enter => app.submit_auth(),
        KeyCode::Backspace => app.auth.backspace(screen),
        KeyCode::Char(c) => app.auth.input(screen, c),
        _ => {}
    }
}

fn handle_dialog_input(app: &mut App, dialog: &Dialog, key_code: KeyCode) {
    match dialog {
        Dialog::ScanDetails(_) => match key_code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_dialog(),
            KeyCode::Char('e') => app.export_selected(),
            KeyCode::Char('d') => app.request_delete(),
            _ => {}
        },
        _ => match key_code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_dialog(),
            KeyCode::Char('n') | KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
    }
}

fn handle_dashboard_input(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('l') => app.request_logout(),
            KeyCode::Char('x') => app.notifications.dismiss_latest(),
            _ => {}
        }
        return;
    }
    if key.code == KeyCode::Tab {
        app.next_focus();
        return;
    }

    match app.focus {
        DashboardFocus::Target => match key.code {
            KeyCode::Enter => app.start_scan(),
            KeyCode::Backspace => {
                app.scan_form.target.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => app.scan_form.target.push(c),
            KeyCode::Esc => app.focus = DashboardFocus::History,
            _ => {}
        },
        DashboardFocus::Threads => match key.code {
            KeyCode::Enter => app.start_scan(),
            KeyCode::Backspace => {
                app.scan_form.threads.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() => app.scan_form.threads.push(c),
            KeyCode::Esc => app.focus = DashboardFocus::History,
            _ => {}
        },
        DashboardFocus::Mode => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => app.cycle_mode(),
            KeyCode::Enter => app.start_scan(),
            _ => {}
        },
        DashboardFocus::Traversal => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => app.cycle_traversal(),
            KeyCode::Enter => app.start_scan(),
            _ => {}
        },
        DashboardFocus::Search => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.focus = DashboardFocus::History,
            KeyCode::Backspace => {
                app.history_search.pop();
                app.history_state.select(None);
            }
            KeyCode::Char(c) => {
                app.history_search.push(c);
                app.history_state.select(None);
            }
            _ => {}
        },
        DashboardFocus::History => match key.code {
            KeyCode::Char('q') => app.quit(),
            KeyCode::Up => app.select_previous(),
            KeyCode::Down => app.select_next(),
            KeyCode::Enter => app.open_details(),
            KeyCode::Char('/') => app.focus = DashboardFocus::Search,
            KeyCode::Char('s') => app.cycle_scope(),
            KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
            KeyCode::Char('c') => app.request_clear(),
            KeyCode::Char('e') => app.export_selected(),
            KeyCode::Char('n') => app.focus = DashboardFocus::Target,
            _ => {}
        },
    }
}
