// src/app.rs

use crate::config::Config;
use crate::core::animation::{Counter, TypingEffect, TYPING_MESSAGES};
use crate::core::errors::{ClientError, ExportError};
use crate::core::feedback::{FeedbackKind, ModalController, NotificationController, Redirect};
use crate::core::history::ScanHistoryStore;
use crate::core::models::{DateScope, HistoryStats, ScanMode, ScanRecord, Traversal};
use crate::core::remote::{LoginResponse, MessageResponse, RemoteScanClient};
use crate::core::scan::{self, ScanDispatcher, ScanForm};
use crate::core::session::{SessionStore, UserSession};
use crate::core::storage::KeyValueStore;
use crate::core::validation::{
    self, validate_email, validate_login_password, validate_password_confirmation, validate_password_strength,
    validate_username, FieldStatus, FieldValidation,
};
use ratatui::widgets::TableState;
use rust_i18n::t;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use strum::IntoEnumIterator;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

pub const SPINNER_CHARS: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub type SharedStorage = Arc<dyn KeyValueStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    ForgotPassword,
    Dashboard,
}

/// Results of background requests, delivered back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    ScanFinished(ScanRecord),
    LoginFinished { email: String, result: Result<LoginResponse, ClientError> },
    RegisterFinished(Result<MessageResponse, ClientError>),
    ForgotPasswordFinished(Result<MessageResponse, ClientError>),
    LogoutFinished(Result<(), ClientError>),
    ExportFinished(Result<PathBuf, ExportError>),
}

// --- Auth Forms ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthField {
    Email,
    Username,
    Password,
    Confirm,
}

#[derive(Debug, Default)]
pub struct AuthForm {
    pub email: String,
    pub username: String,
    pub password: String,
    pub confirm: String,
    pub focus: usize,
    /// Errors reported by the backend, shown until the field is edited.
    pub field_errors: HashMap<AuthField, String>,
    pub submitting: bool,
}

impl AuthForm {
    pub fn fields(screen: Screen) -> &'static [AuthField] {
        match screen {
            Screen::Login => &[AuthField::Email, AuthField::Password],
            Screen::Register => &[AuthField::Email, AuthField::Username, AuthField::Password, AuthField::Confirm],
            Screen::ForgotPassword => &[AuthField::Email],
            Screen::Dashboard => &[],
        }
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Email => &self.email,
            AuthField::Username => &self.username,
            AuthField::Password => &self.password,
            AuthField::Confirm => &self.confirm,
        }
    }

    fn value_mut(&mut self, field: AuthField) -> &mut String {
        match field {
            AuthField::Email => &mut self.email,
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
            AuthField::Confirm => &mut self.confirm,
        }
    }

    pub fn focused_field(&self, screen: Screen) -> Option<AuthField> {
        Self::fields(screen).get(self.focus).copied()
    }

    pub fn validation(&self, screen: Screen, field: AuthField) -> FieldValidation {
        if let Some(message) = self.field_errors.get(&field) {
            return FieldValidation { status: FieldStatus::Error, message: message.clone(), strength: None };
        }
        match (screen, field) {
            (_, AuthField::Email) => validate_email(&self.email),
            (_, AuthField::Username) => validate_username(&self.username),
            (Screen::Register, AuthField::Password) => validate_password_strength(&self.password),
            (_, AuthField::Password) => validate_login_password(&self.password),
            (_, AuthField::Confirm) => validate_password_confirmation(&self.password, &self.confirm),
        }
    }

    /// Login only needs both fields filled; the other forms need every check green.
    pub fn is_submittable(&self, screen: Screen) -> bool {
        match screen {
            Screen::Login => !self.email.trim().is_empty() && !self.password.trim().is_empty(),
            _ => Self::fields(screen).iter().all(|f| self.validation(screen, *f).is_ok()),
        }
    }

    pub fn input(&mut self, screen: Screen, c: char) {
        if let Some(field) = self.focused_field(screen) {
            self.field_errors.remove(&field);
            self.value_mut(field).push(c);
        }
    }

    pub fn backspace(&mut self, screen: Screen) {
        if let Some(field) = self.focused_field(screen) {
            self.field_errors.remove(&field);
            self.value_mut(field).pop();
        }
    }

    pub fn next_field(&mut self, screen: Screen) {
        let count = Self::fields(screen).len().max(1);
        self.focus = (self.focus + 1) % count;
    }

    pub fn previous_field(&mut self, screen: Screen) {
        let count = Self::fields(screen).len().max(1);
        self.focus = (self.focus + count - 1) % count;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Field a backend error message is about, judged by the words it contains.
pub fn field_for_backend_message(message: &str) -> Option<AuthField> {
    let lower = message.to_lowercase();
    [
        ("email", AuthField::Email),
        ("username", AuthField::Username),
        ("password", AuthField::Password),
    ]
    .into_iter()
    .find(|(keyword, _)| lower.contains(keyword))
    .map(|(_, field)| field)
}

// --- Dashboard ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardFocus {
    Target,
    Mode,
    Traversal,
    Threads,
    History,
    Search,
}

impl DashboardFocus {
    const ORDER: [DashboardFocus; 5] = [
        DashboardFocus::Target,
        DashboardFocus::Mode,
        DashboardFocus::Traversal,
        DashboardFocus::Threads,
        DashboardFocus::History,
    ];

    fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }
}

/// Overlay shown above the dashboard, addressed by record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    ScanDetails(String),
    ConfirmDelete(String),
    ConfirmClear,
    ConfirmLogout,
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub auth: AuthForm,
    pub session: Option<UserSession>,
    pub scan_form: ScanForm,
    pub scan_output: String,
    pub focus: DashboardFocus,
    pub history: ScanHistoryStore<SharedStorage>,
    pub history_search: String,
    pub history_scope: DateScope,
    pub history_state: TableState,
    pub dialog: Option<Dialog>,
    pub modals: ModalController,
    pub notifications: NotificationController,
    pub stats: HistoryStats,
    /// Displayed values of daily scans, total scans and threats found.
    pub counters: [Counter; 3],
    pub typing: TypingEffect,
    pub spinner_frame: usize,
    pub export_dir: PathBuf,
    dispatcher: ScanDispatcher,
    sessions: SessionStore<SharedStorage>,
    client: RemoteScanClient,
    events: mpsc::Sender<AppEvent>,
    history_changes: watch::Receiver<u64>,
}

impl App {
    pub fn new(
        config: &Config,
        storage: SharedStorage,
        export_dir: PathBuf,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ClientError> {
        let client = RemoteScanClient::new(&config.api_url, config.request_timeout())?;
        let now = Instant::now();

        let mut history = ScanHistoryStore::new(storage.clone());
        let history_changes = history.subscribe();
        history.load();

        let sessions = SessionStore::new(storage);
        let session = sessions.load();
        let screen = if session.is_some() { Screen::Dashboard } else { Screen::Login };
        info!(resumed = session.is_some(), "Application state initialized.");

        Ok(Self {
            should_quit: false,
            screen,
            auth: AuthForm::default(),
            session,
            scan_form: ScanForm::default(),
            scan_output: String::new(),
            focus: DashboardFocus::Target,
            history,
            history_search: String::new(),
            history_scope: DateScope::All,
            history_state: TableState::default(),
            dialog: None,
            modals: ModalController::new(),
            notifications: NotificationController::new(),
            stats: HistoryStats::default(),
            counters: [Counter::new(now), Counter::new(now), Counter::new(now)],
            typing: TypingEffect::new(TYPING_MESSAGES, now),
            spinner_frame: 0,
            export_dir,
            dispatcher: ScanDispatcher::new(),
            sessions,
            client,
            events,
            history_changes,
        })
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn is_scanning(&self) -> bool {
        self.dispatcher.is_busy()
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(redirect) = self.modals.tick(now) {
            self.follow(redirect);
        }
        self.notifications.tick(now);
        self.typing.tick(now);

        if self.history_changes.has_changed().unwrap_or(false) {
            self.history_changes.borrow_and_update();
            self.refresh_stats(now);
        }
        for counter in &mut self.counters {
            counter.tick(now);
        }
        if self.is_scanning() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_CHARS.len();
        }
    }

    fn refresh_stats(&mut self, now: Instant) {
        self.stats = self.history.compute_stats();
        let targets = [self.stats.daily_scans, self.stats.total_scans, self.stats.threats_found];
        for (counter, target) in self.counters.iter_mut().zip(targets) {
            counter.set_target(target as u64, now);
        }
        self.clamp_history_selection();
    }

    pub fn follow(&mut self, redirect: Redirect) {
        match redirect {
            Redirect::Login => self.go_to(Screen::Login),
            Redirect::Dashboard => self.go_to(Screen::Dashboard),
        }
    }

    pub fn go_to(&mut self, screen: Screen) {
        debug!(?screen, "Switching screen.");
        self.auth.reset();
        self.dialog = None;
        self.screen = screen;
    }

    pub fn notify(&mut self, kind: FeedbackKind, message: impl Into<String>) {
        self.notifications.push(kind, message, Instant::now());
    }

    // --- Authentication ---

    pub fn submit_auth(&mut self) {
        if self.auth.submitting {
            return;
        }
        let screen = self.screen;
        if !self.auth.is_submittable(screen) {
            self.modals.show(
                FeedbackKind::Error,
                t!("auth.failed_title"),
                t!("auth.fill_required"),
                None,
                Instant::now(),
            );
            return;
        }

        self.auth.submitting = true;
        self.auth.field_errors.clear();
        let client = self.client.clone();
        let tx = self.events.clone();
        let email = self.auth.email.trim().to_string();
        let username = self.auth.username.trim().to_string();
        let password = self.auth.password.clone();

        match screen {
            Screen::Login => {
                tokio::spawn(async move {
                    let result = client.login(&email, &password).await;
                    let _ = tx.send(AppEvent::LoginFinished { email, result }).await;
                });
            }
            Screen::Register => {
                tokio::spawn(async move {
                    let result = client.register(&email, &username, &password).await;
                    let _ = tx.send(AppEvent::RegisterFinished(result)).await;
                });
            }
            Screen::ForgotPassword => {
                tokio::spawn(async move {
                    let result = client.forgot_password(&email).await;
                    let _ = tx.send(AppEvent::ForgotPasswordFinished(result)).await;
                });
            }
            Screen::Dashboard => self.auth.submitting = false,
        }
    }

    /// Shows a failed auth request the way the forms expect: rate limits and
    /// connection problems as modals, field-specific messages inline.
    fn show_auth_error(&mut self, error: ClientError) {
        let now = Instant::now();
        match error {
            ClientError::RateLimited { message } => {
                self.modals.show(FeedbackKind::Error, t!("auth.rate_limited_title"), message, None, now);
            }
            ClientError::Backend { message, .. } => {
                let field = field_for_backend_message(&message)
                    .filter(|f| AuthForm::fields(self.screen).contains(f));
                match field {
                    Some(field) => {
                        self.auth.field_errors.insert(field, message);
                    }
                    None => self.modals.show(FeedbackKind::Error, t!("auth.failed_title"), message, None, now),
                }
            }
            other => {
                warn!(error = %other, "Auth request failed.");
                self.modals.show(
                    FeedbackKind::Error,
                    t!("auth.failed_title"),
                    t!("auth.connection_failed", url = self.client.base_url()),
                    None,
                    now,
                );
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            let client = self.client.clone();
            let tx = self.events.clone();
            tokio::spawn(async move {
                let result = client.logout(&session.token).await;
                let _ = tx.send(AppEvent::LogoutFinished(result)).await;
            });
        }
        self.sessions.clear();
        self.go_to(Screen::Login);
        self.notify(FeedbackKind::Success, t!("auth.logged_out"));
    }

    // --- Scanning ---

    pub fn start_scan(&mut self) {
        let record = match self.dispatcher.begin(&self.scan_form) {
            Ok(record) => record,
            Err(e) => {
                debug!(error = %e, "Scan form rejected.");
                self.notify(FeedbackKind::Error, validation::validation_error_message(&e));
                return;
            }
        };
        self.scan_output = t!("scan.in_flight").into_owned();
        let client = self.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let record = scan::execute_scan(&client, record).await;
            let _ = tx.send(AppEvent::ScanFinished(record)).await;
        });
    }

    /// Applies the terminal record of the in-flight scan. Only completed scans
    /// enter the history.
    pub fn finish_scan(&mut self, record: ScanRecord) {
        self.dispatcher.finish();
        if record.is_completed() {
            self.scan_output = record.results().unwrap_or_default().to_string();
            let selected = self.selected_record_id();
            self.history.append(record);
            self.reselect(selected.as_deref());
            self.notify(FeedbackKind::Success, t!("scan.completed"));
        } else {
            let message = record.error_message().unwrap_or_default().to_string();
            self.scan_output = t!("scan.error_output", message = message).into_owned();
            self.notify(FeedbackKind::Error, t!("scan.failed_notification"));
        }
    }

    pub fn cycle_mode(&mut self) {
        self.scan_form.mode = next_variant(self.scan_form.mode);
    }

    pub fn cycle_traversal(&mut self) {
        self.scan_form.traversal = next_variant(self.scan_form.traversal);
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next();
    }

    // --- History ---

    pub fn filtered_history(&self) -> Vec<&ScanRecord> {
        self.history.filter(&self.history_search, self.history_scope)
    }

    pub fn cycle_scope(&mut self) {
        self.history_scope = next_variant(self.history_scope);
        self.history_state.select(None);
    }

    pub fn selected_record_id(&self) -> Option<String> {
        let index = self.history_state.selected()?;
        self.filtered_history().get(index).map(|r| r.id.clone())
    }

    pub fn select_next(&mut self) {
        let len = self.filtered_history().len();
        if len == 0 {
            self.history_state.select(None);
            return;
        }
        let next = self.history_state.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.history_state.select(Some(next));
    }

    pub fn select_previous(&mut self) {
        let previous = self.history_state.selected().map_or(0, |i| i.saturating_sub(1));
        if !self.filtered_history().is_empty() {
            self.history_state.select(Some(previous));
        }
    }

    /// Points the table selection back at `id` after the history shifted.
    fn reselect(&mut self, id: Option<&str>) {
        let Some(id) = id else { return };
        let index = self.filtered_history().iter().position(|r| r.id == id);
        self.history_state.select(index);
    }

    /// The record a dialog is showing, otherwise the selected table row.
    fn target_record_id(&self) -> Option<String> {
        match &self.dialog {
            Some(Dialog::ScanDetails(id)) => Some(id.clone()),
            _ => self.selected_record_id(),
        }
    }

    fn clamp_history_selection(&mut self) {
        let len = self.filtered_history().len();
        match self.history_state.selected() {
            Some(_) if len == 0 => self.history_state.select(None),
            Some(i) if i >= len => self.history_state.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn open_details(&mut self) {
        if let Some(id) = self.selected_record_id() {
            self.dialog = Some(Dialog::ScanDetails(id));
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.target_record_id() {
            self.dialog = Some(Dialog::ConfirmDelete(id));
        }
    }

    pub fn request_clear(&mut self) {
        if !self.history.is_empty() {
            self.dialog = Some(Dialog::ConfirmClear);
        }
    }

    pub fn request_logout(&mut self) {
        self.dialog = Some(Dialog::ConfirmLogout);
    }

    /// Carries out whatever the open confirmation dialog asked for.
    pub fn confirm_dialog(&mut self) {
        match self.dialog.take() {
            Some(Dialog::ConfirmDelete(id)) => {
                if self.history.remove(&id).is_some() {
                    self.notify(FeedbackKind::Success, t!("history.deleted"));
                }
            }
            Some(Dialog::ConfirmClear) => {
                self.history.clear();
                self.notify(FeedbackKind::Success, t!("history.cleared"));
            }
            Some(Dialog::ConfirmLogout) => self.logout(),
            Some(details @ Dialog::ScanDetails(_)) => self.dialog = Some(details),
            None => {}
        }
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn export_selected(&mut self) {
        let Some(record) = self.target_record_id().and_then(|id| self.history.get(&id).cloned()) else {
            return;
        };
        self.notify(FeedbackKind::Info, t!("export.started"));
        let client = self.client.clone();
        let tx = self.events.clone();
        let dir = self.export_dir.clone();
        tokio::spawn(async move {
            let result = scan::export_report(&client, &record, &dir).await;
            let _ = tx.send(AppEvent::ExportFinished(result)).await;
        });
    }

    // --- Background results ---

    pub fn apply_event(&mut self, event: AppEvent) {
        let now = Instant::now();
        match event {
            AppEvent::ScanFinished(record) => self.finish_scan(record),
            AppEvent::LoginFinished { email, result } => {
                self.auth.submitting = false;
                match result {
                    Ok(response) => {
                        let session = UserSession::new(&email, &response.username, &response.jwt_token);
                        self.sessions.save(&session);
                        self.session = Some(session);
                        let message = response
                            .message
                            .unwrap_or_else(|| t!("auth.welcome", username = response.username).into_owned());
                        self.modals.show(
                            FeedbackKind::Success,
                            t!("auth.login_success_title"),
                            message,
                            Some(Redirect::Dashboard),
                            now,
                        );
                    }
                    Err(e) => self.show_auth_error(e),
                }
            }
            AppEvent::RegisterFinished(result) => {
                self.auth.submitting = false;
                match result {
                    Ok(response) => self.modals.show(
                        FeedbackKind::Success,
                        t!("auth.register_success_title"),
                        response.message,
                        Some(Redirect::Login),
                        now,
                    ),
                    Err(e) => self.show_auth_error(e),
                }
            }
            AppEvent::ForgotPasswordFinished(result) => {
                self.auth.submitting = false;
                match result {
                    Ok(response) => self.modals.show(
                        FeedbackKind::Success,
                        t!("auth.reset_sent_title"),
                        response.message,
                        Some(Redirect::Login),
                        now,
                    ),
                    Err(e) => self.show_auth_error(e),
                }
            }
            AppEvent::LogoutFinished(result) => {
                if let Err(e) = result {
                    warn!(error = %e, "Logout request failed; local session already cleared.");
                }
            }
            AppEvent::ExportFinished(result) => match result {
                Ok(path) => self.notify(FeedbackKind::Success, t!("export.saved", path = path.display())),
                Err(e) => {
                    warn!(error = %e, "PDF export failed.");
                    self.notify(FeedbackKind::Error, t!("export.failed", reason = e));
                }
            },
        }
    }
}

fn next_variant<T: IntoEnumIterator + PartialEq + Copy>(current: T) -> T {
    let all: Vec<T> = T::iter().collect();
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

/// Labels for the option fields, in display order.
pub fn mode_label(mode: ScanMode) -> String {
    mode.to_string().to_uppercase()
}

pub fn traversal_label(traversal: Traversal) -> String {
    traversal.to_string().to_uppercase()
}
