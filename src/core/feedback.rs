// src/core/feedback.rs

//! Modal dialogs and toast notifications.
//!
//! Both are driven by the UI tick: callers pass the current `Instant` so the
//! timers stay plain data that disappears with its owner.

use std::time::{Duration, Instant};
use tracing::debug;

/// How long a modal stays up before closing on its own.
pub const MODAL_COUNTDOWN_SECS: u64 = 5;
/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Screen a success modal sends the user to once it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Dashboard,
}

#[derive(Debug, Clone)]
pub struct Modal {
    pub kind: FeedbackKind,
    pub title: String,
    pub message: String,
    redirect: Option<Redirect>,
    opened_at: Instant,
}

impl Modal {
    /// Whole seconds left on the countdown.
    pub fn seconds_left(&self, now: Instant) -> u64 {
        MODAL_COUNTDOWN_SECS.saturating_sub(now.saturating_duration_since(self.opened_at).as_secs())
    }

    fn redirect(&self) -> Option<Redirect> {
        match self.kind {
            FeedbackKind::Success => self.redirect,
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ModalController {
    active: Option<Modal>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a modal, replacing (and cancelling) any modal already shown.
    pub fn show(
        &mut self,
        kind: FeedbackKind,
        title: impl Into<String>,
        message: impl Into<String>,
        redirect: Option<Redirect>,
        now: Instant,
    ) {
        let modal = Modal {
            kind,
            title: title.into(),
            message: message.into(),
            redirect,
            opened_at: now,
        };
        debug!(title = %modal.title, "Showing modal.");
        self.active = Some(modal);
    }

    pub fn active(&self) -> Option<&Modal> {
        self.active.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Advances the countdown. Returns the redirect to follow when the modal
    /// closed on this tick.
    pub fn tick(&mut self, now: Instant) -> Option<Redirect> {
        let expired = self.active.as_ref().is_some_and(|m| m.seconds_left(now) == 0);
        if expired {
            return self.active.take().and_then(|m| m.redirect());
        }
        None
    }

    /// User closed the modal: follows a success redirect straight away.
    pub fn dismiss(&mut self) -> Option<Redirect> {
        self.active.take().and_then(|m| m.redirect())
    }

    /// Drops the modal without following its redirect.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub kind: FeedbackKind,
    pub message: String,
    created_at: Instant,
}

#[derive(Debug, Default)]
pub struct NotificationController {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: FeedbackKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification { id, kind, message: message.into(), created_at: now });
        if self.items.len() > MAX_NOTIFICATIONS {
            self.items.remove(0);
        }
        id
    }

    /// Drops every notification older than the time-to-live.
    pub fn tick(&mut self, now: Instant) {
        self.items
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Dismisses the newest notification, if any.
    pub fn dismiss_latest(&mut self) {
        self.items.pop();
    }

    pub fn visible(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_counts_down_and_redirects_on_success() {
        let start = Instant::now();
        let mut modals = ModalController::new();
        modals.show(FeedbackKind::Success, "Done", "Registered", Some(Redirect::Login), start);

        assert_eq!(modals.active().unwrap().seconds_left(start), 5);
        for s in 1..5 {
            assert_eq!(modals.tick(start + Duration::from_secs(s)), None);
            assert_eq!(modals.active().unwrap().seconds_left(start + Duration::from_secs(s)), 5 - s);
        }
        assert_eq!(modals.tick(start + Duration::from_secs(5)), Some(Redirect::Login));
        assert!(!modals.is_open());
    }

    #[test]
    fn error_modal_never_redirects() {
        let start = Instant::now();
        let mut modals = ModalController::new();
        modals.show(FeedbackKind::Error, "Oops", "Bad", Some(Redirect::Dashboard), start);
        assert_eq!(modals.dismiss(), None);
    }

    #[test]
    fn cancelled_modal_drops_its_redirect() {
        let start = Instant::now();
        let mut modals = ModalController::new();
        modals.show(FeedbackKind::Success, "Done", "Welcome", Some(Redirect::Dashboard), start);
        modals.cancel();
        assert_eq!(modals.tick(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn notifications_expire_and_can_be_dismissed() {
        let start = Instant::now();
        let mut toasts = NotificationController::new();
        let first = toasts.push(FeedbackKind::Info, "one", start);
        toasts.push(FeedbackKind::Error, "two", start + Duration::from_secs(2));

        toasts.tick(start + Duration::from_secs(5));
        assert_eq!(toasts.visible().len(), 1);
        assert_eq!(toasts.visible()[0].message, "two");

        toasts.dismiss(first);
        assert_eq!(toasts.visible().len(), 1);
        toasts.dismiss_latest();
        assert!(toasts.visible().is_empty());
    }

    #[test]
    fn notification_queue_is_bounded() {
        let now = Instant::now();
        let mut toasts = NotificationController::new();
        for i in 0..8 {
            toasts.push(FeedbackKind::Info, format!("n{i}"), now);
        }
        assert_eq!(toasts.visible().len(), MAX_NOTIFICATIONS);
        assert_eq!(toasts.visible()[0].message, "n3");
    }
}
