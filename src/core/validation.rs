// src/core/validation.rs

//! Client-side checks for form fields.
//!
//! Each validator returns a [`FieldValidation`] that the form renders inline
//! next to the field. A form is only submitted when every field reports
//! [`FieldStatus::Success`].

use crate::core::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_i18n::t;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());
static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$")
        .unwrap()
});
static UPPER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());
static LOWER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());
static SPECIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).unwrap());

pub const MAX_EMAIL_LEN: usize = 254;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 25;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_THREADS: i64 = 1;
pub const MAX_THREADS: i64 = 1000;

const BLOCKED_USERNAMES: &[&str] = &["admin", "root", "null", "undefined"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    /// Nothing typed yet; the message is a hint.
    Neutral,
    Error,
    Warning,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Fair,
    Good,
    Strong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub status: FieldStatus,
    pub message: String,
    pub strength: Option<PasswordStrength>,
}

impl FieldValidation {
    fn new(status: FieldStatus, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), strength: None }
    }

    pub fn is_ok(&self) -> bool {
        self.status == FieldStatus::Success
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email) && email.chars().count() <= MAX_EMAIL_LEN
}

pub fn is_valid_ipv4(ip: &str) -> bool {
    IPV4_RE.is_match(ip)
}

pub fn validate_email(email: &str) -> FieldValidation {
    let email = email.trim();
    if email.is_empty() {
        FieldValidation::new(FieldStatus::Neutral, t!("validation.email.hint"))
    } else if !is_valid_email(email) {
        FieldValidation::new(FieldStatus::Error, t!("validation.email.invalid"))
    } else {
        FieldValidation::new(FieldStatus::Success, t!("validation.email.ok"))
    }
}

pub fn validate_username(username: &str) -> FieldValidation {
    let username = username.trim();
    let len = username.chars().count();
    if username.is_empty() {
        FieldValidation::new(FieldStatus::Neutral, t!("validation.username.hint"))
    } else if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        FieldValidation::new(FieldStatus::Error, t!("validation.username.length"))
    } else if BLOCKED_USERNAMES.contains(&username.to_lowercase().as_str()) {
        FieldValidation::new(FieldStatus::Error, t!("validation.username.blocked"))
    } else if !USERNAME_RE.is_match(username) {
        FieldValidation::new(FieldStatus::Error, t!("validation.username.charset"))
    } else {
        FieldValidation::new(FieldStatus::Success, t!("validation.username.ok"))
    }
}

/// Grades a new password by how many of the five strength checks it passes.
pub fn validate_password_strength(password: &str) -> FieldValidation {
    if password.is_empty() {
        return FieldValidation::new(FieldStatus::Neutral, t!("validation.password.hint"));
    }

    let passed = [
        password.chars().count() >= MIN_PASSWORD_LEN,
        UPPER_RE.is_match(password),
        LOWER_RE.is_match(password),
        DIGIT_RE.is_match(password),
        SPECIAL_RE.is_match(password),
    ]
    .iter()
    .filter(|ok| **ok)
    .count();

    let (status, strength, message) = match passed {
        0..=2 => (FieldStatus::Error, PasswordStrength::Weak, t!("validation.password.weak")),
        3 => (FieldStatus::Warning, PasswordStrength::Fair, t!("validation.password.fair")),
        4 => (FieldStatus::Warning, PasswordStrength::Good, t!("validation.password.good")),
        _ => (FieldStatus::Success, PasswordStrength::Strong, t!("validation.password.strong")),
    };
    FieldValidation { status, message: message.into_owned(), strength: Some(strength) }
}

/// The login form only needs a non-empty password.
pub fn validate_login_password(password: &str) -> FieldValidation {
    if password.is_empty() {
        FieldValidation::new(FieldStatus::Neutral, t!("validation.login_password.hint"))
    } else {
        FieldValidation::new(FieldStatus::Success, t!("validation.login_password.ok"))
    }
}

pub fn validate_password_confirmation(password: &str, confirmation: &str) -> FieldValidation {
    if confirmation.is_empty() {
        FieldValidation::new(FieldStatus::Neutral, t!("validation.confirm.hint"))
    } else if password != confirmation {
        FieldValidation::new(FieldStatus::Error, t!("validation.confirm.mismatch"))
    } else {
        FieldValidation::new(FieldStatus::Success, t!("validation.confirm.ok"))
    }
}

/// Checks the scan target. Returns the trimmed address on success.
pub fn check_target(ip: &str) -> Result<String, ValidationError> {
    let ip = ip.trim();
    if ip.is_empty() {
        return Err(ValidationError::MissingTarget);
    }
    if !is_valid_ipv4(ip) {
        return Err(ValidationError::InvalidTarget(ip.to_string()));
    }
    Ok(ip.to_string())
}

/// Parses and range-checks the thread count field.
pub fn check_threads(raw: &str) -> Result<u16, ValidationError> {
    let value: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidThreads(0))?;
    if !(MIN_THREADS..=MAX_THREADS).contains(&value) {
        return Err(ValidationError::InvalidThreads(value));
    }
    Ok(value as u16)
}

/// Localized text for a scan form rejection.
pub fn validation_error_message(error: &ValidationError) -> String {
    match error {
        ValidationError::MissingTarget => t!("scan.target_required").into_owned(),
        ValidationError::InvalidTarget(_) => t!("scan.target_invalid").into_owned(),
        ValidationError::InvalidThreads(_) => t!("scan.threads_invalid").into_owned(),
        ValidationError::ScanInProgress => t!("scan.in_progress").into_owned(),
    }
}
