mod common;

use common::{dead_url, spawn_backend};
use sena_console::app::{App, AppEvent, AuthField, Screen, SharedStorage};
use sena_console::config::Config;
use sena_console::core::feedback::FeedbackKind;
use sena_console::core::session::SESSION_KEY;
use sena_console::core::storage::MemoryStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

async fn app_against(api_url: String) -> (App, mpsc::Receiver<AppEvent>, MemoryStore) {
    let config = Config { api_url, request_timeout_secs: 2, ..Config::default() };
    let memory = MemoryStore::new();
    let storage: SharedStorage = Arc::new(memory.clone());
    let (tx, rx) = mpsc::channel(8);
    let app = App::new(&config, storage, std::env::temp_dir(), tx).unwrap();
    (app, rx, memory)
}

async fn next_event(app: &mut App, rx: &mut mpsc::Receiver<AppEvent>) {
    let event = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("background task did not report back")
        .expect("channel closed");
    app.apply_event(event);
}

#[tokio::test]
async fn login_saves_session_and_redirects_to_dashboard() {
    let (mut app, mut rx, memory) = app_against(spawn_backend().await).await;
    app.auth.email = "ops@example.com".into();
    app.auth.password = "Abcdef1!".into();

    app.submit_auth();
    assert!(app.auth.submitting);
    next_event(&mut app, &mut rx).await;

    assert_eq!(app.session.as_ref().map(|s| s.username.as_str()), Some("ops"));
    assert!(memory.raw(SESSION_KEY).unwrap().contains("tok123"));
    let modal = app.modals.active().unwrap();
    assert_eq!(modal.kind, FeedbackKind::Success);

    let redirect = app.modals.dismiss().unwrap();
    app.follow(redirect);
    assert_eq!(app.screen, Screen::Dashboard);
}

#[tokio::test]
async fn field_specific_backend_errors_show_inline() {
    let (mut app, mut rx, _memory) = app_against(spawn_backend().await).await;
    app.go_to(Screen::Register);
    app.auth.email = "taken@example.com".into();
    app.auth.username = "other_user".into();
    app.auth.password = "Abcdef1!".into();
    app.auth.confirm = "Abcdef1!".into();

    app.submit_auth();
    next_event(&mut app, &mut rx).await;

    assert_eq!(app.auth.field_errors.get(&AuthField::Email).map(String::as_str), Some("Email sudah terdaftar"));
    assert!(!app.modals.is_open());
    assert!(!app.auth.is_submittable(Screen::Register));
}

#[tokio::test]
async fn rate_limit_opens_a_modal() {
    let (mut app, mut rx, _memory) = app_against(spawn_backend().await).await;
    app.auth.email = "spam@example.com".into();
    app.auth.password = "x".into();

    app.submit_auth();
    next_event(&mut app, &mut rx).await;

    let modal = app.modals.active().unwrap();
    assert_eq!(modal.kind, FeedbackKind::Error);
    assert_eq!(modal.message, "Terlalu banyak percobaan login");
    assert!(app.session.is_none());
}

#[tokio::test]
async fn completed_scan_lands_in_history() {
    let (mut app, mut rx, _memory) = app_against(spawn_backend().await).await;
    app.scan_form.target = "10.0.0.5".into();

    app.start_scan();
    assert!(app.is_scanning());
    next_event(&mut app, &mut rx).await;

    assert!(!app.is_scanning());
    assert_eq!(app.history.len(), 1);
    assert_eq!(app.history.records()[0].open_ports(), &[22, 80, 443]);
    assert!(app.scan_output.contains("Scan complete!"));
}

#[tokio::test]
async fn failed_scan_is_not_recorded() {
    let (mut app, mut rx, memory) = app_against(dead_url().await).await;
    app.scan_form.target = "10.0.0.5".into();

    app.start_scan();
    next_event(&mut app, &mut rx).await;

    assert!(!app.is_scanning());
    assert!(app.history.is_empty());
    assert!(memory.raw("sena_scan_history").is_none());
    assert_eq!(app.notifications.visible().last().map(|n| n.kind), Some(FeedbackKind::Error));
}

#[tokio::test]
async fn invalid_target_never_starts_a_scan() {
    let (mut app, _rx, _memory) = app_against(spawn_backend().await).await;
    app.scan_form.target = "999.1.1.1".into();
    app.start_scan();
    assert!(!app.is_scanning());
    assert_eq!(app.notifications.visible().len(), 1);
}

#[tokio::test]
async fn logout_clears_session_even_if_the_server_refuses() {
    let (mut app, mut rx, memory) = app_against(spawn_backend().await).await;
    app.auth.email = "ops@example.com".into();
    app.auth.password = "Abcdef1!".into();
    app.submit_auth();
    next_event(&mut app, &mut rx).await;
    if let Some(session) = app.session.as_mut() {
        session.token = "stale".into();
    }

    app.request_logout();
    app.confirm_dialog();
    assert_eq!(app.screen, Screen::Login);
    assert!(app.session.is_none());
    assert!(memory.raw(SESSION_KEY).is_none());

    next_event(&mut app, &mut rx).await;
    assert_eq!(app.screen, Screen::Login);
}
