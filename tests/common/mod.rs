//! Shared fake SENA backend for the integration tests.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// In-process stand-in for the SENA backend.
pub fn fake_backend() -> Router {
    Router::new()
        .route("/scan", post(scan))
        .route("/scan/export/pdf", post(export_pdf))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/logout", post(logout))
}

async fn scan(Json(body): Json<Value>) -> Response {
    if body["start_port"] != 1 || body["end_port"] != 1024 || body["fingerprint"] != true {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "unexpected scan parameters"}))).into_response();
    }
    match body["ip"].as_str() {
        Some("10.0.0.9") => (StatusCode::BAD_REQUEST, Json(json!({"error": "Cannot resolve hostname"}))).into_response(),
        Some("10.0.0.10") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))).into_response(),
        Some("10.0.0.11") => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => (
            StatusCode::OK,
            Json(json!({
                "open_ports": [22, 80, 443],
                "closed_ports_count": 1021,
                "total_ports_scanned": 1024,
                "risk_level": "Medium",
                "scan_duration": 2.5
            })),
        )
            .into_response(),
    }
}

async fn export_pdf(Json(body): Json<Value>) -> ([(header::HeaderName, &'static str); 1], Vec<u8>) {
    assert_eq!(body["range"], "1-1024");
    ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 fake".to_vec())
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match (body["email"].as_str(), body["password"].as_str()) {
        (Some("ops@example.com"), Some("Abcdef1!")) => (
            StatusCode::OK,
            Json(json!({"message": "Login berhasil", "username": "ops", "jwt_token": "tok123"})),
        ),
        (Some("spam@example.com"), _) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"message": "Terlalu banyak percobaan login"})),
        ),
        _ => (StatusCode::UNAUTHORIZED, Json(json!({}))),
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "taken@example.com" {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "Email sudah terdaftar"})));
    }
    (StatusCode::CREATED, Json(json!({"message": "Registrasi berhasil"})))
}

async fn forgot_password(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({"message": "Link reset telah dikirim"}))
}

async fn logout(headers: HeaderMap) -> StatusCode {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some("Bearer tok123") => StatusCode::OK,
        _ => StatusCode::UNAUTHORIZED,
    }
}

pub async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake_backend()).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base url nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

