// src/core/remote.rs

use crate::core::errors::ClientError;
use crate::core::models::{RiskLevel, ScanMode, Traversal};
use reqwest::StatusCode;
use rust_i18n::t;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

// --- Wire Types ---

#[derive(Debug, Clone, Serialize)]
pub struct ScanRequest {
    pub ip: String,
    pub start_port: u16,
    pub end_port: u16,
    pub mode: ScanMode,
    pub traversal: Traversal,
    pub threads: u16,
    pub fingerprint: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanResponse {
    #[serde(default)]
    pub open_ports: Vec<u16>,
    #[serde(default)]
    pub closed_ports_count: u32,
    #[serde(default)]
    pub total_ports_scanned: u32,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub scan_duration: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    pub scan_id: String,
    pub target: String,
    pub mode: ScanMode,
    pub range: String,
    pub open_ports: Vec<u16>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub username: String,
    pub jwt_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Error payload; the scan engine uses `error`, the auth service `message`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// --- Client ---

/// Thin wrapper over the SENA backend endpoints.
#[derive(Debug, Clone)]
pub struct RemoteScanClient {
    http: reqwest::Client,
    base: Url,
}

impl RemoteScanClient {
    /// Builds a client rooted at `base_url` (e.g. `http://localhost:5000`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("SenaConsole/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client.");
                ClientError::ClientBuild(e.to_string())
            })?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn submit_scan(&self, request: &ScanRequest) -> Result<ScanResponse, ClientError> {
        info!(target = %request.ip, mode = %request.mode, traversal = %request.traversal, "Submitting scan.");
        self.post_json("scan", request, None).await
    }

    /// Asks the export service to render a PDF report and returns its bytes.
    pub async fn export_pdf(&self, request: &ExportRequest) -> Result<Vec<u8>, ClientError> {
        info!(scan_id = %request.scan_id, "Requesting PDF export.");
        let response = self.send("scan/export/pdf", request, None).await?;
        let url = response.url().to_string();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ClientError::Decode { url, source })?;
        debug!(bytes = bytes.len(), "PDF export received.");
        Ok(bytes.to_vec())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest { email: email.to_string(), password: password.to_string() };
        self.post_json("api/auth/login", &body, None).await
    }

    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<MessageResponse, ClientError> {
        let body = RegisterRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_json("api/auth/register", &body, None).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<MessageResponse, ClientError> {
        let body = ForgotPasswordRequest { email: email.to_string() };
        self.post_json("api/auth/forgot-password", &body, None).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        self.send("api/auth/logout", &serde_json::json!({}), Some(token)).await?;
        Ok(())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(path, body, bearer).await?;
        let url = response.url().to_string();
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { url, source })
    }

    /// Posts `body` and returns the response if its status is 2xx.
    async fn send<B>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.base.join(path)?;
        let mut request = self.http.post(url.clone()).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| {
            error!(url = %url, error = %source, "HTTP request failed.");
            ClientError::Transport { url: url.to_string(), source }
        })?;

        let status = response.status();
        debug!(url = %url, status = %status, "Received response.");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.json::<ErrorBody>().await.unwrap_or_default();
        let message = body
            .error
            .or(body.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_status_message(status));
        warn!(url = %url, status = %status, message = %message, "Backend rejected request.");

        if status == StatusCode::TOO_MANY_REQUESTS {
            Err(ClientError::RateLimited { message })
        } else {
            Err(ClientError::Backend { status: status.as_u16(), message })
        }
    }
}

/// Fallback text when an error response carries no message of its own.
pub fn default_status_message(status: StatusCode) -> String {
    match status.as_u16() {
        400 => t!("http.bad_request").into_owned(),
        401 => t!("http.unauthorized").into_owned(),
        403 => t!("http.forbidden").into_owned(),
        404 => t!("http.not_found").into_owned(),
        429 => t!("http.too_many_requests").into_owned(),
        500 => t!("http.server_error").into_owned(),
        code => t!("http.other", code = code).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = RemoteScanClient::new("http://localhost:5000/sena", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/sena/");
        assert_eq!(client.base_url().join("scan").unwrap().as_str(), "http://localhost:5000/sena/scan");
    }

    #[test]
    fn rejects_garbage_base_url() {
        assert!(matches!(
            RemoteScanClient::new("not a url", Duration::from_secs(1)),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn scan_request_wire_shape() {
        let body = ScanRequest {
            ip: "10.0.0.5".into(),
            start_port: 1,
            end_port: 1024,
            mode: ScanMode::Tcp,
            traversal: Traversal::Sequential,
            threads: 100,
            fingerprint: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "ip": "10.0.0.5",
                "start_port": 1,
                "end_port": 1024,
                "mode": "tcp",
                "traversal": "sequential",
                "threads": 100,
                "fingerprint": true
            })
        );
    }

    #[test]
    fn status_fallbacks_are_distinct() {
        assert_ne!(default_status_message(StatusCode::UNAUTHORIZED), default_status_message(StatusCode::FORBIDDEN));
        assert!(default_status_message(StatusCode::IM_A_TEAPOT).contains("418"));
    }
}
