// src/core/scan.rs

//! Submission flow for a single scan: validate the form, mark the scan as in
//! flight, call the scan engine and turn its answer into a terminal record.

use crate::core::errors::{ClientError, ExportError, ValidationError};
use crate::core::models::{ScanMode, ScanOutcome, ScanRecord, Traversal};
use crate::core::remote::{ExportRequest, RemoteScanClient, ScanRequest, ScanResponse};
use crate::core::validation::{check_target, check_threads};
use chrono::Utc;
use rust_i18n::t;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Port range the dashboard always asks for.
pub const DEFAULT_START_PORT: u16 = 1;
pub const DEFAULT_END_PORT: u16 = 1024;

/// Raw field values as typed by the user.
#[derive(Debug, Clone)]
pub struct ScanForm {
    pub target: String,
    pub mode: ScanMode,
    pub traversal: Traversal,
    pub threads: String,
}

impl Default for ScanForm {
    fn default() -> Self {
        Self {
            target: String::new(),
            mode: ScanMode::default(),
            traversal: Traversal::default(),
            threads: "100".to_string(),
        }
    }
}

/// Validated scan parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanParams {
    pub target: String,
    pub mode: ScanMode,
    pub traversal: Traversal,
    pub threads: u16,
}

impl ScanForm {
    pub fn validate(&self) -> Result<ScanParams, ValidationError> {
        Ok(ScanParams {
            target: check_target(&self.target)?,
            mode: self.mode,
            traversal: self.traversal,
            threads: check_threads(&self.threads)?,
        })
    }
}

/// Tracks the one scan that may be in flight at a time.
#[derive(Debug, Default)]
pub struct ScanDispatcher {
    current: Option<String>,
}

impl ScanDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the form and returns a `running` record for it.
    ///
    /// Fails without side effects if the form is invalid or another scan is
    /// still running.
    pub fn begin(&mut self, form: &ScanForm) -> Result<ScanRecord, ValidationError> {
        if self.current.is_some() {
            return Err(ValidationError::ScanInProgress);
        }
        let params = form.validate()?;
        let record = ScanRecord::start(&params.target, params.mode, params.traversal, params.threads);
        self.current = Some(record.id.clone());
        Ok(record)
    }

    /// Clears the in-flight marker, whatever the outcome was.
    pub fn finish(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.current.is_some()
    }
}

/// Runs `record` against the scan engine and returns it in a terminal state.
pub async fn execute_scan(client: &RemoteScanClient, mut record: ScanRecord) -> ScanRecord {
    let request = ScanRequest {
        ip: record.target.clone(),
        start_port: DEFAULT_START_PORT,
        end_port: DEFAULT_END_PORT,
        mode: record.mode,
        traversal: record.traversal,
        threads: record.threads,
        fingerprint: true,
    };

    match client.submit_scan(&request).await {
        Ok(response) => {
            info!(id = %record.id, open = response.open_ports.len(), "Scan completed.");
            complete(&mut record, response);
        }
        Err(e) => {
            warn!(id = %record.id, error = %e, "Scan failed.");
            fail(&mut record, &e);
        }
    }
    record
}

/// Moves a running record to `completed` using the engine's response.
pub fn complete(record: &mut ScanRecord, response: ScanResponse) {
    let results = summarize(&response);
    record.end_time = Some(Utc::now());
    record.outcome = ScanOutcome::Completed {
        open_ports: response.open_ports,
        closed_ports: response.closed_ports_count,
        total_ports: response.total_ports_scanned,
        duration: response.scan_duration,
        risk_level: response.risk_level,
        results,
    };
}

/// Moves a running record to `error`.
pub fn fail(record: &mut ScanRecord, error: &ClientError) {
    let message = match error {
        ClientError::Backend { message, .. } | ClientError::RateLimited { message } => message.clone(),
        ClientError::Decode { .. } => t!("scan.failed_decode").into_owned(),
        _ => t!("scan.failed_generic").into_owned(),
    };
    record.end_time = Some(Utc::now());
    record.outcome = ScanOutcome::Error { error: message };
}

impl ExportRequest {
    pub fn for_record(record: &ScanRecord) -> Self {
        Self {
            scan_id: record.id.clone(),
            target: record.target.clone(),
            mode: record.mode,
            range: format!("{DEFAULT_START_PORT}-{DEFAULT_END_PORT}"),
            open_ports: record.open_ports().to_vec(),
        }
    }
}

/// File name the exported report is saved under.
pub fn report_file_name(scan_id: &str) -> String {
    format!("scan_report_{scan_id}.pdf")
}

/// Has the export service render `record` and saves the PDF into `dir`.
pub async fn export_report(client: &RemoteScanClient, record: &ScanRecord, dir: &Path) -> Result<PathBuf, ExportError> {
    let request = ExportRequest::for_record(record);
    let pdf = client.export_pdf(&request).await?;

    let path = dir.join(report_file_name(&record.id));
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
    tokio::fs::write(&path, &pdf)
        .await
        .map_err(|source| ExportError::Io { path: path.clone(), source })?;
    info!(path = %path.display(), bytes = pdf.len(), "Saved PDF report.");
    Ok(path)
}

fn summarize(response: &ScanResponse) -> String {
    let ports = if response.open_ports.is_empty() {
        "None".to_string()
    } else {
        response
            .open_ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let risk = response
        .risk_level
        .as_ref()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let duration = response
        .scan_duration
        .map(|d| format!("{d}s"))
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "Scan complete!\nOpen ports: {ports}\nRisk Level: {risk}\nTotal Ports Scanned: {}\nScan Duration: {duration}",
        response.total_ports_scanned
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::RiskLevel;

    fn form(target: &str, threads: &str) -> ScanForm {
        ScanForm { target: target.into(), threads: threads.into(), ..Default::default() }
    }

    #[test]
    fn dispatcher_allows_one_scan_at_a_time() {
        let mut dispatcher = ScanDispatcher::new();
        let record = dispatcher.begin(&form("10.0.0.5", "50")).unwrap();
        assert_eq!(record.status_label(), "running");
        assert_eq!(dispatcher.current(), Some(record.id.as_str()));

        assert_eq!(
            dispatcher.begin(&form("10.0.0.6", "50")).unwrap_err(),
            ValidationError::ScanInProgress
        );

        dispatcher.finish();
        assert!(!dispatcher.is_busy());
        assert!(dispatcher.begin(&form("10.0.0.6", "50")).is_ok());
    }

    #[test]
    fn invalid_form_does_not_mark_busy() {
        let mut dispatcher = ScanDispatcher::new();
        assert_eq!(dispatcher.begin(&form("", "50")).unwrap_err(), ValidationError::MissingTarget);
        assert_eq!(dispatcher.begin(&form("10.0.0.5", "0")).unwrap_err(), ValidationError::InvalidThreads(0));
        assert!(!dispatcher.is_busy());
    }

    #[test]
    fn complete_fills_results() {
        let mut record = ScanRecord::start("10.0.0.5", ScanMode::Tcp, Traversal::Bfs, 50);
        complete(
            &mut record,
            ScanResponse {
                open_ports: vec![22, 443],
                closed_ports_count: 1022,
                total_ports_scanned: 1024,
                risk_level: Some(RiskLevel::Low),
                scan_duration: Some(3.25),
            },
        );
        assert!(record.is_completed());
        assert!(record.end_time.is_some());
        assert_eq!(record.open_ports(), &[22, 443]);
        match &record.outcome {
            ScanOutcome::Completed { results, .. } => {
                assert!(results.contains("Open ports: 22, 443"));
                assert!(results.contains("Risk Level: Low"));
                assert!(results.contains("Scan Duration: 3.25s"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn export_request_uses_fixed_range() {
        let mut record = ScanRecord::start("10.0.0.5", ScanMode::Syn, Traversal::Dfs, 50);
        record.outcome = ScanOutcome::Error { error: "x".into() };
        let request = ExportRequest::for_record(&record);
        assert_eq!(request.range, "1-1024");
        assert_eq!(request.scan_id, record.id);
        assert!(request.open_ports.is_empty());
        assert_eq!(report_file_name("scan_1_a"), "scan_report_scan_1_a.pdf");
    }

    #[test]
    fn backend_message_is_kept_on_failure() {
        let mut record = ScanRecord::start("10.0.0.5", ScanMode::Tcp, Traversal::Bfs, 50);
        fail(
            &mut record,
            &ClientError::Backend { status: 400, message: "Cannot resolve hostname".into() },
        );
        assert_eq!(record.error_message(), Some("Cannot resolve hostname"));
        assert!(record.open_ports().is_empty());
        assert!(record.is_terminal());
    }
}
