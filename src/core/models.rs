// src/core/models.rs

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// --- Scan Options ---

/// Probe technique requested from the scan engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Tcp,
    Syn,
}

/// Order in which the scan engine walks the port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Traversal {
    #[default]
    Bfs,
    Dfs,
    Adaptive,
    Sequential,
}

/// Risk grading returned by the scan engine for a set of open ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
    Safe,
    #[serde(other)]
    Unknown,
}

// --- Scan Record ---

/// Status of a scan together with the data that only exists in that status.
///
/// Serialized flattened into the owning record, tagged by `status`, so the
/// persisted JSON keeps the `openPorts`/`error` fields next to the metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ScanOutcome {
    Running,
    Completed {
        open_ports: Vec<u16>,
        closed_ports: u32,
        total_ports: u32,
        #[serde(default)]
        duration: Option<f64>,
        #[serde(default)]
        risk_level: Option<RiskLevel>,
        results: String,
    },
    Error {
        error: String,
    },
}

/// One submitted scan attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub id: String,
    #[serde(rename = "ip")]
    pub target: String,
    pub mode: ScanMode,
    pub traversal: Traversal,
    pub threads: u16,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub outcome: ScanOutcome,
}

impl ScanRecord {
    /// Creates a record in the `running` state, stamped with the current time.
    pub fn start(target: &str, mode: ScanMode, traversal: Traversal, threads: u16) -> Self {
        Self {
            id: generate_scan_id(),
            target: target.to_string(),
            mode,
            traversal,
            threads,
            start_time: Utc::now(),
            end_time: None,
            outcome: ScanOutcome::Running,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, ScanOutcome::Completed { .. })
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.outcome, ScanOutcome::Running)
    }

    /// Open ports found by a completed scan; empty for any other status.
    pub fn open_ports(&self) -> &[u16] {
        match &self.outcome {
            ScanOutcome::Completed { open_ports, .. } => open_ports,
            _ => &[],
        }
    }

    pub fn risk_level(&self) -> Option<&RiskLevel> {
        match &self.outcome {
            ScanOutcome::Completed { risk_level, .. } => risk_level.as_ref(),
            _ => None,
        }
    }

    /// Human-readable summary of a completed scan.
    pub fn results(&self) -> Option<&str> {
        match &self.outcome {
            ScanOutcome::Completed { results, .. } => Some(results),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ScanOutcome::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.outcome {
            ScanOutcome::Running => "running",
            ScanOutcome::Completed { .. } => "completed",
            ScanOutcome::Error { .. } => "error",
        }
    }
}

/// Builds an identifier of the form `scan_<unix millis>_<9 base-36 chars>`.
pub fn generate_scan_id() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .filter_map(|_| std::char::from_digit(rng.random_range(0..36), 36))
        .collect();
    format!("scan_{}_{}", Utc::now().timestamp_millis(), suffix)
}

// --- History Views ---

/// Time window used when filtering the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum DateScope {
    #[default]
    All,
    Today,
    Week,
    Month,
}

/// Aggregates shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub daily_scans: usize,
    pub total_scans: usize,
    pub threats_found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn scan_id_has_timestamp_and_suffix() {
        let id = generate_scan_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "scan");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn completed_record_serializes_flat() {
        let mut record = ScanRecord::start("10.0.0.5", ScanMode::Syn, Traversal::Adaptive, 50);
        record.outcome = ScanOutcome::Completed {
            open_ports: vec![22, 80],
            closed_ports: 1022,
            total_ports: 1024,
            duration: Some(1.5),
            risk_level: Some(RiskLevel::Low),
            results: "done".into(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "completed");
        assert_eq!(value["ip"], "10.0.0.5");
        assert_eq!(value["mode"], "syn");
        assert_eq!(value["traversal"], "adaptive");
        assert_eq!(value["openPorts"], serde_json::json!([22, 80]));
        assert_eq!(value["closedPorts"], 1022);
        assert!(value["startTime"].is_string());

        let back: ScanRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn error_record_has_no_ports() {
        let mut record = ScanRecord::start("10.0.0.5", ScanMode::Tcp, Traversal::Bfs, 10);
        record.outcome = ScanOutcome::Error { error: "boom".into() };
        assert!(record.open_ports().is_empty());
        assert_eq!(record.error_message(), Some("boom"));
        assert_eq!(record.status_label(), "error");
    }

    #[test]
    fn unknown_risk_level_is_tolerated() {
        let risk: RiskLevel = serde_json::from_str("\"Extreme\"").unwrap();
        assert_eq!(risk, RiskLevel::Unknown);
    }

    #[test]
    fn option_enums_parse_from_lowercase() {
        assert_eq!(Traversal::from_str("dfs").unwrap(), Traversal::Dfs);
        assert_eq!(DateScope::from_str("week").unwrap(), DateScope::Week);
        assert_eq!(ScanMode::Syn.to_string(), "syn");
    }
}
