// src/core/errors.rs

use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the SENA backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("could not reach the server at '{url}': {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("too many attempts: {message}")]
    RateLimited { message: String },

    #[error("server returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("unexpected response body from '{url}': {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

impl ClientError {
    /// Message suitable for showing to the user as-is.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::RateLimited { message } | ClientError::Backend { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

/// Failures of the durable key-value storage.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid API base url '{value}': {source}")]
    InvalidBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Failures while saving an exported PDF report.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to write report to '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a scan form is rejected before any request is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("target address is required")]
    MissingTarget,

    #[error("'{0}' is not a valid IPv4 address")]
    InvalidTarget(String),

    #[error("thread count must be between 1 and 1000, got {0}")]
    InvalidThreads(i64),

    #[error("a scan is already in progress")]
    ScanInProgress,
}
