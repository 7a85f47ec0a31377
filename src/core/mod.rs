// src/core/mod.rs

/// Scan records, option enums and the history aggregates.
pub mod models;

/// Error types shared by the client, storage and configuration layers.
pub mod errors;

/// Durable key-value storage port with file and in-memory backends.
pub mod storage;

/// The bounded, persisted scan history.
pub mod history;

/// HTTP client for the scan, export and auth endpoints.
pub mod remote;

/// Form validation and submission of a single scan.
pub mod scan;

pub mod validation;
pub mod session;
pub mod feedback;
pub mod animation;

/// Well-known port names and risk grouping.
pub mod knowledge_base;
