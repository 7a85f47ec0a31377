// src/lib.rs

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod core;
pub mod logging;
pub mod ui;
