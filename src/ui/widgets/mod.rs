// src/ui/widgets/mod.rs

pub mod auth_form;
pub mod footer;
pub mod header;
pub mod history;
pub mod input;
pub mod notifications;
pub mod popup;
pub mod scan_form;
pub mod scan_output;
pub mod summary;
