//! Shared utilities, configuration, and error handling for Scribe
//!
//! This crate provides common functionality used across the Scribe backend:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Repository error taxonomy
//! - Request extractors (pagination, validated JSON)

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{Page, Pagination, ValidatedJson};
