//! Error types for pros-site.
//!
//! The engine itself has no recoverable runtime errors: missing host
//! capabilities degrade gracefully instead of failing. What can fail is the
//! shell around it: reading configuration and content, setting up logging,
//! and driving the terminal.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - top-level error returned from the binary's main paths
//!   - [`ConfigError`] - config file lookup, read and parse failures
//!   - [`ContentError`] - content override read/parse/validation failures
//!   - [`LoggingError`] - tracing subscriber setup failures
//!   - `std::io::Error` - terminal failures
//!   - `serde_json::Error` - headless snapshot serialization failures
//!
//! Engine-level construction errors (invalid thresholds, duplicate scroll-spy
//! sections, scroll lock contention) live next to the types that raise them.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// All variants are fatal for the binary: they surface before the event loop
/// starts or when the terminal itself breaks.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content override could not be loaded or failed validation.
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// Headless snapshot could not be serialized.
    #[error("Snapshot serialization error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Errors raised while loading or validating site content.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// The content file could not be read.
    #[error("Failed to read content file at {path}: {reason}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// The content file is not valid TOML or has unknown keys.
    #[error("Invalid content TOML in {path}: {reason}")]
    Parse {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// The menu has no entries.
    #[error("Menu must contain at least one item")]
    EmptyMenu,

    /// A service has a blank id and cannot be used as a scroll-spy anchor.
    #[error("Service '{title}' has an empty id")]
    EmptyServiceId {
        /// Title of the offending service.
        title: String,
    },

    /// Two services share an id.
    #[error("Duplicate service id: {0}")]
    DuplicateServiceId(String),
}
