//! Error types for icpscore.
//!
//! Two tiers, matching how failures propagate through a scoring run:
//!
//! - [`RowError`]: a single advertiser row could not be scored. The batch
//!   driver records it against the row and keeps going.
//! - [`IcpError`]: the run itself cannot proceed (missing input, unreadable
//!   header, bad configuration, invalid pattern). Surfaces to `main` and
//!   exits non-zero.
//!
//! Command handlers wrap these in `anyhow::Error` with context.

pub mod collection;

use std::path::PathBuf;
use thiserror::Error;

pub use collection::{RowFailure, StageOutcome};

/// Row-level scoring failure. Never aborts a batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// A destination share parsed to a finite number outside `[0, 1]`.
    #[error("{field} must be within [0, 1], got {value}")]
    ShareOutOfRange { field: &'static str, value: f64 },

    /// The CSV record could not be interpreted as a row of this table.
    #[error("malformed row: {message}")]
    Malformed { message: String },
}

impl RowError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Fatal errors for a scoring run.
#[derive(Debug, Error)]
pub enum IcpError {
    /// The stage input does not exist; `hint` names the stage to run first.
    #[error("input file not found: {path}. {hint}")]
    InputNotFound { path: PathBuf, hint: String },

    /// Configuration file could not be read or is invalid
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Configuration value rejected during validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A pattern source failed to compile
    #[error("invalid {category} pattern `{source_text}`: {message}")]
    Pattern {
        category: String,
        source_text: String,
        message: String,
    },

    /// CSV read/write failure outside of per-row parsing
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl IcpError {
    pub fn input_not_found(path: impl Into<PathBuf>, hint: impl Into<String>) -> Self {
        Self::InputNotFound {
            path: path.into(),
            hint: hint.into(),
        }
    }

    pub fn pattern(
        category: impl Into<String>,
        source_text: impl Into<String>,
        err: &regex::Error,
    ) -> Self {
        Self::Pattern {
            category: category.into(),
            source_text: source_text.into(),
            message: err.to_string(),
        }
    }
}
