//! Machine-readable run summaries (`--summary PATH`).

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{IcpError, RowFailure};
use crate::pipeline::{Stage, StageReport};

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub stage: Stage,
    pub input: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
    pub scored: usize,
    pub failed: usize,
    pub coercions: usize,
    pub failures: Vec<RowFailure>,
    pub generated_at: DateTime<Utc>,
}

impl RunSummary {
    pub fn from_report(report: &StageReport, generated_at: DateTime<Utc>) -> Self {
        Self {
            stage: report.stage,
            input: report.input.clone(),
            output: report.output.clone(),
            rows: report.outcome.rows,
            scored: report.outcome.scored,
            failed: report.outcome.failure_count(),
            coercions: report.outcome.coercions,
            failures: report.outcome.failures.clone(),
            generated_at,
        }
    }
}

/// Write one summary as a JSON object, or several as a JSON array.
pub fn write_summaries(path: &Path, summaries: &[RunSummary]) -> Result<(), IcpError> {
    let json = match summaries {
        [single] => serde_json::to_string_pretty(single)?,
        many => serde_json::to_string_pretty(many)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}
