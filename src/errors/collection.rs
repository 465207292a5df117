//! Batch outcome bookkeeping for stage runs.
//!
//! Each row is scored independently; a stage returns BOTH the rows that
//! scored and the rows that failed, so one bad row never costs the whole
//! ranking run.

use serde::Serialize;

use super::RowError;

/// Aggregate result of scoring one table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageOutcome {
    /// Data rows read from the input table
    pub rows: usize,
    /// Rows that produced a score
    pub scored: usize,
    /// Numeric fields that were missing or unparseable and coerced to zero
    pub coercions: usize,
    pub failures: Vec<RowFailure>,
}

impl StageOutcome {
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.rows == 0 {
            return 1.0;
        }
        self.scored as f64 / self.rows as f64
    }

    pub fn record_success(&mut self, coercions: usize) {
        self.rows += 1;
        self.scored += 1;
        self.coercions += coercions;
    }

    pub fn record_failure(&mut self, failure: RowFailure) {
        self.rows += 1;
        self.failures.push(failure);
    }
}

/// A row that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    /// 1-based data row number in the input table (header excluded)
    pub row: usize,
    pub page_name: String,
    pub error: String,
}

impl RowFailure {
    pub fn new(row: usize, page_name: impl Into<String>, error: &RowError) -> Self {
        Self {
            row,
            page_name: page_name.into(),
            error: error.to_string(),
        }
    }
}
