//! Stage driver: read a table, score every row in parallel, write the
//! complete output artifact.
//!
//! Scoring a row never fails the batch. Each row produces either score
//! cells or a [`RowError`]; errored rows get the scorer's zero cells plus
//! the error message, and the driver folds everything into a
//! [`StageOutcome`].

use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::ranking::rank_order;
use super::stage::Stage;
use super::table::{read_table, write_table, Table};
use crate::config::IcpConfig;
use crate::errors::{IcpError, RowError, RowFailure, StageOutcome};
use crate::patterns::PatternLibrary;
use crate::progress::{ProgressManager, TEMPLATE_ROWS};
use crate::record::{AdvertiserRecord, Coercion, ColumnIndex, PAGE_NAME};
use crate::scoring::{
    Classification, FitScore, FitScorer, UrgencyScore, UrgencyScorer, VerticalClassifier,
};

/// Score cells for one row, aligned with [`Stage::value_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub cells: Vec<String>,
    /// Sort key for ranked stages
    pub rank_key: f64,
}

/// Maps a record to the cells of one stage.
pub trait RowScorer: Sync {
    fn score_row(&self, record: &AdvertiserRecord) -> Result<ScoredRow, RowError>;

    /// Cells written for rows that failed to score.
    fn zero_row(&self) -> ScoredRow;
}

fn urgency_cells(score: &UrgencyScore, combined: f64) -> ScoredRow {
    ScoredRow {
        cells: vec![
            score.total.to_string(),
            score.breakdown.to_string(),
            score.direct.to_string(),
            score.form.to_string(),
            score.immediacy.to_string(),
            score.qualification.to_string(),
            combined.to_string(),
            // rank is assigned after sorting
            String::new(),
        ],
        rank_key: combined,
    }
}

impl RowScorer for UrgencyScorer<'_> {
    fn score_row(&self, record: &AdvertiserRecord) -> Result<ScoredRow, RowError> {
        let score = self.score(record)?;
        let combined = record.money_score + f64::from(score.total);
        Ok(urgency_cells(&score, combined))
    }

    fn zero_row(&self) -> ScoredRow {
        urgency_cells(&UrgencyScore::zero(), 0.0)
    }
}

fn fit_cells(score: &FitScore) -> ScoredRow {
    let mut cells = vec![
        score.total.to_string(),
        score.explicit.to_string(),
        score.implicit.to_string(),
        score.breakdown().to_string(),
    ];
    cells.extend(
        score
            .breakdown()
            .components()
            .iter()
            .map(|component| component.points.to_string()),
    );
    ScoredRow {
        cells,
        rank_key: f64::from(score.total),
    }
}

impl RowScorer for FitScorer<'_> {
    fn score_row(&self, record: &AdvertiserRecord) -> Result<ScoredRow, RowError> {
        Ok(fit_cells(&self.score(record)?))
    }

    fn zero_row(&self) -> ScoredRow {
        fit_cells(&FitScore::zero())
    }
}

fn vertical_cells(classification: Classification) -> ScoredRow {
    ScoredRow {
        cells: vec![
            classification.vertical.to_string(),
            classification.matched_on.to_string(),
        ],
        rank_key: 0.0,
    }
}

impl RowScorer for VerticalClassifier {
    fn score_row(&self, record: &AdvertiserRecord) -> Result<ScoredRow, RowError> {
        Ok(vertical_cells(self.classify(record)))
    }

    fn zero_row(&self) -> ScoredRow {
        vertical_cells(Classification::unclassified())
    }
}

/// Shared, read-only inputs for every stage of a run.
pub struct StageContext<'a> {
    pub library: &'a PatternLibrary,
    pub classifier: &'a VerticalClassifier,
    pub config: &'a IcpConfig,
    pub progress: ProgressManager,
}

impl<'a> StageContext<'a> {
    pub fn new(
        library: &'a PatternLibrary,
        classifier: &'a VerticalClassifier,
        config: &'a IcpConfig,
    ) -> Self {
        Self {
            library,
            classifier,
            config,
            progress: ProgressManager::default(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    pub fn scorer(&self, stage: Stage) -> Box<dyn RowScorer + 'a> {
        match stage {
            Stage::Urgency => Box::new(UrgencyScorer::new(
                self.library,
                self.config.urgency.clone(),
            )),
            Stage::Fit => Box::new(FitScorer::new(self.library, self.config.fit.clone())),
            Stage::Vertical => Box::new(self.classifier),
        }
    }
}

impl RowScorer for &VerticalClassifier {
    fn score_row(&self, record: &AdvertiserRecord) -> Result<ScoredRow, RowError> {
        (**self).score_row(record)
    }

    fn zero_row(&self) -> ScoredRow {
        (**self).zero_row()
    }
}

/// Result of one stage run.
#[derive(Debug, Clone)]
pub struct StageReport {
    pub stage: Stage,
    pub input: PathBuf,
    pub output: PathBuf,
    pub outcome: StageOutcome,
    /// The table as written
    pub table: Table,
}

struct RowResult {
    scored: ScoredRow,
    page_name: String,
    coercions: Vec<Coercion>,
    error: Option<RowError>,
}

/// Score every row of `table` in place and return the batch outcome.
///
/// Stage columns already present are overwritten; missing ones are
/// appended. Ranked stages reorder rows by descending key and number them
/// from 1.
pub fn score_table(
    table: &mut Table,
    stage: Stage,
    scorer: &dyn RowScorer,
    progress: ProgressBar,
) -> StageOutcome {
    let value_columns: Vec<usize> = stage
        .value_columns()
        .iter()
        .map(|name| table.ensure_column(name))
        .collect();
    let error_column = stage.error_column().map(|name| table.ensure_column(name));
    let index = ColumnIndex::new(table.headers());
    let name_column = index.position(PAGE_NAME);

    let results: Vec<RowResult> = table
        .rows()
        .par_iter()
        .progress_with(progress)
        .map(|row| {
            let page_name = name_column
                .and_then(|i| row.cells.get(i))
                .cloned()
                .unwrap_or_default();
            let parsed = match &row.defect {
                Some(defect) => Err(defect.clone()),
                None => AdvertiserRecord::from_cells(&index, &row.cells),
            };
            match parsed.and_then(|record| {
                scorer
                    .score_row(&record)
                    .map(|scored| (scored, record.coercions))
            }) {
                Ok((scored, coercions)) => RowResult {
                    scored,
                    page_name,
                    coercions,
                    error: None,
                },
                Err(error) => RowResult {
                    scored: scorer.zero_row(),
                    page_name,
                    coercions: Vec::new(),
                    error: Some(error),
                },
            }
        })
        .collect();

    let mut outcome = StageOutcome::default();
    let mut keys = Vec::with_capacity(results.len());

    for (i, result) in results.into_iter().enumerate() {
        let row_number = i + 1;
        for (&column, value) in value_columns.iter().zip(result.scored.cells) {
            table.set(i, column, value);
        }

        match &result.error {
            None => {
                if !result.coercions.is_empty() {
                    debug!(
                        "{} row {} ({}): coerced to zero: {:?}",
                        stage, row_number, result.page_name, result.coercions
                    );
                }
                outcome.record_success(result.coercions.len());
            }
            Some(error) => {
                warn!(
                    "{} row {} ({}) failed to score: {}",
                    stage, row_number, result.page_name, error
                );
                outcome.record_failure(RowFailure::new(row_number, result.page_name.clone(), error));
            }
        }

        if let Some(column) = error_column {
            let message = result.error.as_ref().map(ToString::to_string).unwrap_or_default();
            table.set(i, column, message);
        }
        keys.push(result.scored.rank_key);
    }

    if stage.is_ranked() {
        table.reorder(&rank_order(&keys));
        if let Some(rank_column) = table.column("rank") {
            for position in 0..table.len() {
                table.set(position, rank_column, (position + 1).to_string());
            }
        }
    }

    outcome
}

/// Run one stage from `input` to `output`.
pub fn run_stage(
    stage: Stage,
    input: &Path,
    output: &Path,
    ctx: &StageContext<'_>,
) -> Result<StageReport, IcpError> {
    if !input.is_file() {
        return Err(IcpError::input_not_found(input, stage.upstream_hint()));
    }

    let reading = ctx
        .progress
        .create_spinner(&format!("reading {}", input.display()));
    let mut table = read_table(input)?;
    reading.finish_and_clear();
    info!(
        "{}: scoring {} rows from {}",
        stage,
        table.len(),
        input.display()
    );

    if !table.headers().is_empty() {
        for column in stage.expected_columns() {
            if table.column(column).is_none() {
                warn!(
                    "{}: input has no `{}` column; values default to empty",
                    stage, column
                );
            }
        }
    }

    let progress = ctx.progress.create_bar(table.len() as u64, TEMPLATE_ROWS);
    progress.set_message(stage.name());
    let scorer = ctx.scorer(stage);
    let outcome = score_table(&mut table, stage, scorer.as_ref(), progress.clone());
    progress.finish_and_clear();

    write_table(output, &table)?;
    info!(
        "{}: wrote {} rows to {} ({} failed, {} coerced fields)",
        stage,
        table.len(),
        output.display(),
        outcome.failure_count(),
        outcome.coercions
    );

    Ok(StageReport {
        stage,
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        outcome,
        table,
    })
}

/// Run every stage in order over the default file names in `data_dir`.
pub fn run_pipeline(data_dir: &Path, ctx: &StageContext<'_>) -> Result<Vec<StageReport>, IcpError> {
    Stage::ALL
        .iter()
        .map(|&stage| {
            run_stage(
                stage,
                &stage.default_input(data_dir),
                &stage.default_output(data_dir),
                ctx,
            )
        })
        .collect()
}
