//! Stage commands: `urgency`, `fit`, `vertical` and `run`.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;

use super::session::Session;
use crate::cli::StageOptions;
use crate::formatting::ColoredFormatter;
use crate::output::{render_stage_summary, render_top_table, write_summaries, RunSummary};
use crate::pipeline::{run_pipeline, run_stage, Stage, StageContext, StageReport};

/// Run a single stage. Paths default to the configured data directory.
pub fn handle_stage(
    session: &Session,
    stage: Stage,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    options: &StageOptions,
) -> Result<()> {
    let data_dir = &session.config.paths.data_dir;
    let input = input.unwrap_or_else(|| stage.default_input(data_dir));
    let output = output.unwrap_or_else(|| stage.default_output(data_dir));

    let library = session.pattern_library()?;
    let classifier = session.vertical_classifier()?;
    let ctx = StageContext::new(&library, &classifier, &session.config)
        .with_progress(session.progress_manager());

    let report = run_stage(stage, &input, &output, &ctx)
        .with_context(|| format!("{} stage failed", stage))?;
    report_stages(session, &[report], options)
}

/// Run urgency, fit and vertical in order.
pub fn handle_run(session: &Session, data_dir: Option<PathBuf>, options: &StageOptions) -> Result<()> {
    let data_dir = data_dir.unwrap_or_else(|| session.config.paths.data_dir.clone());

    let library = session.pattern_library()?;
    let classifier = session.vertical_classifier()?;
    let ctx = StageContext::new(&library, &classifier, &session.config)
        .with_progress(session.progress_manager());

    let reports = run_pipeline(&data_dir, &ctx)
        .with_context(|| format!("pipeline run in {} failed", data_dir.display()))?;
    report_stages(session, &reports, options)
}

fn report_stages(session: &Session, reports: &[StageReport], options: &StageOptions) -> Result<()> {
    if !session.quiet {
        let formatter = ColoredFormatter::new(session.formatting);
        for report in reports {
            println!("{}", render_stage_summary(report, &formatter));
            if let Some(n) = options.top {
                println!("{}", render_top_table(report, n, session.formatting));
            }
        }
    }

    if let Some(path) = &options.summary {
        let generated_at = Utc::now();
        let summaries: Vec<RunSummary> = reports
            .iter()
            .map(|report| RunSummary::from_report(report, generated_at))
            .collect();
        write_summaries(path, &summaries)
            .with_context(|| format!("Failed to write summary to {}", path.display()))?;
    }

    Ok(())
}
