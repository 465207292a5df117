use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table as TextTable};

use crate::formatting::{FormattingConfig, OutputFormatter};
use crate::pipeline::{rank_order, Stage, StageReport, Table};

/// Columns shown in the top-N table for each stage.
pub fn display_columns(stage: Stage) -> &'static [&'static str] {
    match stage {
        Stage::Urgency => &[
            "rank",
            "page_name",
            "combined_score",
            "money_score",
            "urgency_score",
        ],
        Stage::Fit => &[
            "page_name",
            "fit_score",
            "explicit_fit_score",
            "implicit_fit_score",
        ],
        Stage::Vertical => &["page_name", "vertical", "vertical_matched_on"],
    }
}

/// Row indices to display, best first.
///
/// Urgency output is already in rank order. Fit rows are ordered by
/// `fit_score`; vertical rows keep input order.
fn top_rows(stage: Stage, table: &Table, n: usize) -> Vec<usize> {
    let order = match (stage, table.column("fit_score")) {
        (Stage::Fit, Some(column)) => {
            let keys: Vec<f64> = (0..table.len())
                .map(|row| {
                    table
                        .cell(row, column)
                        .and_then(|value| value.parse().ok())
                        .unwrap_or(0.0)
                })
                .collect();
            rank_order(&keys)
        }
        _ => (0..table.len()).collect(),
    };
    order.into_iter().take(n).collect()
}

/// Render the top `n` rows of a stage's output.
pub fn render_top_table(report: &StageReport, n: usize, config: FormattingConfig) -> String {
    let columns = display_columns(report.stage);
    let mut text_table = TextTable::new();
    text_table.set_content_arrangement(ContentArrangement::Dynamic);

    if config.is_plain() {
        text_table.load_preset(ASCII_FULL).force_no_tty();
    } else {
        text_table.load_preset(UTF8_FULL);
    }

    let use_color = config.color.should_use_color();
    if use_color {
        text_table.enforce_styling();
    }
    text_table.set_header(columns.iter().map(|name| {
        let cell = Cell::new(name).add_attribute(Attribute::Bold);
        if use_color {
            cell.fg(Color::Cyan)
        } else {
            cell
        }
    }));

    let indices: Vec<Option<usize>> = columns.iter().map(|name| report.table.column(name)).collect();
    for row in top_rows(report.stage, &report.table, n) {
        text_table.add_row(indices.iter().zip(columns.iter()).map(|(index, name)| {
            let value = index
                .and_then(|i| report.table.cell(row, i))
                .unwrap_or_default();
            let cell = Cell::new(value);
            if *name == "page_name" || *name == "vertical" || *name == "vertical_matched_on" {
                cell
            } else {
                cell.set_alignment(CellAlignment::Right)
            }
        }));
    }

    text_table.to_string()
}

/// One-paragraph summary of a stage run.
pub fn render_stage_summary(report: &StageReport, formatter: &dyn OutputFormatter) -> String {
    let outcome = &report.outcome;
    let status = if outcome.is_complete_success() {
        formatter.success("ok")
    } else {
        formatter.warning(&format!(
            "{} failed ({:.0}% scored)",
            outcome.failure_count(),
            outcome.success_rate() * 100.0
        ))
    };

    let mut lines = vec![
        format!(
            "{} {}",
            formatter.header(&format!("[{}]", report.stage)),
            status
        ),
        format!(
            "  rows: {}  scored: {}  failed: {}  coerced fields: {}",
            outcome.rows,
            outcome.scored,
            outcome.failure_count(),
            outcome.coercions
        ),
        format!("  input:  {}", formatter.dim(&report.input.display().to_string())),
        format!("  output: {}", formatter.bold(&report.output.display().to_string())),
    ];

    const SHOWN_FAILURES: usize = 5;
    for failure in outcome.failures.iter().take(SHOWN_FAILURES) {
        lines.push(format!(
            "  {} row {} ({}): {}",
            formatter.error("x"),
            failure.row,
            failure.page_name,
            failure.error
        ));
    }
    if outcome.failure_count() > SHOWN_FAILURES {
        lines.push(format!(
            "  ... and {} more",
            outcome.failure_count() - SHOWN_FAILURES
        ));
    }

    lines.join("\n")
}
