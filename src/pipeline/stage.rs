use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::scoring::fit::{EXPLICIT_COMPONENTS, IMPLICIT_COMPONENTS};

/// Scoring stages, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Urgency,
    Fit,
    Vertical,
}

pub const URGENCY_COLUMNS: [&str; 8] = [
    "urgency_score",
    "urgency_breakdown",
    "urgency_direct",
    "urgency_form",
    "urgency_immediacy",
    "urgency_qualification",
    "combined_score",
    "rank",
];

pub const VERTICAL_COLUMNS: [&str; 2] = ["vertical", "vertical_matched_on"];

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Urgency, Stage::Fit, Stage::Vertical];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Urgency => "urgency",
            Stage::Fit => "fit",
            Stage::Vertical => "vertical",
        }
    }

    /// Default input file name within the data directory.
    pub fn input_file(&self) -> &'static str {
        match self {
            Stage::Urgency => "m3_money_scored.csv",
            Stage::Fit => "m4_urgency_scored.csv",
            Stage::Vertical => "m5_fit_scored.csv",
        }
    }

    /// Default output file name within the data directory.
    pub fn output_file(&self) -> &'static str {
        match self {
            Stage::Urgency => "m4_urgency_scored.csv",
            Stage::Fit => "m5_fit_scored.csv",
            Stage::Vertical => "m6_vertical_tagged.csv",
        }
    }

    pub fn default_input(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.input_file())
    }

    pub fn default_output(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.output_file())
    }

    /// Operator hint for a missing input file.
    pub fn upstream_hint(&self) -> &'static str {
        match self {
            Stage::Urgency => "Run the money scoring stage first.",
            Stage::Fit => "Run `icpscore urgency` first.",
            Stage::Vertical => "Run `icpscore fit` first.",
        }
    }

    /// Column carrying per-row error messages, if the stage has one.
    pub fn error_column(&self) -> Option<&'static str> {
        match self {
            Stage::Urgency => Some("urgency_error"),
            Stage::Fit => Some("fit_error"),
            Stage::Vertical => None,
        }
    }

    /// Score columns the stage writes, in order, excluding its error column.
    pub fn value_columns(&self) -> Vec<String> {
        match self {
            Stage::Urgency => URGENCY_COLUMNS.iter().map(|c| c.to_string()).collect(),
            Stage::Fit => fit_columns(),
            Stage::Vertical => VERTICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Every column the stage writes, error column last.
    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = self.value_columns();
        columns.extend(self.error_column().map(str::to_string));
        columns
    }

    /// Input columns the stage reads. Absent ones coerce to empty/zero.
    pub fn expected_columns(&self) -> &'static [&'static str] {
        match self {
            Stage::Urgency => &[
                "page_name",
                "ad_texts_combined",
                "share_message",
                "share_call",
                "share_form",
                "money_score",
            ],
            Stage::Fit => &[
                "page_name",
                "ad_texts_combined",
                "share_message",
                "share_call",
                "share_form",
            ],
            Stage::Vertical => &["page_name", "ad_texts_combined"],
        }
    }

    /// Whether output rows are written in rank order.
    pub fn is_ranked(&self) -> bool {
        matches!(self, Stage::Urgency)
    }

    /// Headline score column, used by summaries.
    pub fn score_column(&self) -> &'static str {
        match self {
            Stage::Urgency => "urgency_score",
            Stage::Fit => "fit_score",
            Stage::Vertical => "vertical",
        }
    }
}

fn fit_columns() -> Vec<String> {
    let mut columns: Vec<String> = [
        "fit_score",
        "explicit_fit_score",
        "implicit_fit_score",
        "fit_breakdown",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();
    columns.extend(
        EXPLICIT_COMPONENTS
            .iter()
            .chain(IMPLICIT_COMPONENTS.iter())
            .map(|name| format!("fit_{}", name)),
    );
    columns
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
