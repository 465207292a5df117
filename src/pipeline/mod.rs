//! Tabular scoring pipeline.
//!
//! Stages run strictly in order, each reading the previous stage's
//! artifact and writing a complete new one:
//!
//! ```text
//! m3_money_scored.csv -> urgency -> m4_urgency_scored.csv
//!                     -> fit     -> m5_fit_scored.csv
//!                     -> vertical -> m6_vertical_tagged.csv
//! ```
//!
//! Row scoring is a pure function of the row and the pattern library, so
//! rows are mapped in parallel; all I/O happens at the edges in
//! [`table`].

pub mod ranking;
pub mod runner;
pub mod stage;
pub mod table;

pub use ranking::rank_order;
pub use runner::{
    run_pipeline, run_stage, score_table, RowScorer, ScoredRow, StageContext, StageReport,
};
pub use stage::Stage;
pub use table::{read_table, write_table, Row, Table};
