pub mod summary;
pub mod terminal;

pub use summary::{write_summaries, RunSummary};
pub use terminal::{display_columns, render_stage_summary, render_top_table};
