//! CLI command implementations for icpscore.
//!
//! Available commands:
//! - **urgency / fit / vertical**: run one scoring stage (`score`)
//! - **run**: run every stage in order (`score`)
//! - **explain**: show how one piece of ad copy is read
//! - **patterns**: list the compiled pattern catalog
//! - **init**: write a default `.icpscore.toml`
//!
//! Handlers return `anyhow::Result`; typed errors from the library are
//! wrapped with context here.

pub mod explain;
pub mod init;
pub mod patterns;
pub mod score;
pub mod session;

pub use explain::{explain_text, handle_explain, Explanation};
pub use init::{init_config, init_config_at};
pub use patterns::handle_patterns;
pub use score::{handle_run, handle_stage};
pub use session::{GlobalOptions, Session};
