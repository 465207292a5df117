//! CLI module for icpscore
//!
//! - Argument parsing (`args`)
//! - Runtime setup: thread pool and logging (`setup`)
//!
//! Command handlers live in [`crate::commands`].

pub mod args;
pub mod setup;

pub use args::{parse_args, Cli, Commands, StageOptions};
pub use setup::{
    build_env_filter, configure_thread_pool, get_worker_count, init_tracing, verbosity_directive,
    LOG_ENV_VAR,
};
