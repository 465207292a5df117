//! Setup and initialization functions for CLI
//!
//! This module contains functions for initializing the runtime environment,
//! including thread pool configuration and logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "ICPSCORE_LOG";

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        // Already configured - this is fine, just ignore
        tracing::debug!("Thread pool already configured: {}", e);
    }
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

/// Default filter directive for a verbosity level.
pub fn verbosity_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Resolve the tracing filter: `ICPSCORE_LOG`, then `RUST_LOG`, then the
/// verbosity flags. `--quiet` always wins.
pub fn build_env_filter(verbosity: u8, quiet: bool) -> EnvFilter {
    let fallback = || EnvFilter::new(verbosity_directive(verbosity, quiet));
    if quiet {
        return fallback();
    }
    [LOG_ENV_VAR, "RUST_LOG"]
        .iter()
        .find_map(|var| {
            std::env::var(var)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .and_then(|value| EnvFilter::try_new(value).ok())
        })
        .unwrap_or_else(fallback)
}

/// Install the global tracing subscriber, writing to stderr.
pub fn init_tracing(verbosity: u8, quiet: bool, plain: bool) {
    let result = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbosity, quiet))
        .with_writer(std::io::stderr)
        .with_ansi(!plain)
        .with_target(false)
        .try_init();

    if let Err(e) = result {
        // A subscriber is already installed (e.g. by an embedding test)
        eprintln!("Note: tracing already initialized: {}", e);
    }
}
