//! Progress feedback for stage runs.
//!
//! Progress bars go to stderr and are drawn only when someone is watching:
//!
//! - **Quiet Mode**: no progress output (`ICPSCORE_QUIET` env var or `--quiet`)
//! - **Non-TTY**: bars are hidden in CI and when stderr is piped
//!
//! # Examples
//!
//! ```rust,no_run
//! use icpscore::progress::{ProgressConfig, ProgressManager, TEMPLATE_ROWS};
//!
//! let manager = ProgressManager::new(ProgressConfig::from_env(false, 0));
//! let progress = manager.create_bar(100, TEMPLATE_ROWS);
//! progress.set_message("urgency");
//! for _ in 0..100 {
//!     progress.inc(1);
//! }
//! progress.finish_and_clear();
//! ```

use indicatif::{ProgressBar, ProgressStyle};

pub const QUIET_ENV_VAR: &str = "ICPSCORE_QUIET";

// Progress bar templates
pub const TEMPLATE_ROWS: &str = "{msg} {bar:30} {pos}/{len} rows ({percent}%) - {per_sec} - {eta}";
pub const TEMPLATE_SPINNER: &str = "{spinner} {msg}";

/// Configuration for progress display behavior
#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output
    pub quiet_mode: bool,
    /// Verbosity level (0 = basic, 1 = detailed, 2 = very detailed)
    pub verbosity: u8,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        let env_quiet = std::env::var(QUIET_ENV_VAR).is_ok();
        Self {
            quiet_mode: quiet || env_quiet,
            verbosity,
        }
    }

    /// Configuration that never draws anything. Used by tests and
    /// library callers.
    pub fn hidden() -> Self {
        Self {
            quiet_mode: true,
            verbosity: 0,
        }
    }

    /// Determine if progress bars should be displayed
    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }
}

#[derive(Debug, Clone)]
pub struct ProgressManager {
    config: ProgressConfig,
}

impl ProgressManager {
    pub fn new(config: ProgressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProgressConfig {
        &self.config
    }

    /// Create a progress bar with the given length and template.
    ///
    /// Returns a hidden progress bar if progress should not be shown.
    pub fn create_bar(&self, len: u64, template: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        match ProgressStyle::default_bar().template(template) {
            Ok(style) => pb.set_style(style.progress_chars("=> ")),
            Err(e) => tracing::debug!("invalid progress template {:?}: {}", template, e),
        }
        pb
    }

    /// Create a spinner with the given message.
    pub fn create_spinner(&self, msg: &str) -> ProgressBar {
        if !self.config.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(TEMPLATE_SPINNER) {
            pb.set_style(style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(ProgressConfig::hidden())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode_hides_progress() {
        let config = ProgressConfig {
            quiet_mode: true,
            verbosity: 0,
        };
        assert!(!config.should_show_progress());
    }

    #[test]
    fn test_hidden_manager_returns_hidden_bars() {
        let manager = ProgressManager::default();
        assert!(manager.create_bar(10, TEMPLATE_ROWS).is_hidden());
        assert!(manager.create_spinner("loading").is_hidden());
    }

    #[test]
    fn test_from_env_respects_quiet_flag() {
        let config = ProgressConfig::from_env(true, 2);
        assert!(config.quiet_mode);
        assert_eq!(config.verbosity, 2);
    }
}
