use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{load_config, IcpConfig};
use crate::formatting::FormattingConfig;
use crate::patterns::PatternLibrary;
use crate::progress::{ProgressConfig, ProgressManager};
use crate::scoring::VerticalClassifier;

/// Global flags that apply to every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub verbosity: u8,
    pub quiet: bool,
    pub plain: bool,
    pub config: Option<PathBuf>,
}

/// Resolved configuration and output settings for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: IcpConfig,
    pub config_source: Option<PathBuf>,
    pub formatting: FormattingConfig,
    pub progress: ProgressConfig,
    pub quiet: bool,
}

impl Session {
    pub fn load(options: &GlobalOptions) -> Result<Self> {
        let loaded = load_config(options.config.as_deref()).context("Failed to load configuration")?;
        match &loaded.source {
            Some(path) => debug!("Using configuration from {}", path.display()),
            None => debug!("Using default configuration"),
        }
        Ok(Self::with_config(loaded.config, loaded.source, options))
    }

    pub fn with_config(
        config: IcpConfig,
        config_source: Option<PathBuf>,
        options: &GlobalOptions,
    ) -> Self {
        Self {
            config,
            config_source,
            formatting: FormattingConfig::resolve(options.plain),
            progress: ProgressConfig::from_env(options.quiet, options.verbosity),
            quiet: options.quiet,
        }
    }

    /// Compile the built-in catalog plus any `[patterns.extra]` sources.
    pub fn pattern_library(&self) -> Result<PatternLibrary> {
        let extra = self.config.patterns.resolve()?;
        let library =
            PatternLibrary::with_overrides(&extra).context("Failed to compile pattern library")?;
        debug!("Compiled {} patterns", library.pattern_count());
        Ok(library)
    }

    pub fn vertical_classifier(&self) -> Result<VerticalClassifier> {
        VerticalClassifier::builtin().context("Failed to compile vertical rules")
    }

    pub fn progress_manager(&self) -> ProgressManager {
        ProgressManager::new(self.progress.clone())
    }
}
