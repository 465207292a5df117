use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::scoring::{FitConfig, UrgencyWeights};
use crate::errors::IcpError;
use crate::patterns::PatternCategory;

/// Root configuration structure for icpscore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IcpConfig {
    /// Default file locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Urgency scoring weights
    #[serde(default)]
    pub urgency: UrgencyWeights,

    /// Fit scoring configuration
    #[serde(default)]
    pub fit: FitConfig,

    /// Additional pattern sources
    #[serde(default)]
    pub patterns: PatternOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the stage tables
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Extra pattern sources appended to the built-in catalog, keyed by
/// category name (`immediacy`, `price_discount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PatternOverrides {
    #[serde(default)]
    pub extra: BTreeMap<String, Vec<String>>,
}

impl PatternOverrides {
    /// Map category names onto [`PatternCategory`], rejecting unknown names.
    pub fn resolve(&self) -> Result<BTreeMap<PatternCategory, Vec<String>>, IcpError> {
        self.extra
            .iter()
            .map(|(name, sources)| {
                PatternCategory::from_name(name)
                    .map(|category| (category, sources.clone()))
                    .ok_or_else(|| {
                        IcpError::InvalidConfig(format!(
                            "unknown pattern category `{}` in [patterns.extra]",
                            name
                        ))
                    })
            })
            .collect()
    }
}
