use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::core::IcpConfig;
use super::scoring::UrgencyWeights;
use crate::errors::IcpError;

pub const CONFIG_FILE_NAME: &str = ".icpscore.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Configuration together with the file it came from, if any.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: IcpConfig,
    pub source: Option<PathBuf>,
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<IcpConfig, String> {
    let mut config = toml::from_str::<IcpConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Err(e) = config.urgency.validate() {
        warn!("Invalid urgency weights: {}. Using defaults.", e);
        config.urgency = UrgencyWeights::default();
    }

    Ok(config)
}

/// Load an explicitly requested config file. Any failure is fatal.
pub fn load_config_from(path: &Path) -> Result<LoadedConfig, IcpError> {
    let contents = fs::read_to_string(path).map_err(|e| IcpError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let config = parse_and_validate_config(&contents).map_err(|message| IcpError::Config {
        path: path.to_path_buf(),
        message,
    })?;
    debug!("Loaded config from {}", path.display());
    Ok(LoadedConfig {
        config,
        source: Some(path.to_path_buf()),
    })
}

/// Try a discovered config file; unreadable or invalid files fall back to
/// defaults with a warning.
fn try_load_config_from_path(config_path: &Path) -> Option<IcpConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Candidate config locations, nearest first.
pub fn candidate_paths(start: PathBuf) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("icpscore").join("config.toml"));
    }
    candidates
}

/// Discover configuration from `start` upwards, then the user config dir.
pub fn discover_config(start: PathBuf) -> LoadedConfig {
    candidate_paths(start)
        .into_iter()
        .find_map(|path| {
            try_load_config_from_path(&path).map(|config| LoadedConfig {
                config,
                source: Some(path),
            })
        })
        .unwrap_or_else(|| {
            debug!("No config file found. Using default config.");
            LoadedConfig::default()
        })
}

/// Resolve configuration for a run: explicit path if given, else discovery
/// from the current directory.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, IcpError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }
    match std::env::current_dir() {
        Ok(dir) => Ok(discover_config(dir)),
        Err(e) => {
            warn!("Failed to get current directory: {}. Using default config.", e);
            Ok(LoadedConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let start = PathBuf::from("/a/b/c/d");
        let ancestors: Vec<_> = directory_ancestors(start, 3).collect();
        assert_eq!(
            ancestors,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b")
            ]
        );
    }

    #[test]
    fn test_invalid_urgency_weights_revert_to_defaults() {
        let config = parse_and_validate_config("[urgency]\nmessage_weight = -3.0\n").unwrap();
        assert_eq!(config.urgency, UrgencyWeights::default());
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = parse_and_validate_config("[urgency\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_discovery_finds_config_in_parent_directory() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[paths]\ndata_dir = \"exports\"\n",
        )
        .unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let loaded = discover_config(nested);
        assert_eq!(loaded.config.paths.data_dir, PathBuf::from("exports"));
        assert_eq!(loaded.source, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_invalid_discovered_config_is_skipped() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "not = [valid").unwrap();
        let loaded = discover_config(temp.path().to_path_buf());
        assert_ne!(loaded.source, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_explicit_missing_config_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(matches!(err, IcpError::Config { .. }));
    }
}
