//! Configuration for icpscore.
//!
//! Settings live in `.icpscore.toml`, discovered by walking up from the
//! current directory (see [`loader`]). Every field has a default, so an
//! absent or empty file is a valid configuration.
//!
//! - `core`: root [`IcpConfig`] structure, paths and pattern overrides
//! - `scoring`: urgency weights and fit settings
//! - `loader`: discovery, parsing and validation

pub mod core;
pub mod loader;
pub mod scoring;

pub use self::core::{IcpConfig, PathsConfig, PatternOverrides};
pub use loader::{
    discover_config, load_config, load_config_from, parse_and_validate_config, LoadedConfig,
    CONFIG_FILE_NAME,
};
pub use scoring::{FitConfig, UrgencyWeights, MAX_POINTS_PER_MATCH};

/// Default configuration document written by `icpscore init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# icpscore configuration

[paths]
# Directory holding the stage tables (m3_money_scored.csv, m4_..., m5_..., m6_...)
data_dir = "data"

[urgency]
# Direct-channel score = min(25, floor((message_weight * share_message + call_weight * share_call) * 25))
message_weight = 1.5
call_weight = 1.0
# Points per distinct matching pattern (immediacy caps at 10, qualification at 5)
immediacy_points = 2
qualification_points = 2

[fit]
generic_ctas = ["CALL_NOW", "MESSAGE_PAGE", "SEND_MESSAGE", "WHATSAPP_MESSAGE", "CONTACT_US"]
carousel_formats = ["CAROUSEL"]

[patterns.extra]
# Extra regex sources per category, matched against lowercase, accent-free text.
# immediacy = ['\bflash sale\b']
"#;
