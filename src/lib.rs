//! icpscore: rule-based ICP scoring for advertiser tables.
//!
//! Reads CSV tables of advertisers (ad copy plus funnel shares), scores
//! urgency and fit from bilingual pattern matches and funnel structure,
//! tags each advertiser with a vertical, and writes complete per-stage
//! artifacts.

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod normalize;
pub mod output;
pub mod patterns;
pub mod pipeline;
pub mod progress;
pub mod record;
pub mod scoring;

// Re-export commonly used types
pub use crate::config::IcpConfig;
pub use crate::errors::{IcpError, RowError, RowFailure, StageOutcome};
pub use crate::normalize::normalize;
pub use crate::patterns::{PatternCategory, PatternLibrary};
pub use crate::pipeline::{run_pipeline, run_stage, Stage, StageContext, StageReport};
pub use crate::record::{AdvertiserRecord, Destination};
pub use crate::scoring::{
    Classification, FitScore, FitScorer, MatchedOn, ScoreBreakdown, UrgencyScore, UrgencyScorer,
    Vertical, VerticalClassifier,
};
