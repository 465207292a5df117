//! Row scorers.
//!
//! Each scorer borrows an immutable [`crate::patterns::PatternLibrary`] and
//! maps one [`crate::record::AdvertiserRecord`] to a bounded score. Scorers
//! hold no mutable state and are `Sync`, so the stage driver shares one
//! instance across all worker threads.

pub mod breakdown;
pub mod fit;
pub mod urgency;
pub mod vertical;

pub use breakdown::{Component, ScoreBreakdown};
pub use fit::{ComplexityFlags, FitScore, FitScorer};
pub use urgency::{UrgencyScore, UrgencyScorer};
pub use vertical::{Classification, MatchedOn, Vertical, VerticalClassifier, VerticalRule};
