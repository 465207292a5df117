//! Pattern library: compiled regular expressions per semantic category.
//!
//! Every scorer asks the same question of ad copy, "how many distinct phrases
//! of kind X does this text contain?", so the library exposes exactly that
//! per [`PatternCategory`]. Sources are folded with
//! [`crate::normalize::fold_accents`] and compiled case-insensitively once per
//! process; the resulting [`PatternLibrary`] is immutable and shared by
//! reference across worker threads.
//!
//! # Examples
//!
//! ```rust
//! use icpscore::normalize::normalize;
//! use icpscore::patterns::{PatternCategory, PatternLibrary};
//!
//! let library = PatternLibrary::builtin().unwrap();
//! let text = normalize("¡Cupos limitados! Llama YA");
//! assert_eq!(library.distinct_matches(PatternCategory::Immediacy, &text), 2);
//! ```

pub mod catalog;
pub mod library;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use library::{PatternLibrary, PatternSet};

/// Semantic category of ad-copy language.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Urgent or time-bound response expectations ("limited spots", "solo hoy")
    Immediacy,
    /// Eligibility and pre-screening requirements
    Qualification,
    /// Qualification plus financing-contingent phrasing
    QualificationExpanded,
    /// Scheduling and booking intent
    ConsultBooking,
    /// Promises of a future contact
    Followup,
    /// Multi-step qualification flows
    Multistep,
    /// Explicit prices and discounts
    PriceDiscount,
    /// Human intermediary roles
    AdvisorLanguage,
    /// Generic, non-specific service descriptions
    ServiceBreadth,
    /// Legal, healthcare, education and financial services
    RegulatedDomain,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 10] = [
        PatternCategory::Immediacy,
        PatternCategory::Qualification,
        PatternCategory::QualificationExpanded,
        PatternCategory::ConsultBooking,
        PatternCategory::Followup,
        PatternCategory::Multistep,
        PatternCategory::PriceDiscount,
        PatternCategory::AdvisorLanguage,
        PatternCategory::ServiceBreadth,
        PatternCategory::RegulatedDomain,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.name() == name.trim())
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternCategory::Immediacy => "immediacy",
            PatternCategory::Qualification => "qualification",
            PatternCategory::QualificationExpanded => "qualification_expanded",
            PatternCategory::ConsultBooking => "consult_booking",
            PatternCategory::Followup => "followup",
            PatternCategory::Multistep => "multistep",
            PatternCategory::PriceDiscount => "price_discount",
            PatternCategory::AdvisorLanguage => "advisor_language",
            PatternCategory::ServiceBreadth => "service_breadth",
            PatternCategory::RegulatedDomain => "regulated_domain",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
