//! Urgency scoring (0-50).
//!
//! Measures how time-sensitive an advertiser's funnel is: how much of their
//! spend routes to live channels (message, call), how much to lead forms,
//! and how much urgency and qualification language the copy carries.
//!
//! | Component       | Formula                                               | Cap |
//! |-----------------|-------------------------------------------------------|-----|
//! | `direct`        | `floor((1.5 * message + 1.0 * call) * 25)`            | 25  |
//! | `form`          | `floor(form * 10)`                                    | 10  |
//! | `immediacy`     | 2 points per distinct immediacy pattern               | 10  |
//! | `qualification` | 2 points per distinct qualification pattern           | 5   |
//!
//! Message is weighted above call because conversational channels set a
//! faster response expectation.

use serde::Serialize;

use super::breakdown::{scaled, ScoreBreakdown};
use crate::config::UrgencyWeights;
use crate::errors::RowError;
use crate::normalize::normalize;
use crate::patterns::{PatternCategory, PatternLibrary};
use crate::record::AdvertiserRecord;

pub const MAX_URGENCY: u32 = 50;
pub const MAX_DIRECT: u32 = 25;
pub const MAX_FORM: u32 = 10;
pub const MAX_IMMEDIACY: u32 = 10;
pub const MAX_QUALIFICATION: u32 = 5;

/// Urgency score with its audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrgencyScore {
    pub total: u32,
    pub direct: u32,
    pub form: u32,
    pub immediacy: u32,
    pub qualification: u32,
    pub breakdown: ScoreBreakdown,
}

impl UrgencyScore {
    /// Sentinel for rows that failed to score.
    pub fn zero() -> Self {
        let mut breakdown = ScoreBreakdown::new();
        for name in ["direct", "form", "immediacy", "qualification"] {
            breakdown.push_capped(name, 0, 0);
        }
        Self {
            total: 0,
            direct: 0,
            form: 0,
            immediacy: 0,
            qualification: 0,
            breakdown,
        }
    }
}

pub struct UrgencyScorer<'a> {
    library: &'a PatternLibrary,
    weights: UrgencyWeights,
}

impl<'a> UrgencyScorer<'a> {
    pub fn new(library: &'a PatternLibrary, weights: UrgencyWeights) -> Self {
        Self { library, weights }
    }

    pub fn score(&self, record: &AdvertiserRecord) -> Result<UrgencyScore, RowError> {
        let text = normalize(record.ad_text());
        let mut breakdown = ScoreBreakdown::new();

        let direct = breakdown.push_capped(
            "direct",
            self.direct_points(record.share_message, record.share_call),
            MAX_DIRECT,
        );
        let form = breakdown.push_capped("form", floor_points(record.share_form * 10.0), MAX_FORM);
        let immediacy = breakdown.push_capped(
            "immediacy",
            scaled(
                self.library
                    .distinct_matches(PatternCategory::Immediacy, &text),
                self.weights.immediacy_points,
            ),
            MAX_IMMEDIACY,
        );
        let qualification = breakdown.push_capped(
            "qualification",
            scaled(
                self.library
                    .distinct_matches(PatternCategory::Qualification, &text),
                self.weights.qualification_points,
            ),
            MAX_QUALIFICATION,
        );

        let total = breakdown.sum().min(MAX_URGENCY);
        debug_assert_eq!(total, breakdown.sum());

        Ok(UrgencyScore {
            total,
            direct,
            form,
            immediacy,
            qualification,
            breakdown,
        })
    }

    fn direct_points(&self, share_message: f64, share_call: f64) -> u32 {
        let weighted =
            self.weights.message_weight * share_message + self.weights.call_weight * share_call;
        floor_points(weighted * f64::from(MAX_DIRECT))
    }
}

/// `floor(value)` as points; negative or non-finite values give 0.
fn floor_points(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const SNIPPETS: &[&str] = &[
        "limited spots",
        "today only",
        "hurry",
        "requirements",
        "eligibility",
        "cupos limitados",
        "requisitos",
        "si calificas",
        "free estimate",
        "call us",
        "",
    ];

    fn text_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(SNIPPETS), 0..8).prop_map(|parts| parts.join(". "))
    }

    proptest! {
        #[test]
        fn total_is_bounded_and_equals_breakdown_sum(
            message in 0.0..=1.0f64,
            call in 0.0..=1.0f64,
            form in 0.0..=1.0f64,
            text in text_strategy(),
        ) {
            let library = PatternLibrary::builtin().unwrap();
            let scorer = UrgencyScorer::new(&library, UrgencyWeights::default());
            let record = AdvertiserRecord {
                share_message: message,
                share_call: call,
                share_form: form,
                ad_texts_combined: Some(text),
                ..Default::default()
            };
            let score = scorer.score(&record).unwrap();
            prop_assert!(score.total <= MAX_URGENCY);
            prop_assert_eq!(score.total, score.breakdown.sum());
            prop_assert_eq!(
                score.total,
                score.direct + score.form + score.immediacy + score.qualification
            );
        }

        #[test]
        fn direct_is_monotonic_in_message_share(
            low in 0.0..=1.0f64,
            delta in 0.0..=1.0f64,
            call in 0.0..=1.0f64,
        ) {
            let high = (low + delta).min(1.0);
            let library = PatternLibrary::builtin().unwrap();
            let scorer = UrgencyScorer::new(&library, UrgencyWeights::default());
            let base = AdvertiserRecord { share_message: low, share_call: call, ..Default::default() };
            let raised = AdvertiserRecord { share_message: high, ..base.clone() };
            prop_assert!(scorer.score(&raised).unwrap().direct >= scorer.score(&base).unwrap().direct);
        }

        #[test]
        fn scoring_is_deterministic(
            message in 0.0..=1.0f64,
            text in text_strategy(),
        ) {
            let library = PatternLibrary::builtin().unwrap();
            let scorer = UrgencyScorer::new(&library, UrgencyWeights::default());
            let record = AdvertiserRecord {
                share_message: message,
                ad_texts_combined: Some(text),
                ..Default::default()
            };
            prop_assert_eq!(scorer.score(&record).unwrap(), scorer.score(&record).unwrap());
        }
    }
}
