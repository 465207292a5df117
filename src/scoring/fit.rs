//! Fit scoring (0-50): explicit (0-30) plus implicit (0-20).
//!
//! Explicit fit rewards pre-qualification that is visible in the ad copy.
//! Implicit fit recovers the same signal from funnel structure for
//! advertisers who qualify live, in a chat or on a call, and would otherwise
//! be penalized for having sparse copy.
//!
//! The sub-score caps sum exactly to the explicit and implicit caps, so
//! `total == explicit + implicit` holds for every input.

use serde::Serialize;

use super::breakdown::{scaled, ScoreBreakdown};
use crate::config::FitConfig;
use crate::errors::RowError;
use crate::normalize::{normalize, normalize_opt};
use crate::patterns::{PatternCategory, PatternLibrary};
use crate::record::AdvertiserRecord;

pub const MAX_FIT: u32 = 50;
pub const MAX_EXPLICIT: u32 = 30;
pub const MAX_IMPLICIT: u32 = 20;

const POINTS_PER_MATCH: u32 = 2;

// Explicit sub-score caps
const MAX_QUESTION_MARKS: u32 = 2;
const MAX_QUALIFICATION_DEPTH: u32 = 10;
const MAX_CONSULT_BOOKING: u32 = 6;
const MAX_FOLLOWUP: u32 = 4;
const MAX_MULTISTEP: u32 = 4;
const MAX_COMPLEXITY: u32 = 4;

// Implicit sub-score caps
const MAX_CONVERSATIONAL_ENTRY: u32 = 6;
const MAX_GENERIC_CTA: u32 = 4;
const MAX_SERVICE_BREADTH: u32 = 4;
const MAX_ADVISOR: u32 = 4;
const MAX_REGULATED: u32 = 2;

// Complexity flag increments
const MULTI_CTA_POINTS: u32 = 2;
const CAROUSEL_POINTS: u32 = 1;
const MULTI_DESTINATION_POINTS: u32 = 1;

/// Sub-score names in breakdown order.
pub const EXPLICIT_COMPONENTS: [&str; 6] = [
    "question_marks",
    "qualification_depth",
    "consult_booking",
    "followup",
    "multistep",
    "complexity",
];

pub const IMPLICIT_COMPONENTS: [&str; 5] = [
    "conversational_entry",
    "generic_cta",
    "service_breadth",
    "advisor",
    "regulated",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FitScore {
    pub total: u32,
    pub explicit: u32,
    pub implicit: u32,
    pub explicit_breakdown: ScoreBreakdown,
    pub implicit_breakdown: ScoreBreakdown,
}

impl FitScore {
    /// Sentinel for rows that failed to score.
    pub fn zero() -> Self {
        let mut explicit_breakdown = ScoreBreakdown::new();
        for name in EXPLICIT_COMPONENTS {
            explicit_breakdown.push_capped(name, 0, 0);
        }
        let mut implicit_breakdown = ScoreBreakdown::new();
        for name in IMPLICIT_COMPONENTS {
            implicit_breakdown.push_capped(name, 0, 0);
        }
        Self {
            total: 0,
            explicit: 0,
            implicit: 0,
            explicit_breakdown,
            implicit_breakdown,
        }
    }

    /// Explicit then implicit components, in order.
    pub fn breakdown(&self) -> ScoreBreakdown {
        let mut combined = self.explicit_breakdown.clone();
        combined.extend(&self.implicit_breakdown);
        combined
    }

    pub fn component(&self, name: &str) -> Option<u32> {
        self.explicit_breakdown
            .get(name)
            .or_else(|| self.implicit_breakdown.get(name))
    }
}

/// Structural flags behind the complexity sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplexityFlags {
    pub multi_cta: bool,
    pub carousel: bool,
    pub multi_destination: bool,
}

impl ComplexityFlags {
    pub fn points(&self) -> u32 {
        let mut points = 0;
        if self.multi_cta {
            points += MULTI_CTA_POINTS;
        }
        if self.carousel {
            points += CAROUSEL_POINTS;
        }
        if self.multi_destination {
            points += MULTI_DESTINATION_POINTS;
        }
        points
    }
}

pub struct FitScorer<'a> {
    library: &'a PatternLibrary,
    config: FitConfig,
}

impl<'a> FitScorer<'a> {
    pub fn new(library: &'a PatternLibrary, config: FitConfig) -> Self {
        Self { library, config }
    }

    pub fn score(&self, record: &AdvertiserRecord) -> Result<FitScore, RowError> {
        let text = normalize(record.ad_text());

        let explicit_breakdown = self.explicit(record, &text);
        let implicit_breakdown = self.implicit(record, &text);

        let explicit = explicit_breakdown.sum().min(MAX_EXPLICIT);
        let implicit = implicit_breakdown.sum().min(MAX_IMPLICIT);
        let total = (explicit + implicit).min(MAX_FIT);
        debug_assert_eq!(total, explicit + implicit);

        Ok(FitScore {
            total,
            explicit,
            implicit,
            explicit_breakdown,
            implicit_breakdown,
        })
    }

    fn explicit(&self, record: &AdvertiserRecord, text: &str) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::new();
        breakdown.push_capped(
            "question_marks",
            question_mark_points(text),
            MAX_QUESTION_MARKS,
        );
        breakdown.push_capped(
            "qualification_depth",
            self.scaled_matches(PatternCategory::QualificationExpanded, text),
            MAX_QUALIFICATION_DEPTH,
        );
        breakdown.push_capped(
            "consult_booking",
            self.scaled_matches(PatternCategory::ConsultBooking, text),
            MAX_CONSULT_BOOKING,
        );
        breakdown.push_capped(
            "followup",
            self.scaled_matches(PatternCategory::Followup, text),
            MAX_FOLLOWUP,
        );
        breakdown.push_capped(
            "multistep",
            self.scaled_matches(PatternCategory::Multistep, text),
            MAX_MULTISTEP,
        );
        breakdown.push_capped(
            "complexity",
            self.complexity_flags(record).points(),
            MAX_COMPLEXITY,
        );
        breakdown
    }

    fn implicit(&self, record: &AdvertiserRecord, text: &str) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::new();

        let priced = self.library.is_match(PatternCategory::PriceDiscount, text);
        let conversational = record.primary_destination().is_conversational() && !priced;
        breakdown.push_capped(
            "conversational_entry",
            if conversational { MAX_CONVERSATIONAL_ENTRY } else { 0 },
            MAX_CONVERSATIONAL_ENTRY,
        );

        let qualified_in_copy = self
            .library
            .is_match(PatternCategory::QualificationExpanded, text);
        let generic_entry = record
            .primary_cta
            .as_deref()
            .is_some_and(|cta| self.config.is_generic_cta(cta))
            && !qualified_in_copy;
        breakdown.push_capped(
            "generic_cta",
            if generic_entry { MAX_GENERIC_CTA } else { 0 },
            MAX_GENERIC_CTA,
        );

        breakdown.push_capped(
            "service_breadth",
            self.scaled_matches(PatternCategory::ServiceBreadth, text),
            MAX_SERVICE_BREADTH,
        );
        breakdown.push_capped(
            "advisor",
            self.scaled_matches(PatternCategory::AdvisorLanguage, text),
            MAX_ADVISOR,
        );

        let category = normalize_opt(record.page_category.as_deref());
        let regulated = self.library.is_match(PatternCategory::RegulatedDomain, &category)
            || self.library.is_match(PatternCategory::RegulatedDomain, text);
        breakdown.push_capped(
            "regulated",
            if regulated { MAX_REGULATED } else { 0 },
            MAX_REGULATED,
        );

        breakdown
    }

    pub fn complexity_flags(&self, record: &AdvertiserRecord) -> ComplexityFlags {
        ComplexityFlags {
            multi_cta: record.cta_types.len() >= 2,
            carousel: record
                .display_formats
                .iter()
                .any(|format| self.config.is_carousel(format)),
            multi_destination: record.active_destination_count() >= 2,
        }
    }

    fn scaled_matches(&self, category: PatternCategory, text: &str) -> u32 {
        scaled(
            self.library.distinct_matches(category, text),
            POINTS_PER_MATCH,
        )
    }
}

/// Step function: none => 0, at least one => 1, at least three => 2.
fn question_mark_points(text: &str) -> u32 {
    match text.matches('?').count() {
        0 => 0,
        1 | 2 => 1,
        _ => 2,
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    const SNIPPETS: &[&str] = &[
        "requirements",
        "do you qualify?",
        "book a free consultation",
        "we'll reach out",
        "answer a few questions",
        "our team of advisors",
        "full-service",
        "20% off",
        "mortgage",
        "agenda tu cita",
        "requisitos",
        "",
    ];

    const CTAS: &[&str] = &["CALL_NOW", "LEARN_MORE", "WHATSAPP_MESSAGE", "SIGN_UP", "CONTACT_US"];

    fn record_strategy() -> impl Strategy<Value = AdvertiserRecord> {
        (
            prop::collection::vec(prop::sample::select(SNIPPETS), 0..10),
            0.0..=1.0f64,
            0.0..=1.0f64,
            0.0..=1.0f64,
            prop::collection::vec(prop::sample::select(CTAS), 0..3),
            any::<bool>(),
        )
            .prop_map(|(parts, message, call, form, ctas, carousel)| {
                let cta_types: Vec<String> = ctas.iter().map(|c| c.to_string()).collect();
                AdvertiserRecord {
                    ad_texts_combined: Some(parts.join(". ")),
                    share_message: message,
                    share_call: call,
                    share_form: form,
                    primary_cta: cta_types.first().cloned(),
                    cta_types,
                    display_formats: if carousel {
                        vec!["CAROUSEL".to_string()]
                    } else {
                        Vec::new()
                    },
                    ..Default::default()
                }
            })
    }

    proptest! {
        #[test]
        fn fit_total_is_sum_of_bounded_parts(record in record_strategy()) {
            let library = PatternLibrary::builtin().unwrap();
            let scorer = FitScorer::new(&library, FitConfig::default());
            let score = scorer.score(&record).unwrap();

            prop_assert!(score.explicit <= MAX_EXPLICIT);
            prop_assert!(score.implicit <= MAX_IMPLICIT);
            prop_assert!(score.total <= MAX_FIT);
            prop_assert_eq!(score.total, score.explicit + score.implicit);
            prop_assert_eq!(score.explicit, score.explicit_breakdown.sum());
            prop_assert_eq!(score.implicit, score.implicit_breakdown.sum());
        }
    }
}
