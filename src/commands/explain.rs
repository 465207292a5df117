//! `icpscore explain`: show how a piece of ad copy is read.
//!
//! Useful when tuning `[patterns.extra]`: prints the normalized text, the
//! patterns that fire per category, and what the scorers make of the text
//! on its own (all funnel shares zero).

use anyhow::Result;
use serde::Serialize;

use super::session::Session;
use crate::config::IcpConfig;
use crate::formatting::{ColoredFormatter, OutputFormatter};
use crate::normalize::normalize;
use crate::patterns::{PatternCategory, PatternLibrary};
use crate::record::AdvertiserRecord;
use crate::scoring::{Classification, FitScorer, UrgencyScorer, VerticalClassifier};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatches {
    pub category: PatternCategory,
    pub distinct: usize,
    pub occurrences: usize,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub normalized: String,
    pub matches: Vec<CategoryMatches>,
    pub urgency_breakdown: String,
    pub urgency_total: u32,
    pub fit_breakdown: String,
    pub fit_total: u32,
    pub classification: Classification,
}

/// Pure function: explain `text` against the library and classifier.
///
/// With `only` set, just that category is listed (even with no matches);
/// otherwise every category with at least one match.
pub fn explain_text(
    text: &str,
    page_category: Option<&str>,
    only: Option<PatternCategory>,
    library: &PatternLibrary,
    classifier: &VerticalClassifier,
    config: &IcpConfig,
) -> Explanation {
    let normalized = normalize(text);
    let categories: Vec<PatternCategory> = match only {
        Some(category) => vec![category],
        None => PatternCategory::ALL.to_vec(),
    };

    let matches = categories
        .into_iter()
        .map(|category| {
            let set = library.set(category);
            CategoryMatches {
                category,
                distinct: set.distinct_matches(&normalized),
                occurrences: set.occurrences(&normalized),
                sources: set
                    .matched_sources(&normalized)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            }
        })
        .filter(|m| only.is_some() || m.distinct > 0)
        .collect();

    let record = AdvertiserRecord {
        ad_texts_combined: Some(text.to_string()),
        page_category: page_category.map(str::to_string),
        ..Default::default()
    };
    let (urgency_breakdown, urgency_total) = UrgencyScorer::new(library, config.urgency.clone())
        .score(&record)
        .map(|score| (score.breakdown.to_string(), score.total))
        .unwrap_or_default();
    let (fit_breakdown, fit_total) = FitScorer::new(library, config.fit.clone())
        .score(&record)
        .map(|score| (score.breakdown().to_string(), score.total))
        .unwrap_or_default();

    Explanation {
        normalized,
        matches,
        urgency_breakdown,
        urgency_total,
        fit_breakdown,
        fit_total,
        classification: classifier.classify(&record),
    }
}

pub fn render_explanation(explanation: &Explanation, formatter: &dyn OutputFormatter) -> String {
    let mut lines = vec![format!(
        "{} {}",
        formatter.header("normalized:"),
        explanation.normalized
    )];

    if explanation.matches.is_empty() {
        lines.push(formatter.dim("no pattern matches"));
    }
    for m in &explanation.matches {
        lines.push(format!(
            "{:<24} {} distinct, {} occurrences",
            formatter.bold(m.category.name()),
            m.distinct,
            m.occurrences
        ));
        for source in &m.sources {
            lines.push(format!("  {}", formatter.dim(source)));
        }
    }

    lines.push(format!(
        "{} {} = {}",
        formatter.header("urgency (text only):"),
        explanation.urgency_breakdown,
        explanation.urgency_total
    ));
    lines.push(format!(
        "{} {} = {}",
        formatter.header("fit (text only):"),
        explanation.fit_breakdown,
        explanation.fit_total
    ));
    lines.push(format!(
        "{} {} ({})",
        formatter.header("vertical:"),
        explanation.classification.vertical,
        explanation.classification.matched_on
    ));
    lines.join("\n")
}

pub fn handle_explain(
    session: &Session,
    text: &str,
    page_category: Option<&str>,
    category: Option<PatternCategory>,
) -> Result<()> {
    let library = session.pattern_library()?;
    let classifier = session.vertical_classifier()?;
    let explanation = explain_text(
        text,
        page_category,
        category,
        &library,
        &classifier,
        &session.config,
    );
    let formatter = ColoredFormatter::new(session.formatting);
    println!("{}", render_explanation(&explanation, &formatter));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::PlainFormatter;
    use crate::scoring::Vertical;

    fn explain(text: &str, only: Option<PatternCategory>) -> Explanation {
        let library = PatternLibrary::builtin().unwrap();
        let classifier = VerticalClassifier::builtin().unwrap();
        explain_text(text, None, only, &library, &classifier, &IcpConfig::default())
    }

    #[test]
    fn lists_only_matching_categories() {
        let explanation = explain("¡Cupos limitados! Casas en venta", None);
        assert_eq!(explanation.normalized, "¡cupos limitados! casas en venta");
        let categories: Vec<_> = explanation.matches.iter().map(|m| m.category).collect();
        assert_eq!(categories, vec![PatternCategory::Immediacy]);
        assert_eq!(explanation.urgency_total, 2);
        assert_eq!(explanation.classification.vertical, Vertical::RealEstateBuyer);
    }

    #[test]
    fn explicit_category_is_listed_without_matches() {
        let explanation = explain("Fresh bread", Some(PatternCategory::Followup));
        assert_eq!(explanation.matches.len(), 1);
        assert_eq!(explanation.matches[0].distinct, 0);
    }

    #[test]
    fn rendering_shows_sources_and_scores() {
        let rendered = render_explanation(&explain("Today only", None), &PlainFormatter);
        assert!(rendered.contains(r"\btoday only\b"));
        assert!(rendered.contains("urgency (text only): direct:0|form:0|immediacy:2|qualification:0 = 2"));
        assert!(rendered.contains("vertical: unclassified (nothing)"));
    }
}
