//! Vertical classification.
//!
//! Tags each advertiser with a single vertical by walking an ordered rule
//! list. The first rule that matches wins, regardless of how many patterns
//! later rules would match. Within a rule the page category is checked
//! before the ad text.
//!
//! Declaration order of the built-in rules:
//!
//! 1. `real_estate_seller` (text)
//! 2. `real_estate_buyer` (text)
//! 3. `real_estate_rental` (text)
//! 4. `real_estate_general` (category, text)
//! 5. `roofing` (category, text)
//! 6. `hvac` (category, text)
//! 7. `plumbing` (category, text)
//!
//! Intent rules come first so that a realtor page advertising a cash offer
//! is tagged as seller-intent rather than generic real estate.

use regex::{RegexSet, RegexSetBuilder};
use serde::Serialize;
use std::fmt;

use crate::errors::IcpError;
use crate::normalize::{fold_accents, normalize, normalize_opt};
use crate::record::AdvertiserRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    RealEstateSeller,
    RealEstateBuyer,
    RealEstateRental,
    RealEstateGeneral,
    Roofing,
    Hvac,
    Plumbing,
    Unclassified,
}

impl Vertical {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vertical::RealEstateSeller => "real_estate_seller",
            Vertical::RealEstateBuyer => "real_estate_buyer",
            Vertical::RealEstateRental => "real_estate_rental",
            Vertical::RealEstateGeneral => "real_estate_general",
            Vertical::Roofing => "roofing",
            Vertical::Hvac => "hvac",
            Vertical::Plumbing => "plumbing",
            Vertical::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for Vertical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which field produced the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchedOn {
    PageCategory,
    AdText,
    Nothing,
}

impl MatchedOn {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchedOn::PageCategory => "page_category",
            MatchedOn::AdText => "ad_text",
            MatchedOn::Nothing => "nothing",
        }
    }
}

impl fmt::Display for MatchedOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub vertical: Vertical,
    pub matched_on: MatchedOn,
}

impl Classification {
    pub fn unclassified() -> Self {
        Self {
            vertical: Vertical::Unclassified,
            matched_on: MatchedOn::Nothing,
        }
    }
}

/// One labelled rule: category patterns and text patterns.
#[derive(Debug, Clone)]
pub struct VerticalRule {
    vertical: Vertical,
    category: RegexSet,
    text: RegexSet,
}

impl VerticalRule {
    pub fn new<S: AsRef<str>>(
        vertical: Vertical,
        category_sources: &[S],
        text_sources: &[S],
    ) -> Result<Self, IcpError> {
        Ok(Self {
            vertical,
            category: compile_set(vertical, category_sources)?,
            text: compile_set(vertical, text_sources)?,
        })
    }

    pub fn vertical(&self) -> Vertical {
        self.vertical
    }

    /// Match against already-normalized category and text.
    fn matches(&self, category: &str, text: &str) -> Option<MatchedOn> {
        if !category.is_empty() && self.category.is_match(category) {
            Some(MatchedOn::PageCategory)
        } else if !text.is_empty() && self.text.is_match(text) {
            Some(MatchedOn::AdText)
        } else {
            None
        }
    }
}

fn compile_set<S: AsRef<str>>(vertical: Vertical, sources: &[S]) -> Result<RegexSet, IcpError> {
    let folded: Vec<String> = sources
        .iter()
        .map(|source| fold_accents(source.as_ref()))
        .collect();
    RegexSetBuilder::new(&folded)
        .case_insensitive(true)
        .build()
        .map_err(|e| IcpError::pattern(vertical.as_str(), folded.join(" | "), &e))
}

const NONE: &[&str] = &[];

const SELLER_TEXT: &[&str] = &[
    r"\bsell(ing)? your (home|house|property)\b",
    r"\b(what'?s|find out what) your home('s| is) worth\b",
    r"\bhome (value|valuation|worth)\b",
    r"\bcash offer\b",
    r"\bwe buy houses\b",
    r"\blist(ing)? your (home|house|property)\b",
    r"\bvend(e|er|emos) tu (casa|propiedad|inmueble)\b",
    r"\bcuanto vale tu (casa|propiedad)\b",
    r"\bavaluo\b",
];

const BUYER_TEXT: &[&str] = &[
    r"\bhomes? for sale\b",
    r"\bfirst[- ]time (home ?)?buyers?\b",
    r"\bbuy(ing)? (a|your) (home|house|condo)\b",
    r"\bdream home\b",
    r"\bpre-?construction\b",
    r"\bnew (homes|condos|developments?)\b",
    r"\bcompra (tu|una) (casa|vivienda|propiedad|departamento)\b",
    r"\b(casas|departamentos|propiedades) en venta\b",
    r"\bpreventa\b",
];

const RENTAL_TEXT: &[&str] = &[
    r"\bfor rent\b",
    r"\b(apartments?|homes?|units?) for lease\b",
    r"\brentals? (available|listings?)\b",
    r"\bmove[- ]in special\b",
    r"\b(renta|alquiler|arriendo)\b",
    r"\ben (renta|alquiler)\b",
];

const REAL_ESTATE_CATEGORY: &[&str] = &[
    r"\breal estate\b",
    r"\brealtor\b",
    r"\b(real estate )?(agent|broker(age)?)\b",
    r"\bproperty management\b",
    r"\binmobiliari[ao]\b",
    r"\bbienes raices\b",
];

const REAL_ESTATE_TEXT: &[&str] = &[
    r"\breal estate\b",
    r"\brealtors?\b",
    r"\binmobiliari[ao]\b",
    r"\bbienes raices\b",
];

const ROOFING: &[&str] = &[
    r"\broof(s|ing|er|ers)?\b",
    r"\bshingles?\b",
    r"\bgutters?\b",
    r"\btech(o|os|ado)\b",
    r"\bimpermeabiliza\w*\b",
];

const HVAC: &[&str] = &[
    r"\bhvac\b",
    r"\bair condition(ing|er)\b",
    r"\b(ac|a/c) (repair|installation|service)\b",
    r"\bheating (and|&) (cooling|air)\b",
    r"\b(furnace|heat pump)s?\b",
    r"\baire acondicionado\b",
    r"\b(calefaccion|climatizacion)\b",
];

const PLUMBING: &[&str] = &[
    r"\bplumb(er|ers|ing)\b",
    r"\bdrain (cleaning|repair)\b",
    r"\bwater heaters?\b",
    r"\b(leak|pipe) repair\b",
    r"\bplomer(o|ia|os)\b",
    r"\b(fugas?|destape|tuberias?)\b",
];

pub struct VerticalClassifier {
    rules: Vec<VerticalRule>,
}

impl VerticalClassifier {
    pub fn new(rules: Vec<VerticalRule>) -> Self {
        Self { rules }
    }

    /// Classifier over the built-in rule list, in declaration order.
    pub fn builtin() -> Result<Self, IcpError> {
        let rules = vec![
            VerticalRule::new(Vertical::RealEstateSeller, NONE, SELLER_TEXT)?,
            VerticalRule::new(Vertical::RealEstateBuyer, NONE, BUYER_TEXT)?,
            VerticalRule::new(Vertical::RealEstateRental, NONE, RENTAL_TEXT)?,
            VerticalRule::new(
                Vertical::RealEstateGeneral,
                REAL_ESTATE_CATEGORY,
                REAL_ESTATE_TEXT,
            )?,
            VerticalRule::new(Vertical::Roofing, ROOFING, ROOFING)?,
            VerticalRule::new(Vertical::Hvac, HVAC, HVAC)?,
            VerticalRule::new(Vertical::Plumbing, PLUMBING, PLUMBING)?,
        ];
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &[VerticalRule] {
        &self.rules
    }

    pub fn classify(&self, record: &AdvertiserRecord) -> Classification {
        let category = normalize_opt(record.page_category.as_deref());
        let text = normalize(record.ad_text());
        self.classify_normalized(&category, &text)
    }

    /// Classify already-normalized strings. Pure function of its inputs.
    pub fn classify_normalized(&self, category: &str, text: &str) -> Classification {
        self.rules
            .iter()
            .find_map(|rule| {
                rule.matches(category, text).map(|matched_on| Classification {
                    vertical: rule.vertical,
                    matched_on,
                })
            })
            .unwrap_or_else(Classification::unclassified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classifier() -> VerticalClassifier {
        VerticalClassifier::builtin().unwrap()
    }

    fn record(category: Option<&str>, text: &str) -> AdvertiserRecord {
        AdvertiserRecord {
            page_name: "Fixture".to_string(),
            page_category: category.map(str::to_string),
            ad_texts_combined: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn seller_intent_beats_generic_real_estate() {
        let result = classifier().classify(&record(
            Some("Real Estate Agent"),
            "Thinking of selling your home? Get a cash offer today.",
        ));
        assert_eq!(result.vertical, Vertical::RealEstateSeller);
        assert_eq!(result.matched_on, MatchedOn::AdText);
    }

    #[test]
    fn spanish_buyer_copy_is_tagged() {
        let result = classifier().classify(&record(None, "Compra tu casa con crédito"));
        assert_eq!(result.vertical, Vertical::RealEstateBuyer);
    }

    #[test]
    fn rental_copy_is_tagged() {
        let result = classifier().classify(&record(None, "Departamento en renta, zona centro"));
        assert_eq!(result.vertical, Vertical::RealEstateRental);
    }

    #[test]
    fn trade_serving_rental_properties_is_not_a_rental() {
        let result = classifier().classify(&record(
            Some("Roofing Contractor"),
            "We service rental properties and commercial buildings",
        ));
        assert_eq!(result.vertical, Vertical::Roofing);
        assert_eq!(result.matched_on, MatchedOn::PageCategory);
    }

    #[test]
    fn category_match_is_reported() {
        let result = classifier().classify(&record(Some("Inmobiliaria"), "Conoce nuestro equipo"));
        assert_eq!(
            result,
            Classification {
                vertical: Vertical::RealEstateGeneral,
                matched_on: MatchedOn::PageCategory,
            }
        );
    }

    #[test]
    fn trades_classify_by_category_or_text() {
        let c = classifier();
        assert_eq!(
            c.classify(&record(Some("Roofing Service"), "")).vertical,
            Vertical::Roofing
        );
        assert_eq!(
            c.classify(&record(None, "Same-day AC repair and furnace tune-ups"))
                .vertical,
            Vertical::Hvac
        );
        assert_eq!(
            c.classify(&record(Some("Plomería"), "Servicio 24 horas")).vertical,
            Vertical::Plumbing
        );
    }

    #[test]
    fn declaration_order_breaks_ties() {
        // Roofing and plumbing both match; roofing is declared first
        let result = classifier().classify(&record(None, "Roof repair and water heater installs"));
        assert_eq!(result.vertical, Vertical::Roofing);
    }

    #[test]
    fn category_checked_before_text_within_rule() {
        let result = classifier().classify(&record(Some("HVAC Contractor"), "Air conditioning deals"));
        assert_eq!(result.matched_on, MatchedOn::PageCategory);
    }

    #[test]
    fn unmatched_rows_get_sentinel() {
        let c = classifier();
        assert_eq!(
            c.classify(&record(Some("Bakery"), "Fresh bread daily")),
            Classification::unclassified()
        );
        assert_eq!(
            c.classify(&AdvertiserRecord::default()),
            Classification::unclassified()
        );
    }

    #[test]
    fn labels_render_snake_case() {
        assert_eq!(Vertical::RealEstateSeller.to_string(), "real_estate_seller");
        assert_eq!(Vertical::Unclassified.to_string(), "unclassified");
        assert_eq!(MatchedOn::PageCategory.to_string(), "page_category");
        assert_eq!(
            serde_json::to_string(&Vertical::Hvac).unwrap(),
            "\"hvac\""
        );
    }

    #[test]
    fn custom_rules_replace_builtin() {
        let rule = VerticalRule::new(Vertical::Plumbing, &["sinks?"], &["drains?"]).unwrap();
        let classifier = VerticalClassifier::new(vec![rule]);
        assert_eq!(
            classifier.classify(&record(None, "Clogged drain?")).vertical,
            Vertical::Plumbing
        );
        assert_eq!(
            classifier.classify(&record(None, "Roof repair")).vertical,
            Vertical::Unclassified
        );
    }

    #[test]
    fn invalid_rule_source_is_rejected() {
        let err = VerticalRule::new(Vertical::Hvac, &["(unclosed"], &[]).unwrap_err();
        assert!(err.to_string().contains("hvac"));
    }
}
