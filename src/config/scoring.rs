//! Scoring configuration for urgency and fit.
//!
//! Only weights and point values are configurable. Sub-score caps are
//! constants in the scorers, so every configuration keeps totals within
//! their declared ranges.

use serde::{Deserialize, Serialize};

/// Upper bound for any configured points-per-match value
pub const MAX_POINTS_PER_MATCH: u32 = 10;

/// Urgency weights configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyWeights {
    /// Weight applied to the message share in the direct-channel score
    #[serde(default = "default_message_weight")]
    pub message_weight: f64,

    /// Weight applied to the call share in the direct-channel score
    #[serde(default = "default_call_weight")]
    pub call_weight: f64,

    /// Points per distinct immediacy pattern
    #[serde(default = "default_points")]
    pub immediacy_points: u32,

    /// Points per distinct qualification pattern
    #[serde(default = "default_points")]
    pub qualification_points: u32,
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            message_weight: default_message_weight(),
            call_weight: default_call_weight(),
            immediacy_points: default_points(),
            qualification_points: default_points(),
        }
    }
}

impl UrgencyWeights {
    // Pure function: Check if a weight is usable
    pub fn is_valid_weight(weight: f64) -> bool {
        weight.is_finite() && weight >= 0.0
    }

    // Pure function: Validate a single weight with name
    pub fn validate_weight(weight: f64, name: &str) -> Result<(), String> {
        if Self::is_valid_weight(weight) {
            Ok(())
        } else {
            Err(format!("{} must be a finite, non-negative number", name))
        }
    }

    pub fn validate_points(points: u32, name: &str) -> Result<(), String> {
        if points <= MAX_POINTS_PER_MATCH {
            Ok(())
        } else {
            Err(format!(
                "{} must be at most {}, got {}",
                name, MAX_POINTS_PER_MATCH, points
            ))
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        Self::validate_weight(self.message_weight, "urgency.message_weight")?;
        Self::validate_weight(self.call_weight, "urgency.call_weight")?;
        Self::validate_points(self.immediacy_points, "urgency.immediacy_points")?;
        Self::validate_points(self.qualification_points, "urgency.qualification_points")?;
        Ok(())
    }
}

/// Fit scoring configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// CTA types that defer qualification to a live conversation
    #[serde(default = "default_generic_ctas")]
    pub generic_ctas: Vec<String>,

    /// Display formats counted as carousel ads for the complexity flag
    #[serde(default = "default_carousel_formats")]
    pub carousel_formats: Vec<String>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            generic_ctas: default_generic_ctas(),
            carousel_formats: default_carousel_formats(),
        }
    }
}

impl FitConfig {
    pub fn is_generic_cta(&self, cta: &str) -> bool {
        self.generic_ctas
            .iter()
            .any(|generic| generic.eq_ignore_ascii_case(cta))
    }

    pub fn is_carousel(&self, format: &str) -> bool {
        self.carousel_formats
            .iter()
            .any(|carousel| carousel.eq_ignore_ascii_case(format))
    }
}

fn default_message_weight() -> f64 {
    1.5
}

fn default_call_weight() -> f64 {
    1.0
}

fn default_points() -> u32 {
    2
}

fn default_generic_ctas() -> Vec<String> {
    [
        "CALL_NOW",
        "MESSAGE_PAGE",
        "SEND_MESSAGE",
        "WHATSAPP_MESSAGE",
        "CONTACT_US",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_carousel_formats() -> Vec<String> {
    vec!["CAROUSEL".to_string()]
}
