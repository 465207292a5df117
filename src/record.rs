//! Typed view of one advertiser row.
//!
//! Upstream stages hand us loosely-typed CSV: shares may be blank, `"n/a"`,
//! or missing entirely. Numeric fields coerce to `0.0` rather than failing
//! the row, but each coercion is recorded so a run can report how much of
//! its input was silently zeroed.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::errors::RowError;

pub const PAGE_NAME: &str = "page_name";
pub const AD_TEXTS: &str = "ad_texts_combined";
pub const SHARE_MESSAGE: &str = "share_message";
pub const SHARE_CALL: &str = "share_call";
pub const SHARE_FORM: &str = "share_form";
pub const MONEY_SCORE: &str = "money_score";

const PAGE_CATEGORY_ALIASES: &[&str] = &["page_category", "page_categories", "category"];
const CTA_TYPES_ALIASES: &[&str] = &["cta_types", "ctas"];
const PRIMARY_CTA: &str = "primary_cta";
const DISPLAY_FORMATS_ALIASES: &[&str] = &["display_formats", "ad_formats"];
const PRIMARY_DESTINATION: &str = "primary_destination";

/// Where an ad's call-to-action routes the prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Message,
    Call,
    Form,
    Website,
}

impl Destination {
    /// Parse an explicit destination label. Unknown labels yield `None`.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "MESSAGE" | "MESSENGER" | "WHATSAPP" | "WHATSAPP_MESSAGE" | "SEND_MESSAGE" | "DM" => {
                Some(Self::Message)
            }
            "CALL" | "PHONE" | "CALL_NOW" => Some(Self::Call),
            "FORM" | "LEAD_FORM" | "LEAD_GEN" | "INSTANT_FORM" => Some(Self::Form),
            "WEBSITE" | "WEB" | "URL" | "LANDING_PAGE" => Some(Self::Website),
            _ => None,
        }
    }

    /// Whether this destination opens a live conversation.
    pub fn is_conversational(&self) -> bool {
        matches!(self, Self::Message | Self::Call)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "MESSAGE",
            Self::Call => "CALL",
            Self::Form => "FORM",
            Self::Website => "WEBSITE",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a numeric field was coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoercionKind {
    /// Column absent or cell empty
    Missing,
    /// Cell present but not a finite number
    Unparseable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Coercion {
    pub field: &'static str,
    pub kind: CoercionKind,
}

/// Maps header names to column positions.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    positions: HashMap<String, usize>,
}

impl ColumnIndex {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = HashMap::new();
        for (i, header) in headers.iter().enumerate() {
            // First occurrence wins for duplicated headers
            positions
                .entry(header.as_ref().trim().to_string())
                .or_insert(i);
        }
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// First alias present in the header.
    pub fn position_of_any(&self, aliases: &[&str]) -> Option<usize> {
        aliases.iter().find_map(|alias| self.position(alias))
    }
}

/// One advertiser, as seen by the scorers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdvertiserRecord {
    pub page_name: String,
    pub ad_texts_combined: Option<String>,
    pub share_message: f64,
    pub share_call: f64,
    pub share_form: f64,
    pub money_score: f64,
    pub page_category: Option<String>,
    /// Distinct uppercase CTA types, in first-seen order
    pub cta_types: Vec<String>,
    pub primary_cta: Option<String>,
    pub display_formats: Vec<String>,
    /// Explicit destination column, when present and recognised
    pub declared_destination: Option<Destination>,
    pub coercions: Vec<Coercion>,
}

impl AdvertiserRecord {
    /// Build a record from raw cells.
    ///
    /// Numeric fields coerce permissively; shares that parse but fall outside
    /// `[0, 1]` are a row error.
    pub fn from_cells<S: AsRef<str>>(index: &ColumnIndex, cells: &[S]) -> Result<Self, RowError> {
        let cell = |position: Option<usize>| {
            position
                .and_then(|i| cells.get(i))
                .map(|value| value.as_ref().trim())
                .filter(|value| !value.is_empty())
        };

        let mut coercions = Vec::new();
        let mut numeric = |field: &'static str| -> f64 {
            let (value, coercion) = parse_numeric(cell(index.position(field)));
            if let Some(kind) = coercion {
                coercions.push(Coercion { field, kind });
            }
            value
        };

        let share_message = checked_share(SHARE_MESSAGE, numeric(SHARE_MESSAGE))?;
        let share_call = checked_share(SHARE_CALL, numeric(SHARE_CALL))?;
        let share_form = checked_share(SHARE_FORM, numeric(SHARE_FORM))?;
        let money_score = numeric(MONEY_SCORE);

        let cta_types = split_list(cell(index.position_of_any(CTA_TYPES_ALIASES)));
        let primary_cta = cell(index.position(PRIMARY_CTA))
            .map(|value| value.to_ascii_uppercase())
            .or_else(|| cta_types.first().cloned());

        Ok(Self {
            page_name: cell(index.position(PAGE_NAME))
                .unwrap_or_default()
                .to_string(),
            ad_texts_combined: cell(index.position(AD_TEXTS)).map(str::to_string),
            share_message,
            share_call,
            share_form,
            money_score,
            page_category: cell(index.position_of_any(PAGE_CATEGORY_ALIASES)).map(str::to_string),
            cta_types,
            primary_cta,
            display_formats: split_list(cell(index.position_of_any(DISPLAY_FORMATS_ALIASES))),
            declared_destination: cell(index.position(PRIMARY_DESTINATION))
                .and_then(Destination::parse),
            coercions,
        })
    }

    /// Residual share not routed to message, call or form.
    pub fn share_website(&self) -> f64 {
        (1.0 - self.share_message - self.share_call - self.share_form).max(0.0)
    }

    /// Declared destination, else the largest share. Ties resolve in
    /// message, call, form, website order.
    pub fn primary_destination(&self) -> Destination {
        if let Some(declared) = self.declared_destination {
            return declared;
        }
        let candidates = [
            (Destination::Message, self.share_message),
            (Destination::Call, self.share_call),
            (Destination::Form, self.share_form),
            (Destination::Website, self.share_website()),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 > best.1 {
                best = *candidate;
            }
        }
        best.0
    }

    /// Number of message/call/form channels with a non-zero share.
    pub fn active_destination_count(&self) -> usize {
        [self.share_message, self.share_call, self.share_form]
            .iter()
            .filter(|share| **share > 0.0)
            .count()
    }

    pub fn ad_text(&self) -> &str {
        self.ad_texts_combined.as_deref().unwrap_or_default()
    }
}

/// Shares within this distance of `[0, 1]` are float noise and get clamped.
pub const SHARE_TOLERANCE: f64 = 1e-9;

/// Clamp a share into `[0, 1]`, rejecting values clearly outside it.
fn checked_share(field: &'static str, value: f64) -> Result<f64, RowError> {
    if value < -SHARE_TOLERANCE || value > 1.0 + SHARE_TOLERANCE {
        return Err(RowError::ShareOutOfRange { field, value });
    }
    Ok(value.clamp(0.0, 1.0))
}

/// Permissive numeric parse. Returns the value and, when coerced, why.
pub fn parse_numeric(raw: Option<&str>) -> (f64, Option<CoercionKind>) {
    match raw {
        None => (0.0, Some(CoercionKind::Missing)),
        Some(text) => match text.parse::<f64>() {
            Ok(value) if value.is_finite() => (value, None),
            _ => (0.0, Some(CoercionKind::Unparseable)),
        },
    }
}

/// Split a multi-valued cell on `|`, `,` or `;`, uppercasing and
/// de-duplicating entries.
fn split_list(raw: Option<&str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.unwrap_or_default().split(['|', ',', ';']) {
        let item = item.trim().to_ascii_uppercase();
        if !item.is_empty() && !items.contains(&item) {
            items.push(item);
        }
    }
    items
}
