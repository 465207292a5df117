//! Text normalization for pattern matching.
//!
//! Ad copy mixes English and Spanish with inconsistent accent usage
//! ("categoría" vs "categoria", "ÚLTIMOS" vs "ultimos"). Every pattern in the
//! library is written against the folded form produced here, so a single
//! pattern set covers all accent and case variants.
//!
//! # Examples
//!
//! ```rust
//! use icpscore::normalize::normalize;
//!
//! assert_eq!(normalize("ÁGIL"), "agil");
//! assert_eq!(normalize("¿Año Nuevo?"), "¿ano nuevo?");
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold text into its canonical matching form: lowercase, accents stripped.
///
/// Whitespace and punctuation are preserved. Characters without a canonical
/// decomposition (e.g. `ß`, `ø`) are lowercased but otherwise kept.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Normalize an optional cell. Absent input yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Strip accents without changing case.
///
/// Used on regex sources, where lowercasing would change the meaning of
/// escapes such as `\B` or `\W`.
pub fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_accents() {
        assert_eq!(normalize("ÁGIL"), "agil");
        assert_eq!(normalize("agil"), "agil");
        assert_eq!(normalize("Cañón"), "canon");
        assert_eq!(normalize("ÉXITO Garantizado"), "exito garantizado");
    }

    #[test]
    fn preserves_whitespace_and_punctuation() {
        assert_eq!(normalize("Llama  YA!\n¿Calificas?"), "llama  ya!\n¿calificas?");
    }

    #[test]
    fn absent_text_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("Hoy")), "hoy");
    }

    #[test]
    fn fold_accents_keeps_case_and_escapes() {
        assert_eq!(fold_accents(r"\bÚltimos\B"), r"\bUltimos\B");
    }

    #[test]
    fn uppercase_dotted_i_is_stable() {
        let once = normalize("İstanbul");
        assert_eq!(normalize(&once), once);
    }
}
