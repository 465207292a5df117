use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use std::collections::{BTreeMap, HashMap};

use super::catalog::builtin_sources;
use super::PatternCategory;
use crate::errors::IcpError;
use crate::normalize::fold_accents;

/// Compiled patterns for one category.
///
/// The `RegexSet` answers "which patterns matched" in a single pass; the
/// individual regexes are kept for occurrence counting and auditing.
#[derive(Debug, Clone)]
pub struct PatternSet {
    category: PatternCategory,
    sources: Vec<String>,
    regexes: Vec<Regex>,
    set: RegexSet,
}

impl PatternSet {
    /// Compile sources for a category. Sources are accent-folded first.
    pub fn compile<S: AsRef<str>>(
        category: PatternCategory,
        sources: &[S],
    ) -> Result<Self, IcpError> {
        let sources: Vec<String> = sources
            .iter()
            .map(|source| fold_accents(source.as_ref()))
            .collect();

        let regexes = sources
            .iter()
            .map(|source| {
                RegexBuilder::new(source)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| IcpError::pattern(category.name(), source.as_str(), &e))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let set = RegexSetBuilder::new(&sources)
            .case_insensitive(true)
            .build()
            .map_err(|e| IcpError::pattern(category.name(), sources.join(" | "), &e))?;

        Ok(Self {
            category,
            sources,
            regexes,
            set,
        })
    }

    pub fn category(&self) -> PatternCategory {
        self.category
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Number of distinct patterns that match at least once.
    pub fn distinct_matches(&self, text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        self.set.matches(text).iter().count()
    }

    /// Total non-overlapping matches summed across all patterns.
    pub fn occurrences(&self, text: &str) -> usize {
        self.regexes
            .iter()
            .map(|regex| regex.find_iter(text).count())
            .sum()
    }

    pub fn is_match(&self, text: &str) -> bool {
        !text.is_empty() && self.set.is_match(text)
    }

    /// Sources of the patterns that match, in declaration order.
    pub fn matched_sources(&self, text: &str) -> Vec<&str> {
        if text.is_empty() {
            return Vec::new();
        }
        self.set
            .matches(text)
            .iter()
            .map(|index| self.sources[index].as_str())
            .collect()
    }
}

/// Immutable mapping from every [`PatternCategory`] to its compiled set.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    sets: HashMap<PatternCategory, PatternSet>,
}

impl PatternLibrary {
    /// Compile the built-in bilingual catalog.
    pub fn builtin() -> Result<Self, IcpError> {
        Self::with_overrides(&BTreeMap::new())
    }

    /// Compile the built-in catalog plus extra sources per category.
    pub fn with_overrides(extra: &BTreeMap<PatternCategory, Vec<String>>) -> Result<Self, IcpError> {
        let sources = PatternCategory::ALL
            .iter()
            .map(|&category| {
                let mut list: Vec<String> = builtin_sources(category)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if let Some(additional) = extra.get(&category) {
                    list.extend(additional.iter().cloned());
                }
                (category, list)
            })
            .collect::<BTreeMap<_, _>>();
        Self::from_sources(&sources)
    }

    /// Compile caller-supplied sources. Categories missing from the map get
    /// an empty set, which never matches.
    pub fn from_sources<S: AsRef<str>>(
        sources: &BTreeMap<PatternCategory, Vec<S>>,
    ) -> Result<Self, IcpError> {
        let empty: Vec<S> = Vec::new();
        let sets = PatternCategory::ALL
            .iter()
            .map(|&category| {
                let list = sources.get(&category).unwrap_or(&empty);
                PatternSet::compile(category, list).map(|set| (category, set))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { sets })
    }

    pub fn set(&self, category: PatternCategory) -> &PatternSet {
        // Every constructor populates all categories.
        &self.sets[&category]
    }

    pub fn distinct_matches(&self, category: PatternCategory, text: &str) -> usize {
        self.set(category).distinct_matches(text)
    }

    pub fn occurrences(&self, category: PatternCategory, text: &str) -> usize {
        self.set(category).occurrences(text)
    }

    pub fn is_match(&self, category: PatternCategory, text: &str) -> bool {
        self.set(category).is_match(text)
    }

    /// Total pattern count across categories.
    pub fn pattern_count(&self) -> usize {
        self.sets.values().map(PatternSet::len).sum()
    }
}
