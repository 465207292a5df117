use anyhow::Result;

use super::session::Session;
use crate::formatting::{ColoredFormatter, OutputFormatter};
use crate::patterns::{PatternCategory, PatternLibrary};

/// Render the catalog, one block per category.
pub fn render_catalog(
    library: &PatternLibrary,
    only: Option<PatternCategory>,
    formatter: &dyn OutputFormatter,
) -> String {
    let categories: Vec<PatternCategory> = match only {
        Some(category) => vec![category],
        None => PatternCategory::ALL.to_vec(),
    };

    let mut lines = Vec::new();
    for category in categories {
        let set = library.set(category);
        lines.push(format!(
            "{} ({} patterns)",
            formatter.header(category.name()),
            set.len()
        ));
        for source in set.sources() {
            lines.push(format!("  {}", source));
        }
    }
    lines.join("\n")
}

pub fn handle_patterns(session: &Session, category: Option<PatternCategory>) -> Result<()> {
    let library = session.pattern_library()?;
    let formatter = ColoredFormatter::new(session.formatting);
    println!("{}", render_catalog(&library, category, &formatter));
    Ok(())
}
