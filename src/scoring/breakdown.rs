use serde::Serialize;
use std::fmt;

/// One named sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: &'static str,
    pub points: u32,
}

/// Ordered list of named sub-scores.
///
/// Rendered as `name:points` pairs joined by `|`, e.g.
/// `direct:25|form:0|immediacy:0|qualification:0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ScoreBreakdown(Vec<Component>);

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sub-score, clamped to `cap`. Returns the clamped value.
    pub fn push_capped(&mut self, name: &'static str, raw: u32, cap: u32) -> u32 {
        let points = raw.min(cap);
        self.0.push(Component { name, points });
        points
    }

    pub fn extend(&mut self, other: &ScoreBreakdown) {
        self.0.extend_from_slice(&other.0);
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|c| c.points).sum()
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.0.iter().find(|c| c.name == name).map(|c| c.points)
    }

    pub fn components(&self) -> &[Component] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}:{}", component.name, component.points)?;
        }
        Ok(())
    }
}

/// Points for `count` matches at `per_match` each, before capping.
pub fn scaled(count: usize, per_match: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_match)
}
