//! # Point Classification
//!
//! Pure functions that turn one evaluation point into a severity tier and a set of
//! topical categories. Matching is plain lower-case substring containment, so
//! `"advertis"` hits both "advertising" and "advertisement".

use crate::constants::{DEFAULT_SCORE, OTHER_CATEGORY_ID};
use crate::fetch::types::Case;
use crate::taxonomy::Taxonomy;
use serde::Serialize;
use std::fmt;

/// The severity bucket of one evaluation point.
///
/// `Warning` is never produced by `classify_tier`; it exists because the output
/// schema has always carried an (empty) `warning` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Critical,
    Bad,
    Warning,
    Neutral,
    Good,
}

impl SeverityTier {
    pub const ALL: [SeverityTier; 5] = [
        SeverityTier::Critical,
        SeverityTier::Bad,
        SeverityTier::Warning,
        SeverityTier::Neutral,
        SeverityTier::Good,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "critical",
            SeverityTier::Bad => "bad",
            SeverityTier::Warning => "warning",
            SeverityTier::Neutral => "neutral",
            SeverityTier::Good => "good",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps the case's `classification` label onto a tier. Unknown or missing labels are neutral.
pub fn classify_tier(case: &Case) -> SeverityTier {
    tier_for_label(case.classification.as_deref())
}

/// The label mapping behind `classify_tier`.
pub fn tier_for_label(label: Option<&str>) -> SeverityTier {
    match label {
        Some("good") => SeverityTier::Good,
        Some("neutral") => SeverityTier::Neutral,
        Some("bad") => SeverityTier::Bad,
        Some("blocker") => SeverityTier::Critical,
        _ => SeverityTier::Neutral,
    }
}

/// Returns the ids of every category whose keywords occur in `title` or `description`.
///
/// Categories are reported in taxonomy order. The result is never empty: when no
/// keyword matched it is exactly `["other"]`.
pub fn categorize(taxonomy: &Taxonomy, title: &str, description: &str) -> Vec<String> {
    let text = format!("{title} {description}").to_lowercase();

    let matched: Vec<String> = taxonomy
        .categories()
        .iter()
        .filter(|category| category.keywords.iter().any(|k| text.contains(k.as_str())))
        .map(|category| category.id.clone())
        .collect();

    if matched.is_empty() {
        vec![OTHER_CATEGORY_ID.to_string()]
    } else {
        matched
    }
}

/// Clamps a raw case weight into a 0..=100 score, defaulting to 50 when absent.
pub fn resolve_score(weight: Option<f64>) -> u8 {
    match weight {
        Some(w) if !w.is_nan() => w.round().clamp(0.0, 100.0) as u8,
        _ => DEFAULT_SCORE,
    }
}

/// Keeps the first `max_chars` characters of `text`, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
