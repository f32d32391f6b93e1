//! # Output Document
//!
//! The structures serialized into `privacy-patterns.json`. Field names on the wire
//! follow the file the display application already reads, so the five top-level
//! keys (`metadata`, `categories`, `patterns`, `keywords`, `services_reference`)
//! must not change.

use crate::classify::SeverityTier;
use crate::constants::{DATA_LICENSE, SOURCE_NAME, SOURCE_URL};
use crate::taxonomy::{CategoryDefinition, Taxonomy};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// The complete result of one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct PatternsDocument {
    pub metadata: Metadata,
    pub categories: CategoryTable,
    pub patterns: PatternsByTier,
    pub keywords: KeywordTables,
    pub services_reference: ServicesReference,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub source: String,
    pub source_url: String,
    pub license: String,
    pub extracted_at: DateTime<Utc>,
    pub total_services: usize,
    pub total_points: usize,
}

impl Metadata {
    pub fn new(extracted_at: DateTime<Utc>, total_services: usize, total_points: usize) -> Self {
        Self {
            source: SOURCE_NAME.to_string(),
            source_url: SOURCE_URL.to_string(),
            license: DATA_LICENSE.to_string(),
            extracted_at,
            total_services,
            total_points,
        }
    }
}

/// One deduplicated evaluation point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedPattern {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub score: u8,
    pub categories: Vec<String>,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PatternsByTier {
    pub critical: Vec<ClassifiedPattern>,
    pub bad: Vec<ClassifiedPattern>,
    pub warning: Vec<ClassifiedPattern>,
    pub neutral: Vec<ClassifiedPattern>,
    pub good: Vec<ClassifiedPattern>,
}

impl PatternsByTier {
    pub fn tier(&self, tier: SeverityTier) -> &[ClassifiedPattern] {
        match tier {
            SeverityTier::Critical => &self.critical,
            SeverityTier::Bad => &self.bad,
            SeverityTier::Warning => &self.warning,
            SeverityTier::Neutral => &self.neutral,
            SeverityTier::Good => &self.good,
        }
    }

    pub fn tier_mut(&mut self, tier: SeverityTier) -> &mut Vec<ClassifiedPattern> {
        match tier {
            SeverityTier::Critical => &mut self.critical,
            SeverityTier::Bad => &mut self.bad,
            SeverityTier::Warning => &mut self.warning,
            SeverityTier::Neutral => &mut self.neutral,
            SeverityTier::Good => &mut self.good,
        }
    }

    /// Every pattern, tier by tier in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassifiedPattern> {
        SeverityTier::ALL.into_iter().flat_map(|t| self.tier(t).iter())
    }

    pub fn len(&self) -> usize {
        SeverityTier::ALL.iter().map(|t| self.tier(*t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordScore {
    pub word: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct KeywordTables {
    pub negative: Vec<KeywordScore>,
    pub positive: Vec<KeywordScore>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub name_ja: String,
    pub description: String,
    pub count: usize,
}

impl From<&CategoryDefinition> for CategorySummary {
    fn from(def: &CategoryDefinition) -> Self {
        Self {
            name: def.name.clone(),
            name_ja: def.localized_name.clone(),
            description: def.description.clone(),
            count: 0,
        }
    }
}

/// Category id → summary, serialized as a JSON object in taxonomy order.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable(Vec<(String, CategorySummary)>);

impl CategoryTable {
    /// A zeroed table with every category of `taxonomy` followed by `other`.
    pub fn for_taxonomy(taxonomy: &Taxonomy) -> Self {
        let other = CategoryDefinition::other();
        Self(
            taxonomy
                .categories()
                .iter()
                .chain(std::iter::once(&other))
                .map(|def| (def.id.clone(), CategorySummary::from(def)))
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&CategorySummary> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    /// Bumps the counter of `id`. Unknown ids are ignored.
    pub fn increment(&mut self, id: &str) {
        if let Some((_, summary)) = self.0.iter_mut().find(|(k, _)| k == id) {
            summary.count += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategorySummary)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Categories with at least one point, most populated first.
    pub fn ranked(&self) -> Vec<(&str, &CategorySummary)> {
        let mut ranked: Vec<_> = self.iter().filter(|(_, s)| s.count > 0).collect();
        ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count));
        ranked
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CategoryTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceReference {
    pub name: String,
    pub rating: String,
    pub url: String,
}

/// Service id → reference, serialized as a JSON object in processing order.
#[derive(Debug, Clone, Default)]
pub struct ServicesReference(Vec<(String, ServiceReference)>);

impl ServicesReference {
    /// Registers `reference` under `id`, replacing any earlier entry in place.
    pub fn insert(&mut self, id: String, reference: ServiceReference) {
        match self.0.iter_mut().find(|(k, _)| *k == id) {
            Some((_, existing)) => *existing = reference,
            None => self.0.push((id, reference)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ServiceReference> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceReference)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ServicesReference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl PatternsDocument {
    /// Renders the document as indented JSON, keeping non-ASCII text as-is.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
