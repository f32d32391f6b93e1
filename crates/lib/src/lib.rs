//! # ToS;DR Privacy Pattern Extraction
//!
//! This crate fetches crowd-sourced terms-of-service evaluations for a list of
//! services from the public ToS;DR API, sorts each evaluation point into a severity
//! tier and topical categories by keyword matching, deduplicates by title, and
//! assembles a single `PatternsDocument` ready to be written as JSON.
//!
//! The pieces are usable on their own: `taxonomy` and `classify` are pure,
//! `fetch` hides the HTTP surface behind the `ServiceDirectory` trait, and
//! `pipeline` ties them together.

pub mod classify;
pub mod constants;
pub mod errors;
pub mod fetch;
pub mod keywords;
pub mod pipeline;
pub mod taxonomy;
pub mod types;

pub use classify::{categorize, classify_tier, SeverityTier};
pub use errors::{ExtractError, FetchError};
pub use fetch::{ServiceDirectory, TosdrClient};
pub use pipeline::{
    DedupPolicy, Extractor, PipelineConfig, ProgressEvent, RunReport, ServiceOutcome,
};
pub use taxonomy::{CategoryDefinition, Taxonomy};
pub use types::{ClassifiedPattern, PatternsDocument};

use std::path::Path;
use tracing::info;

/// Serializes `document` as indented UTF-8 JSON and writes it to `path`.
///
/// Returns the number of bytes written.
pub fn write_document(document: &PatternsDocument, path: &Path) -> Result<u64, ExtractError> {
    let json = document.to_json_pretty()?;
    std::fs::write(path, json.as_bytes()).map_err(|source| ExtractError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(json.len() as u64)
}
