//! # Extraction Pipeline
//!
//! Drives one extraction run: for each configured service name it searches the
//! directory, fetches the service detail, classifies every evaluation point, and
//! folds the result into a `PatternsDocument`.
//!
//! A service that cannot be found or fetched is skipped and recorded in the run's
//! outcome log; it never aborts the batch.

use crate::classify::{categorize, classify_tier, resolve_score, truncate_chars, SeverityTier};
use crate::constants::{
    DEFAULT_KEYWORD_LIMIT, DEFAULT_SERVICES, DEFAULT_SERVICE_DELAY, DEFAULT_SUMMARY_MAX_CHARS,
};
use crate::fetch::types::{case_catalogue_len, ApiId, EvaluationPoint, ServiceDetail};
use crate::fetch::ServiceDirectory;
use crate::keywords::keyword_scores;
use crate::taxonomy::Taxonomy;
use crate::types::{
    CategoryTable, ClassifiedPattern, KeywordTables, Metadata, PatternsByTier, PatternsDocument,
    ServiceReference, ServicesReference,
};
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, info, warn};

/// What happens to a point whose title was already seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DedupPolicy {
    /// The later point is dropped, along with its service attribution.
    #[default]
    FirstTitleWins,
    /// The later point is dropped, but its service is added to the first pattern's `services`.
    MergeServices,
}

/// Immutable settings for one extraction run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Names searched for, in processing order.
    pub services: Vec<String>,
    pub taxonomy: Taxonomy,
    /// Pause after each service, whether it succeeded or not.
    pub service_delay: Duration,
    pub keyword_limit: usize,
    pub summary_max_chars: usize,
    pub dedup: DedupPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            taxonomy: Taxonomy::standard(),
            service_delay: DEFAULT_SERVICE_DELAY,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
            dedup: DedupPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// The default configuration over a custom service list.
    pub fn with_services<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            services: services.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

/// How one service fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceOutcome {
    /// Both fetches succeeded; `points` new patterns were recorded.
    Processed { service_id: String, points: usize },
    /// The search request itself failed.
    SearchFailed,
    /// The search returned no services.
    NoMatch,
    /// The first match carried no id.
    NoId,
    /// The detail request failed.
    DetailFailed { service_id: String },
}

impl ServiceOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, ServiceOutcome::Processed { .. })
    }

    /// Short text for progress output.
    pub fn describe(&self) -> &'static str {
        match self {
            ServiceOutcome::Processed { .. } => "ok",
            ServiceOutcome::SearchFailed => "search failed",
            ServiceOutcome::NoMatch => "no results",
            ServiceOutcome::NoId => "no id",
            ServiceOutcome::DetailFailed { .. } => "details failed",
        }
    }
}

/// Progress notifications emitted while a run is underway.
#[derive(Debug, Clone)]
pub enum ProgressEvent<'a> {
    /// Emitted before the case catalogue probe; `available` once it completes.
    CaseCatalogue { available: Option<usize> },
    /// A service is about to be searched. `index` is zero-based.
    ServiceStarted {
        index: usize,
        total: usize,
        name: &'a str,
    },
    /// A service has been handled.
    ServiceFinished {
        name: &'a str,
        outcome: &'a ServiceOutcome,
        rating: Option<&'a str>,
    },
}

/// The document plus the per-service outcome log.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub document: PatternsDocument,
    /// One entry per configured service, in input order.
    pub outcomes: Vec<(String, ServiceOutcome)>,
    /// Size of the case catalogue, when it could be fetched.
    pub cases_available: Option<usize>,
}

impl RunReport {
    pub fn outcome(&self, service_name: &str) -> Option<&ServiceOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == service_name)
            .map(|(_, outcome)| outcome)
    }
}

/// Mutable state of a run in progress. Discarded when the run ends.
struct Accumulator {
    patterns: PatternsByTier,
    categories: CategoryTable,
    services_reference: ServicesReference,
    seen_titles: HashSet<String>,
    /// Title → (tier, position) of the pattern that owns it, for `MergeServices`.
    owners: HashMap<String, (SeverityTier, usize)>,
    processed_services: usize,
    total_points: usize,
}

impl Accumulator {
    fn new(taxonomy: &Taxonomy) -> Self {
        Self {
            patterns: PatternsByTier::default(),
            categories: CategoryTable::for_taxonomy(taxonomy),
            services_reference: ServicesReference::default(),
            seen_titles: HashSet::new(),
            owners: HashMap::new(),
            processed_services: 0,
            total_points: 0,
        }
    }
}

/// Runs the extraction pipeline against a `ServiceDirectory`.
pub struct Extractor<D> {
    directory: D,
    config: PipelineConfig,
}

impl<D: ServiceDirectory> Extractor<D> {
    pub fn new(directory: D, config: PipelineConfig) -> Self {
        Self { directory, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline without progress reporting.
    pub async fn run(&self) -> RunReport {
        self.run_with_progress(|_| {}).await
    }

    /// Runs the pipeline, calling `on_progress` as services are handled.
    pub async fn run_with_progress<F>(&self, mut on_progress: F) -> RunReport
    where
        F: FnMut(ProgressEvent<'_>),
    {
        let cases_available = self
            .directory
            .cases()
            .await
            .and_then(|envelope| envelope.parameters)
            .and_then(|parameters| case_catalogue_len(&parameters));
        match cases_available {
            Some(n) => info!("Case catalogue lists {} cases.", n),
            None => warn!("Case catalogue unavailable, continuing without it."),
        }
        on_progress(ProgressEvent::CaseCatalogue {
            available: cases_available,
        });

        let mut acc = Accumulator::new(&self.config.taxonomy);
        let mut outcomes = Vec::with_capacity(self.config.services.len());
        let total = self.config.services.len();

        for (index, name) in self.config.services.iter().enumerate() {
            on_progress(ProgressEvent::ServiceStarted { index, total, name });

            let (outcome, rating) = self.process_service(name, &mut acc).await;
            match &outcome {
                ServiceOutcome::Processed { points, .. } => {
                    info!("Processed '{}': {} new points.", name, points)
                }
                skipped => warn!("Skipped '{}': {}.", name, skipped.describe()),
            }
            on_progress(ProgressEvent::ServiceFinished {
                name,
                outcome: &outcome,
                rating: rating.as_deref(),
            });
            outcomes.push((name.clone(), outcome));

            if !self.config.service_delay.is_zero() {
                tokio::time::sleep(self.config.service_delay).await;
            }
        }

        let document = self.finish(acc);
        RunReport {
            document,
            outcomes,
            cases_available,
        }
    }

    /// Handles one service end to end. Returns the outcome and the rating, if any.
    async fn process_service(
        &self,
        name: &str,
        acc: &mut Accumulator,
    ) -> (ServiceOutcome, Option<String>) {
        let Some(search) = self.directory.search(name).await else {
            return (ServiceOutcome::SearchFailed, None);
        };
        let parameters = search.parameters.unwrap_or_default();
        let Some(first) = parameters.first_match() else {
            return (ServiceOutcome::NoMatch, None);
        };
        let service_id: ApiId = match &first.id {
            Some(id) if !id.is_blank() => id.clone(),
            _ => return (ServiceOutcome::NoId, None),
        };

        let Some(detail) = self.directory.service(&service_id).await else {
            return (
                ServiceOutcome::DetailFailed {
                    service_id: service_id.to_string(),
                },
                None,
            );
        };
        let detail = detail.parameters.unwrap_or_default();

        let rating = detail.rating_label();
        let display_name = match detail.name.as_deref() {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => name.to_string(),
        };
        acc.services_reference.insert(
            service_id.to_string(),
            ServiceReference {
                name: display_name.clone(),
                rating: rating.clone().unwrap_or_else(|| "N/A".to_string()),
                url: detail.first_url().unwrap_or_default().to_string(),
            },
        );

        let points = self.absorb_points(&detail, &display_name, acc);
        acc.processed_services += 1;

        (
            ServiceOutcome::Processed {
                service_id: service_id.to_string(),
                points,
            },
            rating,
        )
    }

    /// Classifies the service's points into `acc`. Returns how many new patterns were added.
    fn absorb_points(
        &self,
        detail: &ServiceDetail,
        display_name: &str,
        acc: &mut Accumulator,
    ) -> usize {
        let mut added = 0;
        for point in detail.points.iter().flatten() {
            let Some(case) = point.case.as_ref().filter(|c| !c.is_empty()) else {
                continue;
            };
            let Some(title) = effective_title(point) else {
                continue;
            };

            if !acc.seen_titles.insert(title.to_string()) {
                if self.config.dedup == DedupPolicy::MergeServices {
                    merge_attribution(acc, title, display_name);
                }
                debug!("Duplicate title skipped: {}", title);
                continue;
            }

            let description = case.description.as_deref().unwrap_or_default();
            let tier = classify_tier(case);
            let categories = categorize(&self.config.taxonomy, title, description);
            let id = match &case.id {
                Some(id) => format!("point-{id}"),
                None => format!("point-{}", acc.total_points),
            };

            let pattern = ClassifiedPattern {
                id,
                title: title.to_string(),
                summary: truncate_chars(description, self.config.summary_max_chars),
                score: resolve_score(case.weight),
                categories,
                services: vec![display_name.to_string()],
            };

            for category in &pattern.categories {
                acc.categories.increment(category);
            }
            let bucket = acc.patterns.tier_mut(tier);
            acc.owners
                .insert(pattern.title.clone(), (tier, bucket.len()));
            bucket.push(pattern);

            acc.total_points += 1;
            added += 1;
        }
        added
    }

    fn finish(&self, acc: Accumulator) -> PatternsDocument {
        let limit = self.config.keyword_limit;
        let negative = keyword_scores(
            acc.patterns
                .critical
                .iter()
                .chain(acc.patterns.bad.iter())
                .map(|p| p.title.as_str()),
            limit,
        );
        let positive = keyword_scores(acc.patterns.good.iter().map(|p| p.title.as_str()), limit);

        PatternsDocument {
            metadata: Metadata::new(Utc::now(), acc.processed_services, acc.total_points),
            categories: acc.categories,
            patterns: acc.patterns,
            keywords: KeywordTables { negative, positive },
            services_reference: acc.services_reference,
        }
    }
}

/// The case title, falling back to the point title. `None` for empty or "none" titles.
fn effective_title(point: &EvaluationPoint) -> Option<&str> {
    let case_title = point.case.as_ref().and_then(|c| c.title.as_deref());
    let title = case_title
        .filter(|t| !t.is_empty())
        .or(point.title.as_deref())
        .filter(|t| !t.is_empty())?;
    if title.eq_ignore_ascii_case("none") {
        return None;
    }
    Some(title)
}

fn merge_attribution(acc: &mut Accumulator, title: &str, display_name: &str) {
    if let Some(&(tier, position)) = acc.owners.get(title) {
        if let Some(pattern) = acc.patterns.tier_mut(tier).get_mut(position) {
            if !pattern.services.iter().any(|s| s == display_name) {
                pattern.services.push(display_name.to_string());
            }
        }
    }
}
