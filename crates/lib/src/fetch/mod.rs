//! # Fetcher
//!
//! Access to the two API surfaces the extractor reads (search-by-name and
//! get-by-id), plus the case catalogue. Callers only ever see "data" or "no data";
//! transport errors, non-2xx statuses and malformed bodies all collapse to `None`.

pub mod client;
pub mod types;

pub use client::TosdrClient;

use async_trait::async_trait;
use types::{ApiId, CasesResponse, SearchResponse, ServiceResponse};

/// A read-only source of ToS;DR service data.
///
/// Implemented by `TosdrClient` for the live API and by in-memory fakes in tests.
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Looks up services by free-text name.
    async fn search(&self, query: &str) -> Option<SearchResponse>;

    /// Fetches the detail payload, including evaluation points, of one service.
    async fn service(&self, id: &ApiId) -> Option<ServiceResponse>;

    /// Fetches the catalogue of all cases. Only its size is used.
    async fn cases(&self) -> Option<CasesResponse>;
}
