use super::types::{ApiId, CasesResponse, SearchResponse, ServiceResponse};
use super::ServiceDirectory;
use crate::errors::FetchError;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("tosdr-patterns/", env!("CARGO_PKG_VERSION"));

/// A `ServiceDirectory` backed by the public ToS;DR HTTP API.
#[derive(Clone, Debug)]
pub struct TosdrClient {
    client: ReqwestClient,
    base_url: String,
}

impl TosdrClient {
    /// Creates a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Searches services by free-text name.
    pub async fn try_search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        self.get_json("/search/v4/", &[("query", query)]).await
    }

    /// Fetches one service with its evaluation points.
    pub async fn try_service(&self, id: &ApiId) -> Result<ServiceResponse, FetchError> {
        let id = id.to_string();
        self.get_json("/service/v2", &[("id", id.as_str())]).await
    }

    /// Fetches the catalogue of all known cases.
    pub async fn try_cases(&self) -> Result<CasesResponse, FetchError> {
        self.get_json("/case/v2/", &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

/// Logs the failure and collapses it into "no data".
fn discard<T>(what: &str, result: Result<T, FetchError>) -> Option<T> {
    result
        .map_err(|e| warn!("{} unavailable: {}", what, e))
        .ok()
}

#[async_trait]
impl ServiceDirectory for TosdrClient {
    async fn search(&self, query: &str) -> Option<SearchResponse> {
        discard("search results", self.try_search(query).await)
    }

    async fn service(&self, id: &ApiId) -> Option<ServiceResponse> {
        discard("service detail", self.try_service(id).await)
    }

    async fn cases(&self) -> Option<CasesResponse> {
        discard("case catalogue", self.try_cases().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_REQUEST_TIMEOUT;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = TosdrClient::new("http://localhost:1234/", DEFAULT_REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234");
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("tosdr-patterns/"));
    }
}
