use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tosdr_patterns::fetch::types::{ApiId, CasesResponse, SearchResponse, ServiceResponse};
use tosdr_patterns::ServiceDirectory;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// --- Mock Service Directory ---

/// An in-memory `ServiceDirectory` serving pre-programmed JSON bodies.
///
/// Bodies are decoded on every call the same way the HTTP client decodes them, so a
/// malformed body behaves like a failed request.
#[derive(Clone, Debug, Default)]
pub struct MockDirectory {
    searches: Arc<Mutex<HashMap<String, Value>>>,
    services: Arc<Mutex<HashMap<String, Value>>>,
    cases: Arc<Mutex<Option<Value>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-programs the search response for `query`.
    pub fn add_search(&self, query: &str, body: Value) -> &Self {
        let mut searches = self.searches.lock().unwrap();
        searches.insert(query.to_string(), body);
        self
    }

    /// Pre-programs the detail response for service `id`.
    pub fn add_service(&self, id: &str, body: Value) -> &Self {
        let mut services = self.services.lock().unwrap();
        services.insert(id.to_string(), body);
        self
    }

    pub fn set_cases(&self, body: Value) -> &Self {
        *self.cases.lock().unwrap() = Some(body);
        self
    }

    /// Retrieves the recorded calls (`search:<q>`, `service:<id>`, `cases`) for assertion.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: Option<Value>) -> Option<T> {
    serde_json::from_value(body?).ok()
}

#[async_trait]
impl ServiceDirectory for MockDirectory {
    async fn search(&self, query: &str) -> Option<SearchResponse> {
        self.record(format!("search:{query}"));
        let body = self.searches.lock().unwrap().get(query).cloned();
        decode(body)
    }

    async fn service(&self, id: &ApiId) -> Option<ServiceResponse> {
        self.record(format!("service:{id}"));
        let body = self.services.lock().unwrap().get(&id.to_string()).cloned();
        decode(body)
    }

    async fn cases(&self) -> Option<CasesResponse> {
        self.record("cases".to_string());
        let body = self.cases.lock().unwrap().clone();
        decode(body)
    }
}

// --- Response Fixtures ---

/// A search response whose first match has `id`.
pub fn search_body(id: impl Into<Value>) -> Value {
    json!({ "error": 0, "parameters": { "services": [ { "id": id.into() } ] } })
}

/// A search response with no services at all.
pub fn empty_search_body() -> Value {
    json!({ "error": 0, "parameters": { "services": [] } })
}

/// A service detail response.
pub fn service_body(name: &str, rating: &str, points: Vec<Value>) -> Value {
    json!({
        "error": 0,
        "parameters": {
            "name": name,
            "rating": rating,
            "urls": [format!("{}.example", name.to_lowercase())],
            "points": points,
        }
    })
}

/// An evaluation point with a fully populated case.
pub fn point(
    case_id: i64,
    title: &str,
    description: &str,
    classification: &str,
    weight: i64,
) -> Value {
    json!({
        "title": title,
        "case": {
            "id": case_id,
            "title": title,
            "description": description,
            "classification": classification,
            "weight": weight,
        }
    })
}

// --- Wiremock Helpers ---

/// Serves `body` for `GET /search/v4/?query=<query>`.
pub async fn mount_search(server: &MockServer, query: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/search/v4/"))
        .and(query_param("query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves `body` for `GET /service/v2?id=<id>`.
pub async fn mount_service(server: &MockServer, id: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/service/v2"))
        .and(query_param("id", id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serves `body` for `GET /case/v2/`.
pub async fn mount_cases(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/case/v2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}
