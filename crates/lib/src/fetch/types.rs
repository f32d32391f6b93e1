//! Response shapes of the ToS;DR API.
//!
//! Every nested field is optional: the API omits keys freely, and a missing key is
//! resolved to an explicit default by the pipeline rather than failing the decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An identifier that the API sends either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ApiId {
    Number(i64),
    Text(String),
}

impl ApiId {
    /// Empty string ids are as good as no id at all.
    pub fn is_blank(&self) -> bool {
        matches!(self, ApiId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiId::Number(n) => write!(f, "{n}"),
            ApiId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ApiId {
    fn from(value: i64) -> Self {
        ApiId::Number(value)
    }
}

impl From<&str> for ApiId {
    fn from(value: &str) -> Self {
        ApiId::Text(value.to_string())
    }
}

/// The `{ "parameters": ... }` wrapper around every API payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiEnvelope<T> {
    pub parameters: Option<T>,
}

pub type SearchResponse = ApiEnvelope<SearchParameters>;
pub type ServiceResponse = ApiEnvelope<ServiceDetail>;
pub type CasesResponse = ApiEnvelope<Value>;

/// Payload of `GET /search/v4/?query=...`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchParameters {
    pub services: Option<Vec<ServiceSummary>>,
    /// Older responses use the singular key.
    pub service: Option<Vec<ServiceSummary>>,
}

impl SearchParameters {
    /// The first listed service, preferring the `services` key when it is non-empty.
    pub fn first_match(&self) -> Option<&ServiceSummary> {
        [&self.services, &self.service]
            .into_iter()
            .flatten()
            .find(|list| !list.is_empty())
            .and_then(|list| list.first())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceSummary {
    pub id: Option<ApiId>,
    pub name: Option<String>,
}

/// Payload of `GET /service/v2?id=...`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceDetail {
    pub name: Option<String>,
    /// Usually a letter grade; kept loose because the API has changed its shape before.
    pub rating: Option<Value>,
    pub urls: Option<Vec<String>>,
    pub points: Option<Vec<EvaluationPoint>>,
}

impl ServiceDetail {
    /// The rating as display text, if the service has a meaningful one.
    pub fn rating_label(&self) -> Option<String> {
        match self.rating.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn first_url(&self) -> Option<&str> {
        self.urls.as_ref()?.first().map(String::as_str)
    }
}

/// One judged clause attached to a service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvaluationPoint {
    pub title: Option<String>,
    pub case: Option<Case>,
}

/// The reusable clause type behind an evaluation point.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Case {
    pub id: Option<ApiId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub classification: Option<String>,
    pub weight: Option<f64>,
}

impl Case {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.classification.is_none()
            && self.weight.is_none()
    }
}

/// Number of entries in a `GET /case/v2/` payload.
///
/// The catalogue is either a bare list or an object wrapping a `cases` list.
pub fn case_catalogue_len(parameters: &Value) -> Option<usize> {
    match parameters {
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => map.get("cases").and_then(Value::as_array).map(Vec::len),
        _ => None,
    }
}
