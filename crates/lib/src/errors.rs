use thiserror::Error;

/// Errors raised while talking to the ToS;DR API.
///
/// These never escape the `ServiceDirectory` seam: the client logs them and hands
/// the pipeline a plain "no data" signal instead.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that abort an extraction run.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to serialize the patterns document: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write output file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
