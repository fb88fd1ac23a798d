//! Single-request probe execution.
//!
//! [`execute`] performs exactly one HTTP call against the dashboard and maps
//! everything that can happen to a [`ProbeOutcome`] or a [`ProbeError`]. All
//! failure classification lives here so the driver only has to decide how to
//! render each variant.

use reqwest::{Method, StatusCode};
use serde_json::Value;
use talorik_api::TalorikClient;
use thiserror::Error;
use tracing::debug;

/// A single request the driver wants issued.
///
/// `path` is relative to the client's base URL and may carry a query string.
/// `body` is only attached to POST requests; GET probes never send one.
#[derive(Debug, Clone)]
pub struct ProbeSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ProbeSpec {
    /// A GET probe for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
        }
    }

    /// A POST probe for `path` carrying `body` as JSON.
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A successful probe: the server answered HTTP 200 with a JSON body.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub status: StatusCode,
    pub body: Value,
}

/// Everything a probe can fail with.
///
/// None of these abort a run; the driver renders a failure line and moves on
/// to the next step.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Caller asked for a method the tool does not support. No request is
    /// issued in this case.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(Method),
    /// The server could not be reached at all.
    #[error("connection refused (server not running?)")]
    ConnectionRefused,
    /// The server answered with a non-200 status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
    /// Any other transport-level fault: timeout, DNS, a 200 body that is not
    /// valid JSON, and so on.
    #[error("{0}")]
    Transport(String),
}

/// Perform one request described by `spec` and classify the result.
///
/// Success requires exactly HTTP 200 and a parseable JSON body. Methods
/// other than GET and POST are rejected before any network activity.
pub async fn execute(client: &TalorikClient, spec: &ProbeSpec) -> Result<ProbeOutcome, ProbeError> {
    let builder = if spec.method == Method::GET {
        client.request(Method::GET, &spec.path)
    } else if spec.method == Method::POST {
        let mut builder = client.request(Method::POST, &spec.path);
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }
        builder
    } else {
        return Err(ProbeError::UnsupportedMethod(spec.method.clone()));
    };

    let response = builder.send().await.map_err(classify_transport_error)?;
    let status = response.status();

    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, path = %spec.path, "probe returned non-success status");
        return Err(ProbeError::Status { status, body });
    }

    let body: Value = response
        .json()
        .await
        .map_err(|error| ProbeError::Transport(error.to_string()))?;

    debug!(%status, path = %spec.path, "probe succeeded");
    Ok(ProbeOutcome { status, body })
}

fn classify_transport_error(error: reqwest::Error) -> ProbeError {
    if error.is_connect() {
        ProbeError::ConnectionRefused
    } else {
        ProbeError::Transport(error.to_string())
    }
}
