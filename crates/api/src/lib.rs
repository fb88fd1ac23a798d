//! Talorik Security API client utilities.
//!
//! This module provides a lightweight client for talking to a TalorikAgent
//! security dashboard. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving the base URL from `TALORIK_API_BASE` with a localhost fallback
//! - Validating the base URL for safety
//! - Building requests with a consistent User-Agent and Accept headers
//!
//! The primary entry point is [`TalorikClient`]. Create an instance via
//! [`TalorikClient::from_env`] (or [`TalorikClient::new`] with an explicit
//! base URL), and then build requests with [`TalorikClient::request`].
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use talorik_api::TalorikClient;
//! use anyhow::Result;
//!
//! async fn probe() -> Result<()> {
//!     let client = TalorikClient::from_env(Duration::from_secs(10))?;
//!     let res = client
//!         .request(reqwest::Method::GET, "/security/metrics")
//!         .send()
//!         .await?;
//!     println!("status: {}", res.status());
//!     Ok(())
//! }
//! ```

use std::time::Duration;
use std::env;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Url, header};
use tracing::debug;

/// Environment variable overriding the default base URL.
pub const BASE_URL_ENV: &str = "TALORIK_API_BASE";

/// Default dashboard location for a locally running agent.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for dashboard access.
///
/// The client pre-configures default headers, applies one request timeout to
/// every call, and builds requests against a validated base URL. The
/// TalorikAgent dashboard is unauthenticated, so no credential discovery
/// takes place.
pub struct TalorikClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl TalorikClient {
    /// Construct a [`TalorikClient`] against an explicit base URL.
    ///
    /// The base URL must parse and include a host; non-localhost hosts must
    /// use HTTPS. `timeout` bounds each request issued through the client,
    /// connection setup included.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .context("build http client")?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("talorik-smoke/0.1; {}", env::consts::OS),
        })
    }

    /// Construct a [`TalorikClient`] from the environment.
    ///
    /// The base URL is taken from `TALORIK_API_BASE` (if set) or falls back
    /// to the default local dashboard at `http://localhost:8080/api`.
    pub fn from_env(timeout: Duration) -> Result<Self> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url, timeout)
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    ///
    /// The resulting request includes the configured User-Agent and base
    /// headers, and is resolved relative to `self.base_url`.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url =
        Url::parse(base).map_err(|e| anyhow!("Invalid base URL '{}': {}", base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("base URL must include a host"))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    // Anything else: must be HTTPS.
    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "base URL must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_base_urls_allow_plain_http() {
        assert!(validate_base_url("http://localhost:8080/api").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080/api").is_ok());
        assert!(validate_base_url("https://localhost/api").is_ok());
    }

    #[test]
    fn remote_base_urls_require_https() {
        assert!(validate_base_url("https://dashboard.example.com/api").is_ok());

        let err = validate_base_url("http://dashboard.example.com/api").unwrap_err();
        assert!(err.to_string().contains("https"), "got: {err}");
    }

    #[test]
    fn malformed_base_urls_are_rejected() {
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("file:///tmp/api").is_err());
    }

    #[test]
    fn from_env_prefers_the_override() {
        temp_env::with_var(BASE_URL_ENV, Some("http://127.0.0.1:9999/api"), || {
            let client = TalorikClient::from_env(Duration::from_secs(1)).unwrap();
            assert_eq!(client.base_url, "http://127.0.0.1:9999/api");
        });

        temp_env::with_var_unset(BASE_URL_ENV, || {
            let client = TalorikClient::from_env(Duration::from_secs(1)).unwrap();
            assert_eq!(client.base_url, DEFAULT_BASE_URL);
        });
    }

    #[test]
    fn request_joins_base_and_path() {
        let client = TalorikClient::new("http://localhost:8080/api", Duration::from_secs(1)).unwrap();
        let request = client
            .request(reqwest::Method::GET, "/security/metrics")
            .build()
            .unwrap();

        assert_eq!(request.url().as_str(), "http://localhost:8080/api/security/metrics");
        assert_eq!(request.method(), reqwest::Method::GET);
    }
}
