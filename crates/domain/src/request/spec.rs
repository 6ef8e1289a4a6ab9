//! Resolved request specification

use std::fmt;
use std::time::Duration;

use url::Url;

use super::{HttpMethod, QueryParams};
use crate::error::{DomainError, DomainResult};

/// A fully resolved HTTP request, ready to hand to an HTTP client.
///
/// Built from a [`TestCase`](crate::testing::TestCase) and the configured
/// base URL. The URL is absolute and already carries the encoded query string.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute target URL
    pub url: Url,
    /// Optional JSON body
    pub body: Option<serde_json::Value>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl RequestSpec {
    /// Resolves a path and query against `base_url`.
    ///
    /// Any path prefix already present on the base URL is kept, so a base of
    /// `http://host/prefix/` and a path of `/api/x` give `http://host/prefix/api/x`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPath`] if `path` does not start with `/`,
    /// and [`DomainError::InvalidUrl`] if the base URL is not an http(s) URL.
    pub fn resolve(
        base_url: &Url,
        method: HttpMethod,
        path: &str,
        query: &QueryParams,
        body: Option<serde_json::Value>,
        timeout: Duration,
    ) -> DomainResult<Self> {
        if !path.starts_with('/') {
            return Err(DomainError::InvalidPath(path.to_string()));
        }
        validate_base_url(base_url)?;

        let mut url = base_url.clone();
        let joined = format!("{}{}", base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_fragment(None);
        url.set_query(None);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        Ok(Self {
            method,
            url,
            body,
            timeout,
        })
    }

    /// Returns the timeout in whole milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

impl fmt::Display for RequestSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Checks that `url` can serve as the base of a smoke run.
///
/// # Errors
///
/// Returns [`DomainError::InvalidUrl`] for non-http(s) schemes, or URLs that
/// cannot carry a path (such as `mailto:`).
pub fn validate_base_url(url: &Url) -> DomainResult<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DomainError::InvalidUrl(format!(
            "unsupported scheme '{}' in {url}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(DomainError::InvalidUrl(format!("{url} has no host")));
    }
    Ok(())
}
