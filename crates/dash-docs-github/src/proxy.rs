// crates/dash-docs-github/src/proxy.rs
// ============================================================================
// Module: GitHub Proxies
// Description: Fixed-target GitHub API calls with fallback payloads.
// Purpose: Serve repository stars, latest release, and sponsorship income.
// Dependencies: dash-docs-config, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`GithubProxies`] issues exactly one upstream request per call against a
//! target fixed at construction. A 2xx response with a JSON body is returned
//! unmodified. A non-2xx status, a transport failure, or an unparsable body
//! is replaced by the configured fallback payload, which has the same shape
//! as the live payload. Failures are never surfaced to the caller; they are
//! recorded on the audit sink instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use dash_docs_config::ConfigError;
use dash_docs_config::DashDocsConfig;
use dash_docs_config::FallbackConfig;
use dash_docs_config::GithubConfig;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::audit::ProxyAuditEvent;
use crate::audit::ProxyAuditSink;

// ============================================================================
// SECTION: Types
// ============================================================================

/// The three proxied upstream targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProxyKind {
    /// Repository stargazer count.
    Stars,
    /// Latest published release.
    LatestVersion,
    /// Monthly sponsorship income.
    SponsorshipGoal,
}

impl ProxyKind {
    /// Returns a stable label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stars => "stars",
            Self::LatestVersion => "latest_version",
            Self::SponsorshipGoal => "sponsorship_goal",
        }
    }
}

/// Where a proxied body came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    /// Parsed upstream response body.
    Live,
    /// Configured replacement payload.
    Fallback,
}

/// Result of one proxy call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    /// Proxy that produced the body.
    pub kind: ProxyKind,
    /// Whether the body is live or a fallback.
    pub source: PayloadSource,
    /// JSON body to return to the caller.
    pub body: Value,
}

/// Upstream failure that triggers the fallback.
#[derive(Debug)]
struct UpstreamFailure {
    /// Status code when a response arrived.
    status: Option<u16>,
    /// Failure description.
    reason: String,
}

// ============================================================================
// SECTION: Proxies
// ============================================================================

/// GitHub proxies sharing one HTTP client.
///
/// # Invariants
/// - Target URLs and the sponsorship query are fixed at construction.
/// - The token, when present, is sent as `Authorization: bearer <token>`.
pub struct GithubProxies {
    /// Shared HTTP client carrying the user agent and timeout.
    client: Client,
    /// Bearer token read from the configured environment variable.
    token: Option<String>,
    /// `GET /repos/{owner}/{repo}` target.
    stars_url: Url,
    /// `GET /repos/{owner}/{repo}/releases/latest` target.
    latest_release_url: Url,
    /// `POST /graphql` target.
    graphql_url: Url,
    /// GraphQL request body for the sponsorship query.
    sponsorship_query: Value,
    /// Replacement payload values.
    fallbacks: FallbackConfig,
    /// Sink receiving one event per call.
    audit: Arc<dyn ProxyAuditSink>,
}

impl GithubProxies {
    /// Builds proxies from the full configuration, reading the token from
    /// the environment variable named by `github.token_env`.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError`] when the configuration or HTTP client is invalid.
    pub fn from_config(
        config: &DashDocsConfig,
        audit: Arc<dyn ProxyAuditSink>,
    ) -> Result<Self, ProxyError> {
        Self::new(&config.github, config.fallbacks.clone(), config.github.token(), audit)
    }

    /// Builds proxies with an explicit token.
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError`] when the base URL, owner, repo, or HTTP client
    /// is invalid.
    pub fn new(
        github: &GithubConfig,
        fallbacks: FallbackConfig,
        token: Option<String>,
        audit: Arc<dyn ProxyAuditSink>,
    ) -> Result<Self, ProxyError> {
        let base = github.base_url()?;
        let (owner, repo) = github.repository()?;
        let stars_url = with_segments(&base, &["repos", owner, repo])?;
        let latest_release_url =
            with_segments(&base, &["repos", owner, repo, "releases", "latest"])?;
        let graphql_url = with_segments(&base, &["graphql"])?;

        let mut builder = Client::builder().user_agent(github.user_agent.clone());
        if let Some(timeout_ms) = github.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build().map_err(|err| ProxyError::Client(err.to_string()))?;

        Ok(Self {
            client,
            token,
            stars_url,
            latest_release_url,
            graphql_url,
            sponsorship_query: sponsorship_query(github.sponsor_login.trim()),
            fallbacks,
            audit,
        })
    }

    /// Returns `{ "stargazers_count": n }` for the configured repository.
    pub async fn stars(&self) -> ProxyResponse {
        self.fetch(ProxyKind::Stars).await
    }

    /// Returns `{ "tag_name": "..." }` for the latest release.
    pub async fn latest_version(&self) -> ProxyResponse {
        self.fetch(ProxyKind::LatestVersion).await
    }

    /// Returns the GraphQL sponsorship income payload.
    pub async fn sponsorship_goal(&self) -> ProxyResponse {
        self.fetch(ProxyKind::SponsorshipGoal).await
    }

    /// Returns the fallback payload for `kind`.
    #[must_use]
    pub fn fallback_body(&self, kind: ProxyKind) -> Value {
        match kind {
            ProxyKind::Stars => json!({ "stargazers_count": self.fallbacks.stargazers_count }),
            ProxyKind::LatestVersion => json!({ "tag_name": self.fallbacks.tag_name }),
            ProxyKind::SponsorshipGoal => json!({
                "data": {
                    "user": {
                        "monthlyEstimatedSponsorsIncomeInCents":
                            self.fallbacks.monthly_sponsors_income_cents
                    }
                }
            }),
        }
    }

    /// Runs one proxy call and records its outcome.
    async fn fetch(&self, kind: ProxyKind) -> ProxyResponse {
        let started = Instant::now();
        let attempt = self.call_upstream(kind).await;
        let latency_ms = started.elapsed().as_millis();
        let (response, event) = match attempt {
            Ok((status, body)) => (
                ProxyResponse {
                    kind,
                    source: PayloadSource::Live,
                    body,
                },
                ProxyAuditEvent::new(kind, PayloadSource::Live, Some(status), None, latency_ms),
            ),
            Err(failure) => (
                ProxyResponse {
                    kind,
                    source: PayloadSource::Fallback,
                    body: self.fallback_body(kind),
                },
                ProxyAuditEvent::new(
                    kind,
                    PayloadSource::Fallback,
                    failure.status,
                    Some(failure.reason),
                    latency_ms,
                ),
            ),
        };
        self.audit.record(&event);
        response
    }

    /// Issues the upstream request and parses a successful body.
    async fn call_upstream(&self, kind: ProxyKind) -> Result<(u16, Value), UpstreamFailure> {
        let response = self.request(kind).send().await.map_err(|err| UpstreamFailure {
            status: None,
            reason: format!("transport error: {err}"),
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure {
                status: Some(status.as_u16()),
                reason: format!("upstream status {}", status.as_u16()),
            });
        }
        let bytes = response.bytes().await.map_err(|err| UpstreamFailure {
            status: Some(status.as_u16()),
            reason: format!("body read error: {err}"),
        })?;
        let body = serde_json::from_slice(&bytes).map_err(|err| UpstreamFailure {
            status: Some(status.as_u16()),
            reason: format!("invalid json body: {err}"),
        })?;
        Ok((status.as_u16(), body))
    }

    /// Builds the request for `kind` with shared headers.
    fn request(&self, kind: ProxyKind) -> RequestBuilder {
        let builder = match kind {
            ProxyKind::Stars => self.client.get(self.stars_url.clone()),
            ProxyKind::LatestVersion => self.client.get(self.latest_release_url.clone()),
            ProxyKind::SponsorshipGoal => {
                self.client.post(self.graphql_url.clone()).json(&self.sponsorship_query)
            }
        };
        let builder = builder.header(ACCEPT, "application/json");
        match &self.token {
            Some(token) => builder.header(AUTHORIZATION, format!("bearer {token}")),
            None => builder,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while constructing proxies.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Configuration values cannot form valid targets.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Target URL could not be built.
    #[error("invalid proxy url: {0}")]
    Url(String),
    /// HTTP client construction failed.
    #[error("http client error: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Appends path segments to the API base, each encoded as one segment.
fn with_segments(base: &Url, segments: &[&str]) -> Result<Url, ProxyError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ProxyError::Url(format!("{base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Builds the GraphQL body querying sponsorship income for `login`.
fn sponsorship_query(login: &str) -> Value {
    json!({
        "query": format!(
            "query {{ user(login:\"{login}\") {{ monthlyEstimatedSponsorsIncomeInCents }} }}"
        )
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions."
    )]

    use serde_json::json;
    use url::Url;

    use super::sponsorship_query;
    use super::with_segments;

    #[test]
    fn segments_append_after_base_path() {
        for base in ["https://api.github.com", "https://ghe.local/api/v3/"] {
            let base = Url::parse(base).unwrap();
            let url = with_segments(&base, &["repos", "dlvhdr", "gh-dash"]).unwrap();
            assert!(url.as_str().ends_with("/repos/dlvhdr/gh-dash"), "{url}");
            assert!(!url.as_str().contains("//repos"), "{url}");
        }
    }

    #[test]
    fn sponsorship_query_embeds_login_literal() {
        assert_eq!(
            sponsorship_query("dlvhdr"),
            json!({
                "query": "query { user(login:\"dlvhdr\") { monthlyEstimatedSponsorsIncomeInCents } }"
            })
        );
    }
}
