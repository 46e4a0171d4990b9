// crates/dash-docs-github/tests/github_proxy.rs
// ============================================================================
// Module: GitHub Proxy Tests
// Description: Proxy behavior against local mock upstream servers.
// Purpose: Validate live passthrough, fallbacks, headers, and audit events.
// Dependencies: dash-docs-github, dash-docs-config, tiny_http, tokio
// ============================================================================

//! ## Overview
//! Tests the GitHub proxies for:
//! - Happy path: 2xx JSON bodies returned unmodified
//! - Fallbacks: non-2xx status, connection failure, and non-JSON bodies
//! - Request shape: target paths, bearer token, user agent, GraphQL body
//! - Audit: one event per call with outcome and reason

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;
use std::net::TcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use dash_docs_config::AuditConfig;
use dash_docs_config::FallbackConfig;
use dash_docs_config::GithubConfig;
use dash_docs_github::GithubProxies;
use dash_docs_github::PayloadSource;
use dash_docs_github::ProxyAuditEvent;
use dash_docs_github::ProxyAuditSink;
use dash_docs_github::ProxyError;
use dash_docs_github::ProxyKind;
use dash_docs_github::audit_sink_from_config;
use serde_json::Value;
use serde_json::json;
use tempfile::TempDir;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Audit sink that keeps every event in memory.
#[derive(Default)]
struct CapturingSink {
    events: Mutex<Vec<ProxyAuditEvent>>,
}

impl CapturingSink {
    fn events(&self) -> Vec<ProxyAuditEvent> {
        self.events.lock().expect("events lock").clone()
    }
}

impl ProxyAuditSink for CapturingSink {
    fn record(&self, event: &ProxyAuditEvent) {
        self.events.lock().expect("events lock").push(event.clone());
    }
}

/// Request observed by the mock upstream.
#[derive(Debug)]
struct CapturedRequest {
    method: String,
    path: String,
    authorization: Option<String>,
    user_agent: Option<String>,
    body: String,
}

fn header_value(request: &Request, name: &'static str) -> Option<String> {
    request
        .headers()
        .iter()
        .find(|header| header.field.equiv(name))
        .map(|header| header.value.as_str().to_string())
}

/// Spawns a one-shot upstream that answers with `body` and `status`.
fn spawn_server(body: &'static str, status: u16) -> (String, thread::JoinHandle<CapturedRequest>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");

    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let authorization = header_value(&request, "Authorization");
        let user_agent = header_value(&request, "User-Agent");
        let mut payload = String::new();
        request.as_reader().read_to_string(&mut payload).unwrap();
        let captured = CapturedRequest {
            method: request.method().as_str().to_string(),
            path: request.url().to_string(),
            authorization,
            user_agent,
            body: payload,
        };
        let response = Response::from_string(body).with_status_code(status);
        let _ = request.respond(response);
        captured
    });

    (url, handle)
}

/// Returns a base URL on which nothing is listening.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn proxies(base: &str, token: Option<&str>, audit: Arc<CapturingSink>) -> GithubProxies {
    let github = GithubConfig {
        api_base_url: base.to_string(),
        timeout_ms: Some(5_000),
        ..GithubConfig::default()
    };
    GithubProxies::new(&github, FallbackConfig::default(), token.map(str::to_string), audit).unwrap()
}

// ============================================================================
// SECTION: Fallback Tests
// ============================================================================

#[tokio::test]
async fn stars_falls_back_on_not_found() {
    let (url, handle) = spawn_server("{\"message\":\"Not Found\"}", 404);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&url, None, Arc::clone(&audit)).stars().await;

    assert_eq!(response.kind, ProxyKind::Stars);
    assert_eq!(response.source, PayloadSource::Fallback);
    assert_eq!(response.body, json!({ "stargazers_count": 8700 }));
    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "GET");
    assert_eq!(captured.path, "/repos/dlvhdr/gh-dash");
    let events = audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].outcome, PayloadSource::Fallback);
    assert_eq!(events[0].upstream_status, Some(404));
    assert_eq!(events[0].reason.as_deref(), Some("upstream status 404"));
}

#[tokio::test]
async fn latest_version_falls_back_on_network_error() {
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&closed_port_url(), None, Arc::clone(&audit)).latest_version().await;

    assert_eq!(response.source, PayloadSource::Fallback);
    assert_eq!(response.body, json!({ "tag_name": "v4.0.0" }));
    let events = audit.events();
    assert_eq!(events[0].upstream_status, None);
    assert!(events[0].reason.as_deref().unwrap().starts_with("transport error"));
}

#[tokio::test]
async fn invalid_json_body_falls_back() {
    let (url, handle) = spawn_server("<html>rate limited</html>", 200);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&url, None, Arc::clone(&audit)).latest_version().await;

    assert_eq!(response.body, json!({ "tag_name": "v4.0.0" }));
    let captured = handle.join().unwrap();
    assert_eq!(captured.path, "/repos/dlvhdr/gh-dash/releases/latest");
    let events = audit.events();
    assert_eq!(events[0].upstream_status, Some(200));
    assert!(events[0].reason.as_deref().unwrap().starts_with("invalid json body"));
}

#[tokio::test]
async fn sponsorship_falls_back_on_server_error() {
    let (url, handle) = spawn_server("{}", 502);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&url, None, audit).sponsorship_goal().await;

    assert_eq!(
        response.body,
        json!({ "data": { "user": { "monthlyEstimatedSponsorsIncomeInCents": 4000 } } })
    );
    handle.join().unwrap();
}

#[tokio::test]
async fn configured_fallback_values_are_used() {
    let audit = Arc::new(CapturingSink::default());
    let github = GithubConfig {
        api_base_url: closed_port_url(),
        ..GithubConfig::default()
    };
    let fallbacks = FallbackConfig {
        stargazers_count: 12,
        tag_name: "v9.9.9".to_string(),
        monthly_sponsors_income_cents: 1,
    };
    let proxies = GithubProxies::new(&github, fallbacks, None, audit).unwrap();

    assert_eq!(proxies.stars().await.body, json!({ "stargazers_count": 12 }));
    assert_eq!(proxies.latest_version().await.body, json!({ "tag_name": "v9.9.9" }));
}

// ============================================================================
// SECTION: Live Passthrough Tests
// ============================================================================

#[tokio::test]
async fn sponsorship_returns_live_body_unmodified() {
    let body = "{\"data\":{\"user\":{\"monthlyEstimatedSponsorsIncomeInCents\": 1234}}}";
    let (url, handle) = spawn_server(body, 200);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&url, Some("test-token"), Arc::clone(&audit)).sponsorship_goal().await;

    assert_eq!(response.source, PayloadSource::Live);
    let expected: Value = serde_json::from_str(body).unwrap();
    assert_eq!(response.body, expected);
    let captured = handle.join().unwrap();
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/graphql");
    assert_eq!(captured.authorization.as_deref(), Some("bearer test-token"));
    let sent: Value = serde_json::from_str(&captured.body).unwrap();
    assert_eq!(
        sent,
        json!({
            "query": "query { user(login:\"dlvhdr\") { monthlyEstimatedSponsorsIncomeInCents } }"
        })
    );
    let events = audit.events();
    assert_eq!(events[0].outcome, PayloadSource::Live);
    assert_eq!(events[0].reason, None);
}

#[tokio::test]
async fn stars_passes_extra_fields_through() {
    let (url, handle) = spawn_server("{\"stargazers_count\": 9100, \"name\": \"gh-dash\"}", 200);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&url, None, audit).stars().await;

    assert_eq!(response.body, json!({ "stargazers_count": 9100, "name": "gh-dash" }));
    let captured = handle.join().unwrap();
    assert_eq!(captured.authorization, None);
    assert!(captured.user_agent.unwrap().starts_with("dash-docs/"));
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let (url, handle) = spawn_server("{\"tag_name\": \"v4.1.0\"}", 200);
    let audit = Arc::new(CapturingSink::default());

    let response = proxies(&format!("{url}/api/v3"), None, audit).latest_version().await;

    assert_eq!(response.body, json!({ "tag_name": "v4.1.0" }));
    assert_eq!(handle.join().unwrap().path, "/api/v3/repos/dlvhdr/gh-dash/releases/latest");
}

#[test]
fn repository_names_outside_charset_are_refused() {
    let audit = Arc::new(CapturingSink::default());
    let github = GithubConfig {
        owner: "x?q=".to_string(),
        repo: "..".to_string(),
        ..GithubConfig::default()
    };
    let result = GithubProxies::new(&github, FallbackConfig::default(), None, audit);
    assert!(matches!(result, Err(ProxyError::Config(_))));
}

// ============================================================================
// SECTION: Audit Sink Tests
// ============================================================================

#[tokio::test]
async fn file_audit_sink_appends_json_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = audit_sink_from_config(&AuditConfig {
        enabled: true,
        path: Some(path.to_string_lossy().into_owned()),
    })
    .unwrap();
    let github = GithubConfig {
        api_base_url: closed_port_url(),
        ..GithubConfig::default()
    };
    let proxies = GithubProxies::new(&github, FallbackConfig::default(), None, sink).unwrap();

    proxies.stars().await;
    proxies.latest_version().await;

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["event"], json!("github_proxy"));
    assert_eq!(lines[0]["proxy"], json!("stars"));
    assert_eq!(lines[1]["proxy"], json!("latest_version"));
    assert_eq!(lines[1]["outcome"], json!("fallback"));
}
