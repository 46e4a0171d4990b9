// crates/dash-docs-server/src/server.rs
// ============================================================================
// Module: Docs Server
// Description: Axum router and listener for the docs site endpoints.
// Purpose: Serve pre-rendered schema documents and proxied GitHub data.
// Dependencies: axum, tokio, dash-docs-config, dash-docs-content,
//               dash-docs-github, dash-docs-schema
// ============================================================================

//! ## Overview
//! [`DocsServer`] validates the schema registry and renders every document
//! once at startup. Each registered path gets its own GET route returning
//! the pre-rendered bytes, so responses are byte-identical across requests.
//! The proxy routes always answer 200; upstream failures are replaced by
//! fallback payloads inside [`GithubProxies`]. Unknown paths return a JSON
//! 404 body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use dash_docs_config::DashDocsConfig;
use dash_docs_content::SiteConfig;
use dash_docs_github::GithubProxies;
use dash_docs_github::audit_sink_from_config;
use dash_docs_schema::SchemaRegistry;
use dash_docs_schema::registry::render_json;
use serde_json::json;
use tokio::net::TcpListener;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Route serving the site configuration.
pub const SITE_PATH: &str = "/site.json";
/// Route serving the liveness check.
pub const HEALTH_PATH: &str = "/healthz";
/// Route serving the stars proxy.
pub const STARS_PATH: &str = "/stars";
/// Route serving the latest release proxy.
pub const LATEST_VERSION_PATH: &str = "/latest-version";
/// Route serving the sponsorship income proxy.
pub const SPONSORSHIP_GOAL_PATH: &str = "/sponsorship-goal";

/// Content type of every response body.
const JSON_CONTENT_TYPE: &str = "application/json";

// ============================================================================
// SECTION: Docs Server
// ============================================================================

/// Docs site HTTP server.
pub struct DocsServer {
    /// Address the listener binds to.
    bind: SocketAddr,
    /// Immutable state shared by all handlers.
    state: Arc<ServerState>,
}

impl DocsServer {
    /// Builds a server from validated configuration with the built-in
    /// schema registry and site configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when configuration is invalid, the audit sink
    /// cannot be opened, or the schema registry fails validation.
    pub fn from_config(config: &DashDocsConfig) -> Result<Self, ServerError> {
        config.validate().map_err(|err| ServerError::Config(err.to_string()))?;
        let bind = config.server.bind_addr().map_err(|err| ServerError::Config(err.to_string()))?;
        let audit = audit_sink_from_config(&config.audit)
            .map_err(|err| ServerError::Init(format!("audit sink: {err}")))?;
        let proxies = GithubProxies::from_config(config, audit)
            .map_err(|err| ServerError::Init(err.to_string()))?;
        Self::from_parts(bind, &SchemaRegistry::builtin(), &SiteConfig::gh_dash(), proxies)
    }

    /// Builds a server from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Init`] when the registry fails validation or a
    /// document cannot be rendered.
    pub fn from_parts(
        bind: SocketAddr,
        registry: &SchemaRegistry,
        site: &SiteConfig,
        proxies: GithubProxies,
    ) -> Result<Self, ServerError> {
        registry.validate().map_err(|err| ServerError::Init(err.to_string()))?;
        let mut schemas = BTreeMap::new();
        for document in registry.documents() {
            let bytes = render_json(&document.node)
                .map_err(|err| ServerError::Init(format!("{}: {err}", document.path)))?;
            schemas.insert(document.path.clone(), Bytes::from(bytes));
        }
        let site = render_json(site).map_err(|err| ServerError::Init(format!("site: {err}")))?;
        Ok(Self {
            bind,
            state: Arc::new(ServerState {
                schemas,
                site: Bytes::from(site),
                proxies,
            }),
        })
    }

    /// Returns the configured bind address.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind
    }

    /// Builds the router over the shared state.
    #[must_use]
    pub fn router(&self) -> Router {
        let mut router = Router::new();
        for path in self.state.schemas.keys() {
            router = router.route(path, get(handle_schema));
        }
        router
            .route(STARS_PATH, get(handle_stars))
            .route(LATEST_VERSION_PATH, get(handle_latest_version))
            .route(SPONSORSHIP_GOAL_PATH, get(handle_sponsorship_goal))
            .route(SITE_PATH, get(handle_site))
            .route(HEALTH_PATH, get(handle_health))
            .fallback(handle_not_found)
            .with_state(Arc::clone(&self.state))
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.bind)
            .await
            .map_err(|err| ServerError::Transport(format!("bind {} failed: {err}", self.bind)))?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Transport`] when the server fails.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|err| ServerError::Transport(format!("http server failed: {err}")))
    }
}

/// Shared server state for handlers.
struct ServerState {
    /// Rendered schema documents keyed by served path.
    schemas: BTreeMap<String, Bytes>,
    /// Rendered site configuration.
    site: Bytes,
    /// GitHub proxies sharing one HTTP client.
    proxies: GithubProxies,
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves one pre-rendered schema document.
async fn handle_schema(State(state): State<Arc<ServerState>>, uri: Uri) -> Response {
    match state.schemas.get(uri.path()) {
        Some(bytes) => json_bytes(bytes.clone()),
        None => not_found(uri.path()),
    }
}

/// Serves the stars proxy.
async fn handle_stars(State(state): State<Arc<ServerState>>) -> Json<serde_json::Value> {
    Json(state.proxies.stars().await.body)
}

/// Serves the latest release proxy.
async fn handle_latest_version(State(state): State<Arc<ServerState>>) -> Json<serde_json::Value> {
    Json(state.proxies.latest_version().await.body)
}

/// Serves the sponsorship income proxy.
async fn handle_sponsorship_goal(
    State(state): State<Arc<ServerState>>,
) -> Json<serde_json::Value> {
    Json(state.proxies.sponsorship_goal().await.body)
}

/// Serves the site configuration.
async fn handle_site(State(state): State<Arc<ServerState>>) -> Response {
    json_bytes(state.site.clone())
}

/// Serves the liveness check.
async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Serves the JSON 404 body for unknown paths.
async fn handle_not_found(uri: Uri) -> Response {
    not_found(uri.path())
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Wraps rendered JSON bytes in a 200 response.
fn json_bytes(bytes: Bytes) -> Response {
    ([(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))], bytes).into_response()
}

/// Builds the JSON 404 response.
fn not_found(path: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found", "path": path }))).into_response()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Docs server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
