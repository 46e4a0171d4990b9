// crates/dash-docs-server/src/server/tests.rs
// ============================================================================
// Module: Docs Server Unit Tests
// Description: Unit tests for startup validation and handler responses.
// Purpose: Validate handler bodies without binding a socket.
// Dependencies: dash-docs-server
// ============================================================================

//! ## Overview
//! Calls handlers directly against in-memory state built from the registry.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only handler assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use dash_docs_config::FallbackConfig;
use dash_docs_config::GithubConfig;
use dash_docs_content::SiteConfig;
use dash_docs_github::GithubProxies;
use dash_docs_github::NoopAuditSink;
use dash_docs_schema::SchemaDocument;
use dash_docs_schema::SchemaNode;
use dash_docs_schema::SchemaRegistry;
use dash_docs_schema::registry::render_json;
use serde_json::Value;
use serde_json::json;

use super::DocsServer;
use super::ServerError;
use super::handle_health;
use super::handle_not_found;
use super::handle_schema;
use super::handle_site;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn offline_proxies() -> GithubProxies {
    let github = GithubConfig {
        api_base_url: "http://127.0.0.1:9".to_string(),
        ..GithubConfig::default()
    };
    GithubProxies::new(&github, FallbackConfig::default(), None, Arc::new(NoopAuditSink)).unwrap()
}

fn bind() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

fn builtin_server() -> DocsServer {
    DocsServer::from_parts(bind(), &SchemaRegistry::builtin(), &SiteConfig::gh_dash(), offline_proxies())
        .unwrap()
}

async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

// ============================================================================
// SECTION: Startup
// ============================================================================

#[test]
fn invalid_registry_refuses_to_start() {
    let duplicate = SchemaRegistry::from_documents(vec![
        SchemaDocument::new("/schema.json", SchemaNode::document("a.schema.json", "A")),
        SchemaDocument::new("/schema.json", SchemaNode::document("b.schema.json", "B")),
    ]);
    let result = DocsServer::from_parts(bind(), &duplicate, &SiteConfig::gh_dash(), offline_proxies());
    let Err(ServerError::Init(message)) = result else {
        panic!("expected init error");
    };
    assert!(message.contains("schema registry invalid"));
}

#[test]
fn every_registered_path_is_pre_rendered() {
    let server = builtin_server();
    let registry = SchemaRegistry::builtin();
    assert_eq!(server.state.schemas.len(), registry.documents().len());
    for document in registry.documents() {
        let rendered = server.state.schemas.get(&document.path).expect("rendered");
        assert_eq!(rendered.as_ref(), render_json(&document.node).unwrap().as_slice());
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

#[tokio::test]
async fn schema_handler_returns_rendered_document() {
    let server = builtin_server();
    let response =
        handle_schema(State(Arc::clone(&server.state)), Uri::from_static("/schema/theme.json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "application/json");
    let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["$id"], json!("theme.schema.json"));
}

#[tokio::test]
async fn schema_handler_rejects_unregistered_path() {
    let server = builtin_server();
    let response =
        handle_schema(State(Arc::clone(&server.state)), Uri::from_static("/schema/missing.json"))
            .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn site_handler_serves_site_configuration() {
    let server = builtin_server();
    let response = handle_site(State(Arc::clone(&server.state))).await;
    let site: SiteConfig = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(site, SiteConfig::gh_dash());
}

#[tokio::test]
async fn health_and_not_found_bodies() {
    let health = handle_health().await.into_response();
    assert_eq!(health.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&body_bytes(health).await).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));

    let missing = handle_not_found(Uri::from_static("/nope")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body_bytes(missing).await).unwrap();
    assert_eq!(body, json!({ "error": "not found", "path": "/nope" }));
}
