// crates/dash-docs-github/src/lib.rs
// ============================================================================
// Module: Dash Docs GitHub Library
// Description: GitHub API proxies for the docs site widgets.
// Purpose: Fetch live repository data with fallbacks and audit every call.
// Dependencies: dash-docs-config, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! `dash-docs-github` wraps the three GitHub calls the docs site makes:
//! repository stars, the latest release tag, and monthly sponsorship income.
//! Callers always receive a JSON body; upstream failures are replaced by
//! fallback payloads and reported through [`ProxyAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod proxy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ProxyAuditEvent;
pub use audit::ProxyAuditSink;
pub use audit::StderrAuditSink;
pub use audit::audit_sink_from_config;
pub use proxy::GithubProxies;
pub use proxy::PayloadSource;
pub use proxy::ProxyError;
pub use proxy::ProxyKind;
pub use proxy::ProxyResponse;
