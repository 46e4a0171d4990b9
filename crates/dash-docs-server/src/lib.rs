// crates/dash-docs-server/src/lib.rs
// ============================================================================
// Module: Dash Docs Server Library
// Description: HTTP endpoints for the dashboard docs site.
// Purpose: Serve schema documents, GitHub proxies, and site metadata.
// Dependencies: axum, tokio, dash-docs-*
// ============================================================================

//! ## Overview
//! `dash-docs-server` wires the schema registry, the GitHub proxies, and the
//! site configuration into one axum router. All shared state is immutable
//! and built before the listener is bound.

pub mod server;

pub use server::DocsServer;
pub use server::ServerError;
