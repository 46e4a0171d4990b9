// crates/dash-docs-config/src/lib.rs
// ============================================================================
// Module: Dash Docs Config Library
// Description: Canonical config model and validation for the docs backend.
// Purpose: Single source of truth for dash-docs.toml semantics.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! `dash-docs-config` defines the configuration model for the docs backend:
//! the listen address, GitHub proxy targets and credentials, fallback
//! payload values, and audit output. Loading is fail-closed with hard size
//! and path limits; every section has defaults so an empty file is valid.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
