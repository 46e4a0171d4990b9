// crates/dash-docs-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for dash-docs-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use dash_docs_config::DashDocsConfig;

/// Parses a TOML string into a `DashDocsConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<DashDocsConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<DashDocsConfig, toml::de::Error> {
    config_from_toml("")
}
