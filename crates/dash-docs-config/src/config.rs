// crates/dash-docs-config/src/config.rs
// ============================================================================
// Module: Dash Docs Configuration
// Description: Configuration loading and validation for the docs backend.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The file path comes from the caller, then `DASH_DOCS_CONFIG`, then the
//! default `dash-docs.toml`. Every section defaults, so an empty file yields
//! the production settings for gh-dash.dev.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "dash-docs.toml";
/// Environment variable overriding the configuration path.
pub const CONFIG_ENV_VAR: &str = "DASH_DOCS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of one path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted outbound request timeout.
pub const MIN_GITHUB_TIMEOUT_MS: u64 = 100;
/// Largest accepted outbound request timeout.
pub const MAX_GITHUB_TIMEOUT_MS: u64 = 60_000;
/// Default listen address.
const DEFAULT_BIND: &str = "127.0.0.1:4321";
/// Default GitHub API base URL.
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
/// Default repository owner.
const DEFAULT_OWNER: &str = "dlvhdr";
/// Default repository name.
const DEFAULT_REPO: &str = "gh-dash";
/// Default sponsored account login.
const DEFAULT_SPONSOR_LOGIN: &str = "dlvhdr";
/// Default token environment variable.
const DEFAULT_TOKEN_ENV: &str = "GH_TOKEN";
/// Default stargazer count served when the upstream fails.
const DEFAULT_STARGAZERS_COUNT: u64 = 8700;
/// Default release tag served when the upstream fails.
const DEFAULT_TAG_NAME: &str = "v4.0.0";
/// Default monthly sponsorship income served when the upstream fails.
const DEFAULT_MONTHLY_SPONSORS_INCOME_CENTS: u64 = 4000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Docs backend configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashDocsConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// GitHub proxy configuration.
    #[serde(default)]
    pub github: GithubConfig,
    /// Payloads substituted when an upstream call fails.
    #[serde(default)]
    pub fallbacks: FallbackConfig,
    /// Proxy audit output configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl DashDocsConfig {
    /// Loads configuration from disk using the default resolution rules:
    /// explicit path, then `DASH_DOCS_CONFIG`, then `dash-docs.toml` in the
    /// working directory. Defaults apply when none of these names a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = resolve_path(path)? else {
            return Ok(Self::default());
        };
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.github.validate()?;
        self.fallbacks.validate()?;
        self.audit.validate()?;
        Ok(())
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address (`host:port`).
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    /// Parses the listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the address is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("server.bind is not a socket address: {}", self.bind)))
    }

    /// Validates server settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr().map(|_| ())
    }
}

/// GitHub proxy configuration.
///
/// # Invariants
/// - `api_base_url` is an absolute `http` or `https` URL.
/// - `owner`, `repo`, `sponsor_login`, `token_env`, and `user_agent` are non-empty.
/// - `owner` and `repo` are single GitHub names: `[A-Za-z0-9._-]`, never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the GitHub API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Repository owner queried for stars and releases.
    #[serde(default = "default_owner")]
    pub owner: String,
    /// Repository name queried for stars and releases.
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Account whose sponsorship income is queried.
    #[serde(default = "default_sponsor_login")]
    pub sponsor_login: String,
    /// Environment variable holding the bearer token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
    /// `User-Agent` header sent upstream.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional outbound request timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            owner: default_owner(),
            repo: default_repo(),
            sponsor_login: default_sponsor_login(),
            token_env: default_token_env(),
            user_agent: default_user_agent(),
            timeout_ms: None,
        }
    }
}

impl GithubConfig {
    /// Reads the bearer token from the configured environment variable.
    ///
    /// Empty or whitespace-only values count as unset.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        env::var(&self.token_env)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Parses the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is malformed or not http(s).
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(self.api_base_url.trim()).map_err(|err| {
            ConfigError::Invalid(format!("github.api_base_url is invalid: {err}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "github.api_base_url must use http or https".to_string(),
            ));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("github.api_base_url must name a host".to_string()));
        }
        Ok(url)
    }

    /// Returns the trimmed `(owner, repo)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when either name is empty, is `.` or `..`, or
    /// holds a character outside ASCII letters, digits, `.`, `_`, and `-`.
    pub fn repository(&self) -> Result<(&str, &str), ConfigError> {
        Ok((
            repository_name("github.owner", &self.owner)?,
            repository_name("github.repo", &self.repo)?,
        ))
    }

    /// Validates GitHub settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        require_non_empty("github.owner", &self.owner)?;
        require_non_empty("github.repo", &self.repo)?;
        require_non_empty("github.sponsor_login", &self.sponsor_login)?;
        require_non_empty("github.token_env", &self.token_env)?;
        require_non_empty("github.user_agent", &self.user_agent)?;
        self.repository()?;
        if !self.sponsor_login.trim().chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-') {
            return Err(ConfigError::Invalid(
                "github.sponsor_login must contain only ASCII letters, digits, and '-'".to_string(),
            ));
        }
        if let Some(timeout_ms) = self.timeout_ms
            && !(MIN_GITHUB_TIMEOUT_MS..=MAX_GITHUB_TIMEOUT_MS).contains(&timeout_ms)
        {
            return Err(ConfigError::Invalid(format!(
                "github.timeout_ms must be between {MIN_GITHUB_TIMEOUT_MS} and \
                 {MAX_GITHUB_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

/// Payload values substituted when an upstream call fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Stargazer count for `/stars`.
    #[serde(default = "default_stargazers_count")]
    pub stargazers_count: u64,
    /// Release tag for `/latest-version`.
    #[serde(default = "default_tag_name")]
    pub tag_name: String,
    /// Monthly income in cents for `/sponsorship-goal`.
    #[serde(default = "default_monthly_sponsors_income_cents")]
    pub monthly_sponsors_income_cents: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            stargazers_count: DEFAULT_STARGAZERS_COUNT,
            tag_name: default_tag_name(),
            monthly_sponsors_income_cents: DEFAULT_MONTHLY_SPONSORS_INCOME_CENTS,
        }
    }
}

impl FallbackConfig {
    /// Validates fallback values.
    fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty("fallbacks.tag_name", &self.tag_name)
    }
}

/// Proxy audit output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Whether proxy outcomes are recorded.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// JSON-lines file to append to; stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl AuditConfig {
    /// Validates audit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default listen address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default GitHub API base URL.
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Default repository owner.
fn default_owner() -> String {
    DEFAULT_OWNER.to_string()
}

/// Default repository name.
fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

/// Default sponsored account.
fn default_sponsor_login() -> String {
    DEFAULT_SPONSOR_LOGIN.to_string()
}

/// Default token environment variable.
fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.to_string()
}

/// Default `User-Agent` header.
fn default_user_agent() -> String {
    format!("dash-docs/{}", env!("CARGO_PKG_VERSION"))
}

/// Default stargazer fallback.
const fn default_stargazers_count() -> u64 {
    DEFAULT_STARGAZERS_COUNT
}

/// Default release tag fallback.
fn default_tag_name() -> String {
    DEFAULT_TAG_NAME.to_string()
}

/// Default sponsorship income fallback.
const fn default_monthly_sponsors_income_cents() -> u64 {
    DEFAULT_MONTHLY_SPONSORS_INCOME_CENTS
}

/// Audit output is on unless disabled.
const fn default_audit_enabled() -> bool {
    true
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument, environment, or default.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default_path.is_file().then_some(default_path))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Checks a GitHub owner or repository name used as one URL path segment.
fn repository_name<'a>(field: &str, value: &'a str) -> Result<&'a str, ConfigError> {
    let name = value.trim();
    if name.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if name == "." || name == ".." {
        return Err(ConfigError::Invalid(format!("{field} must not be `.` or `..`")));
    }
    if !name.chars().all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-')) {
        return Err(ConfigError::Invalid(format!(
            "{field} must contain only ASCII letters, digits, '.', '_', and '-'"
        )));
    }
    Ok(name)
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Rejects empty or whitespace-only values.
fn require_non_empty(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::missing_docs_in_private_items,
        reason = "Test-only assertions."
    )]

    use super::MAX_PATH_COMPONENT_LENGTH;
    use super::MAX_TOTAL_PATH_LENGTH;
    use super::validate_path;
    use super::validate_path_string;

    #[test]
    fn validate_path_string_rejects_empty_string() {
        let result = validate_path_string("audit.path", "  ");
        assert!(result.unwrap_err().to_string().contains("audit.path must be non-empty"));
    }

    #[test]
    fn validate_path_string_rejects_component_too_long() {
        let path = format!("./{}", "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1));
        let result = validate_path_string("audit.path", &path);
        assert!(result.unwrap_err().to_string().contains("component too long"));
    }

    #[test]
    fn validate_path_string_accepts_nested_path() {
        assert!(validate_path_string("audit.path", "./logs/proxy-audit.jsonl").is_ok());
    }

    #[test]
    fn validate_path_rejects_overlong_path() {
        let path = std::path::PathBuf::from("a".repeat(MAX_TOTAL_PATH_LENGTH + 1));
        assert!(validate_path(&path).unwrap_err().to_string().contains("max length"));
    }
}
