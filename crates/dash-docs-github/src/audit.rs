// crates/dash-docs-github/src/audit.rs
// ============================================================================
// Module: Proxy Audit Logging
// Description: Structured audit events for GitHub proxy calls.
// Purpose: Record every live or fallback outcome as a JSON line.
// Dependencies: dash-docs-config, serde, serde_json
// ============================================================================

//! ## Overview
//! Each proxy call emits one [`ProxyAuditEvent`] through a
//! [`ProxyAuditSink`]. Sinks serialize events as single-line JSON and write
//! them to stderr or an append-only file; a no-op sink discards them.
//! Sink failures never affect the proxied response.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use dash_docs_config::AuditConfig;
use serde::Serialize;

use crate::proxy::PayloadSource;
use crate::proxy::ProxyKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Proxy audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Proxy that handled the call.
    pub proxy: ProxyKind,
    /// Whether the live body or the fallback was returned.
    pub outcome: PayloadSource,
    /// Upstream HTTP status when a response arrived.
    pub upstream_status: Option<u16>,
    /// Why the fallback was used.
    pub reason: Option<String>,
    /// Time spent on the upstream call in milliseconds.
    pub latency_ms: u128,
}

impl ProxyAuditEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(
        proxy: ProxyKind,
        outcome: PayloadSource,
        upstream_status: Option<u16>,
        reason: Option<String>,
        latency_ms: u128,
    ) -> Self {
        Self {
            event: "github_proxy",
            timestamp_ms: now_ms(),
            proxy,
            outcome,
            upstream_status,
            reason,
            latency_ms,
        }
    }
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for proxy events.
pub trait ProxyAuditSink: Send + Sync {
    /// Records a proxy audit event.
    fn record(&self, event: &ProxyAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ProxyAuditSink for StderrAuditSink {
    fn record(&self, event: &ProxyAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ProxyAuditSink for FileAuditSink {
    fn record(&self, event: &ProxyAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ProxyAuditSink for NoopAuditSink {
    fn record(&self, _event: &ProxyAuditEvent) {}
}

/// Builds the sink selected by the audit configuration.
///
/// # Errors
///
/// Returns an error when the configured audit file cannot be opened.
pub fn audit_sink_from_config(config: &AuditConfig) -> io::Result<Arc<dyn ProxyAuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Arc::new(FileAuditSink::new(Path::new(path.trim()))?)),
        None => Ok(Arc::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}
