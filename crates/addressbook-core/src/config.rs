// ── Runtime lookup configuration ──
//
// Describes *where* the address API lives and how long to wait for it.
// Never touches disk: the front end builds a `LookupConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the address lookup backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Backend root (e.g., `http://localhost:3000`).
    pub base_url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional custom CA certificate (PEM) for private backends.
    pub ca_cert: Option<PathBuf>,
}

impl LookupConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            ca_cert: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
