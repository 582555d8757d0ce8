//! HTTP connection configuration.

use std::time::Duration;

use secrecy::SecretString;

/// HTTP connection configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Target host (hostname or IP address, optionally with `:port`).
    pub host: String,

    /// Per-request timeout. `None` keeps the client default.
    pub timeout: Option<Duration>,
}

impl HttpConfig {
    /// Create a configuration for `host` with the client's default timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: None,
        }
    }

    /// Absolute URL for a path on the device.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}/{}", self.host, path.trim_start_matches('/'))
    }
}

/// Web interface login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}
