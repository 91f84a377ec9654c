//! Configuration structures for Proxmox VE clients.
//!
//! This module provides the configuration type for connecting to a Proxmox VE
//! cluster node, including credentials, TLS transport options, and validation.

use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a Proxmox VE client instance.
///
/// Describes one session against one cluster node: the API base URL, the node
/// the client is scoped to, the credentials exchanged for a ticket at
/// construction time, and the transport options applied to every request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PveClientConfig {
    /// API base URL (e.g., `https://pve.example.com:8006/api2/json/`)
    #[validate(url)]
    pub api_url: String,

    /// Cluster node that owns the managed containers and VMs
    #[validate(length(min = 1))]
    pub node: String,

    /// Login user name (without the realm suffix)
    #[validate(length(min = 1))]
    pub username: String,

    /// Login password, exchanged once for a ticket and never sent again
    #[serde(skip_serializing)]
    pub password: SecretString,

    /// Authentication realm (e.g., `pam` or `pve`)
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_realm() -> String {
    "pam".to_string()
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl PveClientConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// The realm defaults to `pam`; use [`Self::with_realm`] to override.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(
        api_url: impl Into<String>,
        node: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<SecretString>,
    ) -> Result<Self, Error> {
        let config = Self {
            api_url: api_url.into(),
            node: node.into(),
            username: username.into(),
            password: password.into(),
            realm: default_realm(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the authentication realm.
    #[must_use]
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse and validate the API base URL.
    ///
    /// A trailing slash is appended when missing so that relative resource
    /// paths join below `/api2/json/` instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_url(&self) -> Result<Url, Error> {
        let raw = if self.api_url.ends_with('/') {
            self.api_url.clone()
        } else {
            format!("{}/", self.api_url)
        };

        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid API URL: {e}")))
    }
}
