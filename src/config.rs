// src/config.rs

use crate::GeocodeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// The public OpenCage endpoint returning JSON.
pub const DEFAULT_SERVER: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Redirect limit applied when none is configured.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Connection settings for a [`Geocoder`](crate::Geocoder).
///
/// Only `api_key` is mandatory. The configuration can be deserialized from any
/// serde format; missing fields take their defaults:
///
/// ```
/// use ocgeo_rs::GeocoderConfig;
///
/// let config: GeocoderConfig = serde_json::from_str(r#"{"api_key": "secret"}"#).unwrap();
/// assert_eq!(config.server, ocgeo_rs::config::DEFAULT_SERVER);
/// assert_eq!(config.timeout_secs, None);
/// ```
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocoderConfig {
    /// API credential, sent as the `key` query parameter.
    pub api_key: String,

    /// Base URL the query string is appended to.
    #[serde(default = "default_server")]
    pub server: String,

    /// Total request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Connect timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,

    /// Maximum number of redirects to follow. `0` disables redirects.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Overrides the `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

const fn default_max_redirects() -> usize {
    DEFAULT_MAX_REDIRECTS
}

// Keeps the credential out of logs.
impl fmt::Debug for GeocoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeocoderConfig")
            .field("api_key", &"<redacted>")
            .field("server", &self.server)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_redirects", &self.max_redirects)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl GeocoderConfig {
    /// Creates a configuration for the public endpoint with default transport
    /// settings.
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            server: default_server(),
            timeout_secs: None,
            connect_timeout_secs: None,
            max_redirects: default_max_redirects(),
            user_agent: None,
        }
    }

    pub fn with_server(mut self, server: &str) -> Self {
        self.server = server.to_string();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = Some(secs);
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = Some(user_agent.to_string());
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    /// Checks the key is present and the server is an absolute base URL.
    pub fn validate(&self) -> Result<(), GeocodeError> {
        if self.api_key.trim().is_empty() {
            return Err(GeocodeError::InvalidInput(
                "API key cannot be empty.".to_string(),
            ));
        }

        let server = Url::parse(&self.server)?;
        if server.cannot_be_a_base() {
            return Err(GeocodeError::InvalidUrl(format!(
                "The server URL '{}' cannot be a base URL. Please provide a full URL (e.g., {}).",
                self.server, DEFAULT_SERVER
            )));
        }
        if server.query().is_some() {
            return Err(GeocodeError::InvalidUrl(format!(
                "The server URL '{}' must not carry a query string.",
                self.server
            )));
        }
        Ok(())
    }
}
