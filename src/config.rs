//! Configuration types for the pagination proxy
//!
//! Configuration comes from an optional JSON or YAML file, then gets
//! overridden by command-line flags and environment variables (see
//! `cli::commands`). Upstream credentials are optional at load time: a proxy
//! without them still starts and answers every request with a
//! misconfiguration error.

use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default upstream API root
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Number of resources requested from the upstream per page
pub const PAGE_SIZE: u32 = 10;

/// Deadline for a single upstream call
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Proxy Config
// ============================================================================

/// Complete proxy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Upstream endpoint and credentials
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Upstream call deadline; fixed for the binary, not read from files
    #[serde(skip, default = "default_timeout")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            timeout: default_timeout(),
        }
    }
}

impl ProxyConfig {
    /// Load config from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(serde_json::from_str(&contents)?),
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&contents)?),
            _ => Err(Error::config(format!(
                "Unsupported config file type: {}",
                path.display()
            ))),
        }
    }

    /// Upstream call deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Set the upstream call deadline; zero is rejected
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.timeout = timeout;
        self.validate()?;
        Ok(self)
    }

    /// Check values a struct literal could have set to something unusable
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::config("Upstream timeout must be greater than zero"));
        }
        Ok(())
    }
}

// ============================================================================
// Upstream Config
// ============================================================================

/// Upstream endpoint and (possibly incomplete) credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// API root, without the cloud name
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Account (cloud) name
    #[serde(default)]
    pub cloud_name: Option<String>,

    /// API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// API secret
    #[serde(default)]
    pub api_secret: Option<String>,

    /// Optional client-side rate limit for upstream calls
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cloud_name: None,
            api_key: None,
            api_secret: None,
            rate_limit: None,
        }
    }
}

impl UpstreamConfig {
    /// Config pointing at a different API root
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set all three credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.cloud_name = Some(cloud_name.into());
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Resolve complete credentials.
    ///
    /// An empty value counts as missing. The first missing field is reported.
    pub fn credentials(&self) -> Result<Credentials> {
        let cloud_name = required(self.cloud_name.as_deref(), "cloud_name")?;
        let api_key = required(self.api_key.as_deref(), "api_key")?;
        let api_secret = required(self.api_secret.as_deref(), "api_secret")?;
        Ok(Credentials::new(cloud_name, api_key, api_secret))
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::missing_field(field))
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "***"))
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

// ============================================================================
// Credentials
// ============================================================================

/// Complete upstream credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account (cloud) name
    pub cloud_name: String,
    /// API key, sent as the Basic auth username
    pub api_key: String,
    /// API secret, sent as the Basic auth password
    pub api_secret: String,
}

impl Credentials {
    /// Create credentials
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .finish()
    }
}
