//! Configuration for the Particle API client
//!
//! Immutable with builder-style setters; every setter returns a new value,
//! so a base configuration can be shared and specialized freely.

use crate::error::{ApiResult, ParticleError};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default Particle cloud endpoint
const DEFAULT_ENDPOINT: &str = "https://api.particle.io/";

/// Default API version path component
const DEFAULT_API_VERSION: &str = "v1";

/// Default request timeout passed to the transport
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    /// Base URL for the API, always with a trailing slash
    pub endpoint: String,
    /// API version path component (the OAuth token endpoint ignores it)
    pub api_version: String,
    /// OAuth access token for `Bearer` authentication
    pub access_token: Option<String>,
    /// Account username (an email address) for `Basic` authentication
    pub username: Option<String>,
    /// Account password for `Basic` authentication
    pub password: Option<String>,
    /// Request timeout, enforced by the transport rather than the core
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Whether the transport should verify TLS certificates
    pub verify_tls: bool,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            access_token: None,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            verify_tls: true,
        }
    }
}

impl ParticleConfig {
    /// Create a default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `PARTICLE_ENDPOINT`: Base API URL
    /// - `PARTICLE_API_VERSION`: API version path component
    /// - `PARTICLE_ACCESS_TOKEN`: OAuth access token
    /// - `PARTICLE_USERNAME` / `PARTICLE_PASSWORD`: Account credentials
    /// - `PARTICLE_TIMEOUT_SECS`: Request timeout in seconds
    /// - `PARTICLE_VERIFY_TLS`: Set to `false` or `0` to disable verification
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var("PARTICLE_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        if let Ok(version) = env::var("PARTICLE_API_VERSION") {
            config.api_version = version;
        }
        config.access_token = env::var("PARTICLE_ACCESS_TOKEN").ok();
        config.username = env::var("PARTICLE_USERNAME").ok();
        config.password = env::var("PARTICLE_PASSWORD").ok();

        if let Some(timeout) = env::var("PARTICLE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
        {
            config.timeout = timeout;
        }

        if let Ok(verify) = env::var("PARTICLE_VERIFY_TLS") {
            config.verify_tls = !matches!(verify.as_str(), "false" | "0" | "no");
        }

        config
    }

    /// Builder-style method to set the endpoint, normalizing the trailing slash
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let mut endpoint = endpoint.into();
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        self.endpoint = endpoint;
        self
    }

    /// Builder-style method to set the API version path component
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Builder-style method to set the access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builder-style method to clear the access token
    #[must_use]
    pub fn clear_access_token(mut self) -> Self {
        self.access_token = None;
        self
    }

    /// Builder-style method to set the account credentials
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Builder-style method to clear the account credentials
    #[must_use]
    pub fn clear_credentials(mut self) -> Self {
        self.username = None;
        self.password = None;
        self
    }

    /// Builder-style method to set the request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set TLS certificate verification
    #[must_use]
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.endpoint.is_empty() {
            return Err(ParticleError::invalid_argument("endpoint cannot be empty"));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ParticleError::invalid_argument(
                "endpoint must start with http:// or https://",
            ));
        }

        if self.api_version.is_empty() {
            return Err(ParticleError::invalid_argument(
                "api_version cannot be empty",
            ));
        }

        if self.timeout.is_zero() {
            return Err(ParticleError::invalid_argument("timeout cannot be zero"));
        }

        Ok(())
    }
}
