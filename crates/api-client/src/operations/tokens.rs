//! Access-token operations
//!
//! Token listing and revocation authenticate with the account credentials
//! (Basic). Token issuance goes to the version-independent OAuth endpoint
//! with the fixed dummy client credentials, sending the account
//! credentials as form fields per the password grant.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::auth::AuthScheme;
use crate::client::{BodyFormat, ParticleClient};
use crate::error::{ApiResult, CredentialKind, ParticleError};
use crate::params::Params;
use crate::request::RequestMessage;

/// Access-token API interface
#[derive(Clone)]
pub struct TokensApi {
    client: ParticleClient,
}

impl TokensApi {
    /// Create a new tokens API interface
    pub(crate) fn new(client: ParticleClient) -> Self {
        Self { client }
    }

    /// List the account's access tokens.
    ///
    /// GET /v1/access_tokens
    pub fn list(&self) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "listAccessTokens",
            Method::GET,
            &["access_tokens"],
            Params::new(),
            AuthScheme::Basic,
            BodyFormat::UrlForm,
        )
    }

    /// Issue a new access token via the OAuth password grant.
    ///
    /// POST /oauth/token (no API version component)
    pub fn create(&self, options: &AccessTokenOptions) -> ApiResult<RequestMessage> {
        let config = self.client.config();
        let (username, password) = match (&config.username, &config.password) {
            (Some(u), Some(p)) => (u.clone(), p.clone()),
            _ => return Err(ParticleError::MissingCredential(CredentialKind::Account)),
        };

        let mut params = Params::new()
            .with("grant_type", "password")
            .with("username", username)
            .with("password", password);

        if let Some(expires_in) = options.expires_in {
            params.insert("expires_in", i64::try_from(expires_in).unwrap_or(i64::MAX));
        }
        if let Some(ref expires_at) = options.expires_at {
            params.insert("expires_at", expires_at.clone());
        }
        match (&options.client_id, &options.client_secret) {
            (Some(id), Some(secret)) => {
                params.insert("client_id", id.clone());
                params.insert("client_secret", secret.clone());
            }
            (None, None) => {}
            _ => {
                return Err(ParticleError::invalid_argument(
                    "client_id and client_secret must be supplied together",
                ));
            }
        }

        self.client
            .build_oauth_request("newAccessToken", params, AuthScheme::BasicDummy)
    }

    /// Revoke an access token.
    ///
    /// DELETE /v1/access_tokens/{token}
    pub fn delete(&self, token: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "deleteAccessToken",
            Method::DELETE,
            &["access_tokens", token],
            Params::new(),
            AuthScheme::Basic,
            BodyFormat::UrlForm,
        )
    }
}

/// Options for issuing a new access token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessTokenOptions {
    /// How long the token stays valid, in seconds; 0 means forever
    pub expires_in: Option<u64>,
    /// When the token should expire, as an ISO-8601 date string
    pub expires_at: Option<String>,
    /// OAuth client ID; only with `client_secret`
    pub client_id: Option<String>,
    /// OAuth client secret; only with `client_id`
    pub client_secret: Option<String>,
}

impl AccessTokenOptions {
    /// Create options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token lifetime in seconds
    #[must_use]
    pub fn with_expires_in(mut self, seconds: u64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    /// Set the expiry instant as an ISO-8601 date string
    #[must_use]
    pub fn with_expires_at(mut self, expires_at: impl Into<String>) -> Self {
        self.expires_at = Some(expires_at.into());
        self
    }

    /// Set the OAuth client credentials
    #[must_use]
    pub fn with_client(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = Some(client_id.into());
        self.client_secret = Some(client_secret.into());
        self
    }
}
