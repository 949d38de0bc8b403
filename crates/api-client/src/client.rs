//! Main API client implementation.

use http::Method;
use std::sync::Arc;
use tracing::debug;

use crate::auth::{self, AuthScheme};
use crate::config::ParticleConfig;
use crate::encode;
use crate::error::ApiResult;
use crate::operations::{DevicesApi, OrgsApi, TokensApi, WebhooksApi};
use crate::params::Params;
use crate::request::RequestMessage;
use crate::url;

/// How a POST/PUT parameter set is carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyFormat {
    /// `application/x-www-form-urlencoded`
    UrlForm,
    /// `multipart/form-data` with a fresh boundary
    Multipart,
}

/// Particle cloud API client.
///
/// Holds immutable configuration behind an [`Arc`]; cloning is cheap, and
/// every `with_*` setter returns a new client that shares nothing mutable
/// with the original, so one base client can serve concurrent callers with
/// different auth contexts.
///
/// The client only *builds* requests. Sending is delegated to a
/// [`Connector`](crate::transport::Connector) implementation, and the raw
/// response goes back through [`response::normalize`](crate::response::normalize).
#[derive(Debug, Clone)]
pub struct ParticleClient {
    config: Arc<ParticleConfig>,
}

impl Default for ParticleClient {
    fn default() -> Self {
        Self::new(ParticleConfig::default())
    }
}

impl ParticleClient {
    /// Create a client from a configuration.
    #[must_use]
    pub fn new(config: ParticleConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Create a client configured from `PARTICLE_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ParticleConfig::from_env())
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// A new client with a different endpoint.
    #[must_use]
    pub fn with_endpoint(&self, endpoint: impl Into<String>) -> Self {
        self.update(|c| c.with_endpoint(endpoint))
    }

    /// A new client with a different access token.
    #[must_use]
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        self.update(|c| c.with_access_token(token))
    }

    /// A new client without an access token.
    #[must_use]
    pub fn clear_access_token(&self) -> Self {
        self.update(ParticleConfig::clear_access_token)
    }

    /// A new client with account credentials.
    #[must_use]
    pub fn with_credentials(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.update(|c| c.with_credentials(username, password))
    }

    /// A new client without account credentials.
    #[must_use]
    pub fn clear_credentials(&self) -> Self {
        self.update(ParticleConfig::clear_credentials)
    }

    fn update(&self, f: impl FnOnce(ParticleConfig) -> ParticleConfig) -> Self {
        Self::new(f(self.config.as_ref().clone()))
    }

    // -------------------------------------------------------------------------
    // Operation group accessors
    // -------------------------------------------------------------------------

    /// Device operations
    #[must_use]
    pub fn devices(&self) -> DevicesApi {
        DevicesApi::new(self.clone())
    }

    /// Access-token operations
    #[must_use]
    pub fn tokens(&self) -> TokensApi {
        TokensApi::new(self.clone())
    }

    /// Webhook operations
    #[must_use]
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    /// Organization operations
    #[must_use]
    pub fn orgs(&self) -> OrgsApi {
        OrgsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Request-building template
    // -------------------------------------------------------------------------

    /// Build a request against the versioned API.
    pub(crate) fn build_request(
        &self,
        operation: &'static str,
        method: Method,
        segments: &[&str],
        params: Params,
        scheme: AuthScheme,
        format: BodyFormat,
    ) -> ApiResult<RequestMessage> {
        let url = url::api_url(&self.config, segments);
        self.assemble(operation, method, url, params, scheme, format)
    }

    /// Build a request against the version-independent OAuth token URL.
    pub(crate) fn build_oauth_request(
        &self,
        operation: &'static str,
        params: Params,
        scheme: AuthScheme,
    ) -> ApiResult<RequestMessage> {
        let url = url::oauth_token_url(&self.config);
        self.assemble(operation, Method::POST, url, params, scheme, BodyFormat::UrlForm)
    }

    /// The one template every operation follows: fold parameters into the
    /// query for GET/DELETE, encode them as the body for POST/PUT, then
    /// attach the operation's fixed auth scheme.
    fn assemble(
        &self,
        operation: &'static str,
        method: Method,
        url: String,
        params: Params,
        scheme: AuthScheme,
        format: BodyFormat,
    ) -> ApiResult<RequestMessage> {
        let request = if method == Method::GET || method == Method::DELETE {
            // These methods never carry a body in this API's convention.
            let url = url::with_query(url, &encode::query_pairs(&params)?);
            RequestMessage::new(operation, method, url)
        } else {
            let message = RequestMessage::new(operation, method, url);
            match format {
                BodyFormat::UrlForm => {
                    let body = encode::url_form(&params)?;
                    message.with_body(body, encode::FORM_CONTENT_TYPE)?
                }
                BodyFormat::Multipart => {
                    let boundary = encode::boundary();
                    let body = encode::multipart(&params, &boundary)?;
                    message.with_body(body, &encode::multipart_content_type(&boundary))?
                }
            }
        };

        let request = auth::apply(request, &self.config, scheme)?;

        debug!(
            operation,
            method = %request.method,
            url = %request.url,
            "built API request"
        );

        Ok(request)
    }
}
