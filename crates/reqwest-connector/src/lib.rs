//! reqwest-backed transport for the Particle cloud API client
//!
//! `particle-api-client` only builds requests; this crate sends them.
//! [`ReqwestConnector`] implements the core's
//! [`Connector`](particle_api_client::transport::Connector) capability
//! over a shared [`reqwest::Client`], honoring the configuration's
//! timeout and TLS-verification settings. [`ParticleCloud`] bundles a
//! request-building client with a connector so the common
//! build → send → normalize flow is a single call.
//!
//! # Example
//!
//! ```rust,no_run
//! use particle_api_client::ParticleConfig;
//! use particle_reqwest_connector::ParticleCloud;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cloud = ParticleCloud::new(
//!         ParticleConfig::from_env(),
//!     )?;
//!
//!     let request = cloud.client().devices().list()?;
//!     let devices = cloud.execute(request).await?;
//!     println!("devices: {devices}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use particle_api_client::transport::Connector;
use particle_api_client::{
    response, ApiResult, ParticleClient, ParticleConfig, RawResponse, RequestMessage,
    TransportError,
};
use tracing::debug;

/// A [`Connector`] implementation backed by [`reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestConnector {
    client: reqwest::Client,
}

impl ReqwestConnector {
    /// Create a connector honoring the configuration's timeout and TLS
    /// verification settings.
    pub fn new(config: &ParticleConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| TransportError::new(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Create a connector from an existing [`reqwest::Client`].
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Connector for ReqwestConnector {
    async fn send(&self, request: RequestMessage) -> Result<RawResponse, TransportError> {
        debug!(
            operation = request.operation,
            method = %request.method,
            url = %request.url,
            "sending API request"
        );

        let mut builder = self.client.request(request.method, &request.url);
        builder = builder.headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Map a reqwest error to the core's [`TransportError`].
fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::new(format!("request timed out: {err}"))
    } else if err.is_connect() {
        TransportError::new(format!("connection failed: {err}"))
    } else {
        TransportError::new(err.to_string())
    }
}

/// A request-building client coupled with a reqwest transport.
///
/// Copy-on-write auth contexts still apply: [`with_client`] swaps the
/// builder while the underlying connection pool is shared.
///
/// [`with_client`]: ParticleCloud::with_client
#[derive(Debug, Clone)]
pub struct ParticleCloud {
    client: ParticleClient,
    connector: ReqwestConnector,
}

impl ParticleCloud {
    /// Create a cloud handle from a configuration.
    pub fn new(config: ParticleConfig) -> Result<Self, TransportError> {
        let connector = ReqwestConnector::new(&config)?;
        Ok(Self {
            client: ParticleClient::new(config),
            connector,
        })
    }

    /// The request-building client.
    #[must_use]
    pub fn client(&self) -> &ParticleClient {
        &self.client
    }

    /// A new handle around a different request-building client, sharing
    /// this handle's connection pool.
    #[must_use]
    pub fn with_client(&self, client: ParticleClient) -> Self {
        Self {
            client,
            connector: self.connector.clone(),
        }
    }

    /// Send a built request and normalize the response.
    pub async fn execute(&self, request: RequestMessage) -> ApiResult<serde_json::Value> {
        let raw = self.connector.send(request.clone()).await?;
        response::normalize(&request, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use particle_api_client::ParticleError;

    fn config(server_url: &str) -> ParticleConfig {
        ParticleConfig::default()
            .with_endpoint(server_url)
            .with_access_token("T")
    }

    #[tokio::test]
    async fn sends_built_request_and_normalizes_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/devices")
            .match_header("authorization", "Bearer T")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"dev1","name":"kitchen"}]"#)
            .create_async()
            .await;

        let cloud = ParticleCloud::new(config(&server.url())).unwrap();
        let request = cloud.client().devices().list().unwrap();
        let value = cloud.execute(request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(value[0]["id"], "dev1");
    }

    #[tokio::test]
    async fn form_body_reaches_the_wire() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v1/devices/dev1")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body("name=lab")
            .with_status(200)
            .with_body(r#"{"name":"lab"}"#)
            .create_async()
            .await;

        let cloud = ParticleCloud::new(config(&server.url())).unwrap();
        let request = cloud.client().devices().rename("dev1", "lab").unwrap();
        cloud.execute(request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_error_bodies_are_classified() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/devices/nope")
            .with_status(200)
            .with_body(r#"{"error":"bad device id"}"#)
            .create_async()
            .await;

        let cloud = ParticleCloud::new(config(&server.url())).unwrap();
        let request = cloud.client().devices().get("nope").unwrap();

        match cloud.execute(request).await {
            Err(ParticleError::Api { message, .. }) => assert_eq!(message, "bad device id"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_a_transport_error() {
        // Nothing listens on this port.
        let config = ParticleConfig::default()
            .with_endpoint("http://127.0.0.1:1")
            .with_access_token("T");

        let cloud = ParticleCloud::new(config).unwrap();
        let request = cloud.client().devices().list().unwrap();

        match cloud.execute(request).await {
            Err(err) => assert!(err.is_transport_error()),
            Ok(value) => panic!("expected transport error, got {value}"),
        }
    }
}
