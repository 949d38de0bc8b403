//! Transport abstraction for pluggable backends.
//!
//! The core builds [`RequestMessage`] values and never performs I/O; a
//! [`Connector`] accepts a message and yields the raw response. Timeouts,
//! TLS, pooling, and any retry policy live behind this seam.

use std::future::Future;

use crate::error::TransportError;
use crate::request::RequestMessage;
use crate::response::RawResponse;

/// Capability to send a built request and return the raw response.
///
/// Uses Rust edition 2024's native `impl Future` in traits (RPITIT) —
/// no `async-trait` macro required.
pub trait Connector: Send + Sync {
    /// Send an HTTP request and return the raw response.
    ///
    /// A transport-level failure (no response received at all) is reported
    /// as [`TransportError`]; HTTP responses with failure statuses are
    /// still `Ok` here and classified later by the normalizer.
    fn send(
        &self,
        request: RequestMessage,
    ) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{HeaderMap, Method, StatusCode};

    struct EchoConnector;

    impl Connector for EchoConnector {
        async fn send(&self, request: RequestMessage) -> Result<RawResponse, TransportError> {
            Ok(RawResponse {
                status: StatusCode::OK,
                headers: HeaderMap::new(),
                body: Bytes::from(format!(r#"{{"url":"{}"}}"#, request.url)),
            })
        }
    }

    #[test]
    fn test_connector_trait_is_implementable() {
        let connector = EchoConnector;
        let request =
            RequestMessage::new("test", Method::GET, "https://api.particle.io/v1/devices");

        let response = tokio_test::block_on(connector.send(request)).unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert!(String::from_utf8_lossy(&response.body).contains("/v1/devices"));
    }
}
