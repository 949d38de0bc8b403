//! Immutable description of an HTTP request before sending.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Version};

use crate::error::{ApiResult, ParticleError};

/// An HTTP request built by the client, ready for a transport to send.
///
/// Once built, a message is never mutated in place: attaching a body or a
/// header produces a new message, so a half-built request can never be
/// observed by another holder of the value.
#[derive(Debug, Clone)]
pub struct RequestMessage {
    /// The logical API operation that produced this request, for error context
    pub operation: &'static str,
    /// The HTTP method
    pub method: Method,
    /// The fully-qualified URL, already query-decorated for GET/DELETE
    pub url: String,
    /// Request headers; names are case-insensitive, last write wins
    pub headers: HeaderMap,
    /// Optional request body
    pub body: Option<Bytes>,
    /// HTTP protocol version
    pub version: Version,
}

impl RequestMessage {
    /// Create a bodiless request message with no headers.
    #[must_use]
    pub fn new(operation: &'static str, method: Method, url: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            version: Version::HTTP_11,
        }
    }

    /// Return a new message with the given header set, replacing any
    /// existing header of the same name.
    pub fn with_header(mut self, name: &str, value: &str) -> ApiResult<Self> {
        let name = HeaderName::try_from(name)
            .map_err(|_| ParticleError::encoding(format!("invalid header name: {name:?}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ParticleError::encoding(format!("invalid header value for {name}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Return a new message carrying the given body and `Content-Type`.
    pub fn with_body(mut self, body: Bytes, content_type: &str) -> ApiResult<Self> {
        let value = HeaderValue::from_str(content_type)
            .map_err(|_| ParticleError::encoding("invalid content type".to_string()))?;
        self.headers.insert(CONTENT_TYPE, value);
        self.body = Some(body);
        Ok(self)
    }

    /// The value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header_replaces_case_insensitively() {
        let msg = RequestMessage::new("test", Method::GET, "https://api.particle.io/v1/devices")
            .with_header("X-Thing", "one")
            .unwrap()
            .with_header("x-thing", "two")
            .unwrap();

        assert_eq!(msg.header("X-THING"), Some("two"));
        assert_eq!(msg.headers.len(), 1);
    }

    #[test]
    fn test_with_body_sets_content_type() {
        let msg = RequestMessage::new("test", Method::POST, "https://api.particle.io/v1/devices")
            .with_body(Bytes::from_static(b"a=1"), "application/x-www-form-urlencoded")
            .unwrap();

        assert_eq!(
            msg.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(msg.body.as_deref(), Some(&b"a=1"[..]));
    }

    #[test]
    fn test_functional_update_leaves_source_intact() {
        let base = RequestMessage::new("test", Method::GET, "https://api.particle.io/v1");
        let derived = base.clone().with_header("Authorization", "Bearer T").unwrap();

        assert!(base.headers.is_empty());
        assert_eq!(derived.header("authorization"), Some("Bearer T"));
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let result = RequestMessage::new("test", Method::GET, "https://api.particle.io/v1")
            .with_header("X-Bad", "line\nbreak");
        assert!(matches!(result, Err(ParticleError::Encoding(_))));
    }
}
