//! Response normalization.
//!
//! The API signals business failures through an `error` field in the JSON
//! body rather than exclusively through the HTTP status, and real response
//! bodies have been observed carrying `error` alongside 2xx statuses. The
//! normalizer therefore decides success from the body, not the status.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde_json::Value;

use crate::error::{ApiResult, ParticleError};
use crate::request::RequestMessage;

/// A raw response as yielded by the transport collaborator.
#[derive(Debug)]
pub struct RawResponse {
    /// The HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body bytes
    pub body: Bytes,
}

/// Turn a raw transport response into a decoded success value or a
/// classified error.
///
/// - Unparseable body, non-2xx status: [`ParticleError::Http`].
/// - Unparseable body, 2xx status: [`ParticleError::Decode`].
/// - Parsed body with a truthy `error` field: [`ParticleError::Api`],
///   carrying the originating operation and URL.
/// - Otherwise the decoded value, regardless of status.
pub fn normalize(request: &RequestMessage, response: &RawResponse) -> ApiResult<Value> {
    let Ok(decoded) = serde_json::from_slice::<Value>(&response.body) else {
        if response.status.is_success() {
            return Err(ParticleError::Decode {
                body: response.body.clone(),
            });
        }
        return Err(ParticleError::Http {
            status: response.status.as_u16(),
            body: response.body.clone(),
        });
    };

    if let Some(error) = decoded.get("error").filter(|e| is_truthy(e)) {
        return Err(ParticleError::Api {
            operation: request.operation,
            url: request.url.clone(),
            message: error_message(&decoded, error),
        });
    }

    Ok(decoded)
}

/// PHP-style truthiness, which is what the upstream API's `error` field
/// semantics were defined against.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// Pick the most descriptive message: `error_description` when present,
/// otherwise the `error` value itself.
fn error_message(decoded: &Value, error: &Value) -> String {
    if let Some(description) = decoded.get("error_description").and_then(Value::as_str) {
        return description.to_string();
    }
    match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    fn request() -> RequestMessage {
        RequestMessage::new(
            "getDevice",
            Method::GET,
            "https://api.particle.io/v1/devices/dev1",
        )
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_error_field_wins_even_on_200() {
        let result = normalize(&request(), &response(200, r#"{"error":"bad device id"}"#));
        match result {
            Err(ParticleError::Api {
                operation,
                url,
                message,
            }) => {
                assert_eq!(operation, "getDevice");
                assert_eq!(url, "https://api.particle.io/v1/devices/dev1");
                assert_eq!(message, "bad device id");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_success_body_decodes() {
        let value = normalize(&request(), &response(200, r#"{"id":"abc","name":"x"}"#)).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["name"], "x");
    }

    #[test]
    fn test_success_is_body_driven_not_status_driven() {
        // Observed API behavior: decodable bodies without an error field
        // are success whatever the status says.
        let value = normalize(&request(), &response(500, r#"{"ok":true}"#)).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_falsy_error_field_is_success() {
        let value = normalize(&request(), &response(200, r#"{"error":null,"id":"abc"}"#)).unwrap();
        assert_eq!(value["id"], "abc");

        let value = normalize(&request(), &response(200, r#"{"error":false}"#)).unwrap();
        assert_eq!(value["error"], false);
    }

    #[test]
    fn test_error_description_preferred() {
        let body = r#"{"error":"invalid_grant","error_description":"User credentials are invalid"}"#;
        match normalize(&request(), &response(400, body)) {
            Err(ParticleError::Api { message, .. }) => {
                assert_eq!(message, "User credentials are invalid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_on_success_status() {
        assert!(matches!(
            normalize(&request(), &response(200, "not json")),
            Err(ParticleError::Decode { .. })
        ));
    }

    #[test]
    fn test_malformed_json_on_failure_status() {
        match normalize(&request(), &response(502, "<html>bad gateway</html>")) {
            Err(ParticleError::Http { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
