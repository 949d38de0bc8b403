//! Webhook operations
//!
//! Webhooks forward device events to an external URL. All operations use
//! Bearer authentication.

use http::Method;

use crate::auth::AuthScheme;
use crate::client::{BodyFormat, ParticleClient};
use crate::error::ApiResult;
use crate::params::Params;
use crate::request::RequestMessage;

/// Webhook API interface
#[derive(Clone)]
pub struct WebhooksApi {
    client: ParticleClient,
}

impl WebhooksApi {
    /// Create a new webhooks API interface
    pub(crate) fn new(client: ParticleClient) -> Self {
        Self { client }
    }

    /// List the account's webhooks.
    ///
    /// GET /v1/webhooks
    pub fn list(&self) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "listWebhooks",
            Method::GET,
            &["webhooks"],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Create a webhook firing on `event`, delivering to `url`. `extras`
    /// are merged in as additional form fields (response templates,
    /// headers, and the other webhook options the API documents).
    ///
    /// POST /v1/webhooks
    pub fn create(
        &self,
        event: &str,
        url: &str,
        extras: impl IntoIterator<Item = (String, String)>,
    ) -> ApiResult<RequestMessage> {
        let mut params = Params::new().with("event", event).with("url", url);
        for (name, value) in extras {
            params.insert(name, value);
        }

        self.client.build_request(
            "newWebhook",
            Method::POST,
            &["webhooks"],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Delete a webhook.
    ///
    /// DELETE /v1/webhooks/{id}
    pub fn delete(&self, webhook_id: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "deleteWebhook",
            Method::DELETE,
            &["webhooks", webhook_id],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ParticleClient {
        ParticleClient::default().with_access_token("T")
    }

    #[test]
    fn test_list_webhooks() {
        let request = client().webhooks().list().unwrap();
        assert_eq!(request.url, "https://api.particle.io/v1/webhooks");
        assert_eq!(request.method, Method::GET);
    }

    #[test]
    fn test_create_webhook() {
        let request = client()
            .webhooks()
            .create("temp_reading", "https://example.com/hook", [])
            .unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(
            request.body.as_deref(),
            Some(&b"event=temp_reading&url=https%3A%2F%2Fexample.com%2Fhook"[..])
        );
    }

    #[test]
    fn test_create_webhook_with_extras() {
        let request = client()
            .webhooks()
            .create(
                "temp_reading",
                "https://example.com/hook",
                [("mydevices".to_string(), "true".to_string())],
            )
            .unwrap();

        let body = String::from_utf8_lossy(request.body.as_deref().unwrap()).into_owned();
        assert!(body.ends_with("&mydevices=true"));
    }

    #[test]
    fn test_delete_webhook() {
        let request = client().webhooks().delete("hook1").unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.url, "https://api.particle.io/v1/webhooks/hook1");
    }
}
