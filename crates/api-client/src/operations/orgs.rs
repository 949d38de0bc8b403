//! Organization operations
//!
//! Organizations group team members, products, and the customers of those
//! products. Customer creation authenticates with the account credentials;
//! everything else uses Bearer.

use http::Method;

use crate::auth::AuthScheme;
use crate::client::{BodyFormat, ParticleClient};
use crate::error::ApiResult;
use crate::params::Params;
use crate::request::RequestMessage;

/// Organization API interface
#[derive(Clone)]
pub struct OrgsApi {
    client: ParticleClient,
}

impl OrgsApi {
    /// Create a new organizations API interface
    pub(crate) fn new(client: ParticleClient) -> Self {
        Self { client }
    }

    /// List organizations the authenticated user has access to.
    ///
    /// GET /v1/orgs
    pub fn list(&self) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "listOrganizations",
            Method::GET,
            &["orgs"],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Get details for one organization.
    ///
    /// GET /v1/orgs/{slug}
    pub fn get(&self, org_slug: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "getOrganization",
            Method::GET,
            &["orgs", org_slug],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Remove a team member from an organization. `username` is normally
    /// an email address.
    ///
    /// DELETE /v1/orgs/{slug}/users/{username}
    pub fn remove_member(&self, org_slug: &str, username: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "removeMember",
            Method::DELETE,
            &["orgs", org_slug, "users", username],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Get one of the organization's products.
    ///
    /// GET /v1/orgs/{slug}/products/{product}
    pub fn get_product(&self, org_slug: &str, product_slug: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "getProduct",
            Method::GET,
            &["orgs", org_slug, "products", product_slug],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Generate a device claim code for a product. The activation code is
    /// only required while the product is in private beta.
    ///
    /// POST /v1/orgs/{slug}/products/{product}/device_claims
    pub fn create_product_claim_code(
        &self,
        org_slug: &str,
        product_slug: &str,
        activation_code: Option<&str>,
    ) -> ApiResult<RequestMessage> {
        let mut params = Params::new();
        if let Some(code) = activation_code {
            params.insert("activation_code", code);
        }

        self.client.build_request(
            "createProductClaimCode",
            Method::POST,
            &["orgs", org_slug, "products", product_slug, "device_claims"],
            params,
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Remove a device from an organization product.
    ///
    /// DELETE /v1/orgs/{slug}/products/{product}/devices/{id}
    pub fn remove_product_device(
        &self,
        org_slug: &str,
        product_slug: &str,
        device_id: &str,
    ) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "removeProductDevice",
            Method::DELETE,
            &["orgs", org_slug, "products", product_slug, "devices", device_id],
            Params::new(),
            AuthScheme::Bearer,
            BodyFormat::UrlForm,
        )
    }

    /// Create a customer for an organization.
    ///
    /// POST /v1/orgs/{slug}/customers
    pub fn create_customer(&self, org_slug: &str) -> ApiResult<RequestMessage> {
        self.client.build_request(
            "createCustomer",
            Method::POST,
            &["orgs", org_slug, "customers"],
            Params::new(),
            AuthScheme::Basic,
            BodyFormat::UrlForm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ParticleClient {
        ParticleClient::default()
            .with_access_token("T")
            .with_credentials("me@example.com", "hunter2")
    }

    #[test]
    fn test_list_orgs() {
        let request = client().orgs().list().unwrap();
        assert_eq!(request.url, "https://api.particle.io/v1/orgs");
    }

    #[test]
    fn test_remove_member_path() {
        let request = client()
            .orgs()
            .remove_member("acme", "jo@example.com")
            .unwrap();
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(
            request.url,
            "https://api.particle.io/v1/orgs/acme/users/jo%40example.com"
        );
    }

    #[test]
    fn test_product_claim_code_without_activation() {
        let request = client()
            .orgs()
            .create_product_claim_code("acme", "widget", None)
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.particle.io/v1/orgs/acme/products/widget/device_claims"
        );
        assert_eq!(request.body.as_deref(), Some(&b""[..]));
    }

    #[test]
    fn test_product_claim_code_with_activation() {
        let request = client()
            .orgs()
            .create_product_claim_code("acme", "widget", Some("beta-99"))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(&b"activation_code=beta-99"[..]));
    }

    #[test]
    fn test_remove_product_device_path() {
        let request = client()
            .orgs()
            .remove_product_device("acme", "widget", "dev1")
            .unwrap();
        assert_eq!(
            request.url,
            "https://api.particle.io/v1/orgs/acme/products/widget/devices/dev1"
        );
    }

    #[test]
    fn test_create_customer_uses_basic_auth() {
        let request = client().orgs().create_customer("acme").unwrap();
        let auth = request.header("authorization").unwrap();
        assert!(auth.starts_with("Basic "));
        assert_ne!(auth, "Bearer T");
    }
}
