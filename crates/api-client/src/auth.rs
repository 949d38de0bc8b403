//! Authentication strategies.
//!
//! Exactly one scheme applies per request; the mapping from operation to
//! scheme is fixed in the operation table, not chosen by the caller.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ParticleConfig;
use crate::error::{ApiResult, CredentialKind, ParticleError};
use crate::request::RequestMessage;

/// Fixed OAuth client credentials required by the token-issuance endpoint.
/// Never real account credentials.
const DUMMY_CLIENT_CREDENTIALS: &str = "particle:particle";

/// The authentication scheme for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// No `Authorization` header
    None,
    /// `Bearer <access token>`
    Bearer,
    /// `Basic base64(username:password)` from the account credentials
    Basic,
    /// `Basic base64("particle:particle")`, the OAuth client placeholder
    /// used when issuing new access tokens
    BasicDummy,
}

/// Return a new request with the scheme's `Authorization` header set, or
/// the request unchanged for [`AuthScheme::None`].
///
/// Fails fast with [`ParticleError::MissingCredential`] when the scheme
/// needs a credential the configuration does not hold, so an unsendable
/// request is never produced silently.
pub fn apply(
    request: RequestMessage,
    config: &ParticleConfig,
    scheme: AuthScheme,
) -> ApiResult<RequestMessage> {
    match scheme {
        AuthScheme::None => Ok(request),
        AuthScheme::Bearer => {
            let token = config
                .access_token
                .as_deref()
                .filter(|t| !t.is_empty())
                .ok_or(ParticleError::MissingCredential(CredentialKind::AccessToken))?;
            request.with_header("Authorization", &format!("Bearer {token}"))
        }
        AuthScheme::Basic => {
            let (username, password) = match (&config.username, &config.password) {
                (Some(u), Some(p)) => (u, p),
                _ => return Err(ParticleError::MissingCredential(CredentialKind::Account)),
            };
            let encoded = STANDARD.encode(format!("{username}:{password}"));
            request.with_header("Authorization", &format!("Basic {encoded}"))
        }
        AuthScheme::BasicDummy => {
            let encoded = STANDARD.encode(DUMMY_CLIENT_CREDENTIALS);
            request.with_header("Authorization", &format!("Basic {encoded}"))
        }
    }
}
