//! Request construction and authentication for the Particle IoT cloud API
//!
//! This crate builds correctly-authenticated HTTP requests for the
//! Particle device-management REST API — device control, firmware upload,
//! access-token management, webhooks, and organizations — and normalizes
//! raw responses into decoded values or classified errors.
//!
//! The crate performs no I/O. Each operation returns an immutable
//! [`RequestMessage`]; a [`Connector`](transport::Connector)
//! implementation (such as the one in `particle-reqwest-connector`) sends
//! it and hands the raw response back to [`response::normalize`].
//!
//! # Example
//!
//! ```rust
//! use particle_api_client::{ParticleClient, ParticleConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ParticleClient::new(
//!     ParticleConfig::default().with_access_token("my-token"),
//! );
//!
//! // Build a request; nothing is sent here.
//! let request = client.devices().get_variable("dev1", "temperature", true)?;
//! assert_eq!(
//!     request.url,
//!     "https://api.particle.io/v1/devices/dev1/temperature?format=raw"
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod operations;
pub mod params;
pub mod request;
pub mod response;
pub mod transport;
pub mod url;

pub use client::ParticleClient;
pub use config::ParticleConfig;
pub use error::{ApiResult, CredentialKind, ParticleError, TransportError};
pub use request::RequestMessage;
pub use response::RawResponse;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::auth::AuthScheme;
    pub use crate::client::ParticleClient;
    pub use crate::config::ParticleConfig;
    pub use crate::error::{ApiResult, ParticleError};
    pub use crate::operations::{DevicesApi, OrgsApi, TokensApi, WebhooksApi};
    pub use crate::params::{FilePart, FirmwareSource, ParamValue, Params};
    pub use crate::request::RequestMessage;
    pub use crate::response::{normalize, RawResponse};
    pub use crate::transport::Connector;
}
