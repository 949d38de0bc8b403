//! Operation groups, one module per API surface.
//!
//! Every method builds a ready-to-send [`RequestMessage`]; nothing here
//! touches the network.
//!
//! | Module | API surface |
//! |--------|-------------|
//! | `devices` | device listing, control, claiming, firmware |
//! | `tokens` | access-token listing, issuance, revocation |
//! | `webhooks` | webhook listing, creation, deletion |
//! | `orgs` | organizations, products, customers |
//!
//! [`RequestMessage`]: crate::request::RequestMessage

pub mod devices;
pub mod orgs;
pub mod tokens;
pub mod webhooks;

pub use devices::DevicesApi;
pub use orgs::OrgsApi;
pub use tokens::TokensApi;
pub use webhooks::WebhooksApi;
