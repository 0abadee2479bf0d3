//! Fluent client for the Chargify billing API.
//!
//! Requests are spelled as a chain of path segments followed by a terminal
//! call:
//!
//! ```no_run
//! # async fn run() -> Result<(), chargify_sdk::ChargifyError> {
//! use chargify_sdk::{Args, Chargify};
//! use serde_json::json;
//!
//! let chargify = Chargify::new("api-key", "acme");
//! let customer = chargify
//!     .path("customers")
//!     .path("create")
//!     .call(Args::new().data(json!({"customer": {"first_name": "Al"}})))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! Building a path never touches the network; only [`Chargify::call`] does.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

mod builder;
pub mod config;
mod credentials;
mod error;
pub mod executor;
pub mod transport;

pub use builder::Chargify;
pub use chargify_core::{
    Args, DomainTemplate, ErrorKind, ErrorTaxonomy, Method, Path, RequestDescriptor,
    RequestTranslator, Translation,
};
pub use config::{ClientConfig, ConfigError, ConfigLoader};
pub use credentials::Credentials;
pub use error::ChargifyError;
pub use executor::HttpExecutor;
pub use transport::{ReqwestTransport, Transport, TransportError, TransportResponse};
