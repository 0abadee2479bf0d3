//! Request construction for the Chargify REST API.
//!
//! This crate holds everything that happens before and after the network:
//! accumulating a [`Path`], translating it together with call-time [`Args`]
//! into a [`RequestDescriptor`], and classifying response status codes. It
//! performs no I/O; the HTTP side lives in `chargify-sdk`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod args;
pub mod method;
pub mod path;
pub mod tables;
pub mod taxonomy;
pub mod translator;

pub use args::Args;
pub use method::Method;
pub use path::Path;
pub use tables::{Identifier, IdentifierTable, TableError, VerbTable};
pub use taxonomy::{ErrorKind, ErrorTaxonomy};
pub use translator::{DomainTemplate, RequestDescriptor, RequestTranslator, Translation};
