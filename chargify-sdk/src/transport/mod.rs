//! The HTTP transport seam.
//!
//! The executor talks to the network only through [`Transport`], so tests
//! (or callers with special needs) can substitute their own implementation.
//! [`ReqwestTransport`] is the default.

mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;
use bytes::Bytes;
use chargify_core::Method;
use reqwest::header::HeaderMap;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status_code: u16,
    pub content: Bytes,
}

/// Failures below the HTTP status level.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// No response was received (name resolution, refused connection, …).
    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),

    #[error("request failed: {0}")]
    Request(#[source] BoxError),

    #[error("transport does not support {0} requests")]
    UnsupportedMethod(Method),
}

/// One operation per HTTP method. `patch` is optional.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<TransportResponse, TransportError>;

    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError>;

    async fn put(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError>;

    async fn delete(&self, url: &str, headers: HeaderMap)
    -> Result<TransportResponse, TransportError>;

    async fn patch(
        &self,
        _url: &str,
        _headers: HeaderMap,
        _body: Option<String>,
    ) -> Result<TransportResponse, TransportError> {
        Err(TransportError::UnsupportedMethod(Method::Patch))
    }
}
