//! [`Transport`] backed by `reqwest`.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder};

use super::{Transport, TransportError, TransportResponse};

/// Default transport. Connection pooling, TLS and timeouts are whatever the
/// wrapped `reqwest::Client` is configured with.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    async fn send(
        &self,
        request: RequestBuilder,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError> {
        let mut request = request.headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let resp = request.send().await.map_err(classify)?;
        let status_code = resp.status().as_u16();
        let content = resp.bytes().await.map_err(classify)?;

        Ok(TransportResponse {
            status_code,
            content,
        })
    }
}

/// Errors raised before anything went on the wire, or while interpreting a
/// response, are request errors. Everything else means the exchange with
/// the server broke off: refused or reset connections, timeouts, and
/// responses cut short.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() || err.is_redirect() || err.is_decode() || err.is_status() {
        TransportError::Request(Box::new(err))
    } else {
        TransportError::Connection(Box::new(err))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        self.send(self.http.get(url), headers, None).await
    }

    async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError> {
        self.send(self.http.post(url), headers, body).await
    }

    async fn put(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError> {
        self.send(self.http.put(url), headers, body).await
    }

    async fn delete(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<TransportResponse, TransportError> {
        self.send(self.http.delete(url), headers, None).await
    }

    async fn patch(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<String>,
    ) -> Result<TransportResponse, TransportError> {
        self.send(self.http.patch(url), headers, body).await
    }
}
