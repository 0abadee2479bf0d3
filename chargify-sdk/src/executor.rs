//! Request execution and response classification.
//!
//! The executor is the only place a call can fail after translation: it
//! sends the request through the configured [`Transport`], parses whatever
//! came back, and turns error statuses into [`ChargifyError::Api`].

use std::fmt;
use std::sync::Arc;

use chargify_core::{ErrorTaxonomy, Method, RequestDescriptor};
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT,
};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::ChargifyError;
use crate::transport::{ReqwestTransport, Transport};

/// Default `User-Agent` header value.
pub const DEFAULT_USER_AGENT: &str = concat!("chargify-rs/", env!("CARGO_PKG_VERSION"));

/// Sends translated requests and classifies the responses.
///
/// Holds no per-request state, so one executor can serve any number of
/// concurrent calls.
#[derive(Clone)]
pub struct HttpExecutor {
    transport: Arc<dyn Transport>,
    taxonomy: ErrorTaxonomy,
    user_agent: String,
}

impl HttpExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            taxonomy: ErrorTaxonomy::chargify(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_taxonomy(mut self, taxonomy: ErrorTaxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    fn headers(
        &self,
        credentials: &Credentials,
        has_body: bool,
    ) -> Result<HeaderMap, ChargifyError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&credentials.basic_auth())?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(USER_AGENT, HeaderValue::from_str(&self.user_agent)?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !has_body {
            headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        }
        Ok(headers)
    }

    /// Send `request` and return the parsed body of a successful response.
    pub async fn execute(
        &self,
        request: RequestDescriptor,
        credentials: &Credentials,
    ) -> Result<Value, ChargifyError> {
        let RequestDescriptor { url, method, body } = request;
        let body = body.filter(|_| method.carries_body());
        let headers = self.headers(credentials, body.is_some())?;

        debug!(%method, %url, "sending request");
        let response = match method {
            Method::Get => self.transport.get(&url, headers).await,
            Method::Post => self.transport.post(&url, headers, body).await,
            Method::Put => self.transport.put(&url, headers, body).await,
            Method::Delete => self.transport.delete(&url, headers).await,
            Method::Patch => self.transport.patch(&url, headers, body).await,
        }?;
        debug!(%method, %url, status = response.status_code, "response received");

        let parsed = parse_body(&response.content);
        match self.taxonomy.classify(response.status_code) {
            Some(kind) => Err(ChargifyError::Api {
                kind,
                status: response.status_code,
                body: parsed,
            }),
            None => Ok(parsed),
        }
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::new()))
    }
}

impl fmt::Debug for HttpExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpExecutor")
            .field("taxonomy", &self.taxonomy)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Parse a response body as JSON, wrapping non-JSON text as
/// `{"body": "<raw text>"}`.
pub fn parse_body(content: &[u8]) -> Value {
    match serde_json::from_slice(content) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, len = content.len(), "response body is not JSON");
            json!({ "body": String::from_utf8_lossy(content) })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::{StubTransport, UnreachableTransport};
    use chargify_core::ErrorKind;

    fn get(url: &str) -> RequestDescriptor {
        RequestDescriptor {
            url: url.to_owned(),
            method: Method::Get,
            body: None,
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("key", "acme")
    }

    #[test]
    fn test_parse_body_fallback() {
        assert_eq!(parse_body(br#"{"a":1}"#), json!({"a": 1}));
        assert_eq!(
            parse_body(b"<html>Bad Gateway</html>"),
            json!({"body": "<html>Bad Gateway</html>"})
        );
        assert_eq!(parse_body(b""), json!({"body": ""}));
    }

    #[tokio::test]
    async fn test_headers_without_body() {
        let stub = Arc::new(StubTransport::new(200, "{}"));
        let executor = HttpExecutor::new(stub.clone());

        executor
            .execute(get("https://acme.chargify.com/customers.json"), &credentials())
            .await
            .unwrap();

        let call = stub.last_call();
        assert_eq!(call.method, Method::Get);
        assert_eq!(call.headers[AUTHORIZATION], "Basic a2V5Ong=");
        assert_eq!(call.headers[ACCEPT], "application/json");
        assert_eq!(call.headers[CONTENT_TYPE], "application/json");
        assert_eq!(call.headers[CONTENT_LENGTH], "0");
        assert_eq!(call.headers[USER_AGENT], DEFAULT_USER_AGENT);
    }

    #[tokio::test]
    async fn test_body_on_bodiless_method_is_dropped() {
        let stub = Arc::new(StubTransport::new(200, "{}"));
        let executor = HttpExecutor::new(stub.clone());

        for method in [Method::Get, Method::Delete] {
            let request = RequestDescriptor {
                url: "https://acme.chargify.com/customers/7.json".to_owned(),
                method,
                body: Some(r#"{"reason":"gone"}"#.to_owned()),
            };
            executor.execute(request, &credentials()).await.unwrap();

            let call = stub.last_call();
            assert_eq!(call.method, method);
            assert_eq!(call.body, None);
            assert_eq!(call.headers[CONTENT_LENGTH], "0");
        }
    }

    #[tokio::test]
    async fn test_post_forwards_body() {
        let stub = Arc::new(StubTransport::new(201, r#"{"customer":{"id":1}}"#));
        let executor = HttpExecutor::new(stub.clone()).with_user_agent("billing-app/2.0");

        let request = RequestDescriptor {
            url: "https://acme.chargify.com/customers.json".to_owned(),
            method: Method::Post,
            body: Some(r#"{"first_name":"Al"}"#.to_owned()),
        };
        let result = executor.execute(request, &credentials()).await.unwrap();
        assert_eq!(result, json!({"customer": {"id": 1}}));

        let call = stub.last_call();
        assert_eq!(call.method, Method::Post);
        assert_eq!(call.body.as_deref(), Some(r#"{"first_name":"Al"}"#));
        assert!(call.headers.get(CONTENT_LENGTH).is_none());
        assert_eq!(call.headers[USER_AGENT], "billing-app/2.0");
    }

    #[tokio::test]
    async fn test_unprocessable_entity_carries_body() {
        let stub = Arc::new(StubTransport::new(422, r#"{"errors": ["foo"]}"#));
        let executor = HttpExecutor::new(stub);

        let err = executor
            .execute(get("https://acme.chargify.com/customers.json"), &credentials())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ErrorKind::UnprocessableEntity));
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.body(), Some(&json!({"errors": ["foo"]})));
    }

    #[tokio::test]
    async fn test_status_classification() {
        let cases = [
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Forbidden),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Duplicate),
            (500, ErrorKind::Server),
            (503, ErrorKind::Server),
        ];
        for (status, expected) in cases {
            let executor = HttpExecutor::new(Arc::new(StubTransport::new(status, "{}")));
            let err = executor
                .execute(get("https://acme.chargify.com/x.json"), &credentials())
                .await
                .unwrap_err();
            assert_eq!(err.kind(), Some(expected), "status {status}");
        }
    }

    #[tokio::test]
    async fn test_non_json_error_page_is_wrapped() {
        let executor = HttpExecutor::new(Arc::new(StubTransport::new(500, "Internal Error")));
        let err = executor
            .execute(get("https://acme.chargify.com/x.json"), &credentials())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Server));
        assert_eq!(err.body(), Some(&json!({"body": "Internal Error"})));
    }

    #[tokio::test]
    async fn test_non_json_success_is_wrapped() {
        let executor = HttpExecutor::new(Arc::new(StubTransport::new(200, "OK")));
        let result = executor
            .execute(get("https://acme.chargify.com/x.json"), &credentials())
            .await
            .unwrap();
        assert_eq!(result, json!({"body": "OK"}));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let executor = HttpExecutor::new(Arc::new(UnreachableTransport));
        let err = executor
            .execute(get("https://acme.chargify.com/x.json"), &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ChargifyError::Connection(_)));
        assert_eq!(err.kind(), Some(ErrorKind::Connection));
    }

    #[tokio::test]
    async fn test_patch_unsupported_by_transport() {
        let executor = HttpExecutor::new(Arc::new(StubTransport::new(200, "{}")));
        let request = RequestDescriptor {
            url: "https://acme.chargify.com/x.json".to_owned(),
            method: Method::Patch,
            body: None,
        };
        let err = executor.execute(request, &credentials()).await.unwrap_err();
        assert!(matches!(err, ChargifyError::UnsupportedMethod(Method::Patch)));
    }

    #[tokio::test]
    async fn test_invalid_user_agent() {
        let executor =
            HttpExecutor::new(Arc::new(StubTransport::new(200, "{}"))).with_user_agent("bad\nagent");
        let err = executor
            .execute(get("https://acme.chargify.com/x.json"), &credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ChargifyError::Header(_)));
    }
}
