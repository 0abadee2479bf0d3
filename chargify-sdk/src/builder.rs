//! The fluent request builder.

use std::sync::Arc;

use chargify_core::{Args, DomainTemplate, Path, RequestTranslator, Translation};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, ConfigError};
use crate::credentials::Credentials;
use crate::error::ChargifyError;
use crate::executor::HttpExecutor;
use crate::transport::Transport;

/// A Chargify client positioned at some path.
///
/// Every [`path`](Self::path) call returns a new client with one more
/// segment; the receiver is left as it was, so a partially built client can
/// be reused as a prefix:
///
/// ```no_run
/// # async fn run() -> Result<(), chargify_sdk::ChargifyError> {
/// use chargify_sdk::{Args, Chargify};
///
/// let chargify = Chargify::new("api-key", "acme");
/// let subscriptions = chargify.path("subscriptions");
///
/// let one = subscriptions.path("read").call(Args::new().arg("subscription_id", 42)).await?;
/// let all = subscriptions.call(Args::new().arg("page", 2)).await?;
/// # Ok(())
/// # }
/// ```
///
/// Credentials, translator and executor are shared through `Arc` by every
/// client derived from the same root.
#[derive(Debug, Clone)]
pub struct Chargify {
    credentials: Arc<Credentials>,
    path: Path,
    translator: Arc<RequestTranslator>,
    executor: Arc<HttpExecutor>,
}

impl Chargify {
    /// Create a client using the default `reqwest` transport.
    pub fn new(api_key: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self::with_executor(Credentials::new(api_key, subdomain), HttpExecutor::default())
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(
        api_key: impl Into<String>,
        subdomain: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self::with_executor(
            Credentials::new(api_key, subdomain),
            HttpExecutor::new(transport),
        )
    }

    pub fn with_executor(credentials: Credentials, executor: HttpExecutor) -> Self {
        Self {
            credentials: Arc::new(credentials),
            path: Path::new(),
            translator: Arc::new(RequestTranslator::default()),
            executor: Arc::new(executor),
        }
    }

    /// Create a client from a loaded [`ClientConfig`].
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        config.into_client()
    }

    /// Replace the translator, e.g. to use custom lookup tables.
    pub fn with_translator(mut self, translator: RequestTranslator) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Point the client at a different base URL, keeping the current
    /// lookup tables.
    pub fn with_domain(self, domain: DomainTemplate) -> Self {
        let translator = (*self.translator).clone().with_domain(domain);
        self.with_translator(translator)
    }

    /// Return a new client with `segment` appended to the path.
    pub fn path(&self, segment: impl Into<String>) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            path: self.path.join(segment),
            translator: Arc::clone(&self.translator),
            executor: Arc::clone(&self.executor),
        }
    }

    /// Append several segments in order.
    pub fn segments<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .fold(self.clone(), |client, segment| client.path(segment))
    }

    pub fn current_path(&self) -> &Path {
        &self.path
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Translate the current path and `args` without sending anything.
    pub fn translate(&self, args: Args) -> Translation {
        self.translator
            .translate(&self.path, self.credentials.subdomain(), args)
    }

    /// Send the request described by the current path and `args`.
    pub async fn call(&self, args: Args) -> Result<Value, ChargifyError> {
        let translation = self.translate(args);
        self.executor
            .execute(translation.request, &self.credentials)
            .await
    }

    /// Like [`call`](Self::call), decoding the response into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, args: Args) -> Result<T, ChargifyError> {
        let value = self.call(args).await?;
        serde_json::from_value(value).map_err(ChargifyError::Json)
    }
}
