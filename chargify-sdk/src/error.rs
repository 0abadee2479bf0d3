use chargify_core::{ErrorKind, Method};
use serde_json::Value;

use crate::transport::{BoxError, TransportError};

/// Errors produced by a terminal call.
#[derive(Debug, thiserror::Error)]
pub enum ChargifyError {
    /// The request never got a response (DNS, refused connection, timeout).
    #[error("connection error: {0}")]
    Connection(#[source] BoxError),

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a status the taxonomy marks as an error.
    ///
    /// `body` is the parsed response, or `{"body": "<raw text>"}` when the
    /// response was not JSON.
    #[error("{kind}: status {status}, body: {body}")]
    Api {
        kind: ErrorKind,
        status: u16,
        body: Value,
    },

    /// The transport has no implementation for this method.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(Method),

    /// A header value could not be built from the configured strings.
    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// A payload could not be serialized or a response decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChargifyError {
    /// The taxonomy kind of this error, if it is one of the classified kinds.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ChargifyError::Connection(_) => Some(ErrorKind::Connection),
            ChargifyError::Api { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The response body attached to a status error.
    pub fn body(&self) -> Option<&Value> {
        match self {
            ChargifyError::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ChargifyError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for ChargifyError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection(source) => ChargifyError::Connection(source),
            TransportError::Request(source) => ChargifyError::Transport(source),
            TransportError::UnsupportedMethod(method) => ChargifyError::UnsupportedMethod(method),
        }
    }
}
