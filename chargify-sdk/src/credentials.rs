use std::fmt;

/// API key and account sub-domain used for every request of a client.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    subdomain: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            subdomain: subdomain.into(),
        }
    }

    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// `Authorization` header value: the API key as user name with the
    /// fixed password `x`.
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:x", self.api_key);
        format!("Basic {}", fast32::base64::RFC4648.encode(raw.as_bytes()))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .finish()
    }
}
