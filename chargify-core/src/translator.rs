//! Translation of an accumulated path and call-time arguments into a
//! concrete HTTP request.
//!
//! The steps run in a fixed order:
//!
//! 1. A trailing verb segment (`create`, `read`, ...) is stripped and picks
//!    the HTTP method; without one the method is `GET`.
//! 2. Identifier arguments (`customer_id`, ...) are removed from the
//!    arguments and their values inserted after the first occurrence of
//!    their anchor segment.
//! 3. `data` becomes the JSON body.
//! 4. For `GET`, `get_params` and any leftover arguments become the query
//!    string.
//! 5. The URL is assembled as `{domain}{segments joined by /}.json{?query}`.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;
use url::form_urlencoded;

use crate::args::{Args, DATA, GET_PARAMS, is_blank, stringify};
use crate::method::Method;
use crate::path::Path;
use crate::tables::{IdentifierTable, VerbTable};

const SUBDOMAIN_PLACEHOLDER: &str = "{subdomain}";

/// Base URL with a `{subdomain}` placeholder for the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTemplate {
    template: String,
}

impl DomainTemplate {
    /// Validate `template` as a URL and make sure it ends with `/`.
    ///
    /// The placeholder is optional, which allows pointing the client at a
    /// fixed host.
    pub fn parse(template: impl Into<String>) -> Result<Self, url::ParseError> {
        let mut template = template.into();
        if !template.ends_with('/') {
            template.push('/');
        }
        Url::parse(&template.replace(SUBDOMAIN_PLACEHOLDER, "account"))?;
        Ok(Self { template })
    }

    pub fn chargify() -> Self {
        Self {
            template: format!("https://{SUBDOMAIN_PLACEHOLDER}.chargify.com/"),
        }
    }

    pub fn render(&self, subdomain: &str) -> String {
        self.template.replace(SUBDOMAIN_PLACEHOLDER, subdomain)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for DomainTemplate {
    fn default() -> Self {
        Self::chargify()
    }
}

/// A request ready to be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub method: Method,
    /// JSON-serialized payload, if any.
    pub body: Option<String>,
}

/// Result of translating one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub request: RequestDescriptor,
    /// Identifier arguments that were given a value but whose anchor segment
    /// was not in the path. Their values appear nowhere in the request.
    pub unmatched_identifiers: Vec<&'static str>,
    /// Arguments that had no place in the request, such as leftovers of a
    /// non-`GET` call or `data` on a method that sends no body.
    pub ignored_arguments: Vec<String>,
}

/// Turns paths and arguments into [`RequestDescriptor`]s using fixed tables.
#[derive(Debug, Clone, Default)]
pub struct RequestTranslator {
    identifiers: IdentifierTable,
    verbs: VerbTable,
    domain: DomainTemplate,
}

impl RequestTranslator {
    pub fn new(identifiers: IdentifierTable, verbs: VerbTable, domain: DomainTemplate) -> Self {
        Self {
            identifiers,
            verbs,
            domain,
        }
    }

    /// Replace the domain, keeping the lookup tables.
    pub fn with_domain(mut self, domain: DomainTemplate) -> Self {
        self.domain = domain;
        self
    }

    pub fn domain(&self) -> &DomainTemplate {
        &self.domain
    }

    pub fn translate(&self, path: &Path, subdomain: &str, args: Args) -> Translation {
        let mut segments = path.to_vec();

        let method = match segments.last().and_then(|last| self.verbs.lookup(last)) {
            Some(method) => {
                segments.pop();
                method
            }
            None => Method::Get,
        };

        let mut args = args.into_inner();

        let mut unmatched_identifiers = Vec::new();
        for identifier in self.identifiers.iter() {
            let Some(value) = args.remove(identifier.argument) else {
                continue;
            };
            if is_blank(&value) {
                continue;
            }
            match segments.iter().position(|s| s == identifier.anchor) {
                Some(index) => {
                    let segment = urlencoding::encode(&stringify(&value)).into_owned();
                    segments.insert(index + 1, segment);
                }
                None => {
                    warn!(
                        argument = identifier.argument,
                        anchor = identifier.anchor,
                        "identifier argument dropped: anchor segment not in path"
                    );
                    unmatched_identifiers.push(identifier.argument);
                }
            }
        }

        let mut ignored_arguments = Vec::new();

        let data = args.remove(DATA).filter(|data| !is_blank(data));
        let body = match data {
            Some(data) if method.carries_body() => Some(data.to_string()),
            Some(_) => {
                ignored_arguments.push(DATA.to_owned());
                None
            }
            None => None,
        };

        let get_params = args.remove(GET_PARAMS);

        let query = if method == Method::Get {
            build_query(get_params, args, &mut ignored_arguments)
        } else {
            if get_params.as_ref().is_some_and(|p| !is_blank(p)) {
                ignored_arguments.push(GET_PARAMS.to_owned());
            }
            ignored_arguments.extend(args.into_keys());
            None
        };
        if !ignored_arguments.is_empty() {
            debug!(%method, arguments = ?ignored_arguments, "arguments ignored");
        }

        let mut url = self.domain.render(subdomain);
        url.push_str(&segments.join("/"));
        url.push_str(".json");
        if let Some(query) = query {
            url.push('?');
            url.push_str(&query);
        }

        Translation {
            request: RequestDescriptor { url, method, body },
            unmatched_identifiers,
            ignored_arguments,
        }
    }
}

/// Merge leftover arguments over `get_params` and form-encode the result.
///
/// Array values expand into one `key=value` pair per element.
fn build_query(
    get_params: Option<Value>,
    args: BTreeMap<String, Value>,
    ignored: &mut Vec<String>,
) -> Option<String> {
    let mut params: BTreeMap<String, Value> = match get_params {
        Some(Value::Object(map)) => map.into_iter().collect(),
        Some(other) if !is_blank(&other) => {
            ignored.push(GET_PARAMS.to_owned());
            BTreeMap::new()
        }
        _ => BTreeMap::new(),
    };
    params.extend(args);

    if params.is_empty() {
        return None;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &params {
        match value {
            Value::Array(items) => {
                for item in items {
                    serializer.append_pair(key, &stringify(item));
                }
            }
            other => {
                serializer.append_pair(key, &stringify(other));
            }
        }
    }
    Some(serializer.finish())
}
