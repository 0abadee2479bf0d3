//! Named call-time arguments.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Argument carrying the request payload.
pub const DATA: &str = "data";

/// Argument carrying explicit query-string parameters.
pub const GET_PARAMS: &str = "get_params";

/// Named arguments passed to a terminal call.
///
/// Keys are kept sorted, so the query string produced from them does not
/// depend on the order the caller inserted them in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: BTreeMap<String, Value>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a named argument, replacing any earlier value under that name.
    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Set the `data` payload.
    pub fn data(self, value: impl Into<Value>) -> Self {
        self.arg(DATA, value)
    }

    /// Serialize `payload` and set it as the `data` argument.
    pub fn serialize_data<T: Serialize>(self, payload: &T) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(payload)?;
        Ok(self.data(value))
    }

    /// Add one entry to the `get_params` mapping.
    pub fn get_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let entry = self
            .values
            .entry(GET_PARAMS.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(params) = entry {
            params.insert(name.into(), value.into());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub(crate) fn into_inner(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Whether an argument value counts as absent.
///
/// `null`, `false`, zero, the empty string and empty collections are all
/// treated as "not provided".
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Render a value the way it appears in a URL path or query string.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
