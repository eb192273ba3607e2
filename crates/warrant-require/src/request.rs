//! The mutable request view the dispatcher validates.
//!
//! [`RequestParts`] is the in-memory projection of an inbound request that
//! warrant needs: the parsed body plus one string-keyed map per parameter
//! location. The host server builds it from whatever its own request type
//! exposes; helpers are provided for the two textual sources (query strings
//! and the `Cookie` header).
//!
//! Successful validation writes back into this view: the body is replaced by
//! its parsed form, query and cookie maps absorb coerced values additively.
//! Headers and path parameters are never written back.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::effect::Location;

/// Parsed pieces of an inbound request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    /// Parsed request body (JSON), `Null` when absent.
    pub body: Value,
    /// Query-string fields.
    pub query: IndexMap<String, Value>,
    /// Path parameters matched by the router.
    pub params: IndexMap<String, Value>,
    /// Headers, names lowercased.
    pub headers: IndexMap<String, Value>,
    /// Cookies.
    pub cookies: IndexMap<String, Value>,
}

impl RequestParts {
    /// An empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the parsed body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = body;
        self
    }

    /// Adds a query-string field.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a path parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds a header; the name is lowercased.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    /// Parses a raw query string (`a=1&b=two`) into the query map.
    ///
    /// Repeated keys collect into an array, matching common server behavior.
    #[must_use]
    pub fn with_query_string(mut self, raw: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(raw.trim_start_matches('?')).unwrap_or_default();
        for (key, value) in pairs {
            match self.query.get_mut(&key) {
                Some(Value::Array(existing)) => existing.push(Value::String(value)),
                Some(existing) => {
                    let first = existing.clone();
                    *existing = Value::Array(vec![first, Value::String(value)]);
                }
                None => {
                    self.query.insert(key, Value::String(value));
                }
            }
        }
        self
    }

    /// Parses a `Cookie` header value (`session=abc; theme=dark`).
    #[must_use]
    pub fn with_cookie_header(mut self, header_value: &str) -> Self {
        for cookie in header_value.split(';') {
            if let Some((name, value)) = cookie.trim().split_once('=') {
                self.cookies.insert(
                    name.trim().to_owned(),
                    Value::String(value.trim().trim_matches('"').to_owned()),
                );
            }
        }
        self
    }

    /// Reads a header by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(&name.to_lowercase())
    }

    /// The map backing a location.
    #[must_use]
    pub fn location_map(&self, location: Location) -> &IndexMap<String, Value> {
        match location {
            Location::Query => &self.query,
            Location::Path => &self.params,
            Location::Header => &self.headers,
            Location::Cookie => &self.cookies,
        }
    }

    /// Snapshots a location as a JSON object for validation.
    #[must_use]
    pub fn location_value(&self, location: Location) -> Value {
        let map = self.location_map(location);
        Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<Map<String, Value>>(),
        )
    }

    /// Merges parsed values back into a location's live map, additively.
    ///
    /// Only called for locations that write back; undeclared fields already
    /// present in the map survive untouched.
    pub fn absorb(&mut self, location: Location, parsed: Value) {
        let map = match location {
            Location::Query => &mut self.query,
            Location::Path => &mut self.params,
            Location::Header => &mut self.headers,
            Location::Cookie => &mut self.cookies,
        };
        if let Value::Object(fields) = parsed {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_parsing() {
        let parts = RequestParts::new().with_query_string("?id=abc&page=2");
        assert_eq!(parts.query["id"], json!("abc"));
        assert_eq!(parts.query["page"], json!("2"));
    }

    #[test]
    fn test_query_string_repeated_keys_collect() {
        let parts = RequestParts::new().with_query_string("tag=a&tag=b&tag=c");
        assert_eq!(parts.query["tag"], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_cookie_header_parsing() {
        let parts = RequestParts::new().with_cookie_header("session=abc123; theme=\"dark\"");
        assert_eq!(parts.cookies["session"], json!("abc123"));
        assert_eq!(parts.cookies["theme"], json!("dark"));
    }

    #[test]
    fn test_headers_are_lowercased() {
        let parts = RequestParts::new().with_header("X-Example", "value");
        assert_eq!(parts.header("x-example"), Some(&json!("value")));
        assert_eq!(parts.header("X-EXAMPLE"), Some(&json!("value")));
    }

    #[test]
    fn test_absorb_preserves_undeclared_fields() {
        let mut parts = RequestParts::new()
            .with_query("declared", "1")
            .with_query("undeclared", "kept");
        parts.absorb(Location::Query, json!({"declared": 1}));
        assert_eq!(parts.query["declared"], json!(1));
        assert_eq!(parts.query["undeclared"], json!("kept"));
    }

    #[test]
    fn test_location_value_snapshot() {
        let parts = RequestParts::new().with_param("id", "v1");
        assert_eq!(parts.location_value(Location::Path), json!({"id": "v1"}));
        assert_eq!(parts.location_value(Location::Query), json!({}));
    }
}
