//! The effect model.
//!
//! An [`Effects`] value is the pure data a requirement accumulates: at most
//! one body constraint, one object schema per parameter location, an ordered
//! list of response variants and a map of auth schemes. It has no behavior of
//! its own — the dispatcher validates against it, the enhancers document it.
//!
//! Effects are monotonically additive: there is no removal operation. Two
//! models combine with [`Effects::merge`], which is the same law the fluent
//! builder applies call by call.

use http::StatusCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use warrant_schema::Schema;

/// Media type assumed when a body or response declares none.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A parameter location within a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// URL query string.
    Query,
    /// Path parameters.
    Path,
    /// HTTP headers.
    Header,
    /// Cookies.
    Cookie,
}

impl Location {
    /// Every location, in the fixed evaluation order the dispatcher uses.
    pub const ALL: [Location; 4] = [
        Location::Query,
        Location::Path,
        Location::Header,
        Location::Cookie,
    ];

    /// The request field issues are tagged with for this location.
    #[must_use]
    pub fn request_field(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "params",
            Self::Header => "headers",
            Self::Cookie => "cookies",
        }
    }

    /// The key this location uses in generated documents.
    #[must_use]
    pub fn document_key(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Path => "path",
            Self::Header => "header",
            Self::Cookie => "cookie",
        }
    }

    /// Whether parsed results are written back into the live request.
    ///
    /// Query strings and cookies routinely carry fields no requirement
    /// declares, so their parsed values merge back additively. Headers and
    /// path parameters are read-only once the router has matched.
    #[must_use]
    pub fn writes_back(self) -> bool {
        matches!(self, Self::Query | Self::Cookie)
    }
}

/// The body constraint of a requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyEffect {
    /// Schema the body must satisfy; its parse result replaces the body.
    pub schema: Schema,
    /// Declared media type, defaulting to JSON.
    pub content_type: Option<String>,
}

/// Extra configuration for a body constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyConfig {
    /// Media type to document instead of `application/json`.
    pub content_type: Option<String>,
}

impl BodyConfig {
    /// Configuration carrying a custom media type.
    #[must_use]
    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
        }
    }
}

/// One declared response variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEffect {
    /// Status code of the variant.
    pub status: StatusCode,
    /// Schema of the response body.
    pub schema: Schema,
    /// Declared media type, defaulting to JSON.
    pub content_type: Option<String>,
    /// Human-readable description for the document.
    pub description: Option<String>,
}

/// Extra configuration for a response variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseConfig {
    /// Media type to document instead of `application/json`.
    pub content_type: Option<String>,
    /// Response description.
    pub description: Option<String>,
}

impl ResponseConfig {
    /// Configuration carrying a custom media type.
    #[must_use]
    pub fn content_type(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            description: None,
        }
    }

    /// Configuration carrying a description.
    #[must_use]
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            content_type: None,
            description: Some(description.into()),
        }
    }

    /// Adds a media type to this configuration.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A security scheme attached to a requirement or a whole document.
///
/// Serializes to the standard `securitySchemes` component shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Scheme type (`http`, `apiKey`, ...).
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP auth scheme name (for `type: http`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Bearer token format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "bearerFormat")]
    pub bearer_format: Option<String>,
    /// API key location (for `type: apiKey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// API key name (for `type: apiKey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SecurityScheme {
    /// An HTTP bearer-token scheme.
    #[must_use]
    pub fn bearer(format: Option<String>) -> Self {
        Self {
            scheme_type: "http".to_owned(),
            description: None,
            scheme: Some("bearer".to_owned()),
            bearer_format: format,
            location: None,
            name: None,
        }
    }

    /// An HTTP basic-auth scheme.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            scheme_type: "http".to_owned(),
            description: None,
            scheme: Some("basic".to_owned()),
            bearer_format: None,
            location: None,
            name: None,
        }
    }

    /// An API key scheme reading from the given location (`header`, `query`
    /// or `cookie`) under the given parameter name.
    #[must_use]
    pub fn api_key(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scheme_type: "apiKey".to_owned(),
            description: None,
            scheme: None,
            bearer_format: None,
            location: Some(location.into()),
            name: Some(name.into()),
        }
    }

    /// Adds a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An auth effect: a named scheme plus the scopes this requirement demands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEffect {
    /// The scheme definition, emitted into document components.
    pub scheme: SecurityScheme,
    /// Required scopes, emitted into the operation's security entry.
    pub scopes: Vec<String>,
}

/// The accumulated constraints of one requirement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Body constraint; last write wins within a builder chain.
    pub body: Option<BodyEffect>,
    /// Object schema over query-string fields.
    pub query: Option<Schema>,
    /// Object schema over path parameters.
    pub path: Option<Schema>,
    /// Object schema over headers.
    pub header: Option<Schema>,
    /// Object schema over cookies.
    pub cookie: Option<Schema>,
    /// Declared response variants, in declaration order.
    pub response: Vec<ResponseEffect>,
    /// Auth schemes by name.
    pub auth: IndexMap<String, AuthEffect>,
}

impl Effects {
    /// True when nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_none()
            && self.query.is_none()
            && self.path.is_none()
            && self.header.is_none()
            && self.cookie.is_none()
            && self.response.is_empty()
            && self.auth.is_empty()
    }

    /// The object schema accumulated for a location, if any.
    #[must_use]
    pub fn location(&self, location: Location) -> Option<&Schema> {
        match location {
            Location::Query => self.query.as_ref(),
            Location::Path => self.path.as_ref(),
            Location::Header => self.header.as_ref(),
            Location::Cookie => self.cookie.as_ref(),
        }
    }

    /// Extends a location's object schema by one field.
    ///
    /// Starts from an empty object schema on first use; repeating a key
    /// overwrites that field only.
    pub fn extend_location(&mut self, location: Location, key: &str, schema: Schema) {
        let slot = match location {
            Location::Query => &mut self.query,
            Location::Path => &mut self.path,
            Location::Header => &mut self.header,
            Location::Cookie => &mut self.cookie,
        };
        let base = slot.take().unwrap_or_else(Schema::object);
        *slot = Some(base.extend(key, schema));
    }

    /// Combines two effect models, `later` taking precedence.
    ///
    /// Body is a right-biased override; location schemas union field-wise
    /// (right-biased on collision); responses concatenate preserving order;
    /// auth maps shallow-merge.
    #[must_use]
    pub fn merge(self, later: Effects) -> Effects {
        let merge_location = |earlier: Option<Schema>, later: Option<Schema>| match (earlier, later)
        {
            (Some(a), Some(b)) => Some(a.merge_fields(&b)),
            (a, b) => b.or(a),
        };

        let mut response = self.response;
        response.extend(later.response);

        let mut auth = self.auth;
        auth.extend(later.auth);

        Effects {
            body: later.body.or(self.body),
            query: merge_location(self.query, later.query),
            path: merge_location(self.path, later.path),
            header: merge_location(self.header, later.header),
            cookie: merge_location(self.cookie, later.cookie),
            response,
            auth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extend_location_accumulates_fields() {
        let mut effects = Effects::default();
        effects.extend_location(Location::Query, "id", Schema::uuid());
        effects.extend_location(Location::Query, "page", Schema::integer());
        let names = effects.query.as_ref().unwrap().field_names();
        assert_eq!(names, vec!["id".to_owned(), "page".to_owned()]);
    }

    #[test]
    fn test_merge_unions_location_fields_right_biased() {
        let mut a = Effects::default();
        a.extend_location(Location::Header, "shared", Schema::string());
        a.extend_location(Location::Header, "left", Schema::string());
        let mut b = Effects::default();
        b.extend_location(Location::Header, "shared", Schema::boolean());
        b.extend_location(Location::Header, "right", Schema::string());

        let merged = a.merge(b);
        let header = merged.header.unwrap();
        assert_eq!(header.field_names().len(), 3);
        assert_eq!(
            header.describe()["properties"]["shared"],
            json!({"type": "boolean"})
        );
    }

    #[test]
    fn test_merge_body_is_right_biased() {
        let a = Effects {
            body: Some(BodyEffect {
                schema: Schema::string(),
                content_type: None,
            }),
            ..Effects::default()
        };
        let b = Effects {
            body: Some(BodyEffect {
                schema: Schema::integer(),
                content_type: Some("text/plain".to_owned()),
            }),
            ..Effects::default()
        };
        let merged = a.clone().merge(b);
        assert_eq!(merged.body.unwrap().schema, Schema::integer());

        // Absent later body keeps the earlier one.
        let kept = a.merge(Effects::default());
        assert_eq!(kept.body.unwrap().schema, Schema::string());
    }

    #[test]
    fn test_merge_concatenates_responses_in_order() {
        let variant = |status: StatusCode| ResponseEffect {
            status,
            schema: Schema::string(),
            content_type: None,
            description: None,
        };
        let a = Effects {
            response: vec![variant(StatusCode::OK)],
            ..Effects::default()
        };
        let b = Effects {
            response: vec![variant(StatusCode::NOT_FOUND), variant(StatusCode::OK)],
            ..Effects::default()
        };
        let merged = a.merge(b);
        let statuses: Vec<u16> = merged.response.iter().map(|r| r.status.as_u16()).collect();
        assert_eq!(statuses, vec![200, 404, 200]);
    }

    #[test]
    fn test_merge_auth_shallow_merges() {
        let mut a = Effects::default();
        a.auth.insert(
            "bearer".to_owned(),
            AuthEffect {
                scheme: SecurityScheme::bearer(None),
                scopes: vec![],
            },
        );
        let mut b = Effects::default();
        b.auth.insert(
            "bearer".to_owned(),
            AuthEffect {
                scheme: SecurityScheme::bearer(Some("JWT".to_owned())),
                scopes: vec!["read".to_owned()],
            },
        );
        b.auth.insert(
            "key".to_owned(),
            AuthEffect {
                scheme: SecurityScheme::api_key("header", "x-api-key"),
                scopes: vec![],
            },
        );
        let merged = a.merge(b);
        assert_eq!(merged.auth.len(), 2);
        assert_eq!(merged.auth["bearer"].scopes, vec!["read".to_owned()]);
    }

    #[test]
    fn test_security_scheme_serialization() {
        let scheme = SecurityScheme::api_key("header", "x-api-key");
        let json = serde_json::to_value(&scheme).unwrap();
        assert_eq!(json, json!({"type": "apiKey", "in": "header", "name": "x-api-key"}));
    }
}
