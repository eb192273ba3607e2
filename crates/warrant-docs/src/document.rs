//! The document facade.
//!
//! [`document`] binds a layer tree to top-level metadata and emits the final
//! specification. Every [`ApiDocument::spec`] call re-walks the layers and
//! re-folds the requirements — nothing is cached, so the output always
//! reflects the tree it was given and repeated calls are structurally
//! identical.
//!
//! Rendering performs two finishing passes over the folded fragments:
//! `:name` path segments become `{name}` templates, and each operation's
//! accumulated `requestParams` schemas are flattened into the standard
//! `parameters` array.

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use serde_json::{json, Map, Value};
use warrant_require::SecurityScheme;
use warrant_schema::Fragment;

use crate::error::DocsResult;
use crate::extract::extract_all;
use crate::generate::{bad_request_components, generate_components, generate_paths};
use crate::layer::Layer;
use crate::openapi::Info;

/// A document-level security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Configuration for a new document.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Version string of the specification standard (default `3.1.0`).
    pub openapi_version: String,
    /// The document's `info` metadata.
    pub info: Info,
}

impl DocumentConfig {
    /// Configuration with a title and version, on the default standard.
    #[must_use]
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi_version: "3.1.0".to_owned(),
            info: Info::new(title, version),
        }
    }

    /// Overrides the specification standard version.
    #[must_use]
    pub fn openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi_version = version.into();
        self
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            openapi_version: "3.1.0".to_owned(),
            info: Info::default(),
        }
    }
}

/// The final, write-once specification object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specification {
    /// Specification standard version.
    pub openapi: String,
    /// Document metadata.
    pub info: Info,
    /// Document-level security requirements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    /// Per-path operation objects.
    pub paths: Value,
    /// Shared component definitions.
    pub components: Value,
}

/// Builds a document facade over an assembled layer tree.
#[must_use]
pub fn document(layers: impl Into<Vec<Layer>>, config: DocumentConfig) -> ApiDocument {
    ApiDocument {
        layers: layers.into(),
        openapi: config.openapi_version,
        info: config.info,
        security: Vec::new(),
        components_seed: bad_request_components(),
    }
}

/// Orchestrates the walker and generator and holds top-level metadata.
#[derive(Debug, Clone)]
pub struct ApiDocument {
    layers: Vec<Layer>,
    openapi: String,
    info: Info,
    security: Vec<SecurityRequirement>,
    components_seed: Fragment,
}

impl ApiDocument {
    /// Replaces the document's `info` metadata.
    #[must_use]
    pub fn info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    /// Applies a security scheme to every operation in the document.
    ///
    /// Registers the scheme under `securitySchemes` and appends a global
    /// security requirement. Per-route schemes belong on the requirement via
    /// its `auth` builder instead.
    #[must_use]
    pub fn auth(mut self, name: &str, scheme: SecurityScheme) -> Self {
        let definition = serde_json::to_value(&scheme).unwrap_or(Value::Null);
        self.components_seed.merge_in_place(Fragment::map().with(
            "securitySchemes",
            Fragment::map().with(name, Fragment::Value(definition)),
        ));
        self.security
            .push(IndexMap::from([(name.to_owned(), Vec::new())]));
        self
    }

    /// Deep-merges manually defined components into the document.
    ///
    /// An escape hatch; requirements normally contribute components on
    /// their own.
    #[must_use]
    pub fn component(mut self, fragment: Fragment) -> Self {
        self.components_seed.merge_in_place(fragment);
        self
    }

    /// Emits the specification.
    ///
    /// Walks the layer tree and folds every requirement fresh on each call.
    #[must_use]
    pub fn spec(&self) -> Specification {
        let requirements = extract_all(&self.layers);
        let paths = generate_paths(&Fragment::map(), &requirements);
        let components = generate_components(&self.components_seed, &requirements);

        Specification {
            openapi: self.openapi.clone(),
            info: self.info.clone(),
            security: self.security.clone(),
            paths: finish_paths(paths.render()),
            components: components.render(),
        }
    }

    /// Emits the specification as pretty-printed JSON.
    pub fn spec_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(&self.spec())?)
    }
}

/// Finishing pass over rendered paths: template syntax and parameters.
fn finish_paths(paths: Value) -> Value {
    match paths {
        Value::Object(entries) => {
            let mut finished = Map::with_capacity(entries.len());
            for (path, mut methods) in entries {
                if let Value::Object(operations) = &mut methods {
                    for operation in operations.values_mut() {
                        flatten_request_params(operation);
                    }
                }
                finished.insert(normalize_path_template(&path), methods);
            }
            Value::Object(finished)
        }
        other => other,
    }
}

/// Rewrites `:name` path segments into `{name}` template syntax.
fn normalize_path_template(path: &str) -> String {
    let pattern = Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("valid regex");
    pattern.replace_all(path, "{$1}").into_owned()
}

/// Converts an operation's `requestParams` schemas into a `parameters` list.
///
/// Each location's object schema contributes one parameter per property,
/// required when the schema requires it.
fn flatten_request_params(operation: &mut Value) {
    let Value::Object(fields) = operation else {
        return;
    };
    let Some(Value::Object(request_params)) = fields.remove("requestParams") else {
        return;
    };

    let mut parameters: Vec<Value> = match fields.remove("parameters") {
        Some(Value::Array(existing)) => existing,
        _ => Vec::new(),
    };

    for (location, schema) in request_params {
        let Value::Object(schema) = schema else {
            continue;
        };
        let required: Vec<String> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        let Some(Value::Object(properties)) = schema.get("properties") else {
            continue;
        };
        for (name, definition) in properties {
            parameters.push(json!({
                "name": name,
                "in": location,
                "required": required.contains(name),
                "schema": definition,
            }));
        }
    }

    if !parameters.is_empty() {
        fields.insert("parameters".to_owned(), Value::Array(parameters));
    }
}
