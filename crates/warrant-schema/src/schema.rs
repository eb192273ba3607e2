//! The schema adapter.
//!
//! [`Schema`] wraps a JSON Schema definition together with a lazily compiled
//! validator from the `jsonschema` crate. The rest of the framework only ever
//! talks to this type: it validates (and coerces) request values, extends
//! object schemas field by field, and describes itself for inclusion in a
//! generated API document.
//!
//! Values arriving from query strings, path segments, headers and cookies are
//! plain strings; [`Schema::validate`] coerces them to the declared primitive
//! type before running the compiled validator, so a schema declaring
//! `{"type": "boolean"}` accepts `"true"` and yields `true`.

use std::fmt;
use std::sync::{Arc, OnceLock};

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Validator, ValidationError};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::issue::Issue;

/// A JSON Schema paired with its compiled validator.
///
/// Cloning is cheap: the definition is a [`serde_json::Value`] and the
/// compiled validator is shared behind an [`Arc`]. Compilation happens on
/// first validation and is never repeated.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use warrant_schema::Schema;
///
/// let schema = Schema::new(json!({"type": "string", "minLength": 1}));
/// assert!(schema.validate(&json!("hello")).is_ok());
/// assert!(schema.validate(&json!("")).is_err());
/// ```
#[derive(Clone)]
pub struct Schema {
    definition: Value,
    compiled: Arc<OnceLock<Option<Validator>>>,
}

impl Schema {
    /// Creates a schema from a JSON Schema definition.
    #[must_use]
    pub fn new(definition: Value) -> Self {
        Self {
            definition,
            compiled: Arc::new(OnceLock::new()),
        }
    }

    /// An empty object schema (`{"type": "object"}`).
    #[must_use]
    pub fn object() -> Self {
        Self::new(json!({"type": "object"}))
    }

    /// A string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::new(json!({"type": "string"}))
    }

    /// A boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(json!({"type": "boolean"}))
    }

    /// An integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(json!({"type": "integer"}))
    }

    /// A number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::new(json!({"type": "number"}))
    }

    /// An array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self::new(json!({"type": "array", "items": items.definition}))
    }

    /// A string schema restricted to UUID format.
    #[must_use]
    pub fn uuid() -> Self {
        Self::new(json!({"type": "string", "format": "uuid"}))
    }

    /// A schema matching exactly one constant value.
    #[must_use]
    pub fn literal(value: Value) -> Self {
        Self::new(json!({"const": value}))
    }

    /// A string schema restricted to the given set of values.
    #[must_use]
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = values.into_iter().map(|v| Value::String(v.into())).collect();
        Self::new(json!({"type": "string", "enum": values}))
    }

    /// Returns the machine-readable schema definition.
    ///
    /// This is the value embedded into generated API documents.
    #[must_use]
    pub fn describe(&self) -> Value {
        self.definition.clone()
    }

    /// Borrows the underlying definition.
    #[must_use]
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// Extends an object schema with one named field.
    ///
    /// The field is added to `properties` and marked required. Re-using a key
    /// overwrites only that field. Non-object definitions are first promoted
    /// to object schemas, matching how location effects start out empty.
    #[must_use]
    pub fn extend(&self, key: &str, field: Schema) -> Self {
        let mut definition = self.definition.clone();
        if !definition.is_object() {
            definition = json!({"type": "object"});
        }
        let root = definition
            .as_object_mut()
            .expect("definition was just promoted to an object");
        root.insert("type".to_owned(), Value::String("object".to_owned()));

        let properties = root
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        if let Some(properties) = properties.as_object_mut() {
            properties.insert(key.to_owned(), field.definition);
        }

        let required = root
            .entry("required")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Some(required) = required.as_array_mut() {
            if !required.iter().any(|v| v.as_str() == Some(key)) {
                required.push(Value::String(key.to_owned()));
            }
        }

        Self::new(definition)
    }

    /// Merges another object schema into this one, field-level union.
    ///
    /// Colliding property names resolve in favour of `later`; `required`
    /// lists are unioned. Used both when combining effect models and when an
    /// enhancer folds location schemas into an existing operation fragment.
    #[must_use]
    pub fn merge_fields(&self, later: &Schema) -> Self {
        let mut merged = self.clone();
        if let Some(properties) = later.definition.get("properties").and_then(Value::as_object) {
            for (key, field) in properties {
                merged = merged.extend(key, Schema::new(field.clone()));
            }
        }
        merged
    }

    /// Returns the union of this schema and `other` (`oneOf`).
    ///
    /// An existing `oneOf` union is flattened rather than nested, so chains
    /// of alternatives stay a single flat list.
    #[must_use]
    pub fn or(&self, other: Schema) -> Self {
        let mut variants = match self.definition.get("oneOf").and_then(Value::as_array) {
            Some(existing) => existing.clone(),
            None => vec![self.definition.clone()],
        };
        variants.push(other.definition);
        Self::new(json!({"oneOf": variants}))
    }

    /// Names of the fields declared by an object schema, in insertion order.
    #[must_use]
    pub fn field_names(&self) -> Vec<String> {
        self.definition
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| properties.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Validates `value`, returning the coerced/transformed value on success.
    ///
    /// String inputs are coerced to the declared primitive types first (see
    /// the module docs), so schemas behave like parsers: the returned value
    /// is what the caller should continue with. On failure every violation is
    /// reported, not just the first.
    pub fn validate(&self, value: &Value) -> Result<Value, Vec<Issue>> {
        let coerced = coerce(&self.definition, value);
        match self.validator() {
            Some(validator) => {
                let issues: Vec<Issue> = validator
                    .iter_errors(&coerced)
                    .map(|error| issue_from_error(&error))
                    .collect();
                if issues.is_empty() {
                    Ok(coerced)
                } else {
                    Err(issues)
                }
            }
            // Compilation failed: surface a single synthetic issue rather
            // than taking the request pipeline down.
            None => Err(vec![Issue::custom("schema failed to compile")]),
        }
    }

    fn validator(&self) -> Option<&Validator> {
        self.compiled
            .get_or_init(|| {
                let compiled = jsonschema::options()
                    .should_validate_formats(true)
                    .build(&self.definition);
                match compiled {
                    Ok(validator) => Some(validator),
                    Err(error) => {
                        warn!(error = %error, "schema definition failed to compile");
                        None
                    }
                }
            })
            .as_ref()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("definition", &self.definition)
            .finish()
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.definition == other.definition
    }
}

impl From<Value> for Schema {
    fn from(definition: Value) -> Self {
        Self::new(definition)
    }
}

/// Coerces a value toward the types a schema declares.
///
/// Only lossless string-to-primitive conversions are performed; anything that
/// does not parse is passed through untouched and left for the validator to
/// reject with a proper issue.
fn coerce(definition: &Value, value: &Value) -> Value {
    let declared = definition.get("type").and_then(Value::as_str);
    match (declared, value) {
        (Some("boolean"), Value::String(s)) => s
            .parse::<bool>()
            .map_or_else(|_| value.clone(), Value::Bool),
        (Some("integer"), Value::String(s)) => s
            .parse::<i64>()
            .map_or_else(|_| value.clone(), Value::from),
        (Some("number"), Value::String(s)) => s
            .parse::<f64>()
            .map_or_else(|_| value.clone(), Value::from),
        (Some("array"), Value::String(s)) => {
            let items = definition.get("items").unwrap_or(&Value::Null);
            Value::Array(
                s.split(',')
                    .filter(|part| !part.is_empty())
                    .map(|part| coerce(items, &Value::String(part.trim().to_owned())))
                    .collect(),
            )
        }
        (Some("array"), Value::Array(entries)) => {
            let items = definition.get("items").unwrap_or(&Value::Null);
            Value::Array(entries.iter().map(|entry| coerce(items, entry)).collect())
        }
        (_, Value::Object(fields)) => {
            let properties = definition.get("properties").and_then(Value::as_object);
            let mut coerced = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let field_schema = properties.and_then(|p| p.get(key));
                coerced.insert(
                    key.clone(),
                    field_schema.map_or_else(|| field.clone(), |s| coerce(s, field)),
                );
            }
            Value::Object(coerced)
        }
        _ => value.clone(),
    }
}

/// Maps a backend validation error onto a wire issue.
fn issue_from_error(error: &ValidationError<'_>) -> Issue {
    let mut path: Vec<String> = error
        .instance_path()
        .to_string()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    // A missing-property violation points at the object; the issue should
    // point at the absent field itself.
    if let ValidationErrorKind::Required { property } = error.kind() {
        if let Some(name) = property.as_str() {
            path.push(name.to_owned());
        }
    }
    Issue::new(issue_code(error.kind()), path, error.to_string())
}

/// Stable issue codes derived from the backend's error taxonomy.
fn issue_code(kind: &ValidationErrorKind) -> &'static str {
    match kind {
        ValidationErrorKind::Required { .. } => "required",
        ValidationErrorKind::Enum { .. } => "invalid_enum_value",
        ValidationErrorKind::Type { .. } => "invalid_type",
        ValidationErrorKind::Constant { .. } => "invalid_literal",
        ValidationErrorKind::Format { .. }
        | ValidationErrorKind::Pattern { .. }
        | ValidationErrorKind::MinLength { .. }
        | ValidationErrorKind::MaxLength { .. } => "invalid_string",
        ValidationErrorKind::Minimum { .. }
        | ValidationErrorKind::Maximum { .. }
        | ValidationErrorKind::ExclusiveMinimum { .. }
        | ValidationErrorKind::ExclusiveMaximum { .. }
        | ValidationErrorKind::MultipleOf { .. } => "out_of_range",
        ValidationErrorKind::MinItems { .. } | ValidationErrorKind::MaxItems { .. } => {
            "invalid_array"
        }
        _ => "custom",
    }
}
