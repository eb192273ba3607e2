//! The requirement: warrant's attachable unit.
//!
//! A [`Requirement`] bundles an effect model with three derived capabilities:
//! it validates requests (the middleware role), it enhances operation
//! fragments (the documentation role) and it describes shared components.
//! It starts empty from [`requires`] and grows through the fluent builder
//! calls; each call merges into the effect model under the rules in
//! [`Effects::merge`].
//!
//! Builder calls never fail — schema conflicts only surface at validation or
//! generation time.

use std::fmt;
use std::sync::Arc;

use http::StatusCode;
use tracing::debug;
use warrant_schema::{Fragment, Problem, Schema, ValidationErrors};

use crate::effect::{
    AuthEffect, BodyConfig, BodyEffect, Effects, Location, ResponseConfig, ResponseEffect,
    SecurityScheme,
};
use crate::enhance;
use crate::request::RequestParts;
use crate::validate;

/// What a requirement decided about a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// The request passed; hand it to the next handler.
    Continue,
    /// The request was rejected with the given payload.
    Reject(Rejection),
}

/// A rejection response produced by a failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// HTTP status to respond with.
    pub status: StatusCode,
    /// Media type of the body.
    pub content_type: String,
    /// The problem payload.
    pub problem: Problem,
}

impl Rejection {
    /// The default 400 rejection for the given failures.
    #[must_use]
    pub fn bad_request(errors: &ValidationErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            content_type: Problem::CONTENT_TYPE.to_owned(),
            problem: Problem::bad_request(errors),
        }
    }
}

/// A custom error handler, replacing the default rejection payload.
pub type ErrorHandler = Arc<dyn Fn(&ValidationErrors) -> Disposition + Send + Sync>;

/// Configuration applied when a requirement is created.
#[derive(Clone, Default)]
pub struct RequirementConfig {
    /// Handler invoked instead of emitting the default problem payload.
    pub error_handler: Option<ErrorHandler>,
}

impl RequirementConfig {
    /// Configuration with a custom error handler.
    #[must_use]
    pub fn with_error_handler<F>(handler: F) -> Self
    where
        F: Fn(&ValidationErrors) -> Disposition + Send + Sync + 'static,
    {
        Self {
            error_handler: Some(Arc::new(handler)),
        }
    }
}

impl fmt::Debug for RequirementConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequirementConfig")
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

/// A composed, attachable set of request requirements.
#[derive(Clone, Default)]
pub struct Requirement {
    effects: Effects,
    config: RequirementConfig,
    /// Non-empty only for combinators built by `requires_many`; their
    /// validators and enhancers run constituent by constituent.
    pub(crate) constituents: Vec<Requirement>,
}

/// Creates an empty requirement to build on.
#[must_use]
pub fn requires() -> Requirement {
    Requirement::default()
}

/// Creates an empty requirement with configuration.
#[must_use]
pub fn requires_with(config: RequirementConfig) -> Requirement {
    Requirement {
        config,
        ..Requirement::default()
    }
}

impl Requirement {
    pub(crate) fn from_parts(effects: Effects, constituents: Vec<Requirement>) -> Self {
        Self {
            effects,
            config: RequirementConfig::default(),
            constituents,
        }
    }

    /// Requires the request body to match `schema`.
    ///
    /// At most one body constraint exists per requirement; calling again
    /// overrides the previous schema and media type.
    #[must_use]
    pub fn body(mut self, schema: Schema, config: Option<BodyConfig>) -> Self {
        self.effects.body = Some(BodyEffect {
            schema,
            content_type: config.and_then(|c| c.content_type),
        });
        self
    }

    /// Requires a query-string field to match `schema`.
    #[must_use]
    pub fn query(mut self, key: &str, schema: Schema) -> Self {
        self.effects.extend_location(Location::Query, key, schema);
        self
    }

    /// Requires a path parameter to match `schema`.
    #[must_use]
    pub fn path(mut self, key: &str, schema: Schema) -> Self {
        self.effects.extend_location(Location::Path, key, schema);
        self
    }

    /// Requires a header to match `schema`. Header names are matched
    /// lowercased.
    #[must_use]
    pub fn header(mut self, key: &str, schema: Schema) -> Self {
        self.effects
            .extend_location(Location::Header, &key.to_lowercase(), schema);
        self
    }

    /// Requires a cookie to match `schema`.
    #[must_use]
    pub fn cookie(mut self, key: &str, schema: Schema) -> Self {
        self.effects.extend_location(Location::Cookie, key, schema);
        self
    }

    /// Declares a response variant. Always appends; a status code may carry
    /// several alternative schemas.
    #[must_use]
    pub fn response(
        mut self,
        status: StatusCode,
        schema: Schema,
        config: Option<ResponseConfig>,
    ) -> Self {
        let config = config.unwrap_or_default();
        self.effects.response.push(ResponseEffect {
            status,
            schema,
            content_type: config.content_type,
            description: config.description,
        });
        self
    }

    /// Declares an auth scheme this route uses.
    #[must_use]
    pub fn auth(mut self, name: &str, scheme: SecurityScheme, scopes: Vec<String>) -> Self {
        self.effects
            .auth
            .insert(name.to_owned(), AuthEffect { scheme, scopes });
        self
    }

    /// The accumulated effect model.
    #[must_use]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    /// Validates a request, transforming it in place on success.
    ///
    /// Combinators run every constituent and concatenate their issues;
    /// plain requirements dispatch over their own effect model. Either way
    /// every failure is collected, nothing short-circuits.
    pub fn validate(&self, parts: &mut RequestParts) -> Result<(), ValidationErrors> {
        if self.constituents.is_empty() {
            return validate::validate_all(&self.effects, parts);
        }
        let mut errors = ValidationErrors::default();
        for constituent in &self.constituents {
            if let Err(found) = constituent.validate(parts) {
                errors.extend(found);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Contributes this requirement's documentation to an operation.
    ///
    /// `operation` is the fragment accumulated for the route so far; the
    /// return value is only the contribution, which the caller merges.
    #[must_use]
    pub fn enhance_docs(&self, operation: &Fragment) -> Fragment {
        if self.constituents.is_empty() {
            return enhance::enhance_all(&self.effects, operation);
        }
        // Fold constituents in order; later ones see the accumulated view.
        let mut view = operation.clone();
        let mut contribution = Fragment::map();
        for constituent in &self.constituents {
            let piece = constituent.enhance_docs(&view);
            view.merge_in_place(piece.clone());
            contribution.merge_in_place(piece);
        }
        contribution
    }

    /// Contributes shared component definitions.
    #[must_use]
    pub fn describe_components(&self, components: &Fragment) -> Fragment {
        if self.constituents.is_empty() {
            return enhance::describe_components(&self.effects, components);
        }
        let mut view = components.clone();
        let mut contribution = Fragment::map();
        for constituent in &self.constituents {
            let piece = constituent.describe_components(&view);
            view.merge_in_place(piece.clone());
            contribution.merge_in_place(piece);
        }
        contribution
    }

    /// Runs the requirement as middleware against a request.
    ///
    /// On failure the configured error handler decides the outcome; without
    /// one, the default 400 problem payload is produced and the chain halts.
    #[must_use]
    pub fn handle(&self, parts: &mut RequestParts) -> Disposition {
        match self.validate(parts) {
            Ok(()) => Disposition::Continue,
            Err(errors) => {
                debug!(issues = errors.issues.len(), "request rejected by requirement");
                match &self.config.error_handler {
                    Some(handler) => handler(&errors),
                    None => Disposition::Reject(Rejection::bad_request(&errors)),
                }
            }
        }
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("effects", &self.effects)
            .field("config", &self.config)
            .field("constituents", &self.constituents.len())
            .finish()
    }
}

/// A requirement with just a body constraint.
#[must_use]
pub fn body(schema: Schema, config: Option<BodyConfig>) -> Requirement {
    requires().body(schema, config)
}

/// A requirement with a single query-field constraint.
#[must_use]
pub fn query(key: &str, schema: Schema) -> Requirement {
    requires().query(key, schema)
}

/// A requirement with a single path-parameter constraint.
#[must_use]
pub fn path(key: &str, schema: Schema) -> Requirement {
    requires().path(key, schema)
}

/// A requirement with a single header constraint.
#[must_use]
pub fn header(key: &str, schema: Schema) -> Requirement {
    requires().header(key, schema)
}

/// A requirement with a single cookie constraint.
#[must_use]
pub fn cookie(key: &str, schema: Schema) -> Requirement {
    requires().cookie(key, schema)
}

/// A requirement declaring a single response variant.
#[must_use]
pub fn response(status: StatusCode, schema: Schema, config: Option<ResponseConfig>) -> Requirement {
    requires().response(status, schema, config)
}

/// A requirement declaring a single auth scheme.
#[must_use]
pub fn auth(name: &str, scheme: SecurityScheme, scopes: Vec<String>) -> Requirement {
    requires().auth(name, scheme, scopes)
}
