//! # Warrant Require
//!
//! Declarative request requirements for HTTP routes.
//!
//! A [`Requirement`] is built fluently, attached to a route as middleware and
//! read by the documentation generator. One declaration drives both:
//!
//! ```rust
//! use http::StatusCode;
//! use serde_json::json;
//! use warrant_require::{requires, Disposition, RequestParts};
//! use warrant_schema::Schema;
//!
//! let requirement = requires()
//!     .body(Schema::object().extend("name", Schema::string()), None)
//!     .header("authorization", Schema::string())
//!     .response(StatusCode::CREATED, Schema::object(), None);
//!
//! let mut request = RequestParts::new()
//!     .with_body(json!({"name": "Rex"}))
//!     .with_header("Authorization", "Bearer token");
//!
//! assert_eq!(requirement.handle(&mut request), Disposition::Continue);
//! ```
//!
//! Validation collects every failure across body, query, path, header and
//! cookie constraints and rejects with an RFC 9457 style problem payload;
//! [`requires_many`] composes independent requirements into one unit with
//! identical semantics to manual chaining.

#![doc(html_root_url = "https://docs.rs/warrant-require/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod combine;
mod effect;
mod enhance;
mod request;
mod requirement;
mod validate;

pub use combine::requires_many;
pub use effect::{
    AuthEffect, BodyConfig, BodyEffect, Effects, Location, ResponseConfig, ResponseEffect,
    SecurityScheme, DEFAULT_CONTENT_TYPE,
};
pub use enhance::{describe_components, enhance_all};
pub use request::RequestParts;
pub use requirement::{
    auth, body, cookie, header, path, query, requires, requires_with, response, Disposition,
    ErrorHandler, Rejection, Requirement, RequirementConfig,
};
pub use validate::validate_all;
