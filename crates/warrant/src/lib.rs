//! # Warrant
//!
//! **Declarative request validation and API documentation from one
//! declaration.**
//!
//! Warrant attaches to an HTTP router from the outside. A route declares
//! what its requests must contain — body, query, path, header, cookie — and
//! which responses exist; warrant then does two things with that single
//! declaration:
//!
//! 1. **Validates** each inbound request before the handler runs, collecting
//!    every violation into an RFC 9457 style problem payload.
//! 2. **Documents** the whole API by walking the router's layer tree and
//!    folding every declaration into a complete specification object.
//!
//! ## Quick start
//!
//! ```rust
//! use http::StatusCode;
//! use serde_json::json;
//! use warrant::prelude::*;
//!
//! // Declare once...
//! let create_pet = requires()
//!     .body(
//!         Schema::object().extend("type", Schema::enumeration(["cat", "dog"])),
//!         None,
//!     )
//!     .header("authorization", Schema::string())
//!     .response(StatusCode::CREATED, Schema::object(), None);
//!
//! // ...validate requests with it...
//! let mut request = RequestParts::new()
//!     .with_body(json!({"type": "cat"}))
//!     .with_header("authorization", "Bearer token");
//! assert_eq!(create_pet.handle(&mut request), Disposition::Continue);
//!
//! // ...and derive the API document from the routing table.
//! let table = RouteTable::new().post("/pets", create_pet);
//! let spec = document(table.into_layers(), DocumentConfig::new("Pets", "1.0.0")).spec();
//! assert!(spec.paths["/pets"]["post"]["requestBody"].is_object());
//! ```
//!
//! ## Crates
//!
//! - [`schema`] — the schema adapter, issues, problem payload, fragments
//! - [`require`] — effect model, requirement builder, validation dispatcher
//! - [`docs`] — route-tree walker, specification generator, document facade

#![doc(html_root_url = "https://docs.rs/warrant/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export member crates under stable module names.
pub use warrant_docs as docs;
pub use warrant_require as require;
pub use warrant_schema as schema;

/// The common imports, one `use` away.
pub mod prelude {
    pub use warrant_docs::{
        document, redoc_html, ApiDocument, DocumentConfig, Handle, Info, Layer, Route, RouteTable,
        Specification,
    };
    pub use warrant_require::{
        auth, body, cookie, header, path, query, requires, requires_many, requires_with,
        BodyConfig, Disposition, Effects, RequestParts, Requirement, RequirementConfig,
        ResponseConfig, SecurityScheme,
    };
    pub use warrant_schema::{Fragment, Issue, Problem, Schema, ValidationErrors};
}
