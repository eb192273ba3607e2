//! # Warrant Docs
//!
//! Specification generation for warrant requirements.
//!
//! The host projects its router into a read-only [`Layer`] tree (usually via
//! [`RouteTable`]); [`document`] walks that tree, folds every requirement's
//! documentation contribution into per-path, per-method operations, and
//! emits a complete specification object:
//!
//! ```rust
//! use warrant_docs::{document, DocumentConfig, RouteTable};
//! use warrant_require::{header, requires};
//! use warrant_schema::Schema;
//!
//! let table = RouteTable::new()
//!     .mount(header("authorization", Schema::string()))
//!     .get("/pets/:id", requires().path("id", Schema::uuid()));
//!
//! let spec = document(table.into_layers(), DocumentConfig::new("Pets", "1.0.0")).spec();
//! assert!(spec.paths["/pets/{id}"]["get"]["parameters"].is_array());
//! ```
//!
//! Wildcard mounts inherit into every matching operation with fixed
//! specificity — explicit values beat path-scoped `use` middleware, which
//! beats pathless mounts — and every operation carries the shared `400`
//! validation-failure response.

#![doc(html_root_url = "https://docs.rs/warrant-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod document;
mod error;
mod extract;
mod generate;
mod layer;
mod openapi;
mod redoc;

pub use document::{document, ApiDocument, DocumentConfig, SecurityRequirement, Specification};
pub use error::{DocsError, DocsResult};
pub use extract::{
    extract_all, extract_layer, MethodRequirements, RequirementMap, ALL_PATHS_KEY, USE_METHOD_KEY,
};
pub use generate::{
    bad_request_components, base_operation, generate_components, generate_paths, BAD_REQUEST_REF,
};
pub use layer::{Handle, Layer, Route, RouteTable};
pub use openapi::{Contact, Info, License};
pub use redoc::redoc_html;

// The scheme type lives with the effect model; re-export it beside the
// document facade that consumes it.
pub use warrant_require::SecurityScheme;
