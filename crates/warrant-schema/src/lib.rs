//! # Warrant Schema
//!
//! Schema adapter and shared value types for the warrant framework.
//!
//! This crate is the seam between warrant and its schema-validation backend
//! (the `jsonschema` crate). It provides:
//!
//! - [`Schema`] — a JSON Schema definition paired with a compiled validator,
//!   with string-to-type coercion for values arriving as text
//! - [`Issue`] / [`ValidationErrors`] — structured, aggregated violations
//! - [`Problem`] — the RFC 9457 style payload emitted on rejection
//! - [`Fragment`] — partial document trees with schema-atomic deep merge
//!
//! Nothing here knows about requests, routes or documents; those live in
//! `warrant-require` and `warrant-docs`.

#![doc(html_root_url = "https://docs.rs/warrant-schema/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod fragment;
mod issue;
mod problem;
mod schema;

pub use fragment::Fragment;
pub use issue::{Issue, ValidationErrors, DEFAULT_ISSUE_TYPE};
pub use problem::Problem;
pub use schema::Schema;
