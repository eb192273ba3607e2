//! Structured validation issues.
//!
//! Every schema violation is reported as an [`Issue`]: a stable code, the
//! path to the offending value and a human-readable message. Issues from all
//! locations of a request are aggregated into [`ValidationErrors`], which is
//! the failure value the dispatcher hands back — validation never panics and
//! never throws.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default `type` URI for issues that carry no more specific problem type.
pub const DEFAULT_ISSUE_TYPE: &str = "about:blank";

/// One schema violation, tagged with where in the request it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// A URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub type_uri: String,
    /// Stable machine-readable code (`required`, `invalid_type`, ...).
    pub code: String,
    /// Path to the offending value, outermost segment first.
    pub path: Vec<String>,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Issue {
    /// Creates an issue with the default problem-type URI.
    #[must_use]
    pub fn new(code: impl Into<String>, path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            type_uri: DEFAULT_ISSUE_TYPE.to_owned(),
            code: code.into(),
            path,
            message: message.into(),
        }
    }

    /// A synthetic issue for failures the backend could not describe.
    ///
    /// Used when the schema backend errors outside its structured taxonomy;
    /// the request pipeline degrades to a diagnostic instead of crashing.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::new("custom", Vec::new(), message)
    }

    /// Returns the issue with `segment` prepended to its path.
    ///
    /// The dispatcher uses this to tag issues with their request location
    /// (`body`, `query`, `params`, `headers`, `cookies`).
    #[must_use]
    pub fn prefixed(mut self, segment: &str) -> Self {
        self.path.insert(0, segment.to_owned());
        self
    }
}

/// Aggregate validation failure: every issue from every evaluated location.
#[derive(Debug, Clone, PartialEq, Eq, Default, Error, Serialize, Deserialize)]
#[error("request failed to validate: {} issue(s)", .issues.len())]
pub struct ValidationErrors {
    /// The collected issues, in evaluation order.
    pub issues: Vec<Issue>,
}

impl ValidationErrors {
    /// Creates an aggregate from already-collected issues.
    #[must_use]
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    /// True when no issues were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Appends all issues from `other`, preserving order.
    pub fn extend(&mut self, other: ValidationErrors) {
        self.issues.extend(other.issues);
    }
}

impl From<Vec<Issue>> for ValidationErrors {
    fn from(issues: Vec<Issue>) -> Self {
        Self::new(issues)
    }
}
