//! The RFC 9457 style problem payload for validation failures.
//!
//! When a requirement rejects a request the default error body is a
//! problem-details document with an `issues` array. The media type is
//! `application/problem+validation+json`, distinguishing validation problems
//! from ordinary JSON error bodies.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::issue::{Issue, ValidationErrors, DEFAULT_ISSUE_TYPE};
use crate::schema::Schema;

/// The problem document emitted for a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    /// A URI reference identifying the problem type.
    #[serde(rename = "type")]
    pub type_uri: String,
    /// Short human-readable summary.
    pub title: String,
    /// Explanation specific to this occurrence.
    pub detail: String,
    /// HTTP status, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// URI identifying this specific occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// The individual schema violations.
    pub issues: Vec<Issue>,
}

impl Problem {
    /// Media type for validation problem bodies.
    pub const CONTENT_TYPE: &'static str = "application/problem+validation+json";

    /// Builds the default bad-request problem from collected issues.
    ///
    /// Issues that do not survive the wire-shape sanity check are replaced by
    /// a synthetic `custom` issue and a warning is logged; a single bad issue
    /// must not invalidate the whole payload.
    #[must_use]
    pub fn bad_request(errors: &ValidationErrors) -> Self {
        let issues = errors.issues.iter().map(sanitize_issue).collect();
        Self {
            type_uri: DEFAULT_ISSUE_TYPE.to_owned(),
            title: "Bad request".to_owned(),
            detail: "Request failed to validate".to_owned(),
            status: None,
            instance: None,
            issues,
        }
    }

    /// The schema of this payload, for inclusion in generated documents.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new(json!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "default": DEFAULT_ISSUE_TYPE,
                    "description": "A URI reference [RFC3986] that identifies the problem type.",
                },
                "title": {
                    "type": "string",
                    "description": "A short, human-readable summary of the problem type.",
                },
                "detail": {
                    "type": "string",
                    "description": "A human-readable explanation specific to this occurrence of the problem.",
                },
                "status": {
                    "type": "number",
                    "description": "The HTTP status of this request",
                },
                "instance": {"type": "string"},
                "issues": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "type": {
                                "type": "string",
                                "default": DEFAULT_ISSUE_TYPE,
                                "description": "A URI reference [RFC3986] that identifies the problem type.",
                            },
                            "code": {
                                "type": "string",
                                "description": "A stable code indicating what went wrong.",
                            },
                            "path": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "A path pointing to the location of the problem.",
                            },
                            "message": {
                                "type": "string",
                                "description": "A human-readable description pointing to the source of the problem",
                            },
                        },
                        "required": ["type", "message"],
                    },
                },
            },
            "required": ["type", "title", "detail", "issues"],
        }))
    }
}

/// Checks an issue against the wire contract, replacing it when malformed.
fn sanitize_issue(issue: &Issue) -> Issue {
    if issue.code.is_empty() || issue.path.iter().any(String::is_empty) {
        warn!(code = %issue.code, "dropping malformed validation issue from problem payload");
        return Issue::custom("No information available");
    }
    issue.clone()
}
