//! The validation dispatcher.
//!
//! [`validate_all`] runs every validator an effect model declares against a
//! request, in a fixed order: body, query, path, header, cookie. Response and
//! auth effects are documentation-only and never validated here.
//!
//! The dispatcher does not short-circuit. Every declared location is
//! evaluated and every issue is collected, each tagged with its request field
//! (`body`, `query`, `params`, `headers`, `cookies`) as a path prefix, so a
//! caller sees everything wrong with a request at once.

use serde_json::Value;
use warrant_schema::{Issue, ValidationErrors};

use crate::effect::{Effects, Location};
use crate::request::RequestParts;

/// Validates a request against an effect model, transforming it on success.
///
/// On success the body is replaced by its parsed form and query/cookie maps
/// absorb coerced values; header and path maps are left untouched. On failure
/// the request is left as it was and every collected issue is returned.
pub fn validate_all(effects: &Effects, parts: &mut RequestParts) -> Result<(), ValidationErrors> {
    let mut issues: Vec<Issue> = Vec::new();

    if let Some(body) = &effects.body {
        match body.schema.validate(&parts.body) {
            Ok(parsed) => parts.body = parsed,
            Err(found) => issues.extend(prefix_all(found, "body")),
        }
    }

    for location in Location::ALL {
        let Some(schema) = effects.location(location) else {
            continue;
        };
        let snapshot = parts.location_value(location);
        match schema.validate(&snapshot) {
            Ok(parsed) => {
                if location.writes_back() {
                    parts.absorb(location, parsed);
                }
            }
            Err(found) => issues.extend(prefix_all(found, location.request_field())),
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(issues))
    }
}

fn prefix_all(issues: Vec<Issue>, field: &str) -> Vec<Issue> {
    issues
        .into_iter()
        .map(|issue| issue.prefixed(field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::requires;
    use serde_json::json;
    use warrant_schema::Schema;

    #[test]
    fn test_no_requirements_is_ok() {
        let requirement = requires();
        let mut parts = RequestParts::new();
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
    }

    #[test]
    fn test_response_effects_never_fail_requests() {
        let requirement = requires().response(
            http::StatusCode::OK,
            Schema::literal(json!("example")),
            None,
        );
        let mut parts = RequestParts::new();
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
    }

    #[test]
    fn test_body_match_passes() {
        let requirement = requires().body(
            Schema::object().extend("mode", Schema::literal(json!("test"))),
            None,
        );
        let mut parts = RequestParts::new().with_body(json!({"mode": "test"}));
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
    }

    #[test]
    fn test_body_transform_updates_request() {
        let requirement = requires().body(
            Schema::object().extend("changes_type", Schema::boolean()),
            None,
        );

        let mut truthy = RequestParts::new().with_body(json!({"changes_type": "true"}));
        assert!(validate_all(requirement.effects(), &mut truthy).is_ok());
        assert_eq!(truthy.body, json!({"changes_type": true}));

        let mut falsy = RequestParts::new().with_body(json!({"changes_type": "false"}));
        assert!(validate_all(requirement.effects(), &mut falsy).is_ok());
        assert_eq!(falsy.body, json!({"changes_type": false}));
    }

    #[test]
    fn test_body_mismatch_reports_prefixed_path() {
        let requirement = requires().body(
            Schema::object().extend("mode", Schema::literal(json!("test"))),
            None,
        );
        let mut parts = RequestParts::new().with_body(json!({"mode": "hello"}));
        let errors = validate_all(requirement.effects(), &mut parts).unwrap_err();
        assert_eq!(errors.issues.len(), 1);
        assert_eq!(errors.issues[0].code, "invalid_literal");
        assert_eq!(
            errors.issues[0].path,
            vec!["body".to_owned(), "mode".to_owned()]
        );
    }

    #[test]
    fn test_body_collects_every_issue() {
        let requirement = requires().body(
            Schema::object()
                .extend("test", Schema::boolean())
                .extend("mode", Schema::number()),
            None,
        );
        let mut parts = RequestParts::new().with_body(json!({"mode": "hello"}));
        let errors = validate_all(requirement.effects(), &mut parts).unwrap_err();
        assert_eq!(errors.issues.len(), 2);
    }

    #[test]
    fn test_query_transform_writes_back() {
        let requirement = requires().query("count", Schema::integer());
        let mut parts = RequestParts::new().with_query("count", "4");
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
        assert_eq!(parts.query["count"], json!(4));
    }

    #[test]
    fn test_cookie_transform_writes_back() {
        let requirement = requires().cookie("visits", Schema::integer());
        let mut parts = RequestParts::new().with_cookie("visits", "7");
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
        assert_eq!(parts.cookies["visits"], json!(7));
    }

    #[test]
    fn test_header_is_not_written_back() {
        let requirement = requires().header("x-count", Schema::integer());
        let mut parts = RequestParts::new().with_header("x-count", "4");
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
        // Coercion validated "4" but the live header stays textual.
        assert_eq!(parts.headers["x-count"], json!("4"));
    }

    #[test]
    fn test_path_is_not_written_back() {
        let requirement = requires().path("version", Schema::integer());
        let mut parts = RequestParts::new().with_param("version", "2");
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
        assert_eq!(parts.params["version"], json!("2"));
    }

    #[test]
    fn test_undeclared_query_fields_survive() {
        let requirement = requires().query("declared", Schema::string());
        let mut parts = RequestParts::new()
            .with_query("declared", "yes")
            .with_query("undeclared", "also here");
        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
        assert_eq!(parts.query["undeclared"], json!("also here"));
    }

    #[test]
    fn test_missing_parameter_reports_required() {
        let requirement = requires().header("authorization", Schema::string());
        let mut parts = RequestParts::new();
        let errors = validate_all(requirement.effects(), &mut parts).unwrap_err();
        assert_eq!(errors.issues.len(), 1);
        assert_eq!(errors.issues[0].code, "required");
        assert_eq!(
            errors.issues[0].path,
            vec!["headers".to_owned(), "authorization".to_owned()]
        );
    }

    #[test]
    fn test_all_locations_pass_together() {
        let requirement = requires()
            .body(Schema::object().extend("test", Schema::literal(json!(true))), None)
            .query("example", Schema::array(Schema::string()))
            .header("x-example", Schema::string())
            .cookie("cookie_example", Schema::string())
            .path("id", Schema::literal(json!("v1")));

        let mut parts = RequestParts::new()
            .with_body(json!({"test": true}))
            .with_query("example", json!(["1", "2"]))
            .with_param("id", "v1")
            .with_cookie("cookie_example", "test")
            .with_header("x-example", "some header value");

        assert!(validate_all(requirement.effects(), &mut parts).is_ok());
    }

    #[test]
    fn test_failures_collect_across_locations_in_fixed_order() {
        let requirement = requires()
            .body(Schema::object().extend("test", Schema::literal(json!(true))), None)
            .query("example", Schema::array(Schema::string()))
            .header("x-example", Schema::string())
            .cookie("cookie_example", Schema::string())
            .path("id", Schema::literal(json!("v1")));

        let mut parts = RequestParts::new()
            .with_body(json!({"test": "not the literal"}))
            .with_query("example", json!(17))
            .with_param("id", json!(true))
            .with_cookie("cookie_example", json!(1))
            .with_header("x-example", "fine");

        let errors = validate_all(requirement.effects(), &mut parts).unwrap_err();
        let prefixes: Vec<&str> = errors
            .issues
            .iter()
            .map(|issue| issue.path[0].as_str())
            .collect();
        // Fixed evaluation order: body, query, path, header, cookie —
        // the passing header contributes nothing.
        assert_eq!(prefixes, vec!["body", "query", "params", "cookies"]);
    }
}
