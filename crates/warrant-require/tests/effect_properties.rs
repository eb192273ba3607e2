//! Property tests for the effect-model merge laws.

use proptest::prelude::*;
use warrant_require::{requires_many, Effects, Location, RequestParts, Requirement};
use warrant_schema::Schema;

fn field_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "alpha".to_owned(),
        "beta".to_owned(),
        "gamma".to_owned(),
        "delta".to_owned(),
    ])
}

fn field_schema() -> impl Strategy<Value = Schema> {
    prop::sample::select(vec![0_u8, 1, 2]).prop_map(|kind| match kind {
        0 => Schema::string(),
        1 => Schema::integer(),
        _ => Schema::boolean(),
    })
}

fn field_map() -> impl Strategy<Value = Vec<(String, Schema)>> {
    prop::collection::vec((field_name(), field_schema()), 0..4)
}

fn effects_for(location: Location, fields: &[(String, Schema)]) -> Effects {
    let mut effects = Effects::default();
    for (key, schema) in fields {
        effects.extend_location(location, key, schema.clone());
    }
    effects
}

proptest! {
    /// Merging A then B yields the union of their field sets, with B's
    /// schema winning whenever both declare the same name.
    #[test]
    fn merge_is_field_union_right_biased(
        a in field_map(),
        b in field_map(),
    ) {
        for location in Location::ALL {
            let merged = effects_for(location, &a).merge(effects_for(location, &b));
            let Some(schema) = merged.location(location) else {
                prop_assert!(a.is_empty() && b.is_empty());
                continue;
            };

            let mut expected: Vec<String> = Vec::new();
            for (key, _) in a.iter().chain(b.iter()) {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
            }
            let mut names = schema.field_names();
            names.sort();
            expected.sort();
            prop_assert_eq!(names, expected);

            let described = schema.describe();
            for (key, field) in &b {
                prop_assert_eq!(&described["properties"][key.as_str()], &field.describe());
            }
        }
    }

    /// A combinator fails a request exactly when at least one constituent
    /// fails it, and reports the concatenation of their issues in order.
    #[test]
    fn requires_many_aggregates_constituent_failures(
        declared in field_map(),
        provided in prop::collection::vec(field_name(), 0..4),
    ) {
        let constituents: Vec<Requirement> = declared
            .iter()
            .map(|(key, schema)| warrant_require::header(key, schema.clone()))
            .collect();
        let singles: Vec<Requirement> = constituents.clone();
        let combined = requires_many(constituents);

        let request = || {
            let mut parts = RequestParts::new();
            for name in &provided {
                parts = parts.with_header(name.clone(), "value");
            }
            parts
        };

        let combined_result = combined.validate(&mut request());
        let mut expected_issues = Vec::new();
        let mut any_failed = false;
        for single in &singles {
            if let Err(errors) = single.validate(&mut request()) {
                any_failed = true;
                expected_issues.extend(errors.issues);
            }
        }

        match combined_result {
            Ok(()) => prop_assert!(!any_failed),
            Err(errors) => {
                prop_assert!(any_failed);
                prop_assert_eq!(errors.issues, expected_issues);
            }
        }
    }
}
