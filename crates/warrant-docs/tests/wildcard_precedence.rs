//! Property test for wildcard inheritance.
//!
//! Specificity must be: explicit operation value > path-scoped `use`
//! middleware > pathless mount > generated defaults — for every combination
//! of which layers are present. Each layer writes a distinguishable
//! description to the same response entry, so the winner is observable.

use http::StatusCode;
use proptest::prelude::*;
use warrant_docs::{document, DocumentConfig, RouteTable};
use warrant_require::{requires, Requirement, ResponseConfig};
use warrant_schema::Schema;

fn marker(description: &str) -> Requirement {
    requires().response(
        StatusCode::OK,
        Schema::string(),
        Some(ResponseConfig::description(description)),
    )
}

proptest! {
    #[test]
    fn specificity_is_explicit_then_use_then_all(
        has_wildcard_path in any::<bool>(),
        has_wildcard_method in any::<bool>(),
        has_explicit in any::<bool>(),
    ) {
        let mut table = RouteTable::new();
        if has_wildcard_path {
            table = table.mount(marker("from !all"));
        }
        if has_wildcard_method {
            table = table.mount_at("/pets", marker("from use"));
        }
        let route_requirement = if has_explicit {
            marker("explicit")
        } else {
            requires()
        };
        table = table.get("/pets", route_requirement);

        let spec = document(table.into_layers(), DocumentConfig::default()).spec();
        let description = spec.paths["/pets"]["get"]["responses"]["200"]
            .get("description")
            .cloned();

        let expected = if has_explicit {
            Some("explicit")
        } else if has_wildcard_method {
            Some("from use")
        } else if has_wildcard_path {
            Some("from !all")
        } else {
            None
        };
        prop_assert_eq!(
            description,
            expected.map(|text| serde_json::Value::String(text.to_owned()))
        );

        // The default 400 entry survives in every combination.
        prop_assert!(spec.paths["/pets"]["get"]["responses"]["400"].is_object());
    }
}
