//! The specification generator.
//!
//! Two independent folds over the walker's [`RequirementMap`]:
//!
//! - **Paths**: every (path, method) starts from a base operation — the
//!   shared `400` validation-failure response, plus a request-body
//!   placeholder for methods that carry one — then each requirement's
//!   enhancer contribution is deep-merged in traversal order. Afterwards the
//!   wildcard entries are folded away: the `!all` path merges into every
//!   concrete path, then each path's `use` method merges into its concrete
//!   methods. Specificity is explicit > wildcard-method > wildcard-path >
//!   base defaults.
//! - **Components**: every requirement (wildcard entries included) gets to
//!   extend the shared components object, seeded with whatever the caller
//!   already accumulated.
//!
//! Both folds read their inputs and build fresh output, so generation is
//! idempotent and safe to repeat.

use serde_json::json;
use warrant_schema::{Fragment, Problem};

use crate::extract::{RequirementMap, ALL_PATHS_KEY, USE_METHOD_KEY};

/// Reference to the shared validation-failure response component.
pub const BAD_REQUEST_REF: &str = "#/components/responses/400-bad-request";

/// Methods that do not get a request-body placeholder.
const METHODS_WITHOUT_BODY: [&str; 3] = ["get", "head", "options"];

/// The seed operation every concrete path+method starts from.
///
/// Declared effects refine this: a body requirement replaces the placeholder
/// content, a more specific `400` response overrides the shared reference.
#[must_use]
pub fn base_operation(method: &str) -> Fragment {
    let operation = Fragment::map().with(
        "responses",
        Fragment::map().with("400", Fragment::Value(json!({"$ref": BAD_REQUEST_REF}))),
    );
    if METHODS_WITHOUT_BODY.contains(&method) {
        return operation;
    }
    operation.with(
        "requestBody",
        Fragment::map().with(
            "content",
            Fragment::map().with("application/json", Fragment::map()),
        ),
    )
}

/// The shared components every generated document carries.
#[must_use]
pub fn bad_request_components() -> Fragment {
    Fragment::map().with(
        "responses",
        Fragment::map().with(
            "400-bad-request",
            Fragment::map()
                .with("description", Fragment::from("400 BAD REQUEST"))
                .with(
                    "content",
                    Fragment::map().with(
                        Problem::CONTENT_TYPE,
                        Fragment::map().with("schema", Fragment::Schema(Problem::schema())),
                    ),
                ),
        ),
    )
}

/// Folds every requirement's enhancer into per-path, per-method operations.
///
/// `seed` holds any pre-existing path fragments; a requirement's enhancer
/// always sees the operation accumulated so far, so later contributions can
/// extend earlier ones.
#[must_use]
pub fn generate_paths(seed: &Fragment, requirements: &RequirementMap) -> Fragment {
    let mut paths = Fragment::map();

    for (path, methods) in requirements {
        let mut built = Fragment::map();
        for (method, list) in methods {
            let wildcard = path == ALL_PATHS_KEY || method == USE_METHOD_KEY;
            let seeded = seed
                .get_path(&[path, method])
                .cloned()
                .unwrap_or_default();
            // Wildcard entries are later merged as bases into concrete
            // operations, which already carry the defaults; seeding them too
            // would duplicate the baseline.
            let mut operation = if wildcard {
                seeded
            } else {
                Fragment::merge(base_operation(method), seeded)
            };
            for requirement in list {
                let contribution = requirement.enhance_docs(&operation);
                operation.merge_in_place(contribution);
            }
            built.insert(method.clone(), operation);
        }
        if !built.is_empty_map() {
            paths.insert(path.clone(), built);
        }
    }

    match pop_and_merge(paths, ALL_PATHS_KEY) {
        Fragment::Map(entries) => Fragment::Map(
            entries
                .into_iter()
                .map(|(path, methods)| (path, pop_and_merge(methods, USE_METHOD_KEY)))
                .filter(|(_, methods)| !methods.is_empty_map())
                .collect(),
        ),
        other => other,
    }
}

/// Removes `key` from a map fragment and merges it into every sibling.
///
/// The popped entry acts as the base: siblings' own values win on conflict.
fn pop_and_merge(fragment: Fragment, key: &str) -> Fragment {
    match fragment {
        Fragment::Map(mut entries) => {
            let Some(popped) = entries.shift_remove(key) else {
                return Fragment::Map(entries);
            };
            Fragment::Map(
                entries
                    .into_iter()
                    .map(|(name, value)| (name, Fragment::merge(popped.clone(), value)))
                    .collect(),
            )
        }
        other => other,
    }
}

/// Folds every requirement's component contributions into one object.
///
/// Wildcard and `use` entries are treated exactly like any other; order
/// follows the map's traversal order, and the seed is extended, never
/// replaced.
#[must_use]
pub fn generate_components(seed: &Fragment, requirements: &RequirementMap) -> Fragment {
    let mut components = seed.clone();
    for methods in requirements.values() {
        for list in methods.values() {
            for requirement in list {
                let contribution = requirement.describe_components(&components);
                components.merge_in_place(contribution);
            }
        }
    }
    components
}
