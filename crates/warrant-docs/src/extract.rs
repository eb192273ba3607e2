//! The route-tree walker.
//!
//! Walks an assembled layer tree and reconstructs, for every path and
//! method, the ordered list of requirements that apply — purely by
//! inspection, with no registration side channel. Wildcard entries are kept
//! under their own keys ([`ALL_PATHS_KEY`], [`USE_METHOD_KEY`]); applying
//! their inheritance is the generator's concern, not the walker's.
//!
//! Layers without usable route metadata fall into two cases: no route at all
//! means a pathless mount (captured under the wildcard keys), while a route
//! missing its path or methods is malformed and silently skipped — unrelated
//! middleware commonly lacks route metadata and must not break generation.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;
use warrant_require::Requirement;

use crate::layer::{Handle, Layer};

/// Synthetic path key for requirements mounted without a path.
pub const ALL_PATHS_KEY: &str = "!all";

/// Synthetic method key for requirements mounted without a method.
pub const USE_METHOD_KEY: &str = "use";

/// Requirements per method for one path.
pub type MethodRequirements = IndexMap<String, Vec<Arc<Requirement>>>;

/// The walker's output: path → method → ordered requirements.
///
/// List order is traversal order — outer middleware first — because later
/// enhancers build on what earlier ones documented.
pub type RequirementMap = IndexMap<String, MethodRequirements>;

/// Walks every top-level layer and folds the per-layer maps together.
#[must_use]
pub fn extract_all(layers: &[Layer]) -> RequirementMap {
    let mut merged = RequirementMap::new();
    for layer in layers {
        for (path, methods) in extract_layer(layer) {
            let entry = merged.entry(path).or_default();
            append_methods(entry, methods);
        }
    }
    merged
}

/// Extracts the requirements a single layer contributes.
#[must_use]
pub fn extract_layer(layer: &Layer) -> RequirementMap {
    let Some((path, methods)) = route_or_wildcard(layer) else {
        return RequirementMap::new();
    };

    // The layer's own handle validates before anything mounted beneath it.
    let mut combined = direct_requirements(&layer.handle, &methods);
    append_methods(&mut combined, stack_requirements(layer, &methods));

    if combined.is_empty() {
        RequirementMap::new()
    } else {
        RequirementMap::from([(path, combined)])
    }
}

/// Resolves a layer's path and method set, or `None` for malformed entries.
fn route_or_wildcard(layer: &Layer) -> Option<(String, IndexMap<String, bool>)> {
    let wildcard = || {
        Some((
            ALL_PATHS_KEY.to_owned(),
            IndexMap::from([(USE_METHOD_KEY.to_owned(), true)]),
        ))
    };
    match &layer.route {
        None => wildcard(),
        Some(route) if route.path.is_none() && route.methods.is_empty() => wildcard(),
        Some(route) => {
            let Some(path) = route.path.clone() else {
                debug!("skipping route layer without a path");
                return None;
            };
            if route.methods.is_empty() {
                debug!(path, "skipping route layer without methods");
                return None;
            }
            Some((path, route.methods.clone()))
        }
    }
}

/// Associates a requirement handle with every flagged method.
fn direct_requirements(handle: &Handle, methods: &IndexMap<String, bool>) -> MethodRequirements {
    let Some(requirement) = handle.as_requirement() else {
        return MethodRequirements::new();
    };
    methods
        .iter()
        .filter(|(_, flagged)| **flagged)
        .map(|(method, _)| (method.clone(), vec![Arc::clone(requirement)]))
        .collect()
}

/// Collects requirements from a layer's nested stack, recursively.
///
/// Sub-layers inherit the enclosing path and method set; their own route
/// metadata, if any, is routing detail the document does not re-interpret.
fn stack_requirements(layer: &Layer, methods: &IndexMap<String, bool>) -> MethodRequirements {
    let mut collected = MethodRequirements::new();
    let Some(route) = &layer.route else {
        return collected;
    };
    for sub_layer in &route.stack {
        append_methods(&mut collected, direct_requirements(&sub_layer.handle, methods));
        append_methods(&mut collected, stack_requirements(sub_layer, methods));
    }
    collected
}

fn append_methods(target: &mut MethodRequirements, incoming: MethodRequirements) {
    for (method, requirements) in incoming {
        target.entry(method).or_default().extend(requirements);
    }
}
