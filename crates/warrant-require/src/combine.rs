//! The requirement combinator.
//!
//! [`requires_many`] folds independent requirements into one. The composite
//! behaves exactly as if the same builder calls had been chained on a single
//! requirement: its effect model is the left-to-right merge of the inputs,
//! its validator runs every input and concatenates the issues, and its
//! enhancer folds every input over the operation fragment in order.

use crate::effect::Effects;
use crate::requirement::Requirement;

/// Combines an ordered list of requirements into one.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use warrant_require::{requires, requires_many, RequestParts};
/// use warrant_schema::Schema;
///
/// let combined = requires_many([
///     requires().body(Schema::object().extend("kind", Schema::string()), None),
///     requires().header("authorization", Schema::string()),
/// ]);
///
/// let mut request = RequestParts::new().with_body(json!({"kind": 1}));
/// let errors = combined.validate(&mut request).unwrap_err();
/// // Both constituents report: the body mismatch and the missing header.
/// assert_eq!(errors.issues.len(), 2);
/// ```
#[must_use]
pub fn requires_many<I>(requirements: I) -> Requirement
where
    I: IntoIterator<Item = Requirement>,
{
    let constituents: Vec<Requirement> = requirements.into_iter().collect();
    let effects = constituents
        .iter()
        .fold(Effects::default(), |merged, requirement| {
            merged.merge(requirement.effects().clone())
        });
    Requirement::from_parts(effects, constituents)
}
