//! Document enhancers.
//!
//! Each effect kind knows how to contribute a partial operation fragment:
//! bodies become `requestBody` entries, location schemas land under
//! `requestParams`, response variants accumulate under `responses`, auth
//! effects add `security` entries. [`enhance_all`] folds the contributions of
//! one effect model, given the operation fragment accumulated so far —
//! enhancers *extend* what earlier middleware already documented rather than
//! clobbering it.

use serde_json::Value;
use warrant_schema::Fragment;

use crate::effect::{Effects, Location, DEFAULT_CONTENT_TYPE};

/// Folds every effect of a model into one contribution fragment.
///
/// `operation` is the operation object accumulated so far for the route;
/// the return value is only the contribution, which the caller deep-merges.
#[must_use]
pub fn enhance_all(effects: &Effects, operation: &Fragment) -> Fragment {
    let mut contribution = Fragment::map();
    contribution.merge_in_place(body_contribution(effects));
    for location in Location::ALL {
        contribution.merge_in_place(location_contribution(effects, location, operation));
    }
    contribution.merge_in_place(response_contribution(effects, operation));
    contribution.merge_in_place(auth_contribution(effects));
    contribution
}

/// Component definitions contributed by an effect model.
///
/// Auth effects publish their schemes under `securitySchemes`; everything
/// else documents inline and contributes nothing here.
#[must_use]
pub fn describe_components(effects: &Effects, _components: &Fragment) -> Fragment {
    if effects.auth.is_empty() {
        return Fragment::map();
    }
    let mut schemes = Fragment::map();
    for (name, auth) in &effects.auth {
        let scheme = serde_json::to_value(&auth.scheme).unwrap_or(Value::Null);
        schemes.insert(name.clone(), Fragment::Value(scheme));
    }
    Fragment::map().with("securitySchemes", schemes)
}

fn body_contribution(effects: &Effects) -> Fragment {
    let Some(body) = &effects.body else {
        return Fragment::map();
    };
    let content_type = body
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());
    Fragment::map().with(
        "requestBody",
        Fragment::map().with(
            "content",
            Fragment::map().with(
                content_type,
                Fragment::map().with("schema", Fragment::Schema(body.schema.clone())),
            ),
        ),
    )
}

fn location_contribution(effects: &Effects, location: Location, operation: &Fragment) -> Fragment {
    let Some(schema) = effects.location(location) else {
        return Fragment::map();
    };
    let key = location.document_key();
    // Union with whatever an earlier middleware already declared for this
    // location; this requirement's fields win on collision.
    let merged = match operation
        .get_path(&["requestParams", key])
        .and_then(Fragment::as_schema)
    {
        Some(existing) => existing.merge_fields(schema),
        None => schema.clone(),
    };
    Fragment::map().with(
        "requestParams",
        Fragment::map().with(key, Fragment::Schema(merged)),
    )
}

fn response_contribution(effects: &Effects, operation: &Fragment) -> Fragment {
    if effects.response.is_empty() {
        return Fragment::map();
    }
    // The working view includes this model's earlier variants, so a repeated
    // status + content type unions with what the same chain declared before.
    let mut view = operation.clone();
    let mut contribution = Fragment::map();

    for variant in &effects.response {
        let status = variant.status.as_u16().to_string();
        let content_type = variant
            .content_type
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned());

        let schema = match view
            .get_path(&[
                "responses",
                status.as_str(),
                "content",
                content_type.as_str(),
                "schema",
            ])
            .and_then(Fragment::as_schema)
        {
            Some(existing) => existing.or(variant.schema.clone()),
            None => variant.schema.clone(),
        };

        let mut response = Fragment::map();
        if let Some(description) = &variant.description {
            response.insert("description", Fragment::from(description.as_str()));
        }
        response.insert(
            "content",
            Fragment::map().with(
                content_type,
                Fragment::map().with("schema", Fragment::Schema(schema)),
            ),
        );

        let entry = Fragment::map().with("responses", Fragment::map().with(status, response));
        view.merge_in_place(entry.clone());
        contribution.merge_in_place(entry);
    }
    contribution
}

fn auth_contribution(effects: &Effects) -> Fragment {
    if effects.auth.is_empty() {
        return Fragment::map();
    }
    let entries: Vec<Fragment> = effects
        .auth
        .iter()
        .map(|(name, auth)| {
            let scopes: Vec<Value> = auth
                .scopes
                .iter()
                .map(|scope| Value::String(scope.clone()))
                .collect();
            Fragment::map().with(name.clone(), Fragment::Value(Value::Array(scopes)))
        })
        .collect();
    Fragment::map().with("security", Fragment::List(entries))
}
