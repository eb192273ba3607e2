//! Partial document fragments and their merge rule.
//!
//! Enhancers contribute [`Fragment`] trees; the generator folds them into
//! operation objects with [`Fragment::merge`]. The rule is deliberately
//! simple and uniform:
//!
//! - maps merge key by key, recursively;
//! - lists concatenate (never merged by index);
//! - schemas and opaque values are leaves — the later one wins wholesale.
//!
//! Schemas being atomic is load-bearing: recursing into a schema definition
//! would shred it. Leaves are tagged by variant, never detected structurally.

use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::Schema;

/// A partial document tree with schema-aware merge semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// An ordered mapping, merged key by key.
    Map(IndexMap<String, Fragment>),
    /// A list, concatenated on merge.
    List(Vec<Fragment>),
    /// A schema leaf: replaced wholesale, never recursed into.
    Schema(Schema),
    /// An opaque JSON leaf: replaced wholesale.
    Value(Value),
}

impl Fragment {
    /// An empty map fragment.
    #[must_use]
    pub fn map() -> Self {
        Self::Map(IndexMap::new())
    }

    /// Builder-style insertion; non-map fragments are replaced by a map.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Fragment>) -> Self {
        if !matches!(self, Self::Map(_)) {
            self = Self::map();
        }
        if let Self::Map(entries) = &mut self {
            entries.insert(key.into(), value.into());
        }
        self
    }

    /// Inserts into a map fragment in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Fragment>) {
        if let Self::Map(entries) = self {
            entries.insert(key.into(), value.into());
        }
    }

    /// Looks up a direct child of a map fragment.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Fragment> {
        match self {
            Self::Map(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Walks a path of map keys.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Fragment> {
        path.iter()
            .try_fold(self, |fragment, key| fragment.get(key))
    }

    /// Borrows the schema behind a [`Fragment::Schema`] leaf.
    #[must_use]
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Schema(schema) => Some(schema),
            _ => None,
        }
    }

    /// Borrows the entries of a map fragment.
    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, Fragment>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// True for a map fragment with no entries.
    #[must_use]
    pub fn is_empty_map(&self) -> bool {
        matches!(self, Self::Map(entries) if entries.is_empty())
    }

    /// Merges `later` into `earlier` under the fragment merge rule.
    #[must_use]
    pub fn merge(earlier: Fragment, later: Fragment) -> Fragment {
        match (earlier, later) {
            (Self::Map(mut base), Self::Map(incoming)) => {
                for (key, value) in incoming {
                    match base.shift_remove(&key) {
                        Some(existing) => {
                            base.insert(key, Self::merge(existing, value));
                        }
                        None => {
                            base.insert(key, value);
                        }
                    }
                }
                Self::Map(base)
            }
            (Self::List(mut base), Self::List(incoming)) => {
                base.extend(incoming);
                Self::List(base)
            }
            // Mixed shapes and leaves: later wins wholesale.
            (_, later) => later,
        }
    }

    /// Merges `later` into `self` in place.
    pub fn merge_in_place(&mut self, later: Fragment) {
        let earlier = std::mem::replace(self, Self::map());
        *self = Self::merge(earlier, later);
    }

    /// Renders the fragment to plain JSON, describing schema leaves.
    #[must_use]
    pub fn render(&self) -> Value {
        match self {
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.render()))
                    .collect(),
            ),
            Self::List(entries) => Value::Array(entries.iter().map(Fragment::render).collect()),
            Self::Schema(schema) => schema.describe(),
            Self::Value(value) => value.clone(),
        }
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::map()
    }
}

impl From<Schema> for Fragment {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

impl From<Value> for Fragment {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_owned()))
    }
}

impl From<Vec<Fragment>> for Fragment {
    fn from(entries: Vec<Fragment>) -> Self {
        Self::List(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map2(a: (&str, Fragment), b: (&str, Fragment)) -> Fragment {
        Fragment::map().with(a.0, a.1).with(b.0, b.1)
    }

    #[test]
    fn test_maps_merge_recursively() {
        let left = Fragment::map().with(
            "b",
            map2(("c", json!(2).into()), ("keep", json!(true).into())),
        );
        let right = Fragment::map()
            .with("b", Fragment::map().with("d", Fragment::from(json!(3))))
            .with("e", Fragment::from(json!(4)));
        let merged = Fragment::merge(left, right);
        assert_eq!(
            merged.render(),
            json!({"b": {"c": 2, "keep": true, "d": 3}, "e": 4})
        );
    }

    #[test]
    fn test_lists_concatenate() {
        let left = Fragment::map().with("items", Fragment::from(vec![Fragment::from(json!(1))]));
        let right = Fragment::map().with(
            "items",
            Fragment::from(vec![Fragment::from(json!(2)), Fragment::from(json!(3))]),
        );
        let merged = Fragment::merge(left, right);
        assert_eq!(merged.render(), json!({"items": [1, 2, 3]}));
    }

    #[test]
    fn test_schema_leaves_replace_wholesale() {
        let first = Schema::number();
        let second = Schema::string();
        let merged = Fragment::merge(
            Fragment::map().with("d", Fragment::from(first)),
            Fragment::map().with("d", Fragment::from(second.clone())),
        );
        assert_eq!(merged.get("d").and_then(Fragment::as_schema), Some(&second));
        // No oneOf/allOf artifacts: the later definition comes out untouched.
        assert_eq!(merged.render(), json!({"d": {"type": "string"}}));
    }

    #[test]
    fn test_scalar_conflict_later_wins() {
        let merged = Fragment::merge(
            Fragment::map().with("key", Fragment::from(json!("old"))),
            Fragment::map().with("key", Fragment::from(json!("new"))),
        );
        assert_eq!(merged.render(), json!({"key": "new"}));
    }

    #[test]
    fn test_mixed_shapes_later_wins() {
        let merged = Fragment::merge(
            Fragment::map().with("key", Fragment::from(json!([1, 2]))),
            Fragment::map().with("key", Fragment::map().with("now", Fragment::from(json!("map")))),
        );
        assert_eq!(merged.render(), json!({"key": {"now": "map"}}));
    }

    #[test]
    fn test_merge_preserves_insertion_order() {
        let merged = Fragment::merge(
            map2(("first", json!(1).into()), ("second", json!(2).into())),
            Fragment::map().with("third", Fragment::from(json!(3))),
        );
        let keys: Vec<&String> = merged.as_map().unwrap().keys().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_get_path_walks_maps() {
        let fragment = Fragment::map().with(
            "responses",
            Fragment::map().with("400", Fragment::map().with("description", Fragment::from("nope"))),
        );
        let found = fragment.get_path(&["responses", "400", "description"]);
        assert_eq!(found, Some(&Fragment::from("nope")));
        assert!(fragment.get_path(&["responses", "500"]).is_none());
    }

    #[test]
    fn test_render_describes_schemas() {
        let fragment = Fragment::map().with("schema", Fragment::from(Schema::boolean()));
        assert_eq!(fragment.render(), json!({"schema": {"type": "boolean"}}));
    }
}
