//! `ProjectTransform`: keep only an allowlist of JSON paths.
//!
//! Each matched path lands under its leaf key (`user.email` -> `email`).
//! Wildcard paths matching several values produce an array. Paths that
//! resolve to nothing are omitted.

use serde_json::{Map, Value};
use wrapchain_core::Transformer;

use super::JsonPath;
use crate::{Error, Result};

/// Projects a JSON document onto a set of paths.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wrapchain::transform::ProjectTransform;
/// use wrapchain_core::Transformer;
///
/// let t = ProjectTransform::new(&["id", "user.email"]).unwrap();
/// let out = t.transform(json!({"id": 1, "user": {"email": "a@b", "age": 3}})).unwrap();
/// assert_eq!(out, json!({"id": 1, "email": "a@b"}));
/// ```
pub struct ProjectTransform {
    paths: Vec<JsonPath>,
}

impl ProjectTransform {
    /// Create a projection over the given paths.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if any path is malformed.
    pub fn new(paths: &[impl AsRef<str>]) -> Result<Self> {
        Ok(Self {
            paths: JsonPath::parse_all(paths)?,
        })
    }
}

impl Transformer<Value, Error> for ProjectTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        if self.paths.is_empty() {
            return Ok(target);
        }

        let projected: Map<String, Value> = self
            .paths
            .iter()
            .filter(|path| path.exists_in(&target))
            .map(|path| (path.leaf().to_string(), path.select_value(&target)))
            .collect();
        Ok(Value::Object(projected))
    }

    fn name(&self) -> &str {
        "project"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn project_keeps_only_listed_fields() {
        // GIVEN: projection on "a" and "c"
        let t = ProjectTransform::new(&["a", "c"]).unwrap();

        // WHEN: transforming
        let out = t.transform(json!({"a": 1, "b": 2, "c": 3})).unwrap();

        // THEN: "b" dropped
        assert_eq!(out, json!({"a": 1, "c": 3}));
    }

    #[test]
    fn project_array_wildcard_collects_values() {
        let t = ProjectTransform::new(&["orders[].sku"]).unwrap();
        let out = t
            .transform(json!({"orders": [{"sku": "x"}, {"sku": "y"}]}))
            .unwrap();
        assert_eq!(out, json!({"sku": ["x", "y"]}));
    }

    #[test]
    fn project_missing_field_is_omitted() {
        let t = ProjectTransform::new(&["a", "missing"]).unwrap();
        let out = t.transform(json!({"a": true})).unwrap();
        assert_eq!(out, json!({"a": true}));
    }

    #[test]
    fn empty_projection_passes_through() {
        let none: [&str; 0] = [];
        let t = ProjectTransform::new(&none).unwrap();
        let input = json!({"keep": "everything"});
        assert_eq!(t.transform(input.clone()).unwrap(), input);
    }

    #[test]
    fn malformed_path_is_rejected_at_construction() {
        let err = ProjectTransform::new(&["id", "items[x]"]).err().unwrap();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
