//! `RenameTransform`: rename top-level keys.
//!
//! All renames in one table happen at once: every old key is taken out
//! before any new key is written, so `a -> b, b -> a` swaps the two values
//! and `a -> b, b -> c` moves only `a`. Dotted keys are accepted; only the
//! part after the last `.` is matched.

use std::collections::BTreeMap;

use serde_json::Value;
use wrapchain_core::Transformer;

use crate::{Error, Result};

/// Renames top-level keys based on a mapping table.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wrapchain::transform::RenameTransform;
/// use wrapchain_core::Transformer;
///
/// let t = RenameTransform::from_pairs(&[("legacy_id", "id")]);
/// let out = t.transform(json!({"legacy_id": 7})).unwrap();
/// assert_eq!(out, json!({"id": 7}));
/// ```
pub struct RenameTransform {
    renames: Vec<(String, String)>,
}

impl RenameTransform {
    /// Create from an explicit `old -> new` mapping.
    #[must_use]
    pub fn new(renames: &BTreeMap<String, String>) -> Self {
        Self {
            renames: renames
                .iter()
                .map(|(old, new)| (last_segment(old).to_string(), new.clone()))
                .collect(),
        }
    }

    /// Convenience builder from a list of `(old, new)` pairs.
    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let renames: BTreeMap<_, _> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self::new(&renames)
    }
}

fn last_segment(key: &str) -> &str {
    key.rsplit_once('.').map_or(key, |(_, last)| last)
}

impl Transformer<Value, Error> for RenameTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        let Value::Object(mut map) = target else {
            return Ok(target);
        };

        let taken: Vec<(String, Value)> = self
            .renames
            .iter()
            .filter_map(|(old, new)| map.remove(old).map(|v| (new.clone(), v)))
            .collect();
        map.extend(taken);

        Ok(Value::Object(map))
    }

    fn name(&self) -> &str {
        "rename"
    }
}
