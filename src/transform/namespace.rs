//! `NamespaceTransform`: prefixes every top-level key.
//!
//! `{"id": 1}` becomes `{"user_id": 1}` for namespace `"user"`.
//! Non-object targets pass through unchanged.

use serde_json::{Map, Value};
use wrapchain_core::Transformer;

use crate::{Error, Result};

/// Adds a namespace prefix to all top-level keys.
pub struct NamespaceTransform {
    prefix: String,
    separator: String,
}

impl NamespaceTransform {
    /// Create a namespace transform with `_` as the separator.
    #[must_use]
    pub fn new(namespace: impl Into<String>) -> Self {
        Self::with_separator(namespace, "_")
    }

    /// Create a namespace transform with a custom separator.
    #[must_use]
    pub fn with_separator(namespace: impl Into<String>, sep: impl Into<String>) -> Self {
        Self {
            prefix: namespace.into(),
            separator: sep.into(),
        }
    }

    fn prefixed(&self, key: &str) -> String {
        format!("{}{}{key}", self.prefix, self.separator)
    }
}

impl Transformer<Value, Error> for NamespaceTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        let Value::Object(map) = target else {
            return Ok(target);
        };

        Ok(Value::Object(
            map.into_iter()
                .map(|(k, v)| (self.prefixed(&k), v))
                .collect::<Map<_, _>>(),
        ))
    }

    fn name(&self) -> &str {
        "namespace"
    }
}
