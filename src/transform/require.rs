//! `RequireTransform`: reject targets that lack required paths.
//!
//! Passes the target through untouched when every path resolves. Placed
//! first in a chain, it stops malformed input before any other
//! transformer runs.

use serde_json::Value;
use wrapchain_core::Transformer;

use super::JsonPath;
use crate::{Error, Result};

/// Fails with [`Error::Transform`] if any listed path is missing.
pub struct RequireTransform {
    paths: Vec<JsonPath>,
}

impl RequireTransform {
    /// Require every path in `paths`.
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

impl Transformer<Value, Error> for RequireTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        let missing: Vec<&str> = self
            .paths
            .iter()
            .filter(|path| !path.exists_in(&target))
            .map(JsonPath::as_str)
            .collect();

        if missing.is_empty() {
            Ok(target)
        } else {
            Err(Error::transform(
                self.name(),
                format!("missing required path(s): {}", missing.join(", ")),
            ))
        }
    }

    fn name(&self) -> &str {
        "require"
    }
}
