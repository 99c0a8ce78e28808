//! `RedactTransform`: scrub sensitive data from string values.
//!
//! Every rule is applied, in order, to every string anywhere in the
//! document. Keys and non-string scalars are left alone.

use std::borrow::Cow;

use regex::Regex;
use serde_json::Value;
use wrapchain_core::Transformer;

use super::RedactRule;
use crate::{Error, Result};

/// Pre-compiled redaction rule with a ready-to-use regex.
struct CompiledRedaction {
    regex: Regex,
    replacement: String,
}

/// Regex-based redaction over all string values.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wrapchain::transform::{RedactRule, RedactTransform};
/// use wrapchain_core::Transformer;
///
/// let t = RedactTransform::compile(&[RedactRule {
///     pattern: r"\d{3}-\d{2}-\d{4}".to_string(),
///     replacement: "[SSN]".to_string(),
/// }])
/// .unwrap();
/// let out = t.transform(json!({"note": "ssn 123-45-6789"})).unwrap();
/// assert_eq!(out, json!({"note": "ssn [SSN]"}));
/// ```
pub struct RedactTransform {
    redactions: Vec<CompiledRedaction>,
}

impl RedactTransform {
    /// Compile redaction rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] naming the first rule whose
    /// pattern is not a valid regex.
    pub fn compile(rules: &[RedactRule]) -> Result<Self> {
        let redactions = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.pattern)
                    .map(|regex| CompiledRedaction {
                        regex,
                        replacement: rule.replacement.clone(),
                    })
                    .map_err(|e| {
                        Error::invalid_argument(format!(
                            "redact pattern '{}' is not a valid regex: {e}",
                            rule.pattern
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { redactions })
    }

    fn scrub(&self, value: &mut Value) {
        match value {
            Value::String(s) => {
                for r in &self.redactions {
                    let replaced = match r.regex.replace_all(s.as_str(), r.replacement.as_str()) {
                        Cow::Borrowed(_) => continue,
                        Cow::Owned(replaced) => replaced,
                    };
                    *s = replaced;
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|v| self.scrub(v)),
            Value::Object(map) => map.values_mut().for_each(|v| self.scrub(v)),
            _ => {}
        }
    }
}

impl Transformer<Value, Error> for RedactTransform {
    fn transform(&self, mut target: Value) -> Result<Value> {
        if !self.redactions.is_empty() {
            self.scrub(&mut target);
        }
        Ok(target)
    }

    fn name(&self) -> &str {
        "redact"
    }
}
