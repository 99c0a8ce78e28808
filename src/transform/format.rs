//! Output shaping: flattening and templating.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use wrapchain_core::Transformer;

use super::JsonPath;
use crate::{Error, Result};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("static regex"));

// ============================================================================
// FlattenTransform
// ============================================================================

/// Flattens nested objects and arrays into dot-separated top-level keys.
///
/// `{"a": {"b": 1}, "xs": [true]}` -> `{"a.b": 1, "xs.0": true}`.
/// Scalars pass through unchanged. Empty containers disappear.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlattenTransform;

impl Transformer<Value, Error> for FlattenTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        if !(target.is_object() || target.is_array()) {
            return Ok(target);
        }

        let mut flat = Map::new();
        let mut pending = vec![(String::new(), target)];
        while let Some((key, value)) = pending.pop() {
            match value {
                Value::Object(map) => {
                    pending.extend(map.into_iter().map(|(k, v)| (child_key(&key, &k), v)));
                }
                Value::Array(items) => pending.extend(
                    items
                        .into_iter()
                        .enumerate()
                        .map(|(i, v)| (child_key(&key, &i.to_string()), v)),
                ),
                leaf => {
                    flat.insert(key, leaf);
                }
            }
        }
        Ok(Value::Object(flat))
    }

    fn name(&self) -> &str {
        "flatten"
    }
}

fn child_key(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{parent}.{child}")
    }
}

// ============================================================================
// TemplateTransform
// ============================================================================

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Slot(JsonPath),
}

/// Renders the target into a `{{path}}` template, producing a string.
///
/// Missing paths render as empty strings.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use wrapchain::transform::TemplateTransform;
/// use wrapchain_core::Transformer;
///
/// let t = TemplateTransform::new("{{user.name}} has {{count}} items").unwrap();
/// let out = t.transform(json!({"user": {"name": "Ada"}, "count": 3})).unwrap();
/// assert_eq!(out, json!("Ada has 3 items"));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateTransform {
    pieces: Vec<Piece>,
}

impl TemplateTransform {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a placeholder holds a malformed
    /// path.
    pub fn new(template: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in PLACEHOLDER.captures_iter(template) {
            let (Some(whole), Some(path)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > last {
                pieces.push(Piece::Text(template[last..whole.start()].to_string()));
            }
            pieces.push(Piece::Slot(JsonPath::parse(path.as_str())?));
            last = whole.end();
        }
        if last < template.len() {
            pieces.push(Piece::Text(template[last..].to_string()));
        }
        Ok(Self { pieces })
    }

    fn render(&self, value: &Value) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Slot(path) => match path.select_value(value) {
                    Value::String(s) => out.push_str(&s),
                    Value::Null => {}
                    other => out.push_str(&other.to_string()),
                },
            }
        }
        out
    }
}

impl Transformer<Value, Error> for TemplateTransform {
    fn transform(&self, target: Value) -> Result<Value> {
        Ok(Value::String(self.render(&target)))
    }

    fn name(&self) -> &str {
        "template"
    }
}
