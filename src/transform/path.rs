//! Dotted JSON paths with array steps.
//!
//! Grammar, informally:
//!
//! ```text
//! path    := head ( '.' field | bracket )*
//! head    := field | bracket
//! bracket := '[' ']'          every element
//!          | '[' digits ']'   one element
//! ```
//!
//! `orders[].sku`, `matrix[0][1]` and `[2].id` are valid. `a..b`, `a.`,
//! `items[x]`, `items[0` and `a[0]b` are rejected when parsed, so a
//! transformer built from a bad path never exists.

use std::fmt;
use std::mem;
use std::str::FromStr;

use serde_json::Value;

use crate::{Error, Result};

/// One step of a [`JsonPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Object member by name.
    Field(String),
    /// Every element of an array (`[]`).
    Each,
    /// One array element by position (`[3]`).
    Index(usize),
}

impl Step {
    fn select<'v>(&self, value: &'v Value) -> Vec<&'v Value> {
        match self {
            Self::Field(name) => value.get(name).into_iter().collect(),
            Self::Each => value
                .as_array()
                .map(|items| items.iter().collect())
                .unwrap_or_default(),
            Self::Index(i) => value.get(*i).into_iter().collect(),
        }
    }
}

/// A parsed, validated JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    steps: Vec<Step>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Start,
    AfterDot,
    InField,
    AfterBracket,
}

impl JsonPath {
    /// Parse `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] describing the first syntax
    /// problem.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid =
            |why: String| Error::invalid_argument(format!("invalid JSON path '{raw}': {why}"));

        let mut steps = Vec::new();
        let mut field = String::new();
        let mut cursor = Cursor::Start;
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            cursor = match (c, cursor) {
                ('.', Cursor::InField) => {
                    steps.push(Step::Field(mem::take(&mut field)));
                    Cursor::AfterDot
                }
                ('.', Cursor::AfterBracket) => Cursor::AfterDot,
                ('.', _) => return Err(invalid("empty field name".into())),
                ('[', Cursor::AfterDot) => {
                    return Err(invalid("'[' must follow a field name or ']'".into()));
                }
                ('[', _) => {
                    if cursor == Cursor::InField {
                        steps.push(Step::Field(mem::take(&mut field)));
                    }
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some(']') => break,
                            Some('[') | None => return Err(invalid("unclosed '['".into())),
                            Some(ch) => inner.push(ch),
                        }
                    }
                    steps.push(if inner.is_empty() {
                        Step::Each
                    } else {
                        Step::Index(inner.parse().map_err(|_| {
                            invalid(format!("'{inner}' is not an array index"))
                        })?)
                    });
                    Cursor::AfterBracket
                }
                (']', _) => return Err(invalid("unmatched ']'".into())),
                (_, Cursor::AfterBracket) => {
                    return Err(invalid(format!("unexpected '{c}' after ']'")));
                }
                (_, _) => {
                    field.push(c);
                    Cursor::InField
                }
            };
        }

        match cursor {
            Cursor::Start => return Err(invalid("path is empty".into())),
            Cursor::AfterDot => return Err(invalid("trailing '.'".into())),
            Cursor::InField => steps.push(Step::Field(field)),
            Cursor::AfterBracket => {}
        }

        Ok(Self {
            raw: raw.to_string(),
            steps,
        })
    }

    /// Parse every path in `raw`, stopping at the first invalid one.
    ///
    /// # Errors
    ///
    /// See [`Self::parse`].
    pub fn parse_all(raw: &[impl AsRef<str>]) -> Result<Vec<Self>> {
        raw.iter().map(|p| Self::parse(p.as_ref())).collect()
    }

    /// The path as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed steps.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Name of the last field step (`orders[].sku` -> `sku`,
    /// `items[]` -> `items`); the raw path when there is none.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.steps
            .iter()
            .rev()
            .find_map(|s| match s {
                Step::Field(name) => Some(name.as_str()),
                _ => None,
            })
            .unwrap_or(&self.raw)
    }

    /// Every value the path reaches in `root`, in document order.
    #[must_use]
    pub fn select<'v>(&self, root: &'v Value) -> Vec<&'v Value> {
        self.steps.iter().fold(vec![root], |reached, step| {
            reached.into_iter().flat_map(|v| step.select(v)).collect()
        })
    }

    /// Returns `true` if the path reaches at least one value.
    #[must_use]
    pub fn exists_in(&self, root: &Value) -> bool {
        !self.select(root).is_empty()
    }

    /// Owned view of what the path reaches: `null` for nothing, the value
    /// itself for one match, an array for several.
    #[must_use]
    pub fn select_value(&self, root: &Value) -> Value {
        match self.select(root).as_slice() {
            [] => Value::Null,
            [only] => (*only).clone(),
            many => Value::Array(many.iter().map(|v| (*v).clone()).collect()),
        }
    }
}

impl FromStr for JsonPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(name: &str) -> Step {
        Step::Field(name.to_string())
    }

    fn path(raw: &str) -> JsonPath {
        JsonPath::parse(raw).unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn parses_fields_wildcards_and_indices() {
        assert_eq!(path("user.email").steps(), [field("user"), field("email")]);
        assert_eq!(
            path("orders[].sku").steps(),
            [field("orders"), Step::Each, field("sku")]
        );
        assert_eq!(
            path("matrix[0][1]").steps(),
            [field("matrix"), Step::Index(0), Step::Index(1)]
        );
        assert_eq!(path("[2].id").steps(), [Step::Index(2), field("id")]);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", ".a", "a..b", "a.", "items[x]", "items[0", "a]", "a[0]b", "a.[0]", "a[[0]]"] {
            let err = JsonPath::parse(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidArgument(_)),
                "expected InvalidArgument for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn error_names_the_offending_segment() {
        let err = JsonPath::parse("items[x]").unwrap_err();
        assert!(err.to_string().contains("'x' is not an array index"));
    }

    #[test]
    fn from_str_and_display_round_trip() {
        let p: JsonPath = "orders[0].sku".parse().unwrap();
        assert_eq!(p.to_string(), "orders[0].sku");
    }

    #[test]
    fn leaf_is_last_field() {
        assert_eq!(path("orders[].sku").leaf(), "sku");
        assert_eq!(path("items[]").leaf(), "items");
        assert_eq!(path("[0]").leaf(), "[0]");
    }

    // ── selection ───────────────────────────────────────────────────────

    #[test]
    fn select_expands_wildcards_in_order() {
        let doc = json!({"orders": [{"sku": "a"}, {"qty": 1}, {"sku": "b"}]});
        assert_eq!(path("orders[].sku").select(&doc), [&json!("a"), &json!("b")]);
    }

    #[test]
    fn select_nested_indices() {
        let doc = json!({"matrix": [[1, 2], [3, 4]]});
        assert_eq!(path("matrix[1][0]").select_value(&doc), json!(3));
    }

    #[test]
    fn out_of_range_and_type_mismatch_select_nothing() {
        let doc = json!({"items": [1], "name": "x"});
        assert!(!path("items[5]").exists_in(&doc));
        assert!(!path("name[]").exists_in(&doc));
        assert!(!path("items.first").exists_in(&doc));
    }

    #[test]
    fn select_value_shapes() {
        let doc = json!({"xs": [{"v": 1}, {"v": 2}], "one": true});
        assert_eq!(path("missing").select_value(&doc), Value::Null);
        assert_eq!(path("one").select_value(&doc), json!(true));
        assert_eq!(path("xs[].v").select_value(&doc), json!([1, 2]));
    }
}
