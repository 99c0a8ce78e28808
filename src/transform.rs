//! Built-in JSON transformers.
//!
//! Every transformer here implements
//! [`Transformer<Value, Error>`](wrapchain_core::Transformer) and can be
//! composed into a [`JsonChain`](crate::JsonChain), either directly or from
//! configuration through [`TransformSpec`].
//!
//! # Available Transformers
//!
//! | Transformer | Purpose |
//! |-------------|---------|
//! | [`ProjectTransform`] | Keep only listed JSON paths |
//! | [`RenameTransform`] | Rename top-level keys |
//! | [`RedactTransform`] | Regex-replace inside every string |
//! | [`NamespaceTransform`] | Prefix top-level keys |
//! | [`FlattenTransform`] | Flatten to dot-separated keys |
//! | [`TemplateTransform`] | Render a `{{path}}` template |
//! | [`RequireTransform`] | Fail if a path is missing |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod format;
pub mod namespace;
pub mod path;
pub mod project;
pub mod redact;
pub mod rename;
pub mod require;

pub use format::{FlattenTransform, TemplateTransform};
pub use namespace::NamespaceTransform;
pub use path::{JsonPath, Step};
pub use project::ProjectTransform;
pub use redact::RedactTransform;
pub use rename::RenameTransform;
pub use require::RequireTransform;

// ============================================================================
// Configuration types (deserialized from YAML)
// ============================================================================

/// Declarative description of one transformer in a chain.
///
/// ```yaml
/// transformers:
///   - type: require
///     paths: [id]
///   - type: project
///     paths: [id, user.email]
///   - type: redact
///     rules:
///       - pattern: '[\w.]+@[\w.]+'
///         replacement: '[EMAIL]'
///   - type: registered
///     name: audit
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformSpec {
    /// Keep only the listed paths.
    Project {
        /// JSON paths to keep.
        paths: Vec<String>,
    },
    /// Rename top-level keys (`old -> new`).
    Rename {
        /// Mapping of old key (or dotted path) to new key.
        fields: BTreeMap<String, String>,
    },
    /// Redact string values.
    Redact {
        /// Redaction rules, applied in order.
        rules: Vec<RedactRule>,
    },
    /// Prefix every top-level key.
    Namespace {
        /// Prefix to add.
        prefix: String,
        /// Separator between prefix and key.
        #[serde(default = "default_separator")]
        separator: String,
    },
    /// Flatten nested values to dot-separated keys.
    Flatten,
    /// Render the target into a string template.
    Template {
        /// Template with `{{path}}` placeholders.
        template: String,
    },
    /// Fail unless every listed path resolves.
    Require {
        /// Paths that must be present.
        paths: Vec<String>,
    },
    /// A transformer registered programmatically under a name.
    Registered {
        /// Registry name.
        name: String,
    },
}

fn default_separator() -> String {
    "_".to_string()
}

impl TransformSpec {
    /// Short label for logs and diagnostics.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Project { .. } => "project",
            Self::Rename { .. } => "rename",
            Self::Redact { .. } => "redact",
            Self::Namespace { .. } => "namespace",
            Self::Flatten => "flatten",
            Self::Template { .. } => "template",
            Self::Require { .. } => "require",
            Self::Registered { name } => name,
        }
    }
}

/// A single redaction rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactRule {
    /// Regex pattern to match.
    pub pattern: String,
    /// Replacement string.
    pub replacement: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── TransformSpec ───────────────────────────────────────────────────

    #[test]
    fn deserialize_specs_from_yaml() {
        let yaml = r"
- type: project
  paths: [id, user.name]
- type: namespace
  prefix: api
- type: flatten
- type: registered
  name: audit
";
        let specs: Vec<TransformSpec> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            specs,
            vec![
                TransformSpec::Project {
                    paths: vec!["id".to_string(), "user.name".to_string()],
                },
                TransformSpec::Namespace {
                    prefix: "api".to_string(),
                    separator: "_".to_string(),
                },
                TransformSpec::Flatten,
                TransformSpec::Registered {
                    name: "audit".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unknown_spec_type_is_rejected() {
        let result: std::result::Result<TransformSpec, _> =
            serde_yaml::from_str("type: teleport");
        assert!(result.is_err());
    }

    #[test]
    fn spec_labels() {
        assert_eq!(TransformSpec::Flatten.label(), "flatten");
        let registered = TransformSpec::Registered {
            name: "audit".to_string(),
        };
        assert_eq!(registered.label(), "audit");
    }
}
