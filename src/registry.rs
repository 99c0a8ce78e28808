//! Transformer registry — resolves [`TransformSpec`]s into chains.
//!
//! Built-in specs (`project`, `redact`, …) are constructed on the fly.
//! `registered` specs look up transformers the embedding program put into
//! the registry by name, so custom Rust transformers can be referenced from
//! YAML alongside the built-ins.
//!
//! ```text
//! [TransformSpec] ──resolve──▶ [Arc<dyn Transformer>] ──append──▶ JsonChain
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use wrapchain_core::Chain;

use crate::transform::{
    FlattenTransform, NamespaceTransform, ProjectTransform, RedactTransform, RenameTransform,
    RequireTransform, TemplateTransform, TransformSpec,
};
use crate::{Error, JsonChain, JsonTransformer, Result};

/// Registry of named JSON transformers.
///
/// Thin wrapper over `DashMap`; safe to share and register into from
/// several threads.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use wrapchain::registry::TransformerRegistry;
/// use wrapchain::transform::{FlattenTransform, TransformSpec};
///
/// let registry = TransformerRegistry::new();
/// registry.register("flat", Arc::new(FlattenTransform)).unwrap();
///
/// let chain = registry
///     .build_chain(&[TransformSpec::Registered { name: "flat".into() }])
///     .unwrap();
/// assert_eq!(chain.names(), vec!["flatten"]);
/// ```
pub struct TransformerRegistry {
    transformers: DashMap<String, Arc<JsonTransformer>>,
}

impl TransformerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transformers: DashMap::new(),
        }
    }

    /// Register a transformer under `name`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is empty or blank.
    pub fn register(&self, name: impl Into<String>, transformer: Arc<JsonTransformer>) -> Result<()> {
        let name = name.into();
        validate_name(&name)?;
        if self.transformers.insert(name.clone(), transformer).is_some() {
            tracing::debug!(transformer = %name, "Replaced registered transformer");
        }
        Ok(())
    }

    /// Look up a transformer by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<JsonTransformer>> {
        self.transformers.get(name).map(|t| Arc::clone(&*t))
    }

    /// Remove a transformer by name. Returns `true` if it existed.
    pub fn remove(&self, name: &str) -> bool {
        self.transformers.remove(name).is_some()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transformers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered transformers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Turn one spec into a transformer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty or unknown
    /// `registered` name, or an invalid built-in parameter such as a
    /// malformed redaction regex or JSON path.
    pub fn resolve(&self, spec: &TransformSpec) -> Result<Arc<JsonTransformer>> {
        let transformer: Arc<JsonTransformer> = match spec {
            TransformSpec::Project { paths } => Arc::new(ProjectTransform::new(paths.as_slice())?),
            TransformSpec::Rename { fields } => Arc::new(RenameTransform::new(fields)),
            TransformSpec::Redact { rules } => Arc::new(RedactTransform::compile(rules)?),
            TransformSpec::Namespace { prefix, separator } => {
                Arc::new(NamespaceTransform::with_separator(prefix, separator))
            }
            TransformSpec::Flatten => Arc::new(FlattenTransform),
            TransformSpec::Template { template } => Arc::new(TemplateTransform::new(template)?),
            TransformSpec::Require { paths } => Arc::new(RequireTransform::new(paths.as_slice())?),
            TransformSpec::Registered { name } => {
                validate_name(name)?;
                self.get(name).ok_or_else(|| {
                    Error::invalid_argument(format!("no transformer registered as '{name}'"))
                })?
            }
        };
        Ok(transformer)
    }

    /// Build a chain from specs, appending in list order.
    ///
    /// # Errors
    ///
    /// Fails on the first spec that cannot be resolved; see [`Self::resolve`].
    pub fn build_chain(&self, specs: &[TransformSpec]) -> Result<JsonChain> {
        self.build_chain_with(&Chain::new(), specs)
    }

    /// Append transformers for `specs` onto `base`, leaving `base` untouched.
    ///
    /// # Errors
    ///
    /// Fails on the first spec that cannot be resolved; see [`Self::resolve`].
    pub fn build_chain_with(&self, base: &JsonChain, specs: &[TransformSpec]) -> Result<JsonChain> {
        let mut chain = base.clone();
        for spec in specs {
            chain = chain.append(self.resolve(spec)?);
        }
        Ok(chain)
    }
}

impl Default for TransformerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("transformer name must not be empty"));
    }
    Ok(())
}

/// Convenience to keep registered closures terse.
///
/// ```rust
/// use wrapchain::registry::json_fn;
/// use wrapchain_core::Transformer;
///
/// let t = json_fn("noop", Ok);
/// assert_eq!(t.name(), "noop");
/// ```
pub fn json_fn<F>(name: impl Into<String>, f: F) -> Arc<JsonTransformer>
where
    F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(wrapchain_core::from_fn(name, f))
}

// ============================================================================
// Tests
// ============================================================================
