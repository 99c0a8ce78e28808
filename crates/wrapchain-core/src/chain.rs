//! `Chain` — an ordered, immutable list of transformers.
//!
//! # Execution Model
//!
//! - `wrap`: transformers applied **in order** (index 0 first); the first
//!   error short-circuits and is returned unchanged.
//! - `append` adds an outer transformer, `prepend` an inner one. Both
//!   return a new chain and leave the receiver untouched.

use std::fmt;
use std::sync::Arc;

use crate::Transformer;

/// An ordered, immutable chain of transformers.
///
/// Cloning is cheap: clones share the same backing storage, which is never
/// mutated after construction.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use wrapchain_core::{Chain, from_fn};
///
/// let base: Chain<String, ()> =
///     Chain::new().append(Arc::new(from_fn("a", |s: String| Ok::<_, ()>(s + "a"))));
/// let extended = base.prepend(Arc::new(from_fn("b", |s: String| Ok::<_, ()>(s + "b"))));
///
/// assert_eq!(base.wrap(String::new()), Ok("a".to_string()));
/// assert_eq!(extended.wrap(String::new()), Ok("ba".to_string()));
/// ```
pub struct Chain<T, E> {
    transformers: Arc<[Arc<dyn Transformer<T, E>>]>,
}

impl<T, E> Chain<T, E> {
    /// Create an empty chain. Wrapping with it is the identity.
    #[must_use]
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a chain from an ordered list of transformers.
    ///
    /// Elements at the beginning of the list are applied first, i.e. they end
    /// up innermost. The list is moved into the chain, so no alias to it can
    /// outlive this call.
    #[must_use]
    pub fn from_vec(transformers: Vec<Arc<dyn Transformer<T, E>>>) -> Self {
        Self {
            transformers: transformers.into(),
        }
    }

    /// Add a transformer to the **beginning** of the chain, so it is applied
    /// before every transformer already present.
    #[must_use]
    pub fn prepend(&self, transformer: Arc<dyn Transformer<T, E>>) -> Self {
        let mut next = Vec::with_capacity(self.transformers.len() + 1);
        next.push(transformer);
        next.extend(self.transformers.iter().cloned());
        Self::from_vec(next)
    }

    /// Add a transformer to the **end** of the chain, so it is applied after
    /// every transformer already present.
    #[must_use]
    pub fn append(&self, transformer: Arc<dyn Transformer<T, E>>) -> Self {
        let mut next = Vec::with_capacity(self.transformers.len() + 1);
        next.extend(self.transformers.iter().cloned());
        next.push(transformer);
        Self::from_vec(next)
    }

    /// Fold `target` through every transformer in order.
    ///
    /// # Errors
    ///
    /// Returns the first transformer error as-is. Transformers after the
    /// failing one are not invoked; effects of the ones before it are not
    /// undone.
    pub fn wrap(&self, target: T) -> Result<T, E> {
        self.transformers
            .iter()
            .try_fold(target, |acc, t| t.transform(acc))
    }

    /// Number of transformers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    /// Returns `true` if the chain has no transformers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Iterate the transformers in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Transformer<T, E>>> {
        self.transformers.iter()
    }

    /// Transformer names in application order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.transformers.iter().map(|t| t.name()).collect()
    }
}

impl<T, E> Clone for Chain<T, E> {
    fn clone(&self) -> Self {
        Self {
            transformers: Arc::clone(&self.transformers),
        }
    }
}

impl<T, E> Default for Chain<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> FromIterator<Arc<dyn Transformer<T, E>>> for Chain<T, E> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Transformer<T, E>>>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T, E> IntoIterator for &'a Chain<T, E> {
    type Item = &'a Arc<dyn Transformer<T, E>>;
    type IntoIter = std::slice::Iter<'a, Arc<dyn Transformer<T, E>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.transformers.iter()
    }
}

impl<T, E> fmt::Debug for Chain<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("transformers", &self.names())
            .finish()
    }
}

/// Chains nest: an inner chain runs as a single step of the outer one.
impl<T, E> Transformer<T, E> for Chain<T, E> {
    fn transform(&self, target: T) -> Result<T, E> {
        self.wrap(target)
    }

    fn name(&self) -> &str {
        "chain"
    }
}

// ============================================================================
// Tests
// ============================================================================
