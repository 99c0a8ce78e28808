//! Ordered transformer chains.
//!
//! A [`Transformer`] maps a target to a (possibly new) target. A [`Chain`]
//! is an immutable, ordered list of transformers that collapses into one
//! composite transformation via [`Chain::wrap`].
//!
//! ```text
//! target ──▶ T[0] ──▶ T[1] ──▶ … ──▶ T[n-1] ──▶ target'
//!            (innermost)              (outermost)
//! ```
//!
//! The first transformer sees the raw target; the last one sees the target
//! closest to its final form. This crate performs no I/O and no logging;
//! surrounding systems layer those on by decorating transformers.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use wrapchain_core::{Chain, from_fn};
//!
//! let chain: Chain<i64, String> = Chain::new()
//!     .append(Arc::new(from_fn("double", |n: i64| Ok::<_, String>(n * 2))))
//!     .append(Arc::new(from_fn("inc", |n: i64| Ok::<_, String>(n + 1))));
//!
//! assert_eq!(chain.wrap(20), Ok(41));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod fn_transformer;

pub use chain::Chain;
pub use fn_transformer::{FnTransformer, from_fn};

/// A capability that maps a target value to a (possibly new) target value.
///
/// Implementations may return the target unchanged, modify it, or replace it
/// with a new value that wraps the original. Errors are returned to the
/// caller of [`Chain::wrap`] verbatim.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a chain can be shared across
/// threads. A transformer invoked concurrently on independent targets must
/// tolerate that; the chain adds no synchronisation of its own.
pub trait Transformer<T, E>: Send + Sync {
    /// Transform `target`, handing back the value the next transformer sees.
    ///
    /// # Errors
    ///
    /// Whatever the implementation decides; chains never inspect it.
    fn transform(&self, target: T) -> Result<T, E>;

    /// Diagnostic label. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
