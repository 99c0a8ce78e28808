//! Closure adapter for [`Transformer`].

use std::fmt;
use std::marker::PhantomData;

use crate::Transformer;

/// A named transformer backed by a closure.
///
/// Construct via [`from_fn`].
pub struct FnTransformer<T, E, F> {
    name: String,
    f: F,
    _marker: PhantomData<fn(T) -> Result<T, E>>,
}

/// Adapt a closure into a named [`Transformer`].
///
/// ```rust
/// use wrapchain_core::{Transformer, from_fn};
///
/// let upper = from_fn("upper", |s: String| Ok::<_, ()>(s.to_uppercase()));
/// assert_eq!(upper.name(), "upper");
/// assert_eq!(upper.transform("abc".to_string()), Ok("ABC".to_string()));
/// ```
#[must_use]
pub fn from_fn<T, E, F>(name: impl Into<String>, f: F) -> FnTransformer<T, E, F>
where
    F: Fn(T) -> Result<T, E> + Send + Sync,
{
    FnTransformer {
        name: name.into(),
        f,
        _marker: PhantomData,
    }
}

impl<T, E, F> Transformer<T, E> for FnTransformer<T, E, F>
where
    F: Fn(T) -> Result<T, E> + Send + Sync,
{
    fn transform(&self, target: T) -> Result<T, E> {
        (self.f)(target)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T, E, F> fmt::Debug for FnTransformer<T, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransformer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fn_transformer_uses_given_name() {
        let t = from_fn("noop", |n: u8| Ok::<_, ()>(n));
        assert_eq!(t.name(), "noop");
    }

    #[test]
    fn fn_transformer_propagates_closure_error() {
        let t = from_fn("reject", |_: u8| Err::<u8, _>("nope"));
        assert_eq!(t.transform(1), Err("nope"));
    }
}
