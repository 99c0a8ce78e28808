//! Tracing decorator for transformers.
//!
//! The chain itself never logs. Wrap a chain with [`traced`] to get one
//! `debug` event per applied transformer and a `warn` event for the one
//! that failed, without changing what `wrap` returns.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};
use wrapchain_core::{Chain, Transformer};

/// A transformer that logs around an inner transformer.
pub struct Traced<T, E> {
    inner: Arc<dyn Transformer<T, E>>,
    position: usize,
}

impl<T, E> Traced<T, E> {
    /// Decorate `inner`, which sits at `position` in its chain.
    #[must_use]
    pub fn new(inner: Arc<dyn Transformer<T, E>>, position: usize) -> Self {
        Self { inner, position }
    }
}

impl<T, E: Display> Transformer<T, E> for Traced<T, E> {
    fn transform(&self, target: T) -> Result<T, E> {
        let start = Instant::now();
        let result = self.inner.transform(target);
        let elapsed_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);

        match &result {
            Ok(_) => debug!(
                transformer = self.inner.name(),
                position = self.position,
                elapsed_us,
                "Transformer applied"
            ),
            Err(e) => warn!(
                transformer = self.inner.name(),
                position = self.position,
                elapsed_us,
                error = %e,
                "Transformer failed"
            ),
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Return a new chain with every transformer of `chain` decorated by
/// [`Traced`]. `chain` itself is left untouched.
#[must_use]
pub fn traced<T, E>(chain: &Chain<T, E>) -> Chain<T, E>
where
    T: 'static,
    E: Display + 'static,
{
    chain
        .iter()
        .enumerate()
        .map(|(position, t)| {
            Arc::new(Traced::new(Arc::clone(t), position)) as Arc<dyn Transformer<T, E>>
        })
        .collect()
}
