//! wrapchain Library
//!
//! Ordered transformer chains applied to JSON documents.
//!
//! # Features
//!
//! - **Chains**: immutable, ordered composition of transformers
//!   (re-exported from `wrapchain-core`)
//! - **Built-in transformers**: project, rename, redact, namespace,
//!   flatten, template, require
//! - **Registry**: reference custom Rust transformers by name from YAML
//! - **Tracing**: opt-in per-transformer logging via [`trace::traced`]
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use wrapchain::registry::TransformerRegistry;
//! use wrapchain::transform::TransformSpec;
//!
//! let registry = TransformerRegistry::new();
//! let chain = registry
//!     .build_chain(&[
//!         TransformSpec::Require { paths: vec!["id".into()] },
//!         TransformSpec::Flatten,
//!     ])
//!     .unwrap();
//!
//! let out = chain.wrap(json!({"id": 1, "meta": {"v": 2}})).unwrap();
//! assert_eq!(out, json!({"id": 1, "meta.v": 2}));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod trace;
pub mod transform;

pub use error::{Error, Result};
pub use wrapchain_core::{Chain, Transformer, from_fn};

use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// A transformer over JSON documents.
pub type JsonTransformer = dyn Transformer<Value, Error>;

/// A chain of JSON transformers.
pub type JsonChain = Chain<Value, Error>;

/// Setup tracing/logging
///
/// `RUST_LOG` takes precedence over `level`. `format` of `"json"` selects
/// JSON lines; anything else prints human-readable text.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| Error::Config(format!("Invalid log level '{level}': {e}")))?;

    let subscriber = tracing_subscriber::registry().with(filter);

    match format {
        Some("json") => subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        _ => subscriber
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    }
    .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))
}
