//! TypeProvider trait re-export and the hook result types.

use indexmap::IndexMap;
use serde_json::Value;

// Re-export the trait and its contexts from packrig-bundler
pub use packrig_bundler::{
    ConfigContext, DefaultOptionsContext, ProcessOptionsContext, TypeProvider,
};
pub use packrig_bundler::{Error, Result};

/// What a provider adds to the base configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contribution {
    /// Fragment merged over the base configuration
    pub fragment: packrig_bundler::Configuration,
    /// Compile-time constants for a `DefinePlugin`
    pub defines: IndexMap<String, Value>,
}
