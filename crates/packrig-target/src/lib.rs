//! # packrig-target
//!
//! Type providers for packrig.
//!
//! This crate provides the built-in project types (`lib`, `node`, `cli`,
//! `html`, `webapp`) and the [`Registry`] that maps a kind name to a
//! provider. Specialized types delegate to their parent explicitly:
//! `cli` builds on `node` and `webapp` builds on `html`.

pub mod provider;
pub mod registry;
pub mod targets;

pub use provider::{Contribution, TypeProvider};
pub use registry::{BoundProvider, DEFAULT_KIND, ProviderFactory, ProviderSelector, Registry};
pub use targets::*;
