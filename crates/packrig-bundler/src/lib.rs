//! # packrig-bundler
//!
//! Configuration model and assembly for webpack-compatible bundlers.
//!
//! This crate knows how a bundler configuration is shaped and how to build
//! one from finalized [`packrig_config::Options`]:
//!
//! - [`Configuration`] is the typed configuration record, with [`Merge`]
//!   combining fragments field by field
//! - [`TypeProvider`] is the extension point for project kinds
//! - [`Assembler`] builds the base configuration
//! - [`diagnostics`] writes the generated configuration for inspection
//!
//! ```
//! use packrig_bundler::Assembler;
//! use packrig_config::{BuildContext, Environment, Options, PackageMetadata};
//!
//! let ctx = BuildContext::new(Environment::production()).with_cwd("/project");
//! let pkg = PackageMetadata::default();
//! let mut options = Options::baseline(&ctx, &pkg, "/project".into());
//! options.finalize(&ctx);
//!
//! let config = Assembler::new(&options, &pkg, &ctx.environment).build();
//! assert_eq!(config.output.filename.as_deref(), Some("index.js"));
//! assert!(config.plugin("TerserPlugin").is_none());
//! assert_eq!(config.optimization.minimizer[0].name, "TerserPlugin");
//! ```

pub mod assemble;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod provider;

pub use assemble::{Assembler, apply_extras, define_plugin};
pub use config::{
    Condition, Configuration, Devtool, Entry, Merge, ModuleRule, Optimization, Output, PluginSpec,
    RuleUse,
};
pub use diagnostics::DiagnosticFiles;
pub use error::{Error, Result};
pub use provider::{
    ConfigContext, DefaultOptionsContext, ProcessOptionsContext, TypeProvider, terser_options,
};
