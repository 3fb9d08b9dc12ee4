//! # packrig
//!
//! Generate webpack-compatible bundler configurations from package
//! metadata.
//!
//! A project declares its kind (`lib`, `node`, `cli`, `html` or `webapp`)
//! and options in `package.json` under the `packrig` key. [`generate`]
//! layers those options over the kind's defaults, assembles a base
//! configuration and merges the kind's own fragment on top.
//!
//! ```no_run
//! use packrig::{BuildContext, Request, generate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BuildContext::from_env().with_cwd("./my-service");
//! let generated = generate(Request::new(ctx).with_option("type", "node"))?;
//!
//! println!("{}", serde_json::to_string_pretty(&generated.config)?);
//! # Ok(()) }
//! ```

mod generate;

pub use generate::{Generated, Request, configure, generate};

pub use packrig_bundler::{Configuration, DiagnosticFiles, Error, Result, TypeProvider};
pub use packrig_config::{BuildContext, Environment, Options, PackageMetadata};
pub use packrig_target::{ProviderSelector, Registry};

pub use packrig_bundler as bundler;
pub use packrig_config as config;
pub use packrig_target as target;
