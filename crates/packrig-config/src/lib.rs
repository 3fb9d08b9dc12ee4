//! # packrig-config
//!
//! Build options, package metadata and option layering for packrig.
//!
//! Options are resolved from four layers, lowest precedence first:
//!
//! 1. the hard-coded baseline ([`Options::baseline`])
//! 2. defaults contributed by the selected type provider
//! 3. options declared in `package.json` under the `packrig` key
//! 4. overrides supplied by the caller
//!
//! ```
//! use packrig_config::{BuildContext, Environment, OptionLayers, Options, PackageMetadata};
//! use serde_json::json;
//!
//! let ctx = BuildContext::new(Environment::production()).with_cwd("/project");
//! let pkg = PackageMetadata::default();
//! let baseline = Options::baseline(&ctx, &pkg, "/project".into());
//!
//! let overrides = json!({ "locale": "de-DE" });
//! let options = OptionLayers::default()
//!     .with_overrides(overrides.as_object().cloned().unwrap_or_default())
//!     .resolve(&baseline)
//!     .unwrap();
//!
//! assert_eq!(options.locale.as_deref(), Some("de-DE"));
//! assert!(!options.development);
//! ```

pub mod context;
pub mod error;
pub mod layering;
pub mod options;
pub mod package;

pub use context::{BuildContext, Environment};
pub use error::{ConfigError, Result};
pub use layering::OptionLayers;
pub use options::{CleanSetting, IncludePattern, IncludeSetting, Options, Switch};
pub use package::{find_package_root, Author, DeclaredOptions, PackageMetadata};
