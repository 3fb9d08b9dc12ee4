//! Type provider trait and hook contexts.
//!
//! A type provider specializes configuration generation for one project
//! kind (`lib`, `node`, `webapp`, ...). Generation calls its hooks in
//! this order:
//!
//! 1. [`TypeProvider::default_options`] contributes an option layer
//! 2. [`TypeProvider::process_options`] adjusts the merged options
//! 3. [`TypeProvider::contribute_config`] returns a fragment merged over
//!    the base configuration, and [`TypeProvider::defines`] supplies
//!    compile-time constants

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use packrig_config::options::DEFAULT_COMPRESS_PASSES;
use packrig_config::{Environment, Options, PackageMetadata};
use serde_json::{Map, Value, json};

use crate::config::Configuration;
use crate::error::Result;

/// Compression passes used on CI machines
pub const CI_COMPRESS_PASSES: u64 = 10;

pub struct DefaultOptionsContext<'a> {
    pub environment: &'a Environment,
    pub ci: bool,
}

pub struct ProcessOptionsContext<'a> {
    pub environment: &'a Environment,
    pub package_root: &'a Path,
    pub pkg: &'a PackageMetadata,
}

impl ProcessOptionsContext<'_> {
    pub fn from_root(&self, path: impl AsRef<Path>) -> PathBuf {
        self.package_root.join(path)
    }
}

pub struct ConfigContext<'a> {
    pub pkg: &'a PackageMetadata,
    pub environment: &'a Environment,
    pub options: &'a Options,
    /// Folder the entry module was looked up in
    pub entry_folder: &'a Path,
    /// The base configuration the fragment will be merged into
    pub base: &'a Configuration,
    pub ci: bool,
}

impl ConfigContext<'_> {
    pub fn from_root(&self, path: impl AsRef<Path>) -> PathBuf {
        self.options.resolve(path)
    }

    /// `title` option, then package title, then package name, then `Page`
    pub fn title(&self) -> String {
        self.options
            .title
            .as_deref()
            .or(self.pkg.title.as_deref())
            .or(self.pkg.name.as_deref())
            .unwrap_or("Page")
            .to_string()
    }

    /// `appDescription` option, then package description
    pub fn description(&self) -> Option<String> {
        self.options
            .app_description
            .as_deref()
            .or(self.pkg.description.as_deref())
            .map(str::to_string)
    }
}

/// Specialization of configuration generation for a project kind.
///
/// Variants extend a parent kind by holding the parent provider and calling
/// its hooks explicitly before adding their own contribution.
pub trait TypeProvider: Send + Sync {
    /// Kind name, e.g. `node`
    fn name(&self) -> &str;

    /// Option layer applied above the baseline and below declared options.
    fn default_options(&self, _ctx: &DefaultOptionsContext<'_>) -> Map<String, Value> {
        Map::new()
    }

    /// Adjust the merged options before the configuration is assembled.
    fn process_options(&self, _options: &mut Options, _ctx: &ProcessOptionsContext<'_>) {}

    /// Fragment merged on top of the base configuration.
    ///
    /// # Errors
    ///
    /// Fails when the kind requires a resource that is missing.
    fn contribute_config(&self, _ctx: &ConfigContext<'_>) -> Result<Configuration> {
        Ok(Configuration::default())
    }

    /// Compile-time constants; a non-empty map adds a `DefinePlugin`.
    fn defines(&self, _ctx: &ConfigContext<'_>) -> IndexMap<String, Value> {
        IndexMap::new()
    }

    /// Executables get an interpreter line and publish a `bin` entry.
    fn is_executable(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for dyn TypeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeProvider")
            .field("name", &self.name())
            .finish()
    }
}

/// Minifier settings for providers that tune compression.
///
/// Keys of `additional` replace the generated top-level keys.
pub fn terser_options(additional: Map<String, Value>, ci: bool) -> Map<String, Value> {
    let passes = if ci {
        CI_COMPRESS_PASSES
    } else {
        DEFAULT_COMPRESS_PASSES
    };

    let mut options = Map::new();
    options.insert(
        "compress".to_string(),
        json!({
            "passes": passes,
            "unsafe_comps": true,
            "unsafe_math": true,
            "unsafe_regexp": true,
            "unsafe_undefined": true,
        }),
    );
    options.insert(
        "output".to_string(),
        json!({
            "ecma": 8,
            "comments": "some",
        }),
    );
    options.extend(additional);
    options
}
