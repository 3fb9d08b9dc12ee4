//! Configuration assembly.
//!
//! [`Assembler`] turns finalized options into the base configuration: a
//! fixed skeleton (entry, loaders, output, limits) followed by the
//! conditional fragments in [`fragments`]. Provider fragments and the
//! user's extra fragments are merged on top by the caller.

mod entry;
mod fragments;
mod rules;

use indexmap::IndexMap;
use packrig_config::{Environment, Options, PackageMetadata};
use serde_json::{Value, json};

use crate::config::{Configuration, Merge, Performance, PluginSpec};
use crate::error::Result;

pub use entry::{ENTRY_EXTENSIONS, resolve_entry};
pub use rules::{IMAGE_PATTERN, MEDIA_PATTERN, SCRIPT_PATTERN, STYLE_PATTERN, base_rules};

pub(crate) use fragments::plugin_with_settings;

pub const RESOLVE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts", ".tsx", ".json", ".yml"];

/// Entry point and single asset size limit (4 MB)
pub const PERFORMANCE_LIMIT: u64 = 4_000_000;

pub const OUTPUT_FILENAME: &str = "index.js";

pub struct Assembler<'a> {
    options: &'a Options,
    pkg: &'a PackageMetadata,
    environment: &'a Environment,
    executable: bool,
}

impl<'a> Assembler<'a> {
    pub fn new(options: &'a Options, pkg: &'a PackageMetadata, environment: &'a Environment) -> Self {
        Self {
            options,
            pkg,
            environment,
            executable: false,
        }
    }

    /// Mark the project as an executable program
    pub fn executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// The skeleton without conditional fragments.
    pub fn skeleton(&self) -> Configuration {
        let development = self.options.development;
        let entry_folder = self.options.entry_folder();
        let entry = resolve_entry(&entry_folder, self.environment);

        let mut config = Configuration {
            entry: Some(entry.into()),
            context: Some(self.options.package_root.clone()),
            mode: Some(if development { "development" } else { "production" }.to_string()),
            devtool: Some(if development { "eval-source-map" } else { "source-map" }.into()),
            plugins: vec![PluginSpec::with_options(
                "LoaderOptionsPlugin",
                json!({ "debug": development, "minimize": !development }),
            )],
            stats: Some(json!({
                "all": false,
                "assets": true,
                "assetsSort": "!size",
                "excludeAssets": r"\.(map|d\.ts)$",
                "colors": true,
                "warnings": true,
                "errors": true,
                "errorDetails": true,
            })),
            performance: Some(Performance::limit(PERFORMANCE_LIMIT)),
            ..Default::default()
        };
        config.resolve.extensions = RESOLVE_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        config.module.rules = base_rules(&entry_folder);
        config.output.path = Some(self.options.out_dir());
        config.output.filename = Some(OUTPUT_FILENAME.to_string());
        config
    }

    /// The skeleton with every applicable fragment appended.
    pub fn build(&self) -> Configuration {
        let mut config = self.skeleton();
        for (name, fragment) in fragments::FRAGMENTS {
            tracing::trace!("Applying {} fragment", name);
            fragment(&mut config, self);
        }
        tracing::debug!("Base config: {:?}", config);
        config
    }
}

/// `DefinePlugin` for a set of compile-time constants
pub fn define_plugin(defines: IndexMap<String, Value>) -> PluginSpec {
    PluginSpec::with_options(
        "DefinePlugin",
        Value::Object(defines.into_iter().collect()),
    )
}

/// Merge `extra`, then `extraProduction` or `extraDevelopment` depending on
/// the build, into `config`.
///
/// # Errors
///
/// Returns `Error::InvalidFragment` naming the fragment that does not have
/// the shape of a configuration.
pub fn apply_extras(config: &mut Configuration, options: &Options) -> Result<()> {
    let scoped = if options.development {
        ("extraDevelopment", &options.extra_development)
    } else {
        ("extraProduction", &options.extra_production)
    };

    let fragments = [("extra", &options.extra), scoped]
        .into_iter()
        .filter_map(|(name, fragment)| {
            fragment
                .as_ref()
                .filter(|value| !value.is_null())
                .map(|value| (name, value))
        });

    for (index, (name, fragment)) in fragments.enumerate() {
        tracing::debug!("Extra config #{} ({}): {}", index + 1, name, fragment);
        config.merge(Configuration::from_fragment(name, fragment.clone())?);
    }
    Ok(())
}
