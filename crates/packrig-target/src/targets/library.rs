//! Library project type.

use packrig_bundler::Configuration;
use packrig_config::Options;

use crate::provider::{ConfigContext, ProcessOptionsContext, Result, TypeProvider};

/// Library bundles
///
/// - Exposes the bundle as a UMD module
/// - The global name defaults to the camel-cased package name
pub struct LibraryProvider;

impl TypeProvider for LibraryProvider {
    fn name(&self) -> &str {
        "lib"
    }

    fn process_options(&self, options: &mut Options, ctx: &ProcessOptionsContext<'_>) {
        if options.library_name.is_none() {
            options.library_name = ctx.pkg.library_name();
        }
    }

    fn contribute_config(&self, ctx: &ConfigContext<'_>) -> Result<Configuration> {
        let mut config = Configuration::default();
        config.output.library = ctx.options.library_name.clone();
        config.output.library_target = Some("umd".to_string());
        config.output.global_object = Some("this".to_string());
        Ok(config)
    }
}
