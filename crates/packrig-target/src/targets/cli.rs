//! Command line program project type.

use indexmap::IndexMap;
use packrig_bundler::{Configuration, Merge};
use packrig_config::Options;
use serde_json::{Map, Value};

use super::NodeProvider;
use crate::provider::{
    ConfigContext, DefaultOptionsContext, ProcessOptionsContext, Result, TypeProvider,
};

pub const DEFAULT_HASHBANG: &str = "/usr/bin/env node";

/// Command line programs: a Node.js build with an interpreter line
#[derive(Default)]
pub struct CliProvider {
    parent: NodeProvider,
}

impl TypeProvider for CliProvider {
    fn name(&self) -> &str {
        "cli"
    }

    fn default_options(&self, ctx: &DefaultOptionsContext<'_>) -> Map<String, Value> {
        let mut defaults = self.parent.default_options(ctx);
        defaults.insert(
            "hashbang".to_string(),
            Value::String(DEFAULT_HASHBANG.to_string()),
        );
        defaults
    }

    fn process_options(&self, options: &mut Options, ctx: &ProcessOptionsContext<'_>) {
        self.parent.process_options(options, ctx);
    }

    fn contribute_config(&self, ctx: &ConfigContext<'_>) -> Result<Configuration> {
        let mut config = self.parent.contribute_config(ctx)?;
        let mut own = Configuration::default();
        own.output.library_target = Some("commonjs2".to_string());
        config.merge(own);
        Ok(config)
    }

    fn defines(&self, ctx: &ConfigContext<'_>) -> IndexMap<String, Value> {
        self.parent.defines(ctx)
    }

    fn is_executable(&self) -> bool {
        true
    }
}
