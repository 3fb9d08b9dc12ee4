//! Node.js project type.

use indexmap::IndexMap;
use packrig_bundler::assemble::MEDIA_PATTERN;
use packrig_bundler::{Configuration, ModuleRule, terser_options};
use serde_json::{Map, Value, json};

use crate::provider::{ConfigContext, DefaultOptionsContext, Result, TypeProvider};

/// Node.js services
///
/// This type configures builds for the Node.js runtime:
/// - Targets `node` and leaves `__dirname`/`__filename` alone
/// - Keeps `process.env.NODE_ENV` untouched at build time
/// - Inlines binary assets as buffers
/// - Minifies with top-level mangling
#[derive(Default)]
pub struct NodeProvider;

impl TypeProvider for NodeProvider {
    fn name(&self) -> &str {
        "node"
    }

    fn default_options(&self, ctx: &DefaultOptionsContext<'_>) -> Map<String, Value> {
        let mut additional = Map::new();
        additional.insert("toplevel".to_string(), Value::Bool(true));

        let mut defaults = Map::new();
        defaults.insert(
            "terserOptions".to_string(),
            Value::Object(terser_options(additional, ctx.ci)),
        );
        defaults
    }

    fn contribute_config(&self, _ctx: &ConfigContext<'_>) -> Result<Configuration> {
        let mut config = Configuration {
            target: Some("node".to_string()),
            node: Some(json!({
                "__dirname": false,
                "__filename": false,
            })),
            ..Default::default()
        };
        config.optimization.node_env = Some(Value::Bool(false));
        config
            .module
            .rules
            .push(ModuleRule::test(MEDIA_PATTERN).uses(["buffer-loader"]));
        Ok(config)
    }

    fn defines(&self, _ctx: &ConfigContext<'_>) -> IndexMap<String, Value> {
        let mut defines = IndexMap::new();
        defines.insert("process.browser".to_string(), Value::Bool(false));
        defines
    }
}
