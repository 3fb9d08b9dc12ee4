//! Static web application project type.

use packrig_bundler::assemble::{IMAGE_PATTERN, STYLE_PATTERN};
use packrig_bundler::{Configuration, Entry, ModuleRule, PluginSpec, RuleUse};
use packrig_config::Options;
use serde_json::{Map, Value, json};

use crate::provider::{
    ConfigContext, DefaultOptionsContext, ProcessOptionsContext, Result, TypeProvider,
};

/// Browser applications rendered into a generated HTML page
///
/// This type configures builds for static sites:
/// - Targets `web` and emits an `index.html` through `HtmlWebpackPlugin`
/// - Extracts CSS into its own file unless `createCssFile` is off
/// - Hashes file names for cache busting in production
/// - Serves with hot reloading in development when a `port` is set
#[derive(Default)]
pub struct HtmlProvider;

/// Page-level settings a specialized web type may adjust before the
/// configuration is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub title: String,
    pub meta: Map<String, Value>,
    pub image_rule: ModuleRule,
}

impl HtmlProvider {
    pub fn page(&self, ctx: &ConfigContext<'_>) -> Page {
        let mut meta = Map::new();
        meta.insert(
            "viewport".into(),
            json!("width=device-width, initial-scale=1, shrink-to-fit=no"),
        );
        if let Some(description) = ctx.description() {
            meta.insert("description".into(), Value::String(description));
        }

        Page {
            title: ctx.title(),
            meta,
            image_rule: image_rule(ctx.options),
        }
    }

    /// Build the fragment for `page`.
    pub fn page_config(&self, ctx: &ConfigContext<'_>, page: Page) -> Configuration {
        let options = ctx.options;
        let hashed = options.content_hash.unwrap_or(!options.development);
        let public_path = public_path(options);

        let mut config = Configuration {
            target: Some("web".to_string()),
            ..Default::default()
        };
        config.output.public_path = Some(public_path.clone());
        if hashed {
            config.output.filename = Some("[name].[contenthash:8].js".to_string());
            config
                .output
                .extra
                .insert("chunkFilename".into(), json!("[id].[contenthash:8].js"));
        }

        let mut html = Map::new();
        html.insert("title".into(), Value::String(page.title));
        html.insert("meta".into(), Value::Object(page.meta));
        if let Some(locale) = &options.locale {
            html.insert("lang".into(), Value::String(locale.clone()));
        }
        html.insert("inject".into(), Value::Bool(true));
        html.insert("minify".into(), Value::Bool(!options.development));
        if options.inline_source {
            html.insert("inlineSource".into(), json!(r"\.(js|css)$"));
        }
        config
            .plugins
            .push(PluginSpec::with_options("HtmlWebpackPlugin", html));
        if options.inline_source {
            config
                .plugins
                .push(PluginSpec::new("HtmlWebpackInlineSourcePlugin"));
        }

        config.module.rules.push(style_rule(options.create_css_file));
        if options.create_css_file {
            let filename = if hashed {
                "[name].[contenthash:8].css"
            } else {
                "[name].css"
            };
            config.plugins.push(PluginSpec::with_options(
                "MiniCssExtractPlugin",
                json!({ "filename": filename }),
            ));
        }
        config.module.rules.push(page.image_rule);

        if options.hot {
            apply_hot_reloading(&mut config, ctx, &public_path);
        }

        config
    }
}

impl TypeProvider for HtmlProvider {
    fn name(&self) -> &str {
        "html"
    }

    fn default_options(&self, _ctx: &DefaultOptionsContext<'_>) -> Map<String, Value> {
        let mut defaults = Map::new();
        defaults.insert("inlineSource".to_string(), Value::Bool(false));
        defaults
    }

    fn process_options(&self, options: &mut Options, _ctx: &ProcessOptionsContext<'_>) {
        options.hot = options.development && options.port.is_some();
        options.content_hash.get_or_insert(!options.development);
    }

    fn contribute_config(&self, ctx: &ConfigContext<'_>) -> Result<Configuration> {
        Ok(self.page_config(ctx, self.page(ctx)))
    }
}

/// `publicPath` option, the dev server URL when hot reloading, otherwise `/`
pub fn public_path(options: &Options) -> String {
    if let Some(path) = &options.public_path {
        return path.clone();
    }
    match options.port {
        Some(port) if options.hot => format!("http://localhost:{port}/"),
        _ => "/".to_string(),
    }
}

pub fn image_rule(options: &Options) -> ModuleRule {
    let name = if options.content_hash.unwrap_or(!options.development) {
        "[name].[contenthash:8].[ext]"
    } else {
        "[name].[ext]"
    };
    ModuleRule::test(IMAGE_PATTERN)
        .loader("url-loader")
        .options(json!({ "limit": 4096, "name": name }))
}

fn style_rule(extract: bool) -> ModuleRule {
    let first = if extract {
        RuleUse::Loader("MiniCssExtractPlugin.loader".to_string())
    } else {
        RuleUse::Loader("style-loader".to_string())
    };
    ModuleRule::test(STYLE_PATTERN).uses([first, RuleUse::from("css-loader")])
}

fn apply_hot_reloading(config: &mut Configuration, ctx: &ConfigContext<'_>, public_path: &str) {
    let Some(port) = ctx.options.port else {
        return;
    };

    let mut entries = vec![
        "react-hot-loader/patch".to_string(),
        format!("webpack-dev-server/client?http://localhost:{port}/"),
        "webpack/hot/only-dev-server".to_string(),
    ];
    if let Some(entry) = &ctx.base.entry {
        entries.extend(entry.modules().into_iter().map(str::to_string));
    }
    config.entry = Some(Entry::Many(entries));

    config.dev_server = Some(json!({
        "publicPath": public_path,
        "port": port,
        "hot": true,
        "overlay": true,
        "headers": { "Access-Control-Allow-Origin": "*" },
        "historyApiFallback": { "verbose": true, "disableDotRule": false },
    }));
    config.watch = Some(true);
    config.watch_options.ignored = [ctx.from_root("dist"), ctx.from_root(".git")]
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    config
        .resolve
        .alias
        .insert("react-dom".into(), "@hot-loader/react-dom".into());
    config.plugins.push(PluginSpec::new("LogWatcherPlugin"));
}
