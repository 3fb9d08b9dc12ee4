//! Progressive web app project type.

use indexmap::IndexMap;
use packrig_bundler::assemble::IMAGE_PATTERN;
use packrig_bundler::{Configuration, Error, Merge, ModuleRule, PluginSpec, RuleUse};
use packrig_config::{Options, Switch};
use serde_json::{Map, Value, json};

use super::html::{HtmlProvider, public_path};
use crate::provider::{
    ConfigContext, DefaultOptionsContext, ProcessOptionsContext, Result, TypeProvider,
};

const ICON_SIZES: &[u32] = &[16, 24, 32, 64, 80, 92, 128, 192, 256, 384, 512];

/// Size of the icon advertised in social media meta tags
const META_ICON_SIZE: u32 = 384;

/// Installable web apps: an HTML build with icons, a manifest and offline
/// support. Requires an app icon.
#[derive(Default)]
pub struct WebappProvider {
    parent: HtmlProvider,
}

impl TypeProvider for WebappProvider {
    fn name(&self) -> &str {
        "webapp"
    }

    fn default_options(&self, ctx: &DefaultOptionsContext<'_>) -> Map<String, Value> {
        let mut defaults = self.parent.default_options(ctx);
        for key in ["sitemap", "offline", "pwa", "banner"] {
            defaults.insert(key.to_string(), Value::Bool(true));
        }
        defaults
    }

    fn process_options(&self, options: &mut Options, ctx: &ProcessOptionsContext<'_>) {
        self.parent.process_options(options, ctx);
    }

    fn contribute_config(&self, ctx: &ConfigContext<'_>) -> Result<Configuration> {
        let options = ctx.options;
        let icon = options.icon_path();
        tracing::debug!("Using icon {}", icon.display());
        if !icon.is_file() {
            return Err(Error::MissingAsset { path: icon });
        }

        let mut page = self.parent.page(ctx);
        if !options.development {
            page.meta.extend(social_meta(ctx));
            page.image_rule = optimized_image_rule(page.image_rule);
        }
        let mut config = self.parent.page_config(ctx, page);

        let public_path = public_path(options);
        let mut own = Configuration::default();
        own.plugins.push(PluginSpec::with_options(
            "HtmlFaviconPlugin",
            json!({ "href": url_join(&public_path, "icon_128x128.png") }),
        ));

        if !options.development {
            if let Some(manifest) = manifest_options(ctx, &icon.to_string_lossy()) {
                own.plugins
                    .push(PluginSpec::with_options("WebpackPwaManifest", manifest));
            }

            match &options.domain {
                Some(domain) => own.plugins.extend(domain_plugins(options, domain)),
                None => tracing::debug!("No domain known, skipping CNAME, robots.txt and sitemap"),
            }

            if let Some(css) = optimize_css_options(&options.optimize_css) {
                own.plugins
                    .push(PluginSpec::with_options("OptimizeCssAssetsPlugin", css));
            }

            if options.offline {
                own.plugins.push(PluginSpec::with_options(
                    "OfflinePlugin",
                    offline_options(ctx),
                ));
            }
        }

        config.merge(own);
        Ok(config)
    }

    fn defines(&self, ctx: &ConfigContext<'_>) -> IndexMap<String, Value> {
        self.parent.defines(ctx)
    }
}

/// Prefix `value` with `prefix` unless it already starts with it
fn ensure_start(value: &str, prefix: &str) -> String {
    if value.starts_with(prefix) {
        value.to_string()
    } else {
        format!("{prefix}{value}")
    }
}

fn url_join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn theme_color(options: &Options) -> String {
    ensure_start(options.theme_color.as_deref().unwrap_or("00CC00"), "#")
}

fn background_color(options: &Options) -> String {
    ensure_start(options.background_color.as_deref().unwrap_or("000000"), "#")
}

fn social_meta(ctx: &ConfigContext<'_>) -> Map<String, Value> {
    let options = ctx.options;
    let title = ctx.title();
    let description = ctx.description();

    let mut meta = Map::new();
    meta.insert("HandheldFriendly".into(), json!(true));
    meta.insert("format-detection".into(), json!("telephone=no"));
    meta.insert("og:type".into(), json!("website"));
    meta.insert("og:determiner".into(), json!(""));
    meta.insert("twitter:card".into(), json!("summary"));
    meta.insert("og:title".into(), json!(title));
    meta.insert("twitter:title".into(), json!(title));
    if let Some(description) = description {
        meta.insert("og:description".into(), json!(description));
        meta.insert("twitter:description".into(), json!(description));
    }
    if let Some(author) = ctx.pkg.author_name() {
        meta.insert("author".into(), json!(author));
    }
    if let Some(locale) = &options.locale {
        meta.insert("og:locale".into(), json!(locale.replacen('-', "_", 1)));
    }

    let site = options
        .twitter_site_handle
        .as_deref()
        .or(options.twitter_author_handle.as_deref());
    if let Some(site) = site {
        meta.insert("twitter:site".into(), json!(ensure_start(site, "@")));
    }
    if let Some(author) = &options.twitter_author_handle {
        meta.insert("twitter:creator".into(), json!(ensure_start(author, "@")));
    }

    if let Some(domain) = options.domain.as_deref().filter(|_| options.pwa.is_enabled()) {
        let base_url = format!("https://{domain}");
        let image_url = url_join(
            &base_url,
            &format!("icon_{META_ICON_SIZE}x{META_ICON_SIZE}.png"),
        );
        meta.insert("og:url".into(), json!(base_url));
        meta.insert("og:image:width".into(), json!(META_ICON_SIZE));
        meta.insert("og:image:height".into(), json!(META_ICON_SIZE));
        meta.insert("og:image:type".into(), json!("image/png"));
        meta.insert("og:image".into(), json!(image_url));
        meta.insert("twitter:image".into(), json!(image_url));
    }
    meta
}

/// Images are optimized unless imported with `?raw`
fn optimized_image_rule(plain: ModuleRule) -> ModuleRule {
    let raw = RuleUse::Detailed {
        loader: plain.loader.clone().unwrap_or_else(|| "url-loader".into()),
        options: plain.options.clone(),
    };
    ModuleRule::test(IMAGE_PATTERN).one_of(vec![
        ModuleRule::any().resource_query(r"\?raw").uses([raw]),
        ModuleRule::any().loader("modern-image-loader"),
    ])
}

fn manifest_options(ctx: &ConfigContext<'_>, icon: &str) -> Option<Value> {
    let options = ctx.options;
    match &options.pwa {
        Switch::Flag(false) => None,
        Switch::Custom(custom) => Some(Value::Object(custom.clone())),
        Switch::Flag(true) => {
            let title = ctx.title();
            let start_url = match &options.domain {
                Some(domain) => format!("https://{domain}"),
                None => ".".to_string(),
            };
            Some(json!({
                "name": title,
                "description": ctx.description(),
                "orientation": "portrait",
                "display": "standalone",
                "inject": true,
                "fingerprints": false,
                "theme_color": theme_color(options),
                "background_color": background_color(options),
                "ios": {
                    "apple-mobile-web-app-title": title,
                    "apple-mobile-web-app-status-bar-style": "black-translucent",
                },
                "start_url": start_url,
                "publicPath": start_url,
                "icons": [{ "src": icon, "sizes": ICON_SIZES }],
            }))
        }
    }
}

fn domain_plugins(options: &Options, domain: &str) -> Vec<PluginSpec> {
    let mut plugins = vec![PluginSpec::with_options(
        "CnamePlugin",
        json!({ "domain": domain }),
    )];

    let robots = match options.robots.custom() {
        Some(custom) => Value::Object(custom.clone()),
        None => json!({
            "host": format!("https://{domain}"),
            "sitemap": format!("https://{domain}/sitemap.xml"),
        }),
    };
    plugins.push(PluginSpec::with_options("RobotsTxtPlugin", robots));

    if let Some(custom) = options.sitemap.settings() {
        let mut sitemap = Map::new();
        sitemap.insert("domain".into(), json!(domain));
        sitemap.extend(custom);
        plugins.push(PluginSpec::with_options("SitemapXmlPlugin", sitemap));
    }

    plugins
}

fn optimize_css_options(setting: &Switch<Map<String, Value>>) -> Option<Value> {
    match setting {
        Switch::Flag(false) => None,
        Switch::Custom(custom) => Some(Value::Object(custom.clone())),
        Switch::Flag(true) => Some(json!({
            "cssProcessorPluginOptions": {
                "preset": ["advanced", { "discardComments": { "removeAll": true } }],
            },
        })),
    }
}

fn offline_options(ctx: &ConfigContext<'_>) -> Value {
    json!({
        "safeToUseOptionalCaches": true,
        "appShell": "index.html",
        "caches": {
            "main": ["*.js", "*.css", "*.html", "manifest.json"],
            "additional": ["*.woff", "*.woff2", "*.jpg", "*.jpeg", "*.png", "*.webp"],
            "optional": [":rest:"],
        },
        "ServiceWorker": { "events": true },
        "AppCache": { "events": true },
        "excludes": ["**/*.txt", "CNAME"],
        "version": ctx.pkg.version.as_deref().unwrap_or("0.0.0"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_get_hash_prefix() {
        assert_eq!(ensure_start("04AAE3", "#"), "#04AAE3");
        assert_eq!(ensure_start("#04AAE3", "#"), "#04AAE3");
    }

    #[test]
    fn url_join_avoids_double_slashes() {
        assert_eq!(url_join("/", "icon.png"), "/icon.png");
        assert_eq!(
            url_join("https://example.com/", "/icon.png"),
            "https://example.com/icon.png"
        );
    }

    #[test]
    fn optimized_image_rule_keeps_raw_branch() {
        let rule = optimized_image_rule(
            ModuleRule::test(IMAGE_PATTERN).loader("url-loader"),
        );
        assert_eq!(rule.one_of.len(), 2);
        assert_eq!(rule.loaders(), ["url-loader", "modern-image-loader"]);
    }
}
