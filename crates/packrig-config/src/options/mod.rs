//! Typed build options.
//!
//! Every recognized option is a field of [`Options`]. Keys use the
//! camelCase spelling found in `package.json`; unknown keys are rejected.

mod switch;

use std::path::{Path, PathBuf};

use path_clean::clean;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::context::BuildContext;
use crate::package::PackageMetadata;

pub use switch::{CleanSetting, IncludePattern, IncludeSetting, Switch};

/// Compression passes used when no minifier settings are given
pub const DEFAULT_COMPRESS_PASSES: u64 = 5;

pub const DEFAULT_LICENSE_FILE: &str = "thirdPartyLicenses.txt";

type Settings = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Project root; relative paths in other options resolve against it
    pub package_root: PathBuf,

    /// Folder containing the entry module, relative to `package_root`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_folder: Option<String>,

    /// Development build (no minification, eval source maps)
    pub development: bool,

    /// Project kind name, e.g. `node` or `webapp`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Output directory; defaults to `dist/package/<environment>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Clean before build; defaults to `!development`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean: Option<CleanSetting>,

    /// Package banner comment; defaults to `!development`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<Switch<Settings>>,

    /// Static files copied into the output directory; `false` copies nothing
    #[serde(default)]
    pub include: IncludeSetting,

    /// Combined third-party license file; `false` disables license bundling
    #[serde(default)]
    pub license_file_name: Switch<String>,

    /// Minifier settings; `false` disables minification
    #[serde(default)]
    pub terser_options: Switch<Settings>,

    #[serde(default)]
    pub terser_plugin_options: Settings,

    /// Emit a publishable `package.json`
    #[serde(default)]
    pub publishimo: Switch<Settings>,

    /// Emit API documentation
    #[serde(default)]
    pub documentation: Switch<Settings>,

    /// Keep declared dependencies out of the bundle
    #[serde(default)]
    pub node_externals: bool,

    /// Diagnostic output; `true` uses the default location, a path names the
    /// config file relative to the working directory
    #[serde(default)]
    pub config_output: Switch<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub robots: Switch<Settings>,

    /// App icon; defaults to `icon.png` in the package root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default)]
    pub create_css_file: bool,

    #[serde(default)]
    pub optimize_css: Switch<Settings>,

    /// Interpreter line for executables, e.g. `/usr/bin/env node`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashbang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,

    /// Drop locale bundles pulled in by `moment`
    #[serde(default)]
    pub exclude_locale: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_site_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_author_handle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(default)]
    pub sitemap: Switch<Settings>,

    /// Offline support through a service worker
    #[serde(default)]
    pub offline: bool,

    /// Web app manifest
    #[serde(default)]
    pub pwa: Switch<Settings>,

    #[serde(default)]
    pub inline_source: bool,

    /// Dev server port; enables hot reloading for web kinds in development
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Set by web kinds when hot reloading is active
    #[serde(default)]
    pub hot: bool,

    /// Hash output file names for cache busting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<bool>,

    /// Global name for library bundles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_name: Option<String>,

    /// Configuration fragment merged into every build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,

    /// Configuration fragment merged into production builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_production: Option<Value>,

    /// Configuration fragment merged into development builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_development: Option<Value>,
}

impl Options {
    /// The lowest-precedence option layer.
    pub fn baseline(ctx: &BuildContext, pkg: &PackageMetadata, package_root: PathBuf) -> Self {
        let mut terser = Settings::new();
        terser.insert(
            "compress".to_string(),
            json!({ "passes": DEFAULT_COMPRESS_PASSES }),
        );

        let mut terser_plugin = Settings::new();
        terser_plugin.insert("extractComments".to_string(), Value::Bool(false));

        Self {
            package_root,
            source_folder: Some("src".to_string()),
            development: !ctx.environment.is_production(),
            kind: None,
            out_dir: None,
            clean: None,
            banner: None,
            include: vec!["readme.*", "license.*"].into(),
            license_file_name: Switch::Custom(DEFAULT_LICENSE_FILE.to_string()),
            terser_options: Switch::Custom(terser),
            terser_plugin_options: terser_plugin,
            publishimo: Switch::Flag(false),
            documentation: Switch::Flag(false),
            node_externals: true,
            config_output: Switch::Flag(ctx.config_output),
            title: pkg.title.clone(),
            robots: Switch::Flag(false),
            icon: None,
            domain: pkg.domain.clone(),
            create_css_file: true,
            optimize_css: Switch::Flag(true),
            hashbang: None,
            background_color: Some("000000".to_string()),
            theme_color: Some("04AAE3".to_string()),
            exclude_locale: true,
            app_description: None,
            twitter_site_handle: None,
            twitter_author_handle: None,
            locale: Some("en-US".to_string()),
            sitemap: Switch::Flag(false),
            offline: false,
            pwa: Switch::Flag(false),
            inline_source: false,
            port: None,
            public_path: None,
            hot: false,
            content_hash: None,
            library_name: None,
            extra: None,
            extra_production: None,
            extra_development: None,
        }
    }

    /// Fill in defaults that depend on other merged options.
    ///
    /// After this call `package_root`, `out_dir` and a `configOutput` path
    /// are absolute and `clean` and `banner` are set. A relative
    /// `configOutput` path resolves against the working directory.
    pub fn finalize(&mut self, ctx: &BuildContext) {
        self.package_root = absolutize(&ctx.cwd, &self.package_root);

        match self.out_dir.take() {
            Some(dir) if dir.is_relative() => {
                let resolved = self.resolve(&dir);
                tracing::debug!(
                    "Rewriting outDir {} to {}",
                    dir.display(),
                    resolved.display()
                );
                self.out_dir = Some(resolved);
            }
            Some(dir) => self.out_dir = Some(clean(dir)),
            None => {
                let default_dir = Path::new("dist")
                    .join("package")
                    .join(ctx.environment.as_str());
                self.out_dir = Some(self.resolve(default_dir));
            }
        }

        if let Switch::Custom(path) = &mut self.config_output {
            *path = absolutize(&ctx.cwd, path);
        }

        let production = !self.development;
        self.clean.get_or_insert(CleanSetting::Enabled(production));
        self.banner.get_or_insert(Switch::Flag(production));
    }

    /// Resolve a path against the package root
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        clean(self.package_root.join(path))
    }

    pub fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| self.resolve("dist"))
    }

    /// Folder searched for the entry module
    pub fn entry_folder(&self) -> PathBuf {
        match self.source_folder.as_deref() {
            Some(folder) if !folder.is_empty() => self.resolve(folder),
            _ => self.package_root.clone(),
        }
    }

    /// Enabled cleaning setting, if any
    pub fn clean_setting(&self) -> Option<&CleanSetting> {
        self.clean.as_ref().filter(|setting| setting.is_enabled())
    }

    /// Name of the combined license file, if license bundling is on
    pub fn license_file(&self) -> Option<&str> {
        match &self.license_file_name {
            Switch::Flag(false) => None,
            Switch::Flag(true) => Some(DEFAULT_LICENSE_FILE),
            Switch::Custom(name) => Some(name.as_str()).filter(|name| !name.is_empty()),
        }
    }

    pub fn banner_enabled(&self) -> bool {
        self.banner.as_ref().is_some_and(Switch::is_enabled)
    }

    pub fn icon_path(&self) -> PathBuf {
        match &self.icon {
            Some(icon) => self.resolve(icon),
            None => self.resolve("icon.png"),
        }
    }
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_relative() {
        cwd.join(path)
    } else {
        path.to_path_buf()
    };
    let absolute = std::path::absolute(&joined).unwrap_or(joined);
    clean(absolute)
}
