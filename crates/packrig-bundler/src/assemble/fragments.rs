//! Conditional fragments of the base configuration.
//!
//! Each fragment inspects the finalized options and, when its condition
//! holds, appends plugins or fills in fields. [`FRAGMENTS`] fixes the order
//! in which they are applied, which is also the order plugins appear in.

use serde_json::{Map, Value, json};

use packrig_config::{CleanSetting, IncludePattern};

use super::Assembler;
use crate::config::{Configuration, PluginSpec};

type Fragment = fn(&mut Configuration, &Assembler<'_>);

pub(super) const FRAGMENTS: &[(&str, Fragment)] = &[
    ("clean", clean),
    ("development annotation", development_annotation),
    ("externals", externals),
    ("documentation", documentation),
    ("publishing metadata", publishing),
    ("banner", banner),
    ("copy", copy),
    ("hashbang", hashbang),
    ("minification", minification),
    ("licenses", licenses),
    ("locale exclusion", locale_exclusion),
];

fn clean(config: &mut Configuration, asm: &Assembler<'_>) {
    let Some(setting) = asm.options.clean_setting() else {
        return;
    };
    let options = match setting {
        CleanSetting::Custom(map) => Value::Object(map.clone()),
        CleanSetting::Patterns(patterns) => clean_patterns(patterns.iter().cloned()),
        CleanSetting::Enabled(_) => {
            clean_patterns([asm.options.out_dir().to_string_lossy().into_owned()])
        }
    };
    config
        .plugins
        .push(PluginSpec::with_options("CleanWebpackPlugin", options));
}

fn development_annotation(config: &mut Configuration, asm: &Assembler<'_>) {
    if !asm.options.development {
        return;
    }
    config.output.auxiliary_comment = Some(json!({
        "root": "[Exposing Section] root",
        "commonjs": "[Exposing Section] commonjs",
        "commonjs2": "[Exposing Section] commonjs2",
        "amd": "[Exposing Section] amd",
    }));
}

fn externals(config: &mut Configuration, asm: &Assembler<'_>) {
    if !asm.options.node_externals {
        return;
    }
    for name in asm.pkg.external_names() {
        config
            .externals
            .insert(name.to_string(), format!("commonjs2 {name}").into());
    }
}

fn documentation(config: &mut Configuration, asm: &Assembler<'_>) {
    let Some(settings) = asm.options.documentation.settings() else {
        return;
    };
    config
        .plugins
        .push(plugin_with_settings("JsdocTsdWebpackPlugin", settings));

    if asm.options.clean_setting().is_some() {
        let out_dir = asm.options.out_dir();
        let parent = out_dir.parent().unwrap_or(&out_dir);
        let patterns = ["homepage", "tsd"]
            .map(|folder| parent.join(folder).to_string_lossy().into_owned());
        config.plugins.push(PluginSpec::with_options(
            "CleanWebpackPlugin",
            clean_patterns(patterns),
        ));
    }
}

fn publishing(config: &mut Configuration, asm: &Assembler<'_>) {
    let Some(settings) = asm.options.publishimo.settings() else {
        return;
    };

    let mut options = Map::new();
    let auto_main = if asm.executable {
        json!("bin")
    } else {
        json!(true)
    };
    options.insert("autoMain".into(), auto_main);
    options.insert(
        "autoTypes".into(),
        json!(asm.options.documentation.is_enabled()),
    );
    options.insert("banner".into(), json!(false));
    if !asm.options.node_externals {
        options.insert(
            "excludeFields".into(),
            json!(["dependencies", "optionalDependencies", "peerDependencies"]),
        );
    }
    options.extend(settings);

    config.plugins.push(PluginSpec::with_options(
        "PublishimoWebpackPlugin",
        options,
    ));
}

fn banner(config: &mut Configuration, asm: &Assembler<'_>) {
    let Some(settings) = asm.options.banner.as_ref().and_then(|b| b.settings()) else {
        return;
    };
    config
        .plugins
        .push(plugin_with_settings("PkgBannerPlugin", settings));
}

fn copy(config: &mut Configuration, asm: &Assembler<'_>) {
    let include = asm.options.include.patterns();
    if include.is_empty() {
        return;
    }
    let patterns: Vec<Value> = include
        .iter()
        .map(|pattern| match pattern {
            IncludePattern::Glob(glob) => json!({ "from": glob, "noErrorOnMissing": true }),
            IncludePattern::Pattern(map) => Value::Object(map.clone()),
        })
        .collect();
    config.plugins.push(PluginSpec::with_options(
        "CopyWebpackPlugin",
        json!({ "patterns": patterns }),
    ));
}

fn hashbang(config: &mut Configuration, asm: &Assembler<'_>) {
    if !asm.executable {
        return;
    }
    let Some(line) = asm.options.hashbang.as_deref().map(str::trim) else {
        return;
    };
    if line.is_empty() {
        return;
    }
    let banner = if line.starts_with("#!") {
        line.to_string()
    } else {
        format!("#!{line}")
    };
    config.plugins.push(PluginSpec::with_options(
        "BannerPlugin",
        json!({ "banner": banner, "raw": true }),
    ));
}

fn minification(config: &mut Configuration, asm: &Assembler<'_>) {
    if asm.options.development {
        return;
    }
    match asm.options.terser_options.settings() {
        None => {
            tracing::debug!("terserOptions is false, skipping minification");
            config.optimization.minimize = Some(false);
        }
        Some(terser) => {
            tracing::debug!("terserOptions: {:?}", terser);
            let mut options = Map::new();
            options.insert("terserOptions".into(), Value::Object(terser));
            options.extend(asm.options.terser_plugin_options.clone());
            config
                .optimization
                .minimizer
                .push(PluginSpec::with_options("TerserPlugin", options));
        }
    }
}

fn licenses(config: &mut Configuration, asm: &Assembler<'_>) {
    if asm.options.development {
        return;
    }
    let Some(file_name) = asm.options.license_file() else {
        return;
    };
    config.plugins.push(PluginSpec::with_options(
        "LicenseWebpackPlugin",
        json!({ "outputFilename": file_name, "perChunkOutput": false }),
    ));
}

fn locale_exclusion(config: &mut Configuration, asm: &Assembler<'_>) {
    if !asm.options.exclude_locale {
        return;
    }
    config.plugins.push(PluginSpec::with_options(
        "IgnorePlugin",
        json!({ "resourceRegExp": r"^\./locale$", "contextRegExp": "moment$" }),
    ));
}

fn clean_patterns(patterns: impl IntoIterator<Item = String>) -> Value {
    let patterns: Vec<String> = patterns.into_iter().collect();
    json!({ "verbose": false, "cleanOnceBeforeBuildPatterns": patterns })
}

/// Plugin whose options are omitted when `settings` is empty
pub(crate) fn plugin_with_settings(name: &str, settings: Map<String, Value>) -> PluginSpec {
    if settings.is_empty() {
        PluginSpec::new(name)
    } else {
        PluginSpec::with_options(name, settings)
    }
}
