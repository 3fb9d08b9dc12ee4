//! Tests for base configuration assembly.

use std::fs;
use std::path::{Path, PathBuf};

use packrig_bundler::{Assembler, Configuration, Devtool, Entry, Error, apply_extras};
use packrig_config::{
    BuildContext, CleanSetting, Environment, IncludeSetting, Options, PackageMetadata, Switch,
};
use regex::Regex;
use serde_json::{Map, json};
use tempfile::TempDir;

fn options(env: Environment, root: &Path, tweak: impl FnOnce(&mut Options)) -> Options {
    let ctx = BuildContext::new(env).with_cwd(root);
    let mut options = Options::baseline(&ctx, &PackageMetadata::default(), root.to_path_buf());
    tweak(&mut options);
    options.finalize(&ctx);
    options
}

fn assemble(options: &Options, pkg: &PackageMetadata, executable: bool) -> Configuration {
    let environment = if options.development {
        Environment::development()
    } else {
        Environment::production()
    };
    Assembler::new(options, pkg, &environment)
        .executable(executable)
        .build()
}

fn plugin_names(config: &Configuration) -> Vec<&str> {
    config.plugins.iter().map(|p| p.name.as_str()).collect()
}

fn pkg_with_dependencies() -> PackageMetadata {
    serde_json::from_value(json!({
        "name": "demo",
        "dependencies": { "left-pad": "^1.3.0" },
        "peerDependencies": { "react": "^18" }
    }))
    .unwrap()
}

#[test]
fn production_skeleton() {
    let opts = options(Environment::production(), Path::new("/project"), |_| {});
    let config = assemble(&opts, &pkg_with_dependencies(), false);

    assert_eq!(config.mode.as_deref(), Some("production"));
    assert_eq!(config.output.filename.as_deref(), Some("index.js"));
    assert_eq!(
        config.output.path,
        Some(PathBuf::from("/project/dist/package/production"))
    );
    assert_eq!(config.entry, Some(Entry::Single("/project/src".into())));
    assert_eq!(config.externals["left-pad"], "commonjs2 left-pad");
    assert_eq!(config.externals["react"], "commonjs2 react");
    assert!(config.output.auxiliary_comment.is_none());
    assert_eq!(config.performance.unwrap().max_asset_size, 4_000_000);

    let terser = &config.optimization.minimizer[0];
    assert_eq!(terser.name, "TerserPlugin");
    let terser_options = terser.options.as_ref().unwrap();
    assert!(terser_options["terserOptions"]["compress"]["passes"].as_u64().unwrap() > 1);
    assert_eq!(terser_options["extractComments"], json!(false));

    assert_eq!(
        plugin_names(&config),
        [
            "LoaderOptionsPlugin",
            "CleanWebpackPlugin",
            "PkgBannerPlugin",
            "CopyWebpackPlugin",
            "LicenseWebpackPlugin",
            "IgnorePlugin",
        ]
    );
    assert!(config.validate().is_ok());
}

#[test]
fn development_has_no_minifier_or_licenses() {
    let opts = options(Environment::development(), Path::new("/project"), |_| {});
    let config = assemble(&opts, &PackageMetadata::default(), false);

    assert_eq!(
        config.devtool,
        Some(Devtool::Named("eval-source-map".into()))
    );
    assert!(config.optimization.minimizer.is_empty());
    assert!(config.plugin("LicenseWebpackPlugin").is_none());
    assert!(config.plugin("CleanWebpackPlugin").is_none());
    assert!(config.output.auxiliary_comment.is_some());
}

#[test]
fn clean_true_targets_out_dir() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.clean = Some(CleanSetting::Enabled(true));
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    let clean = config.plugin("CleanWebpackPlugin").unwrap();
    assert_eq!(
        clean.options.as_ref().unwrap()["cleanOnceBeforeBuildPatterns"],
        json!(["/project/dist/package/production"])
    );
}

#[test]
fn clean_patterns_are_verbatim() {
    let opts = options(Environment::development(), Path::new("/project"), |o| {
        o.clean = Some(CleanSetting::Patterns(vec!["a/*".into(), "b/*".into()]));
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    let clean = config.plugin("CleanWebpackPlugin").unwrap();
    assert_eq!(
        clean.options.as_ref().unwrap()["cleanOnceBeforeBuildPatterns"],
        json!(["a/*", "b/*"])
    );
}

#[test]
fn clean_record_is_passed_through() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        let mut custom = Map::new();
        custom.insert("dry".into(), json!(true));
        o.clean = Some(CleanSetting::Custom(custom));
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    let clean = config.plugin("CleanWebpackPlugin").unwrap();
    assert_eq!(clean.options, Some(json!({ "dry": true })));
}

#[test]
fn documentation_cleans_sibling_folders() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.documentation = Switch::Flag(true);
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);

    assert!(config.plugin("JsdocTsdWebpackPlugin").is_some());
    let cleaners: Vec<_> = config.plugins_named("CleanWebpackPlugin").collect();
    assert_eq!(cleaners.len(), 2);
    assert_eq!(
        cleaners[1].options.as_ref().unwrap()["cleanOnceBeforeBuildPatterns"],
        json!([
            "/project/dist/package/homepage",
            "/project/dist/package/tsd"
        ])
    );
}

#[test]
fn publishing_metadata_follows_kind_and_externals() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        let mut settings = Map::new();
        settings.insert("fetchGithub".into(), json!(true));
        o.publishimo = Switch::Custom(settings);
        o.node_externals = false;
    });

    let config = assemble(&opts, &PackageMetadata::default(), true);
    let publishimo = config.plugin("PublishimoWebpackPlugin").unwrap();
    let settings = publishimo.options.as_ref().unwrap();
    assert_eq!(settings["autoMain"], json!("bin"));
    assert_eq!(settings["autoTypes"], json!(false));
    assert_eq!(settings["fetchGithub"], json!(true));
    assert_eq!(settings["excludeFields"][0], json!("dependencies"));
    assert!(config.externals.is_empty());

    let config = assemble(&opts, &PackageMetadata::default(), false);
    let publishimo = config.plugin("PublishimoWebpackPlugin").unwrap();
    assert_eq!(publishimo.options.as_ref().unwrap()["autoMain"], json!(true));
}

#[test]
fn hashbang_only_for_executables() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.hashbang = Some(" /usr/bin/env node ".into());
    });

    let library = assemble(&opts, &PackageMetadata::default(), false);
    assert!(library.plugin("BannerPlugin").is_none());

    let program = assemble(&opts, &PackageMetadata::default(), true);
    let banner = program.plugin("BannerPlugin").unwrap();
    assert_eq!(
        banner.options,
        Some(json!({ "banner": "#!/usr/bin/env node", "raw": true }))
    );
}

#[test]
fn disabled_terser_turns_off_minimize() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.terser_options = Switch::Flag(false);
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    assert_eq!(config.optimization.minimize, Some(false));
    assert!(config.optimization.minimizer.is_empty());
}

#[test]
fn include_globs_tolerate_missing_files() {
    let opts = options(Environment::development(), Path::new("/project"), |_| {});
    let config = assemble(&opts, &PackageMetadata::default(), false);
    let copy = config.plugin("CopyWebpackPlugin").unwrap();
    assert_eq!(
        copy.options.as_ref().unwrap()["patterns"][0],
        json!({ "from": "readme.*", "noErrorOnMissing": true })
    );
}

#[test]
fn include_and_licenses_can_be_switched_off() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.include = IncludeSetting::Enabled(false);
        o.license_file_name = Switch::Flag(false);
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    assert!(config.plugin("CopyWebpackPlugin").is_none());
    assert!(config.plugin("LicenseWebpackPlugin").is_none());

    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.include = IncludeSetting::One("changelog.md".into());
        o.license_file_name = Switch::Flag(true);
    });
    let config = assemble(&opts, &PackageMetadata::default(), false);
    let copy = config.plugin("CopyWebpackPlugin").unwrap();
    assert_eq!(
        copy.options.as_ref().unwrap()["patterns"],
        json!([{ "from": "changelog.md", "noErrorOnMissing": true }])
    );
    let licenses = config.plugin("LicenseWebpackPlugin").unwrap();
    assert_eq!(
        licenses.options.as_ref().unwrap()["outputFilename"],
        json!("thirdPartyLicenses.txt")
    );
}

#[test]
fn environment_specific_entry_is_preferred() {
    let dir = TempDir::new().expect("tempdir");
    let src = dir.path().join("src");
    fs::create_dir_all(&src).expect("mkdir");

    let opts = options(Environment::production(), dir.path(), |_| {});
    let config = assemble(&opts, &PackageMetadata::default(), false);
    assert_eq!(config.entry, Some(Entry::from(src.clone())));

    fs::write(src.join("index.production.ts"), "export {}").expect("write");
    let config = assemble(&opts, &PackageMetadata::default(), false);
    assert_eq!(
        config.entry,
        Some(Entry::from(src.join("index.production.ts")))
    );

    fs::write(src.join("index.production.js"), "export {}").expect("write");
    let config = assemble(&opts, &PackageMetadata::default(), false);
    assert_eq!(
        config.entry,
        Some(Entry::from(src.join("index.production.js")))
    );
}

#[test]
fn rule_patterns_compile() {
    let opts = options(Environment::production(), Path::new("/project"), |_| {});
    let config = assemble(&opts, &PackageMetadata::default(), false);

    let patterns: Vec<&str> = config
        .module
        .rules
        .iter()
        .flat_map(|rule| rule.patterns())
        .collect();
    assert!(!patterns.is_empty());
    for pattern in patterns {
        assert!(Regex::new(pattern).is_ok(), "invalid pattern {pattern}");
    }

    let script = Regex::new(&config.module.rules[0].patterns()[0]).unwrap();
    assert!(script.is_match("index.tsx"));
    assert!(!script.is_match("index.json"));
}

#[test]
fn extras_are_gated_by_environment() {
    let extras = |o: &mut Options| {
        o.extra = Some(json!({ "target": "electron-main" }));
        o.extra_production = Some(json!({ "plugins": [{ "name": "ProdOnly" }] }));
        o.extra_development = Some(json!({ "plugins": [{ "name": "DevOnly" }] }));
    };

    let opts = options(Environment::production(), Path::new("/project"), extras);
    let mut config = assemble(&opts, &PackageMetadata::default(), false);
    apply_extras(&mut config, &opts).unwrap();
    assert_eq!(config.target.as_deref(), Some("electron-main"));
    assert!(config.plugin("ProdOnly").is_some());
    assert!(config.plugin("DevOnly").is_none());
    assert_eq!(config.plugins.last().unwrap().name, "ProdOnly");

    let opts = options(Environment::development(), Path::new("/project"), extras);
    let mut config = assemble(&opts, &PackageMetadata::default(), false);
    apply_extras(&mut config, &opts).unwrap();
    assert!(config.plugin("DevOnly").is_some());
    assert!(config.plugin("ProdOnly").is_none());
}

#[test]
fn malformed_extra_is_rejected() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.extra = Some(json!({ "plugins": "not a list" }));
    });
    let mut config = assemble(&opts, &PackageMetadata::default(), false);
    let err = apply_extras(&mut config, &opts).unwrap_err();
    assert!(matches!(err, Error::InvalidFragment { ref name, .. } if name == "extra"));
}

#[test]
fn extras_accept_every_bundler_shape() {
    let opts = options(Environment::production(), Path::new("/project"), |o| {
        o.extra = Some(json!({
            "entry": { "main": "./src/a.js" },
            "module": { "rules": [{ "test": r"\.md$", "include": ["/a", "/b"], "loader": "md-loader" }] },
            "resolve": { "alias": { "fs": false } },
            "externals": { "lodash": { "commonjs": "lodash", "root": "_" } }
        }));
    });
    let mut config = assemble(&opts, &PackageMetadata::default(), false);
    apply_extras(&mut config, &opts).unwrap();

    let entry = serde_json::to_value(config.entry.as_ref().unwrap()).unwrap();
    assert_eq!(entry, json!({ "main": "./src/a.js" }));
    let markdown = config.module.rules.last().unwrap();
    assert_eq!(
        serde_json::to_value(&markdown.include).unwrap(),
        json!(["/a", "/b"])
    );
    assert_eq!(config.resolve.alias["fs"], json!(false));
    assert_eq!(config.externals["lodash"]["root"], json!("_"));
    assert!(config.validate().is_ok());
}
