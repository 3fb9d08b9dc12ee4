//! Tests for baseline option values.

use packrig_config::{
    BuildContext, CleanSetting, Environment, IncludePattern, Options, PackageMetadata, Switch,
};
use serde_json::json;
use std::path::PathBuf;

fn baseline(env: Environment) -> Options {
    let ctx = BuildContext::new(env).with_cwd("/project");
    Options::baseline(&ctx, &PackageMetadata::default(), PathBuf::from("/project"))
}

#[test]
fn baseline_values() {
    let opts = baseline(Environment::development());
    assert!(opts.development);
    assert_eq!(opts.source_folder.as_deref(), Some("src"));
    assert_eq!(
        opts.include.patterns(),
        [
            IncludePattern::Glob("readme.*".into()),
            IncludePattern::Glob("license.*".into())
        ]
    );
    assert_eq!(opts.license_file(), Some("thirdPartyLicenses.txt"));
    assert_eq!(
        opts.terser_options.custom().unwrap()["compress"],
        json!({ "passes": 5 })
    );
    assert_eq!(opts.terser_plugin_options["extractComments"], json!(false));
    assert!(opts.node_externals);
    assert!(opts.exclude_locale);
    assert!(opts.create_css_file);
    assert!(opts.optimize_css.is_enabled());
    assert!(!opts.publishimo.is_enabled());
    assert!(!opts.documentation.is_enabled());
    assert!(!opts.pwa.is_enabled());
    assert_eq!(opts.locale.as_deref(), Some("en-US"));
    assert_eq!(opts.theme_color.as_deref(), Some("04AAE3"));
    assert_eq!(opts.background_color.as_deref(), Some("000000"));
    assert!(opts.kind.is_none());
    assert!(opts.hashbang.is_none());
}

#[test]
fn baseline_follows_environment() {
    assert!(!baseline(Environment::production()).development);
    assert!(baseline(Environment::new("test")).development);
}

#[test]
fn baseline_takes_title_and_domain_from_package() {
    let ctx = BuildContext::new(Environment::production());
    let pkg = PackageMetadata {
        title: Some("Demo App".into()),
        domain: Some("demo.example".into()),
        ..Default::default()
    };
    let opts = Options::baseline(&ctx, &pkg, PathBuf::from("/project"));
    assert_eq!(opts.title.as_deref(), Some("Demo App"));
    assert_eq!(opts.domain.as_deref(), Some("demo.example"));
}

#[test]
fn baseline_config_output_follows_context() {
    let ctx = BuildContext::new(Environment::development()).with_config_output(true);
    let opts = Options::baseline(&ctx, &PackageMetadata::default(), PathBuf::from("/p"));
    assert_eq!(opts.config_output, Switch::Flag(true));
}

#[test]
fn finalized_production_options() {
    let ctx = BuildContext::new(Environment::production()).with_cwd("/project");
    let mut opts = baseline(Environment::production());
    opts.finalize(&ctx);

    assert_eq!(opts.clean, Some(CleanSetting::Enabled(true)));
    assert!(opts.banner_enabled());
    assert_eq!(
        opts.out_dir(),
        PathBuf::from("/project/dist/package/production")
    );
}
