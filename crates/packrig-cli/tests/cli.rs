//! End-to-end tests of the packrig binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn packrig() -> Command {
    let mut cmd = Command::cargo_bin("packrig").unwrap();
    for var in ["NODE_ENV", "PACKRIG_DEBUG", "PACKRIG_DEVTOOL", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

fn node_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("package.json"),
        r#"{
            "name": "left-pad-service",
            "version": "1.0.0",
            "dependencies": { "left-pad": "^1.3.0" },
            "packrig": "node"
        }"#,
    )
    .unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("src/index.js"), "module.exports = 1;\n").unwrap();
    temp
}

#[test]
fn test_generate_prints_json_config() {
    let temp = node_project();

    let output = packrig()
        .current_dir(temp.path())
        .args(["generate", "--env", "production"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["output"]["filename"], json!("index.js"));
    assert_eq!(config["target"], json!("node"));
    assert_eq!(config["externals"]["left-pad"], json!("commonjs2 left-pad"));
    assert_eq!(config["mode"], json!("production"));
}

#[test]
fn test_generate_with_root_and_set() {
    let temp = node_project();

    let output = packrig()
        .args(["generate", "--env", "development", "--root"])
        .arg(temp.path())
        .args(["--set", "nodeExternals=false", "--set", "outDir=build"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["mode"], json!("development"));
    assert!(config.get("externals").is_none());
    assert_eq!(
        config["output"]["path"],
        json!(temp.path().join("build").to_string_lossy())
    );
}

#[test]
fn test_generate_unknown_type_fails() {
    let temp = node_project();

    packrig()
        .current_dir(temp.path())
        .args(["generate", "--type", "spa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spa"))
        .stderr(predicate::str::contains("webapp"));
}

#[test]
fn test_generate_writes_output_file() {
    let temp = node_project();
    let out = temp.path().join("out/webpack.json");

    packrig()
        .current_dir(temp.path())
        .args(["generate", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let config: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(config["target"], json!("node"));
}

#[test]
fn test_generate_print_options() {
    let temp = node_project();

    let output = packrig()
        .current_dir(temp.path())
        .args(["generate", "--print-options", "--set", "licenseFileName=NOTICE.txt"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let options: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(options["type"], json!("node"));
    assert_eq!(options["licenseFileName"], json!("NOTICE.txt"));
}

#[test]
fn test_generate_extra_file() {
    let temp = node_project();
    let extra = temp.path().join("extra.json");
    fs::write(&extra, r#"{ "devtool": "hidden-source-map" }"#).unwrap();

    let output = packrig()
        .current_dir(temp.path())
        .args(["generate", "--extra"])
        .arg(&extra)
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["devtool"], json!("hidden-source-map"));
}

#[test]
fn test_generate_config_output_default_dir() {
    let temp = node_project();

    packrig()
        .current_dir(temp.path())
        .args(["generate", "--config-output"])
        .assert()
        .success();

    let dir = temp.path().join("dist/packrig");
    assert!(dir.join("bundlerConfig.json").is_file());
    assert!(dir.join("options.json").is_file());
    assert!(dir.join("plugins.json").is_file());
}

#[test]
fn test_generate_config_output_path_follows_current_dir() {
    let temp = node_project();
    let workdir = TempDir::new().unwrap();

    packrig()
        .current_dir(workdir.path())
        .args(["generate", "--root"])
        .arg(temp.path())
        .args(["--config-output", "out/config.json"])
        .assert()
        .success();

    assert!(workdir.path().join("out/config.json").is_file());
    assert!(workdir.path().join("out/options.json").is_file());
    assert!(!temp.path().join("out").exists());
}

#[test]
fn test_generate_honors_forced_devtool() {
    let temp = node_project();

    let output = packrig()
        .current_dir(temp.path())
        .env("PACKRIG_DEVTOOL", "cheap-source-map")
        .arg("generate")
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["devtool"], json!("cheap-source-map"));
}

#[test]
fn test_types_lists_builtin_kinds() {
    packrig()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("lib (default)"))
        .stdout(predicate::str::contains("webapp"));

    let output = packrig().args(["types", "--json"]).output().unwrap();
    let names: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names, json!(["lib", "node", "cli", "html", "webapp"]));
}
