//! Generate command implementation.

use std::fs;

use packrig::{BuildContext, Environment, Request};
use serde_json::{Map, Value};

use crate::cli::GenerateArgs;
use crate::error::{Result, ResultExt};
use crate::ui;

/// Execute the generate command.
///
/// # Errors
///
/// Fails when the `--extra` file cannot be read or parsed, when generation
/// fails, or when the output file cannot be written.
pub fn execute(args: GenerateArgs) -> Result<()> {
    let mut ctx = BuildContext::from_env();
    if let Some(env) = &args.env {
        ctx.environment = Environment::new(env);
    }

    let mut request = Request::new(ctx).with_overrides(build_overrides(&args)?);
    if let Some(root) = &args.root {
        request = request.with_package_root(root);
    }

    let generated = packrig::generate(request)?;

    let json = if args.print_options {
        serde_json::to_string_pretty(&generated.options)?
    } else {
        serde_json::to_string_pretty(&generated.config)?
    };

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, format!("{json}\n"))?;
            ui::success(&format!("Wrote {}", path.display()));
        }
        None => println!("{json}"),
    }

    if let Some(files) = &generated.diagnostics {
        ui::info(&format!("Diagnostics written to {}", files.config.display()));
    }

    Ok(())
}

/// Collect the option overrides given on the command line.
///
/// `--set` assignments are applied in order, then `--extra`,
/// `--config-output` and `--type`, so the dedicated flags win.
pub fn build_overrides(args: &GenerateArgs) -> Result<Map<String, Value>> {
    let mut overrides = Map::new();

    for assignment in &args.set {
        insert_path(&mut overrides, &assignment.path, assignment.value.clone());
    }

    if let Some(path) = &args.extra {
        let content = fs::read_to_string(path).with_path(path)?;
        let extra: Value = serde_json::from_str(&content)
            .context(format!("Failed to parse {}", path.display()))?;
        overrides.insert("extra".to_string(), extra);
    }

    match &args.config_output {
        Some(Some(path)) => {
            overrides.insert(
                "configOutput".to_string(),
                Value::String(path.to_string_lossy().into_owned()),
            );
        }
        Some(None) => {
            overrides.insert("configOutput".to_string(), Value::Bool(true));
        }
        None => {}
    }

    if let Some(kind) = &args.kind {
        overrides.insert("type".to_string(), Value::String(kind.clone()));
    }

    Ok(overrides)
}

/// Insert `value` at a dotted path, creating intermediate objects.
fn insert_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut current = map;
    for key in parents {
        let slot = current
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(inner) = slot else {
            return;
        };
        current = inner;
    }
    current.insert(last.clone(), value);
}
