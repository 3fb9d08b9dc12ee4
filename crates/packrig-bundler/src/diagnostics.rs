//! Diagnostic output of generated configurations.
//!
//! When `configOutput` is enabled, the final configuration, the finalized
//! options and a plugin listing are written as pretty-printed JSON files
//! into one directory.

use std::fs;
use std::path::{Path, PathBuf};

use packrig_config::{Options, Switch};
use serde::Serialize;
use serde_json::{Value, json};

use crate::config::Configuration;
use crate::error::Result;

pub const CONFIG_FILE: &str = "bundlerConfig.json";
pub const OPTIONS_FILE: &str = "options.json";
pub const PLUGINS_FILE: &str = "plugins.json";

/// Default diagnostic folder, relative to the package root
pub const DEFAULT_DIR: &str = "dist/packrig";

/// Locations of the three diagnostic files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticFiles {
    pub config: PathBuf,
    pub options: PathBuf,
    pub plugins: PathBuf,
}

impl DiagnosticFiles {
    /// Files named after `config`, with the other two next to it
    pub fn at(config: PathBuf) -> Self {
        let dir = config.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            options: dir.join(OPTIONS_FILE),
            plugins: dir.join(PLUGINS_FILE),
            config,
        }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::at(dir.join(CONFIG_FILE))
    }

    /// Locations selected by the `configOutput` option, if enabled.
    ///
    /// `true` uses [`DEFAULT_DIR`] under the package root; a path names the
    /// configuration file and was made absolute by `Options::finalize`.
    pub fn for_options(options: &Options) -> Option<Self> {
        match &options.config_output {
            Switch::Flag(false) => None,
            Switch::Flag(true) => Some(Self::in_dir(&options.resolve(DEFAULT_DIR))),
            Switch::Custom(path) => Some(Self::at(options.resolve(path))),
        }
    }

    /// Write all three files, creating their directory.
    pub fn write(&self, config: &Configuration, options: &Options) -> Result<()> {
        write_json(&self.config, config)?;
        write_json(&self.options, options)?;
        write_json(&self.plugins, &plugin_listing(config))?;
        tracing::debug!("Wrote diagnostics to {}", self.config.display());
        Ok(())
    }
}

/// One entry per plugin: the name, or `[name, options]` when it has options.
pub fn plugin_listing(config: &Configuration) -> Vec<Value> {
    config
        .plugins
        .iter()
        .map(|plugin| match &plugin.options {
            Some(options) if plugin.has_options() => json!([plugin.name, options]),
            _ => Value::String(plugin.name.clone()),
        })
        .collect()
}

/// Read back an `options.json` written by [`DiagnosticFiles::write`]
pub fn read_options(path: &Path) -> Result<Options> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn read_config(path: &Path) -> Result<Configuration> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}
