//! Bundler configuration model.
//!
//! [`Configuration`] is a typed, partial webpack-style configuration record.
//! Every field is optional or empty by default, so the same type describes
//! both the base configuration and the fragments merged on top of it.
//! Top-level keys without a dedicated field are kept in
//! [`Configuration::extra`] and survive serialization unchanged.

mod merge;
mod plugin;
mod rule;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

pub use merge::{Merge, merge_values};
pub use plugin::PluginSpec;
pub use rule::{Condition, ModuleRule, RuleUse};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Entry>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PathBuf>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<Devtool>,

    #[serde(default, skip_serializing_if = "Resolve::is_empty")]
    pub resolve: Resolve,

    #[serde(default, skip_serializing_if = "ModuleConfig::is_empty")]
    pub module: ModuleConfig,

    /// Concatenated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,

    #[serde(default, skip_serializing_if = "Output::is_empty")]
    pub output: Output,

    #[serde(default, skip_serializing_if = "Optimization::is_empty")]
    pub optimization: Optimization,

    /// Request name to external reference. Shallow-merged, later keys win.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub externals: IndexMap<String, Value>,

    /// Deep-merged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Value>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,

    /// Node global polyfills. Deep-merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Value>,

    /// Deep-merged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<Value>,

    /// Override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<bool>,

    #[serde(default, skip_serializing_if = "WatchOptions::is_empty")]
    pub watch_options: WatchOptions,

    /// Unrecognized top-level keys. Deep-merged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry point of a build.
///
/// A single module, a list of modules bundled together, or named chunks
/// whose values are kept exactly as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Single(String),
    Many(Vec<String>),
    Named(Map<String, Value>),
}

impl Entry {
    /// Module requests named by this entry.
    ///
    /// Named chunks contribute their string and string-list values only.
    pub fn modules(&self) -> Vec<&str> {
        match self {
            Entry::Single(module) => vec![module.as_str()],
            Entry::Many(modules) => modules.iter().map(String::as_str).collect(),
            Entry::Named(chunks) => chunks
                .values()
                .flat_map(|chunk| match chunk {
                    Value::String(module) => vec![module.as_str()],
                    Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
                    _ => Vec::new(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Entry::Single(_) => false,
            Entry::Many(modules) => modules.is_empty(),
            Entry::Named(chunks) => chunks.is_empty(),
        }
    }
}

impl From<PathBuf> for Entry {
    fn from(path: PathBuf) -> Self {
        Entry::Single(path.to_string_lossy().into_owned())
    }
}

/// Source map style; `false` disables source maps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Devtool {
    Disabled(bool),
    Named(String),
}

impl From<&str> for Devtool {
    fn from(name: &str) -> Self {
        Devtool::Named(name.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolve {
    /// Concatenated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    /// Shallow-merged, later keys win. `false` ignores a module.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub alias: IndexMap<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resolve {
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.alias.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleConfig {
    /// Concatenated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<ModuleRule>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleConfig {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.extra.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Output {
    /// Absolute output directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,

    /// Global name of a library bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,

    /// Module format of a library bundle, e.g. `umd` or `commonjs2`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_target: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_object: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_comment: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Output {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize: Option<bool>,

    /// Concatenated
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub minimizer: Vec<PluginSpec>,

    /// `false` keeps `process.env.NODE_ENV` untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_env: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Optimization {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub max_entrypoint_size: u64,
    pub max_asset_size: u64,
}

impl Performance {
    /// Same limit for entry points and single assets, in bytes
    pub fn limit(bytes: u64) -> Self {
        Self {
            max_entrypoint_size: bytes,
            max_asset_size: bytes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchOptions {
    /// Concatenated without duplicates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WatchOptions {
    pub fn is_empty(&self) -> bool {
        self.ignored.is_empty() && self.extra.is_empty()
    }
}

impl Configuration {
    /// Parse a user-supplied fragment, naming it in the error.
    pub fn from_fragment(name: &str, fragment: Value) -> Result<Self> {
        serde_json::from_value(fragment).map_err(|e| Error::InvalidFragment {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Fragment equal to the empty configuration
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn plugin(&self, name: &str) -> Option<&PluginSpec> {
        self.plugins.iter().find(|plugin| plugin.is(name))
    }

    pub fn plugins_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PluginSpec> {
        self.plugins.iter().filter(move |plugin| plugin.is(name))
    }

    /// Check the final configuration: an entry and an absolute output path.
    pub fn validate(&self) -> Result<()> {
        match &self.entry {
            None => return Err(Error::InvalidConfig("no entry".to_string())),
            Some(entry) if entry.is_empty() => {
                return Err(Error::InvalidConfig("entry list is empty".to_string()));
            }
            Some(_) => {}
        }

        match &self.output.path {
            Some(path) if path.is_absolute() => Ok(()),
            Some(path) => Err(Error::InvalidConfig(format!(
                "output.path must be absolute, got {}",
                path.display()
            ))),
            None => Err(Error::InvalidConfig("no output.path".to_string())),
        }
    }
}
