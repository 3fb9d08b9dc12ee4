//! Package descriptor (`package.json`) metadata.

use std::fs;
use std::path::{Path, PathBuf};

use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

pub const DESCRIPTOR_FILE: &str = "package.json";

/// Key under which a package declares its build options
pub const DECLARED_OPTIONS_KEY: &str = "packrig";

/// Read-only snapshot of the fields packrig cares about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,

    /// Build options declared by the package itself
    #[serde(
        default,
        rename = "packrig",
        skip_serializing_if = "Option::is_none"
    )]
    pub declared: Option<DeclaredOptions>,
}

/// `author` is either `"Name <mail> (url)"` or an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Text(String),
    Person {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl Author {
    pub fn name(&self) -> Option<&str> {
        match self {
            Author::Text(text) => {
                let end = text.find(|c: char| c == '<' || c == '(').unwrap_or(text.len());
                Some(text[..end].trim()).filter(|name| !name.is_empty())
            }
            Author::Person { name, .. } => name.as_deref(),
        }
    }
}

/// The package's own build options: a bare kind name or a full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredOptions {
    Kind(String),
    Options(Map<String, Value>),
}

impl DeclaredOptions {
    /// The project kind named by the declaration, if any
    pub fn kind(&self) -> Option<&str> {
        match self {
            DeclaredOptions::Kind(kind) => Some(kind),
            DeclaredOptions::Options(map) => map.get("type").and_then(Value::as_str),
        }
    }

    /// The declaration as an option layer
    pub fn to_layer(&self) -> Map<String, Value> {
        match self {
            DeclaredOptions::Kind(kind) => {
                let mut layer = Map::new();
                layer.insert("type".to_string(), Value::String(kind.clone()));
                layer
            }
            DeclaredOptions::Options(map) => map.clone(),
        }
    }
}

impl PackageMetadata {
    /// Read `package.json` from `root`, surfacing every failure.
    pub fn read(root: &Path) -> Result<Self> {
        let path = root.join(DESCRIPTOR_FILE);
        if !path.is_file() {
            return Err(ConfigError::PackageNotFound(path));
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidPackage {
            path,
            message: e.to_string(),
        })
    }

    /// Read `package.json`, substituting empty metadata on any failure.
    ///
    /// A missing or malformed descriptor is not fatal for configuration
    /// generation; the failure is logged as a warning instead.
    pub fn read_or_default(root: &Path) -> Self {
        match Self::read(root) {
            Ok(pkg) => {
                tracing::debug!("Pkg data: {:?}", pkg);
                pkg
            }
            Err(err) => {
                tracing::warn!("Using empty package metadata: {}", err);
                Self::default()
            }
        }
    }

    /// Dependency and peer dependency names, without duplicates
    pub fn external_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.dependencies.keys().chain(self.peer_dependencies.keys()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// lowerCamelCase form of the package name, usable as a global identifier
    pub fn library_name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(|name| name.to_lower_camel_case())
            .filter(|name| !name.is_empty())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().and_then(Author::name)
    }
}

/// Nearest ancestor of `start` containing a `package.json`, or `start` itself.
pub fn find_package_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(DESCRIPTOR_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
