use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A feature toggle that may also carry its own settings.
///
/// Accepts `false`, `true` or a settings value:
///
/// ```json
/// { "documentation": true, "publishimo": { "fetchGithub": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Switch<T> {
    Flag(bool),
    Custom(T),
}

impl<T> Switch<T> {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Switch::Flag(false))
    }

    /// Explicit settings, if any were given
    pub fn custom(&self) -> Option<&T> {
        match self {
            Switch::Custom(value) => Some(value),
            Switch::Flag(_) => None,
        }
    }
}

impl<T> Default for Switch<T> {
    fn default() -> Self {
        Switch::Flag(false)
    }
}

impl<T> From<bool> for Switch<T> {
    fn from(enabled: bool) -> Self {
        Switch::Flag(enabled)
    }
}

impl Switch<Map<String, Value>> {
    /// Settings as a JSON object; `true` yields an empty object
    pub fn settings(&self) -> Option<Map<String, Value>> {
        match self {
            Switch::Flag(false) => None,
            Switch::Flag(true) => Some(Map::new()),
            Switch::Custom(map) => Some(map.clone()),
        }
    }
}

/// Output directory cleaning.
///
/// `true` cleans the output directory, a list names the glob patterns to
/// clean verbatim, and an object is handed to the cleaning plugin unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CleanSetting {
    Enabled(bool),
    Patterns(Vec<String>),
    Custom(Map<String, Value>),
}

impl CleanSetting {
    pub fn is_enabled(&self) -> bool {
        match self {
            CleanSetting::Enabled(enabled) => *enabled,
            CleanSetting::Patterns(_) | CleanSetting::Custom(_) => true,
        }
    }
}

/// A static file copied next to the bundle.
///
/// Plain strings are globs relative to the package root. Objects are passed
/// to the copy plugin as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludePattern {
    Glob(String),
    Pattern(Map<String, Value>),
}

impl From<&str> for IncludePattern {
    fn from(glob: &str) -> Self {
        IncludePattern::Glob(glob.to_string())
    }
}

/// The `include` option: `false`, one pattern or a list of patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IncludeSetting {
    Enabled(bool),
    One(IncludePattern),
    Many(Vec<IncludePattern>),
}

impl IncludeSetting {
    /// Patterns to copy; a bare flag names none
    pub fn patterns(&self) -> &[IncludePattern] {
        match self {
            IncludeSetting::Enabled(_) => &[],
            IncludeSetting::One(pattern) => std::slice::from_ref(pattern),
            IncludeSetting::Many(patterns) => patterns,
        }
    }
}

impl Default for IncludeSetting {
    fn default() -> Self {
        IncludeSetting::Enabled(false)
    }
}

impl<P: Into<IncludePattern>> From<Vec<P>> for IncludeSetting {
    fn from(patterns: Vec<P>) -> Self {
        IncludeSetting::Many(patterns.into_iter().map(Into::into).collect())
    }
}
