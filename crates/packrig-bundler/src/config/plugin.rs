use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bundler plugin, described by name.
///
/// The bundler instantiates the plugin from `name` and passes `options` to
/// its constructor. packrig never runs plugins itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl PluginSpec {
    /// Plugin constructed without options
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_options(name: impl Into<String>, options: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            options: Some(options.into()),
        }
    }

    /// Options are present and not an empty object, array or string
    pub fn has_options(&self) -> bool {
        match &self.options {
            None | Some(Value::Null) => false,
            Some(Value::Object(map)) => !map.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::String(text)) => !text.is_empty(),
            Some(_) => true,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}
