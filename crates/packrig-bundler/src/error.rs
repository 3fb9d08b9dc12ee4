use std::path::PathBuf;

use packrig_config::ConfigError;

/// Error types for configuration generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No type provider is registered under the requested name.
    #[error("Unknown project type \"{name}\" (available types: {})", .available.join(", "))]
    UnknownType {
        name: String,
        available: Vec<String>,
    },

    /// A file the selected project type depends on does not exist.
    #[error("Required asset not found: {}", .path.display())]
    MissingAsset { path: PathBuf },

    /// An extra configuration fragment has the wrong shape.
    #[error("Invalid configuration fragment `{name}`: {message}")]
    InvalidFragment { name: String, message: String },

    /// The final configuration violates its invariants.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Option resolution or package metadata error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for packrig-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::UnknownType { .. } => "UNKNOWN_TYPE",
            Error::MissingAsset { .. } => "MISSING_ASSET",
            Error::InvalidFragment { .. } => "INVALID_FRAGMENT",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Json(_) => "JSON_ERROR",
        }))
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::UnknownType { available, .. } => Some(Box::new(format!(
                "Set `type` to one of: {}",
                available.join(", ")
            ))),
            Error::MissingAsset { path } => Some(Box::new(format!(
                "Create {} or point the `icon` option at an existing file",
                path.display()
            ))),
            Error::Config(ConfigError::InvalidValue { field, .. }) => Some(Box::new(format!(
                "Check the `{field}` entry in your overrides or package.json"
            ))),
            _ => None,
        }
    }
}
