//! Error types for option resolution and package metadata loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{field}`: {message}")]
    InvalidValue { field: String, message: String },

    #[error("package descriptor not found: {}", .0.display())]
    PackageNotFound(PathBuf),

    #[error("cannot parse package descriptor {}: {message}", .path.display())]
    InvalidPackage { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.to_string(),
        }
    }
}
