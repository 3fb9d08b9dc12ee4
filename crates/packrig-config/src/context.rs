//! Explicit build context.
//!
//! Everything packrig would otherwise read from the process environment is
//! collected here once, so option resolution and assembly stay testable
//! without touching global state. Only [`BuildContext::from_env`] reads
//! environment variables.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Selects the build environment (`NODE_ENV` convention)
pub const ENV_MODE: &str = "NODE_ENV";

/// Forces diagnostic output when set to a non-empty value
pub const ENV_CONFIG_OUTPUT: &str = "PACKRIG_DEBUG";

/// Forces the `devtool` of the final configuration
pub const ENV_DEVTOOL: &str = "PACKRIG_DEVTOOL";

const CI_VARIABLES: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
];

/// Build environment name, e.g. `development`, `production` or `test`.
///
/// Names are lowercased. Any name other than `production` counts as a
/// development build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment(String);

impl Environment {
    pub const DEVELOPMENT: &'static str = "development";
    pub const PRODUCTION: &'static str = "production";

    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim().to_lowercase();
        if name.is_empty() {
            Self::development()
        } else {
            Self(name)
        }
    }

    pub fn development() -> Self {
        Self(Self::DEVELOPMENT.to_string())
    }

    pub fn production() -> Self {
        Self(Self::PRODUCTION.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_production(&self) -> bool {
        self.0 == Self::PRODUCTION
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Environment {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Inputs derived from the invoking process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub environment: Environment,

    /// Write diagnostic output regardless of the `configOutput` option default
    pub config_output: bool,

    /// Overrides `devtool` after all fragments are merged
    pub forced_devtool: Option<String>,

    /// Running on a CI server (more minifier passes)
    pub ci: bool,

    /// Base for relative package roots
    pub cwd: PathBuf,
}

impl BuildContext {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            config_output: false,
            forced_devtool: None,
            ci: false,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Collect the context from the process environment.
    ///
    /// | Variable          | Effect                                  |
    /// |-------------------|-----------------------------------------|
    /// | `NODE_ENV`        | environment name (default `development`) |
    /// | `PACKRIG_DEBUG`   | forces diagnostic output                |
    /// | `PACKRIG_DEVTOOL` | forces the final `devtool`              |
    /// | `CI` and friends  | enables CI minifier settings            |
    pub fn from_env() -> Self {
        let environment = std::env::var(ENV_MODE)
            .map(Environment::new)
            .unwrap_or_default();

        Self {
            config_output: env_flag(ENV_CONFIG_OUTPUT),
            forced_devtool: std::env::var(ENV_DEVTOOL).ok().filter(|v| !v.is_empty()),
            ci: CI_VARIABLES.iter().any(|name| env_flag(name)),
            ..Self::new(environment)
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_config_output(mut self, enabled: bool) -> Self {
        self.config_output = enabled;
        self
    }

    pub fn with_forced_devtool(mut self, devtool: impl Into<String>) -> Self {
        self.forced_devtool = Some(devtool.into());
        self
    }

    pub fn with_ci(mut self, ci: bool) -> Self {
        self.ci = ci;
        self
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| !matches!(value.trim(), "" | "0" | "false"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn environment_names_are_normalized() {
        assert_eq!(Environment::new(" Production ").as_str(), "production");
        assert!(Environment::new("PRODUCTION").is_production());
        assert_eq!(Environment::new(""), Environment::development());
        assert!(!Environment::new("test").is_production());
    }

    #[test]
    #[serial]
    fn from_env_reads_mode_and_toggles() {
        unsafe {
            std::env::set_var(ENV_MODE, "Production");
            std::env::set_var(ENV_CONFIG_OUTPUT, "1");
            std::env::set_var(ENV_DEVTOOL, "cheap-source-map");
        }

        let ctx = BuildContext::from_env();
        assert!(ctx.environment.is_production());
        assert!(ctx.config_output);
        assert_eq!(ctx.forced_devtool.as_deref(), Some("cheap-source-map"));

        unsafe {
            std::env::remove_var(ENV_MODE);
            std::env::remove_var(ENV_CONFIG_OUTPUT);
            std::env::remove_var(ENV_DEVTOOL);
        }
    }

    #[test]
    #[serial]
    fn from_env_defaults_to_development() {
        unsafe {
            std::env::remove_var(ENV_MODE);
            std::env::remove_var(ENV_DEVTOOL);
            std::env::set_var(ENV_CONFIG_OUTPUT, "false");
        }

        let ctx = BuildContext::from_env();
        assert_eq!(ctx.environment, Environment::development());
        assert!(!ctx.config_output);
        assert!(ctx.forced_devtool.is_none());

        unsafe {
            std::env::remove_var(ENV_CONFIG_OUTPUT);
        }
    }
}
