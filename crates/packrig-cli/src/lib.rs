//! packrig CLI.
//!
//! Command line front end for [`packrig`]: prints the generated bundler
//! configuration for a package, or writes it to a file.
//!
//! - [`cli`] - argument definitions
//! - `commands` - `generate` and `types`
//! - [`error`] - CLI errors and their miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status messages on stderr

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
