//! Command-line interface definition.
//!
//! - `packrig generate` - print the bundler configuration of a package
//! - `packrig types` - list the registered project types

mod commands;
mod validation;

use clap::Parser;

pub use commands::{Command, GenerateArgs, TypesArgs};
pub use validation::{Assignment, parse_assignment};

/// packrig - bundler configurations from package metadata
#[derive(Parser, Debug)]
#[command(
    name = "packrig",
    version,
    about = "Generate webpack-compatible bundler configurations",
    long_about = "packrig reads package.json, picks the project type (lib, node, cli, html,\n\
                  webapp) and prints the bundler configuration for the current environment."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows the passed options, package data, provider defaults and the
    /// final configuration as they are computed.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}
