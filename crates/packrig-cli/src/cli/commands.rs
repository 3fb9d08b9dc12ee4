use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::{Assignment, parse_assignment};

/// Available packrig subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the bundler configuration of a package
    ///
    /// Reads package.json from the package root, layers the declared
    /// options and the ones given here over the type defaults, and prints
    /// the resulting configuration as JSON.
    Generate(GenerateArgs),

    /// List the registered project types
    Types(TypesArgs),
}

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Project type, overriding the one declared in package.json
    ///
    /// Examples:
    ///   packrig generate --type node
    ///   packrig generate -t webapp
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    /// Build environment (defaults to NODE_ENV, then development)
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,

    /// Package root (defaults to the nearest folder with a package.json)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Set an option; may be repeated
    ///
    /// Keys may be dotted to reach into nested options. Values are parsed
    /// as JSON and fall back to plain strings.
    ///
    /// Examples:
    ///   --set publishimo=true
    ///   --set terserOptions.compress.passes=3
    ///   --set clean='["build/*"]'
    #[arg(short, long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub set: Vec<Assignment>,

    /// JSON file merged into the configuration as the `extra` fragment
    #[arg(long, value_name = "FILE")]
    pub extra: Option<PathBuf>,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write diagnostic files, optionally naming the configuration file
    ///
    /// Without a path the files go to dist/packrig under the package root.
    /// A relative path resolves against the current directory.
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub config_output: Option<Option<PathBuf>>,

    /// Print the finalized options instead of the configuration
    #[arg(long)]
    pub print_options: bool,
}

/// Arguments for the types command
#[derive(Args, Debug, Default)]
pub struct TypesArgs {
    /// Print the list as a JSON array
    #[arg(long)]
    pub json: bool,
}
