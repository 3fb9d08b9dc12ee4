//! packrig CLI entry point.

use clap::Parser;
use miette::Result;
use packrig_cli::{cli, commands, error, logger, ui};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init(args.no_color, args.quiet);

    let result = match args.command {
        cli::Command::Generate(generate_args) => commands::generate_execute(generate_args),
        cli::Command::Types(types_args) => commands::types_execute(types_args),
    };

    result.map_err(error::cli_error_to_miette)
}
