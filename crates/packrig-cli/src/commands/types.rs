//! Types command implementation.

use packrig::Registry;
use packrig::target::DEFAULT_KIND;

use crate::cli::TypesArgs;
use crate::error::Result;

/// Print the registered project types, one per line.
pub fn execute(args: TypesArgs) -> Result<()> {
    let registry = Registry::builtin();
    let names = registry.names();

    if args.json {
        println!("{}", serde_json::to_string(&names)?);
        return Ok(());
    }

    for name in names {
        if name == DEFAULT_KIND {
            println!("{name} (default)");
        } else {
            println!("{name}");
        }
    }
    Ok(())
}
