use std::path::{Path, PathBuf};

use packrig_config::Environment;

/// Extensions tried for an environment-specific entry, in order
pub const ENTRY_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Pick the entry module inside `entry_folder`.
///
/// Prefers `index.<environment>.<ext>` and otherwise returns the folder
/// itself, leaving index resolution to the bundler. The folder does not
/// need to exist.
pub fn resolve_entry(entry_folder: &Path, environment: &Environment) -> PathBuf {
    let specific = ENTRY_EXTENSIONS
        .iter()
        .map(|ext| entry_folder.join(format!("index.{environment}.{ext}")))
        .find(|candidate| candidate.is_file());

    match specific {
        Some(entry) => {
            tracing::debug!("Using environment-specific entry {}", entry.display());
            entry
        }
        None => {
            tracing::debug!(
                "No index.{}.* in {}, using the folder as entry",
                environment,
                entry_folder.display()
            );
            entry_folder.to_path_buf()
        }
    }
}
