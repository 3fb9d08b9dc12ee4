//! Status messages on stderr.

mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use messages::{info, success};

static COLORS: AtomicBool = AtomicBool::new(true);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Decide once whether status messages are colored or shown at all.
///
/// Colors are off with `--no-color` or `NO_COLOR`; otherwise they follow
/// the terminal. `--quiet` silences status messages.
pub fn init(no_color: bool, quiet: bool) {
    let colors = !no_color && crate::logger::should_use_colors();
    COLORS.store(colors, Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
