//! Diagnostic logging setup for casklock.
//!
//! The binary installs one process-wide `tracing` subscriber at startup.
//! `--debug` raises the maximum level to DEBUG, `--quiet` lowers it to WARN so
//! only problems are reported. Fatal errors bypass the subscriber entirely:
//! `main` prints them on stderr regardless of the chosen level.
//!
//! Re-initialization is guarded by an explicit flag, so a second [`init`] call
//! (from tests, or from an embedding harness that configured logging already)
//! is a recorded no-op instead of an error.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

static CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Install the global fmt subscriber once.
///
/// The first call decides the level; later calls leave the existing
/// configuration alone.
pub fn init(debug: bool, quiet: bool) {
    if CONFIGURED.swap(true, Ordering::SeqCst) {
        info!("logging already initialized");
        return;
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(debug, quiet))
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        debug!("a global subscriber is already installed");
    }
}

/// Level selection: `--debug` wins over `--quiet`.
fn level_for(debug: bool, quiet: bool) -> Level {
    if debug {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn debug_wins_over_quiet() {
        assert_eq!(level_for(true, true), Level::DEBUG);
        assert_eq!(level_for(true, false), Level::DEBUG);
    }

    #[test]
    fn quiet_drops_to_warnings() {
        assert_eq!(level_for(false, true), Level::WARN);
    }

    #[test]
    fn default_level_is_info() {
        assert_eq!(level_for(false, false), Level::INFO);
    }

    #[test]
    #[serial]
    fn init_is_idempotent() {
        // Later calls must not panic or replace the first configuration.
        init(false, false);
        init(true, false);
        init(false, true);
    }
}
