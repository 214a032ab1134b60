//! Casklock: make directory trees on a cask file system immutable.
//!
//! This is the main entry point for the `casklock` CLI. It parses arguments,
//! initializes logging, runs the lock operation, and handles errors with
//! proper exit codes.

mod cli;
pub mod ctrl;
pub mod error;
pub mod exit_codes;
pub mod lock;
pub mod logging;
pub mod target;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init(cli.debug, cli.quiet);

    match lock::lock_tree(&cli.directory) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
