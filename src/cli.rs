//! Command line surface.

use clap::Parser;

/// Make a directory tree on a cask file system immutable.
///
/// No changes of any sort can be performed on the tree after locking. An
/// immutable tree can only be deleted as a whole with caskrm.
#[derive(Parser, Debug)]
#[command(name = "casklock")]
#[command(author, version, about)]
pub struct Cli {
    /// Directory to make immutable
    pub directory: String,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Only report errors and warnings
    #[arg(long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
