//! Error types for the casklock CLI.
//!
//! Uses thiserror for derive macros and keeps every failure class user-facing:
//! each variant is a fatal, classified condition that aborts the run with a
//! single message and its own exit code.

use crate::exit_codes;
use thiserror::Error;

/// Fatal error classes for a lock request.
///
/// The validation chain in [`crate::lock`] produces these in strict order, so
/// the first variant raised is the only one the user ever sees. No client-side
/// state is mutated before the final transport step, which means every error
/// leaves the filesystem exactly as it was.
#[derive(Error, Debug)]
pub enum LockError {
    /// The invocation is malformed beyond what argument parsing catches.
    #[error("{0}")]
    InvalidArgument(String),

    /// The target path does not exist.
    #[error("'{0}' does not exist")]
    NotFound(String),

    /// The target sits on a different device than its parent directory.
    #[error("'{0}' is a mount point itself")]
    MountPoint(String),

    /// The parent directory does not carry the control channel signature.
    #[error("'{0}' is not on a cask file system")]
    NotOnFilesystem(String),

    /// The caller's effective user is not the channel owner.
    #[error("only the mounting user may lock directories on this file system")]
    PermissionDenied,

    /// The attribute write failed, or the channel disappeared mid-operation.
    #[error("{0}")]
    Transport(String),
}

impl LockError {
    /// Returns the exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::InvalidArgument(_) => exit_codes::USER_ERROR,
            LockError::NotFound(_) => exit_codes::NOT_FOUND,
            LockError::MountPoint(_) => exit_codes::MOUNT_CONFLICT,
            LockError::NotOnFilesystem(_) => exit_codes::NOT_ON_FILESYSTEM,
            LockError::PermissionDenied => exit_codes::PERMISSION_DENIED,
            LockError::Transport(_) => exit_codes::TRANSPORT_FAILURE,
        }
    }
}

/// Result type alias for casklock operations.
pub type Result<T> = std::result::Result<T, LockError>;
