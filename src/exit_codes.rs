//! Exit code constants for the casklock CLI.
//!
//! Each fatal error class gets its own code so callers and scripts can tell
//! the failure modes apart:
//! - 0: Success
//! - 1: Invalid argument (target exists but cannot be locked)
//! - 2: Target path does not exist
//! - 3: Target is a mount point itself
//! - 4: Target is not on a cask file system
//! - 5: Caller is not the mounting user
//! - 6: Lock request could not be delivered

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Invalid argument: a semantically malformed target (e.g. not a directory).
pub const USER_ERROR: i32 = 1;

/// The target path does not exist.
pub const NOT_FOUND: i32 = 2;

/// The target sits on a different device than its parent, so it is a mount
/// point of its own.
pub const MOUNT_CONFLICT: i32 = 3;

/// The parent directory does not carry a cask control channel.
pub const NOT_ON_FILESYSTEM: i32 = 4;

/// The caller's effective user is not the control channel's owner.
pub const PERMISSION_DENIED: i32 = 5;

/// The lock request could not be written to the control channel.
pub const TRANSPORT_FAILURE: i32 = 6;
