//! The lock operation: validation chain plus command submission.

use crate::ctrl::ControlChannel;
use crate::error::{LockError, Result};
use crate::target::LockTarget;
use tracing::debug;

/// Make the directory tree rooted at `directory` immutable.
///
/// Validations run in a fixed order and the first failure wins: the target
/// must resolve to an existing directory, must not itself be a mount point,
/// its parent must expose the control channel, and the caller must be the
/// mounting user. Only then is the lock command submitted. Nothing before
/// the final attribute write changes any state, so a failed run leaves the
/// tree exactly as mutable as before.
pub fn lock_tree(directory: &str) -> Result<()> {
    let target = LockTarget::resolve(directory)?;
    debug!(
        "resolved '{}' with parent '{}'",
        target.path().display(),
        target.parent().display()
    );

    target.ensure_not_mount_point()?;
    debug!("'{}' shares a device with its parent", target.path().display());

    let channel = ControlChannel::locate(target.parent())
        .ok_or_else(|| LockError::NotOnFilesystem(target.path().display().to_string()))?;
    debug!("control channel found at '{}'", channel.path().display());

    channel.ensure_caller_is_owner()?;
    debug!("caller is the channel owner");

    let inode = target.inode()?;
    channel.send_lock(inode)?;
    debug!(
        "lock request for '{}' (inode {}) submitted",
        target.path().display(),
        inode
    );
    Ok(())
}
