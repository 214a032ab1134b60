//! Control channel discovery and the lock request transport.
//!
//! The cask driver does not expose an RPC surface. Commands travel through a
//! synthetic control file: the driver resolves the reserved name [`CTRL_NAME`]
//! inside any directory it governs, but never reports that name in directory
//! listings. Writing a named extended attribute on the control file is the
//! command submission; the `lock` command carries the target's inode number as
//! a 4-byte native-endian value and reads no acknowledgement back.

use crate::error::{LockError, Result};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reserved name of the control file inside a governed directory.
pub const CTRL_NAME: &str = ".__cask_ctrl__";

/// Extended attribute name carrying the lock command.
pub const LOCK_COMMAND: &str = "lock";

/// Check whether `parent` carries the control channel signature.
///
/// Two independent observations must agree: the reserved name is absent from
/// the directory listing, yet a direct lookup of the same name resolves. Only
/// the driver's virtual-entry mechanism produces that combination. A plain
/// directory fails the lookup half, and a look-alike real file fails the
/// hidden half. An I/O failure while probing leaves the signature
/// unverifiable and counts as absent.
pub fn is_control_channel(parent: &Path) -> bool {
    let listed = match fs::read_dir(parent) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.file_name() == CTRL_NAME),
        Err(_) => return false,
    };

    !listed && fs::metadata(parent.join(CTRL_NAME)).is_ok()
}

/// Handle to a located control channel.
#[derive(Debug, Clone)]
pub struct ControlChannel {
    path: PathBuf,
}

impl ControlChannel {
    /// Locate the control channel under `parent`, if the signature holds.
    pub fn locate(parent: &Path) -> Option<Self> {
        if is_control_channel(parent) {
            Some(Self {
                path: parent.join(CTRL_NAME),
            })
        } else {
            None
        }
    }

    /// Path of the control file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the caller may issue commands on this channel.
    ///
    /// The driver sets the channel's owner to the user that performed the
    /// mount; only that effective user is accepted. The comparison is strict
    /// equality: being the superuser grants nothing unless the mount was
    /// performed as the superuser.
    pub fn ensure_caller_is_owner(&self) -> Result<()> {
        let meta = fs::metadata(&self.path).map_err(|e| {
            LockError::Transport(format!(
                "failed to read control channel '{}': {}",
                self.path.display(),
                e
            ))
        })?;
        verify_owner(meta.uid(), effective_uid())
    }

    /// Submit the lock command for `inode`.
    ///
    /// Fire-and-forget: one attribute write, at most once, nothing read back.
    /// A failed write leaves the target's mutability unchanged and is
    /// reported verbatim.
    pub fn send_lock(&self, inode: u64) -> Result<()> {
        let payload = encode_lock_request(inode)?;
        debug!(
            "writing '{}' request for inode {} to '{}'",
            LOCK_COMMAND,
            inode,
            self.path.display()
        );
        xattr::set(&self.path, LOCK_COMMAND, &payload).map_err(|e| {
            LockError::Transport(format!(
                "failed to send lock command to '{}': {}",
                self.path.display(),
                e
            ))
        })
    }
}

/// Strict owner equality: channel owner vs the caller's effective uid.
fn verify_owner(channel_uid: u32, caller_uid: u32) -> Result<()> {
    if channel_uid != caller_uid {
        return Err(LockError::PermissionDenied);
    }
    Ok(())
}

/// Encode an inode number into the fixed 4-byte request payload.
///
/// The wire format is a native-endian `u32`; an inode outside that range
/// cannot be addressed by the protocol at all.
fn encode_lock_request(inode: u64) -> Result<[u8; 4]> {
    u32::try_from(inode).map(u32::to_ne_bytes).map_err(|_| {
        LockError::Transport(format!(
            "inode number {} does not fit the 4-byte lock request format",
            inode
        ))
    })
}

fn effective_uid() -> u32 {
    unsafe { libc::geteuid() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn plain_directory_is_not_a_channel() {
        let dir = TempDir::new().unwrap();
        assert!(!is_control_channel(dir.path()));
    }

    #[test]
    fn listed_control_name_is_not_a_channel() {
        // A real file with the reserved name shows up in the listing, which
        // breaks the hidden-entry half of the signature.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CTRL_NAME), b"").unwrap();
        assert!(!is_control_channel(dir.path()));
    }

    #[test]
    fn missing_directory_is_not_a_channel() {
        let dir = TempDir::new().unwrap();
        assert!(!is_control_channel(&dir.path().join("absent")));
    }

    #[test]
    fn locate_fails_on_ordinary_directories() {
        let dir = TempDir::new().unwrap();
        assert!(ControlChannel::locate(dir.path()).is_none());
    }

    #[test]
    fn owner_match_is_accepted() {
        assert!(verify_owner(1000, 1000).is_ok());
        assert!(verify_owner(0, 0).is_ok());
    }

    #[test]
    fn owner_mismatch_is_permission_denied() {
        let err = verify_owner(1000, 0).unwrap_err();
        assert!(matches!(err, LockError::PermissionDenied));

        // no superuser carve-out in either direction
        let err = verify_owner(0, 1000).unwrap_err();
        assert!(matches!(err, LockError::PermissionDenied));
    }

    #[test]
    fn caller_owns_files_it_creates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CTRL_NAME);
        fs::write(&path, b"").unwrap();

        let channel = ControlChannel { path };
        assert!(channel.ensure_caller_is_owner().is_ok());
    }

    #[test]
    fn vanished_channel_is_a_transport_error() {
        let dir = TempDir::new().unwrap();
        let channel = ControlChannel {
            path: dir.path().join(CTRL_NAME),
        };

        let err = channel.ensure_caller_is_owner().unwrap_err();
        assert!(matches!(err, LockError::Transport(_)));
    }

    #[test]
    fn lock_request_encoding_is_native_endian() {
        assert_eq!(encode_lock_request(1).unwrap(), 1u32.to_ne_bytes());
        assert_eq!(
            encode_lock_request(0xDEAD_BEEF).unwrap(),
            0xDEAD_BEEF_u32.to_ne_bytes()
        );
    }

    #[test]
    fn oversized_inode_cannot_be_encoded() {
        let err = encode_lock_request(u64::from(u32::MAX) + 1).unwrap_err();
        assert!(matches!(err, LockError::Transport(_)));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn send_lock_outside_the_filesystem_is_a_transport_error() {
        // Ordinary filesystems reject attribute names outside the well-known
        // namespaces, so a lock write that misses the driver comes back as a
        // transport failure rather than silently landing somewhere.
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CTRL_NAME);
        fs::write(&path, b"").unwrap();

        let channel = ControlChannel { path };
        let err = channel.send_lock(42).unwrap_err();
        assert!(matches!(err, LockError::Transport(_)));
    }
}
