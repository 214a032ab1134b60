//! Lock target resolution for casklock.
//!
//! The target argument is normalized and validated here before any control
//! channel work happens: trailing separators are stripped so `dir/` and `dir`
//! behave identically, and the path must name an existing directory. The
//! parent is fixed to its absolute form because that is where the control
//! channel lives. The mount boundary check also lives here since it is a pure
//! property of the target/parent pair.

use crate::error::{LockError, Result};
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Component, Path, PathBuf};

/// A validated lock target: the directory to make immutable plus the absolute
/// parent directory that hosts the control channel.
///
/// The target keeps the caller's stripped, possibly relative spelling so
/// error messages read back what the user typed; only the parent is
/// absolutized.
#[derive(Debug, Clone)]
pub struct LockTarget {
    path: PathBuf,
    parent: PathBuf,
}

impl LockTarget {
    /// Resolve and validate a caller-supplied directory argument.
    ///
    /// Strips the trailing separator run, requires the result to exist and be
    /// a directory, and computes the absolute parent with `.` and `..`
    /// collapsed. Absolutization is lexical (no symlink resolution), so a
    /// symlinked target is addressed through the parent the caller spelled.
    pub fn resolve(raw: &str) -> Result<Self> {
        let name = raw.trim_end_matches('/');
        if name.is_empty() {
            return Err(LockError::NotFound(name.to_string()));
        }

        let path = PathBuf::from(name);
        let meta = fs::metadata(&path).map_err(|_| LockError::NotFound(name.to_string()))?;
        if !meta.is_dir() {
            return Err(LockError::InvalidArgument(format!(
                "'{}' is not a directory",
                name
            )));
        }

        let abs = std::path::absolute(&path)
            .map_err(|e| LockError::InvalidArgument(format!("cannot resolve '{}': {}", name, e)))?;
        let abs = normalize(&abs);
        let parent = abs
            .parent()
            .ok_or_else(|| {
                LockError::InvalidArgument(format!("'{}' has no parent directory", name))
            })?
            .to_path_buf();

        Ok(Self { path, parent })
    }

    /// The normalized target path, as the caller spelled it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The absolute directory containing the target.
    pub fn parent(&self) -> &Path {
        &self.parent
    }

    /// Verify the target is not a mount point of its own.
    ///
    /// The control channel is per mounted instance, so target and parent must
    /// report the same device. A differing device means the parent belongs to
    /// another filesystem and any channel found there would address the wrong
    /// instance, or none at all.
    pub fn ensure_not_mount_point(&self) -> Result<()> {
        if device_of(&self.path)? != device_of(&self.parent)? {
            return Err(LockError::MountPoint(self.path.display().to_string()));
        }
        Ok(())
    }

    /// The target's inode number, read fresh from filesystem metadata.
    pub fn inode(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|m| m.ino())
            .map_err(|_| LockError::NotFound(self.path.display().to_string()))
    }
}

/// Collapse `.` and `..` components of an absolute path lexically, so that
/// `parent()` yields the directory that actually contains the target rather
/// than a path still carrying a trailing `..`. A `..` at the root stays at
/// the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Device identifier of a path; a vanished path reads as not found.
fn device_of(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|m| m.dev())
        .map_err(|_| LockError::NotFound(path.display().to_string()))
}
