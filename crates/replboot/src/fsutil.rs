//! Convergent filesystem helpers.
//!
//! Every artifact write in this crate goes through here: content is
//! compared before writing so an already-converged file is not
//! rewritten (a second identical run is byte-identical), while mode
//! and optional ownership are reasserted on every run — drifted
//! permissions get repaired even when the content still matches.

use std::fs;
use std::io;
use std::path::Path;

use replboot_core::NodeTopologyConfig;

/// Ownership to apply to created artifacts. Applied only when both
/// uid and gid are configured (i.e. a privileged production run);
/// otherwise files belong to the invoking user.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Owner {
    uid: Option<u32>,
    gid: Option<u32>,
}

impl Owner {
    pub(crate) const fn from_config(config: &NodeTopologyConfig) -> Self {
        Self {
            uid: config.service_uid,
            gid: config.service_gid,
        }
    }

    #[cfg(test)]
    pub(crate) const fn new(uid: Option<u32>, gid: Option<u32>) -> Self {
        Self { uid, gid }
    }

    #[cfg(unix)]
    fn apply(self, path: &Path) -> io::Result<()> {
        if let (Some(uid), Some(gid)) = (self.uid, self.gid) {
            std::os::unix::fs::chown(path, Some(uid), Some(gid))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn apply(self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Create a directory (and parents) with owner-only access.
pub(crate) fn ensure_private_dir(path: &Path, owner: Owner) -> io::Result<()> {
    fs::create_dir_all(path)?;
    set_mode(path, 0o700)?;
    owner.apply(path)
}

/// Write `content` to `path` unless the file already holds exactly
/// that content. Mode and ownership are reasserted either way.
/// Returns whether content was written.
pub(crate) fn write_if_changed(
    path: &Path,
    content: &str,
    mode: u32,
    owner: Owner,
) -> io::Result<bool> {
    let converged = fs::read_to_string(path).is_ok_and(|existing| existing == content);
    if !converged {
        fs::write(path, content)?;
    }
    set_mode(path, mode)?;
    owner.apply(path)?;
    Ok(!converged)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(mode);
    fs::set_permissions(path, perms)
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}
