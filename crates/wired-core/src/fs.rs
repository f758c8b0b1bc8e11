//! On-disk layout for mod storage.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::paths;
use crate::error::Result;

/// Resolve the persistent directory for `name` under `root`, creating it
/// (and parents) if absent.
///
/// The directory is created with permissive mode so both the platform
/// services and the mod host can write into it. Repeated calls are safe and
/// return the same path.
pub fn mod_dir(root: &Path, name: &str) -> Result<PathBuf> {
    let dir = root.join(paths::MOD_STORAGE).join(name);
    fs::create_dir_all(&dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o777))?;
    }
    Ok(dir)
}
