//! Directory preparation.

use crate::error::{BootstrapError, Result};
use std::path::Path;

/// Create every directory in `dirs` along with missing parents.
///
/// Directories that already exist are left alone.
pub fn ensure_dirs<P: AsRef<Path>>(dirs: &[P]) -> Result<()> {
    for dir in dirs {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| BootstrapError::io(dir, e))?;
    }
    Ok(())
}

/// Ensure a file's parent directory exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dirs(&[parent])?;
    }
    Ok(())
}
