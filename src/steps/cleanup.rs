//! Cleanup of transient download artifacts.

use crate::error::{BootstrapError, Result};
use std::path::Path;

/// Remove the downloaded archive and the extracted library sub-folder.
///
/// Either may already be gone; running this twice is harmless.
pub fn cleanup(archive: &Path, lib_dir: &Path) -> Result<()> {
    if archive.is_file() {
        std::fs::remove_file(archive).map_err(|e| BootstrapError::io(archive, e))?;
    }
    if lib_dir.is_dir() {
        std::fs::remove_dir_all(lib_dir).map_err(|e| BootstrapError::io(lib_dir, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cleanup_removes_archive_and_lib_dir() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("fmod.zip");
        let lib_dir = temp.path().join("dll");
        std::fs::write(&archive, "zip").unwrap();
        std::fs::create_dir_all(lib_dir.join("x86")).unwrap();
        std::fs::write(lib_dir.join("fmod.dll"), "dll").unwrap();
        std::fs::write(temp.path().join("fmod.hpp"), "header").unwrap();

        cleanup(&archive, &lib_dir).unwrap();

        assert!(!archive.exists());
        assert!(!lib_dir.exists());
        assert!(temp.path().join("fmod.hpp").exists());
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("glfw.zip");
        let lib_dir = temp.path().join("dll");

        cleanup(&archive, &lib_dir).unwrap();
        cleanup(&archive, &lib_dir).unwrap();
    }

    #[test]
    fn test_cleanup_archive_without_lib_dir() {
        let temp = tempdir().unwrap();
        let archive = temp.path().join("glfw.zip");
        std::fs::write(&archive, "zip").unwrap();

        cleanup(&archive, &temp.path().join("dll")).unwrap();
        assert!(!archive.exists());
    }
}
