//! Zip extraction
//!
//! Uses the `zip` crate, no external tools required.

use crate::error::{BootstrapError, Result};
use crate::output;
use crate::progress;
use std::fs::File;
use std::path::Path;

use super::prepare;

/// Extract every entry of a zip archive into `dest`, keeping relative paths.
///
/// Returns the number of entries extracted. An entry that would land outside
/// `dest` fails the whole extraction.
///
/// # Example
/// ```ignore
/// extract_zip(Path::new("external/fmod/fmod.zip"), Path::new("external/fmod"))?;
/// ```
pub fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize> {
    prepare::ensure_dirs(&[dest])?;

    let filename = archive_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "archive".to_string());

    let count = progress::with_spinner(&format!("extracting {}", filename), || {
        unpack(archive_path, dest)
    })?;

    output::detail(&format!(
        "extracted {} ({} entries) to {}",
        filename,
        count,
        dest.display()
    ));
    Ok(count)
}

fn unpack(archive_path: &Path, dest: &Path) -> Result<usize> {
    let zip_err = |source| BootstrapError::Zip {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| BootstrapError::io(archive_path, e))?;
    let mut archive = zip::ZipArchive::new(file).map_err(zip_err)?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(zip_err)?;

        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                return Err(BootstrapError::UnsafeEntry {
                    archive: archive_path.to_path_buf(),
                    entry: entry.name().to_string(),
                });
            }
        };

        if entry.is_dir() {
            prepare::ensure_dirs(&[&outpath])?;
            continue;
        }

        prepare::ensure_parent_dir(&outpath)?;

        let mut outfile = File::create(&outpath).map_err(|e| BootstrapError::io(&outpath, e))?;
        std::io::copy(&mut entry, &mut outfile).map_err(|e| BootstrapError::io(&outpath, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                let perms = std::fs::Permissions::from_mode(mode & 0o7777);
                std::fs::set_permissions(&outpath, perms)
                    .map_err(|e| BootstrapError::io(&outpath, e))?;
            }
        }
    }

    Ok(archive.len())
}
