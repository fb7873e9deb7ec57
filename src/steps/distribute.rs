//! Shared-library distribution into the build output directories.

use crate::error::{BootstrapError, Result};
use crate::output;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

use super::prepare;

/// List the shared libraries directly inside `lib_dir` (non-recursive).
///
/// The extension match is case-insensitive. Returns an empty Vec when the
/// directory is missing.
pub fn find_libraries(lib_dir: &Path, ext: &str) -> Result<Vec<PathBuf>> {
    if !lib_dir.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&lib_dir.to_string_lossy()),
        Pattern::escape(ext)
    );
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let libraries = glob::glob_with(&pattern, options)
        .map_err(|e| BootstrapError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect();

    Ok(libraries)
}

/// Copy a file, creating the destination's parent directory as needed.
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    prepare::ensure_parent_dir(dest)?;
    std::fs::copy(src, dest).map_err(|e| BootstrapError::io(dest, e))
}

/// Copy every library in `lib_dir` into each of `targets`, overwriting
/// files of the same name.
///
/// A missing `lib_dir` copies nothing. Returns the distributed file names.
pub fn distribute(lib_dir: &Path, ext: &str, targets: &[PathBuf]) -> Result<Vec<String>> {
    let libraries = find_libraries(lib_dir, ext)?;
    let mut names = Vec::with_capacity(libraries.len());

    for lib in &libraries {
        let Some(name) = lib.file_name() else {
            continue;
        };
        for target in targets {
            copy_file(lib, &target.join(name))?;
        }
        names.push(name.to_string_lossy().to_string());
    }

    if names.is_empty() && lib_dir.is_dir() {
        output::warning(&format!("no .{} files in {}", ext, lib_dir.display()));
    } else if names.is_empty() {
        output::detail(&format!("no {} folder, nothing to copy", lib_dir.display()));
    } else {
        output::detail(&format!(
            "copied {} to {} directories",
            names.join(", "),
            targets.len()
        ));
    }

    Ok(names)
}
