//! Build configuration step
//!
//! Runs the configuration tool (CMake by default) as `<tool> <project-root>`
//! inside `<project-root>/build`. The working directory is set on the child
//! process only.

use crate::error::{BootstrapError, Result};
use crate::layout::ProjectLayout;
use crate::steps::prepare;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

/// Configuration tool used when none is given
pub const DEFAULT_TOOL: &str = "cmake";

/// Create the build output directories and run the configuration tool.
///
/// Fails with [`BootstrapError::ToolNotFound`] if `tool` cannot be spawned
/// and [`BootstrapError::ToolFailed`] on a non-zero exit status. A `tool`
/// given as a path is resolved against the caller's working directory.
pub fn configure(tool: &str, layout: &ProjectLayout) -> Result<()> {
    prepare::ensure_dirs(&layout.output_dirs())?;

    let root =
        std::path::absolute(layout.root()).map_err(|e| BootstrapError::io(layout.root(), e))?;
    let build_dir = layout.build_dir();

    // Bare names go through PATH; anything else must not be looked up from build/.
    let program = if tool.contains(['/', '\\']) {
        std::path::absolute(tool).map_err(|e| BootstrapError::io(tool, e))?
    } else {
        PathBuf::from(tool)
    };

    let status = Command::new(&program)
        .arg(&root)
        .current_dir(&build_dir)
        .status()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => BootstrapError::ToolNotFound {
                tool: tool.to_string(),
            },
            _ => BootstrapError::io(&build_dir, e),
        })?;

    if !status.success() {
        return Err(BootstrapError::ToolFailed {
            tool: tool.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}
