//! Directory layout of the engine checkout.
//!
//! This module only defines WHERE things go; the steps decide what happens
//! there.

use std::path::{Path, PathBuf};

/// Paths derived from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    engine_dir: String,
}

impl ProjectLayout {
    pub fn new(root: &Path, engine_dir: &str) -> Self {
        Self {
            root: root.to_path_buf(),
            engine_dir: engine_dir.to_string(),
        }
    }

    /// Project root, passed to the build configuration tool
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/build`
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// `<root>/build/Debug`
    pub fn debug_dir(&self) -> PathBuf {
        self.build_dir().join("Debug")
    }

    /// `<root>/build/Release`
    pub fn release_dir(&self) -> PathBuf {
        self.build_dir().join("Release")
    }

    /// Both build output directories, debug first.
    pub fn output_dirs(&self) -> [PathBuf; 2] {
        [self.debug_dir(), self.release_dir()]
    }

    /// `<root>/<engine>/external`
    pub fn external_dir(&self) -> PathBuf {
        self.root.join(&self.engine_dir).join("external")
    }
}
