//! Dependency descriptors and the optional `bootstrap.toml` manifest
//!
//! Without a manifest the bootstrapper installs the built-in set of
//! prebuilt engine dependencies:
//!
//! ```toml
//! engine_dir = "LumEngine"
//!
//! [[dependency]]
//! name = "fmod"
//! url = "https://github.com/3zymek/LumEngineExternal/releases/download/v0.1.0/fmod.zip"
//! # archive = "fmod.zip"
//! # lib_dir = "dll"
//! # lib_ext = "dll"
//! # sha256 = "..."
//! ```

use crate::error::{BootstrapError, Result};
use crate::layout::ProjectLayout;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Manifest file looked up in the project root when none is given explicitly
pub const MANIFEST_FILE: &str = "bootstrap.toml";

/// Engine source directory holding `external/`
pub const DEFAULT_ENGINE_DIR: &str = "LumEngine";

/// Sub-folder of an extracted archive holding runtime libraries
pub const DEFAULT_LIB_DIR: &str = "dll";

/// Extension of runtime libraries inside [`DEFAULT_LIB_DIR`]
pub const DEFAULT_LIB_EXT: &str = "dll";

/// Repository publishing the prebuilt dependency archives
const EXTERNAL_REPO: &str = "3zymek/LumEngineExternal";

/// One third-party library to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Name, also used as the directory under `external/`
    pub name: String,
    /// Where the zip archive is downloaded from
    pub url: String,
    /// File name the archive is saved as inside the destination directory
    pub archive: String,
    /// Sub-folder of the archive holding shared libraries
    pub lib_dir: String,
    /// Shared-library extension, without the dot
    pub lib_ext: String,
    /// Expected SHA-256 of the archive, if pinned
    pub sha256: Option<String>,
}

impl Dependency {
    /// Create a descriptor with the default library conventions.
    ///
    /// The archive name is taken from the last URL path segment.
    pub fn new(name: &str, url: &str) -> Self {
        let archive = archive_name_from_url(url).unwrap_or_else(|| format!("{}.zip", name));
        Self {
            name: name.to_string(),
            url: url.to_string(),
            archive,
            lib_dir: DEFAULT_LIB_DIR.to_string(),
            lib_ext: DEFAULT_LIB_EXT.to_string(),
            sha256: None,
        }
    }

    /// Descriptor for `<name>.zip` attached to a GitHub release.
    pub fn github_release(repo: &str, version: &str, name: &str) -> Self {
        Self::new(name, &github_release_url(repo, version, name))
    }

    /// Pin the expected SHA-256 of the archive.
    pub fn with_sha256(mut self, sha256: &str) -> Self {
        self.sha256 = Some(sha256.to_lowercase());
        self
    }

    /// Directory the archive is extracted into.
    pub fn destination(&self, layout: &ProjectLayout) -> PathBuf {
        layout.external_dir().join(&self.name)
    }

    /// Where the downloaded archive lives until cleanup.
    pub fn archive_path(&self, layout: &ProjectLayout) -> PathBuf {
        self.destination(layout).join(&self.archive)
    }

    /// The extracted library sub-folder, removed after distribution.
    pub fn lib_dir_path(&self, layout: &ProjectLayout) -> PathBuf {
        self.destination(layout).join(&self.lib_dir)
    }
}

/// `https://github.com/<repo>/releases/download/<version>/<name>.zip`
pub fn github_release_url(repo: &str, version: &str, name: &str) -> String {
    format!(
        "https://github.com/{}/releases/download/{}/{}.zip",
        repo, version, name
    )
}

/// The dependencies installed when no manifest lists any.
pub fn builtin_dependencies() -> Vec<Dependency> {
    vec![
        Dependency::github_release(EXTERNAL_REPO, "v0.1.0", "fmod"),
        Dependency::github_release(EXTERNAL_REPO, "v0.2.0", "glfw"),
        Dependency::github_release(EXTERNAL_REPO, "v0.3.0", "assimp"),
    ]
}

/// Last path segment of a URL, ignoring query string and fragment.
fn archive_name_from_url(url: &str) -> Option<String> {
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    let (_, rest) = clean.split_once("://")?;
    let (_, path) = rest.split_once('/')?;
    path.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A single path component: no separators, not `.` or `..`.
fn is_plain_component(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ManifestToml {
    engine_dir: Option<String>,
    #[serde(default, rename = "dependency")]
    dependencies: Vec<DependencyToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyToml {
    name: String,
    url: String,
    archive: Option<String>,
    lib_dir: Option<String>,
    lib_ext: Option<String>,
    sha256: Option<String>,
}

/// Resolved bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Engine directory name under the project root
    pub engine_dir: String,
    /// Dependencies in installation order
    pub dependencies: Vec<Dependency>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            engine_dir: DEFAULT_ENGINE_DIR.to_string(),
            dependencies: builtin_dependencies(),
        }
    }
}

impl Manifest {
    /// Pick the manifest for a project.
    ///
    /// An explicit path must exist. Otherwise `<project>/bootstrap.toml` is
    /// used when present, falling back to the built-in defaults.
    pub fn resolve(project_root: &Path, explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = project_root.join(MANIFEST_FILE);
                if path.is_file() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| BootstrapError::io(path, e))?;
        Self::parse(&content, path)
    }

    /// Parse manifest text. `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let invalid = |message: String| BootstrapError::Manifest {
            path: path.to_path_buf(),
            message,
        };

        let raw: ManifestToml = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;

        let engine_dir = raw
            .engine_dir
            .unwrap_or_else(|| DEFAULT_ENGINE_DIR.to_string());
        if !is_plain_component(&engine_dir) {
            return Err(invalid(format!("invalid engine_dir '{}'", engine_dir)));
        }

        if raw.dependencies.is_empty() {
            return Ok(Self {
                engine_dir,
                dependencies: builtin_dependencies(),
            });
        }

        let mut seen = HashSet::new();
        let mut dependencies = Vec::with_capacity(raw.dependencies.len());

        for dep in raw.dependencies {
            if !is_plain_component(&dep.name) {
                return Err(invalid(format!("invalid dependency name '{}'", dep.name)));
            }
            if !seen.insert(dep.name.clone()) {
                return Err(invalid(format!("duplicate dependency '{}'", dep.name)));
            }

            let url_lower = dep.url.to_lowercase();
            if !url_lower.starts_with("https://") && !url_lower.starts_with("http://") {
                return Err(invalid(format!(
                    "dependency '{}': URL must use http:// or https://\n  got: {}",
                    dep.name, dep.url
                )));
            }

            let mut resolved = Dependency::new(&dep.name, &dep.url);

            if let Some(archive) = dep.archive {
                if !is_plain_component(&archive) {
                    return Err(invalid(format!(
                        "dependency '{}': invalid archive name '{}'",
                        dep.name, archive
                    )));
                }
                resolved.archive = archive;
            }
            if let Some(lib_dir) = dep.lib_dir {
                if !is_plain_component(&lib_dir) {
                    return Err(invalid(format!(
                        "dependency '{}': invalid lib_dir '{}'",
                        dep.name, lib_dir
                    )));
                }
                resolved.lib_dir = lib_dir;
            }
            if let Some(lib_ext) = dep.lib_ext {
                let lib_ext = lib_ext.trim_start_matches('.').to_string();
                if lib_ext.is_empty() {
                    return Err(invalid(format!("dependency '{}': empty lib_ext", dep.name)));
                }
                resolved.lib_ext = lib_ext;
            }
            if let Some(sha256) = dep.sha256 {
                if sha256.len() != 64 || !sha256.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(invalid(format!(
                        "dependency '{}': sha256 must be 64 hex characters",
                        dep.name
                    )));
                }
                resolved = resolved.with_sha256(&sha256);
            }

            dependencies.push(resolved);
        }

        Ok(Self {
            engine_dir,
            dependencies,
        })
    }

    /// Override the engine directory. It must be a single path component.
    pub fn set_engine_dir(&mut self, engine_dir: &str) -> Result<()> {
        if !is_plain_component(engine_dir) {
            return Err(BootstrapError::Manifest {
                path: PathBuf::from("--engine-dir"),
                message: format!("invalid engine_dir '{}'", engine_dir),
            });
        }
        self.engine_dir = engine_dir.to_string();
        Ok(())
    }

    /// Restrict to the named dependencies, keeping manifest order.
    ///
    /// An empty filter selects everything.
    pub fn select(&self, names: &[String]) -> Result<Vec<&Dependency>> {
        if let Some(unknown) = names
            .iter()
            .find(|n| !self.dependencies.iter().any(|d| &d.name == *n))
        {
            return Err(BootstrapError::UnknownDependency(unknown.clone()));
        }

        Ok(self
            .dependencies
            .iter()
            .filter(|d| names.is_empty() || names.contains(&d.name))
            .collect())
    }
}
