//! Development environment bootstrapper for LumEngine
//!
//! Prepares a fresh checkout for building: creates `build/Debug` and
//! `build/Release`, runs CMake against the project root, then installs each
//! prebuilt third-party dependency (FMOD, GLFW, Assimp) by downloading its
//! release zip, unpacking it into `<engine>/external/<name>/`, copying the
//! shared libraries from its `dll/` folder into both build output
//! directories and deleting the archive and the `dll/` folder.
//!
//! # Example
//!
//! ```no_run
//! use lum_bootstrap::{Bootstrapper, Manifest, ProjectLayout};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let manifest = Manifest::resolve(root, None)?;
//! let layout = ProjectLayout::new(root, &manifest.engine_dir);
//! Bootstrapper::new(layout).run(&manifest.dependencies)?;
//! # Ok::<(), lum_bootstrap::BootstrapError>(())
//! ```
//!
//! # Dependencies
//!
//! The built-in dependency list can be replaced with a `bootstrap.toml` in
//! the project root, see [`config`].

pub mod bootstrap;
pub mod config;
pub mod configure;
pub mod error;
pub mod layout;
pub mod output;
pub mod progress;
pub mod steps;

pub use bootstrap::{Bootstrapper, InstallReport};
pub use config::{Dependency, Manifest};
pub use error::BootstrapError;
pub use layout::ProjectLayout;
