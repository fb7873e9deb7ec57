//! The individual bootstrap steps
//!
//! Each step is a plain function over explicit paths, run in this order for
//! every dependency:
//!
//! 1. [`prepare::ensure_dirs`] - destination and build output directories
//! 2. [`fetch::fetch`] - download the archive (verifying a pinned sha256)
//! 3. [`extract::extract_zip`] - unpack everything into the destination
//! 4. [`distribute::distribute`] - copy shared libraries to Debug and Release
//! 5. [`cleanup::cleanup`] - delete the archive and the library sub-folder

pub mod cleanup;
pub mod distribute;
pub mod extract;
pub mod fetch;
pub mod prepare;
pub mod verify;
