//! Archive integrity checks
//!
//! Archives are verified against a pinned SHA-256 when a dependency declares
//! one. [`crate::steps::fetch`] hashes the finished download and calls
//! [`check_digest`] before the archive is moved into place.

use crate::error::{BootstrapError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Chunk size for reading files during hashing (1MB)
const CHUNK_SIZE: usize = 1024 * 1024;

/// Compute the lowercase hex SHA-256 of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut f = std::fs::File::open(path).map_err(|e| BootstrapError::io(path, e))?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = f.read(&mut buffer).map_err(|e| BootstrapError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compare an already computed digest. `path` is only used for the error.
pub fn check_digest(path: &Path, expected: &str, actual: &str) -> Result<()> {
    let expected = expected.to_lowercase();
    if actual.to_lowercase() != expected {
        return Err(BootstrapError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected,
            actual: actual.to_lowercase(),
        });
    }
    Ok(())
}
