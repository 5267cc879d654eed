//! Streaming SHA-256 digest computation.
//!
//! Digests are algorithm-tagged (`sha256:<64 hex chars>`) so that stores
//! written under a future algorithm remain self-describing and comparisons
//! against stale values fail loudly instead of silently.

use anyhow::{Context, Result, bail};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Prefix identifying the digest algorithm in recorded values.
pub const DIGEST_PREFIX: &str = "sha256:";

/// Block size for streaming reads. Bounds memory for arbitrarily large files.
const BLOCK_SIZE: usize = 65536;

/// Digests an in-memory byte slice.
#[must_use]
pub fn digest_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{DIGEST_PREFIX}{:x}", hasher.finalize())
}

/// Digests a file's raw bytes, streaming in fixed-size blocks.
///
/// No text normalization is applied: two files digest equal iff they are
/// byte-for-byte identical, regardless of name, path, or platform.
///
/// # Errors
/// Returns an error if the file does not exist or cannot be read.
pub fn digest_file(path: &Path) -> Result<String> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BLOCK_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{DIGEST_PREFIX}{:x}", hasher.finalize()))
}
