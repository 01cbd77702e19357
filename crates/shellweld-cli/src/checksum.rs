//! SHA-512 checksum sidecar files.
//!
//! Every artifact gets a `<dest>.sha512` companion in the same format
//! `sha512sum` prints, so `sha512sum -c` can verify a deployment.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha512};

/// Computes the SHA-512 digest of a file, as lowercase hex.
pub fn sha512_hex(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha512::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Sidecar location for a destination, as displayed.
pub fn sidecar_path(dest_display: &str) -> PathBuf {
    PathBuf::from(format!("{dest_display}.sha512"))
}

/// Hashes the artifact and writes `<hex>  <dest>` beside it.
///
/// # Arguments
/// * `dest` - The artifact to hash
/// * `dest_display` - The destination as shown to the user; named in the
///   sidecar so verification uses the same relative path
///
/// # Returns
/// * The hex digest written to the sidecar
pub fn write_sidecar(dest: &Path, dest_display: &str) -> io::Result<String> {
    let hex = sha512_hex(dest)?;
    fs::write(sidecar_path(dest_display), format!("{hex}  {dest_display}\n"))?;
    Ok(hex)
}
