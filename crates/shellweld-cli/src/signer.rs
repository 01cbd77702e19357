//! Detached signatures via an external gpg binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Environment variable consulted for the gpg binary location.
pub const GPG_ENV_VAR: &str = "SHELLWELD_GPG";

/// Well-known install locations checked after `PATH`.
const COMMON_GPG_PATHS: &[&str] = &[
    "/usr/bin/gpg",
    "/usr/local/bin/gpg",
    "/opt/homebrew/bin/gpg",
];

/// Result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;

/// Errors that can occur while producing a detached signature.
#[derive(Debug, Error)]
pub enum SignError {
    /// No usable gpg binary was found anywhere.
    #[error("gpg executable not found. Pass --gpg, set SHELLWELD_GPG, or install gpg on PATH")]
    GpgNotFound,

    /// An explicitly configured binary does not exist.
    #[error("Configured gpg binary does not exist: {path}")]
    ConfiguredGpgMissing { path: PathBuf },

    /// Failed to spawn the gpg process.
    #[error("Failed to spawn gpg process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// gpg exited with a non-zero status.
    #[error("gpg exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },
}

/// Locates the gpg binary.
///
/// Search order: the explicit path (which must exist), the
/// [`GPG_ENV_VAR`] environment variable, `PATH`, then well-known install
/// locations.
pub fn find_gpg(explicit: Option<&Path>) -> SignResult<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(SignError::ConfiguredGpgMissing {
            path: path.to_path_buf(),
        });
    }

    if let Ok(configured) = std::env::var(GPG_ENV_VAR) {
        let path = PathBuf::from(configured);
        if path.exists() {
            return Ok(path);
        }
    }

    if let Ok(path) = which::which("gpg") {
        return Ok(path);
    }

    for candidate in COMMON_GPG_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    Err(SignError::GpgNotFound)
}

/// Produces an ASCII-armored detached signature at `<target>.asc`.
pub fn sign_detached(gpg: &Path, target: &Path) -> SignResult<()> {
    let output = Command::new(gpg)
        .arg("--detach-sign")
        .arg("-a")
        .arg(target)
        .output()
        .map_err(SignError::SpawnFailed)?;

    if !output.status.success() {
        return Err(SignError::ProcessFailed {
            exit_code: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    Ok(())
}
