//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag: one envelope per run, printed to
//! stdout, so scripts and CI can parse the result without scraping the
//! human progress text.

use serde::{Deserialize, Serialize};

/// One compiled artifact in a run summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactSummary {
    /// Input script as given on the command line
    pub source: String,
    /// Destination the artifact was written to
    pub dest: String,
    /// Accumulated description, after the default fallback
    pub description: String,
    /// Hex SHA-512 digest of the written artifact
    pub sha512: String,
    /// Detached signature path, absent when signing was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

/// Top-level envelope for a `--json` run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunSummary {
    /// Whether the whole run succeeded
    pub ok: bool,
    /// One entry per compiled artifact, in input order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<ArtifactSummary>,
    /// Full error chain when `ok` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunSummary {
    /// Creates a success envelope.
    pub fn success(artifacts: Vec<ArtifactSummary>) -> Self {
        Self {
            ok: true,
            artifacts,
            error: None,
        }
    }

    /// Creates a failure envelope.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            artifacts: Vec::new(),
            error: Some(error.into()),
        }
    }
}
