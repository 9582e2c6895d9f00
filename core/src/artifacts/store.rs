//! Artifact store - freeze and verify
//!
//! The store owns one output directory holding the two frozen artifacts.
//! Freezing writes through a temporary sibling path and renames into
//! place, so a failed write can never leave a half-written artifact that a
//! later verify would accept. Verification compares SHA-256 digests and
//! fails loudly with a corrective hint; drift is never auto-corrected.

use crate::artifacts::codec::sha256_hex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name of the frozen timeline artifact
pub const TIMELINE_ARTIFACT: &str = "timeline.log";

/// File name of the frozen metrics artifact
pub const METRICS_ARTIFACT: &str = "metrics.csv";

/// Artifact persistence and verification errors
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("frozen artifact missing: {path}. Freeze it first with --write")]
    Missing { path: String },

    #[error(
        "{name} mismatch vs canonical replay (frozen {expected}, generated {actual}). \
         If the change is intentional, re-freeze with --write and commit"
    )]
    DigestMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Store rooted at one output directory
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    outdir: PathBuf,
}

impl ArtifactStore {
    pub fn new(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
        }
    }

    /// Path a named artifact lives at
    pub fn path(&self, name: &str) -> PathBuf {
        self.outdir.join(name)
    }

    /// Persist an artifact unconditionally, creating the directory as needed
    ///
    /// Returns the final artifact path.
    pub fn freeze(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, ArtifactError> {
        fs::create_dir_all(&self.outdir).map_err(|source| ArtifactError::Io {
            path: self.outdir.display().to_string(),
            source,
        })?;

        let path = self.path(name);
        let tmp = self.outdir.join(format!("{}.tmp", name));

        fs::write(&tmp, bytes).map_err(|source| ArtifactError::Io {
            path: tmp.display().to_string(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!(artifact = name, bytes = bytes.len(), "froze artifact");
        Ok(path)
    }

    /// Compare freshly generated bytes against the frozen artifact
    pub fn verify(&self, name: &str, bytes: &[u8]) -> Result<(), ArtifactError> {
        let path = self.path(name);
        let frozen = read_if_exists(&path)?.ok_or_else(|| ArtifactError::Missing {
            path: path.display().to_string(),
        })?;

        let expected = sha256_hex(&frozen);
        let actual = sha256_hex(bytes);
        if expected != actual {
            return Err(ArtifactError::DigestMismatch {
                name: name.to_string(),
                expected,
                actual,
            });
        }

        debug!(artifact = name, digest = %actual, "verified artifact");
        Ok(())
    }
}

fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>, ArtifactError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ArtifactError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}
