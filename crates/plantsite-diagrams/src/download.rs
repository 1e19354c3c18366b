//! Renderer binary acquisition.
//!
//! Fetches the PlantUML jar from its GitHub release and verifies it against
//! an optional SHA-256 checksum. Runs once before any rendering; a checksum
//! mismatch after (re-)download aborts the whole build step. No retries —
//! callers wanting resilience against transient network failures wrap this
//! with their own policy.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ureq::Agent;

use crate::consts::DOWNLOAD_TIMEOUT;
use crate::digest::sha256_hex;

/// Where to get the renderer binary and where to put it.
#[derive(Debug, Clone)]
pub struct BinarySpec {
    /// Release version tag (e.g. "v1.2024.3").
    pub version: String,
    /// Destination path for the jar.
    pub dest: PathBuf,
    /// Expected SHA-256 of the jar, lowercase hex. When present, an existing
    /// file is kept only if it matches, and a fresh download must match.
    pub checksum: Option<String>,
}

/// Error acquiring the renderer binary.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// The release could not be fetched.
    #[error("failed to fetch {url}: {message}")]
    Http { url: String, message: String },
    /// The binary could not be stored.
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The downloaded binary does not match the expected checksum.
    #[error("{path}: checksum mismatch (expected {expected}, actual {actual})")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Create an HTTP agent with the given global timeout.
#[must_use]
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Agent with the default download timeout.
#[must_use]
pub fn default_agent() -> Agent {
    create_agent(DOWNLOAD_TIMEOUT)
}

/// Release URL for a PlantUML version tag.
#[must_use]
pub fn release_url(version: &str) -> String {
    format!("https://github.com/plantuml/plantuml/releases/download/{version}/plantuml.jar")
}

fn matches_checksum(path: &Path, expected: Option<&str>) -> bool {
    let Ok(bytes) = fs::read(path) else {
        return false;
    };
    match expected {
        Some(expected) => sha256_hex(&bytes) == expected,
        // No checksum to hold the file to — its presence is enough
        None => true,
    }
}

/// Ensure the renderer binary exists at `spec.dest` and matches
/// `spec.checksum` if one is given, downloading the release otherwise.
pub fn ensure_binary(spec: &BinarySpec, agent: &Agent) -> Result<(), DownloadError> {
    if matches_checksum(&spec.dest, spec.checksum.as_deref()) {
        tracing::debug!("renderer binary up to date: {}", spec.dest.display());
        return Ok(());
    }

    let url = release_url(&spec.version);
    tracing::info!("downloading {url}");

    let response = agent.get(&url).call().map_err(|e| DownloadError::Http {
        url: url.clone(),
        message: e.to_string(),
    })?;

    let status = response.status().as_u16();
    if status >= 400 {
        return Err(DownloadError::Http {
            url,
            message: format!("HTTP {status}"),
        });
    }

    let mut body = response.into_body();
    let mut bytes = Vec::new();
    body.as_reader()
        .read_to_end(&mut bytes)
        .map_err(|source| DownloadError::Io {
            path: url.clone(),
            source,
        })?;

    if let Some(parent) = spec.dest.parent() {
        fs::create_dir_all(parent).map_err(|source| DownloadError::Io {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(&spec.dest, &bytes).map_err(|source| DownloadError::Io {
        path: spec.dest.display().to_string(),
        source,
    })?;

    if let Some(expected) = &spec.checksum {
        // Verify what actually landed on disk, not the in-memory buffer
        let written = fs::read(&spec.dest).map_err(|source| DownloadError::Io {
            path: spec.dest.display().to_string(),
            source,
        })?;
        let actual = sha256_hex(&written);
        if actual != *expected {
            return Err(DownloadError::ChecksumMismatch {
                path: spec.dest.display().to_string(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    Ok(())
}
