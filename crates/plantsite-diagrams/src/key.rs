//! Cache key derivation.
//!
//! Provides [`RenderInput`], the explicit value type combining everything
//! that affects a rendered diagram: the renderer binary, the diagram source,
//! and the optional config file. Its cache key is a pure function of those
//! three inputs, so replacing the binary or editing the config file
//! self-invalidates stale cache entries without any cache-busting logic.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

use crate::digest::sha256_hex;

/// Inputs to one render request, captured as content fingerprints.
///
/// `renderer_fingerprint` and `config_fingerprint` are `None` when the
/// corresponding file does not exist (or no config path was given). The
/// absence marker is distinct from the digest of an empty file, so an empty
/// config and no config produce different keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInput {
    /// Content digest of the renderer binary, absent if the path is missing.
    pub renderer_fingerprint: Option<String>,
    /// Raw diagram source text.
    pub source: String,
    /// Content digest of the config file, absent if not configured or missing.
    pub config_fingerprint: Option<String>,
}

/// Canonical serialization of a [`RenderInput`].
///
/// Field order is fixed and absent fingerprints omit their field entirely,
/// matching the shape `{"renderer": ..., "source": ..., "config": ...}`.
#[derive(Serialize)]
struct KeyRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    renderer: Option<&'a str>,
    source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<&'a str>,
}

/// Digest a file's content, treating a missing file as absent.
///
/// "Path provided but file missing" and "no path" both collapse to `None`:
/// the renderer treats both as "no extra config applied". Read errors other
/// than NotFound propagate.
fn fingerprint(path: &Path) -> io::Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(sha256_hex(&bytes))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

impl RenderInput {
    /// Capture the render inputs for one request, fingerprinting the
    /// renderer binary and config file as they exist right now.
    pub fn capture(
        renderer_path: &Path,
        source: &str,
        config_path: Option<&Path>,
    ) -> io::Result<Self> {
        Ok(Self {
            renderer_fingerprint: fingerprint(renderer_path)?,
            source: source.to_owned(),
            config_fingerprint: match config_path {
                Some(path) => fingerprint(path)?,
                None => None,
            },
        })
    }

    /// Compute the cache key for this input.
    ///
    /// SHA-256 of the canonical JSON record, rendered as 64 lowercase hex
    /// characters. Identical inputs (including absence markers) always yield
    /// the same key; any byte difference in any field yields a different key.
    #[must_use]
    pub fn cache_key(&self) -> String {
        let record = KeyRecord {
            renderer: self.renderer_fingerprint.as_deref(),
            source: &self.source,
            config: self.config_fingerprint.as_deref(),
        };
        let bytes =
            serde_json::to_vec(&record).expect("key record serialization cannot fail");
        sha256_hex(&bytes)
    }
}
