//! Build-scoped configuration.
//!
//! One immutable [`Options`] value is constructed per build invocation and
//! threaded explicitly into the pipeline — there is no global mutable
//! default, so concurrent builds cannot observe each other's settings.

use std::path::PathBuf;

use crate::consts::DEFAULT_WORKS;
use crate::download::BinarySpec;

/// Configuration for one pipeline run.
///
/// Everything is optional except `works`:
/// - without `binary`, rendering is disabled and every page is a no-op;
/// - without `cache_dir`, every diagram renders fresh and nothing persists.
#[derive(Debug)]
pub struct Options {
    /// Renderer binary to download and run.
    pub binary: Option<BinarySpec>,
    /// PlantUML config file included before each diagram.
    pub config: Option<PathBuf>,
    /// Cache directory for rendered SVGs.
    pub cache_dir: Option<PathBuf>,
    /// Number of pages processed concurrently (>= 1).
    works: usize,
}

impl Options {
    /// Create options with defaults (no binary, no config, no cache,
    /// `works` = 10).
    #[must_use]
    pub fn new() -> Self {
        Self {
            binary: None,
            config: None,
            cache_dir: None,
            works: DEFAULT_WORKS,
        }
    }

    /// Set the renderer binary.
    #[must_use]
    pub fn binary(mut self, binary: BinarySpec) -> Self {
        self.binary = Some(binary);
        self
    }

    /// Set the PlantUML config file.
    #[must_use]
    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Set the cache directory.
    #[must_use]
    pub fn cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    /// Set the concurrency budget, clamped to at least 1.
    #[must_use]
    pub fn works(mut self, works: usize) -> Self {
        self.works = works.max(1);
        self
    }

    /// The concurrency budget for this build.
    #[must_use]
    pub fn works_budget(&self) -> usize {
        self.works
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
