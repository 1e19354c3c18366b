//! Internal constants for diagram rendering.

use std::time::Duration;

/// Default number of pages rendered concurrently per batch.
pub const DEFAULT_WORKS: usize = 10;

/// HTTP timeout for renderer binary downloads (60 seconds — the jar is ~10 MB).
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);
