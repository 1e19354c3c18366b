//! Render cache for plantsite.
//!
//! This crate provides the storage side of diagram caching, decoupled from
//! key derivation and rendering. One trait forms the core API:
//!
//! - [`RenderCache`]: keyed store for rendered diagram markup
//!
//! # Implementations
//!
//! - [`NullRenderCache`]: no-op implementation (always misses) — used when
//!   caching is disabled
//! - [`FileRenderCache`]: flat directory of `<key>.svg` files
//!
//! A lookup miss is never an error; a failed write is
//! ([`CacheError`]) — a cache that cannot store entries would silently
//! re-render everything on every build, so the failure surfaces instead.
//!
//! # Example
//!
//! ```
//! use plantsite_cache::{NullRenderCache, RenderCache};
//!
//! let cache = NullRenderCache;
//! cache.put("a1b2", "<svg/>").unwrap();
//! assert_eq!(cache.get("a1b2"), None); // NullRenderCache always misses
//! ```

mod file;
pub use file::FileRenderCache;

/// Error writing a cache entry.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The cache directory could not be created.
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    /// The cache entry could not be written.
    #[error("failed to write cache entry {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Keyed store for rendered diagram markup.
///
/// Keys are opaque digest strings produced by the caller; by construction
/// the same key always maps to the same content, so `put` may overwrite
/// freely and concurrent writers for the same key need no coordination.
pub trait RenderCache: Send + Sync {
    /// Retrieve the cached markup for `key`.
    ///
    /// Returns `None` on a miss. A miss is never an error: an unreadable
    /// or absent entry simply means the renderer must be invoked.
    fn get(&self, key: &str) -> Option<String>;

    /// Store rendered markup under `key`, creating the cache directory
    /// as needed. Overwrites any existing entry silently.
    fn put(&self, key: &str, output: &str) -> Result<(), CacheError>;
}

/// No-op [`RenderCache`] that never stores or retrieves data.
///
/// Every `get` misses; every `put` succeeds and is discarded. Used when no
/// cache directory is configured, so the render path stays uniform.
pub struct NullRenderCache;

impl RenderCache for NullRenderCache {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn put(&self, _key: &str, _output: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
