//! File-backed render cache.
//!
//! [`FileRenderCache`] stores each entry as `{root}/{key}.svg` with the
//! rendered markup as the file's UTF-8 content. The directory is flat and
//! append-only: entries are never evicted, and stale entries age out
//! naturally because any input change produces a new key.
//!
//! Writes go through a temporary file followed by a rename so that a
//! concurrent reader never observes a truncated entry.

use std::fs;
use std::path::PathBuf;
use std::process;

use crate::{CacheError, RenderCache};

/// [`RenderCache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- 3f5a...c2.svg      # one entry per cache key
/// +-- 91bd...07.svg
/// ```
pub struct FileRenderCache {
    root: PathBuf,
}

impl FileRenderCache {
    /// Create a file-backed cache rooted at `root`.
    ///
    /// The directory is created lazily on first `put`; a cache that is only
    /// ever read from never touches the filesystem beyond lookups.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.svg"))
    }
}

impl RenderCache for FileRenderCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        match fs::read_to_string(&path) {
            Ok(output) => {
                tracing::debug!("cache hit: {}", path.display());
                Some(output)
            }
            Err(_) => None,
        }
    }

    fn put(&self, key: &str, output: &str) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).map_err(|source| CacheError::CreateDir {
            path: self.root.display().to_string(),
            source,
        })?;

        let path = self.entry_path(key);

        // Write-then-rename keeps partially written entries invisible.
        // The pid suffix keeps concurrent builds from clobbering each
        // other's temp files.
        let tmp = self.root.join(format!("{key}.svg.{}.tmp", process::id()));
        let write_err = |source| CacheError::Write {
            path: path.display().to_string(),
            source,
        };
        fs::write(&tmp, output).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::debug!("cache store: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_put_then_get_round_trips() {
        let tmp = TempDir::new().unwrap();
        let cache = FileRenderCache::new(tmp.path().join("uml"));

        cache.put("abc123", "X").unwrap();
        assert_eq!(cache.get("abc123"), Some("X".to_owned()));
    }

    #[test]
    fn test_get_missing_key_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = FileRenderCache::new(tmp.path().join("uml"));

        assert_eq!(cache.get("abc123"), None);
    }

    #[test]
    fn test_get_before_any_put_does_not_create_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("uml");
        let cache = FileRenderCache::new(root.clone());

        assert_eq!(cache.get("abc123"), None);
        assert!(!root.exists());
    }

    #[test]
    fn test_put_creates_nested_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("deeply/nested/uml");
        let cache = FileRenderCache::new(root.clone());

        cache.put("abc123", "<svg/>").unwrap();
        assert!(root.join("abc123.svg").exists());
    }

    #[test]
    fn test_put_overwrites_silently() {
        let tmp = TempDir::new().unwrap();
        let cache = FileRenderCache::new(tmp.path().join("uml"));

        cache.put("abc123", "first").unwrap();
        cache.put("abc123", "second").unwrap();
        assert_eq!(cache.get("abc123"), Some("second".to_owned()));
    }

    #[test]
    fn test_entry_is_plain_svg_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("uml");
        let cache = FileRenderCache::new(root.clone());

        cache.put("abc123", "<svg>content</svg>").unwrap();

        // External layout contract: the raw renderer output at <root>/<key>.svg
        let on_disk = fs::read_to_string(root.join("abc123.svg")).unwrap();
        assert_eq!(on_disk, "<svg>content</svg>");
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("uml");
        let cache = FileRenderCache::new(root.clone());

        cache.put("abc123", "<svg/>").unwrap();

        let entries: Vec<_> = fs::read_dir(&root)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["abc123.svg".to_owned()]);
    }

    #[test]
    fn test_put_fails_when_root_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("uml");
        fs::write(&root, b"not a directory").unwrap();

        let cache = FileRenderCache::new(root);
        let err = cache.put("abc123", "<svg/>").unwrap_err();
        assert!(matches!(err, CacheError::CreateDir { .. }));
    }
}
