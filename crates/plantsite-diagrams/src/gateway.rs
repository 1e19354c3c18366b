//! Cache-first render gateway.
//!
//! [`RenderGateway`] sits between the pipeline and the external renderer:
//! every request is resolved against the cache first, and the renderer runs
//! only on a miss. The renderer itself is an injected [`Renderer`]
//! capability so the gateway can be exercised with stubs.

use std::path::PathBuf;

use plantsite_cache::{CacheError, RenderCache};

use crate::key::RenderInput;

/// Error resolving one diagram.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The renderer binary or config file could not be fingerprinted.
    #[error("failed to fingerprint renderer inputs: {0}")]
    Fingerprint(std::io::Error),
    /// The renderer process could not be run.
    #[error("failed to run renderer: {0}")]
    Process(std::io::Error),
    /// The renderer exited unsuccessfully.
    #[error("renderer exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
    /// The renderer produced non-UTF-8 output.
    #[error("renderer produced non-UTF-8 output: {0}")]
    InvalidOutput(std::string::FromUtf8Error),
    /// A cache write failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// The opaque external renderer: diagram source in, rendered markup out.
///
/// Implementations may be slow (an external process spawn per call); the
/// gateway imposes no timeout of its own.
pub trait Renderer: Send + Sync {
    /// Render diagram source to markup.
    fn render(&self, source: &str) -> Result<String, RenderError>;
}

/// Cache-first wrapper around a [`Renderer`].
///
/// Concurrent requests for the same novel key may both miss and both
/// render; the duplicate work is benign because the output is deterministic
/// per key, so no locking is needed.
pub struct RenderGateway<R> {
    renderer: R,
    binary_path: PathBuf,
    config_path: Option<PathBuf>,
    cache: Box<dyn RenderCache>,
}

impl<R: Renderer> RenderGateway<R> {
    /// Create a gateway over `renderer`.
    ///
    /// `binary_path` and `config_path` are fingerprinted into cache keys;
    /// pass a [`plantsite_cache::NullRenderCache`] to disable caching.
    pub fn new(
        renderer: R,
        binary_path: PathBuf,
        config_path: Option<PathBuf>,
        cache: Box<dyn RenderCache>,
    ) -> Self {
        Self {
            renderer,
            binary_path,
            config_path,
            cache,
        }
    }

    /// Resolve one diagram to rendered markup.
    ///
    /// On a cache hit the renderer is not invoked at all; on a miss it is
    /// invoked exactly once and the result is stored before returning.
    pub fn resolve(&self, source: &str) -> Result<String, RenderError> {
        let input = RenderInput::capture(&self.binary_path, source, self.config_path.as_deref())
            .map_err(RenderError::Fingerprint)?;
        let key = input.cache_key();

        if let Some(output) = self.cache.get(&key) {
            return Ok(output);
        }

        let output = self.renderer.render(source)?;
        self.cache.put(&key, &output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use plantsite_cache::{FileRenderCache, NullRenderCache};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    /// Renderer stub that counts invocations and returns a fixed output.
    struct CountingRenderer {
        calls: Arc<AtomicUsize>,
        output: &'static str,
    }

    impl Renderer for CountingRenderer {
        fn render(&self, _source: &str) -> Result<String, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.output.to_owned())
        }
    }

    fn counting_gateway(
        binary_path: PathBuf,
        cache: Box<dyn RenderCache>,
        output: &'static str,
    ) -> (RenderGateway<CountingRenderer>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let renderer = CountingRenderer {
            calls: Arc::clone(&calls),
            output,
        };
        (
            RenderGateway::new(renderer, binary_path, None, cache),
            calls,
        )
    }

    #[test]
    fn test_cache_hit_skips_renderer() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("plantuml.jar");
        std::fs::write(&jar, b"jar bytes").unwrap();

        // Pre-populate the cache under the key the gateway will compute
        let key = RenderInput::capture(&jar, "A -> B", None)
            .unwrap()
            .cache_key();
        let cache_root = tmp.path().join("cache");
        FileRenderCache::new(cache_root.clone())
            .put(&key, "<svg>cached</svg>")
            .unwrap();

        let (gateway, calls) = counting_gateway(
            jar,
            Box::new(FileRenderCache::new(cache_root)),
            "<svg>fresh</svg>",
        );

        let output = gateway.resolve("A -> B").unwrap();
        assert_eq!(output, "<svg>cached</svg>");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cache_miss_renders_once_and_populates() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("plantuml.jar");
        std::fs::write(&jar, b"jar bytes").unwrap();
        let cache_root = tmp.path().join("cache");

        let (gateway, calls) = counting_gateway(
            jar.clone(),
            Box::new(FileRenderCache::new(cache_root.clone())),
            "<svg>fresh</svg>",
        );

        let output = gateway.resolve("A -> B").unwrap();
        assert_eq!(output, "<svg>fresh</svg>");
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // The entry is now readable under the computed key
        let key = RenderInput::capture(&jar, "A -> B", None)
            .unwrap()
            .cache_key();
        let cache = FileRenderCache::new(cache_root);
        assert_eq!(cache.get(&key), Some("<svg>fresh</svg>".to_owned()));

        // A second resolve hits the cache
        assert_eq!(gateway.resolve("A -> B").unwrap(), "<svg>fresh</svg>");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_cache_mode_renders_every_time() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("plantuml.jar");
        std::fs::write(&jar, b"jar bytes").unwrap();

        let (gateway, calls) =
            counting_gateway(jar, Box::new(NullRenderCache), "<svg>fresh</svg>");

        assert_eq!(gateway.resolve("A -> B").unwrap(), "<svg>fresh</svg>");
        assert_eq!(gateway.resolve("A -> B").unwrap(), "<svg>fresh</svg>");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_different_sources_get_different_entries() {
        let tmp = TempDir::new().unwrap();
        let jar = tmp.path().join("plantuml.jar");
        std::fs::write(&jar, b"jar bytes").unwrap();
        let cache_root = tmp.path().join("cache");

        let (gateway, calls) = counting_gateway(
            jar,
            Box::new(FileRenderCache::new(cache_root)),
            "<svg/>",
        );

        gateway.resolve("A -> B").unwrap();
        gateway.resolve("C -> D").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
