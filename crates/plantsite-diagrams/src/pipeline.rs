//! Page-set rendering pipeline.
//!
//! Ties the pieces together for one build: wires a gateway from [`Options`],
//! walks the page set in input order, skips pages without diagrams, and
//! fans the rest out through a [`BatchRunner`]. Each page task resolves its
//! diagram blocks through the gateway and substitutes the markup back into
//! the page.

use plantsite_cache::{FileRenderCache, NullRenderCache, RenderCache};

use crate::gateway::{RenderError, RenderGateway, Renderer};
use crate::host::DiagramHost;
use crate::options::Options;
use crate::plantuml::PlantUmlRenderer;
use crate::scheduler::BatchRunner;

/// Error processing one page.
#[derive(Debug, thiserror::Error)]
#[error("page {page}: {source}")]
pub struct PipelineError {
    /// Identifier of the failing page.
    pub page: String,
    #[source]
    pub source: RenderError,
}

/// Renders diagram blocks across a set of pages.
///
/// Without a renderer binary configured the pipeline is a silent no-op:
/// diagram blocks stay untouched and nothing is rendered or cached.
pub struct Pipeline<R = PlantUmlRenderer> {
    works: usize,
    gateway: Option<RenderGateway<R>>,
}

impl Pipeline {
    /// Build a pipeline from build options.
    ///
    /// The gateway exists only when a binary is configured; the cache is
    /// file-backed when `cache_dir` is set and a no-op otherwise.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let gateway = options.binary.as_ref().map(|binary| {
            let renderer = PlantUmlRenderer::new(binary.dest.clone(), options.config.clone());
            let cache: Box<dyn RenderCache> = match &options.cache_dir {
                Some(dir) => Box::new(FileRenderCache::new(dir.clone())),
                None => Box::new(NullRenderCache),
            };
            RenderGateway::new(renderer, binary.dest.clone(), options.config.clone(), cache)
        });
        Self {
            works: options.works_budget(),
            gateway,
        }
    }
}

impl<R: Renderer> Pipeline<R> {
    /// Build a pipeline around an existing gateway.
    ///
    /// This is the seam for exercising the pipeline with stub renderers.
    #[must_use]
    pub fn with_gateway(works: usize, gateway: RenderGateway<R>) -> Self {
        Self {
            works: works.max(1),
            gateway: Some(gateway),
        }
    }

    /// Process every page: render each diagram block and substitute the
    /// result, at most `works` pages in flight at a time.
    ///
    /// A failing page fails its batch (siblings still complete) and no
    /// later batch starts. Pages without diagram blocks cost nothing.
    pub fn process<H: DiagramHost>(&self, pages: &mut [H]) -> Result<(), PipelineError> {
        let Some(gateway) = &self.gateway else {
            tracing::debug!("no renderer binary configured, leaving diagrams untouched");
            return Ok(());
        };

        let mut runner = BatchRunner::new(self.works);

        for page in pages.iter_mut() {
            let sources = page.diagram_sources();
            if sources.is_empty() {
                continue;
            }

            runner.push(move || {
                for (index, block) in sources.iter().enumerate() {
                    let markup =
                        gateway
                            .resolve(block.trim())
                            .map_err(|source| PipelineError {
                                page: page.identifier(),
                                source,
                            })?;
                    page.replace_diagram(index, &markup);
                }
                tracing::info!("UML generated: {}", page.identifier());
                Ok(())
            })?;
        }

        runner.finish()
    }
}
