//! PlantUML rendering for plantsite.
//!
//! This crate turns diagram blocks embedded in generated HTML pages into
//! SVG, invoking the external PlantUML renderer as little as possible:
//! - content-addressed caching keyed by renderer binary, source text, and
//!   config file, so only genuinely new diagrams render
//! - bounded-concurrency batch processing over the page set
//! - renderer binary download with SHA-256 verification
//!
//! # Architecture
//!
//! The crate is organized into modules:
//! - [`digest`]: SHA-256 hex digest primitive
//! - [`key`]: `RenderInput` and deterministic cache-key derivation
//! - [`gateway`]: `Renderer` capability trait and the cache-first `RenderGateway`
//! - [`plantuml`]: `PlantUmlRenderer` spawning `java -jar plantuml.jar -pipe`
//! - [`download`]: renderer binary acquisition and checksum verification
//! - [`scheduler`]: `BatchRunner` bounded fan-out
//! - [`host`]: `DiagramHost`, the page-side capability
//! - [`pipeline`]: wiring from `Options` to a processed page set
//!
//! Storage lives in the `plantsite-cache` crate.
//!
//! # Example
//!
//! ```ignore
//! use plantsite_diagrams::{BinarySpec, Options, Pipeline};
//!
//! let options = Options::new()
//!     .binary(BinarySpec {
//!         version: "v1.2024.3".into(),
//!         dest: ".plantsite/plantuml.jar".into(),
//!         checksum: None,
//!     })
//!     .cache_dir(".plantsite/uml-cache")
//!     .works(10);
//!
//! let pipeline = Pipeline::from_options(&options);
//! pipeline.process(&mut pages)?;
//! ```

mod consts;
mod digest;
mod download;
mod gateway;
mod host;
mod key;
mod options;
mod pipeline;
mod plantuml;
mod scheduler;

pub use digest::sha256_hex;
pub use download::{
    BinarySpec, DownloadError, create_agent, default_agent, ensure_binary, release_url,
};
pub use gateway::{RenderError, RenderGateway, Renderer};
pub use host::DiagramHost;
pub use key::RenderInput;
pub use options::Options;
pub use pipeline::{Pipeline, PipelineError};
pub use plantuml::PlantUmlRenderer;
pub use scheduler::BatchRunner;
