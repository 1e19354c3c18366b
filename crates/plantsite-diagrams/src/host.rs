//! Page-host capability.
//!
//! The DOM lives outside this workspace; the pipeline only needs to locate
//! diagram blocks and substitute rendered markup. [`DiagramHost`] is that
//! narrow surface, implemented by the site builder over its page model and
//! by in-memory fakes in tests.

/// One page-like container holding zero or more diagram blocks.
pub trait DiagramHost: Send {
    /// Human-readable identifier for logging (e.g. the page's source path).
    fn identifier(&self) -> String;

    /// The located diagram source blocks, in document order.
    ///
    /// Sources may carry surrounding whitespace from the markup; the
    /// pipeline trims before rendering.
    fn diagram_sources(&self) -> Vec<String>;

    /// Replace block `index` (as returned by [`diagram_sources`](Self::diagram_sources))
    /// with rendered markup.
    fn replace_diagram(&mut self, index: usize, markup: &str);
}
