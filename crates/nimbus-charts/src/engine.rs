//! Render engine abstraction.
//!
//! This module provides the [`RenderEngine`] and [`ChartHandle`] traits that
//! abstract over the real browser charting library and the mock engine used
//! for testing.

use crate::error::Result;
use crate::model::{ChartConfig, ChartData};

/// Something that can draw a [`ChartConfig`] onto a named surface.
///
/// # Example
///
/// ```
/// use nimbus_charts::{ChartPresenter, MockEngine};
///
/// let engine = MockEngine::with_surfaces(["temperatureChart"]);
/// let presenter = ChartPresenter::new(engine);
/// assert!(presenter.is_empty());
/// ```
pub trait RenderEngine {
    /// A drawable target, e.g. a canvas element.
    type Surface;

    /// The live chart returned by [`render`](RenderEngine::render).
    type Handle: ChartHandle;

    /// Resolve a surface by identifier, or `None` if it does not exist.
    fn surface(&self, identifier: &str) -> Option<Self::Surface>;

    /// Draw a chart onto `surface`.
    fn render(
        &mut self,
        identifier: &str,
        surface: Self::Surface,
        config: &ChartConfig,
    ) -> Result<Self::Handle>;
}

/// A live chart drawn by a [`RenderEngine`].
pub trait ChartHandle {
    /// Replace the chart's labels and series and redraw.
    fn update(&mut self, data: &ChartData);

    /// Tear the chart down and release its surface.
    fn destroy(self);
}
