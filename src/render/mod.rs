mod frame;
mod null_renderer;
mod primitives;
mod svg_renderer;

pub use frame::{AxisPrimitives, AxisTick, BarPrimitive, LegendEntry, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use svg_renderer::SvgRenderer;

use crate::error::ChartResult;

/// Contract implemented by any render target.
///
/// Targets receive a fully materialized, deterministic `RenderFrame` so
/// drawing code stays isolated from aggregation and layout. Callers hold the
/// target by `&mut` for a whole pass: `clear` first, then `render`.
pub trait Renderer {
    /// Discards everything drawn by earlier passes. Clearing an empty target
    /// is a no-op.
    fn clear(&mut self) -> ChartResult<()>;

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
