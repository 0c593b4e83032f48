use crate::core::{DateBucket, DiseasePair, Viewport};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::validation::{validate_layout, validate_render_style};
use super::{AxisLabelLocale, ChartLayout, DashboardConfig, RenderStyle};

/// Stateless grouped bar chart renderer.
///
/// Holds only presentation settings. Every call lays the chart out again from
/// the buckets it is given; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartRenderer {
    pub(super) layout: ChartLayout,
    pub(super) style: RenderStyle,
    pub(super) locale: AxisLabelLocale,
    pub(super) caption: Option<String>,
}

impl ChartRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a renderer from the presentation part of `config`.
    pub fn from_config(config: &DashboardConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            layout: config.layout,
            style: config.style,
            locale: config.locale,
            caption: config.caption.clone(),
        })
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> ChartResult<Self> {
        self.layout = validate_layout(layout)?;
        Ok(self)
    }

    pub fn with_style(mut self, style: RenderStyle) -> ChartResult<Self> {
        self.style = validate_render_style(style)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_locale(mut self, locale: AxisLabelLocale) -> Self {
        self.locale = locale;
        self
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn style(&self) -> RenderStyle {
        self.style
    }

    #[must_use]
    pub fn locale(&self) -> AxisLabelLocale {
        self.locale
    }

    #[must_use]
    pub fn caption_text(&self) -> &str {
        self.caption
            .as_deref()
            .unwrap_or_else(|| self.locale.default_caption())
    }

    /// Clears `target`, then draws a freshly built frame into it.
    ///
    /// The exclusive borrow of `target` spans the whole pass, so no other
    /// render can interleave with this one. Returns the drawn frame.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        target: &mut R,
        buckets: &[DateBucket],
        pair: DiseasePair,
        viewport: Viewport,
    ) -> ChartResult<RenderFrame> {
        target.clear()?;
        let frame = self.build_frame(buckets, pair, viewport)?;
        target.render(&frame)?;
        Ok(frame)
    }
}
