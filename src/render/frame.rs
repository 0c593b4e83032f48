use crate::core::{Disease, SeriesSlot, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// One bar of a date group together with the value it encodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPrimitive {
    pub bucket_index: usize,
    pub slot: SeriesSlot,
    /// Drawn value; absent data is carried as zero.
    pub value: u64,
    pub rect: RectPrimitive,
}

/// Tick mark and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    pub mark: LinePrimitive,
    pub label: TextPrimitive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisPrimitives {
    pub domain_line: LinePrimitive,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub slot: SeriesSlot,
    pub disease: Disease,
    pub swatch: RectPrimitive,
    pub label: TextPrimitive,
}

/// Backend-agnostic scene for one chart draw pass.
///
/// A frame is always built from scratch; backends replace whatever they drew
/// before instead of merging.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub bars: Vec<BarPrimitive>,
    pub value_labels: Vec<TextPrimitive>,
    pub x_axis: AxisPrimitives,
    pub y_axis: AxisPrimitives,
    pub legend: Vec<LegendEntry>,
    pub caption: TextPrimitive,
}

impl RenderFrame {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.value_labels.len() != self.bars.len() {
            return Err(ChartError::InvalidData(format!(
                "frame has {} bars but {} value labels",
                self.bars.len(),
                self.value_labels.len()
            )));
        }

        for line in self.lines() {
            line.validate()?;
        }
        for rect in self.rects() {
            rect.validate()?;
        }
        for text in self.texts() {
            text.validate()?;
        }

        Ok(())
    }

    /// Bars of one series, in date order.
    pub fn bars_for(&self, slot: SeriesSlot) -> impl Iterator<Item = &BarPrimitive> {
        self.bars.iter().filter(move |bar| bar.slot == slot)
    }

    /// Number of date groups laid out on the x axis.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.x_axis.ticks.len()
    }

    /// Every line in draw order: x axis, then y axis.
    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> {
        [&self.x_axis, &self.y_axis].into_iter().flat_map(|axis| {
            std::iter::once(&axis.domain_line).chain(axis.ticks.iter().map(|tick| &tick.mark))
        })
    }

    /// Every rectangle in draw order: bars, then legend swatches.
    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> {
        self.bars
            .iter()
            .map(|bar| &bar.rect)
            .chain(self.legend.iter().map(|entry| &entry.swatch))
    }

    /// Every label in draw order: values, axis ticks, legend, caption.
    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.value_labels
            .iter()
            .chain(self.x_axis.ticks.iter().map(|tick| &tick.label))
            .chain(self.y_axis.ticks.iter().map(|tick| &tick.label))
            .chain(self.legend.iter().map(|entry| &entry.label))
            .chain(std::iter::once(&self.caption))
    }
}
