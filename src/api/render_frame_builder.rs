use tracing::debug;

use crate::core::{
    AggregationSummary, BandScale, DateBucket, DiseasePair, LinearScale, SeriesSlot, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    AxisPrimitives, AxisTick, BarPrimitive, LegendEntry, LinePrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

use super::ChartRenderer;
use super::axis_label_format::{format_month_year_label, format_tick_label, format_value_label};
use super::axis_ticks::{linear_ticks, tick_step};
use super::chart_layout::PlotArea;

// Baseline shifts relative to font size, matching common axis typesetting:
// bottom labels hang below the tick, left labels are vertically centered.
const BOTTOM_LABEL_BASELINE_EM: f64 = 0.71;
const LEFT_LABEL_BASELINE_EM: f64 = 0.32;

impl ChartRenderer {
    /// Materializes backend-agnostic primitives for one draw pass.
    ///
    /// Geometry depends only on the arguments and the renderer's settings, so
    /// identical inputs always give identical frames.
    pub fn build_frame(
        &self,
        buckets: &[DateBucket],
        pair: DiseasePair,
        viewport: Viewport,
    ) -> ChartResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let plot = self.layout.plot_area(viewport);
        let labels = buckets
            .iter()
            .map(|bucket| format_month_year_label(bucket.date, self.locale))
            .collect();
        let x_scale = BandScale::new(labels, plot.band_range(), self.layout.band_padding)?;

        let summary = AggregationSummary::from_buckets(buckets);
        let max_value = summary.max_value as f64;
        let y_scale = LinearScale::new((0.0, max_value), plot.value_range())?;

        let (bars, value_labels) = self.build_bars(buckets, &x_scale, y_scale, plot);
        let x_axis = self.build_date_axis(&x_scale, plot);
        let y_axis = self.build_value_axis(y_scale, max_value, plot);
        let legend = self.build_legend(pair, plot);
        let caption = TextPrimitive::new(
            self.caption_text(),
            plot.width * 0.5,
            plot.baseline_y() + self.layout.margin_bottom + self.layout.caption_offset_px,
            self.style.caption_font_size_px,
            self.style.caption_color,
            TextHAlign::Center,
        );

        debug!(
            buckets = buckets.len(),
            bars = bars.len(),
            max_value = summary.max_value,
            "built grouped bar frame"
        );

        Ok(RenderFrame {
            viewport,
            bars,
            value_labels,
            x_axis,
            y_axis,
            legend,
            caption,
        })
    }

    fn build_bars(
        &self,
        buckets: &[DateBucket],
        x_scale: &BandScale,
        y_scale: LinearScale,
        plot: PlotArea,
    ) -> (Vec<BarPrimitive>, Vec<TextPrimitive>) {
        let bar_width = x_scale.bandwidth() * 0.5;
        let mut bars = Vec::with_capacity(buckets.len() * 2);
        let mut labels = Vec::with_capacity(buckets.len() * 2);

        // Group-major order: A then B inside each date group.
        for (bucket_index, bucket) in buckets.iter().enumerate() {
            let Some(band_start) = x_scale.band_start(bucket_index) else {
                continue;
            };
            for slot in SeriesSlot::BOTH {
                let color = self.style.slot_color(slot);
                let value = bucket.value_or_zero(slot);
                let x = band_start + slot.index() as f64 * bar_width;
                let y = y_scale.map(value as f64);
                let height = (plot.baseline_y() - y).max(0.0);

                bars.push(BarPrimitive {
                    bucket_index,
                    slot,
                    value,
                    rect: RectPrimitive::new(x, y, bar_width, height, color),
                });
                labels.push(TextPrimitive::new(
                    format_value_label(value),
                    x + bar_width * 0.5,
                    y - self.layout.value_label_offset_px,
                    self.style.value_label_font_size_px,
                    self.style.value_label_color,
                    TextHAlign::Center,
                ));
            }
        }

        (bars, labels)
    }

    fn build_date_axis(&self, x_scale: &BandScale, plot: PlotArea) -> AxisPrimitives {
        let axis_y = plot.baseline_y();
        let (range_start, range_end) = x_scale.range();
        let tick_end_y = axis_y + self.layout.axis_tick_length_px;
        let label_y = tick_end_y
            + self.layout.axis_label_padding_px
            + self.style.axis_label_font_size_px * BOTTOM_LABEL_BASELINE_EM;

        let ticks = x_scale
            .labels()
            .iter()
            .enumerate()
            .filter_map(|(index, label)| {
                let x = x_scale.band_center(index)?;
                Some(AxisTick {
                    mark: self.axis_line(x, axis_y, x, tick_end_y),
                    label: TextPrimitive::new(
                        label.clone(),
                        x,
                        label_y,
                        self.style.axis_label_font_size_px,
                        self.style.axis_label_color,
                        TextHAlign::Center,
                    ),
                })
            })
            .collect();

        AxisPrimitives {
            domain_line: self.axis_line(range_start, axis_y, range_end, axis_y),
            ticks,
        }
    }

    fn build_value_axis(
        &self,
        y_scale: LinearScale,
        max_value: f64,
        plot: PlotArea,
    ) -> AxisPrimitives {
        let axis_x = plot.left;
        let (range_start, range_end) = y_scale.range();
        let tick_start_x = axis_x - self.layout.axis_tick_length_px;
        let label_x = tick_start_x - self.layout.axis_label_padding_px;
        let label_shift = self.style.axis_label_font_size_px * LEFT_LABEL_BASELINE_EM;

        let count = self.layout.value_tick_count;
        let step = tick_step(0.0, max_value, count);
        let ticks = linear_ticks(0.0, max_value, count)
            .into_iter()
            .map(|value| {
                let y = y_scale.map(value);
                AxisTick {
                    mark: self.axis_line(tick_start_x, y, axis_x, y),
                    label: TextPrimitive::new(
                        format_tick_label(value, step),
                        label_x,
                        y + label_shift,
                        self.style.axis_label_font_size_px,
                        self.style.axis_label_color,
                        TextHAlign::Right,
                    ),
                }
            })
            .collect();

        AxisPrimitives {
            domain_line: self.axis_line(axis_x, range_end, axis_x, range_start),
            ticks,
        }
    }

    fn build_legend(&self, pair: DiseasePair, plot: PlotArea) -> Vec<LegendEntry> {
        let layout = self.layout;
        let origin_x = plot.left;
        let origin_y = plot.baseline_y() + layout.margin_bottom - layout.legend_offset_px;

        SeriesSlot::BOTH
            .into_iter()
            .map(|slot| {
                let disease = pair.get(slot);
                let x = origin_x + slot.index() as f64 * layout.legend_item_spacing_px;
                LegendEntry {
                    slot,
                    disease,
                    swatch: RectPrimitive::new(
                        x,
                        origin_y,
                        layout.legend_swatch_size_px,
                        layout.legend_swatch_size_px,
                        self.style.slot_color(slot),
                    ),
                    label: TextPrimitive::new(
                        disease.as_str(),
                        x + layout.legend_label_offset_x_px,
                        origin_y + layout.legend_label_baseline_px,
                        self.style.legend_font_size_px,
                        self.style.legend_label_color,
                        TextHAlign::Left,
                    ),
                }
            })
            .collect()
    }

    fn axis_line(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> LinePrimitive {
        LinePrimitive::new(
            x1,
            y1,
            x2,
            y2,
            self.style.axis_line_width,
            self.style.axis_line_color,
        )
    }
}
