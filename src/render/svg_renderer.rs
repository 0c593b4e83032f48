use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

const FONT_FAMILY: &str = "sans-serif";

/// Retained SVG document render target.
///
/// `clear` drops every element of the previous pass; `render` appends the
/// frame's elements grouped as bars, values, axes, legend and caption.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    viewport: Viewport,
    background: Option<Color>,
    body: String,
    element_count: usize,
}

impl SvgRenderer {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: None,
            body: String::new(),
            element_count: 0,
        }
    }

    #[must_use]
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Number of drawable SVG elements currently held.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.element_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    /// Complete standalone SVG document for the current contents.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let Viewport { width, height } = self.viewport;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
        );
        if let Some(background) = self.background {
            let _ = write!(
                svg,
                "<rect width=\"100%\" height=\"100%\" {}/>",
                fill_attrs(background)
            );
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_svg_string()).map_err(|err| {
            ChartError::Render(format!("failed to write `{}`: {err}", path.display()))
        })
    }

    fn push_group(&mut self, class: &str, elements: impl IntoIterator<Item = String>) {
        let _ = write!(self.body, "<g class=\"{class}\">");
        for element in elements {
            self.body.push_str(&element);
            self.element_count += 1;
        }
        self.body.push_str("</g>");
    }
}

impl Renderer for SvgRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        self.body.clear();
        self.element_count = 0;
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.viewport = frame.viewport;

        self.push_group("bars", frame.bars.iter().map(|bar| rect_element(bar.rect)));
        self.push_group("values", frame.value_labels.iter().map(text_element));
        for (class, axis) in [("x-axis", &frame.x_axis), ("y-axis", &frame.y_axis)] {
            let elements = std::iter::once(line_element(axis.domain_line)).chain(
                axis.ticks
                    .iter()
                    .flat_map(|tick| [line_element(tick.mark), text_element(&tick.label)]),
            );
            self.push_group(class, elements);
        }
        self.push_group(
            "legend",
            frame
                .legend
                .iter()
                .flat_map(|entry| [rect_element(entry.swatch), text_element(&entry.label)]),
        );
        self.push_group("caption", std::iter::once(text_element(&frame.caption)));

        debug!(elements = self.element_count, "svg frame rendered");
        Ok(())
    }
}

fn fill_attrs(color: Color) -> String {
    if color.alpha < 1.0 {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            color.to_hex(),
            fmt_num(color.alpha)
        )
    } else {
        format!("fill=\"{}\"", color.to_hex())
    }
}

fn rect_element(rect: RectPrimitive) -> String {
    format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
        fmt_num(rect.x),
        fmt_num(rect.y),
        fmt_num(rect.width),
        fmt_num(rect.height),
        fill_attrs(rect.fill_color)
    )
}

fn line_element(line: LinePrimitive) -> String {
    format!(
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        fmt_num(line.x1),
        fmt_num(line.y1),
        fmt_num(line.x2),
        fmt_num(line.y2),
        line.color.to_hex(),
        fmt_num(line.stroke_width)
    )
}

fn text_element(text: &TextPrimitive) -> String {
    let anchor = match text.h_align {
        TextHAlign::Left => "start",
        TextHAlign::Center => "middle",
        TextHAlign::Right => "end",
    };
    format!(
        "<text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" text-anchor=\"{anchor}\" {}>{}</text>",
        fmt_num(text.x),
        fmt_num(text.y),
        fmt_num(text.font_size_px),
        fill_attrs(text.color),
        escape_xml(&text.text)
    )
}

/// Two decimals at most, without trailing zeros.
fn fmt_num(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" { "0".to_owned() } else { text.to_owned() }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
