use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op render target used by tests and headless hosts.
///
/// It validates every frame and tracks how many primitives are currently
/// "on screen", so a missing clear shows up as growing live counts.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_bar_count: usize,
    pub last_text_count: usize,
    pub last_line_count: usize,
    pub live_rect_count: usize,
    pub live_text_count: usize,
    pub live_line_count: usize,
    pub clear_count: usize,
    pub frames_rendered: usize,
    pub last_frame: Option<RenderFrame>,
}

impl Renderer for NullRenderer {
    fn clear(&mut self) -> ChartResult<()> {
        self.live_rect_count = 0;
        self.live_text_count = 0;
        self.live_line_count = 0;
        self.clear_count += 1;
        Ok(())
    }

    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_bar_count = frame.bars.len();
        self.last_text_count = frame.texts().count();
        self.last_line_count = frame.lines().count();
        self.live_rect_count += frame.rects().count();
        self.live_text_count += self.last_text_count;
        self.live_line_count += self.last_line_count;
        self.frames_rendered += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
