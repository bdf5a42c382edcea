use crate::error::ChartResult;
use crate::render::{ChartFrame, Renderer};

/// No-op renderer used by tests and headless controller usage.
///
/// It still validates every frame so tests catch inconsistent state before a
/// real backend is attached.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_gridline_count: usize,
    pub last_label_count: usize,
    pub last_frame: Option<ChartFrame>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_gridline_count = frame.gridlines.len();
        self.last_label_count = frame.bottom_labels.len();
        self.last_frame = Some(frame.clone());
        Ok(())
    }
}
