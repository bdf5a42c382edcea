mod frame;
mod null_renderer;

pub use frame::{BottomLabel, ChartFrame, PickerFrame, SeriesFrame};
pub use null_renderer::NullRenderer;

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized `ChartFrame`, so drawing code stays
/// isolated from gesture and animation logic.
pub trait Renderer {
    fn render(&mut self, frame: &ChartFrame) -> ChartResult<()>;
}
