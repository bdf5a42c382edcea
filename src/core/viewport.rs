use serde::{Deserialize, Serialize};

use crate::core::{PickerWindow, Timeline};
use crate::error::{ChartError, ChartResult};

/// Pixel mapping of the picker window onto the drawing area.
///
/// The whole series is laid out over `full_width` pixels and shifted left by
/// `pixel_offset`, so only the picker window lands inside
/// `[padding, width - padding]`. Every method is a pure function of the
/// fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewport {
    window: PickerWindow,
    width: f32,
    padding: f32,
}

impl ChartViewport {
    pub fn new(window: PickerWindow, width: f32, padding: f32) -> ChartResult<Self> {
        if !width.is_finite() || !padding.is_finite() || padding < 0.0 || width - 2.0 * padding <= 0.0
        {
            return Err(ChartError::InvalidData(format!(
                "viewport width {width} must be finite and exceed twice the padding {padding}"
            )));
        }
        Ok(Self {
            window,
            width,
            padding,
        })
    }

    #[must_use]
    pub fn window(self) -> PickerWindow {
        self.window
    }

    #[must_use]
    pub fn with_window(self, window: PickerWindow) -> Self {
        Self { window, ..self }
    }

    #[must_use]
    pub fn width(self) -> f32 {
        self.width
    }

    #[must_use]
    pub fn padding(self) -> f32 {
        self.padding
    }

    /// Width of the drawing area between the paddings.
    #[must_use]
    pub fn chart_width(self) -> f32 {
        self.width - 2.0 * self.padding
    }

    /// Pixel width the entire series would occupy unclipped.
    #[must_use]
    pub fn full_width(self) -> f32 {
        self.chart_width() / self.window.span()
    }

    #[must_use]
    pub fn pixel_offset(self) -> f32 {
        self.full_width() * self.window.start() - self.padding
    }

    #[must_use]
    pub fn normalized_to_pixel(self, normalized: f32) -> f32 {
        normalized * self.full_width() - self.pixel_offset()
    }

    /// Inverse of [`Self::normalized_to_pixel`], clamped to `[0, 1]`.
    #[must_use]
    pub fn pixel_to_normalized(self, pixel: f32) -> f32 {
        ((self.pixel_offset() + pixel) / self.full_width()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn data_index_to_pixel(self, timeline: &Timeline, index: usize) -> Option<f32> {
        timeline
            .percentage(index)
            .map(|normalized| self.normalized_to_pixel(normalized))
    }

    /// First and last sample inside the picker window.
    #[must_use]
    pub fn visible_index_range(self, timeline: &Timeline) -> Option<(usize, usize)> {
        if timeline.is_empty() {
            return None;
        }
        let start = timeline.find_start_index(self.window.start().max(0.0));
        let end = timeline.find_end_index(start, self.window.end().min(1.0));
        Some((start, end))
    }

    /// Sample nearest to a pointer x, restricted to the visible range.
    #[must_use]
    pub fn nearest_index_at_pixel(self, timeline: &Timeline, pixel: f32) -> Option<usize> {
        let (start, end) = self.visible_index_range(timeline)?;
        let normalized = self.pixel_to_normalized(pixel);
        Some(timeline.nearest_index(start, end, normalized))
    }
}
