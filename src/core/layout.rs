use serde::{Deserialize, Serialize};

use crate::core::Rect;
use crate::error::{ChartError, ChartResult};

/// Pixel geometry of the widget: plot area on top, picker strip at the
/// bottom, both sharing the horizontal padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartLayout {
    pub width: f32,
    pub height: f32,
    pub horizontal_padding: f32,
    pub picker_height: f32,
    pub picker_bottom_padding: f32,
    /// Distance from the widget bottom to the plot baseline.
    pub chart_bottom: f32,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 432.0,
            height: 400.0,
            horizontal_padding: 16.0,
            picker_height: 46.0,
            picker_bottom_padding: 16.0,
            chart_bottom: 100.0,
        }
    }
}

impl ChartLayout {
    #[must_use]
    pub fn with_size(self, width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() || self.width <= 0.0 || self.height <= 0.0
        {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        let insets = [
            ("horizontal_padding", self.horizontal_padding),
            ("picker_height", self.picker_height),
            ("picker_bottom_padding", self.picker_bottom_padding),
            ("chart_bottom", self.chart_bottom),
        ];
        for (name, value) in insets {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "layout {name} must be finite and >= 0"
                )));
            }
        }
        if self.width <= 2.0 * self.horizontal_padding {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        if self.height <= self.chart_bottom
            || self.height < self.picker_height + self.picker_bottom_padding
        {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn chart_width(&self) -> f32 {
        self.width - 2.0 * self.horizontal_padding
    }

    /// Height of the plotted value range in pixels.
    #[must_use]
    pub fn plot_height(&self) -> f32 {
        self.height - self.chart_bottom
    }

    /// Area where pointer-down starts a selection scrub.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.plot_height())
    }

    #[must_use]
    pub fn picker_area(&self) -> Rect {
        Rect::new(
            self.horizontal_padding,
            self.height - self.picker_bottom_padding - self.picker_height,
            self.chart_width(),
            self.picker_height,
        )
    }
}
