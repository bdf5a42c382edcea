use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;
use crate::error::ChartResult;
use crate::interaction::GestureConfig;

use super::validation::validate_chart_config;

/// Vertical axis rescale tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisScaleConfig {
    pub animation_ms: f64,
    /// Minimum spacing between two committed, non-forced rescales.
    pub debounce_ms: f64,
    pub gridline_fade_ms: f64,
    /// Axis label text height; changes smaller than one label are ignored.
    pub label_text_px: f32,
    pub gridline_intervals: u32,
    /// Track the visible minimum instead of pinning the axis floor at zero.
    pub track_min: bool,
}

impl Default for AxisScaleConfig {
    fn default() -> Self {
        Self {
            animation_ms: 400.0,
            debounce_ms: 320.0,
            gridline_fade_ms: 400.0,
            label_text_px: 12.0,
            gridline_intervals: 5,
            track_min: false,
        }
    }
}

/// Bottom date label tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSchedulerConfig {
    pub label_count: u32,
    pub crossfade_ms: f64,
    /// Relative band around the active step inside which the step is kept.
    pub hysteresis: f32,
    pub edge_offset_px: f32,
}

impl Default for LabelSchedulerConfig {
    fn default() -> Self {
        Self {
            label_count: 6,
            crossfade_ms: 200.0,
            hysteresis: 0.2,
            edge_offset_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Lower bound of the minimum window span once a series has 5+ samples.
    pub min_distance_floor: f32,
    /// Series longer than this open on a minimum-span window at the end.
    pub long_series_samples: usize,
    pub bounds_animation_ms: f64,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            min_distance_floor: 0.1,
            long_series_samples: 400,
            bounds_animation_ms: 400.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesFadeConfig {
    pub toggle_fade_ms: f64,
    pub legend_fade_ms: f64,
}

impl Default for SeriesFadeConfig {
    fn default() -> Self {
        Self {
            toggle_fade_ms: 400.0,
            legend_fade_ms: 200.0,
        }
    }
}

/// Public controller bootstrap configuration.
///
/// Every field falls back to its default when missing from serialized input,
/// so hosts can persist only what they override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub layout: ChartLayout,
    #[serde(default)]
    pub axis: AxisScaleConfig,
    #[serde(default)]
    pub labels: LabelSchedulerConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub fades: SeriesFadeConfig,
}

impl ChartConfig {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::default().with_size(width, height)
    }

    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.layout = self.layout.with_size(width, height);
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_axis(mut self, axis: AxisScaleConfig) -> Self {
        self.axis = axis;
        self
    }

    /// Shortcut for toggling [`AxisScaleConfig::track_min`].
    #[must_use]
    pub fn with_min_axis(mut self, track_min: bool) -> Self {
        self.axis.track_min = track_min;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelSchedulerConfig) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.gesture = gesture;
        self
    }

    #[must_use]
    pub fn with_picker(mut self, picker: PickerConfig) -> Self {
        self.picker = picker;
        self
    }

    #[must_use]
    pub fn with_fades(mut self, fades: SeriesFadeConfig) -> Self {
        self.fades = fades;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_chart_config(self)
    }
}

/// Converts a validated millisecond setting.
pub(super) fn millis(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0) / 1000.0)
}
