use std::time::Instant;

use tracing::{debug, warn};

use crate::core::{Easing, PickerWindow, Series, SeriesId, Tween};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::chart_model::PickerBounds;
use super::engine_config::millis;
use super::{ChartController, RescaleMode};

impl<R: Renderer> ChartController<R> {
    /// Replaces every series of the chart.
    ///
    /// Rebuilds the range indexes, resets the picker window and settles the
    /// axis without animation. An empty set clears the chart; malformed input
    /// also clears it and returns the error.
    pub fn set_series(&mut self, series: Vec<Series>) -> ChartResult<()> {
        let now = self.clock.now();
        if series.is_empty() {
            self.clear_data();
            return Ok(());
        }

        let series_count = series.len();
        if let Err(err) = self.model.load(series, now) {
            warn!(error = %err, "rejecting series set; chart falls back to no data");
            self.clear_data();
            return Err(err);
        }

        let sample_count = self.model.sample_count();
        debug!(series_count, sample_count, "series loaded");

        self.selection.clear(now);
        self.gesture.reset();
        self.axis.reset(now);
        self.labels.reset();
        self.last_visible = None;

        let window = self.default_window(sample_count);
        self.apply_window(window, RescaleMode::Immediate, now);

        let (min, max) = self.model.overall_bounds().unwrap_or((0.0, 0.0));
        self.picker_bounds = PickerBounds::settled(min, max, now);

        self.emit_chart_event(ChartEvent::DataUpdated {
            series_count,
            sample_count,
        });
        Ok(())
    }

    /// Drops all data and returns to the idle no-data state.
    pub fn clear_data(&mut self) {
        let now = self.clock.now();
        let had_data = self.model.has_data();
        self.model.clear();
        self.selection.clear(now);
        self.gesture.reset();
        self.axis.reset(now);
        self.labels.reset();
        self.picker_bounds = PickerBounds::settled(0.0, 0.0, now);
        self.last_visible = None;
        if had_data {
            debug!("chart data cleared");
            self.emit_chart_event(ChartEvent::DataUpdated {
                series_count: 0,
                sample_count: 0,
            });
        }
    }

    /// Shows or hides one series and animates the axis to the new extremes.
    ///
    /// The picker window is left as is.
    pub fn toggle_series(&mut self, id: &SeriesId, enabled: bool) -> ChartResult<()> {
        let now = self.clock.now();
        let fade = millis(self.config.fades.toggle_fade_ms);
        let Some(entry) = self.model.entries.get_mut(id) else {
            return Err(ChartError::UnknownSeries { series: id.clone() });
        };
        if entry.enabled == enabled {
            return Ok(());
        }
        entry.enabled = enabled;
        let alpha = if enabled { 1.0 } else { 0.0 };
        entry.alpha = entry.alpha.retarget(alpha, now, fade, Easing::EaseOutCubic);
        debug!(series = %id, enabled, "series toggled");

        self.sync_visible_range(RescaleMode::Forced, now);
        if let Some((min, max)) = self.model.overall_bounds() {
            self.picker_bounds
                .animate_to(min, max, now, self.config.picker.bounds_animation_ms);
        }

        self.emit_chart_event(ChartEvent::SeriesToggled {
            series: id.clone(),
            enabled,
        });
        Ok(())
    }

    /// Sets every series alpha to its resting value.
    pub(super) fn settle_series_alphas(&mut self, now: Instant) {
        for entry in self.model.entries.values_mut() {
            entry.alpha = Tween::settled(if entry.enabled { 1.0 } else { 0.0 }, now);
        }
    }

    fn default_window(&self, sample_count: usize) -> PickerWindow {
        if sample_count <= self.config.picker.long_series_samples {
            PickerWindow::full()
        } else {
            PickerWindow::anchored_at_end(self.model.min_distance)
        }
    }
}
