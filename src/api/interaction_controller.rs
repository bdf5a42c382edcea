use std::time::Instant;

use tracing::{debug, trace};

use crate::core::{ChartViewport, PickerWindow};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::interaction::{GestureContext, GestureIntent, GestureResponse, PointerEvent};
use crate::render::Renderer;

use super::{ChartController, RescaleMode, RescaleOutcome};

impl<R: Renderer> ChartController<R> {
    /// Feeds one raw pointer event through the gesture arbiter and applies
    /// the decoded intents.
    ///
    /// `consumed == false` in the response means the host should let an
    /// enclosing scroll container handle the stream.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureResponse {
        if !self.interaction_enabled || !self.model.has_data() {
            trace!(pointer_id = event.pointer_id, "pointer ignored: interaction unavailable");
            return GestureResponse::default();
        }

        let context = GestureContext {
            plot_area: self.model.layout.plot_area(),
            picker_area: self.model.layout.picker_area(),
            window: self.model.window(),
            min_distance: self.model.min_distance,
            selection_active: self.selection.is_active(),
        };
        let response = self.gesture.handle(event, &context);
        let now = event.timestamp;

        for intent in &response.intents {
            match *intent {
                GestureIntent::MoveWindow(window) => {
                    self.hide_legend(now);
                    self.apply_window(window, RescaleMode::Debounced, now);
                }
                GestureIntent::SettleWindow => {
                    self.sync_visible_range(RescaleMode::Forced, now);
                }
                GestureIntent::Select { x } => self.select_at_pixel(x, now),
                GestureIntent::ClearSelection => self.hide_legend(now),
            }
        }
        response
    }

    /// Enables or disables pointer handling. Disabling drops any captures.
    pub fn set_interaction_enabled(&mut self, enabled: bool) {
        self.interaction_enabled = enabled;
        if !enabled {
            self.gesture.reset();
        }
    }

    #[must_use]
    pub fn interaction_enabled(&self) -> bool {
        self.interaction_enabled
    }

    /// Moves the picker window programmatically.
    ///
    /// Spans narrower than the minimum distance are widened to the left.
    /// `force` bypasses the rescale debounce.
    pub fn jump_to(&mut self, start: f32, end: f32, force: bool) -> ChartResult<RescaleOutcome> {
        if !self.model.has_data() {
            return Err(ChartError::NoData);
        }
        let window = PickerWindow::new(start, end)?.ensure_min_distance(self.model.min_distance);
        let now = self.clock.now();
        self.hide_legend(now);
        let mode = if force {
            RescaleMode::Forced
        } else {
            RescaleMode::Debounced
        };
        debug!(start = window.start(), end = window.end(), force, "picker jump");
        Ok(self.apply_window(window, mode, now))
    }

    /// Moves the picker onto the UTC day containing timestamp `x`.
    ///
    /// The window starts at the last sample before that day and ends at the
    /// last sample before the day ends, widened to the minimum distance.
    pub fn focus_day(&mut self, x: i64) -> ChartResult<RescaleOutcome> {
        let timeline = self.model.timeline.as_ref().ok_or(ChartError::NoData)?;
        let (start_index, end_index) = timeline.day_span(x);
        let start = timeline.percentage(start_index).unwrap_or(0.0);
        let end = timeline.percentage(end_index).unwrap_or(1.0);
        let window = PickerWindow::new(start, end)
            .unwrap_or_else(|_| PickerWindow::translated(start, 0.0))
            .ensure_min_distance(self.model.min_distance);
        let now = self.clock.now();
        self.hide_legend(now);
        debug!(x, start_index, end_index, "picker focused on day");
        Ok(self.apply_window(window, RescaleMode::Forced, now))
    }

    /// Zooms the picker window around a normalized anchor.
    ///
    /// `factor > 1` narrows the window; the anchor keeps its relative place.
    pub fn zoom_picker(&mut self, factor: f32, anchor: f32) -> ChartResult<RescaleOutcome> {
        if !self.model.has_data() {
            return Err(ChartError::NoData);
        }
        let window = self
            .model
            .window()
            .zoomed(factor, anchor, self.model.min_distance)?;
        let now = self.clock.now();
        self.hide_legend(now);
        Ok(self.apply_window(window, RescaleMode::Debounced, now))
    }

    /// Re-measures the widget and settles the axis on the new geometry.
    pub fn resize(&mut self, width: f32, height: f32) -> ChartResult<()> {
        let layout = self.model.layout.with_size(width, height);
        layout.validate()?;
        let viewport = ChartViewport::new(
            self.model.window(),
            layout.width,
            layout.horizontal_padding,
        )?;
        self.model.layout = layout;
        self.model.viewport = viewport;
        self.config.layout = layout;
        self.gesture.reset();
        debug!(width, height, "chart resized");

        if self.model.has_data() {
            let now = self.clock.now();
            self.sync_visible_range(RescaleMode::Immediate, now);
        }
        Ok(())
    }

    /// Selects the sample at timestamp `x`. Returns `true` if the selection
    /// changed.
    pub fn select_date(&mut self, x: i64) -> ChartResult<bool> {
        let timeline = self.model.timeline.as_ref().ok_or(ChartError::NoData)?;
        let index = timeline.index_of(x).ok_or_else(|| {
            ChartError::InvalidData(format!("timestamp {x} is not a sample of this chart"))
        })?;
        let now = self.clock.now();
        Ok(self.select_index(index, now))
    }

    /// Fades out the legend; the index is dropped once the fade ends.
    pub fn clear_selection(&mut self) {
        let now = self.clock.now();
        self.hide_legend(now);
    }

    fn select_at_pixel(&mut self, x: f32, now: Instant) {
        let Some(index) = self
            .model
            .timeline
            .as_ref()
            .and_then(|timeline| self.model.viewport.nearest_index_at_pixel(timeline, x))
        else {
            return;
        };
        self.select_index(index, now);
    }

    fn select_index(&mut self, index: usize, now: Instant) -> bool {
        if !self.selection.select(index, now) {
            return false;
        }
        if let Some(x) = self
            .model
            .timeline
            .as_ref()
            .and_then(|timeline| timeline.x(index))
        {
            self.emit_chart_event(ChartEvent::DateSelected { x });
        }
        true
    }

    fn hide_legend(&mut self, now: Instant) {
        if self.selection.hide(now) {
            self.emit_chart_event(ChartEvent::SelectionCleared);
        }
    }
}
