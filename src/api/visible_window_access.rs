use std::time::Instant;

use tracing::trace;

use crate::core::PickerWindow;
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::{ChartController, RescaleMode, RescaleOutcome};

impl<R: Renderer> ChartController<R> {
    /// Installs `window` and propagates it to the axis and label schedulers.
    pub(super) fn apply_window(
        &mut self,
        window: PickerWindow,
        mode: RescaleMode,
        now: Instant,
    ) -> RescaleOutcome {
        self.model.set_window(window);
        self.sync_visible_range(mode, now)
    }

    /// Re-derives the visible index range from the current window.
    pub(super) fn sync_visible_range(&mut self, mode: RescaleMode, now: Instant) -> RescaleOutcome {
        let Some(visible) = self.model.visible_indices() else {
            return RescaleOutcome::Skipped;
        };

        if self.last_visible != Some(visible) {
            self.last_visible = Some(visible);
            let bounds = self
                .model
                .timeline
                .as_ref()
                .and_then(|timeline| Some((timeline.x(visible.0)?, timeline.x(visible.1)?)));
            if let Some((start_x, end_x)) = bounds {
                self.emit_chart_event(ChartEvent::VisibleRangeChanged { start_x, end_x });
            }
        }

        let outcome = self.axis.window_changed(
            self.model.enabled_indexes(),
            visible.0,
            visible.1,
            mode,
            self.model.layout.plot_height(),
            now,
        );
        trace!(?outcome, start = visible.0, end = visible.1, "visible range synced");

        if let Some(timeline) = self.model.timeline.as_ref() {
            self.labels.update(&self.model.viewport, timeline, now);
        }
        outcome
    }
}
