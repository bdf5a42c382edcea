use std::time::Instant;

use tracing::trace;

use crate::render::Renderer;

use super::ChartController;

impl<R: Renderer> ChartController<R> {
    /// Steps every animation to `now`.
    ///
    /// Commits a debounced rescale whose window has elapsed, retires faded
    /// gridline and label generations, and drops a hidden selection once its
    /// legend fade ends. Returns `true` while another tick is needed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let axis = self.axis.advance(now);
        let labels = self.labels.advance(now);
        let selection = self.selection.advance(now);
        let picker = !self.picker_bounds.is_finished_at(now);
        let series = self
            .model
            .entries
            .values()
            .any(|entry| !entry.alpha.is_finished_at(now));

        let animating = axis || labels || selection || picker || series;
        trace!(axis, labels, selection, picker, series, "advance");
        animating
    }

    /// [`Self::advance`] at the injected clock's current time.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        self.advance(now)
    }
}
