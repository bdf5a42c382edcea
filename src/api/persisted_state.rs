use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PickerWindow;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::chart_model::PickerBounds;
use super::{ChartController, RescaleMode};

/// State that survives a process restart.
///
/// `enabled` follows series insertion order. Animation state is never
/// persisted; restoring settles everything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub picker_start: f32,
    pub picker_end: f32,
    pub enabled: Vec<bool>,
}

impl<R: Renderer> ChartController<R> {
    #[must_use]
    pub fn persisted_state(&self) -> PersistedState {
        let window = self.model.window();
        PersistedState {
            picker_start: window.start(),
            picker_end: window.end(),
            enabled: self
                .model
                .entries
                .values()
                .map(|entry| entry.enabled)
                .collect(),
        }
    }

    /// Re-applies saved picker bounds and series visibility to the loaded
    /// data without animating.
    pub fn restore_state(&mut self, state: &PersistedState) -> ChartResult<()> {
        if !self.model.has_data() {
            return Err(ChartError::NoData);
        }
        if state.enabled.len() != self.model.entries.len() {
            return Err(ChartError::InvalidData(format!(
                "persisted state has {} series flags, chart has {} series",
                state.enabled.len(),
                self.model.entries.len()
            )));
        }
        let window = PickerWindow::new(state.picker_start, state.picker_end)?
            .ensure_min_distance(self.model.min_distance);

        let now = self.clock.now();
        for (entry, enabled) in self.model.entries.values_mut().zip(&state.enabled) {
            entry.enabled = *enabled;
        }
        self.settle_series_alphas(now);
        self.selection.clear(now);
        self.gesture.reset();
        self.axis.reset(now);
        self.labels.reset();
        self.apply_window(window, RescaleMode::Immediate, now);

        let (min, max) = self.model.overall_bounds().unwrap_or((0.0, 0.0));
        self.picker_bounds = PickerBounds::settled(min, max, now);
        debug!(start = window.start(), end = window.end(), "chart state restored");
        Ok(())
    }
}
