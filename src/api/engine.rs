use std::time::Instant;

use crate::core::{ChartLayout, ChartViewport, Clock, PickerWindow, Series, SeriesId, Timeline};
use crate::error::ChartResult;
use crate::extensions::ChartListener;
use crate::interaction::{GestureArbiter, GestureState, SelectionState};
use crate::render::Renderer;

use super::chart_model::{ChartModel, PickerBounds};
use super::{
    AxisBounds, AxisScaleController, BottomLabelScheduler, ChartConfig, GridLineGeneration,
    LabelGeneration,
};

/// Main facade consumed by host widgets.
///
/// `ChartController` owns the series, picker window and every animated
/// sub-controller. It is driven by pointer events, data updates and
/// `advance(now)` ticks, and hands a [`crate::render::ChartFrame`] to its
/// renderer on `render()`.
pub struct ChartController<R: Renderer> {
    pub(super) renderer: R,
    pub(super) clock: Box<dyn Clock>,
    pub(super) config: ChartConfig,
    pub(super) model: ChartModel,
    pub(super) axis: AxisScaleController,
    pub(super) labels: BottomLabelScheduler,
    pub(super) gesture: GestureArbiter,
    pub(super) selection: SelectionState,
    pub(super) picker_bounds: PickerBounds,
    pub(super) interaction_enabled: bool,
    pub(super) last_visible: Option<(usize, usize)>,
    pub(super) listeners: Vec<Box<dyn ChartListener>>,
}

impl<R: Renderer> ChartController<R> {
    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.model.layout
    }

    #[must_use]
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.model.has_data()
    }

    #[must_use]
    pub fn timeline(&self) -> Option<&Timeline> {
        self.model.timeline.as_ref()
    }

    #[must_use]
    pub fn series(&self, id: &SeriesId) -> Option<&Series> {
        self.model.entries.get(id).map(|entry| &entry.series)
    }

    #[must_use]
    pub fn series_ids(&self) -> Vec<SeriesId> {
        self.model.entries.keys().cloned().collect()
    }

    #[must_use]
    pub fn is_series_enabled(&self, id: &SeriesId) -> Option<bool> {
        self.model.entries.get(id).map(|entry| entry.enabled)
    }

    #[must_use]
    pub fn window(&self) -> PickerWindow {
        self.model.window()
    }

    #[must_use]
    pub fn viewport(&self) -> ChartViewport {
        self.model.viewport
    }

    #[must_use]
    pub fn min_distance(&self) -> f32 {
        self.model.min_distance
    }

    /// First and last visible sample indices.
    #[must_use]
    pub fn visible_indices(&self) -> Option<(usize, usize)> {
        self.model.visible_indices()
    }

    /// Timestamps of the first and last visible samples.
    #[must_use]
    pub fn visible_date_range(&self) -> Option<(i64, i64)> {
        let (start, end) = self.model.visible_indices()?;
        let timeline = self.model.timeline.as_ref()?;
        Some((timeline.x(start)?, timeline.x(end)?))
    }

    #[must_use]
    pub fn axis_bounds(&self, now: Instant) -> AxisBounds {
        self.axis.bounds(now)
    }

    #[must_use]
    pub fn gridlines(&self, now: Instant) -> Vec<GridLineGeneration> {
        self.axis.gridlines(now)
    }

    #[must_use]
    pub fn label_generations(&self, now: Instant) -> Vec<LabelGeneration> {
        self.labels.generations(now).into_vec()
    }

    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.gesture.state()
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    /// Timestamp of the selected sample, while one is selected.
    #[must_use]
    pub fn selected_date(&self) -> Option<i64> {
        let index = self.selection.index()?;
        self.model.timeline.as_ref()?.x(index)
    }

    #[must_use]
    pub fn is_selection_active(&self) -> bool {
        self.selection.is_active()
    }

    #[must_use]
    pub fn legend_alpha(&self, now: Instant) -> f32 {
        self.selection.legend_alpha(now)
    }

    /// Animated `(min, max)` of the picker mini-map.
    #[must_use]
    pub fn picker_bounds(&self, now: Instant) -> (f32, f32) {
        (
            self.picker_bounds.min.value_at(now),
            self.picker_bounds.max.value_at(now),
        )
    }

    #[must_use]
    pub fn series_alpha(&self, id: &SeriesId, now: Instant) -> Option<f32> {
        self.model
            .entries
            .get(id)
            .map(|entry| entry.alpha.value_at(now))
    }

    #[must_use]
    pub fn axis(&self) -> &AxisScaleController {
        &self.axis
    }

    #[must_use]
    pub fn label_scheduler(&self) -> &BottomLabelScheduler {
        &self.labels
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame(self.clock.now());
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
