use std::time::Instant;

use indexmap::IndexMap;

use crate::core::{
    ChartLayout, ChartViewport, Easing, PickerWindow, RangeIndex, Series, SeriesId, Timeline,
    Tween, min_distance,
};
use crate::error::{ChartError, ChartResult};

use super::engine_config::millis;

/// Window the picker falls back to when the chart has no data.
pub(super) const NO_DATA_WINDOW: (f32, f32) = (0.7, 1.0);

#[derive(Debug, Clone)]
pub(super) struct SeriesEntry {
    pub(super) series: Series,
    pub(super) enabled: bool,
    pub(super) alpha: Tween,
}

/// Animated value range of the picker mini-map.
#[derive(Debug, Clone, Copy)]
pub(super) struct PickerBounds {
    pub(super) min: Tween,
    pub(super) max: Tween,
}

impl PickerBounds {
    pub(super) fn settled(min: f32, max: f32, now: Instant) -> Self {
        Self {
            min: Tween::settled(min, now),
            max: Tween::settled(max, now),
        }
    }

    pub(super) fn animate_to(&mut self, min: f32, max: f32, now: Instant, duration_ms: f64) {
        let duration = millis(duration_ms);
        self.min = self.min.retarget(min, now, duration, Easing::EaseOutCubic);
        self.max = self.max.retarget(max, now, duration, Easing::EaseOutCubic);
    }

    pub(super) fn is_finished_at(&self, now: Instant) -> bool {
        self.min.is_finished_at(now) && self.max.is_finished_at(now)
    }
}

/// Series data, shared timeline and picker geometry.
#[derive(Debug, Clone)]
pub(super) struct ChartModel {
    pub(super) entries: IndexMap<SeriesId, SeriesEntry>,
    pub(super) timeline: Option<Timeline>,
    pub(super) layout: ChartLayout,
    pub(super) viewport: ChartViewport,
    pub(super) min_distance: f32,
    pub(super) min_distance_floor: f32,
}

impl ChartModel {
    pub(super) fn new(layout: ChartLayout, min_distance_floor: f32) -> ChartResult<Self> {
        let window = PickerWindow::new(NO_DATA_WINDOW.0, NO_DATA_WINDOW.1)?;
        let viewport = ChartViewport::new(window, layout.width, layout.horizontal_padding)?;
        Ok(Self {
            entries: IndexMap::new(),
            timeline: None,
            layout,
            viewport,
            min_distance: min_distance_floor,
            min_distance_floor,
        })
    }

    pub(super) fn window(&self) -> PickerWindow {
        self.viewport.window()
    }

    pub(super) fn set_window(&mut self, window: PickerWindow) {
        self.viewport = self.viewport.with_window(window);
    }

    pub(super) fn has_data(&self) -> bool {
        self.timeline.is_some()
    }

    pub(super) fn sample_count(&self) -> usize {
        self.timeline.as_ref().map_or(0, Timeline::len)
    }

    /// Validates and installs a new series set. On error the model is left
    /// untouched.
    pub(super) fn load(&mut self, series: Vec<Series>, now: Instant) -> ChartResult<()> {
        let Some(first) = series.first() else {
            return Err(ChartError::NoData);
        };
        let timeline = Timeline::from_series(first);

        let mut entries = IndexMap::with_capacity(series.len());
        for item in series {
            if !timeline.matches(&item) {
                return Err(ChartError::TimelineMismatch {
                    series: item.id().clone(),
                });
            }
            if entries.contains_key(item.id()) {
                return Err(ChartError::DuplicateSeries {
                    series: item.id().clone(),
                });
            }
            entries.insert(
                item.id().clone(),
                SeriesEntry {
                    series: item,
                    enabled: true,
                    alpha: Tween::settled(1.0, now),
                },
            );
        }

        self.min_distance = min_distance(timeline.len(), self.min_distance_floor);
        self.entries = entries;
        self.timeline = Some(timeline);
        Ok(())
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
        self.timeline = None;
        self.min_distance = self.min_distance_floor;
        if let Ok(window) = PickerWindow::new(NO_DATA_WINDOW.0, NO_DATA_WINDOW.1) {
            self.set_window(window);
        }
    }

    pub(super) fn enabled_indexes(&self) -> impl Iterator<Item = &RangeIndex> {
        self.entries
            .values()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.series.range_index())
    }

    /// Min/max over the whole timeline of enabled series, widened by one unit
    /// when flat.
    pub(super) fn overall_bounds(&self) -> Option<(f32, f32)> {
        let (min, max) = self
            .enabled_indexes()
            .filter_map(RangeIndex::overall)
            .reduce(|(lo, hi), (min, max)| (lo.min(min), hi.max(max)))?;
        let max = if max == min { max.saturating_add(1) } else { max };
        Some((min as f32, max as f32))
    }

    pub(super) fn visible_indices(&self) -> Option<(usize, usize)> {
        self.timeline
            .as_ref()
            .and_then(|timeline| self.viewport.visible_index_range(timeline))
    }
}
