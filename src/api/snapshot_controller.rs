use std::time::Instant;

use crate::core::format_day_label;
use crate::error::{ChartError, ChartResult};
use crate::render::{BottomLabel, ChartFrame, PickerFrame, Renderer, SeriesFrame};

use super::ChartController;

impl<R: Renderer> ChartController<R> {
    /// Materializes everything a renderer needs at `now`.
    #[must_use]
    pub fn frame(&self, now: Instant) -> ChartFrame {
        let visible_indices = self.model.visible_indices();
        let labels = self.labels.generations(now);
        let (picker_min, picker_max) = self.picker_bounds(now);

        ChartFrame {
            layout: self.model.layout,
            viewport: self.model.viewport,
            visible_indices,
            axis: self.axis.bounds(now),
            gridlines: self.axis.gridlines(now),
            bottom_labels: self.bottom_labels(visible_indices, &labels),
            labels,
            picker: PickerFrame {
                window: self.model.window(),
                area: self.model.layout.picker_area(),
                animated_min: picker_min,
                animated_max: picker_max,
            },
            gesture_state: self.gesture.state(),
            selection: self.selection.snapshot(now),
            selected_x: self
                .selection
                .index()
                .and_then(|index| self.model.timeline.as_ref()?.x(index)),
            series: self
                .model
                .entries
                .values()
                .map(|entry| SeriesFrame {
                    id: entry.series.id().clone(),
                    name: entry.series.name().to_owned(),
                    enabled: entry.enabled,
                    alpha: entry.alpha.value_at(now),
                })
                .collect(),
        }
    }

    /// Serializes the current frame as pretty JSON for fixture-based checks.
    pub fn frame_json_pretty(&self, now: Instant) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.frame(now))
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize frame: {e}")))
    }

    fn bottom_labels(
        &self,
        visible: Option<(usize, usize)>,
        generations: &[super::LabelGeneration],
    ) -> Vec<BottomLabel> {
        let (Some(timeline), Some(visible)) = (self.model.timeline.as_ref(), visible) else {
            return Vec::new();
        };
        let picker_width = self.model.layout.picker_area().width;

        let mut labels = Vec::new();
        for generation in generations {
            for index in
                self.labels
                    .label_indices(generation, visible, timeline.len(), picker_width)
            {
                let (Some(x), Some(x_px)) = (
                    timeline.x(index),
                    self.model.viewport.data_index_to_pixel(timeline, index),
                ) else {
                    continue;
                };
                labels.push(BottomLabel {
                    index,
                    x_px,
                    text: format_day_label(x),
                    alpha: generation.alpha,
                });
            }
        }
        labels
    }
}
