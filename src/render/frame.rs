use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::api::{AxisBounds, GridLineGeneration, LabelGeneration};
use crate::core::{ChartLayout, ChartViewport, PickerWindow, Rect, SeriesId};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{GestureState, SelectionSnapshot};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesFrame {
    pub id: SeriesId,
    pub name: String,
    pub enabled: bool,
    /// Visibility fade in `[0, 1]`.
    pub alpha: f32,
}

/// One positioned bottom date label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottomLabel {
    pub index: usize,
    pub x_px: f32,
    pub text: String,
    pub alpha: u8,
}

/// Mini-map strip state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerFrame {
    pub window: PickerWindow,
    pub area: Rect,
    pub animated_min: f32,
    pub animated_max: f32,
}

/// Everything a backend needs to draw one chart frame.
///
/// Built fresh on every render; holds no references into the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFrame {
    pub layout: ChartLayout,
    pub viewport: ChartViewport,
    pub visible_indices: Option<(usize, usize)>,
    pub axis: AxisBounds,
    pub gridlines: Vec<GridLineGeneration>,
    pub labels: SmallVec<[LabelGeneration; 2]>,
    pub bottom_labels: Vec<BottomLabel>,
    pub picker: PickerFrame,
    pub gesture_state: GestureState,
    pub selection: SelectionSnapshot,
    pub selected_x: Option<i64>,
    pub series: Vec<SeriesFrame>,
}

impl ChartFrame {
    #[must_use]
    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.layout.validate()?;

        let axis = [
            self.axis.min,
            self.axis.max,
            self.axis.animated_min,
            self.axis.animated_max,
            self.picker.animated_min,
            self.picker.animated_max,
        ];
        if axis.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "frame axis bounds must be finite".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.axis.progress) {
            return Err(ChartError::InvalidData(
                "frame axis progress must be within [0, 1]".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.selection.legend_alpha) {
            return Err(ChartError::InvalidData(
                "frame legend alpha must be within [0, 1]".to_owned(),
            ));
        }
        if let Some(series) = self
            .series
            .iter()
            .find(|series| !(0.0..=1.0).contains(&series.alpha))
        {
            return Err(ChartError::InvalidData(format!(
                "series `{}` alpha must be within [0, 1]",
                series.id
            )));
        }
        if self.bottom_labels.iter().any(|label| !label.x_px.is_finite()) {
            return Err(ChartError::InvalidData(
                "bottom label positions must be finite".to_owned(),
            ));
        }
        if let Some((start, end)) = self.visible_indices {
            if start > end {
                return Err(ChartError::InvalidData(format!(
                    "visible index range is inverted: ({start}, {end})"
                )));
            }
        }
        Ok(())
    }
}
