use serde::{Deserialize, Serialize};

use crate::core::{PickerWindow, SeriesId};
use crate::interaction::GestureState;

/// Read-only state passed along with every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ListenerContext {
    pub window: PickerWindow,
    pub visible_indices: Option<(usize, usize)>,
    pub sample_count: usize,
    pub gesture_state: GestureState,
    pub selected_index: Option<usize>,
}

/// Events a host can observe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// The visible timestamps changed.
    VisibleRangeChanged { start_x: i64, end_x: i64 },
    DateSelected { x: i64 },
    SelectionCleared,
    SeriesToggled { series: SeriesId, enabled: bool },
    DataUpdated { series_count: usize, sample_count: usize },
}

/// Observer hook for chart state changes.
///
/// Listeners cannot mutate the controller; they only see events plus a
/// context snapshot.
pub trait ChartListener {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: ListenerContext);
}
