use crate::core::{Clock, MonotonicClock};
use crate::error::ChartResult;
use crate::interaction::{GestureArbiter, SelectionState};
use crate::render::Renderer;

use super::chart_model::{ChartModel, PickerBounds};
use super::engine_config::millis;
use super::{AxisScaleController, BottomLabelScheduler, ChartConfig, ChartController};

impl<R: Renderer> ChartController<R> {
    /// Creates a controller in the no-data state, reading time from
    /// [`MonotonicClock`].
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        Self::with_clock(renderer, config, Box::new(MonotonicClock))
    }

    /// Creates a controller with an injected time source.
    ///
    /// Invalid configuration fails here rather than on first use.
    pub fn with_clock(renderer: R, config: ChartConfig, clock: Box<dyn Clock>) -> ChartResult<Self> {
        config.validate()?;
        let now = clock.now();
        let model = ChartModel::new(config.layout, config.picker.min_distance_floor)?;

        Ok(Self {
            renderer,
            clock,
            config,
            model,
            axis: AxisScaleController::new(config.axis, now),
            labels: BottomLabelScheduler::new(config.labels),
            gesture: GestureArbiter::new(config.gesture),
            selection: SelectionState::new(millis(config.fades.legend_fade_ms), now),
            picker_bounds: PickerBounds::settled(0.0, 0.0, now),
            interaction_enabled: true,
            last_visible: None,
            listeners: Vec::new(),
        })
    }
}
