//! Stateful controllers and the `ChartController` facade.

mod animation_controller;
mod axis_scale;
mod chart_model;
mod data_controller;
mod engine;
mod engine_config;
mod engine_init;
mod interaction_controller;
mod json_contract;
mod label_scheduler;
mod listener_dispatch;
mod listener_registry;
mod persisted_state;
mod snapshot_controller;
mod validation;
mod visible_window_access;

pub use axis_scale::{
    AxisBounds, AxisScaleController, GridLineGeneration, RescaleMode, RescaleOutcome,
};
pub use engine::ChartController;
pub use engine_config::{
    AxisScaleConfig, ChartConfig, LabelSchedulerConfig, PickerConfig, SeriesFadeConfig,
};
pub use json_contract::{PERSISTED_STATE_JSON_SCHEMA_V1, PersistedStateJsonContractV1};
pub use label_scheduler::{BottomLabelScheduler, LabelGeneration, LabelUpdate};
pub use persisted_state::PersistedState;

pub use crate::core::ChartLayout;
pub use crate::interaction::GestureConfig;
