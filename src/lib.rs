//! chart-viewport: interactive viewport engine for zoomable time-series
//! charts.
//!
//! The crate maps a picker window onto pixels, answers windowed min/max
//! queries, animates the vertical axis and bottom labels, and arbitrates
//! pointer gestures between picker drags and selection scrubs. Drawing is
//! left to a [`render::Renderer`] implementation.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartController};
pub use error::{ChartError, ChartResult};
