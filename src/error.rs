use thiserror::Error;

use crate::core::SeriesId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: f32, height: f32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("series `{series}` has no samples")]
    EmptySeries { series: SeriesId },

    #[error("series `{series}` timestamps are not strictly increasing at index {index}")]
    NonMonotonicTime { series: SeriesId, index: usize },

    #[error("series `{series}` does not share the chart timeline")]
    TimelineMismatch { series: SeriesId },

    #[error("series `{series}` is registered more than once")]
    DuplicateSeries { series: SeriesId },

    #[error("unknown series `{series}`")]
    UnknownSeries { series: SeriesId },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("chart has no data")]
    NoData,
}
