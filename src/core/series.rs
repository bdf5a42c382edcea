use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::RangeIndex;
use crate::error::{ChartError, ChartResult};

/// Stable identifier of one series inside a chart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesId(String);

impl SeriesId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SeriesId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Immutable `(timestamp, value)` samples with their range index.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: SeriesId,
    name: String,
    xs: Vec<i64>,
    ys: Vec<i64>,
    index: RangeIndex,
}

impl Series {
    /// Builds a series from `(x, y)` pairs.
    ///
    /// Fails on empty input or when `x` is not strictly increasing.
    pub fn new(id: impl Into<SeriesId>, points: Vec<(i64, i64)>) -> ChartResult<Self> {
        let (xs, ys): (Vec<i64>, Vec<i64>) = points.into_iter().unzip();
        Self::from_columns(id, xs, ys)
    }

    /// Builds a series from parallel timestamp/value columns.
    pub fn from_columns(id: impl Into<SeriesId>, xs: Vec<i64>, ys: Vec<i64>) -> ChartResult<Self> {
        let id = id.into();
        if xs.is_empty() {
            return Err(ChartError::EmptySeries { series: id });
        }
        if xs.len() != ys.len() {
            return Err(ChartError::InvalidData(format!(
                "series `{id}` has {} timestamps but {} values",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(position) = xs.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::NonMonotonicTime {
                series: id,
                index: position + 1,
            });
        }

        let index = RangeIndex::build(&ys);
        Ok(Self {
            name: id.to_string(),
            id,
            xs,
            ys,
            index,
        })
    }

    /// Sets the human-readable name shown in legends.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn id(&self) -> &SeriesId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    #[must_use]
    pub fn ys(&self) -> &[i64] {
        &self.ys
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<i64> {
        self.ys.get(index).copied()
    }

    #[must_use]
    pub fn range_index(&self) -> &RangeIndex {
        &self.index
    }
}

/// Length of one UTC day in milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Shared x axis of every series in a chart.
///
/// `x_percentage[i]` is the position of sample `i` normalized to `[0, 1]`
/// over the full timestamp span; all picker and pixel math runs on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    xs: Vec<i64>,
    x_percentage: Vec<f32>,
    one_sample_percentage: f32,
}

impl Timeline {
    #[must_use]
    pub fn from_series(series: &Series) -> Self {
        let xs = series.xs().to_vec();
        let first = xs[0];
        let last = xs[xs.len() - 1];
        let span = (i128::from(last) - i128::from(first)) as f64;
        let x_percentage = if span > 0.0 {
            xs.iter()
                .map(|x| ((i128::from(*x) - i128::from(first)) as f64 / span) as f32)
                .collect()
        } else {
            vec![0.0; xs.len()]
        };
        let one_sample_percentage = if xs.len() > 1 {
            1.0 / (xs.len() - 1) as f32
        } else {
            1.0
        };

        Self {
            xs,
            x_percentage,
            one_sample_percentage,
        }
    }

    /// Whether `series` samples exactly this timeline's timestamps.
    #[must_use]
    pub fn matches(&self, series: &Series) -> bool {
        self.xs == series.xs()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn xs(&self) -> &[i64] {
        &self.xs
    }

    #[must_use]
    pub fn x(&self, index: usize) -> Option<i64> {
        self.xs.get(index).copied()
    }

    #[must_use]
    pub fn x_percentage(&self) -> &[f32] {
        &self.x_percentage
    }

    #[must_use]
    pub fn percentage(&self, index: usize) -> Option<f32> {
        self.x_percentage.get(index).copied()
    }

    /// Average normalized distance between two neighbouring samples.
    #[must_use]
    pub fn one_sample_percentage(&self) -> f32 {
        self.one_sample_percentage
    }

    /// Position of an exact timestamp.
    #[must_use]
    pub fn index_of(&self, x: i64) -> Option<usize> {
        self.xs.binary_search(&x).ok()
    }

    /// Samples bracketing the UTC day that contains `x`.
    ///
    /// Returns the last sample before the day starts and the last sample
    /// before it ends; either falls back to `0` when no sample precedes it.
    #[must_use]
    pub fn day_span(&self, x: i64) -> (usize, usize) {
        let day = i128::from(DAY_MS);
        let start_of_day = i128::from(x).div_euclid(day) * day;
        let end_of_day = start_of_day + day - 1;
        let last_before = |bound: i128| {
            self.xs
                .partition_point(|sample| i128::from(*sample) < bound)
                .saturating_sub(1)
        };
        (last_before(start_of_day), last_before(end_of_day))
    }

    /// First sample whose normalized x is `>= value`.
    #[must_use]
    pub fn find_start_index(&self, value: f32) -> usize {
        if self.xs.len() < 2 || value <= 0.0 {
            return 0;
        }
        self.x_percentage
            .partition_point(|p| *p < value)
            .min(self.xs.len() - 1)
    }

    /// Last sample whose normalized x is `<= value`, never before `start`.
    #[must_use]
    pub fn find_end_index(&self, start: usize, value: f32) -> usize {
        let last = self.xs.len().saturating_sub(1);
        if value >= 1.0 {
            return last;
        }
        let end = self
            .x_percentage
            .partition_point(|p| *p <= value)
            .saturating_sub(1);
        end.max(start).min(last)
    }

    /// Last sample inside `[left, right]` whose normalized x is `<= value`.
    #[must_use]
    pub fn find_index(&self, left: usize, right: usize, value: f32) -> usize {
        let right = right.min(self.xs.len().saturating_sub(1));
        if left >= right {
            return right;
        }
        let slice = &self.x_percentage[left..=right];
        left + slice.partition_point(|p| *p <= value).saturating_sub(1)
    }

    /// Sample nearest to `value`, clamped to `[left, right]`.
    ///
    /// Ties between two neighbours resolve to the lower index.
    #[must_use]
    pub fn nearest_index(&self, left: usize, right: usize, value: f32) -> usize {
        let last = self.xs.len().saturating_sub(1);
        let mut index = if value <= 0.0 {
            0
        } else if value >= 1.0 {
            last
        } else {
            let floor = self.find_index(0, last, value);
            match (self.percentage(floor), self.percentage(floor + 1)) {
                (Some(low), Some(high)) if (high - value).abs() < (value - low).abs() => floor + 1,
                _ => floor,
            }
        };
        if index > right {
            index = right;
        }
        if index < left {
            index = left;
        }
        index
    }
}
