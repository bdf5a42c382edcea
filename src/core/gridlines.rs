use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One set of horizontal gridline values, bottom to top.
///
/// Values are evenly spaced by a "nice" step (1, 2, 2.5 or 5 times a power of
/// ten) and the outermost lines enclose the fitted range, so the axis bounds
/// of a chart are always `values[0]` and `values[last]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLines {
    step: i64,
    values: SmallVec<[i64; 8]>,
}

impl GridLines {
    /// Fits gridlines around `[min, max]` aiming for `intervals` gaps.
    ///
    /// The result always encloses the input: `min() <= min` and `max() >= max`.
    #[must_use]
    pub fn fit(min: i64, max: i64, intervals: u32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let intervals = intervals.max(1);
        let span = i128::from(hi) - i128::from(lo);
        let step = i128::from(nice_step(span as f64 / f64::from(intervals)));

        let first = floor_to_step(i128::from(lo), step);
        let mut last = ceil_to_step(i128::from(hi), step);
        if last == first {
            last += step;
        }

        let mut values = SmallVec::new();
        let mut value = first;
        while value <= last {
            values.push(saturate(value));
            value += step;
        }

        Self {
            step: saturate(step),
            values,
        }
    }

    #[must_use]
    pub fn step(&self) -> i64 {
        self.step
    }

    #[must_use]
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    #[must_use]
    pub fn min(&self) -> i64 {
        self.values[0]
    }

    #[must_use]
    pub fn max(&self) -> i64 {
        self.values[self.values.len() - 1]
    }
}

/// Smallest step from `{1, 2, 2.5, 5} x 10^k` that is `>= raw`.
///
/// `2.5` multipliers are only used when the result stays integral.
#[must_use]
pub fn nice_step(raw: f64) -> i64 {
    if !raw.is_finite() || raw <= 1.0 {
        return 1;
    }

    let exponent = raw.log10().floor() as u32;
    let Some(magnitude) = 10i64.checked_pow(exponent) else {
        return i64::MAX;
    };

    let candidates = [
        Some(magnitude),
        magnitude.checked_mul(2),
        if magnitude >= 10 {
            magnitude.checked_mul(5).map(|v| v / 2)
        } else {
            None
        },
        magnitude.checked_mul(5),
        magnitude.checked_mul(10),
    ];
    candidates
        .into_iter()
        .flatten()
        .find(|candidate| *candidate as f64 >= raw)
        .unwrap_or(i64::MAX)
}

fn floor_to_step(value: i128, step: i128) -> i128 {
    value.div_euclid(step) * step
}

fn ceil_to_step(value: i128, step: i128) -> i128 {
    let floor = floor_to_step(value, step);
    if floor == value { floor } else { floor + step }
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

#[cfg(test)]
mod tests {
    use super::{GridLines, nice_step};

    #[test]
    fn nice_step_picks_next_boundary() {
        assert_eq!(nice_step(0.4), 1);
        assert_eq!(nice_step(1.8), 2);
        assert_eq!(nice_step(3.0), 5);
        assert_eq!(nice_step(19.8), 20);
        assert_eq!(nice_step(21.0), 25);
        assert_eq!(nice_step(60.0), 100);
    }

    #[test]
    fn full_range_rounds_max_up() {
        let lines = GridLines::fit(0, 99, 5);
        assert_eq!(lines.step(), 20);
        assert_eq!(lines.values(), &[0, 20, 40, 60, 80, 100]);
    }

    #[test]
    fn narrow_range_rounds_both_ends_outward() {
        let lines = GridLines::fit(50, 59, 5);
        assert_eq!(lines.step(), 2);
        assert_eq!((lines.min(), lines.max()), (50, 60));
    }

    #[test]
    fn flat_and_negative_ranges_stay_enclosed() {
        let flat = GridLines::fit(7, 7, 5);
        assert_eq!((flat.min(), flat.max()), (7, 8));

        let negative = GridLines::fit(-37, -3, 5);
        assert!(negative.min() <= -37);
        assert!(negative.max() >= -3);
        assert_eq!(negative.step(), 10);
    }
}
