use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Normalized sub-range `[start, end]` of the full series that is visible.
///
/// Invariant: `0 <= start < end <= 1`. Drag helpers additionally keep
/// `end - start >= min_distance`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickerWindow {
    start: f32,
    end: f32,
}

impl Default for PickerWindow {
    fn default() -> Self {
        Self::full()
    }
}

impl PickerWindow {
    pub fn new(start: f32, end: f32) -> ChartResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidData(
                "picker window bounds must be finite".to_owned(),
            ));
        }
        if start < 0.0 || end > 1.0 || start >= end {
            return Err(ChartError::InvalidData(format!(
                "picker window must satisfy 0 <= start < end <= 1, got ({start}, {end})"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 1.0,
        }
    }

    /// Window of `span` anchored at the right edge.
    #[must_use]
    pub fn anchored_at_end(span: f32) -> Self {
        let span = span.clamp(f32::EPSILON, 1.0);
        Self {
            start: (1.0 - span).max(0.0),
            end: 1.0,
        }
    }

    #[must_use]
    pub fn start(self) -> f32 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f32 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f32 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, value: f32) -> bool {
        value >= self.start && value <= self.end
    }

    /// Moves the left edge, keeping at least `min_distance` to the right edge.
    #[must_use]
    pub fn with_start_clamped(self, candidate: f32, min_distance: f32) -> Self {
        let mut start = candidate.max(0.0);
        if self.end - start < min_distance {
            start = (self.end - min_distance).max(0.0);
        }
        Self {
            start,
            end: self.end,
        }
    }

    /// Moves the right edge, keeping at least `min_distance` to the left edge.
    #[must_use]
    pub fn with_end_clamped(self, candidate: f32, min_distance: f32) -> Self {
        let mut end = candidate.min(1.0);
        if end - self.start < min_distance {
            end = (self.start + min_distance).min(1.0);
        }
        Self {
            start: self.start,
            end,
        }
    }

    /// Places a window of `span` at `start`, sliding it back inside `[0, 1]`.
    #[must_use]
    pub fn translated(start: f32, span: f32) -> Self {
        let span = span.clamp(f32::EPSILON, 1.0);
        if start < 0.0 {
            return Self {
                start: 0.0,
                end: span,
            };
        }
        if start + span > 1.0 {
            return Self {
                start: 1.0 - span,
                end: 1.0,
            };
        }
        Self {
            start,
            end: start + span,
        }
    }

    /// Zooms around a normalized anchor.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out. The anchor keeps
    /// its relative position inside the window; the span is clamped to
    /// `[min_distance, 1]`.
    pub fn zoomed(self, factor: f32, anchor: f32, min_distance: f32) -> ChartResult<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }

        let anchor = anchor.clamp(0.0, 1.0);
        let span = self.span();
        let target_span = (span / factor).clamp(min_distance.min(1.0), 1.0);
        let left_ratio = ((anchor - self.start) / span).clamp(0.0, 1.0);
        let new_start = anchor - left_ratio * target_span;
        Ok(Self::translated(new_start, target_span))
    }

    /// Widens the window to `min_distance`, growing to the left.
    ///
    /// Falls back to the full range when there is no room on the left.
    #[must_use]
    pub fn ensure_min_distance(self, min_distance: f32) -> Self {
        if self.span() >= min_distance {
            return self;
        }
        let start = self.end - min_distance;
        if start < 0.0 {
            return Self::full();
        }
        Self {
            start,
            end: self.end,
        }
    }
}

/// Smallest picker span allowed for a series of `sample_count` samples.
///
/// Short series (< 5 samples) cannot be zoomed at all; longer ones allow a
/// window of five samples but never narrower than `floor`.
#[must_use]
pub fn min_distance(sample_count: usize, floor: f32) -> f32 {
    if sample_count < 5 {
        return 1.0;
    }
    (5.0 / sample_count as f32).max(floor).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::{PickerWindow, min_distance};

    #[test]
    fn min_distance_shrinks_with_length_down_to_floor() {
        assert_eq!(min_distance(3, 0.1), 1.0);
        assert_eq!(min_distance(10, 0.1), 0.5);
        assert_eq!(min_distance(1_000, 0.1), 0.1);
        assert_eq!(min_distance(1_000, 0.001), 0.005);
    }

    #[test]
    fn right_handle_never_crosses_left_handle() {
        let window = PickerWindow::new(0.2, 1.0).expect("valid");
        let dragged = window.with_end_clamped(0.1, 0.1);
        assert_eq!(dragged.start(), 0.2);
        assert!((dragged.end() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn translated_window_slides_back_inside_unit_range() {
        let window = PickerWindow::translated(0.95, 0.2);
        assert_eq!(window.end(), 1.0);
        assert!((window.start() - 0.8).abs() < 1e-6);

        let window = PickerWindow::translated(-0.3, 0.2);
        assert_eq!((window.start(), window.end()), (0.0, 0.2));
    }

    #[test]
    fn zoom_keeps_anchor_relative_position() {
        let window = PickerWindow::new(0.2, 0.6).expect("valid");
        let zoomed = window.zoomed(2.0, 0.4, 0.05).expect("zoom");
        assert!((zoomed.start() - 0.3).abs() < 1e-6);
        assert!((zoomed.end() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rejects_inverted_windows() {
        assert!(PickerWindow::new(0.6, 0.5).is_err());
        assert!(PickerWindow::new(-0.1, 0.5).is_err());
        assert!(PickerWindow::new(0.1, f32::NAN).is_err());
    }
}
