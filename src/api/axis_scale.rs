use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::{Easing, GridLines, RangeIndex, Tween};

use super::AxisScaleConfig;
use super::engine_config::millis;

/// Rendered and committed vertical axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f32,
    pub max: f32,
    pub animated_min: f32,
    pub animated_max: f32,
    /// Eased-animation progress in `[0, 1]`; `1` when settled.
    pub progress: f32,
}

/// One gridline set with its current crossfade alpha.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLineGeneration {
    pub lines: GridLines,
    pub alpha: u8,
}

/// How a visible-window change should be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescaleMode {
    /// Animated, subject to the debounce window.
    Debounced,
    /// Animated, bypasses the debounce window.
    Forced,
    /// Jumps straight to the target without animation.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RescaleOutcome {
    /// Degenerate window or nothing enabled.
    Skipped,
    /// Target unchanged or the change is below the label threshold.
    Suppressed,
    /// Remembered; committed by a later call or by `advance`.
    Debounced,
    /// Animation toward the new target started.
    Started,
    /// Bounds applied without animation.
    Applied,
}

#[derive(Debug, Clone)]
struct GridFade {
    lines: GridLines,
    alpha: Tween,
}

/// Debounced, threshold-suppressed, animated vertical axis.
#[derive(Debug, Clone)]
pub struct AxisScaleController {
    config: AxisScaleConfig,
    max: Tween,
    min: Tween,
    target: Option<GridLines>,
    pending: Option<GridLines>,
    last_commit: Option<Instant>,
    gridlines: SmallVec<[GridFade; 4]>,
}

impl AxisScaleController {
    #[must_use]
    pub fn new(config: AxisScaleConfig, now: Instant) -> Self {
        Self {
            config,
            max: Tween::settled(0.0, now),
            min: Tween::settled(0.0, now),
            target: None,
            pending: None,
            last_commit: None,
            gridlines: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> AxisScaleConfig {
        self.config
    }

    #[must_use]
    pub fn target(&self) -> Option<&GridLines> {
        self.target.as_ref()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Forgets all bounds, e.g. when the chart loses its data.
    pub fn reset(&mut self, now: Instant) {
        *self = Self::new(self.config, now);
    }

    /// Min/max over `[start_index, end_index]` across the given indexes.
    ///
    /// The minimum is pinned to zero unless the min axis is tracked.
    #[must_use]
    pub fn visible_extremes<'a>(
        &self,
        indexes: impl IntoIterator<Item = &'a RangeIndex>,
        start_index: usize,
        end_index: usize,
    ) -> Option<(i64, i64)> {
        let mut found: Option<(i64, i64)> = None;
        for index in indexes {
            let Some((min, max)) = index.range_min_max(start_index, end_index) else {
                continue;
            };
            found = Some(match found {
                Some((lo, hi)) => (lo.min(min), hi.max(max)),
                None => (min, max),
            });
        }
        found.map(|(min, max)| if self.config.track_min { (min, max) } else { (0, max) })
    }

    /// Reacts to a new visible index range.
    pub fn window_changed<'a>(
        &mut self,
        indexes: impl IntoIterator<Item = &'a RangeIndex>,
        start_index: usize,
        end_index: usize,
        mode: RescaleMode,
        plot_height: f32,
        now: Instant,
    ) -> RescaleOutcome {
        if start_index >= end_index {
            trace!(start_index, end_index, "degenerate window, axis untouched");
            return RescaleOutcome::Skipped;
        }
        let Some((min, max)) = self.visible_extremes(indexes, start_index, end_index) else {
            trace!("no enabled series, axis untouched");
            return RescaleOutcome::Skipped;
        };
        let lines = GridLines::fit(min, max, self.config.gridline_intervals);
        self.apply_target(lines, mode, plot_height, now)
    }

    fn apply_target(
        &mut self,
        lines: GridLines,
        mode: RescaleMode,
        plot_height: f32,
        now: Instant,
    ) -> RescaleOutcome {
        if mode != RescaleMode::Immediate {
            if let Some(target) = &self.target {
                if target.min() == lines.min() && target.max() == lines.max() {
                    self.pending = None;
                    return RescaleOutcome::Suppressed;
                }
                let threshold = self.threshold(target, plot_height);
                let max_delta = (lines.max() as f64 - target.max() as f64).abs() as f32;
                let min_delta = (lines.min() as f64 - target.min() as f64).abs() as f32;
                if max_delta < threshold && (!self.config.track_min || min_delta < threshold) {
                    trace!(max_delta, min_delta, threshold, "rescale below label threshold");
                    self.pending = None;
                    return RescaleOutcome::Suppressed;
                }
            }
        }

        if mode == RescaleMode::Debounced && self.within_debounce(now) {
            debug!(min = lines.min(), max = lines.max(), "rescale debounced");
            self.pending = Some(lines);
            return RescaleOutcome::Debounced;
        }

        if mode == RescaleMode::Immediate {
            self.commit_immediate(lines, now);
            RescaleOutcome::Applied
        } else {
            self.commit_animated(lines, now);
            RescaleOutcome::Started
        }
    }

    /// Value-space height of one axis label.
    fn threshold(&self, target: &GridLines, plot_height: f32) -> f32 {
        if plot_height <= 0.0 {
            return 0.0;
        }
        let span = (i128::from(target.max()) - i128::from(target.min())) as f32;
        span / plot_height * self.config.label_text_px
    }

    fn within_debounce(&self, now: Instant) -> bool {
        self.last_commit.is_some_and(|last| {
            now.saturating_duration_since(last) < millis(self.config.debounce_ms)
        })
    }

    fn commit_immediate(&mut self, lines: GridLines, now: Instant) {
        debug!(min = lines.min(), max = lines.max(), "axis bounds applied");
        self.max = Tween::settled(lines.max() as f32, now);
        self.min = Tween::settled(lines.min() as f32, now);
        self.gridlines.clear();
        self.gridlines.push(GridFade {
            lines: lines.clone(),
            alpha: Tween::settled(1.0, now),
        });
        self.target = Some(lines);
        self.pending = None;
        self.last_commit = Some(now);
    }

    fn commit_animated(&mut self, lines: GridLines, now: Instant) {
        debug!(min = lines.min(), max = lines.max(), "axis rescale started");
        let duration = millis(self.config.animation_ms);
        self.max = self
            .max
            .retarget(lines.max() as f32, now, duration, Easing::EaseOutCubic);
        self.min = self
            .min
            .retarget(lines.min() as f32, now, duration, Easing::EaseOutCubic);

        let fade = millis(self.config.gridline_fade_ms);
        for generation in &mut self.gridlines {
            generation.alpha = generation.alpha.retarget(0.0, now, fade, Easing::Linear);
        }
        self.gridlines.push(GridFade {
            lines: lines.clone(),
            alpha: Tween::new(0.0, 1.0, now, fade, Easing::Linear),
        });

        self.target = Some(lines);
        self.pending = None;
        self.last_commit = Some(now);
    }

    /// Commits a debounced target once allowed and retires faded gridlines.
    ///
    /// Returns `true` while anything is still moving or waiting.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.within_debounce(now) {
            if let Some(lines) = self.pending.take() {
                debug!(min = lines.min(), max = lines.max(), "committing debounced rescale");
                self.commit_animated(lines, now);
            }
        }

        let newest = self.gridlines.len().saturating_sub(1);
        let mut position = 0;
        self.gridlines.retain(|generation| {
            let keep = position == newest
                || !(generation.alpha.target() == 0.0 && generation.alpha.is_finished_at(now));
            position += 1;
            keep
        });

        self.pending.is_some()
            || !self.max.is_finished_at(now)
            || !self.min.is_finished_at(now)
            || self
                .gridlines
                .iter()
                .any(|generation| !generation.alpha.is_finished_at(now))
    }

    #[must_use]
    pub fn bounds(&self, now: Instant) -> AxisBounds {
        let (min, max) = self
            .target
            .as_ref()
            .map_or((0.0, 0.0), |lines| (lines.min() as f32, lines.max() as f32));
        AxisBounds {
            min,
            max,
            animated_min: self.min.value_at(now),
            animated_max: self.max.value_at(now),
            progress: self.max.progress_at(now),
        }
    }

    /// Gridline sets oldest first, newest last.
    #[must_use]
    pub fn gridlines(&self, now: Instant) -> Vec<GridLineGeneration> {
        self.gridlines
            .iter()
            .map(|generation| GridLineGeneration {
                lines: generation.lines.clone(),
                alpha: alpha_to_u8(generation.alpha.value_at(now)),
            })
            .collect()
    }

    /// Time left until a debounced target may be committed.
    #[must_use]
    pub fn debounce_remaining(&self, now: Instant) -> Duration {
        self.last_commit.map_or(Duration::ZERO, |last| {
            millis(self.config.debounce_ms).saturating_sub(now.saturating_duration_since(last))
        })
    }
}

pub(super) fn alpha_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::{AxisScaleController, RescaleMode, RescaleOutcome};
    use crate::api::AxisScaleConfig;
    use crate::core::RangeIndex;

    fn ramp() -> RangeIndex {
        RangeIndex::build(&(0..100).collect::<Vec<i64>>())
    }

    #[test]
    fn immediate_rescale_settles_on_nice_bounds() {
        let now = Instant::now();
        let index = ramp();
        let mut axis = AxisScaleController::new(AxisScaleConfig::default(), now);
        let outcome = axis.window_changed([&index], 0, 99, RescaleMode::Immediate, 300.0, now);
        assert_eq!(outcome, RescaleOutcome::Applied);
        let bounds = axis.bounds(now);
        assert_eq!((bounds.min, bounds.max), (0.0, 100.0));
        assert_eq!(bounds.animated_max, 100.0);
        assert_eq!(axis.gridlines(now).len(), 1);
    }

    #[test]
    fn debounced_target_commits_on_advance() {
        let start = Instant::now();
        let index = ramp();
        let config = AxisScaleConfig {
            track_min: true,
            ..AxisScaleConfig::default()
        };
        let mut axis = AxisScaleController::new(config, start);
        axis.window_changed([&index], 0, 99, RescaleMode::Immediate, 300.0, start);

        let soon = start + Duration::from_millis(100);
        let outcome = axis.window_changed([&index], 50, 59, RescaleMode::Debounced, 300.0, soon);
        assert_eq!(outcome, RescaleOutcome::Debounced);
        assert_eq!(axis.bounds(soon).max, 100.0);

        let later = start + Duration::from_millis(320);
        assert!(axis.advance(later));
        assert_eq!(axis.bounds(later).max, 60.0);
        assert_eq!(axis.bounds(later).min, 50.0);
        assert_eq!(axis.gridlines(later).len(), 2);

        let settled = later + Duration::from_millis(400);
        assert!(!axis.advance(settled));
        assert_eq!(axis.gridlines(settled).len(), 1);
        assert_eq!(axis.bounds(settled).animated_max, 60.0);
    }

    #[test]
    fn degenerate_window_and_disabled_series_skip() {
        let now = Instant::now();
        let index = ramp();
        let mut axis = AxisScaleController::new(AxisScaleConfig::default(), now);
        assert_eq!(
            axis.window_changed([&index], 5, 5, RescaleMode::Forced, 300.0, now),
            RescaleOutcome::Skipped
        );
        assert_eq!(
            axis.window_changed([], 0, 10, RescaleMode::Forced, 300.0, now),
            RescaleOutcome::Skipped
        );
        assert!(axis.target().is_none());
    }

    #[test]
    fn change_smaller_than_one_label_is_suppressed() {
        let now = Instant::now();
        let wide = RangeIndex::build(&[0, 1000]);
        let nudged = RangeIndex::build(&[0, 1010]);

        // 1010 rounds to 1250; one label on a 300 px plot is 40 units tall
        let mut axis = AxisScaleController::new(AxisScaleConfig::default(), now);
        axis.window_changed([&wide], 0, 1, RescaleMode::Immediate, 300.0, now);
        let outcome = axis.window_changed([&nudged], 0, 1, RescaleMode::Forced, 300.0, now);
        assert_eq!(outcome, RescaleOutcome::Started);

        // on a 30 px plot one label spans 400 units
        let mut axis = AxisScaleController::new(AxisScaleConfig::default(), now);
        axis.window_changed([&wide], 0, 1, RescaleMode::Immediate, 30.0, now);
        let outcome = axis.window_changed([&nudged], 0, 1, RescaleMode::Forced, 30.0, now);
        assert_eq!(outcome, RescaleOutcome::Suppressed);
        assert_eq!(axis.bounds(now).max, 1000.0);
    }

    #[test]
    fn returning_mid_animation_retargets_instead_of_suppressing() {
        let start = Instant::now();
        let index = ramp();
        let mut axis = AxisScaleController::new(AxisScaleConfig::default(), start);
        axis.window_changed([&index], 0, 99, RescaleMode::Immediate, 300.0, start);

        let outcome = axis.window_changed([&index], 50, 59, RescaleMode::Forced, 300.0, start);
        assert_eq!(outcome, RescaleOutcome::Started);

        // still drawn near 100 while the committed target is 60
        let back = start + Duration::from_millis(1);
        let outcome = axis.window_changed([&index], 0, 99, RescaleMode::Forced, 300.0, back);
        assert_eq!(outcome, RescaleOutcome::Started);

        let settled = back + Duration::from_secs(1);
        axis.advance(settled);
        let bounds = axis.bounds(settled);
        assert_eq!(bounds.max, 100.0);
        assert_eq!(bounds.animated_max, 100.0);
    }

    #[test]
    fn extreme_values_fit_without_overflow() {
        let now = Instant::now();
        let wide = RangeIndex::build(&[i64::MIN, 0, i64::MAX]);
        let narrow = RangeIndex::build(&[i64::MIN, -1, 0]);
        let config = AxisScaleConfig {
            track_min: true,
            ..AxisScaleConfig::default()
        };
        let mut axis = AxisScaleController::new(config, now);
        let outcome = axis.window_changed([&wide], 0, 2, RescaleMode::Immediate, 300.0, now);
        assert_eq!(outcome, RescaleOutcome::Applied);
        let target = axis.target().expect("target").clone();
        assert_eq!((target.min(), target.max()), (i64::MIN, i64::MAX));

        let outcome = axis.window_changed([&narrow], 0, 2, RescaleMode::Forced, 300.0, now);
        assert_eq!(outcome, RescaleOutcome::Started);
        assert_eq!(axis.target().expect("target").min(), i64::MIN);
    }
}
