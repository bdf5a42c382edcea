use std::time::Instant;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{ChartViewport, Easing, Timeline, Tween};

use super::LabelSchedulerConfig;
use super::axis_scale::alpha_to_u8;
use super::engine_config::millis;

/// Bottom label stride with its hysteresis band and crossfade alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelGeneration {
    pub step: i32,
    pub step_min: i32,
    pub step_max: i32,
    pub alpha: u8,
}

impl LabelGeneration {
    /// Stride used when placing labels; a zero step labels every sample.
    #[must_use]
    pub fn effective_step(&self) -> usize {
        usize::try_from(self.step).unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelUpdate {
    Unchanged,
    Initialized,
    Crossfading,
}

#[derive(Debug, Clone, Copy)]
struct Generation {
    step: i32,
    step_min: i32,
    step_max: i32,
    alpha: Tween,
}

/// Picks the bottom label stride and crossfades between strides.
///
/// At most two generations exist: the active one (last) and the one it
/// replaces. A step change while a crossfade runs drops the oldest.
#[derive(Debug, Clone)]
pub struct BottomLabelScheduler {
    config: LabelSchedulerConfig,
    generations: SmallVec<[Generation; 2]>,
}

impl BottomLabelScheduler {
    #[must_use]
    pub fn new(config: LabelSchedulerConfig) -> Self {
        Self {
            config,
            generations: SmallVec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.generations.clear();
    }

    /// Raw stride: visible samples divided by the label count.
    #[must_use]
    pub fn candidate_step(&self, viewport: &ChartViewport, timeline: &Timeline) -> i32 {
        let sample_width = viewport.full_width() * timeline.one_sample_percentage();
        if !sample_width.is_finite() || sample_width <= 0.0 {
            return 0;
        }
        let density = viewport.chart_width() / sample_width;
        (density / self.config.label_count as f32) as i32
    }

    pub fn update(&mut self, viewport: &ChartViewport, timeline: &Timeline, now: Instant) -> LabelUpdate {
        let step = self.candidate_step(viewport, timeline);
        self.update_step(step, now)
    }

    /// Applies a raw stride, honoring the hysteresis band of the active step.
    pub fn update_step(&mut self, raw_step: i32, now: Instant) -> LabelUpdate {
        if let Some(active) = self.generations.last() {
            if raw_step < active.step_max && raw_step > active.step_min {
                return LabelUpdate::Unchanged;
            }
        }

        let step = highest_one_bit(raw_step.max(0)) << 1;
        if self
            .generations
            .last()
            .is_some_and(|active| active.step == step)
        {
            return LabelUpdate::Unchanged;
        }

        let band = self.config.hysteresis;
        let step_max = (step as f32 + step as f32 * band) as i32;
        let step_min = (step as f32 - step as f32 * band) as i32;

        if self.generations.is_empty() {
            self.generations.push(Generation {
                step,
                step_min,
                step_max,
                alpha: Tween::settled(1.0, now),
            });
            return LabelUpdate::Initialized;
        }

        debug!(raw_step, step, "bottom label step changed");
        let fade = millis(self.config.crossfade_ms);
        for generation in &mut self.generations {
            generation.alpha = generation.alpha.retarget(0.0, now, fade, Easing::Linear);
        }
        if self.generations.len() == 2 {
            self.generations.remove(0);
        }
        self.generations.push(Generation {
            step,
            step_min,
            step_max,
            alpha: Tween::new(0.0, 1.0, now, fade, Easing::Linear),
        });
        LabelUpdate::Crossfading
    }

    /// Retires the outgoing generation once faded. Returns `true` while a
    /// crossfade is running.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.generations.len() == 2 && self.generations[0].alpha.is_finished_at(now) {
            self.generations.remove(0);
        }
        self.generations
            .iter()
            .any(|generation| !generation.alpha.is_finished_at(now))
    }

    #[must_use]
    pub fn active(&self, now: Instant) -> Option<LabelGeneration> {
        self.generations
            .last()
            .map(|generation| snapshot(generation, now))
    }

    /// Outgoing generation first, active last.
    #[must_use]
    pub fn generations(&self, now: Instant) -> SmallVec<[LabelGeneration; 2]> {
        self.generations
            .iter()
            .map(|generation| snapshot(generation, now))
            .collect()
    }

    /// Sample indices labeled by `generation` for the visible range.
    ///
    /// Labels are aligned to the step after shifting by the edge offset
    /// (converted from pixels to samples on the picker strip), run one step
    /// past the visible end so they can slide in, and never include the final
    /// sample.
    #[must_use]
    pub fn label_indices(
        &self,
        generation: &LabelGeneration,
        visible: (usize, usize),
        sample_count: usize,
        picker_width: f32,
    ) -> Vec<usize> {
        if sample_count < 2 {
            return Vec::new();
        }
        let step = generation.effective_step() as i64;
        let offset = self.edge_offset_samples(sample_count, picker_width) as i64;
        let (start_index, end_index) = (visible.0 as i64, visible.1 as i64);

        let start = (start_index - offset).div_euclid(step) * step + offset;
        let aligned_end = end_index - offset;
        let end = (aligned_end + (step - aligned_end.rem_euclid(step)) % step) + offset + step;
        let last_labelable = sample_count as i64 - 1;

        (start..end.min(last_labelable))
            .step_by(step as usize)
            .filter(|index| *index >= 0)
            .map(|index| index as usize)
            .collect()
    }

    fn edge_offset_samples(&self, sample_count: usize, picker_width: f32) -> usize {
        if picker_width <= 0.0 {
            return 0;
        }
        let per_sample = picker_width / sample_count as f32;
        (self.config.edge_offset_px / per_sample).max(0.0) as usize
    }
}

fn snapshot(generation: &Generation, now: Instant) -> LabelGeneration {
    LabelGeneration {
        step: generation.step,
        step_min: generation.step_min,
        step_max: generation.step_max,
        alpha: alpha_to_u8(generation.alpha.value_at(now)),
    }
}

fn highest_one_bit(value: i32) -> i32 {
    if value <= 0 {
        0
    } else {
        1 << (31 - value.leading_zeros())
    }
}
