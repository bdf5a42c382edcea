use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Easing curves used by chart transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^3`.
    #[default]
    EaseOutCubic,
    /// Material "fast out, slow in": cubic-bezier(0.4, 0.0, 0.2, 1.0).
    FastOutSlowIn,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::FastOutSlowIn => cubic_bezier(t, 0.4, 0.0, 0.2, 1.0),
        }
    }
}

/// Solves `y(x)` of a CSS-style cubic bezier with Newton steps and a bisection
/// fallback.
fn cubic_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (x1, y1, x2, y2, target) = (
        f64::from(x1),
        f64::from(y1),
        f64::from(x2),
        f64::from(y2),
        f64::from(t),
    );
    let sample = |s: f64, p1: f64, p2: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };
    let slope = |s: f64, p1: f64, p2: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
    };

    let mut s = target;
    for _ in 0..8 {
        let error = sample(s, x1, x2) - target;
        if error.abs() < 1e-7 {
            return sample(s, y1, y2) as f32;
        }
        let d = slope(s, x1, x2);
        if d.abs() < 1e-6 {
            break;
        }
        s -= error / d;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    s = target;
    for _ in 0..32 {
        let x = sample(s, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    sample(s, y1, y2) as f32
}

/// Time-driven interpolation between two values.
///
/// A tween holds no timer: callers re-evaluate it against the current
/// `Instant` on every frame tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Tween {
    #[must_use]
    pub fn new(from: f32, to: f32, started_at: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            started_at,
            duration,
            easing,
        }
    }

    /// A tween that already rests at `value`.
    #[must_use]
    pub fn settled(value: f32, now: Instant) -> Self {
        Self::new(value, value, now, Duration::ZERO, Easing::Linear)
    }

    #[must_use]
    pub fn origin(&self) -> f32 {
        self.from
    }

    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    #[must_use]
    pub fn value_at(&self, now: Instant) -> f32 {
        let progress = self.progress_at(now);
        if progress >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }

    #[must_use]
    pub fn is_finished_at(&self, now: Instant) -> bool {
        self.progress_at(now) >= 1.0
    }

    /// Starts a new tween from the current value toward `to`.
    #[must_use]
    pub fn retarget(&self, to: f32, now: Instant, duration: Duration, easing: Easing) -> Self {
        Self::new(self.value_at(now), to, now, duration, easing)
    }
}
