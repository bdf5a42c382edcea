use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::{Easing, Tween};

/// Public view of the selection legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub index: Option<usize>,
    pub visible: bool,
    pub legend_alpha: f32,
}

/// Selected sample plus the fade of its legend.
///
/// Hiding keeps the index until the fade-out finishes so the legend can
/// still be drawn while it disappears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState {
    index: Option<usize>,
    visible: bool,
    alpha: Tween,
    fade: Duration,
}

impl SelectionState {
    #[must_use]
    pub fn new(fade: Duration, now: Instant) -> Self {
        Self {
            index: None,
            visible: false,
            alpha: Tween::settled(0.0, now),
            fade,
        }
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// A legend is shown (or fading in) for a selected sample.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.visible && self.index.is_some()
    }

    #[must_use]
    pub fn legend_alpha(&self, now: Instant) -> f32 {
        self.alpha.value_at(now)
    }

    /// Returns `true` when the selected index changed.
    pub fn select(&mut self, index: usize, now: Instant) -> bool {
        let changed = self.index != Some(index) || !self.visible;
        self.index = Some(index);
        if !self.visible {
            self.visible = true;
            self.alpha = self
                .alpha
                .retarget(1.0, now, self.fade, Easing::FastOutSlowIn);
        }
        changed
    }

    /// Starts fading the legend out. Returns `false` if nothing was shown.
    pub fn hide(&mut self, now: Instant) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        self.alpha = self
            .alpha
            .retarget(0.0, now, self.fade, Easing::FastOutSlowIn);
        true
    }

    /// Drops the selection immediately, without a fade.
    pub fn clear(&mut self, now: Instant) {
        self.index = None;
        self.visible = false;
        self.alpha = Tween::settled(0.0, now);
    }

    /// Returns `true` while the legend fade is still running.
    pub fn advance(&mut self, now: Instant) -> bool {
        if !self.alpha.is_finished_at(now) {
            return true;
        }
        if !self.visible {
            self.index = None;
        }
        false
    }

    #[must_use]
    pub fn snapshot(&self, now: Instant) -> SelectionSnapshot {
        SelectionSnapshot {
            index: self.index,
            visible: self.visible,
            legend_alpha: self.legend_alpha(now),
        }
    }
}
