use std::time::Instant;

use serde::{Deserialize, Serialize};

pub type PointerId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw pointer sample as delivered by the host platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_id: PointerId,
    pub x: f32,
    pub y: f32,
    pub timestamp: Instant,
}

impl PointerEvent {
    #[must_use]
    pub fn new(phase: PointerPhase, pointer_id: PointerId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            phase,
            pointer_id,
            x,
            y,
            timestamp,
        }
    }

    #[must_use]
    pub fn down(pointer_id: PointerId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Down, pointer_id, x, y, timestamp)
    }

    #[must_use]
    pub fn moved(pointer_id: PointerId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Move, pointer_id, x, y, timestamp)
    }

    #[must_use]
    pub fn up(pointer_id: PointerId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Up, pointer_id, x, y, timestamp)
    }

    #[must_use]
    pub fn cancel(pointer_id: PointerId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self::new(PointerPhase::Cancel, pointer_id, x, y, timestamp)
    }

    /// Coordinates are finite and usable for hit testing.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
