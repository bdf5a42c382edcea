use std::time::{Duration, Instant};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{PickerWindow, Rect};

use super::{PointerEvent, PointerId, PointerPhase};

/// Gesture the arbiter currently attributes the pointer stream to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    DraggingLeftHandle,
    DraggingRightHandle,
    DraggingPickerBody,
    PendingSelection,
    ActivelySelecting,
}

impl GestureState {
    #[must_use]
    pub fn is_dragging_picker(self) -> bool {
        matches!(
            self,
            Self::DraggingLeftHandle | Self::DraggingRightHandle | Self::DraggingPickerBody
        )
    }
}

/// Hit-test and disambiguation tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Total width of the hit region centered on each picker edge.
    pub handle_capture_width_px: f32,
    /// Vertical travel below which a pending gesture still counts as a scrub.
    pub touch_slop_px: f32,
    /// Holding longer than this resolves a pending gesture to a scrub.
    pub selection_hold_ms: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            handle_capture_width_px: 24.0,
            touch_slop_px: 8.0,
            selection_hold_ms: 200.0,
        }
    }
}

/// Geometry and chart state the arbiter needs to interpret one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    pub plot_area: Rect,
    pub picker_area: Rect,
    pub window: PickerWindow,
    pub min_distance: f32,
    pub selection_active: bool,
}

/// Decoded effect of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    /// The picker window follows a drag.
    MoveWindow(PickerWindow),
    /// The last picker drag ended.
    SettleWindow,
    /// Resolve the sample under this x and select it.
    Select { x: f32 },
    ClearSelection,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GestureResponse {
    /// `false` asks the host to hand the stream to an enclosing scroller.
    pub consumed: bool,
    pub intents: SmallVec<[GestureIntent; 2]>,
}

impl GestureResponse {
    fn ignored() -> Self {
        Self::default()
    }

    fn consumed() -> Self {
        Self {
            consumed: true,
            intents: SmallVec::new(),
        }
    }

    fn with(mut self, intent: GestureIntent) -> Self {
        self.intents.push(intent);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureKind {
    LeftHandle,
    RightHandle,
    Body,
}

impl CaptureKind {
    fn state(self) -> GestureState {
        match self {
            Self::LeftHandle => GestureState::DraggingLeftHandle,
            Self::RightHandle => GestureState::DraggingRightHandle,
            Self::Body => GestureState::DraggingPickerBody,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct HandleCapture {
    pointer_id: PointerId,
    kind: CaptureKind,
    down_x: f32,
    origin: PickerWindow,
}

#[derive(Debug, Clone, Copy)]
struct SelectionTrack {
    pointer_id: PointerId,
    down_x: f32,
    down_y: f32,
    down_at: Instant,
    moved: bool,
    had_selection: bool,
}

/// State machine that splits one pointer stream into picker drags and
/// selection scrubs.
///
/// Holds at most two picker captures (one per handle) and one selection
/// track. Events for pointers it is not tracking are dropped.
#[derive(Debug, Clone)]
pub struct GestureArbiter {
    config: GestureConfig,
    state: GestureState,
    captures: SmallVec<[HandleCapture; 2]>,
    selection: Option<SelectionTrack>,
}

impl GestureArbiter {
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
            captures: SmallVec::new(),
            selection: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> GestureConfig {
        self.config
    }

    #[must_use]
    pub fn captured_pointer_count(&self) -> usize {
        self.captures.len() + usize::from(self.selection.is_some())
    }

    /// Drops every capture without emitting intents.
    pub fn reset(&mut self) {
        self.captures.clear();
        self.selection = None;
        self.state = GestureState::Idle;
    }

    pub fn handle(&mut self, event: PointerEvent, context: &GestureContext) -> GestureResponse {
        if !event.is_well_formed() {
            trace!(pointer_id = event.pointer_id, "dropping pointer event with non-finite coordinates");
            return GestureResponse::ignored();
        }
        match event.phase {
            PointerPhase::Down => self.on_down(event, context),
            PointerPhase::Move => self.on_move(event, context),
            PointerPhase::Up => self.on_release(event, true),
            PointerPhase::Cancel => self.on_release(event, false),
        }
    }

    fn on_down(&mut self, event: PointerEvent, context: &GestureContext) -> GestureResponse {
        if self.is_tracking(event.pointer_id) {
            trace!(pointer_id = event.pointer_id, "duplicate pointer down ignored");
            return GestureResponse::consumed();
        }
        if !self.captures.is_empty() {
            return self.on_secondary_down(event, context);
        }
        if self.selection.is_some() {
            trace!(pointer_id = event.pointer_id, "extra pointer ignored during selection");
            return GestureResponse::ignored();
        }

        if self.in_picker_strip(event, context.picker_area) {
            return self.begin_picker_drag(event, context);
        }

        if context.plot_area.contains(event.x, event.y) {
            self.selection = Some(SelectionTrack {
                pointer_id: event.pointer_id,
                down_x: event.x,
                down_y: event.y,
                down_at: event.timestamp,
                moved: false,
                had_selection: context.selection_active,
            });
            self.state = if context.selection_active {
                GestureState::ActivelySelecting
            } else {
                GestureState::PendingSelection
            };
            return GestureResponse::consumed();
        }

        GestureResponse::ignored()
    }

    fn begin_picker_drag(&mut self, event: PointerEvent, context: &GestureContext) -> GestureResponse {
        let area = context.picker_area;
        let window = context.window;
        if let Some(kind) = self.hit_handle(event.x, area, window) {
            self.push_capture(event, kind, window);
            return GestureResponse::consumed();
        }

        let start_px = area.x + area.width * window.start();
        let end_px = area.x + area.width * window.end();
        if event.x > start_px && event.x < end_px {
            self.push_capture(event, CaptureKind::Body, window);
            return GestureResponse::consumed();
        }

        // Tap outside the window: center it under the pointer, then drag it.
        let tapped = ((event.x - area.x) / area.width).clamp(0.0, 1.0);
        let recentered = PickerWindow::translated(tapped - window.span() / 2.0, window.span());
        self.push_capture(event, CaptureKind::Body, recentered);
        GestureResponse::consumed().with(GestureIntent::MoveWindow(recentered))
    }

    /// A second pointer may only grab the handle the first one left free.
    fn on_secondary_down(&mut self, event: PointerEvent, context: &GestureContext) -> GestureResponse {
        let holds_handle = self
            .captures
            .iter()
            .any(|capture| capture.kind != CaptureKind::Body);
        if !holds_handle
            || self.captures.len() >= 2
            || !self.in_picker_strip(event, context.picker_area)
        {
            trace!(pointer_id = event.pointer_id, "secondary pointer not captured");
            return GestureResponse::ignored();
        }

        let free = self.hit_handle(event.x, context.picker_area, context.window).filter(|kind| {
            self.captures.iter().all(|capture| capture.kind != *kind)
        });
        match free {
            Some(kind) => {
                self.captures.push(HandleCapture {
                    pointer_id: event.pointer_id,
                    kind,
                    down_x: event.x,
                    origin: context.window,
                });
                GestureResponse::consumed()
            }
            None => GestureResponse::ignored(),
        }
    }

    fn on_move(&mut self, event: PointerEvent, context: &GestureContext) -> GestureResponse {
        if let Some(capture) = self
            .captures
            .iter()
            .find(|capture| capture.pointer_id == event.pointer_id)
            .copied()
        {
            return self.drag_capture(capture, event, context);
        }

        let Some(mut track) = self.selection.filter(|track| track.pointer_id == event.pointer_id)
        else {
            trace!(pointer_id = event.pointer_id, "move for unknown pointer ignored");
            return GestureResponse::ignored();
        };

        let dx = event.x - track.down_x;
        let dy = event.y - track.down_y;
        let slop = self.config.touch_slop_px;
        if dx.hypot(dy) > slop {
            track.moved = true;
        }

        let held = event.timestamp.saturating_duration_since(track.down_at)
            > hold_threshold(self.config.selection_hold_ms);
        let response = match self.state {
            GestureState::PendingSelection => {
                if dx.abs() > dy.abs() || dy.abs() < slop || held {
                    self.state = GestureState::ActivelySelecting;
                    track.moved = true;
                    GestureResponse::consumed().with(GestureIntent::Select { x: event.x })
                } else {
                    GestureResponse::ignored()
                }
            }
            GestureState::ActivelySelecting if track.had_selection && !track.moved => {
                if held {
                    track.moved = true;
                    GestureResponse::consumed().with(GestureIntent::Select { x: event.x })
                } else {
                    GestureResponse::consumed()
                }
            }
            _ => GestureResponse::consumed().with(GestureIntent::Select { x: event.x }),
        };
        self.selection = Some(track);
        response
    }

    fn drag_capture(
        &mut self,
        capture: HandleCapture,
        event: PointerEvent,
        context: &GestureContext,
    ) -> GestureResponse {
        let width = context.picker_area.width;
        if width <= 0.0 {
            return GestureResponse::consumed();
        }
        let delta = (event.x - capture.down_x) / width;
        let window = context.window;
        let next = match capture.kind {
            CaptureKind::LeftHandle => {
                window.with_start_clamped(capture.origin.start() + delta, context.min_distance)
            }
            CaptureKind::RightHandle => {
                window.with_end_clamped(capture.origin.end() + delta, context.min_distance)
            }
            CaptureKind::Body => {
                PickerWindow::translated(capture.origin.start() + delta, capture.origin.span())
            }
        };

        if next == window {
            return GestureResponse::consumed();
        }
        GestureResponse::consumed().with(GestureIntent::MoveWindow(next))
    }

    fn on_release(&mut self, event: PointerEvent, completed: bool) -> GestureResponse {
        if let Some(position) = self
            .captures
            .iter()
            .position(|capture| capture.pointer_id == event.pointer_id)
        {
            self.captures.remove(position);
            return match self.captures.first() {
                Some(remaining) => {
                    self.state = remaining.kind.state();
                    GestureResponse::consumed()
                }
                None => {
                    self.state = GestureState::Idle;
                    GestureResponse::consumed().with(GestureIntent::SettleWindow)
                }
            };
        }

        let Some(track) = self.selection.filter(|track| track.pointer_id == event.pointer_id)
        else {
            trace!(pointer_id = event.pointer_id, "release for unknown pointer ignored");
            return GestureResponse::ignored();
        };

        let previous = self.state;
        self.selection = None;
        self.state = GestureState::Idle;

        let mut response = GestureResponse::consumed();
        if completed && !track.moved {
            let tap = if track.had_selection {
                GestureIntent::ClearSelection
            } else if previous == GestureState::PendingSelection {
                GestureIntent::Select { x: event.x }
            } else {
                return response;
            };
            response.intents.push(tap);
        }
        response
    }

    /// Nearest handle within half the capture width; the left one wins ties.
    fn hit_handle(&self, x: f32, area: Rect, window: PickerWindow) -> Option<CaptureKind> {
        let half = self.config.handle_capture_width_px / 2.0;
        [
            (CaptureKind::LeftHandle, area.x + area.width * window.start()),
            (CaptureKind::RightHandle, area.x + area.width * window.end()),
        ]
        .into_iter()
        .map(|(kind, edge)| (kind, (x - edge).abs()))
        .filter(|(_, distance)| *distance <= half)
        .min_by_key(|(_, distance)| OrderedFloat(*distance))
        .map(|(kind, _)| kind)
    }

    /// Picker strip widened so edge handles stay grabbable at the borders.
    fn in_picker_strip(&self, event: PointerEvent, area: Rect) -> bool {
        let half = self.config.handle_capture_width_px / 2.0;
        event.y >= area.y
            && event.y < area.bottom()
            && event.x >= area.x - half
            && event.x <= area.right() + half
    }

    fn push_capture(&mut self, event: PointerEvent, kind: CaptureKind, origin: PickerWindow) {
        self.captures.push(HandleCapture {
            pointer_id: event.pointer_id,
            kind,
            down_x: event.x,
            origin,
        });
        self.state = kind.state();
    }

    fn is_tracking(&self, pointer_id: PointerId) -> bool {
        self.captures
            .iter()
            .any(|capture| capture.pointer_id == pointer_id)
            || self
                .selection
                .is_some_and(|track| track.pointer_id == pointer_id)
    }
}

fn hold_threshold(millis: f64) -> Duration {
    Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}
