use std::time::{Duration, Instant};

use chart_viewport::core::{PickerWindow, Rect};
use chart_viewport::interaction::{
    GestureArbiter, GestureConfig, GestureContext, GestureIntent, GestureState, PointerEvent,
};
use proptest::prelude::*;

const PICKER_Y: f32 = 360.0;

fn context(window: PickerWindow, selection_active: bool) -> GestureContext {
    GestureContext {
        plot_area: Rect::new(0.0, 0.0, 432.0, 300.0),
        picker_area: Rect::new(16.0, 338.0, 400.0, 46.0),
        window,
        min_distance: 0.1,
        selection_active,
    }
}

fn arbiter() -> GestureArbiter {
    GestureArbiter::new(GestureConfig::default())
}

#[test]
fn both_handles_can_be_held_by_two_pointers() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::new(0.25, 0.75).expect("window"), false);
    let now = Instant::now();

    // edges sit at 116 and 316
    assert!(arbiter.handle(PointerEvent::down(1, 116.0, PICKER_Y, now), &ctx).consumed);
    assert_eq!(arbiter.state(), GestureState::DraggingLeftHandle);
    assert!(arbiter.handle(PointerEvent::down(2, 314.0, PICKER_Y, now), &ctx).consumed);
    assert_eq!(arbiter.captured_pointer_count(), 2);

    let third = arbiter.handle(PointerEvent::down(3, 200.0, PICKER_Y, now), &ctx);
    assert!(!third.consumed);
    assert_eq!(arbiter.captured_pointer_count(), 2);

    let released = arbiter.handle(PointerEvent::up(1, 116.0, PICKER_Y, now), &ctx);
    assert!(released.intents.is_empty());
    assert_eq!(arbiter.state(), GestureState::DraggingRightHandle);

    let released = arbiter.handle(PointerEvent::up(2, 314.0, PICKER_Y, now), &ctx);
    assert_eq!(released.intents.as_slice(), &[GestureIntent::SettleWindow]);
    assert_eq!(arbiter.state(), GestureState::Idle);
}

#[test]
fn second_pointer_cannot_grab_an_already_held_handle() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::new(0.25, 0.75).expect("window"), false);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 116.0, PICKER_Y, now), &ctx);
    let response = arbiter.handle(PointerEvent::down(2, 118.0, PICKER_Y, now), &ctx);
    assert!(!response.consumed);
    assert_eq!(arbiter.captured_pointer_count(), 1);
}

#[test]
fn body_drag_translates_and_keeps_span() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::new(0.25, 0.75).expect("window"), false);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 216.0, PICKER_Y, now), &ctx);
    assert_eq!(arbiter.state(), GestureState::DraggingPickerBody);

    let response = arbiter.handle(PointerEvent::moved(1, 256.0, PICKER_Y, now), &ctx);
    let [GestureIntent::MoveWindow(next)] = response.intents.as_slice() else {
        panic!("unexpected intents {:?}", response.intents);
    };
    assert!((next.start() - 0.35).abs() < 1e-5);
    assert!((next.span() - 0.5).abs() < 1e-5);

    let response = arbiter.handle(PointerEvent::moved(1, 1_000.0, PICKER_Y, now), &ctx);
    let [GestureIntent::MoveWindow(next)] = response.intents.as_slice() else {
        panic!("unexpected intents {:?}", response.intents);
    };
    assert_eq!(next.end(), 1.0);
    assert!((next.start() - 0.5).abs() < 1e-5);
}

#[test]
fn tap_without_selection_selects_under_pointer() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), false);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 120.0, 100.0, now), &ctx);
    assert_eq!(arbiter.state(), GestureState::PendingSelection);
    let response = arbiter.handle(PointerEvent::up(1, 120.0, 100.0, now), &ctx);
    assert_eq!(response.intents.as_slice(), &[GestureIntent::Select { x: 120.0 }]);
    assert_eq!(arbiter.state(), GestureState::Idle);
}

#[test]
fn tap_with_active_selection_clears_it() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), true);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 120.0, 100.0, now), &ctx);
    assert_eq!(arbiter.state(), GestureState::ActivelySelecting);
    let response = arbiter.handle(
        PointerEvent::up(1, 121.0, 101.0, now + Duration::from_millis(80)),
        &ctx,
    );
    assert!(response.consumed);
    assert_eq!(response.intents.as_slice(), &[GestureIntent::ClearSelection]);
}

#[test]
fn holding_still_with_active_selection_reselects() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), true);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 120.0, 100.0, now), &ctx);
    let early = arbiter.handle(
        PointerEvent::moved(1, 122.0, 101.0, now + Duration::from_millis(100)),
        &ctx,
    );
    assert!(early.intents.is_empty());

    let held = arbiter.handle(
        PointerEvent::moved(1, 123.0, 101.0, now + Duration::from_millis(250)),
        &ctx,
    );
    assert_eq!(held.intents.as_slice(), &[GestureIntent::Select { x: 123.0 }]);

    let response = arbiter.handle(
        PointerEvent::up(1, 123.0, 101.0, now + Duration::from_millis(300)),
        &ctx,
    );
    assert!(response.intents.is_empty());
}

#[test]
fn scrubbing_with_active_selection_keeps_selecting() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), true);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 120.0, 100.0, now), &ctx);
    let response = arbiter.handle(PointerEvent::moved(1, 180.0, 100.0, now), &ctx);
    assert_eq!(response.intents.as_slice(), &[GestureIntent::Select { x: 180.0 }]);
    let response = arbiter.handle(PointerEvent::up(1, 180.0, 100.0, now), &ctx);
    assert!(response.intents.is_empty());
}

#[test]
fn cancel_drops_pending_selection_without_tap() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), false);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(4, 50.0, 50.0, now), &ctx);
    let response = arbiter.handle(PointerEvent::cancel(4, 50.0, 50.0, now), &ctx);
    assert!(response.consumed);
    assert!(response.intents.is_empty());
    assert_eq!(arbiter.state(), GestureState::Idle);
    assert_eq!(arbiter.captured_pointer_count(), 0);
}

#[test]
fn cancel_of_picker_drag_still_settles_window() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::new(0.25, 0.75).expect("window"), false);
    let now = Instant::now();

    arbiter.handle(PointerEvent::down(1, 316.0, PICKER_Y, now), &ctx);
    let response = arbiter.handle(PointerEvent::cancel(1, 316.0, PICKER_Y, now), &ctx);
    assert_eq!(response.intents.as_slice(), &[GestureIntent::SettleWindow]);
}

#[test]
fn non_finite_coordinates_are_dropped() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), false);
    let response = arbiter.handle(PointerEvent::down(1, f32::NAN, 10.0, Instant::now()), &ctx);
    assert!(!response.consumed);
    assert_eq!(arbiter.state(), GestureState::Idle);
}

#[test]
fn down_outside_both_areas_is_not_consumed() {
    let mut arbiter = arbiter();
    let ctx = context(PickerWindow::full(), false);
    // between the plot and the picker strip
    let response = arbiter.handle(PointerEvent::down(1, 200.0, 320.0, Instant::now()), &ctx);
    assert!(!response.consumed);
    assert_eq!(arbiter.state(), GestureState::Idle);
}

proptest! {
    #[test]
    fn horizontal_move_activates_selection_on_first_move(
        x in 40.0f32..380.0,
        y in 40.0f32..260.0,
        dx in 1.0f32..60.0,
        ratio in 0.0f32..0.95,
        left in any::<bool>(),
        held_ms in 0u64..190
    ) {
        let mut arbiter = arbiter();
        let ctx = context(PickerWindow::full(), false);
        let start = Instant::now();
        arbiter.handle(PointerEvent::down(1, x, y, start), &ctx);

        let dx = if left { -dx } else { dx };
        let dy = dx.abs() * ratio;
        let response = arbiter.handle(
            PointerEvent::moved(1, x + dx, y + dy, start + Duration::from_millis(held_ms)),
            &ctx,
        );
        prop_assert!(response.consumed);
        prop_assert_eq!(arbiter.state(), GestureState::ActivelySelecting);
        prop_assert_eq!(response.intents.as_slice(), &[GestureIntent::Select { x: x + dx }]);
    }

    #[test]
    fn vertical_swipe_before_hold_never_selects(
        x in 40.0f32..380.0,
        steps in prop::collection::vec((-1.0f32..1.0, 8.5f32..120.0, any::<bool>()), 1..8)
    ) {
        let mut arbiter = arbiter();
        let ctx = context(PickerWindow::full(), false);
        let start = Instant::now();
        let y0 = 150.0;
        arbiter.handle(PointerEvent::down(1, x, y0, start), &ctx);

        for (i, (dx_ratio, dy, up)) in steps.into_iter().enumerate() {
            let dy = if up { -dy } else { dy };
            let dx = dy.abs() * dx_ratio * 0.9;
            let at = start + Duration::from_millis(20 * (i as u64 + 1));
            let response = arbiter.handle(PointerEvent::moved(1, x + dx, y0 + dy, at), &ctx);
            prop_assert!(!response.consumed);
            prop_assert!(response.intents.is_empty());
            prop_assert_eq!(arbiter.state(), GestureState::PendingSelection);
        }
    }
}
