use std::time::{Duration, Instant};

use chart_viewport::core::{Clock, ManualClock, Series};
use chart_viewport::interaction::{GestureState, PointerEvent};
use chart_viewport::render::NullRenderer;
use chart_viewport::{ChartConfig, ChartController};
use proptest::prelude::*;

const PICKER_Y: f32 = 360.0;
const DAY_MS: i64 = 86_400_000;

fn controller(samples: i64) -> (ChartController<NullRenderer>, ManualClock) {
    let clock = ManualClock::new(Instant::now());
    let mut chart = ChartController::with_clock(
        NullRenderer::default(),
        ChartConfig::default(),
        Box::new(clock.clone()),
    )
    .expect("controller");
    let points = (0..samples).map(|i| (i * DAY_MS, i)).collect();
    chart
        .set_series(vec![Series::new("visits", points).expect("series")])
        .expect("load");
    (chart, clock)
}

#[test]
fn right_handle_dragged_past_left_edge_clamps_to_min_distance() {
    let (mut chart, clock) = controller(100);
    assert_eq!(chart.min_distance(), 0.1);
    let now = clock.now();

    chart.handle_pointer(PointerEvent::down(1, 416.0, PICKER_Y, now));
    assert_eq!(chart.gesture_state(), GestureState::DraggingRightHandle);
    chart.handle_pointer(PointerEvent::moved(1, 16.0, PICKER_Y, now));

    let window = chart.window();
    assert_eq!(window.start(), 0.0);
    assert!((window.end() - 0.1).abs() < 1e-5);

    let response = chart.handle_pointer(PointerEvent::up(1, 16.0, PICKER_Y, now));
    assert!(response.consumed);
    assert_eq!(chart.gesture_state(), GestureState::Idle);
}

#[test]
fn short_series_cannot_be_zoomed_by_dragging() {
    let (mut chart, clock) = controller(4);
    let now = clock.now();
    assert_eq!(chart.min_distance(), 1.0);

    chart.handle_pointer(PointerEvent::down(1, 16.0, PICKER_Y, now));
    chart.handle_pointer(PointerEvent::moved(1, 300.0, PICKER_Y, now));
    assert_eq!((chart.window().start(), chart.window().end()), (0.0, 1.0));
}

#[test]
fn long_series_starts_anchored_at_the_end() {
    let (chart, _clock) = controller(1_000);
    let window = chart.window();
    assert_eq!(window.end(), 1.0);
    assert!((window.span() - chart.min_distance()).abs() < 1e-5);
}

#[test]
fn pointer_events_are_ignored_without_data() {
    let clock = ManualClock::new(Instant::now());
    let mut chart = ChartController::with_clock(
        NullRenderer::default(),
        ChartConfig::default(),
        Box::new(clock.clone()),
    )
    .expect("controller");
    let response = chart.handle_pointer(PointerEvent::down(1, 300.0, PICKER_Y, clock.now()));
    assert!(!response.consumed);
    assert_eq!((chart.window().start(), chart.window().end()), (0.7, 1.0));
}

#[derive(Debug, Clone)]
enum Step {
    Down { id: u32, x: f32 },
    Move { id: u32, x: f32 },
    Up { id: u32 },
    Cancel { id: u32 },
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u32..2, -20.0f32..452.0).prop_map(|(id, x)| Step::Down { id, x }),
        (0u32..2, -200.0f32..650.0).prop_map(|(id, x)| Step::Move { id, x }),
        (0u32..2, -200.0f32..650.0).prop_map(|(id, x)| Step::Move { id, x }),
        (0u32..2).prop_map(|id| Step::Up { id }),
        (0u32..2).prop_map(|id| Step::Cancel { id }),
    ]
}

proptest! {
    #[test]
    fn picker_window_respects_min_distance_under_any_drag(
        samples in 5i64..600,
        steps in prop::collection::vec(step(), 1..40)
    ) {
        let (mut chart, clock) = controller(samples);
        let min_distance = chart.min_distance();

        for step in steps {
            let now = clock.advance(Duration::from_millis(16));
            let event = match step {
                Step::Down { id, x } => PointerEvent::down(id, x, PICKER_Y, now),
                Step::Move { id, x } => PointerEvent::moved(id, x, PICKER_Y, now),
                Step::Up { id } => PointerEvent::up(id, 0.0, PICKER_Y, now),
                Step::Cancel { id } => PointerEvent::cancel(id, 0.0, PICKER_Y, now),
            };
            chart.handle_pointer(event);

            let window = chart.window();
            prop_assert!(window.start() >= 0.0);
            prop_assert!(window.end() <= 1.0);
            prop_assert!(window.start() < window.end());
            prop_assert!(window.span() >= min_distance - 1e-5, "{window:?} < {min_distance}");
        }
    }
}
