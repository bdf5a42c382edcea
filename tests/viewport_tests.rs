use approx::assert_abs_diff_eq;
use chart_viewport::core::{ChartViewport, PickerWindow, Series, Timeline};
use proptest::prelude::*;

const DAY_MS: i64 = 86_400_000;

fn daily_timeline(n: usize) -> Timeline {
    let points = (0..n as i64).map(|i| (i * DAY_MS, i)).collect();
    Timeline::from_series(&Series::new("s", points).expect("valid series"))
}

#[test]
fn full_width_and_offset_follow_the_window() {
    let window = PickerWindow::new(0.2, 0.7).expect("window");
    let viewport = ChartViewport::new(window, 432.0, 16.0).expect("viewport");
    assert_abs_diff_eq!(viewport.full_width(), 800.0, epsilon = 1e-3);
    assert_abs_diff_eq!(viewport.pixel_offset(), 144.0, epsilon = 1e-3);
    assert_abs_diff_eq!(viewport.normalized_to_pixel(0.2), 16.0, epsilon = 1e-3);
    assert_abs_diff_eq!(viewport.normalized_to_pixel(0.7), 416.0, epsilon = 1e-3);
}

#[test]
fn visible_range_uses_first_and_last_sample_inside_window() {
    let timeline = daily_timeline(100);
    let window = PickerWindow::new(0.5, 0.6).expect("window");
    let viewport = ChartViewport::new(window, 432.0, 16.0).expect("viewport");
    assert_eq!(viewport.visible_index_range(&timeline), Some((50, 59)));
}

#[test]
fn nearest_index_is_clamped_to_visible_range() {
    let timeline = daily_timeline(100);
    let window = PickerWindow::new(0.5, 0.6).expect("window");
    let viewport = ChartViewport::new(window, 432.0, 16.0).expect("viewport");
    assert_eq!(viewport.nearest_index_at_pixel(&timeline, -500.0), Some(50));
    assert_eq!(viewport.nearest_index_at_pixel(&timeline, 5_000.0), Some(59));
}

proptest! {
    #[test]
    fn index_to_pixel_round_trips_inside_window(
        n in 2usize..500,
        start in 0.0f32..0.8,
        span in 0.1f32..1.0,
        width in 200.0f32..2_000.0,
        pick in 0usize..500
    ) {
        let end = (start + span).min(1.0);
        prop_assume!(end - start > 0.05);
        let timeline = daily_timeline(n);
        let window = PickerWindow::new(start, end).expect("window");
        let viewport = ChartViewport::new(window, width, 16.0).expect("viewport");
        let (first, last) = viewport.visible_index_range(&timeline).expect("visible");
        let index = first + pick % (last - first + 1);
        let normalized = timeline.percentage(index).expect("sample");
        prop_assume!(window.contains(normalized));

        let pixel = viewport.data_index_to_pixel(&timeline, index).expect("pixel");
        let back = viewport.pixel_to_normalized(pixel);
        prop_assert!((back - normalized).abs() <= 1e-3, "{back} vs {normalized}");
    }
}
