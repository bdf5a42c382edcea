use chart_viewport::core::{ChartViewport, PickerWindow, RangeIndex, Series, Timeline};
use chart_viewport::interaction::PointerEvent;
use chart_viewport::render::NullRenderer;
use chart_viewport::{ChartConfig, ChartController};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::{Duration, Instant};

const DAY_MS: i64 = 86_400_000;

fn noisy_values(n: i64) -> Vec<i64> {
    (0..n).map(|i| (i * 7_919) % 10_007 + i / 3).collect()
}

fn bench_range_index_build_100k(c: &mut Criterion) {
    let values = noisy_values(100_000);

    c.bench_function("range_index_build_100k", |b| {
        b.iter(|| RangeIndex::build(black_box(&values)))
    });
}

fn bench_range_index_query_100k(c: &mut Criterion) {
    let values = noisy_values(100_000);
    let index = RangeIndex::build(&values);

    c.bench_function("range_index_query_100k", |b| {
        let mut start = 0usize;
        b.iter(|| {
            start = (start + 4_099) % 90_000;
            let _ = index.range_min_max(black_box(start), black_box(start + 9_999));
        })
    });
}

fn bench_visible_range_resolution_100k(c: &mut Criterion) {
    let points = (0..100_000).map(|i| (i * DAY_MS, i)).collect();
    let series = Series::new("bench", points).expect("valid series");
    let timeline = Timeline::from_series(&series);
    let window = PickerWindow::new(0.41, 0.47).expect("valid window");
    let viewport = ChartViewport::new(window, 1_920.0, 16.0).expect("valid viewport");

    c.bench_function("visible_range_resolution_100k", |b| {
        b.iter(|| {
            let _ = viewport.visible_index_range(black_box(&timeline));
            let _ = viewport.nearest_index_at_pixel(black_box(&timeline), black_box(777.0));
        })
    });
}

fn bench_picker_drag_10k(c: &mut Criterion) {
    let config = ChartConfig::new(1_600.0, 900.0);
    let mut chart = ChartController::new(NullRenderer::default(), config).expect("controller");
    let points: Vec<(i64, i64)> = (0..10_000).map(|i| (i * DAY_MS, (i * 31) % 977)).collect();
    let other: Vec<(i64, i64)> = points.iter().map(|(x, y)| (*x, y * 2)).collect();
    chart
        .set_series(vec![
            Series::new("a", points).expect("valid series"),
            Series::new("b", other).expect("valid series"),
        ])
        .expect("load");

    let picker = chart.layout().picker_area();
    let y = picker.y + picker.height / 2.0;
    let handle_x = picker.x + picker.width * chart.window().start();

    c.bench_function("picker_drag_10k", |b| {
        b.iter(|| {
            let mut now = Instant::now();
            chart.handle_pointer(PointerEvent::down(1, handle_x, y, now));
            for step in 0..32 {
                now += Duration::from_millis(16);
                let x = handle_x - step as f32 * 12.0;
                chart.handle_pointer(PointerEvent::moved(1, x, y, now));
            }
            chart.handle_pointer(PointerEvent::up(1, handle_x, y, now));
            chart.jump_to(0.9, 1.0, true).expect("reset window");
        })
    });
}

criterion_group!(
    benches,
    bench_range_index_build_100k,
    bench_range_index_query_100k,
    bench_visible_range_resolution_100k,
    bench_picker_drag_10k
);
criterion_main!(benches);
