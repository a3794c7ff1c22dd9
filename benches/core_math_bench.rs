use criterion::{Criterion, criterion_group, criterion_main};
use sensor_chart::api::{ChartConfig, DisplaySignals, ScaleSession, project_display_signals};
use sensor_chart::core::{LinearScale, Viewport};
use sensor_chart::ingest::parse_csv_text;
use sensor_chart::interaction::ZoomTransform;
use std::fmt::Write as _;
use std::hint::black_box;

fn sample_log(rows: usize) -> String {
    let mut text = String::with_capacity(rows * 24);
    for i in 0..rows {
        let tick = i as f64 * 0.01;
        let written = match i % 4 {
            0 => writeln!(text, "accel,{tick},{},{}", i % 97, i % 13),
            1 => writeln!(text, "gyro,{tick},{}", (i % 360) as f64 * 0.5),
            2 => writeln!(text, "baro,{tick},{}", 1_000 + i % 20),
            _ => writeln!(text, "S,{tick},\"heartbeat, seq {i}\""),
        };
        written.expect("writing to a String cannot fail");
    }
    text
}

fn bench_parse_csv_10k(c: &mut Criterion) {
    let text = sample_log(10_000);
    c.bench_function("parse_csv_10k", |b| {
        b.iter(|| {
            let data = parse_csv_text(black_box(&text));
            black_box(data.reading_count());
        })
    });
}

fn bench_rescale_x(c: &mut Criterion) {
    let base = LinearScale::new((0.0, 10_000.0), (0.0, 1_830.0)).expect("valid scale");
    let transform = ZoomTransform::new(3.5, -1_200.0, 0.0);
    c.bench_function("rescale_x", |b| {
        b.iter(|| {
            let scale = black_box(transform)
                .rescale_x(black_box(base))
                .expect("rescale");
            black_box(scale.map(4_321.0));
        })
    });
}

fn bench_session_setup_and_wheel(c: &mut Criterion) {
    let data = parse_csv_text(&sample_log(10_000));
    let display = DisplaySignals::all(&data);
    let signals = project_display_signals(&data, &display);
    let config = ChartConfig::default();
    let viewport = Viewport::new(1920, 1080);

    c.bench_function("session_setup_and_wheel_10k", |b| {
        b.iter(|| {
            let mut session = ScaleSession::setup(viewport, &config, &data, black_box(&signals))
                .expect("setup");
            session.wheel(-120.0, [900.0, 500.0]).expect("wheel");
            for signal in &signals {
                black_box(session.line_path(signal));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_parse_csv_10k,
    bench_rescale_x,
    bench_session_setup_and_wheel
);
criterion_main!(benches);
