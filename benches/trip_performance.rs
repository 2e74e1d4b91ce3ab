use chrono::DateTime;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;
use tripdash::{TelemetryPoint, TripSession, compare_trips, compute_insights};

fn create_sample_trip(id: &str, point_count: usize, base_speed: f64) -> TripSession {
    let mut distance = 0.;
    let points = (0..point_count)
        .map(|i| {
            let speed = base_speed + (i % 50) as f64 * 0.2;
            distance += speed;
            TelemetryPoint {
                index: i as i64,
                timestamp: DateTime::from_timestamp(1_700_000_000 + i as i64, 0).unwrap(),
                longitude: 13.4 + i as f64 * 1e-5,
                latitude: 52.5 + i as f64 * 1e-5,
                speed,
                distance,
            }
        })
        .collect();

    TripSession {
        id: id.to_string(),
        session_start: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        points,
        ..Default::default()
    }
}

fn bench_insights(c: &mut Criterion) {
    let mut group = c.benchmark_group("insights");

    for point_count in [1_000, 100_000] {
        let trip = create_sample_trip("bench", point_count, 10.);
        group.bench_function(format!("compute_insights_{point_count}_points"), |b| {
            b.iter(|| black_box(compute_insights(black_box(&trip))));
        });
    }

    group.finish();
}

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");

    let current = create_sample_trip("current", 100_000, 12.);
    let baseline = create_sample_trip("baseline", 100_000, 10.);
    group.bench_function("compare_100000_point_trips", |b| {
        b.iter(|| black_box(compare_trips(black_box(&current), black_box(&baseline)).unwrap()));
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");

    let trip = create_sample_trip("serde", 10_000, 10.);
    let json = serde_json::to_string(&trip).unwrap();
    group.bench_function("deserialize_10000_point_trip", |b| {
        b.iter(|| black_box(serde_json::from_str::<TripSession>(&json).unwrap()));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = bench_insights, bench_comparison, bench_serialization
}
criterion_main!(benches);
