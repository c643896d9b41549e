use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use ilscore::telemetry::TelemetrySample;
use ilscore::{ApproachConfig, FlightData, Scorer};

fn sample(dme: f64, altitude: f64, ground_roll: f64) -> TelemetrySample {
    TelemetrySample {
        mission_time: 0.0,
        sys_time: None,
        airspeed: 92.0,
        engine: 2200.0,
        bank: 3.0,
        ground_roll,
        vertical_speed: -550.0,
        altitude,
        heading: 340.0,
        latitude: 47.4,
        longitude: -122.3,
        dme,
        hdef: Some(0.4),
        vdef: 0.3,
    }
}

/// A plausible complete flight with `n` samples per phase: DME shrinking
/// through the stepdown, a descent to minimums, then roundout and rollout.
fn synthetic_flight(n: usize) -> FlightData {
    let lerp = |from: f64, to: f64, i: usize| from + (to - from) * i as f64 / n as f64;
    FlightData {
        stepdown: (0..n)
            .map(|i| sample(lerp(22.0, 6.4, i), lerp(7000.0, 2300.0, i), 0.0))
            .collect(),
        final_approach: (0..n)
            .map(|i| sample(lerp(6.2, 0.9, i), lerp(2100.0, 600.0, i), 0.0))
            .collect(),
        roundout: (0..n)
            .map(|i| sample(lerp(0.8, 0.4, i), lerp(560.0, 410.0, i), 0.0))
            .collect(),
        landing: (0..n)
            .map(|i| sample(lerp(0.3, 0.1, i), 400.0, lerp(50.0, 2800.0, i)))
            .collect(),
        ..Default::default()
    }
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = Scorer::new(ApproachConfig::default()).unwrap();
    let data = synthetic_flight(2_000);

    c.bench_function("score_8k_sample_flight", |b| {
        b.iter(|| {
            let calc = scorer.score("bench", black_box(data.clone()));
            black_box(calc.overall.earned)
        })
    });
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
