//! Single-reading benchmark: codec → logistic scoring → session record.

use border_watch::artifacts::Artifacts;
use border_watch::config::SeverityConfig;
use border_watch::features::{StandardScaler, VisibilityEncoder};
use border_watch::model::LogisticClassifier;
use border_watch::sensors::SensorReading;
use border_watch::session::SessionAggregator;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn artifacts() -> Artifacts {
    Artifacts::from_parts(
        VisibilityEncoder::default(),
        StandardScaler::new(vec![50.0, 27.5, 80.0, 0.5, 75.0, 52.5, 7.5, 1.5], vec![29.0, 4.3, 5.8, 0.5, 31.0, 27.0, 4.3, 1.1])
            .unwrap(),
        Box::new(LogisticClassifier::new(vec![0.0, 0.0, 0.0, 2.0, 1.5, 1.0, 0.2, 0.3], -1.0)),
        SeverityConfig::default(),
    )
    .unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let a = artifacts();
    let r = SensorReading::default();
    c.bench_function("codec_transform", |b| {
        b.iter(|| a.codec().transform(black_box(&r)).unwrap())
    });
}

fn bench_predict(c: &mut Criterion) {
    let a = artifacts();
    let r = SensorReading::default();
    c.bench_function("predict_single", |b| b.iter(|| a.predict(black_box(&r)).unwrap()));
}

fn bench_predict_and_record(c: &mut Criterion) {
    let a = artifacts();
    let r = SensorReading::default();
    let mut session = SessionAggregator::new();
    c.bench_function("predict_and_record", |b| {
        b.iter(|| {
            let result = a.predict(black_box(&r)).unwrap();
            session.record(&r, &result);
        })
    });
}

criterion_group!(benches, bench_encode, bench_predict, bench_predict_and_record);
criterion_main!(benches);
