//! Integration test: config load, artifacts from disk, codec → scoring → session, CSV batch.

use border_watch::{
    artifacts::Artifacts,
    batch::{self, CsvTable},
    config::{AppConfig, ArtifactsConfig, SeverityConfig},
    error::Error,
    features::{FeatureCodec, StandardScaler, VisibilityEncoder},
    model::{Label, LogisticClassifier},
    scoring::SeverityBucket,
    sensors::SensorReading,
    session::SessionAggregator,
};
use std::path::Path;
use tempfile::TempDir;

/// Artifacts on disk: sklearn-style JSON scaler/encoder and a logistic model that
/// leans on motion, sound and thermal readings.
fn write_artifacts(dir: &TempDir) -> ArtifactsConfig {
    let model = dir.path().join("intrusion_model.json");
    let scaler = dir.path().join("scaler.json");
    let encoder = dir.path().join("visibility_encoder.json");
    std::fs::write(
        &model,
        r#"{"coef": [0.0, 0.0, 0.0, 2.0, 1.5, 1.0, 0.2, 0.3], "intercept": -1.0}"#,
    )
    .unwrap();
    std::fs::write(
        &scaler,
        r#"{
            "columns": ["sensor_id","latitude","longitude","motion_detected",
                        "sound_level_db","thermal_level","vibration_level","visibility_encoded"],
            "mean":  [50.0, 27.5, 80.0, 0.5, 75.0, 52.5, 7.5, 1.5],
            "scale": [29.0,  4.3,  5.8, 0.5, 31.0, 27.0, 4.3, 1.1]
        }"#,
    )
    .unwrap();
    std::fs::write(&encoder, r#"{"classes": ["clear", "fog", "night", "rain"]}"#).unwrap();
    ArtifactsConfig {
        model_path: model,
        scaler_path: scaler,
        encoder_path: encoder,
    }
}

fn night_reading() -> SensorReading {
    SensorReading {
        sensor_id: 10,
        latitude: 28.0,
        longitude: 78.0,
        motion_detected: 1,
        sound_level_db: 90.0,
        thermal_level: 60.0,
        vibration_level: 5.0,
        visibility: "night".into(),
    }
}

#[test]
fn config_load_default() {
    let c = AppConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.severity.medium_threshold, 0.5);
    assert_eq!(c.severity.high_threshold, 0.75);
    assert!(c.session.enforce_form_bounds);
}

#[test]
fn end_to_end_single_reading() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = Artifacts::load(&write_artifacts(&dir), SeverityConfig::default()).unwrap();
    let reading = night_reading();

    let encoded = artifacts.codec().encode(&reading).unwrap();
    let night = artifacts.codec().encoder().transform("night").unwrap() as f64;
    assert_eq!(
        encoded.values,
        vec![10.0, 28.0, 78.0, 1.0, 90.0, 60.0, 5.0, night]
    );

    let result = artifacts.predict(&reading).unwrap();
    assert!((0.0..=1.0).contains(&result.probability));
    assert!((result.normal_probability() + result.intrusion_probability() - 1.0).abs() < 1e-12);

    let mut session = SessionAggregator::new();
    session.record(&reading, &result);
    let s = session.snapshot();
    assert_eq!(s.total_events, 1);
    assert_eq!(s.intrusions + s.normal, 1);
    assert!(s.intrusions == 1 || s.normal == 1);
    assert_eq!(s.log[0].reading, reading);
}

#[test]
fn every_visibility_encodes() {
    let codec = FeatureCodec::new(VisibilityEncoder::default(), StandardScaler::identity());
    for v in ["clear", "fog", "rain", "night"] {
        let r = SensorReading {
            visibility: v.into(),
            ..night_reading()
        };
        let fv = codec.encode(&r).unwrap();
        assert_eq!(
            fv.values[7],
            codec.encoder().transform(v).unwrap() as f64
        );
    }
}

#[test]
fn session_reset_after_many_records() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = Artifacts::load(&write_artifacts(&dir), SeverityConfig::default()).unwrap();
    let mut session = SessionAggregator::new();

    let quiet = SensorReading::default();
    for i in 0..20 {
        let r = if i % 3 == 0 { night_reading() } else { quiet.clone() };
        let result = artifacts.predict(&r).unwrap();
        session.record(&r, &result);
        let s = session.state();
        assert_eq!(s.total_events, (i + 1) as u64);
        assert_eq!(s.total_events, s.intrusions + s.normal);
    }
    session.reset();
    let s = session.snapshot();
    assert_eq!((s.total_events, s.intrusions, s.normal), (0, 0, 0));
    assert!(s.log.is_empty());
}

#[test]
fn batch_csv_round() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = Artifacts::load(&write_artifacts(&dir), SeverityConfig::default()).unwrap();
    let csv = "\
sensor_id,latitude,longitude,motion_detected,sound_level_db,thermal_level,vibration_level,visibility
10,28.0,78.0,1,90,60,5,night
11,30.2,81.5,0,30,10,0.5,clear
12,22.1,72.3,1,120,95,14,fog
";
    let table = CsvTable::read(csv.as_bytes()).unwrap();
    let summary = batch::summarize_table(&artifacts, &table).unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.intrusions + summary.normal, 3);
    assert_eq!(summary.rows[1].result.label, Label::Normal);
    assert_eq!(summary.rows[1].severity, SeverityBucket::Low);
    assert_eq!(summary.rows[2].result.label, Label::Intrusion);
    assert_eq!(summary.rows[2].severity, SeverityBucket::High);

    for row in &summary.rows {
        let expected = artifacts.engine().severity(&row.result);
        assert_eq!(row.severity, expected);
    }

    let out = batch::augment(&table, &summary);
    let mut buf = Vec::new();
    out.write(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text
        .lines()
        .next()
        .unwrap()
        .ends_with("intrusion_detected,intrusion_probability,alert_severity"));
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn batch_missing_visibility_yields_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let artifacts = Artifacts::load(&write_artifacts(&dir), SeverityConfig::default()).unwrap();
    let csv = "\
sensor_id,latitude,longitude,motion_detected,sound_level_db,thermal_level,vibration_level
10,28.0,78.0,1,90,60,5
";
    let table = CsvTable::read(csv.as_bytes()).unwrap();
    match batch::summarize_table(&artifacts, &table) {
        Err(Error::MissingColumn(c)) => assert_eq!(c, "visibility"),
        Ok(s) => panic!("expected failure, summarised {} rows", s.total),
        Err(e) => panic!("unexpected error {}", e),
    }
}

#[test]
fn severity_boundaries() {
    let c = SeverityConfig::default();
    let cases = [
        (0.50, SeverityBucket::Low),
        (0.50000001, SeverityBucket::Medium),
        (0.75, SeverityBucket::Medium),
        (0.7500001, SeverityBucket::High),
        (1.0, SeverityBucket::High),
    ];
    for (p, expected) in cases {
        assert_eq!(SeverityBucket::from_probability(p, &c), expected, "p = {}", p);
    }
}

#[test]
fn logistic_model_shape_mismatch() {
    let result = Artifacts::from_parts(
        VisibilityEncoder::default(),
        StandardScaler::identity(),
        Box::new(LogisticClassifier::new(vec![0.1; 9], 0.0)),
        SeverityConfig::default(),
    );
    assert!(matches!(result, Err(Error::ShapeMismatch { expected: 8, got: 9 })));
}

#[test]
fn shipped_artifacts_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = AppConfig::load(&root.join("config.example.json"));
    assert!(config.artifacts.model_path.ends_with("intrusion_model.json"));

    let paths = ArtifactsConfig {
        model_path: root.join(&config.artifacts.model_path),
        scaler_path: root.join(&config.artifacts.scaler_path),
        encoder_path: root.join(&config.artifacts.encoder_path),
    };
    let artifacts = Artifacts::load(&paths, config.severity).unwrap();
    assert!(artifacts.predict(&night_reading()).unwrap().is_intrusion());
    assert_eq!(artifacts.engine().classifier_kind(), "logistic");
}

#[test]
fn default_artifact_paths_load() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let defaults = AppConfig::default();
    let paths = ArtifactsConfig {
        model_path: root.join(&defaults.artifacts.model_path),
        scaler_path: root.join(&defaults.artifacts.scaler_path),
        encoder_path: root.join(&defaults.artifacts.encoder_path),
    };
    let artifacts = Artifacts::load(&paths, defaults.severity).unwrap();
    assert_eq!(artifacts.engine().classifier_kind(), "logistic");
    assert!(artifacts.predict(&SensorReading::default()).is_ok());
}

#[test]
fn inverted_severity_config_refused_at_load() {
    let dir = tempfile::tempdir().unwrap();
    let severity = SeverityConfig {
        medium_threshold: 0.8,
        high_threshold: 0.4,
    };
    assert!(matches!(
        Artifacts::load(&write_artifacts(&dir), severity),
        Err(Error::Config(_))
    ));
}
