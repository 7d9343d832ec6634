//! Border Watch — intrusion scoring over border sensor readings.
//!
//! Modular structure:
//! - [`sensors`] — Raw readings and single-reading form bounds
//! - [`features`] — Visibility encoding and feature scaling
//! - [`model`] — Pre-trained binary classifier (ONNX or logistic JSON)
//! - [`scoring`] — Label, probability and severity bucket
//! - [`session`] — Live counters and prediction log for one session
//! - [`batch`] — CSV batch summary
//! - [`artifacts`] — Load-once model artifacts
//! - [`logging`] — Structured logging

pub mod artifacts;
pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod model;
pub mod scoring;
pub mod sensors;
pub mod session;

pub use artifacts::Artifacts;
pub use batch::{BatchSummary, CsvTable};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use features::{FeatureCodec, FeatureVector};
pub use logging::StructuredLogger;
pub use model::{Classifier, Label};
pub use scoring::{PredictionResult, ScoringEngine, SeverityBucket};
pub use sensors::SensorReading;
pub use session::{SessionAggregator, SessionState};
