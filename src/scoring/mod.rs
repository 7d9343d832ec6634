//! Scoring engine: classifier over encoded vectors → label, probability, severity.

mod engine;
mod severity;

pub use engine::{PredictionResult, ScoringEngine};
pub use severity::SeverityBucket;
