//! Live session counters and the log of single-reading predictions.
//!
//! One aggregator per user session, owned by the handler loop and passed by
//! `&mut`. Nothing here is shared across sessions or persisted.

use crate::model::Label;
use crate::scoring::PredictionResult;
use crate::sensors::SensorReading;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One logged single prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub reading: SensorReading,
    pub prediction: Label,
    /// P(Intrusion) rounded to 3 decimals
    pub probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub total_events: u64,
    pub intrusions: u64,
    pub normal: u64,
    pub log: Vec<SessionRow>,
}

#[derive(Debug, Default)]
pub struct SessionAggregator {
    state: SessionState,
}

fn round3(p: f64) -> f64 {
    (p * 1000.0).round() / 1000.0
}

impl SessionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reading: &SensorReading, result: &PredictionResult) -> &SessionRow {
        let s = &mut self.state;
        s.total_events += 1;
        match result.label {
            Label::Intrusion => s.intrusions += 1,
            Label::Normal => s.normal += 1,
        }
        s.log.push(SessionRow {
            id: Uuid::new_v4().to_string(),
            recorded_at: Utc::now(),
            reading: reading.clone(),
            prediction: result.label,
            probability: round3(result.probability),
        });
        tracing::debug!(
            total = s.total_events,
            intrusions = s.intrusions,
            normal = s.normal,
            "session updated"
        );
        &s.log[s.log.len() - 1]
    }

    /// Replace the whole state at once; no partially cleared state is observable.
    pub fn reset(&mut self) {
        let prior = std::mem::take(&mut self.state);
        tracing::info!(discarded = prior.total_events, "session reset");
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}
