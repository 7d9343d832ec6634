//! Coarse confidence tiers for batch display.

use crate::config::SeverityConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityBucket {
    Low,
    Medium,
    High,
}

impl SeverityBucket {
    /// Low: [0, medium], Medium: (medium, high], High: (high, 1].
    pub fn from_probability(p: f64, config: &SeverityConfig) -> Self {
        if p > config.high_threshold {
            SeverityBucket::High
        } else if p > config.medium_threshold {
            SeverityBucket::Medium
        } else {
            SeverityBucket::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityBucket::Low => "Low",
            SeverityBucket::Medium => "Medium",
            SeverityBucket::High => "High",
        }
    }
}

impl std::fmt::Display for SeverityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
