//! Application configuration. Artifacts are fixed for the process lifetime.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "BORDER_WATCH_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pre-fitted classifier, scaler and visibility encoder
    pub artifacts: ArtifactsConfig,
    /// Batch severity bucket edges
    pub severity: SeverityConfig,
    /// Live session behaviour
    pub session: SessionConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactsConfig {
    /// Classifier: `.onnx` export or `.json` logistic coefficients
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub encoder_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityConfig {
    /// Probability above this is at least Medium
    pub medium_threshold: f64,
    /// Probability above this is High
    pub high_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Reject single readings outside the dashboard form ranges
    pub enforce_form_bounds: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig::default(),
            severity: SeverityConfig::default(),
            session: SessionConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("artifacts/intrusion_model.json"),
            scaler_path: PathBuf::from("artifacts/scaler.json"),
            encoder_path: PathBuf::from("artifacts/visibility_encoder.json"),
        }
    }
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            medium_threshold: 0.5,
            high_threshold: 0.75,
        }
    }
}

impl SeverityConfig {
    /// Both edges in [0, 1] and `medium_threshold <= high_threshold`.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [
            ("medium_threshold", self.medium_threshold),
            ("high_threshold", self.high_threshold),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!("severity.{} = {} is outside [0, 1]", name, v)));
            }
        }
        if self.medium_threshold > self.high_threshold {
            return Err(Error::Config(format!(
                "severity.medium_threshold ({}) is above severity.high_threshold ({})",
                self.medium_threshold, self.high_threshold
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enforce_form_bounds: true,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<AppConfig>(&data) {
                Ok(c) => c,
                Err(e) => {
                    // Logger is not installed yet at this point.
                    eprintln!("ignoring unparsable config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("ignoring unreadable config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Resolve the config path: explicit flag, then environment, then `config.json`.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"severity": {"high_threshold": 0.9}}"#).unwrap();

        let c = AppConfig::load(&path);
        assert_eq!(c.severity.high_threshold, 0.9);
        assert_eq!(c.severity.medium_threshold, 0.5);
        assert!(c.session.enforce_form_bounds);
        assert_eq!(c.log.level, "info");
    }

    #[test]
    fn garbage_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let c = AppConfig::load(&path);
        assert_eq!(c.severity.high_threshold, 0.75);
    }

    #[test]
    fn default_model_is_shipped_json() {
        let a = ArtifactsConfig::default();
        assert_eq!(a.model_path, PathBuf::from("artifacts/intrusion_model.json"));
    }

    #[test]
    fn severity_edges_validated() {
        assert!(SeverityConfig::default().validate().is_ok());
        let equal = SeverityConfig {
            medium_threshold: 0.6,
            high_threshold: 0.6,
        };
        assert!(equal.validate().is_ok());

        let inverted = SeverityConfig {
            medium_threshold: 0.8,
            high_threshold: 0.6,
        };
        assert!(matches!(inverted.validate(), Err(Error::Config(_))));

        for (m, h) in [(-0.1, 0.75), (0.5, 1.5), (f64::NAN, 0.75)] {
            let c = SeverityConfig {
                medium_threshold: m,
                high_threshold: h,
            };
            assert!(matches!(c.validate(), Err(Error::Config(_))), "{} {}", m, h);
        }
    }

    #[test]
    fn explicit_path_wins() {
        let p = AppConfig::resolve_path(Some(Path::new("custom.json")));
        assert_eq!(p, PathBuf::from("custom.json"));
    }
}
