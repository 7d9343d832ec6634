//! Fitted visibility label encoder: category string → integer code.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Code of a class is its index in `classes`. Fitting sorts classes, so the
/// shipped encoder is `clear=0, fog=1, night=2, rain=3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityEncoder {
    classes: Vec<String>,
}

impl Default for VisibilityEncoder {
    fn default() -> Self {
        Self {
            classes: ["clear", "fog", "night", "rain"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl VisibilityEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Load `{"classes": [...]}`.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| Error::artifact(path, e))?;
        let enc: VisibilityEncoder =
            serde_json::from_str(&data).map_err(|e| Error::artifact(path, e))?;
        if enc.classes.is_empty() {
            return Err(Error::artifact(path, "encoder has no classes"));
        }
        Ok(enc)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, value: &str) -> Result<u32> {
        self.classes
            .iter()
            .position(|c| c == value)
            .map(|i| i as u32)
            .ok_or_else(|| Error::UnknownCategory {
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_is_sorted() {
        let enc = VisibilityEncoder::default();
        assert_eq!(enc.transform("clear").unwrap(), 0);
        assert_eq!(enc.transform("fog").unwrap(), 1);
        assert_eq!(enc.transform("night").unwrap(), 2);
        assert_eq!(enc.transform("rain").unwrap(), 3);
    }

    #[test]
    fn case_sensitive_and_strict() {
        let enc = VisibilityEncoder::default();
        assert!(matches!(
            enc.transform("Night"),
            Err(Error::UnknownCategory { .. })
        ));
        assert!(enc.transform("").is_err());
    }

    #[test]
    fn load_rejects_empty_classes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enc.json");
        std::fs::write(&path, r#"{"classes": []}"#).unwrap();
        assert!(matches!(
            VisibilityEncoder::load(&path),
            Err(Error::Artifact { .. })
        ));
    }
}
