//! Configuration for pipeline runs
//!
//! Names the annotators to run, in priority order, and how closure and
//! batch parallelism behave.

use crate::PipelineError;
use sieve_annotators::{AllVagueAnnotator, EventDctAnnotator, TimeTimeAnnotator};
use sieve_closure::ClosureConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Configuration for an arbitration pipeline
///
/// # Examples
///
/// ```
/// use sieve_pipeline::PipelineConfig;
///
/// // Default: time-time ordering first, then the tense baseline
/// let config = PipelineConfig::default();
/// assert_eq!(config.annotators, vec!["time_time", "event_dct"]);
///
/// // Exhaustive: VAGUE for everything left over
/// let config = PipelineConfig::exhaustive();
/// assert_eq!(config.annotators.last().map(String::as_str), Some("all_vague"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Annotator names, highest priority first
    /// Default: time_time, event_dct
    #[serde(default = "default_annotators")]
    pub annotators: Vec<String>,

    /// Documents processed at once by the batch runner
    /// Default: 4
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,

    /// Closure settings
    #[serde(default)]
    pub closure: ClosureConfig,
}

fn default_annotators() -> Vec<String> {
    vec![
        TimeTimeAnnotator::NAME.to_string(),
        EventDctAnnotator::NAME.to_string(),
    ]
}

fn default_parallelism() -> usize {
    4
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            annotators: default_annotators(),
            closure: ClosureConfig::default(),
            parallelism: default_parallelism(),
        }
    }
}

impl PipelineConfig {
    /// Default annotators followed by the all-VAGUE fallback
    pub fn exhaustive() -> Self {
        let mut config = Self::default();
        config.annotators.push(AllVagueAnnotator::NAME.to_string());
        config
    }

    /// Default annotators with closure switched off
    pub fn without_closure() -> Self {
        Self {
            closure: ClosureConfig::disabled(),
            ..Self::default()
        }
    }

    /// Single-document, single-thread runs
    pub fn sequential() -> Self {
        Self {
            parallelism: 1,
            ..Self::default()
        }
    }

    /// Parse from TOML text
    pub fn from_toml(text: &str) -> Result<Self, PipelineError> {
        let config: Self = toml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate().map_err(PipelineError::Config)?;
        Ok(config)
    }

    /// Read from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String, PipelineError> {
        toml::to_string_pretty(self).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.annotators.is_empty() {
            return Err("At least one annotator must be configured".to_string());
        }
        let mut seen = HashSet::new();
        for name in &self.annotators {
            if !seen.insert(name.as_str()) {
                return Err(format!("Annotator '{}' is listed twice", name));
            }
        }
        if self.parallelism == 0 {
            return Err("parallelism must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.annotators.len(), 2);
        assert!(config.closure.enabled);
        assert_eq!(config.parallelism, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(PipelineConfig::exhaustive().annotators.len(), 3);
        assert!(!PipelineConfig::without_closure().closure.enabled);
        assert_eq!(PipelineConfig::sequential().parallelism, 1);
    }

    #[test]
    fn test_validate() {
        let mut config = PipelineConfig::default();
        config.annotators.push("time_time".to_string());
        assert!(config.validate().unwrap_err().contains("listed twice"));

        config.annotators.clear();
        assert!(config.validate().is_err());

        let config = PipelineConfig {
            parallelism: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
annotators = ["event_dct", "all_vague"]
parallelism = 2

[closure]
enabled = false
"#;
        let config = PipelineConfig::from_toml(text).unwrap();
        assert_eq!(config.annotators, vec!["event_dct", "all_vague"]);
        assert_eq!(config.parallelism, 2);
        assert!(!config.closure.enabled);

        let config = PipelineConfig::from_toml("").unwrap();
        assert_eq!(config, PipelineConfig::default());

        assert!(PipelineConfig::from_toml("annotators = []").is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = PipelineConfig::exhaustive();
        let text = config.to_toml().unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_serde_json_roundtrip() {
        let config = PipelineConfig::without_closure();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sieve.toml");
        std::fs::write(&path, "parallelism = 8\n").unwrap();
        assert_eq!(PipelineConfig::from_file(&path).unwrap().parallelism, 8);
        assert!(PipelineConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
