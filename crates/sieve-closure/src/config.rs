//! Closure configuration

use crate::{ClosureEngine, ClosureError, CompositionTable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the closure engine
///
/// # Examples
///
/// ```
/// use sieve_closure::ClosureConfig;
///
/// let config = ClosureConfig::default();
/// assert!(config.enabled);
/// assert!(config.rules_path.is_none());
///
/// let config = ClosureConfig::disabled();
/// assert!(!config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// Run closure after each annotator that had accepted proposals
    /// Default: true
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Rule file to load instead of the bundled rules
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Log every inference at debug level
    /// Default: false
    #[serde(default)]
    pub trace_inferences: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rules_path: None,
            trace_inferences: false,
        }
    }
}

impl ClosureConfig {
    /// Closure switched off; annotators are arbitrated by prior claims only
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Default settings with inference tracing on
    pub fn traced() -> Self {
        Self {
            trace_inferences: true,
            ..Self::default()
        }
    }

    /// Parse from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ClosureError> {
        toml::from_str(text).map_err(|e| ClosureError::Config(e.to_string()))
    }

    /// Load the configured rule set
    pub fn load_table(&self) -> Result<CompositionTable, ClosureError> {
        match &self.rules_path {
            Some(path) => CompositionTable::from_path(path),
            None => CompositionTable::standard(),
        }
    }

    /// Build an engine over the configured rule set
    pub fn build_engine(&self) -> Result<ClosureEngine, ClosureError> {
        Ok(ClosureEngine::new(self.load_table()?).with_tracing(self.trace_inferences))
    }
}
