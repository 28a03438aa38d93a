//! Configuration management for the diphone synthesizer

use crate::inventory::PauseConfig;
use crate::pipeline::{FallbackPolicy, PunctuationMode};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Longest accepted cross-fade overlap
const MAX_OVERLAP_MS: u32 = 100;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diphone unit store
    pub inventory: InventoryConfig,
    /// Pause durations for punctuation
    pub pauses: PauseConfig,
    /// Unit selection and joining
    pub synthesis: SynthesisConfig,
    /// CMUdict-format pronouncing dictionary
    pub lexicon: Option<PathBuf>,
}

/// Diphone store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Directory of `left-right.wav` units
    pub dir: PathBuf,
    /// Required sample rate; taken from the first unit when unset
    pub sample_rate: Option<u32>,
}

/// Synthesis behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Cross-fade overlap in milliseconds
    pub overlap_ms: u32,
    /// Missing diphone policy
    pub fallback: FallbackPolicy,
    /// Punctuation handling
    pub punctuation: PunctuationMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory: InventoryConfig::default(),
            pauses: PauseConfig::default(),
            synthesis: SynthesisConfig::default(),
            lexicon: None,
        }
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("diphones"),
            sample_rate: Some(crate::SAMPLE_RATE),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            overlap_ms: crate::DEFAULT_OVERLAP_MS,
            fallback: FallbackPolicy::default(),
            punctuation: PunctuationMode::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file (or JSON, by `.json` extension)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config: Config = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.inventory.dir.exists() {
            log::warn!(
                "Diphone directory does not exist: {}",
                self.inventory.dir.display()
            );
        }

        if self.inventory.sample_rate == Some(0) {
            return Err(Error::Config("Sample rate must be > 0".into()));
        }
        if self.synthesis.overlap_ms > MAX_OVERLAP_MS {
            return Err(Error::Config(format!(
                "overlap_ms must be <= {}",
                MAX_OVERLAP_MS
            )));
        }

        if let Some(lexicon) = &self.lexicon {
            if !lexicon.exists() {
                return Err(Error::FileNotFound(lexicon.display().to_string()));
            }
        }

        Ok(())
    }
}
