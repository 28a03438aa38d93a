//! Fixed-duration silences for punctuation

use super::AudioUnit;
use crate::audio::ms_to_samples;
use crate::text::PauseCategory;
use serde::{Deserialize, Serialize};

/// Pause durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PauseConfig {
    /// Pause after a comma
    pub comma_ms: u32,
    /// Pause after sentence-final punctuation (. : ? !)
    pub long_ms: u32,
}

impl Default for PauseConfig {
    fn default() -> Self {
        Self {
            comma_ms: crate::COMMA_PAUSE_MS,
            long_ms: crate::LONG_PAUSE_MS,
        }
    }
}

/// Silence units for each pause category
#[derive(Debug, Clone)]
pub struct PauseTable {
    comma: AudioUnit,
    long: AudioUnit,
    none: AudioUnit,
}

impl PauseTable {
    pub fn new(sample_rate: u32, config: &PauseConfig) -> Self {
        Self {
            comma: AudioUnit::silence(ms_to_samples(config.comma_ms, sample_rate), sample_rate),
            long: AudioUnit::silence(ms_to_samples(config.long_ms, sample_rate), sample_rate),
            none: AudioUnit::silence(0, sample_rate),
        }
    }

    /// Silence unit for `category`
    pub fn pause_for(&self, category: PauseCategory) -> AudioUnit {
        match category {
            PauseCategory::None => self.none.clone(),
            PauseCategory::Comma => self.comma.clone(),
            PauseCategory::Period | PauseCategory::Question | PauseCategory::Exclamation => {
                self.long.clone()
            }
        }
    }

    /// Length in samples of the pause for `category`
    pub fn samples_for(&self, category: PauseCategory) -> usize {
        self.pause_for(category).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_durations() {
        let table = PauseTable::new(16000, &PauseConfig::default());
        assert_eq!(table.samples_for(PauseCategory::None), 0);
        assert_eq!(table.samples_for(PauseCategory::Comma), 3200);
        assert_eq!(table.samples_for(PauseCategory::Period), 6400);
        assert_eq!(table.samples_for(PauseCategory::Question), 6400);
        assert_eq!(table.samples_for(PauseCategory::Exclamation), 6400);
    }

    #[test]
    fn test_pause_is_silent() {
        let table = PauseTable::new(8000, &PauseConfig { comma_ms: 50, long_ms: 100 });
        let pause = table.pause_for(PauseCategory::Comma);
        assert_eq!(pause.len(), 400);
        assert_eq!(pause.sample_rate(), 8000);
        assert!(pause.samples().iter().all(|&s| s == 0));
    }
}
