//! Core diphone synthesis implementation

use super::{concatenate, Crossfade, FallbackPolicy, PipelineStage, PunctuationMode, UnitResolver};
use crate::{
    audio::{ms_to_samples, scale, volume_gain, AudioData},
    config::Config,
    inventory::{PauseConfig, PauseTable, UnitInventory},
    text::PhonemeSequence,
    Result,
};
use std::sync::Arc;
use std::time::Instant;

/// Synthesis options
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOptions {
    /// Cross-fade overlap in samples
    pub overlap: usize,
    /// Missing diphone policy
    pub fallback: FallbackPolicy,
    /// Punctuation handling
    pub punctuation: PunctuationMode,
    /// Pause durations
    pub pauses: PauseConfig,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            overlap: ms_to_samples(crate::DEFAULT_OVERLAP_MS, crate::SAMPLE_RATE),
            fallback: FallbackPolicy::default(),
            punctuation: PunctuationMode::default(),
            pauses: PauseConfig::default(),
        }
    }
}

impl SynthesisOptions {
    /// Options from a configuration, with the overlap converted at `sample_rate`
    pub fn from_config(config: &Config, sample_rate: u32) -> Self {
        Self {
            overlap: ms_to_samples(config.synthesis.overlap_ms, sample_rate),
            fallback: config.synthesis.fallback,
            punctuation: config.synthesis.punctuation,
            pauses: config.pauses,
        }
    }
}

/// Diphone synthesizer bound to one unit inventory
pub struct Synthesizer {
    inventory: Arc<UnitInventory>,
    pauses: PauseTable,
    options: SynthesisOptions,
}

impl Synthesizer {
    /// Create a synthesizer over a loaded inventory
    pub fn new(inventory: Arc<UnitInventory>, options: SynthesisOptions) -> Self {
        let pauses = PauseTable::new(inventory.sample_rate(), &options.pauses);
        Self {
            inventory,
            pauses,
            options,
        }
    }

    /// Load the inventory named by `config` and build a synthesizer for it
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        let inventory = UnitInventory::load(&config.inventory.dir, config.inventory.sample_rate)?;
        let options = SynthesisOptions::from_config(config, inventory.sample_rate());
        Ok(Self::new(Arc::new(inventory), options))
    }

    pub fn inventory(&self) -> &UnitInventory {
        &self.inventory
    }

    pub fn options(&self) -> &SynthesisOptions {
        &self.options
    }

    pub fn sample_rate(&self) -> u32 {
        self.inventory.sample_rate()
    }

    /// Resolver using this synthesizer's inventory and policies
    pub fn resolver(&self) -> UnitResolver<'_> {
        UnitResolver::new(
            &self.inventory,
            &self.pauses,
            self.options.fallback,
            self.options.punctuation,
        )
    }

    /// Synthesize a phoneme sequence
    ///
    /// Runs resolution, concatenation and scaling in that order. The volume
    /// is checked before any work is done; errors carry the failing stage.
    pub fn synthesize(
        &self,
        sequence: &PhonemeSequence,
        volume: i32,
        crossfade: bool,
    ) -> Result<AudioData> {
        let start_time = Instant::now();

        volume_gain(volume).map_err(|e| e.in_stage(PipelineStage::Scaling))?;

        log::debug!("Resolving units for: {}", sequence);
        let units = self
            .resolver()
            .resolve(sequence)
            .map_err(|e| e.in_stage(PipelineStage::Resolution))?;

        let mode = if crossfade {
            Crossfade::On {
                overlap: self.options.overlap,
            }
        } else {
            Crossfade::Off
        };
        log::debug!("Concatenating {} units ({:?})", units.len(), mode);
        let joined = concatenate(&units, mode);

        let samples = scale(&joined, volume).map_err(|e| e.in_stage(PipelineStage::Scaling))?;
        let audio = AudioData::new(samples, self.sample_rate());

        log::debug!(
            "Synthesized {:.2}s of audio in {:.1}ms",
            audio.duration(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        Ok(audio)
    }
}
