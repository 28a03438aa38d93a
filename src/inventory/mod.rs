//! Diphone unit inventory
//!
//! Maps every [`DiphoneLabel`] of a voice to its recorded samples. The
//! inventory is built once (from a directory of `left-right.wav` files or
//! in memory) and is read-only afterwards; share it behind an `Arc`.

mod pause;

pub use pause::{PauseConfig, PauseTable};

use crate::audio::load_audio;
use crate::text::DiphoneLabel;
use crate::{Error, Result, Sample};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable mono PCM unit shared between all consumers
#[derive(Debug, Clone, PartialEq)]
pub struct AudioUnit {
    samples: Arc<[Sample]>,
    sample_rate: u32,
}

impl AudioUnit {
    pub fn new(samples: Vec<Sample>, sample_rate: u32) -> Self {
        Self {
            samples: samples.into(),
            sample_rate,
        }
    }

    /// Unit of `len` zero samples
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::new(vec![0; len], sample_rate)
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

impl AsRef<[Sample]> for AudioUnit {
    fn as_ref(&self) -> &[Sample] {
        &self.samples
    }
}

/// Lookup table from diphone label to recorded unit
#[derive(Debug, Clone)]
pub struct UnitInventory {
    units: HashMap<DiphoneLabel, AudioUnit>,
    sample_rate: u32,
}

impl UnitInventory {
    /// Create an empty inventory for units at `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        Self {
            units: HashMap::new(),
            sample_rate,
        }
    }

    /// Load every `*.wav` file in `dir`
    ///
    /// The file stem is the diphone label (`aa-b.wav`). All units must share
    /// one sample rate: `expected_rate` if given, otherwise the rate of the
    /// first file in path order.
    pub fn load<P: AsRef<Path>>(dir: P, expected_rate: Option<u32>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(Error::InventoryLoad(format!(
                "diphone directory not found: {}",
                dir.display()
            )));
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| Error::InventoryLoad(format!("{}: {}", dir.display(), e)))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .map(|ext| ext.eq_ignore_ascii_case("wav"))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(Error::InventoryLoad(format!(
                "no .wav units in {}",
                dir.display()
            )));
        }

        log::info!("Loading {} diphone units from {}", paths.len(), dir.display());

        let loaded: Vec<(DiphoneLabel, AudioUnit)> = paths
            .par_iter()
            .map(|path| load_unit(path))
            .collect::<Result<_>>()?;

        let sample_rate = expected_rate.unwrap_or(loaded[0].1.sample_rate());
        let mut inventory = Self::new(sample_rate);
        for (label, unit) in loaded {
            inventory.insert_unit(label, unit)?;
        }

        log::info!(
            "Loaded {} diphone units at {} Hz",
            inventory.len(),
            inventory.sample_rate
        );

        Ok(inventory)
    }

    /// Add a unit recorded at the inventory sample rate
    pub fn insert(&mut self, label: DiphoneLabel, samples: Vec<Sample>) -> Result<()> {
        let unit = AudioUnit::new(samples, self.sample_rate);
        self.insert_unit(label, unit)
    }

    /// Add a unit, rejecting sample rate mismatches and duplicate labels
    pub fn insert_unit(&mut self, label: DiphoneLabel, unit: AudioUnit) -> Result<()> {
        if unit.sample_rate() != self.sample_rate {
            return Err(Error::InventoryLoad(format!(
                "unit {} has sample rate {} Hz, inventory uses {} Hz",
                label,
                unit.sample_rate(),
                self.sample_rate
            )));
        }
        if self.units.contains_key(&label) {
            return Err(Error::InventoryLoad(format!("duplicate unit {}", label)));
        }
        self.units.insert(label, unit);
        Ok(())
    }

    /// Find the unit for `label`
    pub fn lookup(&self, label: &DiphoneLabel) -> Result<&AudioUnit> {
        self.units
            .get(label)
            .ok_or(Error::UnitNotFound(*label))
    }

    pub fn contains(&self, label: &DiphoneLabel) -> bool {
        self.units.contains_key(label)
    }

    /// All labels, sorted
    pub fn labels(&self) -> Vec<DiphoneLabel> {
        let mut labels: Vec<_> = self.units.keys().copied().collect();
        labels.sort();
        labels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn load_unit(path: &Path) -> Result<(DiphoneLabel, AudioUnit)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::InventoryLoad(format!("bad unit file name: {}", path.display())))?;

    let label: DiphoneLabel = stem.parse().map_err(|e| {
        Error::InventoryLoad(format!("{}: not a diphone label ({})", path.display(), e))
    })?;

    let audio = load_audio(path)
        .map_err(|e| Error::InventoryLoad(format!("{}: {}", path.display(), e)))?;

    Ok((label, AudioUnit::new(audio.samples, audio.sample_rate)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Phoneme;

    fn label(s: &str) -> DiphoneLabel {
        s.parse().unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut inv = UnitInventory::new(16000);
        inv.insert(label("pau-hh"), vec![1, 2, 3]).unwrap();

        let unit = inv.lookup(&label("pau-hh")).unwrap();
        assert_eq!(unit.samples(), &[1, 2, 3]);
        assert_eq!(unit.sample_rate(), 16000);
        assert!(inv.contains(&label("pau-hh")));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_lookup_miss() {
        let inv = UnitInventory::new(16000);
        let missing = DiphoneLabel::new(Phoneme::Hh, Phoneme::Eh);
        match inv.lookup(&missing) {
            Err(Error::UnitNotFound(l)) => assert_eq!(l, missing),
            other => panic!("expected UnitNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_mismatch_rejected() {
        let mut inv = UnitInventory::new(16000);
        let unit = AudioUnit::new(vec![0; 10], 22050);
        assert!(matches!(
            inv.insert_unit(label("aa-b"), unit),
            Err(Error::InventoryLoad(_))
        ));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut inv = UnitInventory::new(16000);
        inv.insert(label("aa-b"), vec![0; 4]).unwrap();
        assert!(inv.insert(label("aa_b"), vec![0; 4]).is_err());
    }

    #[test]
    fn test_units_share_storage() {
        let unit = AudioUnit::new(vec![5; 8], 16000);
        let copy = unit.clone();
        assert!(std::ptr::eq(unit.samples().as_ptr(), copy.samples().as_ptr()));
    }

    #[test]
    fn test_load_missing_dir() {
        let dir = std::env::temp_dir().join("diphone_tts_no_such_dir_4821");
        assert!(matches!(
            UnitInventory::load(&dir, None),
            Err(Error::InventoryLoad(_))
        ));
    }
}
