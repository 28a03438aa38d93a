//! Phoneme sequence to unit sequence resolution

use super::{FallbackPolicy, PunctuationMode};
use crate::inventory::{AudioUnit, PauseTable, UnitInventory};
use crate::text::{DiphoneLabel, PauseCategory, Phoneme, PhonemeSequence, Token};
use crate::{Error, Result, Sample};

/// Where a resolved unit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSource {
    Diphone(DiphoneLabel),
    /// `requested` was missing and `used` stood in for it
    Fallback {
        requested: DiphoneLabel,
        used: DiphoneLabel,
    },
    Pause(PauseCategory),
}

/// One element of the unit sequence handed to the concatenator
#[derive(Debug, Clone)]
pub struct ResolvedUnit {
    pub source: UnitSource,
    pub unit: AudioUnit,
}

impl ResolvedUnit {
    pub fn len(&self) -> usize {
        self.unit.len()
    }

    pub fn is_empty(&self) -> bool {
        self.unit.is_empty()
    }
}

impl AsRef<[Sample]> for ResolvedUnit {
    fn as_ref(&self) -> &[Sample] {
        self.unit.samples()
    }
}

/// A phoneme and the pauses that follow it
#[derive(Debug)]
struct Frame {
    phone: Phoneme,
    pauses: Vec<PauseCategory>,
}

/// Turns phoneme sequences into diphone and pause units
pub struct UnitResolver<'a> {
    inventory: &'a UnitInventory,
    pauses: &'a PauseTable,
    fallback: FallbackPolicy,
    punctuation: PunctuationMode,
}

impl<'a> UnitResolver<'a> {
    pub fn new(
        inventory: &'a UnitInventory,
        pauses: &'a PauseTable,
        fallback: FallbackPolicy,
        punctuation: PunctuationMode,
    ) -> Self {
        Self {
            inventory,
            pauses,
            fallback,
            punctuation,
        }
    }

    /// Diphone labels the sequence needs, in order, without inventory lookups
    pub fn labels(&self, sequence: &PhonemeSequence) -> Vec<DiphoneLabel> {
        let frames = self.frames(sequence);
        frames
            .windows(2)
            .map(|pair| DiphoneLabel::new(pair[0].phone, pair[1].phone))
            .collect()
    }

    /// Resolve the sequence into units
    ///
    /// The sequence is wrapped in boundary silence, each adjacent phoneme
    /// pair becomes one diphone and every punctuation marker adds its pause
    /// unit after the diphone that ends on the preceding phoneme. A sequence
    /// without phonemes resolves to no units.
    pub fn resolve(&self, sequence: &PhonemeSequence) -> Result<Vec<ResolvedUnit>> {
        let frames = self.frames(sequence);
        let mut units = Vec::with_capacity(frames.len() * 2);

        if let Some(first) = frames.first() {
            self.push_pauses(&mut units, &first.pauses);
        }

        for pair in frames.windows(2) {
            let label = DiphoneLabel::new(pair[0].phone, pair[1].phone);
            units.push(self.lookup(label)?);
            self.push_pauses(&mut units, &pair[1].pauses);
        }

        log::debug!(
            "Resolved {} tokens into {} units ({} diphones)",
            sequence.len(),
            units.len(),
            frames.len().saturating_sub(1)
        );

        Ok(units)
    }

    fn lookup(&self, label: DiphoneLabel) -> Result<ResolvedUnit> {
        match self.inventory.lookup(&label) {
            Ok(unit) => Ok(ResolvedUnit {
                source: UnitSource::Diphone(label),
                unit: unit.clone(),
            }),
            Err(Error::UnitNotFound(_)) if self.fallback == FallbackPolicy::Wildcard => {
                let wildcard = label.wildcard();
                let unit = self
                    .inventory
                    .lookup(&wildcard)
                    .map_err(|_| Error::UnitNotFound(label))?;
                log::warn!("Diphone {} missing, using {}", label, wildcard);
                Ok(ResolvedUnit {
                    source: UnitSource::Fallback {
                        requested: label,
                        used: wildcard,
                    },
                    unit: unit.clone(),
                })
            }
            Err(e) => Err(e),
        }
    }

    fn push_pauses(&self, units: &mut Vec<ResolvedUnit>, pauses: &[PauseCategory]) {
        units.extend(pauses.iter().map(|&category| ResolvedUnit {
            source: UnitSource::Pause(category),
            unit: self.pauses.pause_for(category),
        }));
    }

    /// Group tokens into phoneme frames and add boundary silence
    fn frames(&self, sequence: &PhonemeSequence) -> Vec<Frame> {
        let mut leading = Vec::new();
        let mut frames: Vec<Frame> = Vec::new();

        for token in sequence.tokens() {
            match *token {
                Token::Phone(phone) => {
                    let repeats_silence = self.punctuation == PunctuationMode::Boundary
                        && phone.is_silence()
                        && frames.last().map_or(false, |f| f.phone.is_silence());
                    if !repeats_silence {
                        frames.push(Frame {
                            phone,
                            pauses: Vec::new(),
                        });
                    }
                }
                Token::Pause(category) => {
                    if self.punctuation == PunctuationMode::Boundary
                        && frames.last().map_or(false, |f| !f.phone.is_silence())
                    {
                        frames.push(Frame {
                            phone: Phoneme::SILENCE,
                            pauses: Vec::new(),
                        });
                    }
                    match frames.last_mut() {
                        Some(frame) => frame.pauses.push(category),
                        None => leading.push(category),
                    }
                }
            }
        }

        if frames.is_empty() {
            return frames;
        }

        if frames[0].phone.is_silence() {
            leading.append(&mut frames[0].pauses);
            frames[0].pauses = leading;
        } else {
            frames.insert(
                0,
                Frame {
                    phone: Phoneme::SILENCE,
                    pauses: leading,
                },
            );
        }

        if frames.last().map_or(false, |f| !f.phone.is_silence()) {
            frames.push(Frame {
                phone: Phoneme::SILENCE,
                pauses: Vec::new(),
            });
        }

        frames
    }
}
