//! Pronouncing dictionary in CMUdict format
//!
//! Lines look like `HELLO  HH AH0 L OW1`; alternate pronunciations are
//! written `HELLO(1)  ...`, `;;;` starts a comment line and a trailing
//! `# ...` is ignored. Stress digits are dropped since the diphone
//! inventory is stress-independent.

use super::Phoneme;
use crate::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

use Phoneme::*;

/// Letter names used when spelling and the dictionary has no entry
const LETTER_NAMES: [&[Phoneme]; 26] = [
    &[Ey],
    &[B, Iy],
    &[S, Iy],
    &[D, Iy],
    &[Iy],
    &[Eh, F],
    &[Jh, Iy],
    &[Ey, Ch],
    &[Ay],
    &[Jh, Ey],
    &[K, Ey],
    &[Eh, L],
    &[Eh, M],
    &[Eh, N],
    &[Ow],
    &[P, Iy],
    &[K, Y, Uw],
    &[Aa, R],
    &[Eh, S],
    &[T, Iy],
    &[Y, Uw],
    &[V, Iy],
    &[D, Ah, B, Ah, L, Y, Uw],
    &[Eh, K, S],
    &[W, Ay],
    &[Z, Iy],
];

/// Word to pronunciation lookup
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<Vec<Phoneme>>>,
}

impl Lexicon {
    /// Empty lexicon; spelling still works through the letter-name table
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }

        // CMUdict 0.7b ships as Latin-1; non-UTF-8 lines only hold foreign words
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes);
        let lexicon = Self::parse(&content)?;

        log::info!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Parse dictionary text
    pub fn parse(content: &str) -> Result<Self> {
        let mut lexicon = Self::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(head) = fields.next() else { continue };
            let word = match head.find('(') {
                Some(idx) if head.ends_with(')') && idx > 0 => &head[..idx],
                _ => head,
            };

            let phones = fields
                .map(str::parse)
                .collect::<Result<Vec<Phoneme>>>()
                .map_err(|e| Error::Text(format!("lexicon line {}: {}", line_no + 1, e)))?;

            if phones.is_empty() {
                log::warn!("Skipping lexicon line {} without phonemes", line_no + 1);
                continue;
            }

            lexicon.insert(word, phones);
        }

        Ok(lexicon)
    }

    /// Add a pronunciation (appended after any existing ones)
    pub fn insert(&mut self, word: &str, phones: Vec<Phoneme>) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(phones);
    }

    /// Every pronunciation of `word`, in dictionary order
    pub fn pronunciations(&self, word: &str) -> Option<&[Vec<Phoneme>]> {
        self.entries.get(&word.to_lowercase()).map(|v| v.as_slice())
    }

    /// Primary pronunciation of `word`
    pub fn lookup(&self, word: &str) -> Option<&[Phoneme]> {
        self.pronunciations(word)
            .and_then(|prons| prons.first())
            .map(|p| p.as_slice())
    }

    /// Pronunciation of a letter name when spelling
    ///
    /// Uses the dictionary entry for the letter (for "a" the second one, the
    /// letter name rather than the article), else the built-in table.
    pub fn letter(&self, ch: char) -> Option<Vec<Phoneme>> {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let lower = ch.to_ascii_lowercase();

        let from_dict = self.pronunciations(&lower.to_string()).and_then(|prons| {
            if lower == 'a' {
                prons.get(1).or_else(|| prons.first())
            } else {
                prons.first()
            }
        });

        match from_dict {
            Some(phones) => Some(phones.clone()),
            None => Some(LETTER_NAMES[(lower as u8 - b'a') as usize].to_vec()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
