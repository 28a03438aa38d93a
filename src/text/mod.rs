//! Text processing module
//!
//! Turns raw text into the phoneme sequences the synthesizer consumes:
//! normalization, dictionary lookup, spelling and punctuation markers.

mod lexicon;
mod normalizer;
mod phoneme;

pub use lexicon::Lexicon;
pub use normalizer::{number_to_words, TextNormalizer, TextToken};
pub use phoneme::{DiphoneLabel, PauseCategory, Phoneme, PhonemeSequence, Token};

use crate::{Error, Result};

/// A phrase to be synthesized
#[derive(Debug, Clone)]
pub struct Utterance {
    phrase: String,
    use_punctuation: bool,
}

impl Utterance {
    /// `use_punctuation` turns , . : ? ! into pause markers; otherwise
    /// punctuation is dropped
    pub fn new(phrase: impl Into<String>, use_punctuation: bool) -> Self {
        Self {
            phrase: phrase.into(),
            use_punctuation,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Phoneme sequence for the phrase, wrapped in `pau`
    ///
    /// In spelling mode every letter is read by name. Otherwise each word is
    /// looked up in `lexicon`; unknown all-caps words are spelled as
    /// acronyms and any other unknown word is an error.
    pub fn phone_sequence(&self, lexicon: &Lexicon, spell: bool) -> Result<PhonemeSequence> {
        let normalizer = TextNormalizer::new();
        let text = normalizer.normalize(&self.phrase)?;

        let mut seq = PhonemeSequence::new();
        seq.push_phone(Phoneme::SILENCE);

        if spell {
            for ch in text.chars().filter(|c| c.is_alphabetic()) {
                let phones = lexicon
                    .letter(ch)
                    .ok_or_else(|| Error::Text(format!("cannot spell character {:?}", ch)))?;
                seq.extend_phones(phones);
            }
        } else {
            for token in normalizer.tokenize(&text, self.use_punctuation) {
                match token {
                    TextToken::Word(word) => self.push_word(&mut seq, lexicon, &word)?,
                    TextToken::Punctuation(ch) => seq.push_pause(PauseCategory::try_from(ch)?),
                }
            }
        }

        seq.push_phone(Phoneme::SILENCE);
        log::debug!("Phonemes for {:?}: {}", self.phrase, seq);
        Ok(seq)
    }

    fn push_word(&self, seq: &mut PhonemeSequence, lexicon: &Lexicon, word: &str) -> Result<()> {
        if let Some(phones) = lexicon.lookup(word) {
            seq.extend_phones(phones.iter().copied());
            return Ok(());
        }

        let is_acronym = word.chars().all(|c| c.is_ascii_uppercase());
        if !is_acronym {
            return Err(Error::WordNotFound(word.to_string()));
        }

        log::debug!("Spelling unknown acronym {}", word);
        for ch in word.chars() {
            if let Some(phones) = lexicon.letter(ch) {
                seq.extend_phones(phones);
            }
        }
        Ok(())
    }
}

/// Split text into sentences after expanding abbreviations, so "Dr." does
/// not end a sentence
pub fn sentences(text: &str) -> Vec<String> {
    let normalizer = TextNormalizer::new();
    let expanded = normalizer.expand_abbreviations(text);
    normalizer.split_sentences(&expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::parse(
            "HELLO  HH AH0 L OW1\nTHERE  DH EH1 R\nTHREE  TH R IY1\nA  AH0\nA(1)  EY1\n",
        )
        .unwrap()
    }

    fn render(seq: &PhonemeSequence) -> String {
        seq.to_string()
    }

    #[test]
    fn test_words() {
        let utt = Utterance::new("Hello there", false);
        let seq = utt.phone_sequence(&lexicon(), false).unwrap();
        assert_eq!(render(&seq), "pau hh ah l ow dh eh r pau");
    }

    #[test]
    fn test_punctuation_markers() {
        let lex = lexicon();
        let with = Utterance::new("hello, there.", true).phone_sequence(&lex, false).unwrap();
        assert_eq!(render(&with), "pau hh ah l ow , dh eh r . pau");

        let without = Utterance::new("hello, there.", false).phone_sequence(&lex, false).unwrap();
        assert_eq!(render(&without), "pau hh ah l ow dh eh r pau");
    }

    #[test]
    fn test_numbers_expanded() {
        let seq = Utterance::new("3", false).phone_sequence(&lexicon(), false).unwrap();
        assert_eq!(render(&seq), "pau th r iy pau");
    }

    #[test]
    fn test_spelling() {
        let seq = Utterance::new("a b!", true).phone_sequence(&lexicon(), true).unwrap();
        assert_eq!(render(&seq), "pau ey b iy pau");
    }

    #[test]
    fn test_acronym_and_unknown_word() {
        let lex = lexicon();
        let seq = Utterance::new("BBC", false).phone_sequence(&lex, false).unwrap();
        assert_eq!(render(&seq), "pau b iy b iy s iy pau");

        assert!(matches!(
            Utterance::new("zebra", false).phone_sequence(&lex, false),
            Err(Error::WordNotFound(w)) if w == "zebra"
        ));
    }

    #[test]
    fn test_sentences() {
        assert_eq!(
            sentences("Dr. Who is here. Hello!"),
            vec!["doctor Who is here.", "Hello!"]
        );
    }
}
