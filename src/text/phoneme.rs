//! Phoneme alphabet, diphone labels and phoneme sequences
//!
//! The alphabet is closed: the 39 ARPAbet phonemes used by CMUdict, the
//! silence phoneme `pau` and the wildcard right context `any`. Everything
//! that enters the synthesizer (inventory file names, dictionary entries,
//! phoneme sequences) is validated against it.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

macro_rules! phoneme_alphabet {
    ($($variant:ident => $symbol:literal),* $(,)?) => {
        /// A phoneme symbol from the closed synthesizer alphabet
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Phoneme {
            $($variant),*
        }

        impl Phoneme {
            /// Every phoneme in the alphabet
            pub const ALL: &'static [Phoneme] = &[$(Phoneme::$variant),*];

            /// Canonical lowercase symbol
            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Phoneme::$variant => $symbol),*
                }
            }
        }
    };
}

phoneme_alphabet! {
    Aa => "aa", Ae => "ae", Ah => "ah", Ao => "ao", Aw => "aw", Ay => "ay",
    B => "b", Ch => "ch", D => "d", Dh => "dh", Eh => "eh", Er => "er",
    Ey => "ey", F => "f", G => "g", Hh => "hh", Ih => "ih", Iy => "iy",
    Jh => "jh", K => "k", L => "l", M => "m", N => "n", Ng => "ng",
    Ow => "ow", Oy => "oy", P => "p", R => "r", S => "s", Sh => "sh",
    T => "t", Th => "th", Uh => "uh", Uw => "uw", V => "v", W => "w",
    Y => "y", Z => "z", Zh => "zh",
    Pau => "pau",
    Any => "any",
}

impl Phoneme {
    /// Silence phoneme used at utterance boundaries
    pub const SILENCE: Phoneme = Phoneme::Pau;

    pub fn is_silence(&self) -> bool {
        *self == Phoneme::Pau
    }

    /// True for the `any` right-context placeholder
    pub fn is_wildcard(&self) -> bool {
        *self == Phoneme::Any
    }
}

impl FromStr for Phoneme {
    type Err = Error;

    /// Parse a symbol, ignoring case and CMUdict stress digits (`AH0` -> `ah`)
    ///
    /// The wildcard `any` is not a spoken phoneme and is rejected; only the
    /// right side of a [`DiphoneLabel`] may name it.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .to_ascii_lowercase();

        if lower == "sil" {
            return Ok(Phoneme::Pau);
        }

        Phoneme::ALL
            .iter()
            .copied()
            .filter(|p| !p.is_wildcard())
            .find(|p| p.symbol() == lower)
            .ok_or_else(|| Error::UnknownPhoneme(s.to_string()))
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Ordered phoneme pair identifying one diphone unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DiphoneLabel {
    pub left: Phoneme,
    pub right: Phoneme,
}

impl DiphoneLabel {
    pub fn new(left: Phoneme, right: Phoneme) -> Self {
        Self { left, right }
    }

    /// Same left phoneme with the wildcard right context
    pub fn wildcard(&self) -> Self {
        Self::new(self.left, Phoneme::Any)
    }
}

impl FromStr for DiphoneLabel {
    type Err = Error;

    /// Parse `left-right` (or `left_right`, as some voice archives name files)
    ///
    /// The right side may be the wildcard `any`; the left side never is.
    fn from_str(s: &str) -> Result<Self> {
        let (left, right) = s
            .split_once('-')
            .or_else(|| s.split_once('_'))
            .ok_or_else(|| Error::UnknownPhoneme(s.to_string()))?;
        let right = if right.trim().eq_ignore_ascii_case(Phoneme::Any.symbol()) {
            Phoneme::Any
        } else {
            right.parse()?
        };
        Ok(Self::new(left.parse()?, right))
    }
}

impl fmt::Display for DiphoneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.left, self.right)
    }
}

/// Pause category derived from punctuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PauseCategory {
    None,
    Comma,
    Period,
    Question,
    Exclamation,
}

impl PauseCategory {
    /// Parse a punctuation marker
    ///
    /// Accepts the punctuation characters themselves, the legacy `pauc` /
    /// `pauo` marker phones and the category names. Unknown markers are an
    /// error rather than a silent default.
    pub fn from_marker(marker: &str) -> Result<Self> {
        let lower = marker.trim().to_ascii_lowercase();
        match lower.as_str() {
            "," | "pauc" | "comma" => Ok(PauseCategory::Comma),
            "." | ":" | "pauo" | "period" => Ok(PauseCategory::Period),
            "?" | "question" => Ok(PauseCategory::Question),
            "!" | "exclamation" => Ok(PauseCategory::Exclamation),
            "none" => Ok(PauseCategory::None),
            _ => Err(Error::UnknownPunctuation(marker.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PauseCategory::None => "none",
            PauseCategory::Comma => "comma",
            PauseCategory::Period => "period",
            PauseCategory::Question => "question",
            PauseCategory::Exclamation => "exclamation",
        }
    }
}

impl TryFrom<char> for PauseCategory {
    type Error = Error;

    fn try_from(ch: char) -> Result<Self> {
        let mut buf = [0u8; 4];
        PauseCategory::from_marker(ch.encode_utf8(&mut buf))
    }
}

impl fmt::Display for PauseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element of a phoneme sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Phone(Phoneme),
    Pause(PauseCategory),
}

/// Phoneme symbols interspersed with punctuation markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonemeSequence {
    tokens: Vec<Token>,
}

impl PhonemeSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_phone(&mut self, phone: Phoneme) {
        self.tokens.push(Token::Phone(phone));
    }

    pub fn push_pause(&mut self, category: PauseCategory) {
        self.tokens.push(Token::Pause(category));
    }

    pub fn extend_phones<I: IntoIterator<Item = Phoneme>>(&mut self, phones: I) {
        self.tokens.extend(phones.into_iter().map(Token::Phone));
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Phonemes only, punctuation skipped
    pub fn phones(&self) -> impl Iterator<Item = Phoneme> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            Token::Phone(p) => Some(*p),
            Token::Pause(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for PhonemeSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl FromIterator<Phoneme> for PhonemeSequence {
    fn from_iter<I: IntoIterator<Item = Phoneme>>(iter: I) -> Self {
        let mut seq = Self::new();
        seq.extend_phones(iter);
        seq
    }
}

impl FromStr for PhonemeSequence {
    type Err = Error;

    /// Parse a whitespace separated sequence such as `pau hh eh , l ow pau`
    fn from_str(s: &str) -> Result<Self> {
        let mut seq = Self::new();
        for item in s.split_whitespace() {
            if let Ok(phone) = item.parse::<Phoneme>() {
                seq.push_phone(phone);
                continue;
            }
            match PauseCategory::from_marker(item) {
                Ok(category) => seq.push_pause(category),
                Err(_) if item.chars().any(|c| c.is_alphanumeric()) => {
                    return Err(Error::UnknownPhoneme(item.to_string()));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(seq)
    }
}

impl fmt::Display for PhonemeSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                Token::Phone(p) => write!(f, "{}", p)?,
                Token::Pause(PauseCategory::None) => f.write_str("none")?,
                Token::Pause(PauseCategory::Comma) => f.write_str(",")?,
                Token::Pause(PauseCategory::Period) => f.write_str(".")?,
                Token::Pause(PauseCategory::Question) => f.write_str("?")?,
                Token::Pause(PauseCategory::Exclamation) => f.write_str("!")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phoneme() {
        assert_eq!("HH".parse::<Phoneme>().unwrap(), Phoneme::Hh);
        assert_eq!("AH0".parse::<Phoneme>().unwrap(), Phoneme::Ah);
        assert_eq!("ow1".parse::<Phoneme>().unwrap(), Phoneme::Ow);
        assert_eq!("sil".parse::<Phoneme>().unwrap(), Phoneme::Pau);
        assert!(matches!(
            "qq".parse::<Phoneme>(),
            Err(Error::UnknownPhoneme(_))
        ));
    }

    #[test]
    fn test_alphabet_symbols_roundtrip() {
        assert_eq!(Phoneme::ALL.len(), 41);
        for p in Phoneme::ALL.iter().filter(|p| !p.is_wildcard()) {
            assert_eq!(p.symbol().parse::<Phoneme>().unwrap(), *p);
        }
    }

    #[test]
    fn test_wildcard_only_as_right_context() {
        assert!(matches!(
            "any".parse::<Phoneme>(),
            Err(Error::UnknownPhoneme(_))
        ));
        assert!(matches!(
            "hh any eh".parse::<PhonemeSequence>(),
            Err(Error::UnknownPhoneme(_))
        ));

        let label: DiphoneLabel = "hh-ANY".parse().unwrap();
        assert_eq!(label, DiphoneLabel::new(Phoneme::Hh, Phoneme::Any));
        assert!("any-eh".parse::<DiphoneLabel>().is_err());
        assert!("any-any".parse::<DiphoneLabel>().is_err());
    }

    #[test]
    fn test_diphone_label() {
        let label: DiphoneLabel = "pau-hh".parse().unwrap();
        assert_eq!(label, DiphoneLabel::new(Phoneme::Pau, Phoneme::Hh));
        assert_eq!(label.to_string(), "pau-hh");

        let underscored: DiphoneLabel = "IY_IY".parse().unwrap();
        assert_eq!(underscored.to_string(), "iy-iy");

        assert_eq!(label.wildcard().to_string(), "pau-any");
        assert!("pauhh".parse::<DiphoneLabel>().is_err());
    }

    #[test]
    fn test_pause_markers() {
        assert_eq!(PauseCategory::try_from(',').unwrap(), PauseCategory::Comma);
        assert_eq!(PauseCategory::try_from(':').unwrap(), PauseCategory::Period);
        assert_eq!(
            PauseCategory::from_marker("PAUO").unwrap(),
            PauseCategory::Period
        );
        assert!(matches!(
            PauseCategory::try_from(';'),
            Err(Error::UnknownPunctuation(_))
        ));
    }

    #[test]
    fn test_parse_sequence() {
        let seq: PhonemeSequence = "pau hh eh , l ow ? pau".parse().unwrap();
        assert_eq!(seq.len(), 8);
        assert_eq!(seq.tokens()[3], Token::Pause(PauseCategory::Comma));
        assert_eq!(seq.phones().count(), 6);
        assert_eq!(seq.to_string(), "pau hh eh , l ow ? pau");

        assert!(matches!(
            "pau hh ; pau".parse::<PhonemeSequence>(),
            Err(Error::UnknownPunctuation(_))
        ));
        assert!(matches!(
            "pau xx pau".parse::<PhonemeSequence>(),
            Err(Error::UnknownPhoneme(_))
        ));
    }
}
