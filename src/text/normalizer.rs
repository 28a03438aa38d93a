//! Text normalization for TTS

use crate::Result;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;

lazy_static! {
    static ref NUMBER_REGEX: Regex = Regex::new(r"\d+").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref ABBREVIATION_REGEX: Regex =
        Regex::new(r"(?i)\b(dr|mr|mrs|ms|st|jr|sr|prof)\.").unwrap();
    static ref TOKEN_REGEX: Regex = Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)*|[.,:?!]").unwrap();
}

const ONES: [&str; 20] = [
    "", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
    "eighteen", "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const DIGITS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// A word or a punctuation mark from the input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextToken {
    Word(String),
    Punctuation(char),
}

#[derive(Debug)]
pub struct TextNormalizer {
    abbreviations: HashMap<&'static str, &'static str>,
}

impl TextNormalizer {
    pub fn new() -> Self {
        let abbreviations = [
            ("dr", "doctor"),
            ("mr", "mister"),
            ("mrs", "missus"),
            ("ms", "miss"),
            ("st", "saint"),
            ("jr", "junior"),
            ("sr", "senior"),
            ("prof", "professor"),
        ]
        .into_iter()
        .collect();

        Self { abbreviations }
    }

    /// Expand abbreviations and numbers, collapse whitespace
    pub fn normalize(&self, text: &str) -> Result<String> {
        let mut result = self.expand_abbreviations(text);
        result = self.expand_numbers(&result);
        result = self.normalize_whitespace(&result);
        Ok(result)
    }

    pub fn expand_abbreviations(&self, text: &str) -> String {
        ABBREVIATION_REGEX
            .replace_all(text, |caps: &Captures| {
                let key = caps[1].to_ascii_lowercase();
                self.abbreviations
                    .get(key.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Spell out digit runs as English words
    pub fn expand_numbers(&self, text: &str) -> String {
        NUMBER_REGEX
            .replace_all(text, |caps: &Captures| match caps[0].parse::<i64>() {
                Ok(n) => format!(" {} ", number_to_words(n)),
                Err(_) => format!(" {} ", digits_to_words(&caps[0])),
            })
            .into_owned()
    }

    pub fn normalize_whitespace(&self, text: &str) -> String {
        WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
    }

    /// Split words and the punctuation marks that carry pauses
    pub fn tokenize(&self, text: &str, keep_punctuation: bool) -> Vec<TextToken> {
        TOKEN_REGEX
            .find_iter(text)
            .filter_map(|m| {
                let s = m.as_str();
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_alphabetic() => {
                        keep_punctuation.then_some(TextToken::Punctuation(c))
                    }
                    _ => Some(TextToken::Word(s.to_string())),
                }
            })
            .collect()
    }

    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current = String::new();

        for ch in text.chars() {
            current.push(ch);
            if ch == '.' || ch == '!' || ch == '?' {
                let trimmed = current.trim().to_string();
                if !trimmed.is_empty() {
                    sentences.push(trimmed);
                }
                current.clear();
            }
        }

        let trimmed = current.trim().to_string();
        if !trimmed.is_empty() {
            sentences.push(trimmed);
        }

        sentences
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert an integer to English words
///
/// Years from 1510 to 1999 are read as two pairs ("nineteen eighty four")
/// unless they end in 00-09; numbers of five or more digits are read digit
/// by digit.
pub fn number_to_words(n: i64) -> String {
    if n < 0 {
        return format!("negative {}", unsigned_to_words(n.unsigned_abs()));
    }
    unsigned_to_words(n as u64)
}

fn unsigned_to_words(n: u64) -> String {
    match n {
        0 => "zero".to_string(),
        1510..=1999 if n % 100 >= 10 => join(&[below_100(n / 100).as_str(), below_100(n % 100).as_str()]),
        1..=99 => below_100(n),
        100..=999 => join(&[ONES[(n / 100) as usize], "hundred", below_100(n % 100).as_str()]),
        1000..=9999 => {
            let rest = if n % 1000 == 0 {
                String::new()
            } else {
                unsigned_to_words(n % 1000)
            };
            join(&[ONES[(n / 1000) as usize], "thousand", rest.as_str()])
        }
        _ => digits_to_words(&n.to_string()),
    }
}

fn below_100(n: u64) -> String {
    if n < 20 {
        ONES[n as usize].to_string()
    } else {
        join(&[TENS[(n / 10) as usize], ONES[(n % 10) as usize]])
    }
}

fn digits_to_words(digits: &str) -> String {
    let words: Vec<&str> = digits
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGITS[d as usize])
        .collect();
    words.join(" ")
}

fn join(parts: &[&str]) -> String {
    let words: Vec<&str> = parts.iter().copied().filter(|s| !s.is_empty()).collect();
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizer() {
        let n = TextNormalizer::new();
        let r = n.normalize_whitespace("  a  b  ");
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn test_number_to_words() {
        assert_eq!(number_to_words(0), "zero");
        assert_eq!(number_to_words(7), "seven");
        assert_eq!(number_to_words(15), "fifteen");
        assert_eq!(number_to_words(40), "forty");
        assert_eq!(number_to_words(42), "forty two");
        assert_eq!(number_to_words(305), "three hundred five");
        assert_eq!(number_to_words(2000), "two thousand");
        assert_eq!(number_to_words(2024), "two thousand twenty four");
        assert_eq!(number_to_words(1984), "nineteen eighty four");
        assert_eq!(number_to_words(1905), "one thousand nine hundred five");
        assert_eq!(number_to_words(-3), "negative three");
        assert_eq!(number_to_words(10203), "one zero two zero three");
    }

    #[test]
    fn test_normalize_expands() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.normalize("Dr. Smith has 3 cats").unwrap(),
            "doctor Smith has three cats"
        );
        assert_eq!(n.normalize("in 1984,  mr. x").unwrap(), "in nineteen eighty four , mister x");
    }

    #[test]
    fn test_tokenize() {
        let n = TextNormalizer::new();
        let tokens = n.tokenize("hello, there. don't!", true);
        assert_eq!(
            tokens,
            vec![
                TextToken::Word("hello".into()),
                TextToken::Punctuation(','),
                TextToken::Word("there".into()),
                TextToken::Punctuation('.'),
                TextToken::Word("don't".into()),
                TextToken::Punctuation('!'),
            ]
        );

        let words = n.tokenize("hello, there; you", false);
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|t| matches!(t, TextToken::Word(_))));
    }

    #[test]
    fn test_split_sentences() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.split_sentences("Hello.\nHow are you? Fine"),
            vec!["Hello.", "How are you?", "Fine"]
        );
    }
}
