//! Synthesis pipeline
//!
//! Resolves a phoneme sequence into diphone and pause units, joins them and
//! applies the output gain.

mod concat;
mod resolver;
mod synthesis;

pub use concat::{concatenate, output_len, Crossfade};
pub use resolver::{ResolvedUnit, UnitResolver, UnitSource};
pub use synthesis::{SynthesisOptions, Synthesizer};

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline stage enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Resolution,
    Concatenation,
    Scaling,
}

impl PipelineStage {
    /// Get stage name
    pub fn name(&self) -> &'static str {
        match self {
            PipelineStage::Resolution => "Unit Resolution",
            PipelineStage::Concatenation => "Concatenation",
            PipelineStage::Scaling => "Amplitude Scaling",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do when a diphone is missing from the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Report the missing unit
    #[default]
    Strict,
    /// Use `(left, any)` when the inventory has it
    Wildcard,
}

impl FromStr for FallbackPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(FallbackPolicy::Strict),
            "wildcard" => Ok(FallbackPolicy::Wildcard),
            _ => Err(Error::Config(format!("unknown fallback policy: {}", s))),
        }
    }
}

/// How punctuation markers interact with diphone selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunctuationMode {
    /// Insert the pause between units; diphones ignore the marker, so the
    /// pause falls inside the phoneme before it (`l-ow`, pause, `ow-dh`)
    #[default]
    Insert,
    /// The marker also acts as a silence phoneme, so speech transitions
    /// into and out of `pau` around the pause
    Boundary,
}

impl FromStr for PunctuationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "insert" => Ok(PunctuationMode::Insert),
            "boundary" => Ok(PunctuationMode::Boundary),
            _ => Err(Error::Config(format!("unknown punctuation mode: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(PipelineStage::Resolution.to_string(), "Unit Resolution");
        assert_eq!(PipelineStage::Concatenation.to_string(), "Concatenation");
        assert_eq!(PipelineStage::Scaling.name(), "Amplitude Scaling");
    }

    #[test]
    fn test_parse_policies() {
        assert_eq!("Wildcard".parse::<FallbackPolicy>().unwrap(), FallbackPolicy::Wildcard);
        assert_eq!("boundary".parse::<PunctuationMode>().unwrap(), PunctuationMode::Boundary);
        assert!("lenient".parse::<FallbackPolicy>().is_err());
    }
}
