//! Error types for the diphone synthesizer

use crate::pipeline::PipelineStage;
use crate::text::DiphoneLabel;
use thiserror::Error;

/// Main error type for the diphone synthesizer
#[derive(Error, Debug)]
pub enum Error {
    #[error("Inventory load error: {0}")]
    InventoryLoad(String),

    #[error("Diphone unit not found: {0}")]
    UnitNotFound(DiphoneLabel),

    #[error("Unknown punctuation marker: {0:?}")]
    UnknownPunctuation(String),

    #[error("Volume must be an integer between 0 and 100, got {0}")]
    InvalidVolume(i32),

    #[error("Unknown phoneme symbol: {0:?}")]
    UnknownPhoneme(String),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: PipelineStage,
        source: Box<Error>,
    },

    #[error("Word not found in lexicon: {0}")]
    WordNotFound(String),

    #[error("Text processing error: {0}")]
    Text(String),

    #[error("Audio processing error: {0}")]
    Audio(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap this error with the pipeline stage it came from
    pub fn in_stage(self, stage: PipelineStage) -> Self {
        Error::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// The underlying error with any stage annotations removed
    pub fn root(&self) -> &Error {
        match self {
            Error::Stage { source, .. } => source.root(),
            other => other,
        }
    }

    /// Stage that produced this error, if annotated
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            Error::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Result type for synthesizer operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<hound::Error> for Error {
    fn from(err: hound::Error) -> Self {
        Error::Audio(err.to_string())
    }
}
