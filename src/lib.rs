//! Diphone TTS - Concatenative Text-to-Speech in Rust
//!
//! Speech is built by looking up pre-recorded diphone units (recordings of
//! the transition between two phonemes) and joining them into one signal.
//!
//! # Features
//! - Strongly typed phoneme alphabet and diphone labels
//! - Punctuation-driven pauses
//! - Optional half-Hann cross-fading at unit joins
//! - Wildcard fallback for missing diphones
//! - CMUdict-based front end with number expansion and spelling mode
//!
//! # Example
//! ```no_run
//! use diphone_tts::{Config, Synthesizer};
//! use diphone_tts::text::{Lexicon, Utterance};
//!
//! let config = Config::load("config.yaml").unwrap();
//! let synth = Synthesizer::from_config(&config).unwrap();
//! let lexicon = Lexicon::load("cmudict.dict").unwrap();
//!
//! let phones = Utterance::new("hello world", false)
//!     .phone_sequence(&lexicon, false)
//!     .unwrap();
//! let audio = synth.synthesize(&phones, 100, true).unwrap();
//! diphone_tts::audio::save_audio("hello.wav", &audio).unwrap();
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod inventory;
pub mod pipeline;
pub mod text;

pub use config::Config;
pub use error::{Error, Result};
pub use inventory::{AudioUnit, UnitInventory};
pub use pipeline::{Synthesizer, SynthesisOptions};

/// Sample type of every unit and output buffer (16-bit PCM)
pub type Sample = i16;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default sample rate of diphone recordings
pub const SAMPLE_RATE: u32 = 16000;

/// Default cross-fade overlap in milliseconds
pub const DEFAULT_OVERLAP_MS: u32 = 10;

/// Default pause after a comma in milliseconds
pub const COMMA_PAUSE_MS: u32 = 200;

/// Default pause after . : ? ! in milliseconds
pub const LONG_PAUSE_MS: u32 = 400;
