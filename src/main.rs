//! Diphone TTS CLI
//!
//! Command-line interface for the diphone synthesizer

use clap::{ArgGroup, Parser};
use diphone_tts::{
    audio::{self, AudioData},
    pipeline::{FallbackPolicy, PunctuationMode},
    text::{self, Lexicon, Utterance},
    Config, Result, Synthesizer,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "diphone-tts",
    about = "Concatenative diphone text-to-speech synthesizer",
    version,
    author
)]
#[command(group(ArgGroup::new("input").required(true).args(["phrase", "fromfile"])))]
struct Cli {
    /// Phrase to synthesize
    #[arg(short, long)]
    phrase: Option<String>,

    /// Synthesize every sentence of a text file
    #[arg(long)]
    fromfile: Option<PathBuf>,

    /// Output volume (0-100)
    #[arg(short, long, allow_negative_numbers = true)]
    volume: Option<i32>,

    /// Spell the phrase letter by letter
    #[arg(short, long)]
    spell: bool,

    /// Insert pauses for punctuation
    #[arg(long)]
    usepunc: bool,

    /// Cross-fade adjacent diphones
    #[arg(long)]
    crossfade: bool,

    /// Output WAV file
    #[arg(short, long)]
    outfile: Option<PathBuf>,

    /// Play the result on the default audio device
    #[arg(long)]
    play: bool,

    /// Directory of diphone WAV files
    #[arg(long)]
    diphones: Option<PathBuf>,

    /// CMUdict-format pronouncing dictionary
    #[arg(long)]
    dict: Option<PathBuf>,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Missing diphone policy (strict, wildcard)
    #[arg(long)]
    fallback: Option<FallbackPolicy>,

    /// Punctuation handling with --usepunc: "insert" (default) puts the pause
    /// between diphones, splitting the phoneme before the mark; "boundary"
    /// transitions into and out of silence around it
    #[arg(long, verbatim_doc_comment)]
    punctuation: Option<PunctuationMode>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Load or create config, then apply command-line overrides
    let mut cfg = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(dir) = &cli.diphones {
        cfg.inventory.dir = dir.clone();
    }
    if let Some(dict) = &cli.dict {
        cfg.lexicon = Some(dict.clone());
    }
    if let Some(fallback) = cli.fallback {
        cfg.synthesis.fallback = fallback;
    }
    if let Some(punctuation) = cli.punctuation {
        cfg.synthesis.punctuation = punctuation;
    }

    let volume = cli.volume.unwrap_or(100);
    let synth = Synthesizer::from_config(&cfg)?;

    let lexicon = match &cfg.lexicon {
        Some(path) => Lexicon::load(path)?,
        None => {
            log::warn!("No pronouncing dictionary given; only spelling and acronyms will work");
            Lexicon::new()
        }
    };

    let sentences = match (&cli.phrase, &cli.fromfile) {
        (Some(phrase), _) => vec![phrase.clone()],
        (None, Some(path)) => {
            let content = std::fs::read_to_string(path)?;
            log::info!("Input file: {}", path.display());
            text::sentences(&content)
        }
        (None, None) => Vec::new(),
    };

    // Synthesize everything before producing output so a failure leaves no
    // partial file or playback behind
    let mut clips = Vec::with_capacity(sentences.len());
    for sentence in &sentences {
        log::info!("Text: {}", sentence.chars().take(100).collect::<String>());
        let phones = Utterance::new(sentence.as_str(), cli.usepunc).phone_sequence(&lexicon, cli.spell)?;
        clips.push(synth.synthesize(&phones, volume, cli.crossfade)?);
    }
    let output = AudioData::concat(&clips)?;

    log::info!(
        "Duration: {:.2}s ({} samples, peak {})",
        output.duration(),
        output.len(),
        audio::compute_peak(&output.samples)
    );

    // Write the file first so a playback failure does not lose it
    if let Some(path) = &cli.outfile {
        audio::save_audio(path, &output)?;
        println!("✓ Synthesis complete: {}", path.display());
    } else if !cli.play {
        log::warn!("No --outfile or --play given; audio discarded");
    }

    if cli.play {
        audio::playback::play(&output)?;
    }

    Ok(())
}
