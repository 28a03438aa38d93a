//! Benchmark for unit resolution and concatenation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use diphone_tts::pipeline::{concatenate, Crossfade};
use diphone_tts::text::{DiphoneLabel, Phoneme, PhonemeSequence};
use diphone_tts::{Sample, SynthesisOptions, Synthesizer, UnitInventory};
use std::sync::Arc;

/// Roughly 120 ms units, like a typical diphone voice at 16 kHz
const UNIT_LEN: usize = 1920;

fn units(count: usize) -> Vec<Vec<Sample>> {
    (0..count)
        .map(|u| {
            (0..UNIT_LEN)
                .map(|i| ((i as f32 * 0.05 + u as f32).sin() * 8000.0) as Sample)
                .collect()
        })
        .collect()
}

fn bench_concatenate(c: &mut Criterion) {
    let units = units(100);

    c.bench_function("concatenate_hard_100", |b| {
        b.iter(|| concatenate(black_box(&units), Crossfade::Off))
    });

    c.bench_function("concatenate_crossfade_100", |b| {
        b.iter(|| concatenate(black_box(&units), Crossfade::On { overlap: 160 }))
    });
}

fn bench_synthesize(c: &mut Criterion) {
    // Every diphone over a small alphabet
    let alphabet = [
        Phoneme::Pau,
        Phoneme::Hh,
        Phoneme::Eh,
        Phoneme::L,
        Phoneme::Ow,
        Phoneme::W,
        Phoneme::Er,
        Phoneme::D,
    ];
    let mut inventory = UnitInventory::new(16000);
    let mut samples = units(alphabet.len() * alphabet.len()).into_iter();
    for &left in &alphabet {
        for &right in &alphabet {
            if let Some(unit) = samples.next() {
                let _ = inventory.insert(DiphoneLabel::new(left, right), unit);
            }
        }
    }
    let synth = Synthesizer::new(Arc::new(inventory), SynthesisOptions::default());

    let sentence: PhonemeSequence = "hh eh l ow , w er l d . hh eh l ow w er l d !".parse().unwrap();

    c.bench_function("synthesize_sentence", |b| {
        b.iter(|| synth.synthesize(black_box(&sentence), 80, true))
    });
}

criterion_group!(benches, bench_concatenate, bench_synthesize);
criterion_main!(benches);
