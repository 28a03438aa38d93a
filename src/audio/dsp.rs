//! Digital Signal Processing utilities

use crate::{Error, Result, Sample};
use std::f32::consts::PI;

/// Round and saturate to the 16-bit sample range
pub fn to_sample(x: f32) -> Sample {
    x.round().clamp(i16::MIN as f32, i16::MAX as f32) as Sample
}

/// Rising half-Hann (raised cosine) weight at position `k` of a `width` window
///
/// Runs from exactly 0 at `k = 0` to exactly 1 at `k = width - 1`. The
/// falling weight is `1 - rise_weight(k, width)`.
pub fn rise_weight(k: usize, width: usize) -> f32 {
    if width <= 1 {
        return 0.5;
    }
    0.5 - 0.5 * (PI * k as f32 / (width - 1) as f32).cos()
}

/// Rising half-Hann taper of `width` samples
pub fn half_hann(width: usize) -> Vec<f32> {
    (0..width).map(|k| rise_weight(k, width)).collect()
}

/// Blend the tail of one unit into the head of the next
///
/// `tail` fades out while `head` fades in with the complementary weight;
/// both views must have the same length.
pub fn crossfade(tail: &[Sample], head: &[Sample]) -> Vec<Sample> {
    debug_assert_eq!(tail.len(), head.len());
    let width = tail.len().min(head.len());

    (0..width)
        .map(|k| {
            let rise = rise_weight(k, width);
            to_sample(tail[k] as f32 * (1.0 - rise) + head[k] as f32 * rise)
        })
        .collect()
}

/// Multiply every sample by `gain`
pub fn apply_gain(signal: &[Sample], gain: f32) -> Vec<Sample> {
    signal.iter().map(|&s| to_sample(s as f32 * gain)).collect()
}

/// Gain for a 0-100 volume setting (linear: volume / 100)
pub fn volume_gain(volume: i32) -> Result<f32> {
    if !(0..=100).contains(&volume) {
        return Err(Error::InvalidVolume(volume));
    }
    Ok(volume as f32 / 100.0)
}

/// Scale a buffer by a 0-100 volume, returning a new buffer
pub fn scale(signal: &[Sample], volume: i32) -> Result<Vec<Sample>> {
    let gain = volume_gain(volume)?;
    if volume == 100 {
        return Ok(signal.to_vec());
    }
    Ok(apply_gain(signal, gain))
}

/// Compute peak amplitude
pub fn compute_peak(signal: &[Sample]) -> u16 {
    signal.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
}

/// Compute RMS energy
pub fn compute_rms(signal: &[Sample]) -> f32 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum: f64 = signal.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / signal.len() as f64).sqrt() as f32
}
