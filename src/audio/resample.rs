//! Audio resampling using rubato
//!
//! Only playback needs it: unit inventories share one rate by construction,
//! but output devices often run at 44.1 or 48 kHz.

use crate::{Error, Result};
use rubato::{FastFixedIn, PolynomialDegree, Resampler};

/// Input chunk size handed to the resampler
const CHUNK_SIZE: usize = 1024;

/// Resample mono samples from `from_rate` to `to_rate`
///
/// The resampler's delay is compensated, so the output lines up with the
/// input and holds `ceil(len * to_rate / from_rate)` samples.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = to_rate as f64 / from_rate as f64;
    let mut resampler = FastFixedIn::<f32>::new(
        ratio,
        1.0, // fixed ratio
        PolynomialDegree::Cubic,
        CHUNK_SIZE,
        1,
    )
    .map_err(|e| Error::Audio(format!("Failed to create resampler: {}", e)))?;

    let expected_len = (samples.len() as f64 * ratio).ceil() as usize;
    let delay = resampler.output_delay();
    let chunk = resampler.input_frames_next();
    let mut input = vec![vec![0.0f32; chunk]];
    let mut output = Vec::with_capacity(expected_len + delay + chunk);

    let mut pos = 0;
    // Keep feeding (zeros once the input runs out) until the delayed tail is out
    while output.len() < expected_len + delay {
        let end = (pos + chunk).min(samples.len());
        let filled = end - pos;
        input[0][..filled].copy_from_slice(&samples[pos..end]);
        input[0][filled..].fill(0.0);
        pos = end;

        let block = resampler
            .process(&input, None)
            .map_err(|e| Error::Audio(format!("Resampling failed: {}", e)))?;
        output.extend_from_slice(&block[0]);
    }

    output.drain(..delay);
    output.truncate(expected_len);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_rate_is_copy() {
        let samples = vec![0.1, -0.2, 0.3];
        assert_eq!(resample(&samples, 16000, 16000).unwrap(), samples);
        assert!(resample(&[], 16000, 48000).unwrap().is_empty());
    }

    #[test]
    fn test_output_length_follows_ratio() {
        let samples = vec![0.0f32; 1600];
        assert_eq!(resample(&samples, 16000, 48000).unwrap().len(), 4800);
        assert_eq!(resample(&samples, 16000, 44100).unwrap().len(), 4410);
        assert_eq!(resample(&samples[..1000], 16000, 8000).unwrap().len(), 500);
    }

    #[test]
    fn test_constant_signal_keeps_level() {
        let samples = vec![0.5f32; 4000];
        let out = resample(&samples, 16000, 48000).unwrap();
        // Away from the edges the level is unchanged
        for &s in &out[1000..11000] {
            assert!((s - 0.5).abs() < 0.01, "sample {} drifted", s);
        }
    }
}
