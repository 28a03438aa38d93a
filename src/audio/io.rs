//! Audio I/O operations

use crate::{Error, Result, Sample};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Audio data container
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    /// Mono 16-bit PCM samples
    pub samples: Vec<Sample>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioData {
    /// Create new audio data
    pub fn new(samples: Vec<Sample>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get duration in seconds
    pub fn duration(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Join clips end to end; all clips must share one sample rate
    pub fn concat(clips: &[AudioData]) -> Result<AudioData> {
        let sample_rate = match clips.first() {
            Some(first) => first.sample_rate,
            None => return Ok(AudioData::new(Vec::new(), crate::SAMPLE_RATE)),
        };

        if let Some(odd) = clips.iter().find(|c| c.sample_rate != sample_rate) {
            return Err(Error::Audio(format!(
                "cannot join {} Hz audio with {} Hz audio",
                odd.sample_rate, sample_rate
            )));
        }

        let total = clips.iter().map(|c| c.len()).sum();
        let mut samples = Vec::with_capacity(total);
        for clip in clips {
            samples.extend_from_slice(&clip.samples);
        }
        Ok(AudioData::new(samples, sample_rate))
    }
}

/// Load audio from WAV file
///
/// Integer samples of any width and float samples are converted to 16-bit;
/// multi-channel audio is averaged down to mono.
pub fn load_audio<P: AsRef<Path>>(path: P) -> Result<AudioData> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let reader = WavReader::open(path).map_err(|e| Error::Audio(format!("Failed to open WAV: {}", e)))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    // Read samples based on format
    let samples: Vec<i32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|x| (x * i16::MAX as f32).round() as i32))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Audio(format!("Failed to read samples: {}", e)))?,
        SampleFormat::Int => {
            let bits = spec.bits_per_sample as i32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|x| rescale_bits(x, bits)))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| Error::Audio(format!("Failed to read samples: {}", e)))?
        }
    };

    // Convert to mono if stereo
    let mono: Vec<Sample> = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| saturate(chunk.iter().sum::<i32>() / chunk.len() as i32))
            .collect()
    } else {
        samples.into_iter().map(saturate).collect()
    };

    Ok(AudioData::new(mono, spec.sample_rate))
}

/// Save audio to a 16-bit mono PCM WAV file
pub fn save_audio<P: AsRef<Path>>(path: P, audio: &AudioData) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)
        .map_err(|e| Error::Audio(format!("Failed to create WAV writer: {}", e)))?;

    for &sample in &audio.samples {
        writer
            .write_sample(sample)
            .map_err(|e| Error::Audio(format!("Failed to write sample: {}", e)))?;
    }

    writer
        .finalize()
        .map_err(|e| Error::Audio(format!("Failed to finalize WAV: {}", e)))?;

    Ok(())
}

fn rescale_bits(sample: i32, bits: i32) -> i32 {
    if bits > 16 {
        sample >> (bits - 16)
    } else {
        sample << (16 - bits)
    }
}

fn saturate(sample: i32) -> Sample {
    sample.clamp(i16::MIN as i32, i16::MAX as i32) as Sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("diphone_tts_io_roundtrip.wav");
        let audio = AudioData::new(vec![0, 1000, -1000, i16::MAX, i16::MIN], 16000);

        save_audio(&path, &audio).unwrap();
        let loaded = load_audio(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, audio);
    }

    #[test]
    fn test_stereo_downmix() {
        let path = std::env::temp_dir().join("diphone_tts_io_stereo.wav");
        let spec = WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [100i16, 300, -200, -400] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let loaded = load_audio(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.samples, vec![200, -300]);
        assert_eq!(loaded.sample_rate, 8000);
    }

    #[test]
    fn test_corrupt_file_rejected() {
        let path = std::env::temp_dir().join("diphone_tts_io_corrupt.wav");
        std::fs::write(&path, "this is a purposely corrupted wav").unwrap();
        let result = load_audio(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(Error::Audio(_))));
    }

    #[test]
    fn test_concat() {
        let a = AudioData::new(vec![1, 2], 16000);
        let b = AudioData::new(vec![3], 16000);
        let joined = AudioData::concat(&[a.clone(), b]).unwrap();
        assert_eq!(joined.samples, vec![1, 2, 3]);

        let other_rate = AudioData::new(vec![4], 8000);
        assert!(AudioData::concat(&[a, other_rate]).is_err());
        assert!(AudioData::concat(&[]).unwrap().is_empty());
    }
}
