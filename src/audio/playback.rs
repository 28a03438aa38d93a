//! Audio playback through the default output device
//!
//! Needs the `playback` feature (cpal + rubato). The stream uses a format the
//! device actually supports and audio is resampled when the device rate
//! differs from the synthesis rate. Without the feature [`play`] reports
//! that playback is unavailable so the CLI can fail cleanly.

use super::AudioData;
use crate::Result;

#[cfg(feature = "playback")]
use cpal::{SampleFormat, SampleRate, SupportedStreamConfig, SupportedStreamConfigRange};

/// Play `audio` and block until the last sample has been queued
#[cfg(feature = "playback")]
pub fn play(audio: &AudioData) -> Result<()> {
    use super::resample::resample;
    use crate::Error;
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::sync::mpsc;
    use std::time::Duration;

    if audio.is_empty() {
        return Ok(());
    }

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Audio("No output device available".into()))?;

    // Prefer the device's own rate; the synthesis rate is only a hint
    let preferred_rate = match device.default_output_config() {
        Ok(config) => config.sample_rate().0,
        Err(e) => {
            log::debug!("No default output config ({}), trying {} Hz", e, audio.sample_rate);
            audio.sample_rate
        }
    };

    let supported = device
        .supported_output_configs()
        .map_err(|e| Error::Audio(format!("Failed to query output configs: {}", e)))?;
    let config = find_best_config(supported, preferred_rate)?;

    let device_rate = config.sample_rate().0;
    let channels = config.channels() as usize;
    let stream_config: cpal::StreamConfig = config.config();

    let samples: Vec<f32> = audio
        .samples
        .iter()
        .map(|&s| s as f32 / i16::MAX as f32)
        .collect();
    let samples = if device_rate != audio.sample_rate {
        log::info!(
            "Resampling {} Hz -> {} Hz for playback",
            audio.sample_rate,
            device_rate
        );
        resample(&samples, audio.sample_rate, device_rate)?
    } else {
        samples
    };

    log::debug!(
        "Playing {:.2}s of audio at {} Hz on {} channel(s)",
        audio.duration(),
        device_rate,
        channels
    );

    let total = samples.len();
    let mut position = 0usize;
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let stream = device
        .build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value = samples.get(position).copied().unwrap_or(0.0);
                    frame.fill(value);
                    position += 1;
                }
                if position >= samples.len() {
                    let _ = done_tx.send(());
                }
            },
            |err| log::error!("Audio playback error: {}", err),
            None,
        )
        .map_err(|e| Error::Audio(format!("Failed to build output stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| Error::Audio(format!("Failed to start playback: {}", e)))?;

    let timeout = Duration::from_secs_f64(total as f64 / device_rate as f64 + 2.0);
    if done_rx.recv_timeout(timeout).is_err() {
        log::warn!("Playback did not finish within {:.1}s", timeout.as_secs_f32());
    }
    // Let the device drain its last buffer
    std::thread::sleep(Duration::from_millis(100));

    Ok(())
}

/// Play `audio` and block until the last sample has been queued
#[cfg(not(feature = "playback"))]
pub fn play(audio: &AudioData) -> Result<()> {
    log::debug!("Dropping {} samples: playback disabled", audio.len());
    Err(crate::Error::Audio(
        "playback support not compiled in (rebuild with --features playback)".into(),
    ))
}

/// Pick a mono or stereo f32 output config, at `target_rate` when a range
/// covers it, otherwise at the nearest end of the first usable range
#[cfg(feature = "playback")]
fn find_best_config(
    configs: impl Iterator<Item = SupportedStreamConfigRange>,
    target_rate: u32,
) -> Result<SupportedStreamConfig> {
    let usable: Vec<SupportedStreamConfigRange> = configs
        .filter(|c| c.channels() > 0 && c.channels() <= 2)
        .filter(|c| c.sample_format() == SampleFormat::F32)
        .collect();

    if let Some(config) = usable
        .iter()
        .find(|c| (c.min_sample_rate().0..=c.max_sample_rate().0).contains(&target_rate))
    {
        return Ok(config.clone().with_sample_rate(SampleRate(target_rate)));
    }

    let first = usable
        .first()
        .ok_or_else(|| crate::Error::Audio("No mono/stereo f32 output configuration".into()))?;
    let rate = if target_rate < first.min_sample_rate().0 {
        first.min_sample_rate()
    } else {
        first.max_sample_rate()
    };
    Ok(first.clone().with_sample_rate(rate))
}
