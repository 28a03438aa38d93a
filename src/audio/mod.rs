//! Audio module for the diphone synthesizer
//!
//! Provides WAV I/O, the cross-fade and gain DSP used by the pipeline, and
//! playback (with resampling to the device rate).

mod dsp;
mod io;
pub mod playback;
#[cfg(feature = "playback")]
mod resample;

pub use dsp::{
    apply_gain, compute_peak, compute_rms, crossfade, half_hann, rise_weight, scale, to_sample,
    volume_gain,
};
pub use io::{load_audio, save_audio, AudioData};

/// Number of samples in `ms` milliseconds at `sample_rate`
pub fn ms_to_samples(ms: u32, sample_rate: u32) -> usize {
    (ms as u64 * sample_rate as u64 / 1000) as usize
}
