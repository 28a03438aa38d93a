//! Unit concatenation with optional cross-fading

use crate::audio::crossfade;
use crate::Sample;

/// Join mode for adjacent units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossfade {
    /// Copy units end to end
    #[default]
    Off,
    /// Overlap adjacent units by `overlap` samples with a half-Hann taper
    On { overlap: usize },
}

impl Crossfade {
    /// Nominal overlap in samples (0 when off)
    pub fn overlap(&self) -> usize {
        match self {
            Crossfade::Off => 0,
            Crossfade::On { overlap } => *overlap,
        }
    }
}

/// Length of the buffer `concatenate` produces for units of these lengths
pub fn output_len(lengths: &[usize], mode: Crossfade) -> usize {
    let total: usize = lengths.iter().sum();
    let overlap = mode.overlap();
    let overlapped: usize = lengths
        .windows(2)
        .map(|pair| overlap.min(pair[0]).min(pair[1]))
        .sum();
    total - overlapped
}

/// Join units into one new buffer
///
/// With cross-fading each join overlaps `min(overlap, len(a), len(b))`
/// samples, so short or empty units (zero-length pauses) are handled
/// without reading past either unit.
pub fn concatenate<U: AsRef<[Sample]>>(units: &[U], mode: Crossfade) -> Vec<Sample> {
    let lengths: Vec<usize> = units.iter().map(|u| u.as_ref().len()).collect();
    let mut output = Vec::with_capacity(output_len(&lengths, mode));

    let overlap = mode.overlap();
    let mut previous_len = 0usize;

    for (i, unit) in units.iter().enumerate() {
        let samples = unit.as_ref();
        let width = if i == 0 {
            0
        } else {
            overlap.min(previous_len).min(samples.len())
        };

        if width > 0 {
            // The output always holds at least the whole previous unit's tail
            let start = output.len() - width;
            let blended = crossfade(&output[start..], &samples[..width]);
            output.truncate(start);
            output.extend_from_slice(&blended);
        }
        output.extend_from_slice(&samples[width..]);
        previous_len = samples.len();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, offset: i16) -> Vec<Sample> {
        (0..len).map(|i| (i as i16 % 1000) + offset).collect()
    }

    #[test]
    fn test_hard_concatenation() {
        let units = vec![vec![1, 2, 3], vec![], vec![4, 5]];
        let out = concatenate(&units, Crossfade::Off);
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
        assert_eq!(out.len(), output_len(&[3, 0, 2], Crossfade::Off));
    }

    #[test]
    fn test_degenerate_inputs() {
        let none: Vec<Vec<Sample>> = Vec::new();
        assert!(concatenate(&none, Crossfade::On { overlap: 10 }).is_empty());

        let single = vec![vec![7, 8, 9]];
        assert_eq!(concatenate(&single, Crossfade::On { overlap: 10 }), vec![7, 8, 9]);
    }

    #[test]
    fn test_crossfade_length() {
        let units: Vec<Vec<Sample>> = [400, 450, 500, 600, 700]
            .iter()
            .map(|&n| ramp(n, 0))
            .collect();
        let out = concatenate(&units, Crossfade::On { overlap: 200 });
        assert_eq!(out.len(), 400 + 450 + 500 + 600 + 700 - 4 * 200);
    }

    #[test]
    fn test_zero_overlap_matches_hard() {
        let units = vec![ramp(30, 5), ramp(12, -40), ramp(50, 100)];
        assert_eq!(
            concatenate(&units, Crossfade::On { overlap: 0 }),
            concatenate(&units, Crossfade::Off)
        );
    }

    #[test]
    fn test_overlap_clamped_to_short_units() {
        let units = vec![vec![100; 50], vec![0; 3], vec![], vec![-100; 50]];
        let out = concatenate(&units, Crossfade::On { overlap: 10 });
        // joins overlap 3, 0 and 0 samples
        assert_eq!(out.len(), 50 + 3 + 0 + 50 - 3);
        assert_eq!(out.len(), output_len(&[50, 3, 0, 50], Crossfade::On { overlap: 10 }));
        assert_eq!(&out[..47], &[100; 47][..]);
        assert_eq!(&out[50..], &[-100; 50][..]);
    }

    #[test]
    fn test_non_overlapping_parts_unchanged() {
        let a = ramp(100, 0);
        let b = ramp(100, 500);
        let out = concatenate(&[a.clone(), b.clone()], Crossfade::On { overlap: 20 });
        assert_eq!(&out[..80], &a[..80]);
        assert_eq!(&out[100..], &b[20..]);
        // taper starts on the outgoing unit and ends on the incoming one
        assert_eq!(out[80], a[80]);
        assert_eq!(out[99], b[19]);
    }
}
