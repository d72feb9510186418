//! Fiducial point detection and feature derivation
//!
//! This module contains the delineation stages that run on a conditioned
//! channel:
//! - R-peak detection (distance/height constrained local maxima)
//! - Q/S point location (windowed minima around each R peak)
//! - P/T wave location (derivative crest search, amplitude-argmax)
//! - Onset/offset boundary search (derivative sign patterns, first-match)
//! - Interval feature derivation (per-cycle RR/BPM/durations)

pub mod boundaries;
pub mod intervals;
pub mod qrs;
pub mod r_peaks;
pub mod waves;

/// First discrete derivative of a signal
///
/// `deriv[i] = signal[i + 1] - signal[i]`, one sample shorter than the
/// input. The P/T crest search and the onset/offset boundary search both
/// operate on this sequence.
pub(crate) fn first_derivative(signal: &[f32]) -> Vec<f32> {
    signal.windows(2).map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_derivative() {
        let d = first_derivative(&[1.0, 3.0, 2.0, 2.0]);
        assert_eq!(d, vec![2.0, -1.0, 0.0]);
    }

    #[test]
    fn test_first_derivative_short_inputs() {
        assert!(first_derivative(&[]).is_empty());
        assert!(first_derivative(&[1.0]).is_empty());
    }
}
