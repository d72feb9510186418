//! Signal conditioning modules
//!
//! This module contains utilities for preparing a raw ECG channel for
//! delineation:
//! - Zero-phase Butterworth band-pass filtering (baseline wander and
//!   high-frequency noise removal)
//! - Savitzky-Golay smoothing (local polynomial regression)

pub mod bandpass;
pub mod savgol;

pub(crate) mod linalg;

use crate::config::DelineationConfig;
use crate::error::DelineationError;

/// Condition a raw channel for fiducial point detection
///
/// Applies the band-pass filter followed by Savitzky-Golay smoothing, as
/// configured. Both filter preconditions are checked here, before any
/// filtering or detection work, so a rejected channel produces no partial
/// output. The pad-length check takes precedence over the window check.
///
/// # Errors
///
/// - `SignalTooShort` if the signal is not longer than the band-pass
///   filter's pad length
/// - `WindowTooLarge` if the smoothing window exceeds the signal length
pub fn condition_signal(
    samples: &[f32],
    sample_rate: f32,
    config: &DelineationConfig,
) -> Result<Vec<f32>, DelineationError> {
    let (b, a) = bandpass::butter_bandpass(
        config.filter_order,
        config.lowcut_hz as f64,
        config.highcut_hz as f64,
        sample_rate as f64,
    )?;

    let padlen = bandpass::pad_length(&b, &a);
    if samples.len() <= padlen {
        return Err(DelineationError::SignalTooShort {
            len: samples.len(),
            padlen,
        });
    }
    if config.smoothing_window > samples.len() {
        return Err(DelineationError::WindowTooLarge {
            window: config.smoothing_window,
            len: samples.len(),
        });
    }

    let filtered = bandpass::filtfilt(&b, &a, samples)?;
    savgol::savgol_filter(&filtered, config.smoothing_window, config.smoothing_polyorder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_preserves_length() {
        let config = DelineationConfig::default();
        let samples: Vec<f32> = (0..2000)
            .map(|i| (i as f32 * 0.05).sin() + 0.2 * (i as f32 * 0.8).sin())
            .collect();
        let out = condition_signal(&samples, 500.0, &config).unwrap();
        assert_eq!(out.len(), samples.len());
    }

    #[test]
    fn test_signal_too_short_takes_precedence() {
        let config = DelineationConfig::default();
        // 10 samples is below both the pad length (27) and the window (51);
        // the pad-length check must win
        let samples = vec![0.0f32; 10];
        match condition_signal(&samples, 500.0, &config) {
            Err(DelineationError::SignalTooShort { len: 10, padlen: 27 }) => {}
            other => panic!("expected SignalTooShort, got {:?}", other),
        }
    }

    #[test]
    fn test_window_too_large() {
        let config = DelineationConfig::default();
        // Longer than the pad length (27) but shorter than the window (51)
        let samples = vec![0.0f32; 40];
        match condition_signal(&samples, 500.0, &config) {
            Err(DelineationError::WindowTooLarge { window: 51, len: 40 }) => {}
            other => panic!("expected WindowTooLarge, got {:?}", other),
        }
    }
}
