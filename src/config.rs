//! Configuration parameters for ECG delineation

use serde::{Deserialize, Serialize};

use crate::error::DelineationError;

/// Delineation configuration parameters
///
/// One immutable bundle passed by reference into the pipeline entry point.
/// No stage reads ambient defaults; every tunable lives here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelineationConfig {
    // Signal conditioning
    /// Band-pass low cutoff in Hz (default: 0.5)
    pub lowcut_hz: f32,

    /// Band-pass high cutoff in Hz (default: 40.0)
    pub highcut_hz: f32,

    /// Butterworth filter order (default: 4)
    pub filter_order: usize,

    /// Savitzky-Golay smoothing window length in samples (default: 51)
    /// Must be odd and no longer than the signal
    pub smoothing_window: usize,

    /// Savitzky-Golay polynomial order (default: 3)
    pub smoothing_polyorder: usize,

    // R-peak detection
    /// Minimum peak spacing = sampling_rate / this divisor (default: 2.5)
    pub min_distance_divisor: f32,

    /// Minimum peak height = mean + this multiplier * stddev (default: 2.0)
    pub height_std_multiplier: f32,

    // Fiducial search windows
    /// Half-window for Q/S search around each R peak, in seconds (default: 0.08)
    pub qs_window_seconds: f32,

    /// P-wave search range before the R peak, in seconds (default: 0.4)
    pub p_search_seconds: f32,

    /// T-wave search range after the R peak, in seconds (default: 0.5)
    pub t_search_seconds: f32,

    /// Search range for P-onset and Q-onset, in seconds (default: 0.1)
    pub onset_search_seconds: f32,

    /// Search range for S-offset and T-offset, in seconds (default: 0.2)
    pub offset_search_seconds: f32,
}

impl Default for DelineationConfig {
    fn default() -> Self {
        Self {
            lowcut_hz: 0.5,
            highcut_hz: 40.0,
            filter_order: 4,
            smoothing_window: 51,
            smoothing_polyorder: 3,
            min_distance_divisor: 2.5,
            height_std_multiplier: 2.0,
            qs_window_seconds: 0.08,
            p_search_seconds: 0.4,
            t_search_seconds: 0.5,
            onset_search_seconds: 0.1,
            offset_search_seconds: 0.2,
        }
    }
}

impl DelineationConfig {
    /// Validate the configuration against a sampling rate
    ///
    /// Checked once at the pipeline entry point, before any filtering.
    pub fn validate(&self, sample_rate: f32) -> Result<(), DelineationError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(DelineationError::InvalidInput(format!(
                "Sampling rate must be finite and positive, got {}",
                sample_rate
            )));
        }
        if self.filter_order == 0 {
            return Err(DelineationError::InvalidInput(
                "Filter order must be at least 1".to_string(),
            ));
        }
        if self.smoothing_window % 2 == 0 {
            return Err(DelineationError::InvalidInput(format!(
                "Smoothing window must be odd, got {}",
                self.smoothing_window
            )));
        }
        if self.smoothing_polyorder >= self.smoothing_window {
            return Err(DelineationError::InvalidInput(format!(
                "Polynomial order {} must be less than the window length {}",
                self.smoothing_polyorder, self.smoothing_window
            )));
        }
        if self.lowcut_hz <= 0.0 || self.highcut_hz <= self.lowcut_hz {
            return Err(DelineationError::InvalidInput(format!(
                "Band edges must satisfy 0 < low < high, got {}..{}",
                self.lowcut_hz, self.highcut_hz
            )));
        }
        if self.highcut_hz >= sample_rate / 2.0 {
            return Err(DelineationError::InvalidInput(format!(
                "High cutoff {} Hz must be below the Nyquist frequency {} Hz",
                self.highcut_hz,
                sample_rate / 2.0
            )));
        }
        Ok(())
    }
}
