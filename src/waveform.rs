//! Input waveform type
//!
//! Produced by an external record reader (header/binary parsing lives
//! outside this crate) and treated as read-only by the pipeline.

use serde::{Deserialize, Serialize};

/// A multi-channel digitized recording
///
/// One channel is an ordered sequence of real-valued samples; all channels
/// share the sampling rate. Channels are delineated independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waveform {
    /// Sampling rate in Hz, shared by all channels
    pub sampling_rate: f32,
    /// Per-channel sample sequences
    pub channels: Vec<Vec<f32>>,
}

impl Waveform {
    /// Create a waveform from channel sample sequences
    pub fn new(sampling_rate: f32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sampling_rate,
            channels,
        }
    }

    /// Number of channels (leads)
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Duration of the longest channel in seconds
    pub fn duration_seconds(&self) -> f32 {
        let longest = self.channels.iter().map(Vec::len).max().unwrap_or(0);
        if self.sampling_rate > 0.0 {
            longest as f32 / self.sampling_rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let waveform = Waveform::new(500.0, vec![vec![0.0; 1000], vec![0.0; 500]]);
        assert_eq!(waveform.num_channels(), 2);
        assert!((waveform.duration_seconds() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_waveform() {
        let waveform = Waveform::new(500.0, vec![]);
        assert_eq!(waveform.num_channels(), 0);
        assert_eq!(waveform.duration_seconds(), 0.0);
    }
}
