//! Channel processing metadata

use serde::{Deserialize, Serialize};

/// Metadata about the delineation of one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMetadata {
    /// Sampling rate in Hz
    pub sample_rate: f32,

    /// Channel duration in seconds
    pub duration_seconds: f32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: f32,

    /// Number of detected R peaks
    pub beat_count: usize,

    /// Crate version that produced this result
    pub algorithm_version: String,
}

impl Default for ChannelMetadata {
    fn default() -> Self {
        Self {
            sample_rate: 0.0,
            duration_seconds: 0.0,
            processing_time_ms: 0.0,
            beat_count: 0,
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
