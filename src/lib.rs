//! # ECG DSP
//!
//! ECG waveform delineation and per-heartbeat interval feature extraction
//! for downstream health and sleep analytics.
//!
//! ## Features
//!
//! - **Signal conditioning**: zero-phase Butterworth band-pass + Savitzky-Golay smoothing
//! - **Fiducial point delineation**: R, Q, S, P, T and their onsets/offsets
//! - **Interval features**: per-cycle RR, BPM, P/QRS/T durations, PR and QT intervals
//!
//! ## Quick Start
//!
//! ```no_run
//! use ecg_dsp::{delineate_channel, DelineationConfig};
//!
//! // One channel of a digitized ECG recording
//! let samples: Vec<f32> = vec![]; // Your signal data
//! let sample_rate = 500.0;
//!
//! let result = delineate_channel(&samples, sample_rate, &DelineationConfig::default())?;
//!
//! for record in &result.features {
//!     println!("RR {:.3} s, BPM {:.1}", record.rr_interval, record.bpm);
//! }
//! # Ok::<(), ecg_dsp::DelineationError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is a batch, whole-signal transform, one channel at a time:
//!
//! ```text
//! Raw channel → Conditioning → R peaks → Q/S points → P/T waves
//!            → Onsets/Offsets → Interval features
//! ```
//!
//! Control flows strictly forward; no stage feeds back. Channels are
//! independent and [`delineate_waveform`] processes them in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod preprocessing;
pub mod waveform;

// Re-export main types
pub use analysis::metadata::ChannelMetadata;
pub use analysis::result::{ChannelDelineation, FeatureRecord, FiducialPoint, FiducialRole, Fiducials};
pub use config::DelineationConfig;
pub use error::DelineationError;
pub use waveform::Waveform;

use rayon::prelude::*;

/// Delineate a single channel
///
/// Conditions the signal, locates every fiducial point and derives one
/// feature record per cardiac cycle.
///
/// # Arguments
///
/// * `samples` - Raw channel samples
/// * `sample_rate` - Sampling rate in Hz
/// * `config` - Delineation parameters; see [`DelineationConfig`]
///
/// # Errors
///
/// - [`DelineationError::SignalTooShort`] if the channel is not longer than
///   the band-pass filter pad length
/// - [`DelineationError::WindowTooLarge`] if the smoothing window exceeds
///   the channel length
/// - [`DelineationError::InvalidInput`] for an unusable sampling rate or
///   configuration
///
/// Everything else degrades to missing data: a channel with no detectable
/// beats comes back with empty fiducials and no feature records.
pub fn delineate_channel(
    samples: &[f32],
    sample_rate: f32,
    config: &DelineationConfig,
) -> Result<ChannelDelineation, DelineationError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate(sample_rate)?;

    log::debug!(
        "Starting delineation: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let conditioned = preprocessing::condition_signal(samples, sample_rate, config)?;

    let r_peaks = features::r_peaks::detect_r_peaks(&conditioned, sample_rate, config);
    if r_peaks.is_empty() {
        log::warn!("No R peaks detected; channel yields no feature records");
    }

    let (q_points, s_points) =
        features::qrs::locate_q_s_points(&conditioned, &r_peaks, sample_rate, config);
    let (p_points, t_points) = features::waves::locate_p_t_waves(
        &conditioned,
        &r_peaks,
        &q_points,
        &s_points,
        sample_rate,
        config,
    );

    use features::boundaries::{find_boundaries, BoundaryKind};
    let p_onsets = find_boundaries(
        &conditioned,
        &p_points,
        sample_rate,
        BoundaryKind::Onset,
        config.onset_search_seconds,
    );
    let q_onsets = find_boundaries(
        &conditioned,
        &q_points,
        sample_rate,
        BoundaryKind::Onset,
        config.onset_search_seconds,
    );
    let s_offsets = find_boundaries(
        &conditioned,
        &s_points,
        sample_rate,
        BoundaryKind::Offset,
        config.offset_search_seconds,
    );
    let t_offsets = find_boundaries(
        &conditioned,
        &t_points,
        sample_rate,
        BoundaryKind::Offset,
        config.offset_search_seconds,
    );

    let fiducials = Fiducials {
        r_peaks,
        q_points,
        s_points,
        p_points,
        t_points,
        p_onsets,
        q_onsets,
        s_offsets,
        t_offsets,
    };
    let features = features::intervals::build_features(&fiducials, sample_rate);

    let metadata = ChannelMetadata {
        sample_rate,
        duration_seconds: samples.len() as f32 / sample_rate,
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
        beat_count: fiducials.r_peaks.len(),
        algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    log::debug!(
        "Delineation done: {} beats, {} feature records in {:.1} ms",
        metadata.beat_count,
        features.len(),
        metadata.processing_time_ms
    );

    Ok(ChannelDelineation {
        fiducials,
        features,
        metadata,
    })
}

/// Delineate every channel of a waveform
///
/// Channels are independent, so they run in parallel. Results come back in
/// channel order. The first failing channel fails the whole call; callers
/// that prefer to skip bad channels can call [`delineate_channel`] per
/// channel instead.
pub fn delineate_waveform(
    waveform: &Waveform,
    config: &DelineationConfig,
) -> Result<Vec<ChannelDelineation>, DelineationError> {
    log::debug!(
        "Delineating {} channels, {:.1} s at {} Hz",
        waveform.num_channels(),
        waveform.duration_seconds(),
        waveform.sampling_rate
    );

    waveform
        .channels
        .par_iter()
        .map(|channel| delineate_channel(channel, waveform.sampling_rate, config))
        .collect()
}
