//! Delineation result types

use serde::{Deserialize, Serialize};

use super::metadata::ChannelMetadata;

/// Role of a fiducial landmark within a cardiac cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiducialRole {
    /// Dominant positive deflection of the heartbeat
    R,
    /// Local minimum immediately before the R peak
    Q,
    /// Local minimum immediately after the R peak
    S,
    /// Atrial depolarization crest before the QRS complex
    P,
    /// Ventricular repolarization crest after the QRS complex
    T,
    /// Start boundary of the P wave
    POnset,
    /// Start boundary of the Q wave
    QOnset,
    /// End boundary of the S wave
    SOffset,
    /// End boundary of the T wave
    TOffset,
}

/// A sample index tagged with its fiducial role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiducialPoint {
    /// Sample index into the conditioned channel
    pub index: usize,
    /// Landmark role
    pub role: FiducialRole,
}

/// All fiducial index sequences detected on one channel
///
/// Every index is strictly within the signal, and `r_peaks` is strictly
/// increasing. R, Q and S always have equal lengths; the remaining
/// sequences can be shorter because a cycle without a qualifying candidate
/// emits no point. The interval builder aligns them by pairwise truncation,
/// which can misattribute a duration to the wrong cycle when drops are
/// non-uniform mid-recording. That limitation is inherited from the
/// reference behavior and is not compensated for here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fiducials {
    /// R-peak indices, strictly increasing
    pub r_peaks: Vec<usize>,
    /// Q-point indices, one per R peak
    pub q_points: Vec<usize>,
    /// S-point indices, one per R peak
    pub s_points: Vec<usize>,
    /// P-wave crest indices
    pub p_points: Vec<usize>,
    /// T-wave crest indices
    pub t_points: Vec<usize>,
    /// P-wave onset indices
    pub p_onsets: Vec<usize>,
    /// Q-wave onset indices
    pub q_onsets: Vec<usize>,
    /// S-wave offset indices
    pub s_offsets: Vec<usize>,
    /// T-wave offset indices
    pub t_offsets: Vec<usize>,
}

impl Fiducials {
    /// Iterate every detected fiducial point with its role
    pub fn points(&self) -> impl Iterator<Item = FiducialPoint> + '_ {
        let tag = |seq: &[usize], role: FiducialRole| {
            seq.iter()
                .map(move |&index| FiducialPoint { index, role })
                .collect::<Vec<_>>()
        };
        tag(&self.r_peaks, FiducialRole::R)
            .into_iter()
            .chain(tag(&self.q_points, FiducialRole::Q))
            .chain(tag(&self.s_points, FiducialRole::S))
            .chain(tag(&self.p_points, FiducialRole::P))
            .chain(tag(&self.t_points, FiducialRole::T))
            .chain(tag(&self.p_onsets, FiducialRole::POnset))
            .chain(tag(&self.q_onsets, FiducialRole::QOnset))
            .chain(tag(&self.s_offsets, FiducialRole::SOffset))
            .chain(tag(&self.t_offsets, FiducialRole::TOffset))
    }
}

/// Per-cycle interval features, one record per cardiac cycle
///
/// A cycle is the span between two consecutive R peaks. Fields whose
/// prerequisite fiducial points were not detected for the cycle hold
/// `f32::NAN`; `rr_interval` and `bpm` are always finite when the record
/// exists. Field names match the columns of the external feature table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Time between this cycle's R peak and the next, in seconds
    pub rr_interval: f32,
    /// Instantaneous heart rate, 60 / RR
    pub bpm: f32,
    /// Q-onset minus P-onset, in seconds
    pub p_wave_duration: f32,
    /// S-offset minus Q-onset, in seconds
    pub qrs_duration: f32,
    /// T-offset minus S-offset, in seconds
    pub t_wave_duration: f32,
    /// Q-onset minus P-onset over the re-truncated sequences, in seconds
    pub pr_interval: f32,
    /// T-offset minus Q-onset, in seconds
    pub qt_interval: f32,
}

/// Complete delineation output for one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDelineation {
    /// Detected fiducial point sequences
    pub fiducials: Fiducials,
    /// One feature record per cardiac cycle, in R-peak order
    pub features: Vec<FeatureRecord>,
    /// Processing metadata for this channel
    pub metadata: ChannelMetadata,
}
