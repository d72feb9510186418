//! Per-cycle interval feature derivation
//!
//! Upstream stages may drop cycles, so the fiducial sequences arrive with
//! different lengths. Alignment is by pairwise truncation to the common
//! minimum length, applied sequentially per feature: P-onset/Q-onset for
//! the P-wave duration, Q-onset/S-offset for the QRS duration,
//! S-offset/T-offset for the T-wave duration, then PR and QT from the
//! already-truncated sequences. Later truncations can further shrink a
//! sequence an earlier feature used in full.
//!
//! Known limitation carried over from the reference behavior: when a drop
//! happens mid-recording rather than at the tail, truncation pairs every
//! later entry with the wrong cycle. The builder does not compensate.

use crate::analysis::result::{FeatureRecord, Fiducials};

/// Build one feature record per cardiac cycle
///
/// Cycles are spans between consecutive R peaks, so `r_peaks.len() - 1`
/// records come out (none for fewer than two peaks). RR and BPM derive
/// directly from the R peaks; every other feature is the truncated
/// per-cycle difference when present and `f32::NAN` otherwise.
pub fn build_features(fiducials: &Fiducials, sample_rate: f32) -> Vec<FeatureRecord> {
    let fs = sample_rate;
    let mut p_onsets = fiducials.p_onsets.clone();
    let mut q_onsets = fiducials.q_onsets.clone();
    let mut s_offsets = fiducials.s_offsets.clone();
    let mut t_offsets = fiducials.t_offsets.clone();

    let len = p_onsets.len().min(q_onsets.len());
    p_onsets.truncate(len);
    q_onsets.truncate(len);
    let p_wave_durations = diff_seconds(&q_onsets, &p_onsets, fs);

    let len = q_onsets.len().min(s_offsets.len());
    q_onsets.truncate(len);
    s_offsets.truncate(len);
    let qrs_durations = diff_seconds(&s_offsets, &q_onsets, fs);

    let len = s_offsets.len().min(t_offsets.len());
    s_offsets.truncate(len);
    t_offsets.truncate(len);
    let t_wave_durations = diff_seconds(&t_offsets, &s_offsets, fs);

    let len = p_onsets.len().min(q_onsets.len());
    let pr_intervals = diff_seconds(&q_onsets[..len], &p_onsets[..len], fs);

    let len = q_onsets.len().min(t_offsets.len());
    let qt_intervals = diff_seconds(&t_offsets[..len], &q_onsets[..len], fs);

    let r_peaks = &fiducials.r_peaks;
    let cycle_count = r_peaks.len().saturating_sub(1);
    let mut features = Vec::with_capacity(cycle_count);
    for cycle in 0..cycle_count {
        let rr_samples = r_peaks[cycle + 1] - r_peaks[cycle];
        let rr_interval = rr_samples as f32 / fs;
        let bpm = if rr_interval > 0.0 {
            60.0 / rr_interval
        } else {
            f32::NAN
        };
        features.push(FeatureRecord {
            rr_interval,
            bpm,
            p_wave_duration: value_at(&p_wave_durations, cycle),
            qrs_duration: value_at(&qrs_durations, cycle),
            t_wave_duration: value_at(&t_wave_durations, cycle),
            pr_interval: value_at(&pr_intervals, cycle),
            qt_interval: value_at(&qt_intervals, cycle),
        });
    }

    log::debug!(
        "Built {} feature records from {} R peaks",
        features.len(),
        r_peaks.len()
    );
    features
}

/// Pairwise `(a - b) / fs` in seconds
///
/// Indices are unsigned but a misaligned pairing can put `b` after `a`,
/// so the subtraction goes through i64.
fn diff_seconds(a: &[usize], b: &[usize], fs: f32) -> Vec<f32> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| (x as i64 - y as i64) as f32 / fs)
        .collect()
}

fn value_at(values: &[f32], index: usize) -> f32 {
    values.get(index).copied().unwrap_or(f32::NAN)
}
