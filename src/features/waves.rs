//! P and T wave crest location
//!
//! P and T waves are low-amplitude deflections on either side of the QRS
//! complex, so a plain thresholded maximum search is unreliable. Instead a
//! crest is any sample where the first derivative transitions from positive
//! to negative; among all crests inside the search window, the one with the
//! greatest raw signal amplitude wins (amplitude-argmax, deliberately
//! different from the first-match policy of the onset/offset search).
//!
//! Cycle 0 is skipped: the search windows lean on the current cycle's
//! R/Q/S context and the first detected beat has no validated context yet.
//! P and T sequences can therefore be shorter than, and cycle-discontinuous
//! with, the R-peak sequence; the interval builder resolves this by
//! truncation.

use super::first_derivative;
use crate::config::DelineationConfig;

/// Locate P and T wave crests for each cardiac cycle
///
/// For cycle `i >= 1`:
/// - P window: `[r[i] - p_search_seconds * fs, q[i])`, clipped to the start
/// - T window: `(s[i], r[i] + t_search_seconds * fs]`, clipped to the end
///
/// Cycles without a qualifying crest emit no point. `r_peaks`, `q_points`
/// and `s_points` are expected to be the same length (the Q/S locator
/// guarantees this); extra entries in longer sequences are ignored.
pub fn locate_p_t_waves(
    signal: &[f32],
    r_peaks: &[usize],
    q_points: &[usize],
    s_points: &[usize],
    sample_rate: f32,
    config: &DelineationConfig,
) -> (Vec<usize>, Vec<usize>) {
    let deriv = first_derivative(signal);
    let p_range = (config.p_search_seconds * sample_rate) as usize;
    let t_range = (config.t_search_seconds * sample_rate) as usize;

    let mut p_points = Vec::new();
    let mut t_points = Vec::new();

    let cycles = r_peaks.len().min(q_points.len()).min(s_points.len());
    for i in 1..cycles {
        let p_start = r_peaks[i].saturating_sub(p_range);
        let p_end = q_points[i];
        if let Some(p) = best_crest(signal, &deriv, p_start, p_end) {
            p_points.push(p);
        }

        let t_start = s_points[i] + 1;
        let t_end = (r_peaks[i] + t_range).min(signal.len());
        if let Some(t) = best_crest(signal, &deriv, t_start, t_end) {
            t_points.push(t);
        }
    }

    log::debug!(
        "Located {} P and {} T crests across {} cycles",
        p_points.len(),
        t_points.len(),
        cycles
    );
    (p_points, t_points)
}

/// Highest-amplitude derivative crest in `[start, end)`
///
/// A crest at `x` requires `deriv[x - 1] > 0` and `deriv[x] < 0`, so `x`
/// is constrained to `[1, deriv.len())` regardless of the window.
fn best_crest(signal: &[f32], deriv: &[f32], start: usize, end: usize) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_value = f32::NEG_INFINITY;
    for x in start.max(1)..end.min(deriv.len()) {
        if deriv[x - 1] > 0.0 && deriv[x] < 0.0 && signal[x] > best_value {
            best = Some(x);
            best_value = signal[x];
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> DelineationConfig {
        DelineationConfig::default()
    }

    /// Place a triangular bump of the given height centered at `center`
    fn bump(signal: &mut [f32], center: usize, half_width: usize, height: f32) {
        for offset in 0..=half_width {
            let value = height * (1.0 - offset as f32 / (half_width + 1) as f32);
            if signal[center + offset].abs() < value.abs() {
                signal[center + offset] = value;
            }
            if signal[center - offset].abs() < value.abs() {
                signal[center - offset] = value;
            }
        }
    }

    #[test]
    fn test_finds_p_and_t_crests() {
        let fs = 500.0;
        let mut signal = vec![0.0f32; 2000];
        // Two beats: R at 500 and 1300; cycle 1 has a P bump before its Q
        // and a T bump after its S
        bump(&mut signal, 500, 10, 5.0);
        bump(&mut signal, 1300, 10, 5.0);
        bump(&mut signal, 1200, 15, 1.0); // P of beat 2
        bump(&mut signal, 1450, 20, 1.5); // T of beat 2
        let r = vec![500, 1300];
        let q = vec![490, 1290];
        let s = vec![510, 1310];
        let (p, t) = locate_p_t_waves(&signal, &r, &q, &s, fs, &default_config());
        assert_eq!(p, vec![1200]);
        assert_eq!(t, vec![1450]);
    }

    #[test]
    fn test_first_cycle_skipped() {
        let fs = 500.0;
        let mut signal = vec![0.0f32; 2000];
        bump(&mut signal, 500, 10, 5.0);
        bump(&mut signal, 400, 15, 1.0); // would be P of beat 1
        let r = vec![500];
        let q = vec![490];
        let s = vec![510];
        let (p, t) = locate_p_t_waves(&signal, &r, &q, &s, fs, &default_config());
        assert!(p.is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn test_amplitude_argmax_not_first_match() {
        let fs = 500.0;
        let mut signal = vec![0.0f32; 2000];
        bump(&mut signal, 1300, 10, 5.0);
        // Two crests in the P window; the later, taller one must win
        bump(&mut signal, 1150, 8, 0.5);
        bump(&mut signal, 1220, 8, 1.2);
        let r = vec![500, 1300];
        let q = vec![490, 1290];
        let s = vec![510, 1310];
        let (p, _) = locate_p_t_waves(&signal, &r, &q, &s, fs, &default_config());
        assert_eq!(p, vec![1220]);
    }

    #[test]
    fn test_no_crest_emits_nothing() {
        // Strictly increasing signal: derivative never goes negative
        let signal: Vec<f32> = (0..2000).map(|i| i as f32 * 0.01).collect();
        let r = vec![500, 1300];
        let q = vec![490, 1290];
        let s = vec![510, 1310];
        let (p, t) = locate_p_t_waves(&signal, &r, &q, &s, 500.0, &default_config());
        assert!(p.is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn test_windows_clipped_at_edges() {
        let fs = 500.0;
        let mut signal = vec![0.0f32; 700];
        bump(&mut signal, 100, 5, 5.0);
        bump(&mut signal, 650, 5, 5.0);
        let r = vec![100, 650];
        let q = vec![95, 645];
        let s = vec![105, 655];
        // T window for cycle 1 extends past the end of the signal
        let (p, t) = locate_p_t_waves(&signal, &r, &q, &s, fs, &default_config());
        for &i in p.iter().chain(&t) {
            assert!(i < signal.len());
        }
    }
}
