//! Q and S point location
//!
//! The Q and S points are the local minima immediately before and after
//! each R peak, bounding the QRS complex. Each is found as the minimum
//! value inside a half-window around the peak, clipped to the signal.

use crate::config::DelineationConfig;

/// Locate the Q and S points flanking each R peak
///
/// With `W = qs_window_seconds * sample_rate` samples:
/// - Q = argmin over `[r - W, r)`, clipped to the signal start
/// - S = argmin over `(r, r + W]`, clipped to the signal end
///
/// Exactly one Q and one S index is produced per R peak, so all three
/// sequences stay the same length. When a window is empty because the R
/// peak sits at a signal edge, the R index itself is used; indices stay in
/// bounds and downstream alignment is unaffected.
pub fn locate_q_s_points(
    signal: &[f32],
    r_peaks: &[usize],
    sample_rate: f32,
    config: &DelineationConfig,
) -> (Vec<usize>, Vec<usize>) {
    let window = (sample_rate * config.qs_window_seconds) as usize;
    let mut q_points = Vec::with_capacity(r_peaks.len());
    let mut s_points = Vec::with_capacity(r_peaks.len());

    for &r in r_peaks {
        let q_start = r.saturating_sub(window);
        q_points.push(argmin_range(signal, q_start, r).unwrap_or(r));

        let s_end = (r + window).min(signal.len().saturating_sub(1));
        s_points.push(argmin_range(signal, r + 1, s_end + 1).unwrap_or(r));
    }

    log::debug!(
        "Located {} Q and {} S points for {} R peaks",
        q_points.len(),
        s_points.len(),
        r_peaks.len()
    );
    (q_points, s_points)
}

/// Index of the minimum value in `signal[start..end)`, or `None` if empty
fn argmin_range(signal: &[f32], start: usize, end: usize) -> Option<usize> {
    let end = end.min(signal.len());
    if start >= end {
        return None;
    }
    let mut best = start;
    for i in start + 1..end {
        if signal[i] < signal[best] {
            best = i;
        }
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> DelineationConfig {
        DelineationConfig::default()
    }

    #[test]
    fn test_locates_flanking_minima() {
        // Dip at 190, peak at 200, dip at 212
        let mut signal = vec![0.0f32; 500];
        signal[190] = -1.0;
        signal[200] = 5.0;
        signal[212] = -2.0;
        let (q, s) = locate_q_s_points(&signal, &[200], 500.0, &default_config());
        assert_eq!(q, vec![190]);
        assert_eq!(s, vec![212]);
    }

    #[test]
    fn test_one_output_per_peak() {
        let signal = vec![0.0f32; 2000];
        let r = vec![300, 700, 1100, 1500];
        let (q, s) = locate_q_s_points(&signal, &r, 500.0, &default_config());
        assert_eq!(q.len(), r.len());
        assert_eq!(s.len(), r.len());
    }

    #[test]
    fn test_window_clipped_at_signal_start() {
        let mut signal = vec![0.0f32; 500];
        signal[3] = -1.0;
        signal[10] = 5.0;
        // Window is 40 samples at 500 Hz but only 10 are available
        let (q, _) = locate_q_s_points(&signal, &[10], 500.0, &default_config());
        assert_eq!(q, vec![3]);
    }

    #[test]
    fn test_peak_at_signal_edges() {
        let signal = vec![1.0f32; 100];
        let (q, s) = locate_q_s_points(&signal, &[0, 99], 500.0, &default_config());
        // Empty windows degrade to the peak index itself
        assert_eq!(q[0], 0);
        assert_eq!(s[1], 99);
        assert!(q.iter().all(|&i| i < signal.len()));
        assert!(s.iter().all(|&i| i < signal.len()));
    }

    #[test]
    fn test_no_peaks() {
        let signal = vec![0.0f32; 100];
        let (q, s) = locate_q_s_points(&signal, &[], 500.0, &default_config());
        assert!(q.is_empty());
        assert!(s.is_empty());
    }
}
