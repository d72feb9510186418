//! R-peak detection
//!
//! Finds the dominant positive deflection of each heartbeat as a local
//! maximum subject to a minimum horizontal spacing and a minimum height.
//! Plateaus of equal samples count as a single maximum at their midpoint.
//! An empty result is valid; a flat or sub-threshold channel simply has no
//! detectable beats.

use crate::config::DelineationConfig;

/// Detect R peaks in a conditioned channel
///
/// Spacing and height constraints come from the configuration:
/// - minimum spacing = `sample_rate / min_distance_divisor` samples
/// - minimum height = `mean(signal) + height_std_multiplier * stddev(signal)`
///
/// # Returns
///
/// Strictly increasing sample indices, one per detected beat. Empty when
/// nothing qualifies.
pub fn detect_r_peaks(signal: &[f32], sample_rate: f32, config: &DelineationConfig) -> Vec<usize> {
    let distance = (sample_rate / config.min_distance_divisor) as usize;
    let (mean, std) = mean_std(signal);
    let height = mean + config.height_std_multiplier * std;

    log::debug!(
        "R-peak detection: {} samples, min height {:.4}, min distance {}",
        signal.len(),
        height,
        distance
    );

    let candidates = local_maxima(signal);
    let peaks: Vec<usize> = candidates
        .into_iter()
        .filter(|&i| signal[i] >= height)
        .collect();
    let peaks = enforce_min_distance(&peaks, signal, distance);

    log::debug!("Found {} R peaks", peaks.len());
    peaks
}

/// Mean and population standard deviation, accumulated in f64
fn mean_std(signal: &[f32]) -> (f32, f32) {
    if signal.is_empty() {
        return (0.0, 0.0);
    }
    let n = signal.len() as f64;
    let mean: f64 = signal.iter().map(|&v| v as f64).sum::<f64>() / n;
    let var: f64 = signal
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean as f32, var.sqrt() as f32)
}

/// All interior local maxima, plateaus resolved to their midpoint
fn local_maxima(signal: &[f32]) -> Vec<usize> {
    let mut maxima = Vec::new();
    if signal.len() < 3 {
        return maxima;
    }
    let last = signal.len() - 1;
    let mut i = 1;
    while i < last {
        if signal[i - 1] < signal[i] {
            let mut ahead = i + 1;
            while ahead < last && signal[ahead] == signal[i] {
                ahead += 1;
            }
            if signal[ahead] < signal[i] {
                maxima.push((i + ahead - 1) / 2);
                i = ahead;
            }
        }
        i += 1;
    }
    maxima
}

/// Drop peaks closer than `distance` to a taller kept peak
///
/// Peaks are visited tallest first; a visited peak that has not already
/// been removed suppresses every smaller peak within `distance` samples on
/// either side. Output stays in ascending index order.
fn enforce_min_distance(peaks: &[usize], signal: &[f32], distance: usize) -> Vec<usize> {
    if distance <= 1 || peaks.len() < 2 {
        return peaks.to_vec();
    }

    let mut order: Vec<usize> = (0..peaks.len()).collect();
    order.sort_by(|&a, &b| {
        signal[peaks[a]]
            .partial_cmp(&signal[peaks[b]])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut keep = vec![true; peaks.len()];
    for &j in order.iter().rev() {
        if !keep[j] {
            continue;
        }
        let mut k = j;
        while k > 0 {
            k -= 1;
            if peaks[j] - peaks[k] >= distance {
                break;
            }
            keep[k] = false;
        }
        let mut k = j + 1;
        while k < peaks.len() {
            if peaks[k] - peaks[j] >= distance {
                break;
            }
            keep[k] = false;
            k += 1;
        }
    }

    peaks
        .iter()
        .zip(keep)
        .filter_map(|(&p, kept)| kept.then_some(p))
        .collect()
}
