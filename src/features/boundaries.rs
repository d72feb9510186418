//! Wave onset and offset boundary search
//!
//! Finds the start or end boundary of a wave near its crest. The policy
//! here is first-match: scanning away from the reference point, the first
//! sample whose derivative neighborhood matches the boundary pattern wins.
//! This is deliberately different from the amplitude-argmax policy of the
//! P/T crest search and the two must not be unified.
//!
//! Boundary patterns on the first derivative at candidate `j`:
//! - onset: `deriv[j-2] > 0`, `deriv[j-1] > 0`, `deriv[j+1] < 0`, `deriv[j+2] < 0`
//! - offset: the mirrored signs
//!
//! Both scan directions guard the array bounds and give up without a match
//! rather than read out of range, so points sitting near a signal edge are
//! simply dropped for that cycle.

use super::first_derivative;

/// Which boundary of a wave to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// Start of the wave, before the reference point
    Onset,
    /// End of the wave, after the reference point
    Offset,
}

/// Find onset or offset boundaries for a sequence of fiducial points
///
/// For each point `p`, scans up to `search_seconds * sample_rate` samples
/// away from `p` (backward for onsets, forward for offsets) and keeps the
/// first qualifying candidate. Points with no qualifying candidate emit
/// nothing, so the result may be shorter than `points`.
pub fn find_boundaries(
    signal: &[f32],
    points: &[usize],
    sample_rate: f32,
    kind: BoundaryKind,
    search_seconds: f32,
) -> Vec<usize> {
    let deriv = first_derivative(signal);
    let range = (search_seconds * sample_rate) as usize;
    let mut boundaries = Vec::new();

    for &p in points {
        let found = match kind {
            BoundaryKind::Onset => scan_backward(&deriv, p, range),
            BoundaryKind::Offset => scan_forward(&deriv, p, range, signal.len()),
        };
        if let Some(j) = found {
            boundaries.push(j);
        }
    }

    log::debug!(
        "Found {} {:?} boundaries for {} points",
        boundaries.len(),
        kind,
        points.len()
    );
    boundaries
}

/// First onset candidate scanning backward from `p - 2`
///
/// The scan floor is `p - range`, exclusive. Candidates needing derivative
/// samples outside `[0, deriv.len())` are skipped.
fn scan_backward(deriv: &[f32], p: usize, range: usize) -> Option<usize> {
    if p < 2 || deriv.len() < 3 {
        return None;
    }
    let floor = p.saturating_sub(range);
    let start = (p - 2).min(deriv.len() - 3);
    let mut j = start;
    while j > floor {
        if j < 2 {
            break;
        }
        if deriv[j - 1] > 0.0
            && deriv[j - 2] > 0.0
            && deriv[j + 1] < 0.0
            && deriv[j + 2] < 0.0
        {
            return Some(j);
        }
        j -= 1;
    }
    None
}

/// First offset candidate scanning forward from `p + 2`
///
/// The scan ceiling is `min(p + range, len - 1)`, exclusive. Candidates
/// needing derivative samples past the end terminate the scan.
fn scan_forward(deriv: &[f32], p: usize, range: usize, len: usize) -> Option<usize> {
    let ceiling = (p + range).min(len.saturating_sub(1));
    for j in p + 2..ceiling {
        if j < 2 || j + 2 >= deriv.len() {
            break;
        }
        if deriv[j - 1] < 0.0
            && deriv[j - 2] < 0.0
            && deriv[j + 1] > 0.0
            && deriv[j + 2] > 0.0
        {
            return Some(j);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangle wave rising to `crest` then falling back; the onset pattern
    /// appears right below the crest and the offset pattern right above the
    /// trailing valley
    fn triangle(len: usize, crest: usize, half_width: usize) -> Vec<f32> {
        let mut signal = vec![0.0f32; len];
        for offset in 0..=half_width {
            let value = 1.0 - offset as f32 / (half_width + 1) as f32;
            signal[crest + offset] = value;
            signal[crest - offset] = value;
        }
        signal
    }

    #[test]
    fn test_onset_found_below_crest() {
        let signal = triangle(1000, 500, 30);
        let found = find_boundaries(&signal, &[510], 500.0, BoundaryKind::Onset, 0.1);
        // First j scanning back from 508 with two rising samples behind and
        // two falling ahead: the crest itself
        assert_eq!(found, vec![500]);
    }

    #[test]
    fn test_offset_found_after_valley() {
        // Falling edge bottoms out at 530 and rises immediately after
        let mut signal = triangle(1000, 500, 30);
        let bottom = signal[530];
        for i in 531..700 {
            signal[i] = bottom + (i - 530) as f32 * 0.01;
        }
        let found = find_boundaries(&signal, &[500], 500.0, BoundaryKind::Offset, 0.2);
        assert_eq!(found, vec![530]);
    }

    #[test]
    fn test_first_match_policy() {
        // Two valleys after the point; the nearer one must win even though
        // the farther one is deeper
        let mut signal = vec![0.0f32; 1000];
        let shape = [0.0, -0.5, -0.9, -1.2, -0.9, -0.5, 0.0];
        for (offset, &value) in shape.iter().enumerate() {
            signal[520 + offset] += value;
            signal[560 + offset] += value * 3.0;
        }
        let found = find_boundaries(&signal, &[500], 500.0, BoundaryKind::Offset, 0.2);
        assert_eq!(found, vec![523]);
    }

    #[test]
    fn test_no_match_emits_nothing() {
        // Monotone signal has no boundary pattern
        let signal: Vec<f32> = (0..1000).map(|i| i as f32 * 0.01).collect();
        let onsets = find_boundaries(&signal, &[500], 500.0, BoundaryKind::Onset, 0.1);
        let offsets = find_boundaries(&signal, &[500], 500.0, BoundaryKind::Offset, 0.2);
        assert!(onsets.is_empty());
        assert!(offsets.is_empty());
    }

    #[test]
    fn test_points_near_edges_do_not_read_out_of_range() {
        let signal = triangle(200, 100, 30);
        let points = vec![0, 1, 2, 198, 199];
        let onsets = find_boundaries(&signal, &points, 500.0, BoundaryKind::Onset, 0.1);
        let offsets = find_boundaries(&signal, &points, 500.0, BoundaryKind::Offset, 0.2);
        for &j in onsets.iter().chain(&offsets) {
            assert!(j < signal.len());
        }
    }

    #[test]
    fn test_result_may_be_shorter_than_input() {
        let signal = triangle(1000, 500, 30);
        // 510 has an onset behind it; 900 sits on a flat stretch
        let found = find_boundaries(&signal, &[510, 900], 500.0, BoundaryKind::Onset, 0.1);
        assert_eq!(found.len(), 1);
    }
}
