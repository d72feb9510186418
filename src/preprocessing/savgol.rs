//! Savitzky-Golay smoothing
//!
//! Local least-squares polynomial regression over a sliding window. Unlike
//! a moving average, the polynomial fit preserves the height and width of
//! narrow features such as the QRS complex, which is why it follows the
//! band-pass filter in the conditioning chain.
//!
//! Interior samples use the fixed convolution kernel derived from the
//! least-squares fit at the window center; the first and last half-windows
//! are replaced by a polynomial fitted to the first/last full window, so
//! the edges are smoothed without shortening the signal.

use super::linalg;
use crate::error::DelineationError;

/// Apply a Savitzky-Golay filter to a signal
///
/// # Arguments
///
/// * `x` - Input signal
/// * `window_length` - Window length in samples; must be odd and no longer
///   than the signal
/// * `polyorder` - Order of the fitted polynomial; must be less than
///   `window_length`
///
/// # Errors
///
/// - `WindowTooLarge` if `window_length > x.len()`
/// - `InvalidInput` if the window is even or the polynomial order is not
///   smaller than the window
pub fn savgol_filter(
    x: &[f32],
    window_length: usize,
    polyorder: usize,
) -> Result<Vec<f32>, DelineationError> {
    if window_length > x.len() {
        return Err(DelineationError::WindowTooLarge {
            window: window_length,
            len: x.len(),
        });
    }
    if window_length % 2 == 0 || window_length == 0 {
        return Err(DelineationError::InvalidInput(format!(
            "Savitzky-Golay window must be odd, got {}",
            window_length
        )));
    }
    if polyorder >= window_length {
        return Err(DelineationError::InvalidInput(format!(
            "Polynomial order {} must be less than the window length {}",
            polyorder, window_length
        )));
    }

    let n = x.len();
    let half = window_length / 2;
    let kernel = center_kernel(window_length, polyorder).ok_or_else(|| {
        DelineationError::InvalidInput("Savitzky-Golay design system is singular".to_string())
    })?;

    let x64: Vec<f64> = x.iter().map(|&v| v as f64).collect();
    let mut out = vec![0.0f64; n];

    // Interior: fixed kernel convolution
    for i in half..n - half {
        let mut acc = 0.0;
        for (j, &k) in kernel.iter().enumerate() {
            acc += k * x64[i - half + j];
        }
        out[i] = acc;
    }

    // Edges: fit a polynomial to the first/last full window and evaluate it
    // over the half-window the kernel cannot reach
    let head = polyfit(&x64[..window_length], polyorder).ok_or_else(|| {
        DelineationError::InvalidInput("Savitzky-Golay edge fit is singular".to_string())
    })?;
    for (i, slot) in out.iter_mut().take(half).enumerate() {
        *slot = polyval(&head, i as f64);
    }

    let tail = polyfit(&x64[n - window_length..], polyorder).ok_or_else(|| {
        DelineationError::InvalidInput("Savitzky-Golay edge fit is singular".to_string())
    })?;
    for i in n - half..n {
        out[i] = polyval(&tail, (i - (n - window_length)) as f64);
    }

    Ok(out.into_iter().map(|v| v as f32).collect())
}

/// Least-squares kernel evaluating the fitted polynomial at the window center
///
/// Row zero of `(A^T A)^-1 A^T` for the Vandermonde matrix over positions
/// `-half..=half`.
fn center_kernel(window_length: usize, polyorder: usize) -> Option<Vec<f64>> {
    let half = (window_length / 2) as i64;
    let terms = polyorder + 1;

    // Normal equations G m = e0, G[r][c] = sum_i t_i^(r+c)
    let mut gram = vec![vec![0.0; terms]; terms];
    for r in 0..terms {
        for c in 0..terms {
            let mut sum = 0.0;
            for t in -half..=half {
                sum += (t as f64).powi((r + c) as i32);
            }
            gram[r][c] = sum;
        }
    }
    let mut rhs = vec![0.0; terms];
    rhs[0] = 1.0;
    let m = linalg::solve(gram, rhs)?;

    let kernel = (-half..=half)
        .map(|t| {
            let mut acc = 0.0;
            let mut power = 1.0;
            for &coef in &m {
                acc += coef * power;
                power *= t as f64;
            }
            acc
        })
        .collect();
    Some(kernel)
}

/// Least-squares polynomial fit over positions `0..y.len()`
///
/// Returns coefficients lowest power first.
fn polyfit(y: &[f64], polyorder: usize) -> Option<Vec<f64>> {
    let terms = polyorder + 1;
    let mut gram = vec![vec![0.0; terms]; terms];
    let mut rhs = vec![0.0; terms];
    for (i, &v) in y.iter().enumerate() {
        let t = i as f64;
        let mut powers = vec![1.0; 2 * terms - 1];
        for k in 1..powers.len() {
            powers[k] = powers[k - 1] * t;
        }
        for r in 0..terms {
            for c in 0..terms {
                gram[r][c] += powers[r + c];
            }
            rhs[r] += v * powers[r];
        }
    }
    linalg::solve(gram, rhs)
}

fn polyval(coeffs: &[f64], t: f64) -> f64 {
    let mut acc = 0.0;
    for &c in coeffs.iter().rev() {
        acc = acc * t + c;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sums_to_one() {
        let kernel = center_kernel(51, 3).unwrap();
        let sum: f64 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9, "kernel sum {}", sum);
    }

    #[test]
    fn test_preserves_cubic_exactly() {
        // A polynomial of the fit order passes through unchanged
        let x: Vec<f32> = (0..200)
            .map(|i| {
                let t = i as f32 * 0.05;
                0.5 * t * t * t - t * t + 2.0 * t - 1.0
            })
            .collect();
        let y = savgol_filter(&x, 11, 3).unwrap();
        for (a, b) in x.iter().zip(&y) {
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_smooths_alternating_noise() {
        let x: Vec<f32> = (0..300)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let y = savgol_filter(&x, 51, 3).unwrap();
        let peak = y[60..240].iter().fold(0.0f32, |m, &v| m.max(v.abs()));
        assert!(peak < 0.3, "alternating noise not suppressed: {}", peak);
    }

    #[test]
    fn test_output_length_matches_input() {
        let x = vec![1.0f32; 60];
        let y = savgol_filter(&x, 51, 3).unwrap();
        assert_eq!(y.len(), 60);
    }

    #[test]
    fn test_window_too_large() {
        let x = vec![1.0f32; 40];
        match savgol_filter(&x, 51, 3) {
            Err(DelineationError::WindowTooLarge { window: 51, len: 40 }) => {}
            other => panic!("expected WindowTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_even_window_rejected() {
        let x = vec![1.0f32; 100];
        assert!(matches!(
            savgol_filter(&x, 50, 3),
            Err(DelineationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_window_equal_to_signal_length() {
        let x: Vec<f32> = (0..51).map(|i| (i as f32 * 0.3).sin()).collect();
        let y = savgol_filter(&x, 51, 3).unwrap();
        assert_eq!(y.len(), 51);
        assert!(y.iter().all(|v| v.is_finite()));
    }
}
