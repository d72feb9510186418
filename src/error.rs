//! Error types for the ECG delineation pipeline

use std::fmt;

/// Errors that can occur during channel delineation
///
/// Both filter preconditions are checked before any detection work begins
/// on a channel, so a failed channel produces no partial results. All other
/// edge conditions (no R peaks, no qualifying P/T/onset/offset candidate)
/// degrade to missing data instead of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelineationError {
    /// Invalid input parameters
    InvalidInput(String),

    /// Signal is too short for zero-phase filtering
    ///
    /// The forward-backward filter extends the signal by `padlen` samples
    /// on each side, so the signal must be strictly longer than `padlen`.
    SignalTooShort {
        /// Signal length in samples
        len: usize,
        /// Required pad length (3x the larger filter coefficient count)
        padlen: usize,
    },

    /// Smoothing window exceeds the signal length
    WindowTooLarge {
        /// Configured window length in samples
        window: usize,
        /// Signal length in samples
        len: usize,
    },
}

impl fmt::Display for DelineationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelineationError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DelineationError::SignalTooShort { len, padlen } => write!(
                f,
                "Signal length {} must be greater than the filter pad length {}",
                len, padlen
            ),
            DelineationError::WindowTooLarge { window, len } => write!(
                f,
                "Smoothing window {} is too large for the signal length {}",
                window, len
            ),
        }
    }
}

impl std::error::Error for DelineationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_signal_too_short() {
        let err = DelineationError::SignalTooShort { len: 10, padlen: 27 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("27"));
    }

    #[test]
    fn test_display_window_too_large() {
        let err = DelineationError::WindowTooLarge { window: 51, len: 40 };
        assert!(err.to_string().contains("51"));
    }
}
