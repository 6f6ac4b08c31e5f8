//! DSP Error Types

use thiserror::Error;

/// Errors that can occur while synthesizing filter coefficients
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DspError {
    #[error("Number of taps must be at least 1, got {0}")]
    InvalidTaps(usize),

    #[error("At least one cutoff frequency must be given")]
    EmptyCutoff,

    #[error("Cutoff frequency {value} must lie strictly between 0 and Nyquist ({nyquist})")]
    CutoffOutOfRange { value: f64, nyquist: f64 },

    #[error("Cutoff frequencies must be strictly increasing")]
    CutoffNotIncreasing,

    #[error("A filter with an even number of taps ({0}) must have zero response at Nyquist")]
    EvenTapsPassNyquist(usize),

    #[error("Filter order must be positive, got {0}")]
    InvalidOrder(usize),

    #[error("Filter order {0} is too large")]
    OrderTooLarge(usize),

    #[error("Band filters double the prototype order, so the order must be even, got {0}")]
    OddBandOrder(usize),

    #[error("{band} filter expects {expected} band edge(s), got {got}")]
    BandEdgeCount {
        band: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("Parameter '{0}' is required for this prototype")]
    MissingParameter(&'static str),

    #[error("Invalid value {value} for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Cannot design a filter with the given specification: {0}")]
    InfeasibleSpecification(String),

    #[error("Filter gain at the scaling frequency is zero, cannot normalize")]
    DegenerateGain,

    #[error("Complex root {re}{im:+}j has no conjugate partner")]
    UnpairedRoot { re: f64, im: f64 },
}

/// Result type alias for DSP operations
pub type DspResult<T> = Result<T, DspError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DspError::InvalidTaps(0);
        assert!(err.to_string().contains('0'));

        let err = DspError::CutoffOutOfRange {
            value: 0.7,
            nyquist: 0.5,
        };
        assert!(err.to_string().contains("0.7"));
        assert!(err.to_string().contains("0.5"));

        let err = DspError::BandEdgeCount {
            band: "bandpass",
            expected: 2,
            got: 1,
        };
        assert!(err.to_string().starts_with("bandpass"));
    }

    #[test]
    fn test_unpaired_root_display() {
        let err = DspError::UnpairedRoot { re: 0.5, im: -0.25 };
        assert!(err.to_string().contains("0.5-0.25j"));
    }

    #[test]
    fn test_missing_parameter_names_it() {
        let err = DspError::MissingParameter("rp");
        assert!(err.to_string().contains("'rp'"));
    }
}
