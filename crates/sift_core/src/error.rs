//! Designer Error Types

use sift_dsp::DspError;
use thiserror::Error;

/// Errors that can occur while turning a request into filter coefficients
#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Invalid filter type '{0}', expected one of: lowpass, highpass, bandpass, bandstop")]
    InvalidFilterType(String),

    #[error("Invalid filter design '{0}', expected one of: fir, iir")]
    InvalidFilterDesign(String),

    #[error("pass_zero is derived from the filter type and cannot be set for FIR designs")]
    PassZeroOverride,

    #[error("Invalid {design} options: {message}")]
    InvalidOptions {
        design: &'static str,
        message: String,
    },

    #[error("Unknown band preset '{0}'")]
    UnknownPreset(String),

    /// Raised by the synthesis routines, passed through untouched
    #[error(transparent)]
    Synthesis(#[from] DspError),

    #[error("Failed to read filter specification: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed filter specification: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for designer operations
pub type DesignResult<T> = Result<T, DesignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DesignError::InvalidFilterType("lowpas".into());
        assert!(err.to_string().contains("'lowpas'"));

        let err = DesignError::InvalidFilterDesign("fri".into());
        assert!(err.to_string().contains("fir, iir"));

        let err = DesignError::InvalidOptions {
            design: "iir",
            message: "unknown field `window`".into(),
        };
        assert!(err.to_string().starts_with("Invalid iir options"));
    }

    #[test]
    fn test_synthesis_error_is_transparent() {
        let dsp_err = DspError::CutoffNotIncreasing;
        let message = dsp_err.to_string();
        let err: DesignError = dsp_err.into();
        assert!(matches!(err, DesignError::Synthesis(_)));
        assert_eq!(err.to_string(), message);
    }
}
