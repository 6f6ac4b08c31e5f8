//! Family-specific design options
//!
//! Each family has its own struct listing exactly the options it accepts.
//! Deserialization rejects unknown keys.

use serde::{Deserialize, Serialize};
use sift_dsp::{BesselNorm, OutputFormat, Prototype, Window};

use crate::request::FilterDesign;

/// Options forwarded to windowed FIR synthesis
///
/// `pass_zero` is deliberately absent: it follows from the filter type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FirOptions {
    /// Transition width (units of `fs`); selects a Kaiser window when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub window: Window,
    /// Normalize the passband gain to 1
    pub scale: bool,
}

impl Default for FirOptions {
    fn default() -> Self {
        Self {
            width: None,
            window: Window::Hamming,
            scale: true,
        }
    }
}

/// Options forwarded to analog-prototype IIR synthesis
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IirOptions {
    /// Passband ripple (dB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rp: Option<f64>,
    /// Stopband attenuation (dB)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rs: Option<f64>,
    pub ftype: Prototype,
    pub norm: BesselNorm,
    /// Representation of the result; `None` means `(b, a)`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
}

impl IirOptions {
    pub fn with_prototype(mut self, ftype: Prototype) -> Self {
        self.ftype = ftype;
        self
    }

    pub fn with_ripple(mut self, rp: f64) -> Self {
        self.rp = Some(rp);
        self
    }

    pub fn with_attenuation(mut self, rs: f64) -> Self {
        self.rs = Some(rs);
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = Some(output);
        self
    }
}

/// Options of the selected family; the variant is the `filter_design`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DesignOptions {
    Fir(FirOptions),
    Iir(IirOptions),
}

impl Default for DesignOptions {
    fn default() -> Self {
        DesignOptions::Fir(FirOptions::default())
    }
}

impl DesignOptions {
    pub fn design(&self) -> FilterDesign {
        match self {
            DesignOptions::Fir(_) => FilterDesign::Fir,
            DesignOptions::Iir(_) => FilterDesign::Iir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fir_options_from_json() {
        let opts: FirOptions =
            serde_json::from_str(r#"{"window": "hann", "scale": false}"#).unwrap();
        assert_eq!(opts.window, Window::Hann);
        assert!(!opts.scale);
        assert_eq!(opts.width, None);

        let opts: FirOptions = serde_json::from_str(r#"{"window": {"kaiser": 8.6}}"#).unwrap();
        assert_eq!(opts.window, Window::Kaiser(8.6));
        assert!(opts.scale);
    }

    #[test]
    fn test_fir_options_reject_unknown_keys() {
        let result: Result<FirOptions, _> = serde_json::from_str(r#"{"rp": 1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_iir_options_from_json() {
        let json = r#"{"ftype": "ellip", "rp": 0.5, "rs": 60, "output": "sos"}"#;
        let opts: IirOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.ftype, Prototype::Ellip);
        assert_eq!(opts.rp, Some(0.5));
        assert_eq!(opts.rs, Some(60.0));
        assert_eq!(opts.output, Some(OutputFormat::Sos));

        let aliased: IirOptions = serde_json::from_str(r#"{"ftype": "butterworth"}"#).unwrap();
        assert_eq!(aliased.ftype, Prototype::Butter);
    }

    #[test]
    fn test_iir_output_unset_by_default() {
        let opts: IirOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.output, None);
        assert_eq!(opts.ftype, Prototype::Butter);
    }

    #[test]
    fn test_iir_options_reject_unknown_keys() {
        let result: Result<IirOptions, _> = serde_json::from_str(r#"{"window": "hann"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_design_options_tag() {
        assert_eq!(DesignOptions::default().design(), FilterDesign::Fir);
        assert_eq!(
            DesignOptions::Iir(IirOptions::default()).design(),
            FilterDesign::Iir
        );
    }
}
