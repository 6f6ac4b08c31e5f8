//! Filter Request Model
//!
//! The typed form of a design request. Family and band type are closed
//! enumerations; strings are only parsed at the boundary (see
//! [`FilterSpec`](crate::FilterSpec)).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sift_dsp::BandType;

use crate::error::DesignError;
use crate::options::{DesignOptions, FirOptions, IirOptions};

/// Band shape of the requested filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Lowpass,
    Highpass,
    #[default]
    Bandpass,
    Bandstop,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [
        FilterType::Lowpass,
        FilterType::Highpass,
        FilterType::Bandpass,
        FilterType::Bandstop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Lowpass => "lowpass",
            FilterType::Highpass => "highpass",
            FilterType::Bandpass => "bandpass",
            FilterType::Bandstop => "bandstop",
        }
    }

    /// Whether a windowed FIR of this type passes zero frequency
    pub fn pass_zero(self) -> bool {
        match self {
            FilterType::Bandpass => false,
            FilterType::Bandstop => true,
            FilterType::Highpass => false,
            FilterType::Lowpass => true,
        }
    }

    /// Band transformation used by IIR synthesis
    pub fn band_type(self) -> BandType {
        match self {
            FilterType::Lowpass => BandType::Lowpass,
            FilterType::Highpass => BandType::Highpass,
            FilterType::Bandpass => BandType::Bandpass,
            FilterType::Bandstop => BandType::Bandstop,
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DesignError::InvalidFilterType(s.to_string()))
    }
}

/// Synthesis family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDesign {
    /// Windowed-sinc finite impulse response
    #[default]
    Fir,
    /// Analog prototype + bilinear transform
    Iir,
}

impl FilterDesign {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterDesign::Fir => "fir",
            FilterDesign::Iir => "iir",
        }
    }
}

impl fmt::Display for FilterDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterDesign {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fir" => Ok(FilterDesign::Fir),
            "iir" => Ok(FilterDesign::Iir),
            other => Err(DesignError::InvalidFilterDesign(other.to_string())),
        }
    }
}

/// A single cutoff or a sequence of band edges, in the units of `fs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Frequencies {
    Single(f64),
    Bands(Vec<f64>),
}

impl Frequencies {
    pub fn as_slice(&self) -> &[f64] {
        match self {
            Frequencies::Single(f) => std::slice::from_ref(f),
            Frequencies::Bands(edges) => edges,
        }
    }
}

impl From<f64> for Frequencies {
    fn from(f: f64) -> Self {
        Frequencies::Single(f)
    }
}

impl From<Vec<f64>> for Frequencies {
    fn from(edges: Vec<f64>) -> Self {
        Frequencies::Bands(edges)
    }
}

impl From<[f64; 2]> for Frequencies {
    fn from(edges: [f64; 2]) -> Self {
        Frequencies::Bands(edges.to_vec())
    }
}

/// Everything the designer needs for one filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterRequest {
    pub frequencies: Frequencies,
    /// FIR: taps - 1. IIR: order of the digital filter.
    pub order: usize,
    pub fs: f64,
    pub filter_type: FilterType,
    /// Family-specific options; the variant selects the family
    pub options: DesignOptions,
}

impl FilterRequest {
    /// Bandpass FIR request at fs = 1.0 with default options
    pub fn new(frequencies: impl Into<Frequencies>, order: usize) -> Self {
        Self {
            frequencies: frequencies.into(),
            order,
            fs: 1.0,
            filter_type: FilterType::default(),
            options: DesignOptions::default(),
        }
    }

    pub fn with_fs(mut self, fs: f64) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    pub fn with_fir(mut self, options: FirOptions) -> Self {
        self.options = DesignOptions::Fir(options);
        self
    }

    pub fn with_iir(mut self, options: IirOptions) -> Self {
        self.options = DesignOptions::Iir(options);
        self
    }

    pub fn filter_design(&self) -> FilterDesign {
        self.options.design()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_zero_table() {
        assert!(!FilterType::Bandpass.pass_zero());
        assert!(FilterType::Bandstop.pass_zero());
        assert!(!FilterType::Highpass.pass_zero());
        assert!(FilterType::Lowpass.pass_zero());
    }

    #[test]
    fn test_filter_type_parsing() {
        for t in FilterType::ALL {
            assert_eq!(t.as_str().parse::<FilterType>().unwrap(), t);
        }
        assert!(matches!(
            "low-pass".parse::<FilterType>(),
            Err(DesignError::InvalidFilterType(s)) if s == "low-pass"
        ));
        // Matching is exact
        assert!("Lowpass".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_filter_design_parsing() {
        assert_eq!("fir".parse::<FilterDesign>().unwrap(), FilterDesign::Fir);
        assert_eq!("iir".parse::<FilterDesign>().unwrap(), FilterDesign::Iir);
        assert!(matches!(
            "fft".parse::<FilterDesign>(),
            Err(DesignError::InvalidFilterDesign(_))
        ));
    }

    #[test]
    fn test_frequencies_from_json() {
        let single: Frequencies = serde_json::from_str("0.2").unwrap();
        assert_eq!(single.as_slice(), &[0.2]);
        let bands: Frequencies = serde_json::from_str("[8, 12]").unwrap();
        assert_eq!(bands.as_slice(), &[8.0, 12.0]);
    }

    #[test]
    fn test_request_defaults_and_builders() {
        let req = FilterRequest::new([8.0, 12.0], 4);
        assert_eq!(req.fs, 1.0);
        assert_eq!(req.filter_type, FilterType::Bandpass);
        assert_eq!(req.filter_design(), FilterDesign::Fir);

        let req = req
            .with_fs(128.0)
            .with_filter_type(FilterType::Bandstop)
            .with_iir(IirOptions::default());
        assert_eq!(req.fs, 128.0);
        assert_eq!(req.filter_type, FilterType::Bandstop);
        assert_eq!(req.filter_design(), FilterDesign::Iir);
    }
}
