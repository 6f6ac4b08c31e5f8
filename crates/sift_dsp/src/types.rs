//! Filter representations
//!
//! A designed filter is returned in one of three equivalent forms:
//! transfer function `(b, a)`, zeros/poles/gain, or second-order sections.

use biquad::Coefficients;
use num_complex::Complex64;
use sci_rs::signal::filter::design::ZpkFormatFilter;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::conversions::{sos2tf, zpk2sos, zpk2tf};
use crate::error::DspResult;

/// Band transformation applied to a lowpass prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandType {
    Lowpass,
    Highpass,
    Bandpass,
    Bandstop,
}

impl BandType {
    /// Number of band edges this band type is defined by
    pub fn edge_count(self) -> usize {
        match self {
            BandType::Lowpass | BandType::Highpass => 1,
            BandType::Bandpass | BandType::Bandstop => 2,
        }
    }

    /// Lowercase name, as used in error messages
    pub fn name(self) -> &'static str {
        match self {
            BandType::Lowpass => "lowpass",
            BandType::Highpass => "highpass",
            BandType::Bandpass => "bandpass",
            BandType::Bandstop => "bandstop",
        }
    }
}

/// Representation requested from IIR synthesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Numerator / denominator polynomials
    #[default]
    Ba,
    /// Zeros, poles and gain
    Zpk,
    /// Cascaded second-order sections
    Sos,
}

/// Transfer function H(z) = B(z) / A(z), coefficients in descending powers of z
#[derive(Debug, Clone, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

impl TransferFunction {
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Self {
        Self { b, a }
    }

    /// Feed-forward filter: the denominator is the scalar 1
    pub fn fir(b: Vec<f64>) -> Self {
        Self { b, a: vec![1.0] }
    }

    pub fn is_fir(&self) -> bool {
        self.a.len() == 1
    }

    /// Complex response at `freq`, in the same units as `fs`
    pub fn response_at(&self, freq: f64, fs: f64) -> Complex64 {
        let omega = 2.0 * PI * freq / fs;
        polyval_z(&self.b, omega) / polyval_z(&self.a, omega)
    }

    /// Gain at zero frequency: sum(b) / sum(a)
    pub fn dc_gain(&self) -> f64 {
        self.b.iter().sum::<f64>() / self.a.iter().sum::<f64>()
    }
}

/// Evaluate Σ c_k e^{-jωk}
fn polyval_z(coeffs: &[f64], omega: f64) -> Complex64 {
    coeffs
        .iter()
        .enumerate()
        .fold(Complex64::new(0.0, 0.0), |acc, (k, &c)| {
            acc + Complex64::from_polar(c, -omega * k as f64)
        })
}

/// Zeros, poles and gain
#[derive(Debug, Clone, PartialEq)]
pub struct ZpkFilter {
    pub zeros: Vec<Complex64>,
    pub poles: Vec<Complex64>,
    pub gain: f64,
}

impl ZpkFilter {
    pub fn new(zeros: Vec<Complex64>, poles: Vec<Complex64>, gain: f64) -> Self {
        Self { zeros, poles, gain }
    }

    /// Excess of poles over zeros
    pub fn degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }

    pub fn to_tf(&self) -> TransferFunction {
        zpk2tf(self)
    }

    pub fn to_sos(&self) -> DspResult<SosFilter> {
        zpk2sos(self)
    }
}

impl From<&ZpkFilter> for ZpkFormatFilter<f64> {
    fn from(zpk: &ZpkFilter) -> Self {
        ZpkFormatFilter::new(zpk.zeros.clone(), zpk.poles.clone(), zpk.gain)
    }
}

impl From<ZpkFormatFilter<f64>> for ZpkFilter {
    fn from(zpk: ZpkFormatFilter<f64>) -> Self {
        ZpkFilter::new(zpk.z, zpk.p, zpk.k)
    }
}

/// Cascade of second-order sections, each normalized so that a0 = 1
///
/// The overall gain is folded into the numerator of the first section.
#[derive(Debug, Clone)]
pub struct SosFilter {
    pub sections: Vec<Coefficients<f64>>,
}

impl SosFilter {
    pub fn new(sections: Vec<Coefficients<f64>>) -> Self {
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections as `[b0, b1, b2, a0, a1, a2]` rows
    pub fn to_rows(&self) -> Vec<[f64; 6]> {
        self.sections
            .iter()
            .map(|s| [s.b0, s.b1, s.b2, 1.0, s.a1, s.a2])
            .collect()
    }

    pub fn to_tf(&self) -> TransferFunction {
        sos2tf(self)
    }
}

/// Designed filter in the representation the caller asked for
#[derive(Debug, Clone)]
pub enum FilterOutput {
    Ba(TransferFunction),
    Zpk(ZpkFilter),
    Sos(SosFilter),
}

impl FilterOutput {
    pub fn format(&self) -> OutputFormat {
        match self {
            FilterOutput::Ba(_) => OutputFormat::Ba,
            FilterOutput::Zpk(_) => OutputFormat::Zpk,
            FilterOutput::Sos(_) => OutputFormat::Sos,
        }
    }

    /// Get as transfer function, if that's the format
    pub fn as_ba(&self) -> Option<&TransferFunction> {
        match self {
            FilterOutput::Ba(tf) => Some(tf),
            _ => None,
        }
    }

    /// Get as ZPK, if that's the format
    pub fn as_zpk(&self) -> Option<&ZpkFilter> {
        match self {
            FilterOutput::Zpk(zpk) => Some(zpk),
            _ => None,
        }
    }

    /// Get as SOS, if that's the format
    pub fn as_sos(&self) -> Option<&SosFilter> {
        match self {
            FilterOutput::Sos(sos) => Some(sos),
            _ => None,
        }
    }

    /// Convert any representation into `(b, a)`
    pub fn to_tf(&self) -> TransferFunction {
        match self {
            FilterOutput::Ba(tf) => tf.clone(),
            FilterOutput::Zpk(zpk) => zpk.to_tf(),
            FilterOutput::Sos(sos) => sos.to_tf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fir_transfer_function() {
        let tf = TransferFunction::fir(vec![0.25, 0.5, 0.25]);
        assert!(tf.is_fir());
        assert_eq!(tf.a, vec![1.0]);
        assert!((tf.dc_gain() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_response_at_dc_and_nyquist() {
        // Two-tap moving average: unity at DC, null at Nyquist
        let tf = TransferFunction::fir(vec![0.5, 0.5]);
        assert!((tf.response_at(0.0, 2.0).norm() - 1.0).abs() < 1e-12);
        assert!(tf.response_at(1.0, 2.0).norm() < 1e-12);
    }

    #[test]
    fn test_output_accessors() {
        let out = FilterOutput::Ba(TransferFunction::fir(vec![1.0]));
        assert_eq!(out.format(), OutputFormat::Ba);
        assert!(out.as_ba().is_some());
        assert!(out.as_zpk().is_none());
        assert!(out.as_sos().is_none());
    }

    #[test]
    fn test_band_edge_counts() {
        assert_eq!(BandType::Lowpass.edge_count(), 1);
        assert_eq!(BandType::Highpass.edge_count(), 1);
        assert_eq!(BandType::Bandpass.edge_count(), 2);
        assert_eq!(BandType::Bandstop.edge_count(), 2);
    }

    #[test]
    fn test_zpk_degree() {
        let zpk = ZpkFilter::new(
            vec![],
            vec![Complex64::new(-1.0, 0.0), Complex64::new(-2.0, 0.0)],
            1.0,
        );
        assert_eq!(zpk.degree(), 2);
    }
}
