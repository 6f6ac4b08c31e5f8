//! Sift DSP - Filter Coefficient Synthesis
//!
//! This crate holds the numerical side of Sift:
//! - Windowed-sinc FIR design (`firwin`) with the usual window shapes
//! - IIR design from Butterworth, Chebyshev I/II, elliptic and Bessel
//!   analog prototypes, band transformations and the bilinear transform
//! - Conversions between transfer function, zeros/poles/gain and
//!   second-order sections (`biquad::Coefficients`)
//! - FFT-based frequency response evaluation
//!
//! The Butterworth prototype, the lowpass/bandpass transforms, the bilinear
//! transform and the zpk conversions are delegated to `sci_rs`.
//!
//! # Architecture
//!
//! Every design function is pure: it validates its arguments, returns a
//! [`DspError`] for anything it cannot honor and never panics on user input.
//! Frequencies are given in the units of the `fs` option.

mod conversions;
mod elliptic;
mod error;
mod fir;
mod iir;
mod prototype;
mod response;
mod transform;
mod types;
mod window;

pub use conversions::{poly, sos2tf, zpk2sos, zpk2tf};
pub use error::{DspError, DspResult};
pub use fir::{firwin, FirwinOptions};
pub use iir::{analog_prototype, butter, iirfilter, IirfilterOptions};
pub use prototype::{
    besselap, buttap, cheb1ap, cheb2ap, ellipap, BesselNorm, Prototype, MAX_BESSEL_ORDER,
};
pub use response::{freqz, sosfreqz, FrequencyResponse};
pub use transform::{bilinear_zpk, lp2bp_zpk, lp2bs_zpk, lp2hp_zpk, lp2lp_zpk};
pub use types::{BandType, FilterOutput, OutputFormat, SosFilter, TransferFunction, ZpkFilter};
pub use window::{kaiser_atten, kaiser_beta, kaiserord, Window};

/// Re-exported so callers can name root types without a direct dependency
pub use num_complex::Complex64;
