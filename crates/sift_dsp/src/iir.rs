//! IIR synthesis from analog prototypes
//!
//! Prototype → band transformation (with prewarped edges) → bilinear
//! transform → requested output representation.
//!
//! `order` is the order of the resulting digital filter. Bandpass and
//! bandstop transformations double the prototype order, so those band types
//! need an even `order` and use a prototype of order `order / 2`.

use std::f64::consts::PI;

use crate::error::{DspError, DspResult};
use crate::fir::validate_sample_rate;
use crate::prototype::{besselap, buttap, cheb1ap, cheb2ap, ellipap, BesselNorm, Prototype};
use crate::transform::{bilinear_zpk, lp2bp_zpk, lp2bs_zpk, lp2hp_zpk, lp2lp_zpk};
use crate::types::{BandType, FilterOutput, OutputFormat, ZpkFilter};

/// Sampling rate the band edges are prewarped for before the bilinear transform
const BILINEAR_FS: f64 = 2.0;

/// Parameters for [`iirfilter`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IirfilterOptions {
    /// Sampling rate, in the units of the band edges
    pub fs: f64,
    /// Passband ripple in dB (Chebyshev I, elliptic)
    pub rp: Option<f64>,
    /// Stopband attenuation in dB (Chebyshev II, elliptic)
    pub rs: Option<f64>,
    pub ftype: Prototype,
    /// Only used by the Bessel prototype
    pub norm: BesselNorm,
    pub output: OutputFormat,
}

impl Default for IirfilterOptions {
    fn default() -> Self {
        Self {
            fs: 1.0,
            rp: None,
            rs: None,
            ftype: Prototype::Butter,
            norm: BesselNorm::Phase,
            output: OutputFormat::Ba,
        }
    }
}

/// Build the analog lowpass prototype for `ftype`
pub fn analog_prototype(
    ftype: Prototype,
    order: usize,
    rp: Option<f64>,
    rs: Option<f64>,
    norm: BesselNorm,
) -> DspResult<ZpkFilter> {
    let ripple = || rp.ok_or(DspError::MissingParameter("rp"));
    let attenuation = || rs.ok_or(DspError::MissingParameter("rs"));
    match ftype {
        Prototype::Butter => buttap(order),
        Prototype::Cheby1 => cheb1ap(order, ripple()?),
        Prototype::Cheby2 => cheb2ap(order, attenuation()?),
        Prototype::Ellip => ellipap(order, ripple()?, attenuation()?),
        Prototype::Bessel => besselap(order, norm),
    }
}

/// Design a digital IIR filter
///
/// `wn` holds one edge for lowpass/highpass and two increasing edges for
/// bandpass/bandstop, each strictly between 0 and `fs / 2`.
pub fn iirfilter(
    order: usize,
    wn: &[f64],
    btype: BandType,
    options: &IirfilterOptions,
) -> DspResult<FilterOutput> {
    let zpk = iir_zpk(order, wn, btype, options)?;
    Ok(match options.output {
        OutputFormat::Ba => FilterOutput::Ba(zpk.to_tf()),
        OutputFormat::Zpk => FilterOutput::Zpk(zpk),
        OutputFormat::Sos => FilterOutput::Sos(zpk.to_sos()?),
    })
}

/// Butterworth design with `(b, a)` output
pub fn butter(order: usize, wn: &[f64], btype: BandType, fs: f64) -> DspResult<FilterOutput> {
    iirfilter(
        order,
        wn,
        btype,
        &IirfilterOptions {
            fs,
            ..Default::default()
        },
    )
}

fn iir_zpk(
    order: usize,
    wn: &[f64],
    btype: BandType,
    options: &IirfilterOptions,
) -> DspResult<ZpkFilter> {
    if order == 0 {
        return Err(DspError::InvalidOrder(order));
    }
    let prototype_order = match btype {
        BandType::Lowpass | BandType::Highpass => order,
        BandType::Bandpass | BandType::Bandstop => {
            if order % 2 != 0 {
                return Err(DspError::OddBandOrder(order));
            }
            order / 2
        }
    };

    let nyquist = validate_sample_rate(options.fs)? / 2.0;
    if wn.len() != btype.edge_count() {
        return Err(DspError::BandEdgeCount {
            band: btype.name(),
            expected: btype.edge_count(),
            got: wn.len(),
        });
    }
    for &w in wn {
        if !(w > 0.0 && w < nyquist) {
            return Err(DspError::CutoffOutOfRange { value: w, nyquist });
        }
    }
    if wn.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(DspError::CutoffNotIncreasing);
    }

    let proto = analog_prototype(
        options.ftype,
        prototype_order,
        options.rp,
        options.rs,
        options.norm,
    )?;

    let warped: Vec<f64> = wn
        .iter()
        .map(|&w| 2.0 * BILINEAR_FS * (PI * (w / nyquist) / BILINEAR_FS).tan())
        .collect();

    let analog = match btype {
        BandType::Lowpass => lp2lp_zpk(&proto, warped[0]),
        BandType::Highpass => lp2hp_zpk(&proto, warped[0]),
        BandType::Bandpass => {
            lp2bp_zpk(&proto, (warped[0] * warped[1]).sqrt(), warped[1] - warped[0])
        }
        BandType::Bandstop => {
            lp2bs_zpk(&proto, (warped[0] * warped[1]).sqrt(), warped[1] - warped[0])
        }
    };

    Ok(bilinear_zpk(&analog, BILINEAR_FS))
}
