//! Windowed-sinc FIR design
//!
//! # Algorithm
//!
//! 1. Normalize the cutoff frequencies to the Nyquist frequency
//! 2. Turn the edges into passbands (prefix 0 when DC passes, suffix 1 when
//!    Nyquist passes)
//! 3. Sum the ideal brick-wall responses: `right·sinc(right·m) - left·sinc(left·m)`
//! 4. Taper with the window
//! 5. Optionally scale for unity gain at a reference frequency of the first
//!    passband
//!
//! Filters that stop DC and have an odd length are built as the spectral
//! inversion of their DC-passing counterpart, `h = δ[center] - h_pass`.
//! Their zero-frequency gain is then exactly zero instead of a small ripple
//! residue.

use std::f64::consts::PI;

use crate::error::{DspError, DspResult};
use crate::window::{kaiser_atten, kaiser_beta, Window};

/// Parameters for [`firwin`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirwinOptions {
    /// Sampling rate, in the units of the cutoff frequencies
    pub fs: f64,
    /// Whether the passband includes zero frequency
    pub pass_zero: bool,
    /// Approximate transition width; selects a Kaiser window when set
    pub width: Option<f64>,
    pub window: Window,
    /// Normalize the gain to 1 at the reference frequency of the first passband
    pub scale: bool,
}

impl Default for FirwinOptions {
    fn default() -> Self {
        Self {
            fs: 1.0,
            pass_zero: true,
            width: None,
            window: Window::Hamming,
            scale: true,
        }
    }
}

/// Design a linear-phase FIR filter with the window method
///
/// `cutoff` holds one or more strictly increasing band edges, each strictly
/// between 0 and `fs / 2`. Returns `numtaps` coefficients.
pub fn firwin(numtaps: usize, cutoff: &[f64], options: &FirwinOptions) -> DspResult<Vec<f64>> {
    if numtaps == 0 {
        return Err(DspError::InvalidTaps(numtaps));
    }
    let nyquist = validate_sample_rate(options.fs)? / 2.0;
    let edges = normalize_edges(cutoff, nyquist)?;

    let pass_nyquist = passes_nyquist(edges.len(), options.pass_zero);
    if pass_nyquist && numtaps % 2 == 0 {
        return Err(DspError::EvenTapsPassNyquist(numtaps));
    }

    let window = match options.width {
        Some(width) if width > 0.0 && width.is_finite() => {
            Window::Kaiser(kaiser_beta(kaiser_atten(numtaps, width / nyquist)))
        }
        Some(width) => {
            return Err(DspError::InvalidParameter {
                name: "width",
                value: width,
            })
        }
        None => options.window,
    };

    if !options.pass_zero && numtaps % 2 == 1 {
        let mut h = windowed_sinc(numtaps, &edges, true, window, options.scale)?;
        for coeff in h.iter_mut() {
            *coeff = -*coeff;
        }
        h[numtaps / 2] += 1.0;
        if options.scale {
            let upper = edges.get(1).copied().unwrap_or(1.0);
            normalize_gain(&mut h, reference_frequency(edges[0], upper))?;
        }
        return Ok(h);
    }

    windowed_sinc(numtaps, &edges, options.pass_zero, window, options.scale)
}

pub(crate) fn validate_sample_rate(fs: f64) -> DspResult<f64> {
    if fs > 0.0 && fs.is_finite() {
        Ok(fs)
    } else {
        Err(DspError::InvalidSampleRate(fs))
    }
}

/// Check edges are in (0, nyquist) and increasing; return them normalized to [0, 1]
fn normalize_edges(cutoff: &[f64], nyquist: f64) -> DspResult<Vec<f64>> {
    if cutoff.is_empty() {
        return Err(DspError::EmptyCutoff);
    }
    for &c in cutoff {
        if !(c > 0.0 && c < nyquist) {
            return Err(DspError::CutoffOutOfRange { value: c, nyquist });
        }
    }
    if cutoff.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(DspError::CutoffNotIncreasing);
    }
    Ok(cutoff.iter().map(|&c| c / nyquist).collect())
}

fn passes_nyquist(edge_count: usize, pass_zero: bool) -> bool {
    (edge_count % 2 == 1) != pass_zero
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

fn windowed_sinc(
    numtaps: usize,
    edges: &[f64],
    pass_zero: bool,
    window: Window,
    scale: bool,
) -> DspResult<Vec<f64>> {
    let mut bounds = Vec::with_capacity(edges.len() + 2);
    if pass_zero {
        bounds.push(0.0);
    }
    bounds.extend_from_slice(edges);
    if passes_nyquist(edges.len(), pass_zero) {
        bounds.push(1.0);
    }
    let bands: Vec<(f64, f64)> = bounds.chunks_exact(2).map(|b| (b[0], b[1])).collect();

    let alpha = (numtaps - 1) as f64 / 2.0;
    let win = window.coefficients(numtaps);
    let mut h: Vec<f64> = (0..numtaps)
        .map(|i| {
            let m = i as f64 - alpha;
            let ideal: f64 = bands
                .iter()
                .map(|&(left, right)| right * sinc(right * m) - left * sinc(left * m))
                .sum();
            ideal * win[i]
        })
        .collect();

    if scale {
        let (left, right) = bands[0];
        normalize_gain(&mut h, reference_frequency(left, right))?;
    }

    Ok(h)
}

/// Frequency (x Nyquist) where the passband `[left, right]` is scaled to 1
fn reference_frequency(left: f64, right: f64) -> f64 {
    if left == 0.0 {
        0.0
    } else if right == 1.0 {
        1.0
    } else {
        0.5 * (left + right)
    }
}

/// Divide a symmetric filter by its zero-phase gain at `reference`
fn normalize_gain(h: &mut [f64], reference: f64) -> DspResult<()> {
    let alpha = (h.len() - 1) as f64 / 2.0;
    let gain: f64 = h
        .iter()
        .enumerate()
        .map(|(i, &coeff)| coeff * (PI * (i as f64 - alpha) * reference).cos())
        .sum();
    if gain == 0.0 || !gain.is_finite() {
        return Err(DspError::DegenerateGain);
    }
    for coeff in h.iter_mut() {
        *coeff /= gain;
    }
    Ok(())
}
