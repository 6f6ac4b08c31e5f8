//! Representation conversions
//!
//! zpk → (b, a), zpk → second-order sections, sections → (b, a).
//!
//! Polynomial expansion and section pairing come from `sci_rs`. Sections use
//! "nearest" pairing: the pole closest to the unit circle is taken first and
//! matched with the zero closest to it, so the sharpest resonances end up
//! last in the cascade.

use biquad::Coefficients;
use num_complex::Complex64;
use sci_rs::signal::filter::design::{
    poly_dyn, zpk2sos_dyn, zpk2tf_dyn, BaFormatFilter, Sos, ZpkFormatFilter, ZpkPairing,
};

use crate::error::{DspError, DspResult};
use crate::types::{SosFilter, TransferFunction, ZpkFilter};

/// Relative tolerance for treating a root as real or two roots as conjugates
const PAIRING_TOLERANCE: f64 = 100.0 * f64::EPSILON;

/// Monic polynomial with the given roots, coefficients in descending powers
pub fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    poly_dyn(&roots.to_vec())
}

/// Convert zeros, poles and gain into transfer function coefficients
pub fn zpk2tf(zpk: &ZpkFilter) -> TransferFunction {
    let order = zpk.zeros.len().max(zpk.poles.len());
    let BaFormatFilter { mut b, mut a } = zpk2tf_dyn(order, &zpk.zeros, &zpk.poles, zpk.gain);
    // Both polynomials come back padded with trailing zeros to order + 1
    b.truncate(zpk.zeros.len() + 1);
    a.truncate(zpk.poles.len() + 1);
    TransferFunction::new(b, a)
}

/// Multiply the sections of a cascade back into a single `(b, a)` pair
pub fn sos2tf(sos: &SosFilter) -> TransferFunction {
    let mut b = vec![1.0];
    let mut a = vec![1.0];
    for s in &sos.sections {
        b = convolve(&b, &[s.b0, s.b1, s.b2]);
        a = convolve(&a, &[1.0, s.a1, s.a2]);
    }
    TransferFunction::new(b, a)
}

fn convolve(x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; x.len() + y.len() - 1];
    for (i, &xi) in x.iter().enumerate() {
        for (j, &yj) in y.iter().enumerate() {
            out[i + j] += xi * yj;
        }
    }
    out
}

/// Round-off imaginary parts are cleared so real roots pair as real
fn snap_real(roots: &[Complex64]) -> Vec<Complex64> {
    roots
        .iter()
        .map(|&r| {
            if r.im.abs() <= PAIRING_TOLERANCE * r.norm() {
                Complex64::new(r.re, 0.0)
            } else {
                r
            }
        })
        .collect()
}

fn check_conjugate_pairs(roots: &[Complex64]) -> DspResult<()> {
    for (i, r) in roots.iter().enumerate() {
        if r.im == 0.0 {
            continue;
        }
        let tol = PAIRING_TOLERANCE * r.norm();
        let paired = roots
            .iter()
            .enumerate()
            .any(|(j, other)| i != j && (*other - r.conj()).norm() <= tol);
        if !paired {
            return Err(DspError::UnpairedRoot { re: r.re, im: r.im });
        }
    }
    Ok(())
}

fn section(s: &Sos<f64>) -> Coefficients<f64> {
    let a0 = s.a[0];
    Coefficients {
        a1: s.a[1] / a0,
        a2: s.a[2] / a0,
        b0: s.b[0] / a0,
        b1: s.b[1] / a0,
        b2: s.b[2] / a0,
    }
}

/// Convert zeros, poles and gain into cascaded second-order sections
///
/// Every complex root needs its conjugate; the gain is folded into the
/// first section.
pub fn zpk2sos(zpk: &ZpkFilter) -> DspResult<SosFilter> {
    let zeros = snap_real(&zpk.zeros);
    let poles = snap_real(&zpk.poles);
    check_conjugate_pairs(&zeros)?;
    check_conjugate_pairs(&poles)?;

    let order = zeros.len().max(poles.len());
    let sos = zpk2sos_dyn(
        order,
        ZpkFormatFilter::new(zeros, poles, zpk.gain),
        Some(ZpkPairing::Nearest),
        Some(false),
    );
    Ok(SosFilter::new(sos.sos.iter().map(section).collect()))
}
