//! Analog lowpass prototypes
//!
//! Each prototype has its cutoff (or passband edge) at 1 rad/s and is
//! returned as zeros, poles and gain. Butterworth comes from `sci_rs`; the
//! other families are not implemented there and are built here.

use num_complex::Complex64;
use sci_rs::signal::filter::design::{
    butter_dyn, DigitalFilter, FilterBandType, FilterOutputType,
};
use std::f64::consts::{FRAC_1_SQRT_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::elliptic::{arc_jac_sc1, ellipdeg, ellipj, ellipk};
use crate::error::{DspError, DspResult};
use crate::transform::product;
use crate::types::ZpkFilter;

/// Largest Bessel order whose polynomial roots stay accurate in f64
pub const MAX_BESSEL_ORDER: usize = 16;

/// Threshold below which a root is treated as lying on an axis
const ROOT_EPSILON: f64 = 2e-16;

/// Analog prototype family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Prototype {
    /// Maximally flat passband
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "butterworth"))]
    Butter,
    /// Equiripple passband (needs `rp`)
    #[cfg_attr(feature = "serde", serde(alias = "chebyshev1"))]
    Cheby1,
    /// Equiripple stopband (needs `rs`)
    #[cfg_attr(feature = "serde", serde(alias = "chebyshev2"))]
    Cheby2,
    /// Equiripple in both bands (needs `rp` and `rs`)
    #[cfg_attr(feature = "serde", serde(alias = "elliptic"))]
    Ellip,
    /// Maximally flat group delay
    Bessel,
}

/// Frequency normalization of the Bessel prototype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BesselNorm {
    /// Phase response reaches its midpoint at 1 rad/s
    #[default]
    Phase,
    /// Group delay at DC is 1 s
    Delay,
    /// Gain is -3 dB at 1 rad/s
    Mag,
}

fn check_order(n: usize) -> DspResult<()> {
    if n == 0 {
        Err(DspError::InvalidOrder(n))
    } else {
        Ok(())
    }
}

fn check_decibels(name: &'static str, value: f64) -> DspResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(DspError::InvalidParameter { name, value })
    }
}

/// 10^(x/10) - 1 without cancellation for small x
fn pow10m1(x: f64) -> f64 {
    (x * std::f64::consts::LN_10).exp_m1()
}

/// m = -N+1, -N+3, ..., N-1
fn symmetric_indices(n: usize) -> impl Iterator<Item = f64> {
    let n = n as i64;
    (0..n).map(move |i| (2 * i - n + 1) as f64)
}

fn gain_ratio(zeros: &[Complex64], poles: &[Complex64]) -> f64 {
    (product(poles.iter().map(|&p| -p)) / product(zeros.iter().map(|&z| -z))).re
}

/// Butterworth prototype of order `n`
pub fn buttap(n: usize) -> DspResult<ZpkFilter> {
    check_order(n)?;
    // An analog lowpass at 1 rad/s is the prototype itself
    let analog = butter_dyn(
        n,
        vec![1.0],
        Some(FilterBandType::Lowpass),
        Some(true),
        Some(FilterOutputType::Zpk),
        None,
    );
    let DigitalFilter::Zpk(zpk) = analog else {
        return Err(DspError::InfeasibleSpecification(format!(
            "Butterworth prototype of order {} came back in another form",
            n
        )));
    };
    Ok(zpk.into())
}

/// Chebyshev type I prototype with `rp` dB of passband ripple
pub fn cheb1ap(n: usize, rp: f64) -> DspResult<ZpkFilter> {
    check_order(n)?;
    let rp = check_decibels("rp", rp)?;

    let eps_sq = pow10m1(0.1 * rp);
    let mu = (1.0 / eps_sq.sqrt()).asinh() / n as f64;
    let poles: Vec<Complex64> = symmetric_indices(n)
        .map(|m| -Complex64::new(mu, PI * m / (2.0 * n as f64)).sinh())
        .collect();

    let mut gain = gain_ratio(&[], &poles);
    if n % 2 == 0 {
        gain /= (1.0 + eps_sq).sqrt();
    }
    Ok(ZpkFilter::new(Vec::new(), poles, gain))
}

/// Chebyshev type II prototype with `rs` dB of stopband attenuation
pub fn cheb2ap(n: usize, rs: f64) -> DspResult<ZpkFilter> {
    check_order(n)?;
    let rs = check_decibels("rs", rs)?;

    let mu = pow10m1(0.1 * rs).sqrt().asinh() / n as f64;
    let nf = n as f64;

    // Odd orders skip m = 0, whose zero would sit at infinity
    let zeros: Vec<Complex64> = symmetric_indices(n)
        .filter(|&m| m != 0.0)
        .map(|m| Complex64::new(0.0, 1.0 / (m * PI / (2.0 * nf)).sin()))
        .collect();

    let poles: Vec<Complex64> = symmetric_indices(n)
        .map(|m| {
            let p = -Complex64::from_polar(1.0, PI * m / (2.0 * nf));
            Complex64::new(mu.sinh() * p.re, mu.cosh() * p.im).inv()
        })
        .collect();

    let gain = gain_ratio(&zeros, &poles);
    Ok(ZpkFilter::new(zeros, poles, gain))
}

/// Elliptic (Cauer) prototype with `rp` dB ripple and `rs` dB attenuation
pub fn ellipap(n: usize, rp: f64, rs: f64) -> DspResult<ZpkFilter> {
    check_order(n)?;
    let rp = check_decibels("rp", rp)?;
    let rs = check_decibels("rs", rs)?;

    let eps_sq = pow10m1(0.1 * rp);
    if n == 1 {
        let pole = -(1.0 / eps_sq).sqrt();
        return Ok(ZpkFilter::new(
            Vec::new(),
            vec![Complex64::new(pole, 0.0)],
            -pole,
        ));
    }

    let eps = eps_sq.sqrt();
    let ck1_sq = eps_sq / pow10m1(0.1 * rs);
    if ck1_sq == 0.0 || ck1_sq >= 1.0 {
        return Err(DspError::InfeasibleSpecification(format!(
            "ripple {} dB and attenuation {} dB",
            rp, rs
        )));
    }

    let val = ellipk(ck1_sq);
    let m = ellipdeg(n, ck1_sq);
    let capk = ellipk(m);
    let nf = n as f64;

    let r = arc_jac_sc1(1.0 / eps, ck1_sq);
    let v0 = capk * r / (nf * val);
    let (sv, cv, dv) = ellipj(v0, 1.0 - m);

    let mut zeros = Vec::with_capacity(n);
    let mut poles = Vec::with_capacity(n);
    let start = 1 - n % 2;
    for j in (start..n).step_by(2) {
        let (s, c, d) = ellipj(j as f64 * capk / nf, m);
        if s.abs() > ROOT_EPSILON {
            zeros.push(Complex64::new(0.0, 1.0 / (m.sqrt() * s)));
        }
        let denom = 1.0 - (d * sv).powi(2);
        poles.push(Complex64::new(-c * d * sv * cv, -s * dv) / denom);
    }

    let conj_zeros: Vec<Complex64> = zeros.iter().map(|z| z.conj()).collect();
    zeros.extend(conj_zeros);

    let conj_poles: Vec<Complex64> = if n % 2 == 1 {
        let scale = poles.iter().map(|p| p.norm_sqr()).sum::<f64>().sqrt();
        poles
            .iter()
            .filter(|p| p.im.abs() > ROOT_EPSILON * scale)
            .map(|p| p.conj())
            .collect()
    } else {
        poles.iter().map(|p| p.conj()).collect()
    };
    poles.extend(conj_poles);

    let mut gain = gain_ratio(&zeros, &poles);
    if n % 2 == 0 {
        gain /= (1.0 + eps_sq).sqrt();
    }
    Ok(ZpkFilter::new(zeros, poles, gain))
}

/// Coefficients of the reverse Bessel polynomial, ascending powers, monic
fn reverse_bessel_coefficients(n: usize) -> Vec<f64> {
    let mut a = vec![0.0; n + 1];
    a[n] = 1.0;
    for k in (0..n).rev() {
        a[k] = a[k + 1] * (2 * n - k) as f64 * (k + 1) as f64 / (2 * (n - k)) as f64;
    }
    a
}

/// All roots of a monic polynomial (ascending coefficients) by Aberth iteration
fn polynomial_roots(coeffs: &[f64]) -> Vec<Complex64> {
    let n = coeffs.len() - 1;
    let radius = coeffs[0].abs().powf(1.0 / n as f64);
    let mut roots: Vec<Complex64> = (0..n)
        .map(|k| Complex64::from_polar(radius, 2.0 * PI * k as f64 / n as f64 + 0.4))
        .collect();

    let eval = |x: Complex64| {
        let mut p = Complex64::new(0.0, 0.0);
        let mut dp = Complex64::new(0.0, 0.0);
        for &c in coeffs.iter().rev() {
            dp = dp * x + p;
            p = p * x + c;
        }
        (p, dp)
    };

    for _ in 0..500 {
        let mut largest_step: f64 = 0.0;
        for i in 0..n {
            let (p, dp) = eval(roots[i]);
            if p.norm() == 0.0 {
                continue;
            }
            let ratio = p / dp;
            let repulsion: Complex64 = (0..n)
                .filter(|&j| j != i)
                .map(|j| (roots[i] - roots[j]).inv())
                .sum();
            let step = ratio / (1.0 - ratio * repulsion);
            roots[i] -= step;
            largest_step = largest_step.max(step.norm() / roots[i].norm().max(f64::MIN_POSITIVE));
        }
        if largest_step < 1e-13 {
            break;
        }
    }
    roots
}

/// Bessel/Thomson prototype of order `n`
pub fn besselap(n: usize, norm: BesselNorm) -> DspResult<ZpkFilter> {
    check_order(n)?;
    if n > MAX_BESSEL_ORDER {
        return Err(DspError::InfeasibleSpecification(format!(
            "Bessel order {} exceeds {}",
            n, MAX_BESSEL_ORDER
        )));
    }

    let coeffs = reverse_bessel_coefficients(n);
    let mut roots = polynomial_roots(&coeffs);
    roots.sort_by(|a, b| b.im.total_cmp(&a.im));

    // Rebuild exact conjugate pairs, plus the real root for odd orders
    let upper: Vec<Complex64> = roots[..n / 2].to_vec();
    let mut poles: Vec<Complex64> = upper
        .iter()
        .copied()
        .chain(upper.iter().map(|p| p.conj()))
        .collect();
    if n % 2 == 1 {
        poles.push(Complex64::new(roots[n / 2].re, 0.0));
    }

    match norm {
        BesselNorm::Delay => {}
        BesselNorm::Phase => {
            let scale = coeffs[0].powf(-1.0 / n as f64);
            for p in poles.iter_mut() {
                *p *= scale;
            }
        }
        BesselNorm::Mag => {
            let cutoff = half_power_frequency(&poles);
            for p in poles.iter_mut() {
                *p /= cutoff;
            }
        }
    }

    let gain = gain_ratio(&[], &poles);
    Ok(ZpkFilter::new(Vec::new(), poles, gain))
}

/// Frequency (rad/s) where an all-pole lowpass with unity DC gain drops to -3 dB
fn half_power_frequency(poles: &[Complex64]) -> f64 {
    let dc = gain_ratio(&[], poles);
    let magnitude = |w: f64| {
        let s = Complex64::new(0.0, w);
        (dc / product(poles.iter().map(|&p| s - p))).norm()
    };

    let mut lo = 0.0;
    let mut hi = 1.0;
    while magnitude(hi) > FRAC_1_SQRT_2 {
        hi *= 2.0;
    }
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if magnitude(mid) > FRAC_1_SQRT_2 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    hi
}
