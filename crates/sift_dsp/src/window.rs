//! Window Functions
//!
//! Symmetric windows used to taper ideal (sinc) impulse responses.
//! All windows peak at the center tap, which is 1.0 for odd lengths.

use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Window shape for FIR design
///
/// Parametrized shapes carry their parameter:
/// `Kaiser(beta)`, `Gaussian(std)` and `Tukey(alpha)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Window {
    #[cfg_attr(feature = "serde", serde(alias = "rectangular"))]
    Boxcar,
    Triang,
    Bartlett,
    Hann,
    #[default]
    Hamming,
    Blackman,
    Kaiser(f64),
    Gaussian(f64),
    Tukey(f64),
}

impl Window {
    /// Generate `len` symmetric window coefficients
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        if len == 0 {
            return Vec::new();
        }
        if len == 1 {
            return vec![1.0];
        }

        let m = (len - 1) as f64;
        match self {
            Window::Boxcar => vec![1.0; len],
            Window::Triang => triang(len),
            Window::Bartlett => (0..len)
                .map(|n| 2.0 / m * (m / 2.0 - (n as f64 - m / 2.0).abs()))
                .collect(),
            Window::Hann => cosine_sum(len, &[0.5, 0.5]),
            Window::Hamming => cosine_sum(len, &[0.54, 0.46]),
            Window::Blackman => cosine_sum(len, &[0.42, 0.5, 0.08]),
            Window::Kaiser(beta) => {
                let denom = bessel_i0(beta);
                (0..len)
                    .map(|n| {
                        let ratio = 2.0 * n as f64 / m - 1.0;
                        bessel_i0(beta * (1.0 - ratio * ratio).max(0.0).sqrt()) / denom
                    })
                    .collect()
            }
            Window::Gaussian(std) => (0..len)
                .map(|n| {
                    let x = (n as f64 - m / 2.0) / std;
                    (-0.5 * x * x).exp()
                })
                .collect(),
            Window::Tukey(alpha) => tukey(len, alpha),
        }
    }
}

/// Generalized cosine window: w[n] = Σ (-1)^k a_k cos(2πkn/(M-1))
fn cosine_sum(len: usize, a: &[f64]) -> Vec<f64> {
    let m = (len - 1) as f64;
    (0..len)
        .map(|n| {
            a.iter().enumerate().fold(0.0, |acc, (k, &ak)| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                acc + sign * ak * (2.0 * PI * k as f64 * n as f64 / m).cos()
            })
        })
        .collect()
}

/// Triangular window without zero end points
fn triang(len: usize) -> Vec<f64> {
    let half = (len + 1) / 2;
    let lenf = len as f64;
    let rising: Vec<f64> = if len % 2 == 0 {
        (1..=half).map(|n| (2.0 * n as f64 - 1.0) / lenf).collect()
    } else {
        (1..=half).map(|n| 2.0 * n as f64 / (lenf + 1.0)).collect()
    };

    let mut w = rising.clone();
    if len % 2 == 0 {
        w.extend(rising.iter().rev());
    } else {
        w.extend(rising.iter().rev().skip(1));
    }
    w
}

/// Tapered cosine window, `alpha` is the fraction of the window inside the taper
fn tukey(len: usize, alpha: f64) -> Vec<f64> {
    if alpha <= 0.0 {
        return vec![1.0; len];
    }
    if alpha >= 1.0 {
        return Window::Hann.coefficients(len);
    }

    let m = (len - 1) as f64;
    let edge = alpha * m / 2.0;
    (0..len)
        .map(|n| {
            let n = n as f64;
            if n < edge {
                0.5 * (1.0 + (PI * (n / edge - 1.0)).cos())
            } else if n > m - edge {
                0.5 * (1.0 + (PI * ((n - m + edge) / edge)).cos())
            } else {
                1.0
            }
        })
        .collect()
}

/// Modified Bessel function of the first kind, order zero (power series)
pub(crate) fn bessel_i0(x: f64) -> f64 {
    let half_sq = (x / 2.0) * (x / 2.0);
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut k = 1.0;
    while term > sum * 1e-17 {
        term *= half_sq / (k * k);
        sum += term;
        k += 1.0;
    }
    sum
}

/// Kaiser window beta for a desired stopband attenuation in dB
pub fn kaiser_beta(atten: f64) -> f64 {
    if atten > 50.0 {
        0.1102 * (atten - 8.7)
    } else if atten > 21.0 {
        0.5842 * (atten - 21.0).powf(0.4) + 0.07886 * (atten - 21.0)
    } else {
        0.0
    }
}

/// Attenuation (dB) reached by a Kaiser-windowed FIR filter
///
/// `width` is the transition width normalized to the Nyquist frequency.
pub fn kaiser_atten(numtaps: usize, width: f64) -> f64 {
    2.285 * (numtaps as f64 - 1.0) * PI * width + 7.95
}

/// Estimate Kaiser design parameters `(numtaps, beta)`
///
/// `ripple` is the required attenuation in dB, `width` the transition width
/// normalized to the Nyquist frequency.
pub fn kaiserord(ripple: f64, width: f64) -> (usize, f64) {
    let a = ripple.abs();
    let beta = kaiser_beta(a);
    let numtaps = (a - 7.95) / 2.285 / (PI * width) + 1.0;
    (numtaps.ceil().max(1.0) as usize, beta)
}
