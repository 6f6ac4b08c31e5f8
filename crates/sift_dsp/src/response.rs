//! Frequency response evaluation
//!
//! Responses are evaluated on `n` equally spaced points from DC up to (but
//! not including) Nyquist by zero-padded FFTs of the coefficient vectors.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::error::{DspError, DspResult};
use crate::fir::validate_sample_rate;
use crate::types::{FilterOutput, SosFilter, TransferFunction};

/// Complex response sampled on a uniform frequency grid
#[derive(Debug, Clone)]
pub struct FrequencyResponse {
    /// Grid frequencies, in the units of `fs`
    pub frequencies: Vec<f64>,
    pub response: Vec<Complex<f64>>,
}

impl FrequencyResponse {
    pub fn magnitude(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.norm()).collect()
    }

    /// Magnitude in dB, floored at -300 dB for exact zeros
    pub fn magnitude_db(&self) -> Vec<f64> {
        self.response
            .iter()
            .map(|h| 20.0 * h.norm().max(1e-15).log10())
            .collect()
    }

    /// Phase in radians, wrapped to (-π, π]
    pub fn phase(&self) -> Vec<f64> {
        self.response.iter().map(|h| h.arg()).collect()
    }

    /// Response at the grid point closest to `freq`
    pub fn nearest(&self, freq: f64) -> Option<Complex<f64>> {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - freq).abs().total_cmp(&(*b - freq).abs()))
            .map(|(i, _)| self.response[i])
    }
}

/// Spectrum of `coeffs` (descending powers of z) on the `n`-point half grid
///
/// The FFT length is a multiple of `2n` large enough to hold every
/// coefficient, so bin `k·stride` lands exactly on grid point `k`.
fn half_spectrum(planner: &mut FftPlanner<f64>, coeffs: &[f64], n: usize) -> Vec<Complex<f64>> {
    let stride = ((coeffs.len() + 2 * n - 1) / (2 * n)).max(1);
    let len = 2 * n * stride;

    let mut buffer: Vec<Complex<f64>> = coeffs.iter().map(|&c| Complex::new(c, 0.0)).collect();
    buffer.resize(len, Complex::new(0.0, 0.0));

    let fft = planner.plan_fft_forward(len);
    fft.process(&mut buffer);

    (0..n).map(|k| buffer[k * stride]).collect()
}

fn grid(n: usize, fs: f64) -> Vec<f64> {
    (0..n).map(|k| k as f64 * fs / (2 * n) as f64).collect()
}

fn check_points(n: usize) -> DspResult<()> {
    if n == 0 {
        Err(DspError::InvalidParameter {
            name: "worN",
            value: 0.0,
        })
    } else {
        Ok(())
    }
}

/// Frequency response of a transfer function
pub fn freqz(tf: &TransferFunction, n: usize, fs: f64) -> DspResult<FrequencyResponse> {
    check_points(n)?;
    let fs = validate_sample_rate(fs)?;

    let mut planner = FftPlanner::new();
    let num = half_spectrum(&mut planner, &tf.b, n);
    let den = half_spectrum(&mut planner, &tf.a, n);

    Ok(FrequencyResponse {
        frequencies: grid(n, fs),
        response: num.iter().zip(den.iter()).map(|(b, a)| b / a).collect(),
    })
}

/// Frequency response of a second-order section cascade
///
/// Multiplies the per-section responses instead of expanding the cascade.
pub fn sosfreqz(sos: &SosFilter, n: usize, fs: f64) -> DspResult<FrequencyResponse> {
    check_points(n)?;
    let fs = validate_sample_rate(fs)?;

    let mut planner = FftPlanner::new();
    let mut response = vec![Complex::new(1.0, 0.0); n];
    for s in &sos.sections {
        let num = half_spectrum(&mut planner, &[s.b0, s.b1, s.b2], n);
        let den = half_spectrum(&mut planner, &[1.0, s.a1, s.a2], n);
        for ((h, b), a) in response.iter_mut().zip(num.iter()).zip(den.iter()) {
            *h *= b / a;
        }
    }

    Ok(FrequencyResponse {
        frequencies: grid(n, fs),
        response,
    })
}

impl FilterOutput {
    /// Frequency response of the designed filter, whatever its representation
    pub fn frequency_response(&self, n: usize, fs: f64) -> DspResult<FrequencyResponse> {
        match self {
            FilterOutput::Sos(sos) => sosfreqz(sos, n, fs),
            other => freqz(&other.to_tf(), n, fs),
        }
    }
}
