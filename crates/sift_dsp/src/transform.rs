//! Frequency transformations in zeros/poles/gain form
//!
//! Analog lowpass prototypes (cutoff 1 rad/s) are moved to the requested
//! band and then mapped to the z-plane with the bilinear transform.
//! Lowpass, bandpass and bilinear steps run through `sci_rs`.

use num_complex::Complex64;
use sci_rs::signal::filter::design::{
    bilinear_zpk_dyn, lp2bp_zpk_dyn, lp2lp_zpk_dyn, ZpkFormatFilter,
};

use crate::types::ZpkFilter;

pub(crate) fn product(values: impl IntoIterator<Item = Complex64>) -> Complex64 {
    values
        .into_iter()
        .fold(Complex64::new(1.0, 0.0), |acc, v| acc * v)
}

/// Shift a prototype root to `±wo` after scaling, yielding both images
fn shifted_pair(root: Complex64, wo: f64) -> (Complex64, Complex64) {
    let offset = (root * root - wo * wo).sqrt();
    (root + offset, root - offset)
}

fn split_shift(roots: &[Complex64], wo: f64) -> Vec<Complex64> {
    let (plus, minus): (Vec<_>, Vec<_>) = roots.iter().map(|&r| shifted_pair(r, wo)).unzip();
    plus.into_iter().chain(minus).collect()
}

fn inversion_gain(proto: &ZpkFilter) -> f64 {
    let zeros = product(proto.zeros.iter().map(|&z| -z));
    let poles = product(proto.poles.iter().map(|&p| -p));
    (zeros / poles).re
}

/// Lowpass prototype to lowpass with cutoff `wo` (rad/s)
pub fn lp2lp_zpk(proto: &ZpkFilter, wo: f64) -> ZpkFilter {
    lp2lp_zpk_dyn(ZpkFormatFilter::from(proto), Some(wo)).into()
}

/// Lowpass prototype to highpass with cutoff `wo` (rad/s)
///
/// sci-rs 0.4 maps finite prototype zeros (Chebyshev II, elliptic) off the
/// imaginary axis here, so the inversion stays local.
pub fn lp2hp_zpk(proto: &ZpkFilter, wo: f64) -> ZpkFilter {
    let degree = proto.degree();
    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo / z).collect();
    // Zeros at infinity move to the origin
    zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));
    let poles = proto.poles.iter().map(|&p| wo / p).collect();

    ZpkFilter::new(zeros, poles, proto.gain * inversion_gain(proto))
}

/// Lowpass prototype to bandpass centred on `wo` with bandwidth `bw` (rad/s)
pub fn lp2bp_zpk(proto: &ZpkFilter, wo: f64, bw: f64) -> ZpkFilter {
    lp2bp_zpk_dyn(ZpkFormatFilter::from(proto), Some(wo), Some(bw)).into()
}

/// Lowpass prototype to bandstop centred on `wo` with bandwidth `bw` (rad/s)
///
/// Local for the same reason as [`lp2hp_zpk`].
pub fn lp2bs_zpk(proto: &ZpkFilter, wo: f64, bw: f64) -> ZpkFilter {
    let degree = proto.degree();
    let half = bw / 2.0;
    let inverted_zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| half / z).collect();
    let inverted_poles: Vec<Complex64> = proto.poles.iter().map(|&p| half / p).collect();

    let mut zeros = split_shift(&inverted_zeros, wo);
    // Zeros at infinity land in the middle of the stopband
    zeros.extend(std::iter::repeat(Complex64::new(0.0, wo)).take(degree));
    zeros.extend(std::iter::repeat(Complex64::new(0.0, -wo)).take(degree));
    let poles = split_shift(&inverted_poles, wo);

    ZpkFilter::new(zeros, poles, proto.gain * inversion_gain(proto))
}

/// Bilinear transform from the s-plane to the z-plane
///
/// `fs` is the sampling rate the analog frequencies were prewarped for.
/// Zeros at infinity map to Nyquist.
pub fn bilinear_zpk(analog: &ZpkFilter, fs: f64) -> ZpkFilter {
    bilinear_zpk_dyn(ZpkFormatFilter::from(analog), fs).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn analog_response(zpk: &ZpkFilter, omega: f64) -> Complex64 {
        let s = c(0.0, omega);
        let zeros = product(zpk.zeros.iter().map(|&z| s - z));
        let poles = product(zpk.poles.iter().map(|&p| s - p));
        zpk.gain * zeros / poles
    }

    fn first_order() -> ZpkFilter {
        ZpkFilter::new(vec![], vec![c(-1.0, 0.0)], 1.0)
    }

    /// Two-pole lowpass with a pair of stopband zeros at ±2j
    fn with_finite_zeros() -> ZpkFilter {
        let poles = vec![c(-0.5, 0.8), c(-0.5, -0.8)];
        let zeros = vec![c(0.0, 2.0), c(0.0, -2.0)];
        let gain = (product(poles.iter().map(|&p| -p)) / product(zeros.iter().map(|&z| -z))).re;
        ZpkFilter::new(zeros, poles, gain)
    }

    #[test]
    fn test_lp2lp_moves_cutoff() {
        let lp = lp2lp_zpk(&first_order(), 10.0);
        assert_abs_diff_eq!(analog_response(&lp, 0.0).norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            analog_response(&lp, 10.0).norm(),
            std::f64::consts::FRAC_1_SQRT_2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_lp2hp_swaps_bands() {
        let hp = lp2hp_zpk(&first_order(), 10.0);
        assert_eq!(hp.zeros.len(), 1);
        assert!(analog_response(&hp, 0.0).norm() < 1e-12);
        assert_abs_diff_eq!(analog_response(&hp, 1e6).norm(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_lp2hp_keeps_finite_zeros_on_axis() {
        let proto = with_finite_zeros();
        let hp = lp2hp_zpk(&proto, 10.0);
        // 10 / ±2j = ∓5j
        for z in &hp.zeros {
            assert_abs_diff_eq!(z.re, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(z.im.abs(), 5.0, epsilon = 1e-12);
        }
        // The prototype's response at w maps to 10 / w
        for w in [0.5, 1.0, 3.0] {
            assert_abs_diff_eq!(
                analog_response(&hp, 10.0 / w).norm(),
                analog_response(&proto, w).norm(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_lp2bp_doubles_order() {
        let bp = lp2bp_zpk(&first_order(), 5.0, 2.0);
        assert_eq!(bp.poles.len(), 2);
        assert_eq!(bp.zeros.len(), 1);
        assert_abs_diff_eq!(analog_response(&bp, 5.0).norm(), 1.0, epsilon = 1e-12);
        assert!(analog_response(&bp, 0.0).norm() < 1e-12);
    }

    #[test]
    fn test_lp2bs_notches_center() {
        let bs = lp2bs_zpk(&first_order(), 5.0, 2.0);
        assert_eq!(bs.poles.len(), 2);
        assert_eq!(bs.zeros.len(), 2);
        assert!(analog_response(&bs, 5.0).norm() < 1e-12);
        assert_abs_diff_eq!(analog_response(&bs, 0.0).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lp2bs_with_finite_zeros_keeps_unity_passband() {
        let bs = lp2bs_zpk(&with_finite_zeros(), 5.0, 2.0);
        assert_eq!(bs.zeros.len(), 4);
        assert!(bs.zeros.iter().all(|z| z.re.abs() < 1e-12));
        assert_abs_diff_eq!(analog_response(&bs, 0.0).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bilinear_pads_zeros_at_nyquist() {
        let digital = bilinear_zpk(&first_order(), 2.0);
        assert_eq!(digital.zeros, vec![c(-1.0, 0.0)]);
        // DC maps to z = 1; gain there is preserved
        let tf = digital.to_tf();
        assert_abs_diff_eq!(tf.dc_gain(), 1.0, epsilon = 1e-12);
    }
}
