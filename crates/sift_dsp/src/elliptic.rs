//! Elliptic integrals and Jacobi elliptic functions
//!
//! All functions use the parameter `m = k²`.

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, PI};

const MACHEP: f64 = 1.110_223_024_625_156_5e-16;

/// Terms of the nome series used by [`ellipdeg`]
const ELLIPDEG_MMAX: i32 = 7;

/// Upper bound on Landen transformations in [`arc_jac_sn`]
const LANDEN_STEPS: usize = 10;

/// Arithmetic-geometric mean of 1 and `b`
fn agm(b: f64) -> f64 {
    let mut a = 1.0;
    let mut b = b;
    for _ in 0..64 {
        if (a - b).abs() <= f64::EPSILON * a {
            break;
        }
        let next = 0.5 * (a + b);
        b = (a * b).sqrt();
        a = next;
    }
    a
}

/// Complete elliptic integral of the first kind K(m)
pub(crate) fn ellipk(m: f64) -> f64 {
    if m >= 1.0 {
        return f64::INFINITY;
    }
    PI / (2.0 * agm((1.0 - m).sqrt()))
}

/// K(1 - p), accurate for small `p`
pub(crate) fn ellipkm1(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    PI / (2.0 * agm(p.sqrt()))
}

/// Jacobi elliptic functions `(sn, cn, dn)` of real argument
pub(crate) fn ellipj(u: f64, m: f64) -> (f64, f64, f64) {
    if m < 1e-9 {
        let t = u.sin();
        let b = u.cos();
        let ai = 0.25 * m * (u - t * b);
        return (t - ai * b, b + ai * t, 1.0 - 0.5 * m * t * t);
    }

    if m >= 0.999_999_999_9 {
        let mut ai = 0.25 * (1.0 - m);
        let b = u.cosh();
        let t = u.tanh();
        let phi = 1.0 / b;
        let twon = b * u.sinh();
        let sn = t + ai * (twon - u) / (b * b);
        ai *= t * phi;
        return (sn, phi - ai * (twon - u), phi + ai * (twon + u));
    }

    // Descending Landen (AGM) scale
    let mut a = [0.0; 9];
    let mut c = [0.0; 9];
    a[0] = 1.0;
    c[0] = m.sqrt();
    let mut b = (1.0 - m).sqrt();
    let mut twon = 1.0;
    let mut i = 0;
    while (c[i] / a[i]).abs() > MACHEP && i < 8 {
        let ai = a[i];
        i += 1;
        c[i] = 0.5 * (ai - b);
        let t = (ai * b).sqrt();
        a[i] = 0.5 * (ai + b);
        b = t;
        twon *= 2.0;
    }

    // Backward recurrence for the amplitude
    let mut phi = twon * a[i] * u;
    let mut prev = phi;
    while i > 0 {
        let t = c[i] * phi.sin() / a[i];
        prev = phi;
        phi = 0.5 * (t.asin() + phi);
        i -= 1;
    }

    let sn = phi.sin();
    let cn = phi.cos();
    let dn_fix = cn / (phi - prev).cos();
    let dn = if dn_fix.abs() < 0.1 {
        (1.0 - m * sn * sn).sqrt()
    } else {
        dn_fix
    };
    (sn, cn, dn)
}

/// Solve the degree equation: the modulus `m` for which an order-`n`
/// elliptic filter reaches the selectivity `m1`
pub(crate) fn ellipdeg(n: usize, m1: f64) -> f64 {
    let k1 = ellipk(m1);
    let k1p = ellipkm1(m1);
    let q1 = (-PI * k1p / k1).exp();
    let q = q1.powf(1.0 / n as f64);

    let num: f64 = (0..=ELLIPDEG_MMAX).map(|i| q.powi(i * (i + 1))).sum();
    let den: f64 = 1.0 + 2.0 * (1..=ELLIPDEG_MMAX + 1).map(|i| q.powi(i * i)).sum::<f64>();
    16.0 * q * (num / den).powi(4)
}

fn complement(kx: Complex64) -> Complex64 {
    ((1.0 - kx) * (1.0 + kx)).sqrt()
}

/// Inverse Jacobi sn for complex argument, via descending Landen transformations
pub(crate) fn arc_jac_sn(w: Complex64, m: f64) -> Complex64 {
    let k = m.sqrt();
    if k >= 1.0 {
        return w.atanh();
    }

    let mut ks = vec![k];
    while ks.last().is_some_and(|&kn| kn != 0.0) && ks.len() <= LANDEN_STEPS {
        let kn = ks[ks.len() - 1];
        let kp = ((1.0 - kn) * (1.0 + kn)).sqrt();
        ks.push((1.0 - kp) / (1.0 + kp));
    }

    let big_k: f64 = ks[1..].iter().map(|kn| 1.0 + kn).product::<f64>() * FRAC_PI_2;

    let mut wn = w;
    for pair in ks.windows(2) {
        let (kn, knext) = (pair[0], pair[1]);
        wn = 2.0 * wn / ((1.0 + knext) * (1.0 + complement(kn * wn)));
    }

    wn.asin() * (2.0 / PI) * big_k
}

/// Real inverse of the Jacobi `sc` function: `sc(z, m) = w`
pub(crate) fn arc_jac_sc1(w: f64, m: f64) -> f64 {
    arc_jac_sn(Complex64::new(0.0, w), m).im
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;


    #[test]
    fn test_ellipk_known_values() {
        assert_abs_diff_eq!(ellipk(0.0), FRAC_PI_2, epsilon = 1e-15);
        assert_abs_diff_eq!(ellipk(0.5), 1.854_074_677_301_372, epsilon = 1e-13);
        assert_abs_diff_eq!(ellipk(0.9), 2.578_092_113_348_173, epsilon = 1e-12);
        assert!(ellipk(1.0).is_infinite());
    }

    #[test]
    fn test_ellipkm1_matches_ellipk() {
        for p in [0.1, 0.5, 0.9] {
            assert_abs_diff_eq!(ellipkm1(p), ellipk(1.0 - p), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ellipj_identities() {
        for m in [0.0, 0.3, 0.8, 0.999] {
            for u in [0.1, 0.7, 1.5] {
                let (sn, cn, dn) = ellipj(u, m);
                assert_abs_diff_eq!(sn * sn + cn * cn, 1.0, epsilon = 1e-12);
                assert_abs_diff_eq!(dn * dn + m * sn * sn, 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_ellipj_degenerate_moduli() {
        // m = 0 reduces to circular functions
        let (sn, cn, dn) = ellipj(0.4, 0.0);
        assert_abs_diff_eq!(sn, 0.4_f64.sin(), epsilon = 1e-15);
        assert_abs_diff_eq!(cn, 0.4_f64.cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(dn, 1.0, epsilon = 1e-15);

        // sn(K(m), m) = 1
        let m = 0.6;
        let (sn, _, _) = ellipj(ellipk(m), m);
        assert_abs_diff_eq!(sn, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_jac_sn_inverts_sn() {
        let m = 0.4;
        let u = 0.6;
        let (sn, _, _) = ellipj(u, m);
        let back = arc_jac_sn(Complex64::new(sn, 0.0), m);
        assert_abs_diff_eq!(back.re, u, epsilon = 1e-12);
        assert_abs_diff_eq!(back.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_jac_sc1_inverts_sc() {
        let m = 0.3;
        let u = 0.8;
        let (sn, cn, _) = ellipj(u, m);
        assert_abs_diff_eq!(arc_jac_sc1(sn / cn, 1.0 - m), u, epsilon = 1e-10);
    }
}
