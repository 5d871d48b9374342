//! Spectral assembly of the scaling polynomial.
//!
//! Polynomials in this module are stored lowest degree first, which makes
//! products plain convolutions.

use daub_precision::{ComplexOps, ComplexReal, Precision, Real};
use num_bigint::BigInt;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::WaveletError;
use crate::moment::binomial;

/// Multiplies two lowest-degree-first polynomials.
pub fn poly_mul(a: &[ComplexReal], b: &[ComplexReal]) -> Vec<ComplexReal> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![ComplexReal::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] = &out[i + j] + x * y;
        }
    }
    out
}

/// Builds `h0(z) = sqrt(2) * prod_k (z - z_k) / (1 - z_k)`.
///
/// Each factor equals 1 at `z = 1`, so `h0(1) = sqrt(2)` regardless of how
/// many roots are folded in and in what order.
///
/// # Errors
///
/// Returns [`WaveletError::DegeneratePolynomial`] if some `z_k == 1`, which
/// an in-circle root never is.
pub fn minimum_phase_factor(
    roots: &[ComplexReal],
    precision: Precision,
) -> Result<Vec<ComplexReal>, WaveletError> {
    let one = ComplexReal::from_real(precision.int(1));
    let mut h0 = vec![ComplexReal::from_real(precision.sqrt2())];
    for zk in roots {
        let den = &one - zk;
        let lead = one
            .checked_div(&den)
            .ok_or(WaveletError::DegeneratePolynomial { degree: 1 })?;
        let constant = -(zk * &lead);
        h0 = poly_mul(&h0, &[precision.complex(&constant), precision.complex(&lead)]);
    }
    Ok(h0)
}

/// Coefficients of `((1 + z) / 2)^p`, lowest degree first.
pub fn smoothing_factor(p: usize, precision: Precision) -> Vec<Real> {
    let scale = Real::from_int(BigInt::one() << p);
    (0..=p)
        .map(|j| precision.int(binomial(p, j)) / &scale)
        .collect()
}

/// Builds `h(z) = h0(z) * ((1 + z) / 2)^p`, lowest degree first.
///
/// The result has `roots.len() + p + 1` coefficients.
///
/// # Errors
///
/// Propagates [`minimum_phase_factor`] errors.
pub fn scaling_polynomial(
    roots: &[ComplexReal],
    p: usize,
    precision: Precision,
) -> Result<Vec<ComplexReal>, WaveletError> {
    let h0 = minimum_phase_factor(roots, precision)?;
    let smoothing: Vec<ComplexReal> = smoothing_factor(p, precision)
        .into_iter()
        .map(ComplexReal::from_real)
        .collect();
    Ok(poly_mul(&h0, &smoothing))
}

/// Reads the real coefficients off `poly`, highest degree first.
///
/// Each imaginary part must be at most `tolerance` in magnitude; the real
/// parts are rounded onto `output`.
///
/// # Errors
///
/// Returns [`WaveletError::ComplexResidue`] for the first coefficient, in
/// output order, whose imaginary part exceeds `tolerance`.
pub fn extract_real(
    poly: &[ComplexReal],
    tolerance: &Real,
    output: Precision,
) -> Result<Vec<Real>, WaveletError> {
    poly.iter()
        .rev()
        .enumerate()
        .map(|(index, c)| {
            if c.is_effectively_real(tolerance) {
                Ok(output.real(&c.re))
            } else {
                Err(WaveletError::ComplexResidue {
                    index,
                    magnitude: c.im.abs().to_f64().unwrap_or(f64::INFINITY),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prec() -> Precision {
        Precision::from_bits(128).unwrap()
    }

    fn re(p: Precision, v: i64) -> ComplexReal {
        ComplexReal::from_real(p.int(v))
    }

    #[test]
    fn poly_mul_convolves() {
        let p = prec();
        // (1 + z)(1 - z) = 1 - z^2
        let prod = poly_mul(&[re(p, 1), re(p, 1)], &[re(p, 1), re(p, -1)]);
        assert_eq!(prod, vec![re(p, 1), re(p, 0), re(p, -1)]);
        assert!(poly_mul(&[], &[re(p, 1)]).is_empty());
    }

    #[test]
    fn smoothing_factor_is_binomial() {
        let p = prec();
        let s = smoothing_factor(3, p);
        let expected = [p.ratio(1, 8), p.ratio(3, 8), p.ratio(3, 8), p.ratio(1, 8)];
        assert_eq!(s, expected);
        let total: Real = s.iter().sum();
        assert_eq!(total, p.int(1));
    }

    #[test]
    fn minimum_phase_factor_is_sqrt2_at_one() {
        let p = prec();
        let roots = vec![
            ComplexReal::new(p.ratio(1, 5), p.ratio(1, 3)),
            ComplexReal::new(p.ratio(1, 5), p.ratio(-1, 3)),
            ComplexReal::from_real(p.ratio(-1, 2)),
        ];
        let h0 = minimum_phase_factor(&roots, p).unwrap();
        assert_eq!(h0.len(), 4);
        let at_one = h0.iter().fold(ComplexReal::zero(), |acc, c| acc + c);
        assert!((&at_one.re - p.sqrt2()).abs() <= p.tolerance(8));
        assert!(at_one.im.abs() <= p.tolerance(8));
    }

    #[test]
    fn minimum_phase_factor_rejects_root_at_one() {
        let p = prec();
        let err = minimum_phase_factor(&[re(p, 1)], p).unwrap_err();
        assert!(matches!(err, WaveletError::DegeneratePolynomial { degree: 1 }));
    }

    #[test]
    fn haar_polynomial() {
        let p = prec();
        let h = scaling_polynomial(&[], 1, p).unwrap();
        let coeffs = extract_real(&h, &p.epsilon(), p).unwrap();
        let half_sqrt2 = p.sqrt2().halve();
        assert_eq!(coeffs.len(), 2);
        for c in &coeffs {
            assert!((c - &half_sqrt2).abs() <= p.tolerance(2));
        }
    }

    #[test]
    fn extract_real_orders_highest_first() {
        let p = prec();
        let poly = vec![re(p, 1), re(p, 2), re(p, 3)];
        let out = extract_real(&poly, &p.epsilon(), p).unwrap();
        assert_eq!(out, vec![p.int(3), p.int(2), p.int(1)]);
    }

    #[test]
    fn extract_real_rejects_residue() {
        let p = prec();
        let poly = vec![
            re(p, 1),
            ComplexReal::new(p.int(2), p.ratio(1, 1000)),
            re(p, 3),
        ];
        let err = extract_real(&poly, &p.tolerance(10), p).unwrap_err();
        match err {
            WaveletError::ComplexResidue { index, magnitude } => {
                assert_eq!(index, 1);
                assert!((magnitude - 1e-3).abs() < 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
