//! Polynomial root finding by Durand-Kerner (Weierstrass) iteration.

use daub_precision::{ComplexOps, ComplexReal, Precision, Real};
use num_traits::{ToPrimitive, Zero};
use tracing::{debug, trace};

use crate::error::WaveletError;

/// Extra working bits per degree, covering the rounding error amplified
/// through `prod (x_i - x_j)` for clustered roots.
const BITS_PER_DEGREE: u32 = 4;

/// Steps without improvement after which a near-converged iteration is
/// declared stalled.
const STALL_STEPS: usize = 8;

/// Finds all roots of a polynomial given highest-degree-first coefficients.
///
/// All `n` roots are refined simultaneously: each step replaces every root
/// `x_i` by `x_i - P(x_i) / prod_{j != i} (x_i - x_j)`, using updated roots as
/// soon as they are available. The iteration stops once every correction is
/// below `2^-precision.bits()`.
///
/// The iteration runs wider than `precision` by `extra_bits`, plus
/// [`conditioning_bits`] for the degree and coefficient spread, so the
/// rounding noise floor stays below the convergence bound as the degree
/// grows. Converged roots have parts smaller than the bound snapped to zero,
/// are sorted by `(|Im|, Re)`, and are rounded onto `precision`.
///
/// Multiple roots converge only linearly; give them a larger `max_steps`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::DegeneratePolynomial`] | leading coefficient is zero |
/// | [`WaveletError::NoConvergence`] | corrections still above the bound after `max_steps` steps |
/// | [`WaveletError::RootStagnation`] | corrections stopped shrinking near, but above, the bound |
pub fn polyroots(
    coeffs: &[ComplexReal],
    precision: Precision,
    max_steps: usize,
    extra_bits: u32,
) -> Result<Vec<ComplexReal>, WaveletError> {
    let degree = coeffs.len().saturating_sub(1);
    if degree == 0 {
        return Ok(Vec::new());
    }

    let wp = precision.with_extra(extra_bits.saturating_add(conditioning_bits(coeffs)));
    let lead = wp.complex(&coeffs[0]);
    let monic: Vec<ComplexReal> = coeffs
        .iter()
        .map(|c| wp.complex(c).checked_div(&lead))
        .collect::<Option<_>>()
        .ok_or(WaveletError::DegeneratePolynomial { degree })?;

    if degree == 1 {
        return Ok(vec![precision.complex(&-&monic[1])]);
    }

    let tol = precision.epsilon();
    let stall_floor = precision.tolerance(precision.bits() / 2);
    let mut roots = initial_guesses(degree, wp);
    let mut corrections = vec![wp.int(1); degree];
    let mut best: Option<Real> = None;
    let mut since_best = 0;
    let mut steps = 0;
    debug!(degree, bits = wp.bits(), "solving polynomial");

    while steps < max_steps && largest(&corrections) >= tol {
        for i in 0..degree {
            let x = roots[i].clone();
            let mut delta = horner(&monic, &x);
            for (j, other) in roots.iter().enumerate() {
                if j == i {
                    continue;
                }
                // Coincident estimates are skipped; the next step separates them.
                if let Some(q) = delta.checked_div(&(&x - other)) {
                    delta = q;
                }
            }
            corrections[i] = delta.modulus();
            roots[i] = x - delta;
        }
        steps += 1;

        let current = largest(&corrections);
        trace!(step = steps, correction = ?current.to_f64(), "durand-kerner step");
        if best.as_ref().is_none_or(|b| current < *b) {
            best = Some(current);
            since_best = 0;
        } else {
            since_best += 1;
        }
        if since_best >= STALL_STEPS {
            if let Some(b) = best.as_ref().filter(|b| **b < stall_floor && **b >= tol) {
                return Err(WaveletError::RootStagnation {
                    degree,
                    steps,
                    bits: wp.bits(),
                    residual: b.to_f64().unwrap_or(f64::INFINITY),
                });
            }
        }
    }

    let residual = largest(&corrections);
    if residual >= tol {
        return Err(WaveletError::NoConvergence {
            degree,
            steps,
            residual: residual.to_f64().unwrap_or(f64::INFINITY),
        });
    }
    debug!(degree, steps, "polynomial roots converged");

    let mut roots: Vec<ComplexReal> = roots
        .into_iter()
        .map(|z| precision.complex(&snap_small_parts(z, &tol)))
        .collect();
    roots.sort_by(|a, b| {
        a.im.abs()
            .cmp(&b.im.abs())
            .then_with(|| a.re.cmp(&b.re))
    });
    Ok(roots)
}

/// Bits the root finder adds on top of `extra_bits` for `coeffs`:
/// [`BITS_PER_DEGREE`] per degree plus the binary spread between the largest
/// and smallest non-zero coefficient magnitudes.
pub fn conditioning_bits(coeffs: &[ComplexReal]) -> u32 {
    let degree = coeffs.len().saturating_sub(1);
    let exponents: Vec<i64> = coeffs
        .iter()
        .map(|c| c.modulus())
        .filter(|m| !m.is_zero())
        .map(|m| m.mantissa().bits() as i64 - i64::from(m.scale()))
        .collect();
    let spread = match (exponents.iter().max(), exponents.iter().min()) {
        (Some(hi), Some(lo)) => (hi - lo) as u64,
        _ => 0,
    };
    let per_degree = u64::from(BITS_PER_DEGREE) * degree as u64;
    u32::try_from(per_degree + spread).unwrap_or(u32::MAX)
}

/// Evaluates a highest-degree-first polynomial at `x`.
pub fn horner(coeffs: &[ComplexReal], x: &ComplexReal) -> ComplexReal {
    let mut terms = coeffs.iter();
    let Some(first) = terms.next() else {
        return ComplexReal::zero();
    };
    terms.fold(first.clone(), |acc, c| &acc * x + c)
}

/// Starting points `(0.4 + 0.9i)^k`, spread over a spiral so no two
/// coincide and none is real.
fn initial_guesses(degree: usize, wp: Precision) -> Vec<ComplexReal> {
    let base = ComplexReal::new(wp.ratio(2, 5), wp.ratio(9, 10));
    let mut guesses = Vec::with_capacity(degree);
    let mut z = ComplexReal::new(wp.int(1), wp.int(0));
    for _ in 0..degree {
        guesses.push(z.clone());
        z = &z * &base;
    }
    guesses
}

fn largest(values: &[Real]) -> Real {
    values.iter().max().cloned().unwrap_or_else(Real::zero)
}

fn snap_small_parts(z: ComplexReal, tol: &Real) -> ComplexReal {
    if z.modulus() < *tol {
        return ComplexReal::new(Real::zero(), Real::zero());
    }
    let re = if z.re.abs() < *tol { Real::zero() } else { z.re };
    let im = if z.im.abs() < *tol { Real::zero() } else { z.im };
    ComplexReal::new(re, im)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prec() -> Precision {
        Precision::from_bits(200).unwrap()
    }

    fn real_poly(p: Precision, coeffs: &[i64]) -> Vec<ComplexReal> {
        coeffs
            .iter()
            .map(|&c| ComplexReal::from_real(p.int(c)))
            .collect()
    }

    fn assert_is_root(coeffs: &[ComplexReal], z: &ComplexReal, p: Precision) {
        let value = horner(coeffs, z).modulus();
        assert!(value <= p.tolerance(24), "|P(z)| = {value:.5}");
    }

    #[test]
    fn horner_evaluates() {
        let p = prec();
        let coeffs = real_poly(p, &[2, -3, 1]); // 2x^2 - 3x + 1
        let v = horner(&coeffs, &ComplexReal::from_real(p.int(3)));
        assert_eq!(v.re, p.int(10));
        assert!(horner(&[], &v).is_zero());
    }

    #[test]
    fn constant_has_no_roots() {
        let p = prec();
        let roots = polyroots(&real_poly(p, &[5]), p, 10, 8).unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn linear_root_is_exact() {
        let p = prec();
        let roots = polyroots(&real_poly(p, &[2, 1]), p, 10, 8).unwrap();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].re, p.ratio(-1, 2));
        assert!(roots[0].im.is_zero());
    }

    #[test]
    fn quadratic_with_complex_pair() {
        let p = prec();
        let coeffs = real_poly(p, &[1, -2, 2]); // roots 1 +- i
        let roots = polyroots(&coeffs, p, 100, 32).unwrap();
        assert_eq!(roots.len(), 2);
        for z in &roots {
            assert_is_root(&coeffs, z, p);
            assert!((&z.re - p.int(1)).abs() <= p.tolerance(8));
            assert!((z.im.abs() - p.int(1)).abs() <= p.tolerance(8));
        }
        // Sorted by |Im| then Re; conjugates share |Im|, so order by Re is a tie.
        assert_eq!(roots[0].im.abs(), roots[1].im.abs());
    }

    #[test]
    fn cubic_real_roots_are_sorted() {
        let p = prec();
        let coeffs = real_poly(p, &[1, -6, 11, -6]); // roots 1, 2, 3
        let roots = polyroots(&coeffs, p, 100, 32).unwrap();
        for (z, expected) in roots.iter().zip([1, 2, 3]) {
            assert!(z.im.is_zero(), "imaginary part should be snapped to zero");
            assert!((&z.re - p.int(expected)).abs() <= p.tolerance(8));
        }
    }

    #[test]
    fn moment_polynomial_roots_are_roots() {
        let p = prec();
        // P(y) for p = 6: [C(10,5), C(9,4), C(8,3), C(7,2), C(6,1), 1]
        let coeffs = real_poly(p, &[252, 126, 56, 21, 6, 1]);
        let roots = polyroots(&coeffs, p, 200, 64).unwrap();
        assert_eq!(roots.len(), 5);
        let scaled: Vec<ComplexReal> = coeffs
            .iter()
            .map(|c| c.checked_div(&coeffs[0]).unwrap())
            .collect();
        for z in &roots {
            assert_is_root(&scaled, z, p);
        }
    }

    #[test]
    fn conditioning_grows_with_degree_and_spread() {
        let p = prec();
        // 4 bits per degree plus log2(252) - log2(1) rounded to whole bits.
        assert_eq!(conditioning_bits(&real_poly(p, &[252, 126, 56, 21, 6, 1])), 27);
        assert_eq!(conditioning_bits(&real_poly(p, &[1, 0, -1])), 8);
        assert_eq!(conditioning_bits(&real_poly(p, &[7])), 0);
    }

    #[test]
    fn zero_leading_coefficient_is_degenerate() {
        let p = prec();
        let coeffs = real_poly(p, &[0, 1, 1]);
        assert!(matches!(
            polyroots(&coeffs, p, 10, 8),
            Err(WaveletError::DegeneratePolynomial { degree: 2 })
        ));
    }

    #[test]
    fn exhausted_budget_is_reported() {
        let p = prec();
        let coeffs = real_poly(p, &[252, 126, 56, 21, 6, 1]);
        let err = polyroots(&coeffs, p, 2, 64).unwrap_err();
        match err {
            WaveletError::NoConvergence { degree, steps, .. } => {
                assert_eq!(degree, 5);
                assert_eq!(steps, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_runs_are_identical() {
        let p = prec();
        let coeffs = real_poly(p, &[20, 10, 4, 1]);
        let a = polyroots(&coeffs, p, 200, 64).unwrap();
        let b = polyroots(&coeffs, p, 200, 64).unwrap();
        assert_eq!(a, b);
    }
}
