//! Spectral factorization: from `y` roots to the minimum-phase `z` roots.
//!
//! Substituting `y = (2 - z - 1/z) / 4` maps every root `y_k` of the moment
//! polynomial onto the two roots of
//! `f(z) = -z^2/4 + (1/2 - y_k) z - 1/4`, whose product is 1. One of each
//! reciprocal pair lies inside the unit circle; that half defines the
//! minimum-phase factor.

use daub_precision::{ComplexOps, ComplexReal, Precision, Real};
use num_traits::{ToPrimitive, Zero};
use tracing::warn;

use crate::error::WaveletError;

/// Solves `a z^2 + b z + c = 0`.
///
/// Uses the cancellation-free form `q = -(b + s sqrt(b^2 - 4ac)) / 2`,
/// `z1 = q / a`, `z2 = c / q`, with the sign `s` chosen so that `b` and the
/// square root do not cancel.
///
/// # Errors
///
/// Returns [`WaveletError::DegeneratePolynomial`] if `a == 0`.
pub fn quadratic_roots(
    a: &ComplexReal,
    b: &ComplexReal,
    c: &ComplexReal,
) -> Result<[ComplexReal; 2], WaveletError> {
    let degenerate = WaveletError::DegeneratePolynomial { degree: 2 };
    if a.is_zero() {
        return Err(degenerate);
    }
    let disc = b * b - a * c * Real::from_int(4);
    let mut root = disc.principal_sqrt();
    // Re(conj(b) * root) < 0 means b and root point apart.
    if (&b.re * &root.re + &b.im * &root.im).is_negative() {
        root = -root;
    }
    let sum = b + &root;
    let q = -ComplexReal::new(sum.re.halve(), sum.im.halve());
    if q.is_zero() {
        // b == 0 and disc == 0 force c == 0: a double root at the origin.
        return Ok([ComplexReal::zero(), ComplexReal::zero()]);
    }
    let z1 = q.checked_div(a).ok_or(degenerate.clone())?;
    let z2 = c.checked_div(&q).ok_or(degenerate)?;
    Ok([z1, z2])
}

/// Maps every `y` root onto its two `z` roots.
///
/// Returns `2 * y_roots.len()` roots, in pairs, at `precision`.
///
/// # Errors
///
/// Propagates [`quadratic_roots`] errors (not reachable for the fixed
/// substitution, whose leading coefficient is `-1/4`).
pub fn substitute_roots(
    y_roots: &[ComplexReal],
    precision: Precision,
) -> Result<Vec<ComplexReal>, WaveletError> {
    let quarter = ComplexReal::from_real(precision.ratio(-1, 4));
    let half = precision.ratio(1, 2);
    let mut z_roots = Vec::with_capacity(2 * y_roots.len());
    for y in y_roots {
        let b = ComplexReal::new(&half - &y.re, -&y.im);
        let [z1, z2] = quadratic_roots(&quarter, &b, &quarter)?;
        z_roots.push(precision.complex(&z1));
        z_roots.push(precision.complex(&z2));
    }
    Ok(z_roots)
}

/// Result of splitting roots by the unit circle.
#[derive(Clone, Debug)]
pub struct Partition {
    inside: Vec<ComplexReal>,
    outside: Vec<ComplexReal>,
    near_boundary: usize,
}

impl Partition {
    /// Roots with `|z| < 1`.
    pub fn inside(&self) -> &[ComplexReal] {
        &self.inside
    }

    /// Roots with `|z| >= 1`.
    pub fn outside(&self) -> &[ComplexReal] {
        &self.outside
    }

    /// Number of roots whose modulus was within the boundary tolerance of 1.
    pub fn near_boundary(&self) -> usize {
        self.near_boundary
    }

    /// Consumes the partition, returning the in-circle roots.
    pub fn into_inside(self) -> Vec<ComplexReal> {
        self.inside
    }
}

/// Splits roots into `|z| < 1` and `|z| >= 1`.
///
/// The test is strict and has no tolerance band: a root on the circle is
/// never selected. Roots whose modulus lies within `boundary_tol` of 1 are
/// counted and logged, since rounding could have put them on either side.
pub fn partition_unit_circle(z_roots: Vec<ComplexReal>, boundary_tol: &Real) -> Partition {
    let one = Real::from_int(1);
    let mut inside = Vec::with_capacity(z_roots.len() / 2);
    let mut outside = Vec::with_capacity(z_roots.len() / 2);
    let mut near_boundary = 0;
    for z in z_roots {
        let modulus = z.modulus();
        let gap = (&modulus - &one).abs();
        if gap <= *boundary_tol {
            near_boundary += 1;
            warn!(
                re = ?z.re.to_f64(),
                im = ?z.im.to_f64(),
                gap = ?gap.to_f64(),
                "root lies on the unit circle within tolerance; classification may be unstable"
            );
        }
        if modulus < one {
            inside.push(z);
        } else {
            outside.push(z);
        }
    }
    Partition {
        inside,
        outside,
        near_boundary,
    }
}
