//! Scaling-filter identities, evaluated as residuals.
//!
//! A Daubechies scaling filter `h` of length `N = 2p` satisfies:
//!
//! | Identity | Residual |
//! |----------|----------|
//! | normalization | `|sum h - sqrt(2)|` |
//! | energy | `|sum h^2 - 1|` |
//! | even-shift orthogonality | `|sum_k h[k] h[k + 2m]|`, `m = 1..p-1` |
//! | vanishing moments | `|sum_k k^m g[k]| / sum_k |k^m g[k]|`, `m = 0..p-1` |
//!
//! where `g[k] = (-1)^k h[N-1-k]` is the quadrature-mirror high-pass filter.
//! Moment residuals are relative because `k^m` grows far past the filter
//! magnitudes.

use daub_precision::{Precision, Real};
use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

use crate::error::WaveletError;

/// Quadrature-mirror high-pass companion `g[k] = (-1)^k h[N-1-k]`.
pub fn high_pass(h: &[Real]) -> Vec<Real> {
    h.iter()
        .rev()
        .enumerate()
        .map(|(k, c)| if k % 2 == 0 { c.clone() } else { -c })
        .collect()
}

/// Residuals of every scaling-filter identity for one coefficient vector.
#[derive(Clone, Debug)]
pub struct Residuals {
    sum: Real,
    energy: Real,
    shifts: Vec<Real>,
    moments: Vec<Real>,
}

impl Residuals {
    /// Evaluates all identities for `h` at `precision`.
    pub fn compute(h: &[Real], precision: Precision) -> Self {
        let p = h.len() / 2;
        let sum = (h.iter().sum::<Real>() - precision.sqrt2()).abs();
        let energy = (h.iter().map(|c| c * c).sum::<Real>() - precision.int(1)).abs();

        let shifts = (1..p)
            .map(|m| {
                h.iter()
                    .zip(h.iter().skip(2 * m))
                    .map(|(a, b)| a * b)
                    .sum::<Real>()
                    .abs()
            })
            .collect();

        let g = high_pass(h);
        let moments = (0..p)
            .map(|m| {
                let mut signed = Real::zero();
                let mut magnitude = Real::zero();
                for (k, gk) in g.iter().enumerate() {
                    let weight = Real::from_int(num_traits::pow(BigInt::from(k), m));
                    let term = gk * &weight;
                    magnitude = magnitude + term.abs();
                    signed = signed + term;
                }
                if magnitude.is_zero() {
                    return precision.real(&magnitude);
                }
                precision.real(&signed.abs()) / magnitude
            })
            .collect();

        Self {
            sum,
            energy,
            shifts,
            moments,
        }
    }

    /// Returns `|sum h - sqrt(2)|`.
    pub fn sum(&self) -> &Real {
        &self.sum
    }

    /// Returns `|sum h^2 - 1|`.
    pub fn energy(&self) -> &Real {
        &self.energy
    }

    /// Returns the even-shift residuals for `m = 1..p-1`.
    pub fn shifts(&self) -> &[Real] {
        &self.shifts
    }

    /// Returns the relative moment residuals for `m = 0..p-1`.
    pub fn moments(&self) -> &[Real] {
        &self.moments
    }

    /// Returns the largest residual across all identities.
    pub fn worst(&self) -> Real {
        self.named()
            .map(|(_, r)| r.clone())
            .max()
            .unwrap_or_else(Real::zero)
    }

    /// Checks every identity against `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::PropertyViolation`] naming the first identity
    /// whose residual exceeds `tolerance`.
    pub fn check(&self, tolerance: &Real) -> Result<(), WaveletError> {
        match self.named().find(|(_, r)| *r > tolerance) {
            Some((property, residual)) => Err(WaveletError::PropertyViolation {
                property,
                residual: residual.to_f64().unwrap_or(f64::INFINITY),
            }),
            None => Ok(()),
        }
    }

    fn named(&self) -> impl Iterator<Item = (&'static str, &Real)> {
        std::iter::once(("normalization", &self.sum))
            .chain(std::iter::once(("energy", &self.energy)))
            .chain(self.shifts.iter().map(|r| ("even-shift orthogonality", r)))
            .chain(self.moments.iter().map(|r| ("vanishing moments", r)))
    }
}
