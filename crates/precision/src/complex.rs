//! Complex helpers over [`Real`].
//!
//! [`num_complex::Complex`] supplies the field arithmetic once [`Real`]
//! implements [`num_traits::Num`]. The operations here are the ones that need
//! more than the field axioms: moduli, square roots, and a division that does
//! not square the divisor (fixed-point squares of small values underflow).

use num_complex::Complex;
use num_traits::Zero;

use crate::real::Real;

/// Complex number with high-precision real and imaginary parts.
pub type ComplexReal = Complex<Real>;

/// Extension operations on [`ComplexReal`].
pub trait ComplexOps: Sized {
    /// Returns `|z|`.
    fn modulus(&self) -> Real;

    /// Returns the principal square root (non-negative real part).
    fn principal_sqrt(&self) -> Self;

    /// Returns `self / rhs`, or `None` if `rhs` is zero.
    fn checked_div(&self, rhs: &Self) -> Option<Self>;

    /// Returns `true` if `|Im z| <= tolerance`.
    fn is_effectively_real(&self, tolerance: &Real) -> bool;

    /// Creates a complex value with zero imaginary part.
    fn from_real(re: Real) -> Self;
}

impl ComplexOps for ComplexReal {
    fn modulus(&self) -> Real {
        let (a, b) = (self.re.abs(), self.im.abs());
        // Factor out the larger part so the squares stay representable.
        let (big, small) = if a >= b { (a, b) } else { (b, a) };
        if big.is_zero() {
            return big;
        }
        let r = &small / &big;
        let root = (Real::from_int(1) + &r * &r).sqrt_clamped();
        big * root
    }

    fn principal_sqrt(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        let r = self.modulus();
        if !self.re.is_negative() {
            let t = (&r + &self.re).halve().sqrt_clamped();
            let im = &self.im / (&t + &t);
            Complex::new(t, im)
        } else {
            let t = (&r - &self.re).halve().sqrt_clamped();
            let re = self.im.abs() / (&t + &t);
            let im = if self.im.is_negative() { -t } else { t };
            Complex::new(re, im)
        }
    }

    fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        // Smith's algorithm: scale by the larger component of the divisor.
        let (a, b, c, d) = (&self.re, &self.im, &rhs.re, &rhs.im);
        if c.abs() >= d.abs() {
            let ratio = d / c;
            let den = c + d * &ratio;
            let re = (a + b * &ratio) / &den;
            let im = (b - a * &ratio) / &den;
            Some(Complex::new(re, im))
        } else {
            let ratio = c / d;
            let den = c * &ratio + d;
            let re = (a * &ratio + b) / &den;
            let im = (b * &ratio - a) / &den;
            Some(Complex::new(re, im))
        }
    }

    fn is_effectively_real(&self, tolerance: &Real) -> bool {
        self.im.abs() <= *tolerance
    }

    fn from_real(re: Real) -> Self {
        let scale = re.scale();
        Complex::new(re, Real::zero().rescale(scale))
    }
}
