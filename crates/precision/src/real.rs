//! Binary fixed-point reals backed by [`BigInt`].

use std::cmp::Ordering;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

use num_bigint::{BigInt, Sign};
use num_traits::{Num, One, ToPrimitive, Zero};

use crate::error::PrecisionError;

/// An arbitrary-precision real number `mantissa / 2^scale`.
///
/// `scale` is the number of fractional bits carried by the value. Values with
/// `scale == 0` are exact integers. A binary operation produces a result at
/// the larger of the two operand scales: sums and differences are exact,
/// products are rounded to nearest, quotients truncate toward zero.
///
/// Because exact integers combine with any scale, the arithmetic identities
/// [`Zero`] and [`One`] need no precision of their own. Fractional values
/// should be created through a [`Precision`](crate::Precision) so that they
/// carry the working scale.
///
/// # Example
///
/// ```
/// use daub_precision::{Precision, Real};
///
/// let prec = Precision::from_bits(128).unwrap();
/// let third = prec.ratio(1, 3);
/// let one = third.clone() + third.clone() + third;
/// assert!((one - Real::from_int(1)).abs() <= prec.tolerance(2));
/// ```
#[derive(Clone, Debug)]
pub struct Real {
    mant: BigInt,
    scale: u32,
}

impl Real {
    /// Creates a value from a raw mantissa and a number of fractional bits.
    pub fn from_parts(mant: BigInt, scale: u32) -> Self {
        Self { mant, scale }
    }

    /// Creates an exact integer value.
    pub fn from_int<T: Into<BigInt>>(value: T) -> Self {
        Self {
            mant: value.into(),
            scale: 0,
        }
    }

    /// Returns the raw mantissa.
    pub fn mantissa(&self) -> &BigInt {
        &self.mant
    }

    /// Returns the number of fractional bits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Returns this value moved to `scale` fractional bits.
    ///
    /// Widening is exact; narrowing rounds to nearest (ties toward +inf).
    pub fn rescale(&self, scale: u32) -> Self {
        match scale.cmp(&self.scale) {
            Ordering::Equal => self.clone(),
            Ordering::Greater => Self {
                mant: &self.mant << (scale - self.scale) as usize,
                scale,
            },
            Ordering::Less => Self {
                mant: round_shr(&self.mant, self.scale - scale),
                scale,
            },
        }
    }

    /// Returns `true` if the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.mant.sign() == Sign::Minus
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        if self.is_negative() {
            -self
        } else {
            self.clone()
        }
    }

    /// Returns `self / 2`, rounded to nearest at the current scale.
    pub fn halve(&self) -> Self {
        if self.scale == 0 && !self.mant.bit(0) {
            return Self::from_int(&self.mant >> 1usize);
        }
        let scale = self.scale.max(1);
        Self {
            mant: round_shr(&(&self.mant << (scale - self.scale) as usize), 1),
            scale,
        }
    }

    /// Returns the square root, truncated to the current scale.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::NegativeSqrt`] for negative inputs.
    pub fn sqrt(&self) -> Result<Self, PrecisionError> {
        if self.is_negative() {
            return Err(PrecisionError::NegativeSqrt(self.to_string()));
        }
        Ok(self.sqrt_clamped())
    }

    /// Square root for values that are non-negative up to rounding.
    ///
    /// Negative inputs are treated as zero.
    pub(crate) fn sqrt_clamped(&self) -> Self {
        if self.is_negative() || self.mant.is_zero() {
            return Self {
                mant: BigInt::zero(),
                scale: self.scale,
            };
        }
        Self {
            mant: (&self.mant << self.scale as usize).sqrt(),
            scale: self.scale,
        }
    }

    fn add_real(&self, rhs: &Self) -> Self {
        let (a, b, scale) = align(self, rhs);
        Self { mant: a + b, scale }
    }

    fn sub_real(&self, rhs: &Self) -> Self {
        let (a, b, scale) = align(self, rhs);
        Self { mant: a - b, scale }
    }

    fn mul_real(&self, rhs: &Self) -> Self {
        let scale = self.scale.max(rhs.scale);
        let drop = self.scale.min(rhs.scale);
        Self {
            mant: round_shr(&(&self.mant * &rhs.mant), drop),
            scale,
        }
    }

    fn div_real(&self, rhs: &Self) -> Self {
        assert!(!rhs.mant.is_zero(), "attempt to divide a Real by zero");
        let scale = self.scale.max(rhs.scale);
        let shift = (scale + rhs.scale - self.scale) as usize;
        Self {
            mant: (&self.mant << shift) / &rhs.mant,
            scale,
        }
    }

    fn rem_real(&self, rhs: &Self) -> Self {
        assert!(!rhs.mant.is_zero(), "attempt to take a Real remainder by zero");
        let num = &self.mant << rhs.scale as usize;
        let den = &rhs.mant << self.scale as usize;
        let quotient = Self::from_int(num / den);
        self.sub_real(&rhs.mul_real(&quotient))
    }
}

/// Shifts right by `k` bits, rounding to nearest.
pub(crate) fn round_shr(m: &BigInt, k: u32) -> BigInt {
    if k == 0 {
        return m.clone();
    }
    let half = BigInt::one() << (k - 1) as usize;
    (m + half) >> k as usize
}

fn align(a: &Real, b: &Real) -> (BigInt, BigInt, u32) {
    let scale = a.scale.max(b.scale);
    (
        &a.mant << (scale - a.scale) as usize,
        &b.mant << (scale - b.scale) as usize,
        scale,
    )
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $imp:ident) => {
        impl $trait<Real> for Real {
            type Output = Real;
            fn $method(self, rhs: Real) -> Real {
                self.$imp(&rhs)
            }
        }

        impl<'a> $trait<&'a Real> for Real {
            type Output = Real;
            fn $method(self, rhs: &'a Real) -> Real {
                self.$imp(rhs)
            }
        }

        impl<'a> $trait<Real> for &'a Real {
            type Output = Real;
            fn $method(self, rhs: Real) -> Real {
                self.$imp(&rhs)
            }
        }

        impl<'a, 'b> $trait<&'b Real> for &'a Real {
            type Output = Real;
            fn $method(self, rhs: &'b Real) -> Real {
                self.$imp(rhs)
            }
        }
    };
}

forward_binop!(Add, add, add_real);
forward_binop!(Sub, sub, sub_real);
forward_binop!(Mul, mul, mul_real);
forward_binop!(Div, div, div_real);
forward_binop!(Rem, rem, rem_real);

impl Neg for Real {
    type Output = Real;
    fn neg(self) -> Real {
        Real {
            mant: -self.mant,
            scale: self.scale,
        }
    }
}

impl Neg for &Real {
    type Output = Real;
    fn neg(self) -> Real {
        Real {
            mant: -&self.mant,
            scale: self.scale,
        }
    }
}

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Real {}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.scale == other.scale {
            return self.mant.cmp(&other.mant);
        }
        let (a, b, _) = align(self, other);
        a.cmp(&b)
    }
}

impl Zero for Real {
    fn zero() -> Self {
        Self::from_int(0)
    }

    fn is_zero(&self) -> bool {
        self.mant.is_zero()
    }
}

impl One for Real {
    fn one() -> Self {
        Self::from_int(1)
    }
}

impl Default for Real {
    fn default() -> Self {
        Self::zero()
    }
}

impl Num for Real {
    type FromStrRadixErr = PrecisionError;

    fn from_str_radix(s: &str, radix: u32) -> Result<Self, PrecisionError> {
        if radix != 10 {
            return Err(PrecisionError::UnsupportedRadix { radix });
        }
        crate::decimal::parse_decimal(s, 0)
    }
}

impl std::str::FromStr for Real {
    type Err = PrecisionError;

    fn from_str(s: &str) -> Result<Self, PrecisionError> {
        crate::decimal::parse_decimal(s, 0)
    }
}

impl ToPrimitive for Real {
    fn to_i64(&self) -> Option<i64> {
        truncate(self).to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        truncate(self).to_u64()
    }

    fn to_f64(&self) -> Option<f64> {
        if self.mant.is_zero() {
            return Some(0.0);
        }
        // Round to 64 significant bits, then apply the binary exponent.
        let drop = u32::try_from(self.mant.bits().saturating_sub(F64_KEEP_BITS)).ok()?;
        let top = round_shr(&self.mant, drop).to_f64()?;
        Some(scale_by_pow2(top, i64::from(drop) - i64::from(self.scale)))
    }
}

const F64_KEEP_BITS: u64 = 64;

/// `x * 2^exp`, applied in steps so intermediate powers stay finite.
fn scale_by_pow2(mut x: f64, mut exp: i64) -> f64 {
    const STEP: i64 = 1000;
    while exp > STEP && x.is_finite() {
        x *= 2f64.powi(STEP as i32);
        exp -= STEP;
    }
    while exp < -STEP && x != 0.0 {
        x *= 2f64.powi(-STEP as i32);
        exp += STEP;
    }
    x * 2f64.powi(exp as i32)
}

fn truncate(x: &Real) -> BigInt {
    let shift = x.scale as usize;
    if x.is_negative() {
        -((-&x.mant) >> shift)
    } else {
        &x.mant >> shift
    }
}

impl From<i64> for Real {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<BigInt> for Real {
    fn from(value: BigInt) -> Self {
        Self::from_int(value)
    }
}

impl Sum for Real {
    fn sum<I: Iterator<Item = Real>>(iter: I) -> Self {
        iter.fold(Real::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Real> for Real {
    fn sum<I: Iterator<Item = &'a Real>>(iter: I) -> Self {
        iter.fold(Real::zero(), |acc, x| acc + x)
    }
}
