//! Precision context.

use num_bigint::BigInt;
use num_traits::One;

use crate::complex::ComplexReal;
use crate::decimal::parse_decimal;
use crate::error::PrecisionError;
use crate::real::Real;

/// A working precision, in binary fractional bits.
///
/// `Precision` is a plain value: every computation receives the context it
/// should run at instead of reading a process-wide setting, so independent
/// computations can run on different threads at different precisions.
///
/// # Example
///
/// ```
/// use daub_precision::Precision;
///
/// let prec = Precision::from_digits(50).unwrap();
/// assert_eq!(prec.bits(), 167);
/// assert_eq!(prec.digits(), 50);
///
/// let wide = prec.with_extra(64);
/// assert_eq!(wide.bits(), 231);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Precision {
    bits: u32,
}

/// Bits carried by [`Precision::default`] (about 154 decimal digits).
pub const DEFAULT_BITS: u32 = 512;

impl Default for Precision {
    fn default() -> Self {
        Self { bits: DEFAULT_BITS }
    }
}

impl Precision {
    /// Creates a precision of `bits` fractional bits.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::ZeroPrecision`] if `bits == 0`.
    pub fn from_bits(bits: u32) -> Result<Self, PrecisionError> {
        if bits == 0 {
            return Err(PrecisionError::ZeroPrecision);
        }
        Ok(Self { bits })
    }

    /// Creates the smallest precision resolving `digits` decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::ZeroPrecision`] if `digits == 0`.
    pub fn from_digits(digits: u32) -> Result<Self, PrecisionError> {
        if digits == 0 {
            return Err(PrecisionError::ZeroPrecision);
        }
        let bits = (f64::from(digits) * std::f64::consts::LOG2_10).ceil() as u32;
        Self::from_bits(bits)
    }

    /// Returns the number of fractional bits.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Returns the number of decimal digits fully resolved at this precision.
    pub fn digits(&self) -> u32 {
        (f64::from(self.bits) * std::f64::consts::LOG10_2).floor() as u32
    }

    /// Returns a wider precision carrying `extra` guard bits.
    pub fn with_extra(&self, extra: u32) -> Self {
        Self {
            bits: self.bits.saturating_add(extra),
        }
    }

    /// Returns `value` as an integer carried at this precision.
    pub fn int<T: Into<BigInt>>(&self, value: T) -> Real {
        Real::from_int(value).rescale(self.bits)
    }

    /// Returns `num / den` at this precision.
    ///
    /// # Panics
    ///
    /// Panics if `den == 0`.
    pub fn ratio(&self, num: i64, den: i64) -> Real {
        self.int(num) / Real::from_int(den)
    }

    /// Rounds `value` onto this precision.
    pub fn real(&self, value: &Real) -> Real {
        value.rescale(self.bits)
    }

    /// Rounds both parts of `z` onto this precision.
    pub fn complex(&self, z: &ComplexReal) -> ComplexReal {
        ComplexReal::new(self.real(&z.re), self.real(&z.im))
    }

    /// Parses a decimal literal at this precision.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::InvalidDecimal`] for malformed input.
    pub fn parse(&self, s: &str) -> Result<Real, PrecisionError> {
        parse_decimal(s, self.bits).map(|x| x.rescale(self.bits))
    }

    /// Returns `2^-bits`, the smallest positive value at this precision.
    pub fn epsilon(&self) -> Real {
        Real::from_parts(BigInt::one(), self.bits)
    }

    /// Returns `2^-(bits - slack)`, an error bound `slack` bits looser than
    /// [`epsilon`](Self::epsilon).
    ///
    /// The slack saturates so the bound never exceeds 1.
    pub fn tolerance(&self, slack: u32) -> Real {
        let slack = slack.min(self.bits);
        Real::from_parts(BigInt::one() << slack as usize, self.bits)
    }

    /// Returns `10^-digits` at this precision, for comparisons phrased in
    /// decimal digits.
    pub fn decimal_tolerance(&self, digits: u32) -> Real {
        let den = num_traits::pow(BigInt::from(10u32), digits as usize);
        self.int(1) / Real::from_int(den)
    }

    /// Returns `sqrt(2)` at this precision.
    pub fn sqrt2(&self) -> Real {
        self.int(2).sqrt_clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    #[test]
    fn zero_precision_rejected() {
        assert_eq!(Precision::from_bits(0), Err(PrecisionError::ZeroPrecision));
        assert_eq!(Precision::from_digits(0), Err(PrecisionError::ZeroPrecision));
    }

    #[test]
    fn digits_round_trip() {
        let prec = Precision::from_digits(150).unwrap();
        assert_eq!(prec.bits(), 499);
        assert_eq!(prec.digits(), 150);
        assert_eq!(Precision::from_bits(512).unwrap().digits(), 154);
    }

    #[test]
    fn default_is_512_bits() {
        assert_eq!(Precision::default().bits(), DEFAULT_BITS);
        assert_eq!(Precision::default().digits(), 154);
    }

    #[test]
    fn with_extra_saturates() {
        let prec = Precision::from_bits(u32::MAX - 1).unwrap();
        assert_eq!(prec.with_extra(10).bits(), u32::MAX);
    }

    #[test]
    fn constants_carry_scale() {
        let prec = Precision::from_bits(96).unwrap();
        assert_eq!(prec.int(3).scale(), 96);
        assert_eq!(prec.ratio(1, 4).scale(), 96);
        assert_eq!(prec.ratio(1, 4).to_f64(), Some(0.25));
        assert_eq!(prec.epsilon().scale(), 96);
    }

    #[test]
    fn tolerance_is_looser_than_epsilon() {
        let prec = Precision::from_bits(64).unwrap();
        assert!(prec.tolerance(8) > prec.epsilon());
        assert_eq!(prec.tolerance(0), prec.epsilon());
        assert_eq!(prec.tolerance(1000), prec.int(1));
    }

    #[test]
    fn decimal_tolerance_value() {
        let prec = Precision::from_bits(128).unwrap();
        let tol = prec.decimal_tolerance(3).to_f64().unwrap();
        assert!((tol - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn sqrt2_squares_to_two() {
        let prec = Precision::from_bits(256).unwrap();
        let s = prec.sqrt2();
        let err = (&s * &s - prec.int(2)).abs();
        assert!(err <= prec.tolerance(3));
    }

    #[test]
    fn parse_lands_on_precision() {
        let prec = Precision::from_bits(80).unwrap();
        let x = prec.parse("0.70710678118654752440").unwrap();
        assert_eq!(x.scale(), 80);
        let err = (x - prec.sqrt2().halve()).abs();
        assert!(err <= prec.decimal_tolerance(19));
    }

    #[test]
    fn complex_rounds_both_parts() {
        let prec = Precision::from_bits(4).unwrap();
        let z = ComplexReal::new(Real::from_parts(BigInt::from(3), 6), Real::from_int(1));
        let r = prec.complex(&z);
        assert_eq!(r.re.scale(), 4);
        assert_eq!(r.im.scale(), 4);
    }
}
