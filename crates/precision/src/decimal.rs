//! Decimal parsing and significant-digit rendering for [`Real`].

use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::PrecisionError;
use crate::real::{Real, round_shr};

/// Smallest lower bound of the fixed-notation exponent range.
const MIN_FIXED_EXP: i64 = -5;

/// Fixed notation is used for decimal exponents strictly between
/// `min(-(digits / 3), -5)` and `digits`; longer renderings tolerate more
/// leading zeros before switching to scientific notation.
fn uses_fixed_notation(exp10: i64, digits: usize) -> bool {
    let digits = digits as i64;
    let min_fixed = (-(digits / 3)).min(MIN_FIXED_EXP);
    min_fixed < exp10 && exp10 < digits
}

fn pow10(exp: u64) -> BigInt {
    num_traits::pow(BigInt::from(10u32), exp as usize)
}

/// Number of bits needed to resolve `digits` decimal places.
fn bits_for_digits(digits: u64) -> u32 {
    (digits as f64 * std::f64::consts::LOG2_10).ceil() as u32 + 4
}

/// Parses a decimal literal such as `-0.125`, `42` or `1.5e-3`.
///
/// The result carries at least `min_scale` fractional bits, and enough bits
/// to resolve every written digit. Literals without a fractional part are
/// exact.
pub(crate) fn parse_decimal(s: &str, min_scale: u32) -> Result<Real, PrecisionError> {
    let invalid = || PrecisionError::InvalidDecimal(s.to_string());
    let text = s.trim();
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (number, exp) = match body.find(['e', 'E']) {
        Some(pos) => {
            let exp: i64 = body[pos + 1..].parse().map_err(|_| invalid())?;
            (&body[..pos], exp)
        }
        None => (body, 0),
    };
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, f),
        None => (number, ""),
    };
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }

    let digits = format!("{int_part}{frac_part}");
    let mut mant: BigInt = digits.parse().map_err(|_| invalid())?;
    if negative {
        mant = -mant;
    }
    let exp10 = exp - frac_part.len() as i64;

    if exp10 >= 0 {
        let value = Real::from_int(mant * pow10(exp10 as u64));
        return Ok(value.rescale(min_scale));
    }

    let den = pow10(exp10.unsigned_abs());
    let scale = bits_for_digits(exp10.unsigned_abs()).max(min_scale);
    let num = (mant << scale as usize) * 2;
    let half = if num < BigInt::zero() { -&den } else { den.clone() };
    let rounded = (num + half) / (den * 2);
    Ok(Real::from_parts(rounded, scale))
}

/// `round(|m| / 2^scale * 10^k)` for a non-negative mantissa.
fn scaled_digits(m: &BigInt, scale: u32, k: i64) -> BigInt {
    if k >= 0 {
        return round_shr(&(m * pow10(k as u64)), scale);
    }
    let den = pow10(k.unsigned_abs()) << scale as usize;
    (m * 2 + &den) / (den * 2)
}

impl Real {
    /// Renders the value with `digits` significant decimal digits.
    ///
    /// Moderate magnitudes use fixed notation (`0.482962913`), very small or
    /// very large ones use scientific notation (`1.5e-12`, `1.23e+8`). The
    /// fixed range widens with `digits`: at 9 or 17 digits `1e-5` is already
    /// scientific, at 37 digits fixed notation reaches down to `1e-11`.
    /// Trailing zeros of the fraction are trimmed, keeping at least one
    /// fractional digit.
    ///
    /// # Example
    ///
    /// ```
    /// use daub_precision::Precision;
    ///
    /// let prec = Precision::from_bits(128).unwrap();
    /// assert_eq!(prec.ratio(1, 3).to_significant(5), "0.33333");
    /// assert_eq!(prec.ratio(3, 2).to_significant(5), "1.5");
    /// assert_eq!(prec.ratio(-1, 1_000_000).to_significant(3), "-1.0e-6");
    /// assert_eq!(prec.ratio(-1, 1_000_000).to_significant(22), "-0.000001");
    /// ```
    pub fn to_significant(&self, digits: usize) -> String {
        let digits = digits.max(1);
        let mant = self.mantissa();
        if mant.is_zero() {
            return "0.0".to_string();
        }
        let negative = self.is_negative();
        let magnitude = if negative { -mant } else { mant.clone() };

        // |x| lies in [2^(log2 - 1), 2^log2); start one decade low and correct.
        let log2 = magnitude.bits() as f64 - f64::from(self.scale());
        let mut exp10 = ((log2 - 1.0) * std::f64::consts::LOG10_2).floor() as i64;
        let text = loop {
            let n = scaled_digits(&magnitude, self.scale(), digits as i64 - 1 - exp10);
            let text = n.to_string();
            match text.len().cmp(&digits) {
                std::cmp::Ordering::Greater => exp10 += 1,
                std::cmp::Ordering::Less => exp10 -= 1,
                std::cmp::Ordering::Equal => break text,
            }
        };

        let sign = if negative { "-" } else { "" };
        if uses_fixed_notation(exp10, digits) {
            let (int_part, frac_part) = if exp10 >= 0 {
                let split = exp10 as usize + 1;
                (text[..split].to_string(), text[split..].to_string())
            } else {
                let zeros = "0".repeat((-exp10 - 1) as usize);
                ("0".to_string(), format!("{zeros}{text}"))
            };
            format!("{sign}{int_part}.{}", trim_fraction(&frac_part))
        } else {
            let exp_sign = if exp10 >= 0 { "+" } else { "" };
            format!(
                "{sign}{}.{}e{exp_sign}{exp10}",
                &text[..1],
                trim_fraction(&text[1..])
            )
        }
    }
}

fn trim_fraction(frac: &str) -> &str {
    let trimmed = frac.trim_end_matches('0');
    if trimmed.is_empty() { "0" } else { trimmed }
}

impl fmt::Display for Real {
    /// Integers print exactly; other values print `{:.N}` significant digits,
    /// defaulting to the digits resolved by the value's scale. Width, fill,
    /// alignment and `+` apply as for integers; the precision never truncates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale() == 0 && f.precision().is_none() {
            return fmt::Display::fmt(self.mantissa(), f);
        }
        let digits = f.precision().unwrap_or_else(|| {
            let frac = (f64::from(self.scale()) * std::f64::consts::LOG10_2).floor() as usize;
            let int = (&self.abs() + Real::one()).mantissa().bits() as f64
                - f64::from(self.scale());
            frac + (int.max(1.0) * std::f64::consts::LOG10_2).ceil() as usize
        });
        let text = self.abs().to_significant(digits);
        f.pad_integral(!self.is_negative(), "", &text)
    }
}
