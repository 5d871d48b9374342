//! Scaling filter definitions.

use daub_precision::{Precision, Real};
use num_traits::ToPrimitive;

use crate::error::WaveletError;
use crate::properties::{Residuals, high_pass};

/// Parses a filter name into its order (number of coefficients).
///
/// Names follow the filter-length convention used throughout this crate:
/// `D4` has four taps and two vanishing moments.
///
/// # Supported Names
///
/// | Input | Order |
/// |-------|-------|
/// | `"haar"` | 2 |
/// | `"d4"`, `"D4"` | 4 |
/// | `"daub08"` | 8 |
/// | `"12"` | 12 |
///
/// Parity is not checked here; [`validate_order`] does that.
///
/// # Errors
///
/// Returns [`WaveletError::UnsupportedFilter`] if the name is not recognized.
pub fn parse_order(name: &str) -> Result<usize, WaveletError> {
    let lower = name.trim().to_lowercase();
    if lower == "haar" {
        return Ok(2);
    }
    let digits = lower
        .strip_prefix("daub")
        .or_else(|| lower.strip_prefix('d'))
        .unwrap_or(&lower);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WaveletError::UnsupportedFilter(name.to_string()));
    }
    digits
        .parse()
        .map_err(|_| WaveletError::UnsupportedFilter(name.to_string()))
}

/// Checks that `order` is a positive even integer and returns `order / 2`,
/// the number of vanishing moments.
///
/// # Errors
///
/// Returns [`WaveletError::InvalidOrder`] for zero or odd orders.
pub fn validate_order(order: usize) -> Result<usize, WaveletError> {
    if order == 0 || order % 2 != 0 {
        return Err(WaveletError::InvalidOrder { order });
    }
    Ok(order / 2)
}

/// Daubechies scaling (low-pass) filter coefficients.
///
/// Coefficients are ordered highest degree of `h(z)` first. For `D4` that is
/// the familiar `[0.4829629, 0.8365163, 0.2241439, -0.1294095]`.
///
/// # Example
///
/// ```
/// use daub_precision::Precision;
/// use daub_wavelet::{EngineConfig, daubechies};
///
/// let config = EngineConfig::new(Precision::from_bits(128).unwrap());
/// let filter = daubechies(4, &config).unwrap();
/// assert_eq!(filter.len(), 4);
/// assert_eq!(filter.vanishing_moments(), 2);
/// assert_eq!(filter.coeffs()[0].to_significant(7), "0.4829629");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ScalingFilter {
    order: usize,
    precision: Precision,
    coeffs: Vec<Real>,
}

impl ScalingFilter {
    /// Wraps `coeffs` as the scaling filter of `order` at `precision`.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`WaveletError::InvalidOrder`] | `order` zero or odd |
    /// | [`WaveletError::LengthMismatch`] | `coeffs.len() != order` |
    pub fn new(order: usize, precision: Precision, coeffs: Vec<Real>) -> Result<Self, WaveletError> {
        validate_order(order)?;
        if coeffs.len() != order {
            return Err(WaveletError::LengthMismatch {
                order,
                got: coeffs.len(),
            });
        }
        Ok(Self {
            order,
            precision,
            coeffs,
        })
    }

    /// Returns the filter order (number of coefficients).
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the number of vanishing moments, `order / 2`.
    pub fn vanishing_moments(&self) -> usize {
        self.order / 2
    }

    /// Returns the precision the coefficients are carried at.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the scaling coefficients, highest degree first.
    pub fn coeffs(&self) -> &[Real] {
        &self.coeffs
    }

    /// Returns the number of coefficients.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns `true` if there are no coefficients.
    ///
    /// Note: a valid `ScalingFilter` is never empty (minimum order is 2).
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Returns the scaling coefficients lowest degree first.
    pub fn reversed(&self) -> Vec<Real> {
        self.coeffs.iter().rev().cloned().collect()
    }

    /// Returns the wavelet (mother wavelet) coefficients.
    ///
    /// Derived from the scaling coefficients via the quadrature mirror
    /// filter relationship `g[k] = (-1)^k h[N-1-k]`.
    pub fn wavelet_coeffs(&self) -> Vec<Real> {
        high_pass(&self.coeffs)
    }

    /// Returns the coefficients rounded to `f64`.
    pub fn to_f64(&self) -> Vec<f64> {
        self.coeffs
            .iter()
            .map(|c| c.to_f64().unwrap_or(f64::NAN))
            .collect()
    }

    /// Evaluates the scaling-filter identities for these coefficients.
    pub fn residuals(&self) -> Residuals {
        Residuals::compute(&self.coeffs, self.precision)
    }

    /// Checks the scaling-filter identities against `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`WaveletError::PropertyViolation`] for the first identity
    /// whose residual exceeds `tolerance`.
    pub fn verify(&self, tolerance: &Real) -> Result<(), WaveletError> {
        self.residuals().check(tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prec() -> Precision {
        Precision::from_bits(64).unwrap()
    }

    #[test]
    fn parse_order_names() {
        assert_eq!(parse_order("haar").unwrap(), 2);
        assert_eq!(parse_order("HAAR").unwrap(), 2);
        assert_eq!(parse_order("d4").unwrap(), 4);
        assert_eq!(parse_order("D8").unwrap(), 8);
        assert_eq!(parse_order("daub04").unwrap(), 4);
        assert_eq!(parse_order("Daub58").unwrap(), 58);
        assert_eq!(parse_order(" 12 ").unwrap(), 12);
    }

    #[test]
    fn parse_order_keeps_odd_values() {
        assert_eq!(parse_order("d5").unwrap(), 5);
    }

    #[test]
    fn parse_order_invalid() {
        for bad in ["coif4", "la8", "d", "", "d-4", "db"] {
            let err = parse_order(bad).unwrap_err();
            assert!(
                matches!(err, WaveletError::UnsupportedFilter(ref s) if s == bad),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn validate_order_accepts_even() {
        assert_eq!(validate_order(2).unwrap(), 1);
        assert_eq!(validate_order(60).unwrap(), 30);
    }

    #[test]
    fn validate_order_rejects_zero_and_odd() {
        for order in [0, 1, 3, 9] {
            assert!(matches!(
                validate_order(order),
                Err(WaveletError::InvalidOrder { order: o }) if o == order
            ));
        }
    }

    #[test]
    fn new_checks_length() {
        let err = ScalingFilter::new(4, prec(), vec![Real::from_int(1); 3]).unwrap_err();
        assert!(matches!(err, WaveletError::LengthMismatch { order: 4, got: 3 }));
    }

    #[test]
    fn accessors_and_views() {
        let p = prec();
        let coeffs = vec![p.int(1), p.int(2), p.int(3), p.int(4)];
        let f = ScalingFilter::new(4, p, coeffs).unwrap();
        assert_eq!(f.order(), 4);
        assert_eq!(f.vanishing_moments(), 2);
        assert_eq!(f.precision(), p);
        assert_eq!(f.len(), 4);
        assert!(!f.is_empty());
        assert_eq!(f.reversed(), vec![p.int(4), p.int(3), p.int(2), p.int(1)]);
        assert_eq!(
            f.wavelet_coeffs(),
            vec![p.int(4), p.int(-3), p.int(2), p.int(-1)]
        );
        assert_eq!(f.to_f64(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn filter_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ScalingFilter>();
    }
}
