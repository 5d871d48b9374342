//! Vanishing-moment polynomial.

use num_bigint::BigInt;
use num_traits::One;

use crate::error::WaveletError;

/// Binomial coefficient `C(n, k)`, exact.
pub fn binomial(n: usize, k: usize) -> BigInt {
    if k > n {
        return BigInt::from(0);
    }
    let k = k.min(n - k);
    // Each partial product C(n - k + i, i) is an integer.
    (1..=k).fold(BigInt::one(), |acc, i| acc * (n - k + i) / i)
}

/// Builds the moment polynomial `P(y) = sum_k C(p-1+k, k) y^k`, `k < p`.
///
/// Coefficients are returned highest degree first, so the vector is
/// `[C(2p-2, p-1), ..., C(p, 1), C(p-1, 0)]` and has `p` entries.
///
/// # Errors
///
/// Returns [`WaveletError::InvalidOrder`] if `p == 0`.
///
/// # Example
///
/// ```
/// use daub_wavelet::moment_polynomial;
/// use num_bigint::BigInt;
///
/// let p = moment_polynomial(3).unwrap();
/// assert_eq!(p, vec![BigInt::from(6), BigInt::from(3), BigInt::from(1)]);
/// ```
pub fn moment_polynomial(p: usize) -> Result<Vec<BigInt>, WaveletError> {
    if p == 0 {
        return Err(WaveletError::InvalidOrder { order: 0 });
    }
    Ok((0..p).rev().map(|k| binomial(p - 1 + k, k)).collect())
}
