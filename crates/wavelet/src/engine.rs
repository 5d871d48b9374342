//! Daubechies coefficient derivation.

use daub_precision::{ComplexOps, ComplexReal};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::assemble::{extract_real, scaling_polynomial};
use crate::config::EngineConfig;
use crate::error::WaveletError;
use crate::factor::{partition_unit_circle, substitute_roots};
use crate::filter::{ScalingFilter, validate_order};
use crate::moment::moment_polynomial;
use crate::roots::polyroots;

/// Roots within `2^-(bits - BOUNDARY_SLACK_BITS)` of the unit circle are
/// reported as ambiguous.
const BOUNDARY_SLACK_BITS: u32 = 16;

/// Derives the Daubechies scaling filter with `order` coefficients.
///
/// # Algorithm
///
/// With `p = order / 2` vanishing moments:
///
/// 1. Build `P(y) = sum_{k<p} C(p-1+k, k) y^k` and find its `p - 1` roots.
/// 2. Map each root through `y = (2 - z - 1/z) / 4` onto a reciprocal pair of
///    `z` roots and keep the strictly in-circle half.
/// 3. Expand `h(z) = sqrt(2) prod (z - z_k)/(1 - z_k) * ((1 + z)/2)^p` and read
///    its coefficients, highest degree first.
///
/// The pipeline runs at [`EngineConfig::working_precision`]; the result is
/// rounded to [`EngineConfig::precision`]. Each call is independent, so calls
/// for different orders may run concurrently.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`WaveletError::InvalidOrder`] | `order` zero or odd |
/// | [`WaveletError::InvalidMaxSteps`] | `config.max_steps() == 0` |
/// | [`WaveletError::NoConvergence`] | root finder exhausted its step budget |
/// | [`WaveletError::RootStagnation`] | root corrections stalled at the rounding noise floor |
/// | [`WaveletError::UnbalancedFactorization`] | fewer or more than `p - 1` roots strictly inside the unit circle |
/// | [`WaveletError::ComplexResidue`] | a coefficient kept an imaginary part above `2^-bits` |
///
/// # Example
///
/// ```
/// use daub_precision::Precision;
/// use daub_wavelet::{EngineConfig, daubechies};
///
/// let config = EngineConfig::new(Precision::from_bits(200).unwrap());
/// let haar = daubechies(2, &config).unwrap();
/// assert_eq!(haar.coeffs()[0].to_significant(10), "0.7071067812");
/// ```
#[tracing::instrument(skip(config), fields(bits = config.precision().bits()))]
pub fn daubechies(order: usize, config: &EngineConfig) -> Result<ScalingFilter, WaveletError> {
    let p = validate_order(order)?;
    config.validate()?;
    let output = config.precision();
    let working = config.working_precision();

    let moments: Vec<ComplexReal> = moment_polynomial(p)?
        .into_iter()
        .map(|c| ComplexReal::from_real(working.int(c)))
        .collect();
    let y_roots = polyroots(&moments, working, config.max_steps(), config.extra_bits())?;
    debug!(n_roots = y_roots.len(), "moment polynomial solved");

    let z_roots = substitute_roots(&y_roots, working)?;
    let partition = partition_unit_circle(z_roots, &output.tolerance(BOUNDARY_SLACK_BITS));
    debug!(
        inside = partition.inside().len(),
        outside = partition.outside().len(),
        near_boundary = partition.near_boundary(),
        "roots partitioned by the unit circle"
    );
    if partition.inside().len() != p - 1 {
        return Err(WaveletError::UnbalancedFactorization {
            expected: p - 1,
            found: partition.inside().len(),
        });
    }

    let h = scaling_polynomial(partition.inside(), p, working)?;
    let coeffs = extract_real(&h, &output.epsilon(), output)?;
    let filter = ScalingFilter::new(order, output, coeffs)?;

    debug!(
        worst_residual = ?filter.residuals().worst().to_f64(),
        "scaling filter assembled"
    );
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use daub_precision::Precision;

    fn config(bits: u32) -> EngineConfig {
        EngineConfig::new(Precision::from_bits(bits).unwrap())
    }

    #[test]
    fn haar_is_two_equal_taps() {
        let cfg = config(128);
        let f = daubechies(2, &cfg).unwrap();
        let expected = cfg.precision().sqrt2().halve();
        for c in f.coeffs() {
            assert!((c - &expected).abs() <= cfg.precision().tolerance(2));
        }
    }

    #[test]
    fn d4_matches_closed_form() {
        let cfg = config(160);
        let prec = cfg.precision();
        let f = daubechies(4, &cfg).unwrap();
        let s3 = prec.int(3).sqrt().unwrap();
        let den = prec.int(4) * prec.sqrt2();
        let expected = [
            (prec.int(1) + &s3) / &den,
            (prec.int(3) + &s3) / &den,
            (prec.int(3) - &s3) / &den,
            (prec.int(1) - &s3) / &den,
        ];
        for (got, want) in f.coeffs().iter().zip(expected.iter()) {
            assert!((got - want).abs() <= prec.tolerance(8), "{got:.30} vs {want:.30}");
        }
    }

    #[test]
    fn rejects_invalid_orders_before_work() {
        let cfg = config(64);
        for order in [0, 3, 7] {
            assert!(matches!(
                daubechies(order, &cfg),
                Err(WaveletError::InvalidOrder { .. })
            ));
        }
    }

    #[test]
    fn rejects_zero_step_budget() {
        let cfg = config(64).with_max_steps(0);
        assert!(matches!(
            daubechies(6, &cfg),
            Err(WaveletError::InvalidMaxSteps)
        ));
    }

    #[test]
    fn starved_root_finder_fails_loudly() {
        let cfg = config(256).with_max_steps(1);
        assert!(matches!(
            daubechies(12, &cfg),
            Err(WaveletError::NoConvergence { .. })
        ));
    }

    #[test]
    fn output_carries_requested_scale() {
        let cfg = config(96);
        let f = daubechies(8, &cfg).unwrap();
        assert!(f.coeffs().iter().all(|c| c.scale() == 96));
        assert_eq!(f.precision(), cfg.precision());
    }
}
