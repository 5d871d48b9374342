//! Error types for the daub-wavelet crate.

use daub_precision::PrecisionError;

/// Error type for all fallible operations in the daub-wavelet crate.
///
/// Every variant is local to one derivation: a failure for one filter order
/// says nothing about any other order.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WaveletError {
    /// Returned when the filter order is zero or odd.
    #[error("invalid filter order {order}: must be a positive even integer")]
    InvalidOrder {
        /// Order that was requested.
        order: usize,
    },

    /// Returned when an unsupported wavelet filter name is provided.
    #[error("unsupported wavelet filter: {0}")]
    UnsupportedFilter(String),

    /// Returned when the root-finder step budget is zero.
    #[error("max_steps must be at least 1")]
    InvalidMaxSteps,

    /// Returned when a precision setting is invalid.
    #[error("invalid precision: {0}")]
    Precision(#[from] PrecisionError),

    /// Returned when a polynomial handed to the root finder has a zero
    /// leading coefficient.
    #[error("degenerate polynomial of degree {degree}: leading coefficient is zero")]
    DegeneratePolynomial {
        /// Nominal degree of the polynomial.
        degree: usize,
    },

    /// Returned when root finding exhausts its step budget.
    #[error(
        "root finding did not converge for degree {degree} after {steps} steps \
         (largest correction {residual:e})"
    )]
    NoConvergence {
        /// Degree of the polynomial being solved.
        degree: usize,
        /// Steps taken before giving up.
        steps: usize,
        /// Largest root correction in the final step.
        residual: f64,
    },

    /// Returned when root corrections stop shrinking above the convergence
    /// bound: rounding noise at the working precision dominates, so more
    /// steps cannot help.
    #[error(
        "root finding stalled for degree {degree} after {steps} steps at {bits} bits \
         (largest correction {residual:e}); increase extra_bits"
    )]
    RootStagnation {
        /// Degree of the polynomial being solved.
        degree: usize,
        /// Steps taken before giving up.
        steps: usize,
        /// Internal precision of the iteration.
        bits: u32,
        /// Smallest largest-correction reached.
        residual: f64,
    },

    /// Returned when the unit-circle partition does not select one root from
    /// each reciprocal pair.
    #[error("unbalanced factorization: expected {expected} roots inside the unit circle, found {found}")]
    UnbalancedFactorization {
        /// Number of in-circle roots required for the filter order.
        expected: usize,
        /// Number of roots that passed the strict `|z| < 1` test.
        found: usize,
    },

    /// Returned when an assembled coefficient carries a non-negligible
    /// imaginary part.
    #[error("coefficient {index} has imaginary residue {magnitude:e} above tolerance")]
    ComplexResidue {
        /// Output position of the offending coefficient.
        index: usize,
        /// Magnitude of the imaginary part.
        magnitude: f64,
    },

    /// Returned when a coefficient vector has the wrong length for its order.
    #[error("coefficient count mismatch: order {order} needs {order} coefficients, got {got}")]
    LengthMismatch {
        /// Filter order.
        order: usize,
        /// Number of coefficients supplied.
        got: usize,
    },

    /// Returned when a derived filter fails one of the scaling-filter
    /// identities.
    #[error("{property} violated: residual {residual:e} exceeds tolerance")]
    PropertyViolation {
        /// Name of the violated identity.
        property: &'static str,
        /// Residual that exceeded the tolerance.
        residual: f64,
    },
}
