//! Error types for the daub-precision crate.

/// Error type for all fallible operations in the daub-precision crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecisionError {
    /// Returned when a precision of zero bits or digits is requested.
    #[error("precision must be at least one bit")]
    ZeroPrecision,

    /// Returned when a decimal string cannot be parsed.
    #[error("invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    /// Returned when parsing is requested in a radix other than 10.
    #[error("unsupported radix {radix}: only decimal literals are accepted")]
    UnsupportedRadix {
        /// Radix that was requested.
        radix: u32,
    },

    /// Returned when the square root of a negative value is requested.
    #[error("square root of negative value {0}")]
    NegativeSqrt(String),
}
