//! Configuration for coefficient derivation.

use daub_precision::Precision;

use crate::error::WaveletError;

/// Default guard bits added on top of the requested precision.
pub const DEFAULT_GUARD_BITS: u32 = 64;

/// Default iteration budget of the root finder.
pub const DEFAULT_MAX_STEPS: usize = 200;

/// Default extra bits carried inside the root finder.
pub const DEFAULT_EXTRA_BITS: u32 = 64;

/// Configuration for one coefficient derivation.
///
/// The requested precision is what the returned coefficients are rounded to.
/// Internally the engine works `guard_bits` wider, and the root finder a
/// further `extra_bits` wider plus a margin that grows with the degree (see
/// [`conditioning_bits`](crate::conditioning_bits)), because repeated
/// polynomial products amplify rounding error.
///
/// # Example
///
/// ```
/// use daub_precision::Precision;
/// use daub_wavelet::EngineConfig;
///
/// let config = EngineConfig::new(Precision::from_bits(256).unwrap())
///     .with_guard_bits(32)
///     .with_max_steps(400);
///
/// assert_eq!(config.working_precision().bits(), 288);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Precision of the returned coefficients.
    precision: Precision,
    /// Over-provisioning of the working precision.
    guard_bits: u32,
    /// Root-finder iteration cap.
    max_steps: usize,
    /// Root-finder internal extra precision.
    extra_bits: u32,
}

impl EngineConfig {
    /// Creates a configuration producing coefficients at `precision`.
    ///
    /// Defaults: `guard_bits = 64`, `max_steps = 200`, `extra_bits = 64`.
    pub fn new(precision: Precision) -> Self {
        Self {
            precision,
            guard_bits: DEFAULT_GUARD_BITS,
            max_steps: DEFAULT_MAX_STEPS,
            extra_bits: DEFAULT_EXTRA_BITS,
        }
    }

    /// Sets the guard bits added to the working precision.
    pub fn with_guard_bits(mut self, guard_bits: u32) -> Self {
        self.guard_bits = guard_bits;
        self
    }

    /// Sets the root-finder iteration cap.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets the extra bits carried inside the root finder.
    pub fn with_extra_bits(mut self, extra_bits: u32) -> Self {
        self.extra_bits = extra_bits;
        self
    }

    /// Returns the precision of the returned coefficients.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns the guard bits.
    pub fn guard_bits(&self) -> u32 {
        self.guard_bits
    }

    /// Returns the root-finder iteration cap.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the root-finder extra bits.
    pub fn extra_bits(&self) -> u32 {
        self.extra_bits
    }

    /// Returns the precision the pipeline runs at.
    pub fn working_precision(&self) -> Precision {
        self.precision.with_extra(self.guard_bits)
    }

    /// Validates this configuration.
    ///
    /// Returns an error if `max_steps` is zero.
    pub fn validate(&self) -> Result<(), WaveletError> {
        if self.max_steps == 0 {
            return Err(WaveletError::InvalidMaxSteps);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}
