//! # daub-wavelet
//!
//! Derivation of Daubechies scaling-filter coefficients at arbitrary
//! precision.
//!
//! ## Derivation Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["order N, EngineConfig"] -->|"validate_order"| B["p = N / 2"]
//!     B -->|"moment_polynomial(p)"| C["P(y)"]
//!     C -->|"polyroots"| D["y roots (p - 1)"]
//!     D -->|"substitute_roots"| E["z roots (2p - 2)"]
//!     E -->|"partition_unit_circle"| F["|z| < 1"]
//!     F -->|"scaling_polynomial"| G["h(z)"]
//!     G -->|"extract_real"| H["ScalingFilter"]
//! ```
//!
//! ## Supported Filters
//!
//! Any even order `N >= 2`. Names follow the length convention:
//!
//! | Name | Length | Vanishing moments |
//! |------|--------|-------------------|
//! | `haar` | 2 | 1 |
//! | `d4` | 4 | 2 |
//! | `d8` | 8 | 4 |
//! | `daub58` | 58 | 29 |
//!
//! ## Quick Start
//!
//! ```
//! use daub_precision::Precision;
//! use daub_wavelet::{EngineConfig, daubechies, parse_order};
//!
//! let config = EngineConfig::new(Precision::from_bits(256).unwrap());
//! let filter = daubechies(parse_order("d6").unwrap(), &config).unwrap();
//!
//! assert_eq!(filter.len(), 6);
//! filter.verify(&config.precision().tolerance(32)).unwrap();
//! ```

mod assemble;
mod config;
mod engine;
mod error;
mod factor;
mod filter;
mod moment;
mod properties;
mod roots;

pub use assemble::{extract_real, minimum_phase_factor, poly_mul, scaling_polynomial, smoothing_factor};
pub use config::{DEFAULT_EXTRA_BITS, DEFAULT_GUARD_BITS, DEFAULT_MAX_STEPS, EngineConfig};
pub use engine::daubechies;
pub use error::WaveletError;
pub use factor::{Partition, partition_unit_circle, quadratic_roots, substitute_roots};
pub use filter::{ScalingFilter, parse_order, validate_order};
pub use moment::{binomial, moment_polynomial};
pub use properties::{Residuals, high_pass};
pub use roots::{conditioning_bits, horner, polyroots};
