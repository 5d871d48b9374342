//! # daub-precision
//!
//! Arbitrary-precision real and complex arithmetic for numerical derivations
//! that must outlive `f64`.
//!
//! ## Model
//!
//! ```mermaid
//! graph LR
//!     A["Precision::from_bits(512)?"] -->|"int / ratio / parse"| B["Real"]
//!     B -->|"Complex::new(re, im)"| C["ComplexReal"]
//!     C -->|"principal_sqrt / checked_div / modulus"| C
//!     C -->|"is_effectively_real(tol)"| D["bool"]
//!     B -->|"to_significant(digits)"| E["String"]
//! ```
//!
//! A [`Real`] is a binary fixed-point number carrying its own number of
//! fractional bits. A [`Precision`] is the context that mints values at a
//! given number of bits; it is passed explicitly wherever a computation needs
//! one, so nothing in this crate holds global state.
//!
//! ## Quick Start
//!
//! ```
//! use daub_precision::{ComplexOps, ComplexReal, Precision};
//!
//! let prec = Precision::from_bits(256).unwrap();
//! let z = ComplexReal::new(prec.int(-1), prec.int(0));
//! let i = z.principal_sqrt();
//! assert!(i.re.abs() <= prec.tolerance(4));
//! assert_eq!(i.im.to_significant(10), "1.0");
//! ```

mod complex;
mod context;
mod decimal;
mod error;
mod real;

pub use complex::{ComplexOps, ComplexReal};
pub use context::{DEFAULT_BITS, Precision};
pub use error::PrecisionError;
pub use real::Real;
