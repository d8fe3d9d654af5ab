//! # xo-ad
//!
//! Automatic differentiation (AD) primitives for the xo transform crates.
//!
//! Provides:
//! - **Forward-mode AD** via [`dual::Dual`] numbers
//! - [`Scalar`] trait for writing transform code once, generic over `f64` and `Dual`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dual;
pub mod scalar;

pub use dual::Dual;
pub use scalar::Scalar;
