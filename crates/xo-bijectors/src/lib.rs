//! Invertible parameter transforms (bijectors) for exoplanet posteriors.
//!
//! This crate maps physically constrained parameters (angles, unit vectors,
//! limb-darkening coefficients, coupled radius ratio / impact parameter
//! pairs) to unconstrained space for gradient-based sampling, and back:
//! - [`transforms`]: the [`Transform`](transforms::Transform) contract, every
//!   bijector, and [`Chain`](transforms::Chain) composition
//! - [`config`]: serde descriptions of transforms
//! - [`math`]: stable log/exp/sigmoid primitives

pub mod config;
pub mod math;
pub mod transforms;

pub use config::TransformConfig;
pub use transforms::{AnyTransform, Chain, Transform};
pub use xo_ad::{Dual, Scalar};
pub use xo_core::{Error, NoPoint, Point, Quantity, Result, VarId};
