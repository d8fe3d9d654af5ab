//! Bijective transforms (bijectors) for unconstrained parameterization.
//!
//! Samplers such as NUTS/HMC operate in unconstrained space. These
//! transforms map between constrained parameters `x` (angles, unit vectors,
//! limb-darkening pairs, radius/impact-parameter pairs) and unconstrained
//! `y`, providing the Jacobian correction needed for correct densities.
//!
//! Direction convention: `forward` is constrained -> unconstrained,
//! `backward` is unconstrained -> constrained, and `jacobian_det` is
//! `log|det d backward / dy|` evaluated at the unconstrained point `y`.

use ndarray::{ArrayD, ArrayViewD};
use xo_ad::Scalar;
use xo_core::{Point, Quantity, Result};

mod absolute_value;
mod angle;
mod chain;
mod impact_parameter;
mod interval;
pub(crate) mod numeric;
mod quad_limb_dark;
mod radius_impact;
mod unit_disk;
mod unit_vector;

pub use absolute_value::AbsoluteValue;
pub use angle::{Angle, DEFAULT_REGULARIZATION, Periodic};
pub use chain::Chain;
pub use impact_parameter::ImpactParameter;
pub use interval::{Interval, LogOdds};
pub use quad_limb_dark::QuadLimbDark;
pub use radius_impact::RadiusImpact;
pub use unit_disk::UnitDisk;
pub use unit_vector::UnitVector;

/// A bijective map between a constrained domain and unconstrained space.
///
/// The graph-mode methods (`forward`, `backward`, `jacobian_det`) act on a
/// single event and are generic over [`Scalar`], so they can run inside a
/// gradient-tracked computation. The numeric methods act on a batch whose
/// last axis is the event axis.
///
/// Dynamic construction parameters are looked up in `point` on every call.
pub trait Transform: Send + Sync {
    /// Stable transform name.
    fn name(&self) -> String;

    /// Map constrained -> unconstrained: `y = forward(x)`.
    ///
    /// `x` is assumed to lie in the constrained domain; outside it the result
    /// is `inf`/`nan`.
    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], point: &P) -> Result<Vec<S>>;

    /// Map unconstrained -> constrained: `x = backward(y)`.
    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<Vec<S>>;

    /// `log|det d backward / dy|` at the unconstrained point `y`, summed over the event.
    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<S>;

    /// Batch `forward` on concrete arrays.
    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>>;

    /// Batch `backward` on concrete arrays.
    ///
    /// Transforms that cannot offer this return
    /// [`Error::NotImplemented`](xo_core::Error::NotImplemented).
    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>>;
}

/// Closed set of every transform in this crate.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyTransform {
    /// [`AbsoluteValue`]
    AbsoluteValue(AbsoluteValue),
    /// [`Interval`]
    Interval(Interval),
    /// [`LogOdds`]
    LogOdds(LogOdds),
    /// [`UnitVector`]
    UnitVector(UnitVector),
    /// [`UnitDisk`]
    UnitDisk(UnitDisk),
    /// [`Angle`]
    Angle(Angle),
    /// [`Periodic`]
    Periodic(Periodic),
    /// [`QuadLimbDark`]
    QuadLimbDark(QuadLimbDark),
    /// [`RadiusImpact`]
    RadiusImpact(RadiusImpact),
    /// [`ImpactParameter`]
    ImpactParameter(ImpactParameter),
    /// [`Chain`]
    Chain(Chain),
}

macro_rules! dispatch {
    ($self:ident, $t:ident => $body:expr) => {
        match $self {
            AnyTransform::AbsoluteValue($t) => $body,
            AnyTransform::Interval($t) => $body,
            AnyTransform::LogOdds($t) => $body,
            AnyTransform::UnitVector($t) => $body,
            AnyTransform::UnitDisk($t) => $body,
            AnyTransform::Angle($t) => $body,
            AnyTransform::Periodic($t) => $body,
            AnyTransform::QuadLimbDark($t) => $body,
            AnyTransform::RadiusImpact($t) => $body,
            AnyTransform::ImpactParameter($t) => $body,
            AnyTransform::Chain($t) => $body,
        }
    };
}

impl Transform for AnyTransform {
    fn name(&self) -> String {
        dispatch!(self, t => t.name())
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], point: &P) -> Result<Vec<S>> {
        dispatch!(self, t => t.forward(x, point))
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<Vec<S>> {
        dispatch!(self, t => t.backward(y, point))
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<S> {
        dispatch!(self, t => t.jacobian_det(y, point))
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        dispatch!(self, t => t.forward_numeric(x, point))
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        dispatch!(self, t => t.backward_numeric(y, point))
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for AnyTransform {
                fn from(t: $variant) -> Self {
                    AnyTransform::$variant(t)
                }
            }
        )*
    };
}

impl_from!(
    AbsoluteValue,
    Interval,
    LogOdds,
    UnitVector,
    UnitDisk,
    Angle,
    Periodic,
    QuadLimbDark,
    RadiusImpact,
    ImpactParameter,
    Chain
);

/// `|x|` for `x` in `(-1, 1)`.
pub fn absolute_value() -> AnyTransform {
    AbsoluteValue.into()
}

/// Unit vector along the last axis.
pub fn unit_vector() -> AnyTransform {
    UnitVector.into()
}

/// Point in the open unit disk: `Chain[UnitDisk, Interval(-1, 1)]`.
pub fn unit_disk() -> Result<AnyTransform> {
    let chain = Chain::new(vec![UnitDisk.into(), Interval::new(-1.0, 1.0)?.into()])?;
    Ok(chain.into())
}

/// Angle in `(-pi, pi]` with the default regularization.
pub fn angle() -> AnyTransform {
    Angle::default().into()
}

/// Kipping (2013) triangular sampling of quadratic limb darkening.
pub fn quad_limb_dark() -> AnyTransform {
    QuadLimbDark.into()
}

/// Espinoza (2018) radius ratio / impact parameter pair.
pub fn radius_impact(
    min_radius: impl Into<Quantity>,
    max_radius: impl Into<Quantity>,
) -> Result<AnyTransform> {
    Ok(RadiusImpact::new(min_radius, max_radius)?.into())
}

/// Impact parameter in `[0, 1 + ror]`.
pub fn impact_parameter(ror: impl Into<Quantity>) -> AnyTransform {
    ImpactParameter::new(ror).into()
}
