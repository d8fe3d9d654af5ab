//! Angles via a 2D isotropic embedding.
//!
//! An angle is represented by an unconstrained pair `(y0, y1)` read as
//! `(sin, cos)` up to scale; only the direction of the pair matters. This
//! removes the wrap-around discontinuity of sampling a bounded angle
//! directly. The radial direction is a nuisance: it is given a standard
//! normal weight, optionally with a `r * log(|y|^2)` pull away from the
//! origin (the regularization), which leaves the angle's distribution
//! unchanged.

use std::f64::consts::PI;

use ndarray::{ArrayD, ArrayViewD, Zip};
use xo_ad::Scalar;
use xo_core::{Error, Point, Result};

use super::Transform;
use super::numeric::{check_event, components, stack_components};

/// Default regularization amplitude for [`Angle`] and [`Periodic`].
pub const DEFAULT_REGULARIZATION: f64 = 10.0;

fn validate_regularization(regularization: Option<f64>) -> Result<Option<f64>> {
    match regularization {
        Some(r) if !r.is_finite() => {
            Err(Error::Validation(format!("regularization must be finite, got {r}")))
        }
        r => Ok(r),
    }
}

fn embedding_log_jacobian<S: Scalar>(y0: S, y1: S, regularization: Option<f64>) -> S {
    let sm = y0 * y0 + y1 * y1;
    match regularization {
        Some(r) => S::from_f64(r) * sm.ln() - S::from_f64(0.5) * sm,
        None => S::from_f64(-0.5) * sm,
    }
}

fn unit_angle_event<S: Scalar>(name: &str, x: &[S], mid: f64, delta: f64) -> Result<Vec<S>> {
    check_event(name, x, 1)?;
    let a = (x[0] - S::from_f64(mid)) / S::from_f64(delta);
    Ok(vec![a.sin(), a.cos()])
}

fn unit_angle_numeric(
    name: &str,
    x: ArrayViewD<'_, f64>,
    mid: f64,
    delta: f64,
) -> Result<ArrayD<f64>> {
    let a = x.mapv(|x| (x - mid) / delta);
    stack_components(name, &[a.mapv(f64::sin), a.mapv(f64::cos)])
}

fn atan2_numeric(
    name: &str,
    y: ArrayViewD<'_, f64>,
    mid: f64,
    delta: f64,
) -> Result<ArrayD<f64>> {
    let c = components(name, &y, 2)?;
    Ok(Zip::from(&c[0]).and(&c[1]).map_collect(|&y0, &y1| mid + delta * y0.atan2(y1)))
}

/// Angle in `(-pi, pi]`: `backward(y) = atan2(y0, y1)`, `forward(x) = (sin x, cos x)`.
///
/// Constrained event length 1, unconstrained event length 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    regularization: Option<f64>,
}

impl Default for Angle {
    fn default() -> Self {
        Self { regularization: Some(DEFAULT_REGULARIZATION) }
    }
}

impl Angle {
    /// Angle with the default regularization.
    pub fn new() -> Self {
        Self::default()
    }

    /// Angle with a custom regularization amplitude; `None` disables it.
    pub fn with_regularization(regularization: Option<f64>) -> Result<Self> {
        Ok(Self { regularization: validate_regularization(regularization)? })
    }

    /// Regularization amplitude, if enabled.
    pub fn regularization(&self) -> Option<f64> {
        self.regularization
    }
}

impl Transform for Angle {
    fn name(&self) -> String {
        "angle".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        unit_angle_event("angle", x, 0.0, 1.0)
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("angle", y, 2)?;
        Ok(vec![y[0].atan2(y[1])])
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_event("angle", y, 2)?;
        Ok(embedding_log_jacobian(y[0], y[1], self.regularization))
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        unit_angle_numeric("angle", x, 0.0, 1.0)
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        atan2_numeric("angle", y, 0.0, 1.0)
    }
}

/// Periodic quantity in `(lower, upper]`.
///
/// `backward(y) = mid + delta * atan2(y0, y1)` with `mid = (lower + upper) / 2`
/// and `delta = (upper - lower) / (2 pi)`; `forward` inverts the affine map
/// and embeds like [`Angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Periodic {
    lower: f64,
    upper: f64,
    mid: f64,
    delta: f64,
    regularization: Option<f64>,
}

impl Periodic {
    /// Periodic transform on `(lower, upper]` with the default regularization.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() || upper <= lower {
            return Err(Error::Validation(format!(
                "periodic range must be finite with upper > lower, got ({lower}, {upper})"
            )));
        }
        let mid = 0.5 * (lower + upper);
        let delta = 0.5 * (upper - lower) / PI;
        log::debug!("periodic: range=({lower}, {upper}), mid={mid}, delta={delta}");
        Ok(Self { lower, upper, mid, delta, regularization: Some(DEFAULT_REGULARIZATION) })
    }

    /// Replace the regularization amplitude; `None` disables it.
    pub fn with_regularization(self, regularization: Option<f64>) -> Result<Self> {
        Ok(Self { regularization: validate_regularization(regularization)?, ..self })
    }

    /// `(lower, upper)`.
    pub fn range(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Regularization amplitude, if enabled.
    pub fn regularization(&self) -> Option<f64> {
        self.regularization
    }
}

impl Transform for Periodic {
    fn name(&self) -> String {
        "periodic".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        unit_angle_event("periodic", x, self.mid, self.delta)
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("periodic", y, 2)?;
        Ok(vec![S::from_f64(self.mid) + S::from_f64(self.delta) * y[0].atan2(y[1])])
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_event("periodic", y, 2)?;
        Ok(embedding_log_jacobian(y[0], y[1], self.regularization))
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        unit_angle_numeric("periodic", x, self.mid, self.delta)
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        atan2_numeric("periodic", y, self.mid, self.delta)
    }
}
