//! Unit vectors via normalization of an isotropic embedding.

use ndarray::{ArrayD, ArrayViewD, Zip};
use xo_ad::Scalar;
use xo_core::{Point, Result};

use super::Transform;
use super::numeric::{check_nonempty, last_axis};

/// Unit vector along the last axis: `backward(y) = y / |y|`.
///
/// `forward` is the identity and only seeds an unconstrained starting point;
/// it does not invert arbitrary `backward` outputs (any positive rescaling of
/// `y` maps to the same unit vector). `jacobian_det(y) = -0.5 * |y|^2` is the
/// isotropic-normal weight on the discarded radial direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitVector;

impl Transform for UnitVector {
    fn name(&self) -> String {
        "unitvector".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        check_nonempty("unitvector", x)?;
        Ok(x.to_vec())
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        check_nonempty("unitvector", y)?;
        let norm = y.iter().map(|&v| v * v).sum::<S>().sqrt();
        Ok(y.iter().map(|&v| v / norm).collect())
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_nonempty("unitvector", y)?;
        Ok(S::from_f64(-0.5) * y.iter().map(|&v| v * v).sum::<S>())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        last_axis("unitvector", &x)?;
        Ok(x.to_owned())
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let axis = last_axis("unitvector", &y)?;
        let norms = y.map_axis(axis, |lane| lane.dot(&lane).sqrt());
        let degenerate = norms.iter().filter(|&&n| n == 0.0).count();
        if degenerate > 0 {
            log::warn!("unitvector: {degenerate} zero-norm lane(s) map to nan");
        }
        let mut x = y.to_owned();
        Zip::from(x.lanes_mut(axis)).and(&norms).for_each(|mut lane, &n| lane /= n);
        Ok(x)
    }
}
