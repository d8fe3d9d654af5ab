//! Points inside the open unit disk.

use ndarray::{ArrayD, ArrayViewD, Zip};
use xo_ad::Scalar;
use xo_core::{Point, Result};

use super::Transform;
use super::numeric::{check_event, components, stack_components};

/// Square `(-1, 1)^2` to unit disk: `x0 = y0`, `x1 = y1 * sqrt(1 - y0^2)`.
///
/// Event length 2. Meant to run after an [`Interval`](super::Interval)
/// `(-1, 1)` stage (see [`unit_disk`](super::unit_disk)), which keeps `y0`
/// strictly inside `(-1, 1)`; at `|y0| = 1` the map degenerates.
///
/// Jacobian terms are `[0, 0.5 * log(1 - y0^2)]`; `jacobian_det` returns their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitDisk;

impl Transform for UnitDisk {
    fn name(&self) -> String {
        "unitdisk".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("unitdisk", x, 2)?;
        let scale = (S::from_f64(1.0) - x[0] * x[0]).sqrt();
        Ok(vec![x[0], x[1] / scale])
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("unitdisk", y, 2)?;
        let scale = (S::from_f64(1.0) - y[0] * y[0]).sqrt();
        Ok(vec![y[0], y[1] * scale])
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_event("unitdisk", y, 2)?;
        Ok(S::from_f64(0.5) * (S::from_f64(1.0) - y[0] * y[0]).ln())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("unitdisk", &x, 2)?;
        let x1 = Zip::from(&c[0]).and(&c[1]).map_collect(|&x0, &x1| x1 / (1.0 - x0 * x0).sqrt());
        stack_components("unitdisk", &[c[0].to_owned(), x1])
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("unitdisk", &y, 2)?;
        let x1 = Zip::from(&c[0]).and(&c[1]).map_collect(|&y0, &y1| y1 * (1.0 - y0 * y0).sqrt());
        stack_components("unitdisk", &[c[0].to_owned(), x1])
    }
}
