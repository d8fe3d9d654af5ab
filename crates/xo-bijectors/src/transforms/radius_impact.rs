//! Joint radius ratio / impact parameter reparameterization.
//!
//! Espinoza (2018), RNAAS 2, 209: <https://doi.org/10.3847/2515-5172/aaef38>
//!
//! Two uniforms `r = sigmoid(y)` are mapped onto the region of the `(p, b)`
//! plane with `pl <= p <= pu` and `0 <= b <= 1 + p` (every transiting
//! configuration, grazing or not). The map is piecewise: `r0 > Ar` covers
//! the band `b < 1 + pl`, `r0 <= Ar` covers the triangle above it. Both
//! pieces have the same constant Jacobian `dr (2 + pl + pu) / 2`, so the
//! induced density is uniform over the whole region with no jump at the
//! branch boundary.

use ndarray::{ArrayD, ArrayViewD, Zip};
use xo_ad::Scalar;
use xo_core::{Error, Point, Quantity, Result};

use super::Transform;
use super::numeric::{check_event, components, stack_components};
use crate::math::{logit, logit_s, sigmoid, sigmoid_log_jacobian_s, sigmoid_s};

/// Espinoza (2018) transform for the pair `(p, b)`.
///
/// Event length 2: radius ratio in component 0, impact parameter in
/// component 1. The radius bounds may be dynamic quantities; they are
/// resolved at every call.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusImpact {
    min_radius: Quantity,
    max_radius: Quantity,
}

/// Radius bounds resolved at one point, with Espinoza's derived constants.
#[derive(Debug, Clone, Copy)]
struct Geometry<S> {
    pl: S,
    pu: S,
    dr: S,
    ar: S,
}

fn validate_bounds(pl: f64, pu: f64) -> Result<()> {
    if !pl.is_finite() || !pu.is_finite() {
        return Err(Error::Validation(format!(
            "radius bounds must be finite, got ({pl}, {pu})"
        )));
    }
    if pu <= pl {
        return Err(Error::Validation(format!(
            "max_radius must exceed min_radius, got ({pl}, {pu})"
        )));
    }
    Ok(())
}

impl RadiusImpact {
    /// Create the transform for `min_radius <= p <= max_radius`.
    ///
    /// Fixed bounds are validated here; dynamic bounds are validated when resolved.
    pub fn new(min_radius: impl Into<Quantity>, max_radius: impl Into<Quantity>) -> Result<Self> {
        let min_radius = min_radius.into();
        let max_radius = max_radius.into();
        if let (Some(pl), Some(pu)) = (min_radius.as_fixed(), max_radius.as_fixed()) {
            validate_bounds(pl, pu)?;
            log::debug!(
                "radiusimpact: pl={pl}, pu={pu}, Ar={}",
                (pu - pl) / (2.0 + pl + pu)
            );
        } else {
            log::debug!("radiusimpact: dynamic bounds ({min_radius}, {max_radius})");
        }
        Ok(Self { min_radius, max_radius })
    }

    /// Lower radius bound.
    pub fn min_radius(&self) -> &Quantity {
        &self.min_radius
    }

    /// Upper radius bound.
    pub fn max_radius(&self) -> &Quantity {
        &self.max_radius
    }

    fn geometry<S: Scalar, P: Point<S> + ?Sized>(&self, point: &P) -> Result<Geometry<S>> {
        let pl: S = self.min_radius.resolve(point)?;
        let pu: S = self.max_radius.resolve(point)?;
        validate_bounds(pl.value(), pu.value())?;
        let dr = pu - pl;
        let ar = dr / (S::from_f64(2.0) + pl + pu);
        Ok(Geometry { pl, pu, dr, ar })
    }
}

impl Transform for RadiusImpact {
    fn name(&self) -> String {
        "radiusimpact".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], point: &P) -> Result<Vec<S>> {
        check_event("radiusimpact", x, 2)?;
        let Geometry { pl, dr, ar, .. } = self.geometry(point)?;
        let one = S::from_f64(1.0);
        let (p, b) = (x[0], x[1]);

        let (r0, r1) = if b <= one + pl {
            ((b / (one + pl) - one) * (one - ar) + one, (p - pl) / dr)
        } else {
            let arg = p - b - dr + one;
            let q = arg / dr;
            (ar * q * q, (pl - b + one) / arg)
        };
        Ok(vec![logit_s(r0), logit_s(r1)])
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<Vec<S>> {
        check_event("radiusimpact", y, 2)?;
        let Geometry { pl, pu, dr, ar } = self.geometry(point)?;
        let one = S::from_f64(1.0);
        let r0 = sigmoid_s(y[0]);
        let r1 = sigmoid_s(y[1]);

        let (p, b) = if r0 > ar {
            (pl + r1 * dr, (one + pl) * (one + (r0 - one) / (one - ar)))
        } else {
            let sq = (r0 / ar).sqrt();
            (pu - dr * sq * (one - r1), (one + pl) + sq * r1 * dr)
        };
        Ok(vec![p, b])
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_event("radiusimpact", y, 2)?;
        Ok(sigmoid_log_jacobian_s(y[0]) + sigmoid_log_jacobian_s(y[1]))
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("radiusimpact", &x, 2)?;
        let Geometry { pl, dr, ar, .. } = self.geometry::<f64, _>(point)?;
        let (p, b) = (&c[0], &c[1]);
        let inner = b.mapv(|b| b <= 1.0 + pl);

        let y0 = Zip::from(&inner).and(p).and(b).map_collect(|&m, &p, &b| {
            let r0 = if m {
                (b / (1.0 + pl) - 1.0) * (1.0 - ar) + 1.0
            } else {
                ar * ((p - b - dr + 1.0) / dr).powi(2)
            };
            logit(r0)
        });
        let y1 = Zip::from(&inner).and(p).and(b).map_collect(|&m, &p, &b| {
            let r1 = if m { (p - pl) / dr } else { (pl - b + 1.0) / (p - b - dr + 1.0) };
            logit(r1)
        });
        stack_components("radiusimpact", &[y0, y1])
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("radiusimpact", &y, 2)?;
        let Geometry { pl, pu, dr, ar } = self.geometry::<f64, _>(point)?;
        let r0 = c[0].mapv(sigmoid);
        let r1 = c[1].mapv(sigmoid);
        let band = r0.mapv(|r0| r0 > ar);

        let p = Zip::from(&band).and(&r0).and(&r1).map_collect(|&m, &r0, &r1| {
            if m { pl + r1 * dr } else { pu - dr * (r0 / ar).sqrt() * (1.0 - r1) }
        });
        let b = Zip::from(&band).and(&r0).and(&r1).map_collect(|&m, &r0, &r1| {
            if m {
                (1.0 + pl) * (1.0 + (r0 - 1.0) / (1.0 - ar))
            } else {
                (1.0 + pl) + (r0 / ar).sqrt() * r1 * dr
            }
        });
        stack_components("radiusimpact", &[p, b])
    }
}
