//! Impact parameter bounded by a dynamic radius ratio.

use ndarray::{ArrayD, ArrayViewD};
use xo_ad::Scalar;
use xo_core::{Error, Point, Quantity, Result};

use super::{LogOdds, Transform};

/// Impact parameter in `[0, 1 + ror]`: a [`LogOdds`] map rescaled by `1 + ror`.
///
/// Elementwise. `ror` is usually another sampled variable and is resolved at
/// every call. `jacobian_det(y) = logodds_jacobian_det(y) - log(1 + ror)` per
/// element. There is no batch inverse: `backward_numeric` always fails with
/// [`Error::NotImplemented`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactParameter {
    ror: Quantity,
}

impl ImpactParameter {
    /// Create the transform for radius ratio `ror`.
    pub fn new(ror: impl Into<Quantity>) -> Self {
        let ror = ror.into();
        log::debug!("impact: ror={ror}");
        Self { ror }
    }

    /// The radius ratio quantity.
    pub fn ror(&self) -> &Quantity {
        &self.ror
    }

    fn one_plus_ror<S: Scalar, P: Point<S> + ?Sized>(&self, point: &P) -> Result<S> {
        let ror: S = self.ror.resolve(point)?;
        Ok(S::from_f64(1.0) + ror)
    }
}

impl Transform for ImpactParameter {
    fn name(&self) -> String {
        "impact".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], point: &P) -> Result<Vec<S>> {
        let opror = self.one_plus_ror(point)?;
        let scaled: Vec<S> = x.iter().map(|&x| x / opror).collect();
        LogOdds.forward(&scaled, point)
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<Vec<S>> {
        let opror = self.one_plus_ror(point)?;
        let bhat = LogOdds.backward(y, point)?;
        Ok(bhat.into_iter().map(|b| b * opror).collect())
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<S> {
        // Evaluated at y itself: the Jacobian belongs to this transform's backward.
        let opror = self.one_plus_ror(point)?;
        let jac = LogOdds.jacobian_det(y, point)?;
        Ok(jac - S::from_f64(y.len() as f64) * opror.ln())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        let opror: f64 = self.one_plus_ror(point)?;
        let scaled = x.mapv(|x| x / opror);
        LogOdds.forward_numeric(scaled.view(), point)
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        _y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        Err(Error::NotImplemented(
            "backward_numeric isn't implemented for the impact parameter transform".into(),
        ))
    }
}
