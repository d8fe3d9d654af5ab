//! Ordered composition of transforms.

use ndarray::{ArrayD, ArrayViewD};
use xo_ad::Scalar;
use xo_core::{Error, Point, Result};

use super::{AnyTransform, Transform};

/// Composition of `[T1, T2, ..., Tn]` into one transform.
///
/// `backward(y) = T1.backward(T2.backward(... Tn.backward(y)))`, so the list
/// head is applied last on the way to constrained space, and `forward`
/// applies `T1.forward` first. Each stage's Jacobian term is evaluated at that
/// stage's own unconstrained input.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    transforms: Vec<AnyTransform>,
}

impl Chain {
    /// Compose `transforms`; the list must be non-empty.
    pub fn new(transforms: Vec<AnyTransform>) -> Result<Self> {
        if transforms.is_empty() {
            return Err(Error::Validation("chain needs at least one transform".into()));
        }
        let chain = Self { transforms };
        log::debug!("chain: {}", chain.name());
        Ok(chain)
    }

    /// The composed transforms, head first.
    pub fn transforms(&self) -> &[AnyTransform] {
        &self.transforms
    }
}

impl Transform for Chain {
    fn name(&self) -> String {
        self.transforms.iter().map(|t| t.name()).collect::<Vec<_>>().join("+")
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], point: &P) -> Result<Vec<S>> {
        let mut y = x.to_vec();
        for t in &self.transforms {
            y = t.forward(&y, point)?;
        }
        Ok(y)
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<Vec<S>> {
        let mut x = y.to_vec();
        for t in self.transforms.iter().rev() {
            x = t.backward(&x, point)?;
        }
        Ok(x)
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], point: &P) -> Result<S> {
        let mut stage = y.to_vec();
        let mut total = S::from_f64(0.0);
        for t in self.transforms.iter().rev() {
            total = total + t.jacobian_det(&stage, point)?;
            stage = t.backward(&stage, point)?;
        }
        Ok(total)
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        let mut y = x.to_owned();
        for t in &self.transforms {
            y = t.forward_numeric(y.view(), point)?;
        }
        Ok(y)
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        point: &P,
    ) -> Result<ArrayD<f64>> {
        let mut x = y.to_owned();
        for t in self.transforms.iter().rev() {
            x = t.backward_numeric(x.view(), point)?;
        }
        Ok(x)
    }
}
