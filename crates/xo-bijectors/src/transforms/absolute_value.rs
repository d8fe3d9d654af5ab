//! Absolute value of a symmetric `(-1, 1)` quantity.

use ndarray::{ArrayD, ArrayViewD};
use xo_ad::Scalar;
use xo_core::{Point, Result};

use super::Transform;
use crate::math::{logit, logit_s, sigmoid, sigmoid_log_jacobian_s, sigmoid_s};

/// `backward(y) = |2*sigmoid(y) - 1|`, `forward(x) = logit((x + 1) / 2)`.
///
/// Elementwise. `backward` folds `x` and `-x` together, so this is only used
/// for quantities whose distribution is symmetric about zero. The Jacobian
/// term omits the constant `log 2`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AbsoluteValue;

impl Transform for AbsoluteValue {
    fn name(&self) -> String {
        "absolutevalue".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        let half = S::from_f64(0.5);
        let one = S::from_f64(1.0);
        Ok(x.iter().map(|&x| logit_s(half * (x + one))).collect())
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        let two = S::from_f64(2.0);
        let one = S::from_f64(1.0);
        Ok(y.iter().map(|&y| (two * sigmoid_s(y) - one).abs()).collect())
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        Ok(y.iter().map(|&y| sigmoid_log_jacobian_s(y)).sum())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        Ok(x.mapv(|x| logit(0.5 * (x + 1.0))))
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        Ok(y.mapv(|y| (2.0 * sigmoid(y) - 1.0).abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use xo_core::NoPoint;

    #[test]
    fn test_known_values() {
        let y = AbsoluteValue.forward(&[0.5], &NoPoint).unwrap();
        assert_relative_eq!(y[0], 3.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(y[0], 1.0986, epsilon = 1e-4);

        let x = AbsoluteValue.backward(&[1.0986], &NoPoint).unwrap();
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_roundtrip() {
        for x in [0.0, 0.01, 0.3, 0.5, 0.9, 0.999] {
            let y = AbsoluteValue.forward(&[x], &NoPoint).unwrap();
            let back = AbsoluteValue.backward(&y, &NoPoint).unwrap();
            assert_relative_eq!(back[0], x, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_symmetric_preimages() {
        let a = AbsoluteValue.backward(&[1.3], &NoPoint).unwrap();
        let b = AbsoluteValue.backward(&[-1.3], &NoPoint).unwrap();
        assert_relative_eq!(a[0], b[0], epsilon = 1e-15);
    }

    #[test]
    fn test_out_of_domain_is_not_finite() {
        let y = AbsoluteValue.forward(&[1.0], &NoPoint).unwrap();
        assert!(y[0].is_infinite());
        let x = array![1.5, -2.0].into_dyn();
        let y = AbsoluteValue.forward_numeric(x.view(), &NoPoint).unwrap();
        assert!(y.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_numeric_matches_graph() {
        let x = array![[0.1, 0.4], [0.7, 0.95]].into_dyn();
        let y = AbsoluteValue.forward_numeric(x.view(), &NoPoint).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            let g = AbsoluteValue.forward(&[*xi], &NoPoint).unwrap();
            assert_relative_eq!(g[0], *yi, epsilon = 1e-14);
        }
        let back = AbsoluteValue.backward_numeric(y.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(x.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}
