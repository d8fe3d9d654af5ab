//! Quadratic limb darkening via Kipping (2013) triangular sampling.
//!
//! Ref: <https://arxiv.org/abs/1308.0009>

use ndarray::{ArrayD, ArrayViewD, Zip};
use xo_ad::Scalar;
use xo_core::{Point, Result};

use super::Transform;
use super::numeric::{check_event, components, stack_components};
use crate::math::{logit, logit_s, sigmoid, sigmoid_log_jacobian_s, sigmoid_s};

/// Limb-darkening pair `(u1, u2)` restricted to the physical triangle.
///
/// `q = sigmoid(y)`, `u1 = 2 sqrt(q1) q2`, `u2 = sqrt(q1) (1 - 2 q2)`.
/// Event length 2. The map `q -> u` has unit Jacobian, so the correction is
/// the logistic term of each component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadLimbDark;

impl Transform for QuadLimbDark {
    fn name(&self) -> String {
        "quadlimbdark".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("quadlimbdark", x, 2)?;
        let usum = x[0] + x[1];
        let q0 = usum * usum;
        let q1 = S::from_f64(0.5) * x[0] / usum;
        Ok(vec![logit_s(q0), logit_s(q1)])
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        check_event("quadlimbdark", y, 2)?;
        let sqrtq0 = sigmoid_s(y[0]).sqrt();
        let twoq1 = S::from_f64(2.0) * sigmoid_s(y[1]);
        Ok(vec![sqrtq0 * twoq1, sqrtq0 * (S::from_f64(1.0) - twoq1)])
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        check_event("quadlimbdark", y, 2)?;
        Ok(sigmoid_log_jacobian_s(y[0]) + sigmoid_log_jacobian_s(y[1]))
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("quadlimbdark", &x, 2)?;
        let usum = &c[0] + &c[1];
        let y0 = usum.mapv(|s| logit(s * s));
        let y1 = Zip::from(&c[0]).and(&usum).map_collect(|&u0, &s| logit(0.5 * u0 / s));
        stack_components("quadlimbdark", &[y0, y1])
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let c = components("quadlimbdark", &y, 2)?;
        let sqrtq0 = c[0].mapv(|v| sigmoid(v).sqrt());
        let twoq1 = c[1].mapv(|v| 2.0 * sigmoid(v));
        let u0 = &sqrtq0 * &twoq1;
        let u1 = &sqrtq0 * &twoq1.mapv(|t| 1.0 - t);
        stack_components("quadlimbdark", &[u0, u1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::FRAC_1_SQRT_2;
    use xo_core::NoPoint;

    #[test]
    fn test_backward_at_origin() {
        // q = (0.5, 0.5): sqrt(q1) = 1/sqrt(2), 2 q2 = 1
        let u = QuadLimbDark.backward(&[0.0, 0.0], &NoPoint).unwrap();
        assert_relative_eq!(u[0], FRAC_1_SQRT_2, epsilon = 1e-15);
        assert_relative_eq!(u[1], 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_backward_is_physical() {
        for y0 in [-5.0, -0.5, 0.0, 2.0, 6.0] {
            for y1 in [-4.0, -1.0, 0.3, 3.0] {
                let u = QuadLimbDark.backward(&[y0, y1], &NoPoint).unwrap();
                // Kipping's triangle: u1 + u2 < 1, u1 > 0, u1 + 2 u2 > 0
                assert!(u[0] + u[1] < 1.0);
                assert!(u[0] > 0.0);
                assert!(u[0] + 2.0 * u[1] > 0.0);
            }
        }
    }

    #[test]
    fn test_roundtrip() {
        for u in [[0.4, 0.25], [0.1, 0.6], [0.9, -0.3], [0.05, 0.01]] {
            let y = QuadLimbDark.forward(&u, &NoPoint).unwrap();
            let back = QuadLimbDark.backward(&y, &NoPoint).unwrap();
            assert_relative_eq!(back[0], u[0], epsilon = 1e-12);
            assert_relative_eq!(back[1], u[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_numeric_matches_graph() {
        let u = array![[0.4, 0.25], [0.1, 0.6], [0.9, -0.3]].into_dyn();
        let y = QuadLimbDark.forward_numeric(u.view(), &NoPoint).unwrap();
        for (row_u, row_y) in u.outer_iter().zip(y.outer_iter()) {
            let ev: Vec<f64> = row_u.iter().copied().collect();
            let g = QuadLimbDark.forward(&ev, &NoPoint).unwrap();
            for (a, b) in row_y.iter().zip(&g) {
                assert_relative_eq!(*a, *b, epsilon = 1e-14);
            }
        }
        let back = QuadLimbDark.backward_numeric(y.view(), &NoPoint).unwrap();
        for (a, b) in back.iter().zip(u.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}
