//! Logistic maps onto bounded intervals.

use ndarray::{ArrayD, ArrayViewD};
use xo_ad::Scalar;
use xo_core::{Error, Point, Result};

use super::Transform;
use crate::math::{logit, logit_s, sigmoid, sigmoid_log_jacobian_s, sigmoid_s};

/// Log-odds: `(0, 1) <-> R`, `backward(y) = sigmoid(y)`.
///
/// Elementwise.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogOdds;

impl Transform for LogOdds {
    fn name(&self) -> String {
        "logodds".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        Ok(x.iter().map(|&x| logit_s(x)).collect())
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        Ok(y.iter().map(|&y| sigmoid_s(y)).collect())
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        Ok(y.iter().map(|&y| sigmoid_log_jacobian_s(y)).sum())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        Ok(x.mapv(logit))
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        Ok(y.mapv(sigmoid))
    }
}

/// Interval: `(lower, upper) <-> R`, `backward(y) = lower + (upper - lower) * sigmoid(y)`.
///
/// Elementwise. `log|J| = log(upper - lower) - 2*softplus(-y) - y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
    width: f64,
    log_width: f64,
}

impl Interval {
    /// Create an interval transform for `(lower, upper)`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::Validation(format!(
                "interval bounds must be finite, got ({lower}, {upper})"
            )));
        }
        if upper <= lower {
            return Err(Error::Validation(format!(
                "interval upper must exceed lower, got ({lower}, {upper})"
            )));
        }
        let width = upper - lower;
        Ok(Self { lower, upper, width, log_width: width.ln() })
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }
}

impl Transform for Interval {
    fn name(&self) -> String {
        "interval".into()
    }

    fn forward<S: Scalar, P: Point<S> + ?Sized>(&self, x: &[S], _point: &P) -> Result<Vec<S>> {
        let (a, b) = (S::from_f64(self.lower), S::from_f64(self.upper));
        Ok(x.iter().map(|&x| (x - a).ln() - (b - x).ln()).collect())
    }

    fn backward<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<Vec<S>> {
        let (a, w) = (S::from_f64(self.lower), S::from_f64(self.width));
        Ok(y.iter().map(|&y| a + w * sigmoid_s(y)).collect())
    }

    fn jacobian_det<S: Scalar, P: Point<S> + ?Sized>(&self, y: &[S], _point: &P) -> Result<S> {
        let lw = S::from_f64(self.log_width);
        Ok(y.iter().map(|&y| lw + sigmoid_log_jacobian_s(y)).sum())
    }

    fn forward_numeric<P: Point<f64> + ?Sized>(
        &self,
        x: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let (a, b) = (self.lower, self.upper);
        Ok(x.mapv(|x| (x - a).ln() - (b - x).ln()))
    }

    fn backward_numeric<P: Point<f64> + ?Sized>(
        &self,
        y: ArrayViewD<'_, f64>,
        _point: &P,
    ) -> Result<ArrayD<f64>> {
        let (a, w) = (self.lower, self.width);
        Ok(y.mapv(|y| a + w * sigmoid(y)))
    }
}
