//! Forward-mode automatic differentiation via dual numbers.
//!
//! A [`Dual`] carries a primal value and one tangent. Seeding an input with
//! `dot = 1` and evaluating any function built from the operations below
//! yields the directional derivative along that input in `dot`.

use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A dual number for forward-mode AD.
///
/// `val` holds the primal value, `dot` holds the derivative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dual {
    /// Primal (function) value.
    pub val: f64,
    /// Tangent (derivative) value.
    pub dot: f64,
}

impl Dual {
    /// Create a constant (derivative = 0).
    #[inline]
    pub fn constant(val: f64) -> Self {
        Self { val, dot: 0.0 }
    }

    /// Create an independent variable (derivative = 1).
    #[inline]
    pub fn var(val: f64) -> Self {
        Self { val, dot: 1.0 }
    }

    /// Create a dual with explicit tangent.
    #[inline]
    pub fn new(val: f64, dot: f64) -> Self {
        Self { val, dot }
    }

    /// Natural logarithm: d/dx ln(x) = 1/x.
    #[inline]
    pub fn ln(self) -> Self {
        Self { val: self.val.ln(), dot: self.dot / self.val }
    }

    /// `ln(1 + x)`: d/dx = 1/(1+x).
    #[inline]
    pub fn ln_1p(self) -> Self {
        Self { val: self.val.ln_1p(), dot: self.dot / (1.0 + self.val) }
    }

    /// Exponential: d/dx exp(x) = exp(x).
    #[inline]
    pub fn exp(self) -> Self {
        let e = self.val.exp();
        Self { val: e, dot: self.dot * e }
    }

    /// Power with f64 exponent: d/dx x^n = n * x^(n-1).
    #[inline]
    pub fn powf(self, n: f64) -> Self {
        Self { val: self.val.powf(n), dot: self.dot * n * self.val.powf(n - 1.0) }
    }

    /// Integer power: d/dx x^n = n * x^(n-1).
    #[inline]
    pub fn powi(self, n: i32) -> Self {
        Self { val: self.val.powi(n), dot: self.dot * (n as f64) * self.val.powi(n - 1) }
    }

    /// Square root: d/dx sqrt(x) = 1/(2*sqrt(x)).
    #[inline]
    pub fn sqrt(self) -> Self {
        let s = self.val.sqrt();
        Self { val: s, dot: self.dot / (2.0 * s) }
    }

    /// Absolute value: d/dx |x| = sign(x).
    #[inline]
    pub fn abs(self) -> Self {
        Self { val: self.val.abs(), dot: self.dot * self.val.signum() }
    }

    /// Sine: d/dx sin(x) = cos(x).
    #[inline]
    pub fn sin(self) -> Self {
        let (s, c) = self.val.sin_cos();
        Self { val: s, dot: self.dot * c }
    }

    /// Cosine: d/dx cos(x) = -sin(x).
    #[inline]
    pub fn cos(self) -> Self {
        let (s, c) = self.val.sin_cos();
        Self { val: c, dot: -self.dot * s }
    }

    /// Two-argument arctangent `atan2(self, x)`.
    ///
    /// `d atan2(y, x) = (x dy - y dx) / (x^2 + y^2)`.
    #[inline]
    pub fn atan2(self, x: Self) -> Self {
        let r2 = x.val * x.val + self.val * self.val;
        Self { val: self.val.atan2(x.val), dot: (x.val * self.dot - self.val * x.dot) / r2 }
    }

    /// Maximum of two duals. Derivative follows the larger operand.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if self.val >= other.val { self } else { other }
    }
}

// --- Arithmetic: Dual op Dual ---

impl Add for Dual {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self { val: self.val + rhs.val, dot: self.dot + rhs.dot }
    }
}

impl Sub for Dual {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self { val: self.val - rhs.val, dot: self.dot - rhs.dot }
    }
}

impl Mul for Dual {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self { val: self.val * rhs.val, dot: self.dot * rhs.val + self.val * rhs.dot }
    }
}

impl Div for Dual {
    type Output = Self;
    #[inline]
    fn div(self, rhs: Self) -> Self {
        Self {
            val: self.val / rhs.val,
            dot: (self.dot * rhs.val - self.val * rhs.dot) / (rhs.val * rhs.val),
        }
    }
}

impl Neg for Dual {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self { val: -self.val, dot: -self.dot }
    }
}

// --- Sum ---

impl Sum for Dual {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Dual::constant(0.0), |acc, x| acc + x)
    }
}

// --- From ---

impl From<f64> for Dual {
    fn from(val: f64) -> Self {
        Self::constant(val)
    }
}

// --- PartialOrd ---

impl PartialOrd for Dual {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_has_zero_derivative() {
        let c = Dual::constant(5.0);
        assert_eq!(c.val, 5.0);
        assert_eq!(c.dot, 0.0);
    }

    #[test]
    fn test_var_has_unit_derivative() {
        let x = Dual::var(3.0);
        assert_eq!(x.val, 3.0);
        assert_eq!(x.dot, 1.0);
    }

    #[test]
    fn test_ln_and_ln_1p_derivative() {
        let x = Dual::var(2.0);
        assert_relative_eq!(x.ln().dot, 0.5, epsilon = 1e-15);
        assert_relative_eq!(x.ln_1p().dot, 1.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_sqrt_derivative() {
        let y = Dual::var(4.0).sqrt();
        assert_relative_eq!(y.val, 2.0, epsilon = 1e-15);
        assert_relative_eq!(y.dot, 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_trig_derivatives() {
        let x = Dual::var(0.7);
        assert_relative_eq!(x.sin().dot, 0.7_f64.cos(), epsilon = 1e-15);
        assert_relative_eq!(x.cos().dot, -(0.7_f64.sin()), epsilon = 1e-15);
    }

    #[test]
    fn test_atan2_partials() {
        // d/dy atan2(y, x) = x / r^2, d/dx atan2(y, x) = -y / r^2
        let (y, x) = (0.3, -1.2);
        let r2 = x * x + y * y;
        let dy = Dual::var(y).atan2(Dual::constant(x));
        let dx = Dual::constant(y).atan2(Dual::var(x));
        assert_relative_eq!(dy.val, y.atan2(x), epsilon = 1e-15);
        assert_relative_eq!(dy.dot, x / r2, epsilon = 1e-14);
        assert_relative_eq!(dx.dot, -y / r2, epsilon = 1e-14);
    }

    #[test]
    fn test_quotient_rule() {
        // d/dx x / (1 + x^2) = (1 - x^2) / (1 + x^2)^2
        let x = Dual::var(0.5);
        let y = x / (Dual::constant(1.0) + x * x);
        assert_relative_eq!(y.dot, 0.75 / 1.5625, epsilon = 1e-14);
    }

    #[test]
    fn test_sum_and_ordering() {
        let s: Dual = [Dual::var(1.0), Dual::var(2.0), Dual::constant(3.0)].into_iter().sum();
        assert_eq!(s.val, 6.0);
        assert_eq!(s.dot, 2.0);
        assert!(Dual::constant(1.0) < Dual::new(2.0, -5.0));
    }
}
