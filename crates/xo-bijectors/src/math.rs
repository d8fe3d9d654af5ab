//! Small numerically-stable math utilities used by the transforms.
//!
//! Each helper comes in two forms: a plain `f64` version used on the numeric
//! (batch) path, and an `_s` version generic over [`Scalar`] used on the
//! gradient-tracked path. The two must agree to rounding.

use xo_ad::Scalar;

/// Stable `log(1 + exp(x))`.
///
/// Branchless: `log(1+exp(x)) = max(x,0) + log(1+exp(-|x|))`.
#[inline]
pub fn log1pexp(x: f64) -> f64 {
    let e = (-x.abs()).exp(); // always in (0, 1], no overflow
    x.max(0.0) + e.ln_1p()
}

/// Stable softplus: `log(1 + exp(x))`.
#[inline]
pub fn softplus(x: f64) -> f64 {
    log1pexp(x)
}

/// Stable sigmoid: `1 / (1 + exp(-x))`.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let e = (-x.abs()).exp();
    let recip = 1.0 / (1.0 + e);
    // x >= 0: sigmoid = 1/(1+exp(-x)) = recip
    // x <  0: sigmoid = exp(x)/(1+exp(x)) = e*recip
    if x >= 0.0 { recip } else { e * recip }
}

/// Stable `log(sigmoid(x))`.
#[inline]
pub fn log_sigmoid(x: f64) -> f64 {
    -log1pexp(-x)
}

/// Log-odds `log(p) - log(1 - p)`. Infinite at `p = 0, 1`, `nan` outside `[0, 1]`.
#[inline]
pub fn logit(p: f64) -> f64 {
    p.ln() - (-p).ln_1p()
}

/// `log|d sigmoid(y)/dy| = -2*softplus(-y) - y`.
#[inline]
pub fn sigmoid_log_jacobian(y: f64) -> f64 {
    -2.0 * softplus(-y) - y
}

/// [`softplus`] for any [`Scalar`].
#[inline]
pub fn softplus_s<S: Scalar>(x: S) -> S {
    // one branch on the primal value, so `-0.0` gets a consistent derivative
    if x.value() >= 0.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// [`sigmoid`] for any [`Scalar`].
#[inline]
pub fn sigmoid_s<S: Scalar>(x: S) -> S {
    let one = S::from_f64(1.0);
    if x.value() >= 0.0 {
        one / (one + (-x).exp())
    } else {
        let e = x.exp();
        e / (one + e)
    }
}

/// [`logit`] for any [`Scalar`].
#[inline]
pub fn logit_s<S: Scalar>(p: S) -> S {
    p.ln() - (-p).ln_1p()
}

/// [`sigmoid_log_jacobian`] for any [`Scalar`].
#[inline]
pub fn sigmoid_log_jacobian_s<S: Scalar>(y: S) -> S {
    S::from_f64(-2.0) * softplus_s(-y) - y
}
