// src/math.rs

//! Standard-normal primitives used by the closed-form pricer and the
//! Newton-Raphson implied-volatility solver.
//!
//! The CDF uses the Abramowitz-Stegun rational polynomial approximation
//! (26.2.17) rather than an exact error-function evaluation. Maximum
//! absolute error is below 1e-7, which is tighter than any tolerance the
//! pricing layer quotes, and it avoids a transcendental erf call in the
//! hot path of the solvers.

use std::f64::consts::PI;

/// Standard normal cumulative distribution function.
///
/// Rational polynomial approximation with |error| < 1e-7 over the reals.
/// The polynomial is evaluated on the negative half-axis and reflected via
/// Φ(x) = 1 − Φ(−x) for x > 0.
pub fn norm_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * x.abs());
    let d = 0.3989423 * (-x * x / 2.0).exp();
    let p = d * t
        * (0.3193815
            + t * (-0.3565638 + t * (1.7814779 + t * (-1.821256 + t * 1.3302745))));
    if x > 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Standard normal probability density function, φ(x) = e^(−x²/2) / √(2π).
pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}
