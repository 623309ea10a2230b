// src/models/black_scholes.rs

//! Closed-form Black-Scholes-Merton valuation for European options on an
//! underlying paying a continuous yield q:
//!
//! d1 = (ln(S/K) + (r - q + σ²/2)T) / (σ√T),  d2 = d1 - σ√T
//!
//! Call = S e^(-qT) Φ(d1) - K e^(-rT) Φ(d2)
//! Put  = K e^(-rT) Φ(-d2) - S e^(-qT) Φ(-d1)
//!
//! Delta and gamma come from the same `d1`; vega is used by the
//! Newton-Raphson implied-volatility solver as the closed-form derivative
//! of price with respect to volatility.

use crate::contract::{OptionContract, OptionRight};
use crate::math::{norm_cdf, norm_pdf};
use crate::models::d1_d2;

/// Price of a European option. Inputs are assumed validated by the caller.
pub fn price(contract: &OptionContract, right: OptionRight) -> f64 {
    let (d1, d2) = d1_d2(contract);
    let spot_disc = contract.spot * (-contract.dividend_yield * contract.expiry).exp();
    let strike_disc = contract.strike * (-contract.rate * contract.expiry).exp();

    match right {
        OptionRight::Call => spot_disc * norm_cdf(d1) - strike_disc * norm_cdf(d2),
        OptionRight::Put => strike_disc * norm_cdf(-d2) - spot_disc * norm_cdf(-d1),
    }
}

/// Analytic delta: e^(-qT) Φ(d1) for a call, e^(-qT) (Φ(d1) - 1) for a put.
pub fn delta(contract: &OptionContract, right: OptionRight) -> f64 {
    let (d1, _) = d1_d2(contract);
    let yield_disc = (-contract.dividend_yield * contract.expiry).exp();
    match right {
        OptionRight::Call => yield_disc * norm_cdf(d1),
        OptionRight::Put => yield_disc * (norm_cdf(d1) - 1.0),
    }
}

/// Analytic gamma: e^(-qT) φ(d1) / (S σ √T). Identical for call and put.
pub fn gamma(contract: &OptionContract) -> f64 {
    let (d1, _) = d1_d2(contract);
    let yield_disc = (-contract.dividend_yield * contract.expiry).exp();
    yield_disc * norm_pdf(d1) / (contract.spot * contract.volatility * contract.expiry.sqrt())
}

/// Analytic vega: S e^(-qT) φ(d1) √T, per unit of volatility.
/// Identical for call and put.
pub fn vega(contract: &OptionContract) -> f64 {
    let (d1, _) = d1_d2(contract);
    let yield_disc = (-contract.dividend_yield * contract.expiry).exp();
    contract.spot * yield_disc * norm_pdf(d1) * contract.expiry.sqrt()
}
