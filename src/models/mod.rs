pub mod black_scholes;
pub mod lattice;

use crate::contract::OptionContract;

/// The Black-Scholes `d1`/`d2` terms for a contract.
///
/// Shared between the closed-form pricer and the Leisen-Reimer lattice,
/// which recenters its tree using the `d1`/`d2` of the equivalent
/// continuous-time problem.
pub fn d1_d2(contract: &OptionContract) -> (f64, f64) {
    let OptionContract {
        spot,
        strike,
        expiry,
        volatility,
        rate,
        dividend_yield,
    } = *contract;

    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((spot / strike).ln()
        + (rate - dividend_yield + 0.5 * volatility * volatility) * expiry)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;
    (d1, d2)
}
