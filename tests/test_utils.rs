use pricer_lib::{DayCount, Model, ModelConfig, OptionContract, OptionRight};
use statrs::distribution::{ContinuousCDF, Normal};

/// The concrete scenario from the real reference inputs: S=185.61, K=185,
/// 18 calendar days, 42.09% vol, r=3.49%, q=0.02%.
pub fn reference_contract() -> OptionContract {
    OptionContract::new(185.61, 185.0, 18.0 / 365.0, 0.4209, 0.0349, 0.0002).unwrap()
}

/// Configuration for a model with the default depth and calendar day count
pub fn test_config(model: Model) -> ModelConfig {
    ModelConfig {
        model,
        steps: 300,
        day_count: DayCount::Calendar365,
    }
}

/// Independent closed-form reference price built on the statrs normal CDF,
/// for pinning the library's polynomial-CDF pricer and lattice convergence
/// against an implementation that shares none of its code.
pub fn bs_reference_price(contract: &OptionContract, right: OptionRight) -> f64 {
    let OptionContract {
        spot,
        strike,
        expiry,
        volatility,
        rate,
        dividend_yield,
    } = *contract;

    let normal = Normal::new(0.0, 1.0).unwrap();
    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((spot / strike).ln()
        + (rate - dividend_yield + 0.5 * volatility * volatility) * expiry)
        / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let spot_disc = spot * (-dividend_yield * expiry).exp();
    let strike_disc = strike * (-rate * expiry).exp();

    match right {
        OptionRight::Call => spot_disc * normal.cdf(d1) - strike_disc * normal.cdf(d2),
        OptionRight::Put => strike_disc * normal.cdf(-d2) - spot_disc * normal.cdf(-d1),
    }
}
