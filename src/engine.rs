// src/engine.rs

//! The Greeks engine: selects a pricer from the model tag, computes the
//! base price with its delta and gamma (analytic for the closed form,
//! tree-extracted for the lattices), and fills in vega, theta and rho by
//! bump-and-reprice against the *same* pricer, so every sensitivity is
//! internally consistent with the quoted price.
//!
//! Bump sizes follow market convention: vega is the price change for +1
//! volatility point, rho for +1% in the rate, theta for the passage of one
//! day under the configured day-count convention.

use crate::config::{Model, ModelConfig};
use crate::contract::{
    ExerciseStyle, OptionContract, OptionRight, PricedPair, PricingResult,
};
use crate::error::PricingError;
use crate::models::{black_scholes, lattice};
use crate::models::lattice::LatticeScheme;

/// Which input a finite-difference bump perturbs.
#[derive(Debug, Clone, Copy)]
enum Bump {
    /// Volatility shift (+1 vol point)
    Volatility(f64),
    /// Rate shift (+1%)
    Rate(f64),
    /// Time decay of one day-count unit; the bumped expiry is clamped at
    /// zero rather than going negative
    Expiry(f64),
}

impl Bump {
    fn apply(&self, contract: &OptionContract) -> OptionContract {
        match *self {
            Bump::Volatility(dv) => contract.with_volatility(contract.volatility + dv),
            Bump::Rate(dr) => contract.with_rate(contract.rate + dr),
            Bump::Expiry(dt) => contract.with_expiry((contract.expiry + dt).max(0.0)),
        }
    }
}

fn scheme_for(model: Model) -> Option<LatticeScheme> {
    match model {
        Model::ClosedForm => None,
        Model::LatticeCrr => Some(LatticeScheme::CoxRossRubinstein),
        Model::LatticeLr => Some(LatticeScheme::LeisenReimer),
    }
}

/// Price under the configured model, skipping Greek extraction.
///
/// Inputs are assumed validated. This is the path the finite-difference
/// bumps and the IV bisection re-invoke.
pub(crate) fn model_price(
    contract: &OptionContract,
    right: OptionRight,
    config: &ModelConfig,
) -> Result<f64, PricingError> {
    match scheme_for(config.model) {
        None => Ok(black_scholes::price(contract, right)),
        Some(scheme) => lattice::price_only(
            contract,
            right,
            scheme,
            ExerciseStyle::American,
            config.steps,
        ),
    }
}

/// One shared finite-difference step: reprice under a bumped input and
/// return the price change relative to the base price.
///
/// A theta bump that lands exactly on zero expiry evaluates the
/// undiscounted intrinsic value, which is the T→0 limit of every model
/// here; the pricers themselves reject T = 0 outright.
fn finite_difference(
    base_price: f64,
    contract: &OptionContract,
    right: OptionRight,
    config: &ModelConfig,
    bump: Bump,
) -> Result<f64, PricingError> {
    let bumped = bump.apply(contract);
    let bumped_price = if bumped.expiry <= 0.0 {
        right.intrinsic(bumped.spot, bumped.strike)
    } else {
        model_price(&bumped, right, config)?
    };
    Ok(bumped_price - base_price)
}

/// Price one side of a validated contract with the full Greek set.
fn price_side(
    contract: &OptionContract,
    right: OptionRight,
    config: &ModelConfig,
) -> Result<PricingResult, PricingError> {
    let (price, delta, gamma) = match scheme_for(config.model) {
        None => (
            black_scholes::price(contract, right),
            black_scholes::delta(contract, right),
            black_scholes::gamma(contract),
        ),
        Some(scheme) => {
            let tree = lattice::value(
                contract,
                right,
                scheme,
                ExerciseStyle::American,
                config.steps,
            )?;
            (tree.price, tree.delta, tree.gamma)
        }
    };

    let one_day = 1.0 / config.day_count.divisor();
    let vega = finite_difference(price, contract, right, config, Bump::Volatility(0.01))?;
    let theta = finite_difference(price, contract, right, config, Bump::Expiry(-one_day))?;
    let rho = finite_difference(price, contract, right, config, Bump::Rate(0.01))?;

    Ok(PricingResult {
        price,
        delta,
        gamma,
        theta,
        vega,
        rho,
    })
}

/// Price a single option and its Greeks.
pub fn price(
    contract: &OptionContract,
    right: OptionRight,
    config: &ModelConfig,
) -> Result<PricingResult, PricingError> {
    contract.validate()?;
    config.validate()?;
    price_side(contract, right, config)
}

/// Price both sides of a contract in one invocation.
pub fn price_both(
    contract: &OptionContract,
    config: &ModelConfig,
) -> Result<PricedPair, PricingError> {
    contract.validate()?;
    config.validate()?;
    Ok(PricedPair {
        call: price_side(contract, OptionRight::Call, config)?,
        put: price_side(contract, OptionRight::Put, config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DayCount;

    fn reference_contract() -> OptionContract {
        OptionContract::new(185.61, 185.0, 18.0 / 365.0, 0.4209, 0.0349, 0.0002).unwrap()
    }

    fn config(model: Model) -> ModelConfig {
        ModelConfig {
            model,
            steps: 300,
            day_count: DayCount::Calendar365,
        }
    }

    #[test]
    fn test_closed_form_full_result() {
        let result = price(
            &reference_contract(),
            OptionRight::Call,
            &config(Model::ClosedForm),
        )
        .unwrap();

        assert!((result.price - 7.374).abs() < 0.01);
        assert!((result.delta - 0.53993).abs() < 1e-4);
        assert!((result.gamma - 0.02288).abs() < 1e-4);
        // Short-dated near-ATM long option: positive vega and rho (call),
        // negative theta
        assert!(result.vega > 0.0);
        assert!(result.rho > 0.0);
        assert!(result.theta < 0.0);
    }

    #[test]
    fn test_greek_signs_put() {
        let result = price(
            &reference_contract(),
            OptionRight::Put,
            &config(Model::LatticeCrr),
        )
        .unwrap();

        assert!(result.delta < 0.0);
        assert!(result.gamma > 0.0);
        assert!(result.vega > 0.0);
        assert!(result.theta < 0.0);
        assert!(result.rho < 0.0);
    }

    #[test]
    fn test_bump_magnitudes_closed_form() {
        // Pinned against the bump definitions themselves
        let contract = reference_contract();
        let cfg = config(Model::ClosedForm);
        let result = price(&contract, OptionRight::Call, &cfg).unwrap();

        let base = black_scholes::price(&contract, OptionRight::Call);
        let vega = black_scholes::price(&contract.with_volatility(contract.volatility + 0.01), OptionRight::Call) - base;
        let rho = black_scholes::price(&contract.with_rate(contract.rate + 0.01), OptionRight::Call) - base;
        let theta = black_scholes::price(&contract.with_expiry(contract.expiry - 1.0 / 365.0), OptionRight::Call) - base;

        assert!((result.vega - vega).abs() < 1e-12);
        assert!((result.rho - rho).abs() < 1e-12);
        assert!((result.theta - theta).abs() < 1e-12);
    }

    #[test]
    fn test_theta_bump_clamps_at_zero_expiry() {
        // One day to expiry under a 252-day count: the bump lands past
        // zero and must evaluate the intrinsic value, not fail
        let contract = OptionContract::new(105.0, 100.0, 1.0 / 365.0, 0.3, 0.03, 0.0).unwrap();
        let cfg = ModelConfig {
            model: Model::ClosedForm,
            steps: 300,
            day_count: DayCount::Trading252,
        };
        let result = price(&contract, OptionRight::Call, &cfg).unwrap();
        let base = black_scholes::price(&contract, OptionRight::Call);
        let expected_theta = OptionRight::Call.intrinsic(105.0, 100.0) - base;
        assert!((result.theta - expected_theta).abs() < 1e-12);
    }

    #[test]
    fn test_price_both_consistent_with_single_side() {
        let contract = reference_contract();
        for model in [Model::ClosedForm, Model::LatticeCrr, Model::LatticeLr] {
            let cfg = config(model);
            let pair = price_both(&contract, &cfg).unwrap();
            assert_eq!(pair.call, price(&contract, OptionRight::Call, &cfg).unwrap());
            assert_eq!(pair.put, price(&contract, OptionRight::Put, &cfg).unwrap());
        }
    }

    #[test]
    fn test_deterministic() {
        let contract = reference_contract();
        let cfg = config(Model::LatticeLr);
        let a = price(&contract, OptionRight::Put, &cfg).unwrap();
        let b = price(&contract, OptionRight::Put, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_input_rejected_before_pricing() {
        let cfg = config(Model::LatticeCrr);
        for contract in [
            OptionContract { spot: 0.0, strike: 100.0, expiry: 0.5, volatility: 0.2, rate: 0.03, dividend_yield: 0.0 },
            OptionContract { spot: 100.0, strike: 0.0, expiry: 0.5, volatility: 0.2, rate: 0.03, dividend_yield: 0.0 },
            OptionContract { spot: 100.0, strike: 100.0, expiry: 0.0, volatility: 0.2, rate: 0.03, dividend_yield: 0.0 },
            OptionContract { spot: 100.0, strike: 100.0, expiry: 0.5, volatility: 0.0, rate: 0.03, dividend_yield: 0.0 },
        ] {
            let result = price(&contract, OptionRight::Call, &cfg);
            assert!(
                matches!(result, Err(PricingError::InvalidInput { .. })),
                "expected InvalidInput for {:?}, got {:?}",
                contract,
                result
            );
        }
    }

    #[test]
    fn test_too_few_steps_rejected() {
        let cfg = ModelConfig {
            model: Model::LatticeCrr,
            steps: 2,
            day_count: DayCount::Calendar365,
        };
        assert!(matches!(
            price(&reference_contract(), OptionRight::Call, &cfg),
            Err(PricingError::InvalidInput { parameter: "steps", .. })
        ));
    }
}
