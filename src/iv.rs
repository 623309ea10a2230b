// src/iv.rs

//! Implied-volatility inversion: recover the volatility that makes the
//! selected pricer reproduce an observed market price.
//!
//! The closed-form model is inverted with Newton-Raphson, using the
//! analytic vega as the derivative; each iteration is one `d1` evaluation,
//! so convergence is typically reached in a handful of steps. The lattice
//! models are inverted by bisection over a wide volatility bracket, since a
//! tree price is not smoothly differentiable in volatility in any way that
//! is cheap to exploit.
//!
//! Exhausting the iteration budget is not an error: the best estimate found
//! is returned with `converged == false` and the caller decides whether an
//! approximate IV is acceptable.

use crate::config::{Model, ModelConfig};
use crate::contract::{ImpliedVol, ImpliedVolQuery};
use crate::engine::model_price;
use crate::error::PricingError;
use crate::models::black_scholes;

/// Newton-Raphson budget and tolerances
const NEWTON_MAX_ITERATIONS: usize = 20;
const NEWTON_PRICE_TOLERANCE: f64 = 1e-6;
const NEWTON_INITIAL_GUESS: f64 = 0.5;
/// Below this vega the price surface is flat in volatility and a Newton
/// step would blow up; terminate early with the current estimate.
const VEGA_FLOOR: f64 = 1e-10;
/// Positivity clamp applied after each Newton step
const VOL_RESTART: f64 = 0.001;

/// Bisection budget, bracket, and tolerance
const BISECTION_MAX_ITERATIONS: usize = 30;
const BISECTION_PRICE_TOLERANCE: f64 = 1e-4;
const VOL_BRACKET_LOW: f64 = 0.0001;
const VOL_BRACKET_HIGH: f64 = 5.0;

/// Solve for the implied volatility of an observed price under the
/// configured model.
pub fn implied_volatility(
    query: &ImpliedVolQuery,
    config: &ModelConfig,
) -> Result<ImpliedVol, PricingError> {
    query.validate()?;
    config.validate()?;

    match config.model {
        Model::ClosedForm => Ok(newton_raphson(query)),
        Model::LatticeCrr | Model::LatticeLr => bisection(query, config),
    }
}

fn newton_raphson(query: &ImpliedVolQuery) -> ImpliedVol {
    let mut vol = NEWTON_INITIAL_GUESS;

    for iteration in 0..NEWTON_MAX_ITERATIONS {
        let contract = query.contract_at(vol);
        let price = black_scholes::price(&contract, query.right);
        let vega = black_scholes::vega(&contract);

        if vega.abs() < VEGA_FLOOR {
            return ImpliedVol {
                volatility: vol.max(VOL_BRACKET_LOW),
                converged: false,
                iterations: iteration,
            };
        }

        let diff = price - query.observed_price;
        if diff.abs() < NEWTON_PRICE_TOLERANCE {
            return ImpliedVol {
                volatility: vol.max(VOL_BRACKET_LOW),
                converged: true,
                iterations: iteration,
            };
        }

        vol -= diff / vega;
        if vol <= 0.0 {
            vol = VOL_RESTART;
        }
    }

    ImpliedVol {
        volatility: vol.max(VOL_BRACKET_LOW),
        converged: false,
        iterations: NEWTON_MAX_ITERATIONS,
    }
}

fn bisection(
    query: &ImpliedVolQuery,
    config: &ModelConfig,
) -> Result<ImpliedVol, PricingError> {
    let mut low = VOL_BRACKET_LOW;
    let mut high = VOL_BRACKET_HIGH;
    let mut estimate = 0.5 * (low + high);

    for iteration in 0..BISECTION_MAX_ITERATIONS {
        let mid = 0.5 * (low + high);
        estimate = mid;

        let price = model_price(&query.contract_at(mid), query.right, config)?;

        if (price - query.observed_price).abs() < BISECTION_PRICE_TOLERANCE {
            return Ok(ImpliedVol {
                volatility: mid,
                converged: true,
                iterations: iteration + 1,
            });
        }

        if price < query.observed_price {
            low = mid;
        } else {
            high = mid;
        }
    }

    Ok(ImpliedVol {
        volatility: estimate,
        converged: false,
        iterations: BISECTION_MAX_ITERATIONS,
    })
}
