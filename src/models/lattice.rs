// src/models/lattice.rs

//! Recombining binomial lattice pricers.
//!
//! Two discretization schemes share one backward-induction skeleton:
//!
//! - **Cox-Ross-Rubinstein**: u = e^(σ√dt), d = 1/u,
//!   p = (e^((r-q)dt) - d) / (u - d). Converges to the closed form with a
//!   known O(1/n) oscillation around the limit.
//! - **Leisen-Reimer**: recenters the tree on the strike using the
//!   Peizer-Pratt method-2 inverse of the binomial CDF applied to the
//!   `d1`/`d2` of the equivalent Black-Scholes problem, which damps the
//!   oscillation; n is forced odd so the strike sits on a lattice node.
//!
//! American early exercise is the `max(hold, exercise)` applied at every
//! node during induction; omitting it values European exercise on the same
//! tree, which exists as a convergence check against the closed form.
//!
//! Delta and gamma are read off the tree from the node values retained at
//! depths 1 and 2, so no re-pricing is needed for them. When the spot
//! spacing between those nodes collapses (expiry at or near zero), the
//! extraction divisors degenerate and the pricer fails with
//! [`PricingError::DegenerateLattice`] instead of dividing through.

use crate::contract::{ExerciseStyle, OptionContract, OptionRight};
use crate::error::PricingError;
use crate::models::d1_d2;

/// Lattice discretization scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeScheme {
    CoxRossRubinstein,
    LeisenReimer,
}

/// Per-step tree parameters shared by both schemes.
#[derive(Debug, Clone, Copy)]
struct LatticeParams {
    /// Effective step count (odd for Leisen-Reimer)
    steps: usize,
    /// Up multiplier
    up: f64,
    /// Down multiplier
    down: f64,
    /// Risk-neutral up probability
    prob_up: f64,
    /// One-step discount factor e^(-r dt)
    discount: f64,
}

/// Price plus the Greeks that come directly off the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeValue {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
}

/// The step count a scheme will actually use. Leisen-Reimer forces an odd
/// depth (`n % 2 == 0 → n + 1`); CRR uses the requested depth unchanged.
pub fn effective_steps(scheme: LatticeScheme, steps: usize) -> usize {
    match scheme {
        LatticeScheme::CoxRossRubinstein => steps,
        LatticeScheme::LeisenReimer => {
            if steps % 2 == 0 {
                steps + 1
            } else {
                steps
            }
        }
    }
}

/// Peizer-Pratt method-2 inversion h(z, n), mapping a normal deviate onto a
/// binomial probability for an n-step tree.
fn peizer_pratt(z: f64, n: f64) -> f64 {
    let sign = if z >= 0.0 { 1.0 } else { -1.0 };
    let term = (z / (n + 1.0 / 3.0 + 0.1 / (n + 1.0))).powi(2) * (n + 1.0 / 6.0);
    0.5 + sign * 0.5 * (1.0 - (-term).exp()).sqrt()
}

fn crr_params(contract: &OptionContract, steps: usize) -> Result<LatticeParams, PricingError> {
    let dt = contract.expiry / steps as f64;
    let up = (contract.volatility * dt.sqrt()).exp();
    let down = 1.0 / up;

    let spread = up - down;
    if spread.abs() < f64::EPSILON {
        return Err(PricingError::DegenerateLattice {
            reason: "up/down multipliers coincide (expiry too close to zero)",
        });
    }

    let growth = ((contract.rate - contract.dividend_yield) * dt).exp();
    Ok(LatticeParams {
        steps,
        up,
        down,
        prob_up: (growth - down) / spread,
        discount: (-contract.rate * dt).exp(),
    })
}

fn leisen_reimer_params(
    contract: &OptionContract,
    steps: usize,
) -> Result<LatticeParams, PricingError> {
    let n = effective_steps(LatticeScheme::LeisenReimer, steps);
    let dt = contract.expiry / n as f64;

    let (d1, d2) = d1_d2(contract);
    let p_up_spot = peizer_pratt(d1, n as f64);
    let p = peizer_pratt(d2, n as f64);

    if (1.0 - p).abs() < f64::EPSILON || p.abs() < f64::EPSILON {
        return Err(PricingError::DegenerateLattice {
            reason: "Peizer-Pratt probability collapsed to 0 or 1",
        });
    }

    let growth = ((contract.rate - contract.dividend_yield) * dt).exp();
    let up = growth * p_up_spot / p;
    let down = (growth - p * up) / (1.0 - p);

    if (up - down).abs() < f64::EPSILON {
        return Err(PricingError::DegenerateLattice {
            reason: "up/down multipliers coincide (expiry too close to zero)",
        });
    }

    Ok(LatticeParams {
        steps: n,
        up,
        down,
        prob_up: p,
        discount: (-contract.rate * dt).exp(),
    })
}

fn params_for(
    contract: &OptionContract,
    scheme: LatticeScheme,
    steps: usize,
) -> Result<LatticeParams, PricingError> {
    match scheme {
        LatticeScheme::CoxRossRubinstein => crr_params(contract, steps),
        LatticeScheme::LeisenReimer => leisen_reimer_params(contract, steps),
    }
}

/// Backward induction over the tree. Mutates one scratch buffer of node
/// values in place (O(n) space, O(n²) time) and returns the root value
/// together with the node values retained at depths 1 and 2.
fn roll_back(
    contract: &OptionContract,
    right: OptionRight,
    params: &LatticeParams,
    exercise: ExerciseStyle,
) -> (f64, [f64; 2], [f64; 3]) {
    let n = params.steps;
    let LatticeParams {
        up,
        down,
        prob_up,
        discount,
        ..
    } = *params;

    // Terminal payoffs at node i: spot * u^(n-i) * d^i
    let mut values: Vec<f64> = (0..=n)
        .map(|i| {
            let terminal_spot = contract.spot * up.powi((n - i) as i32) * down.powi(i as i32);
            right.intrinsic(terminal_spot, contract.strike)
        })
        .collect();

    let mut depth_one = [0.0; 2];
    let mut depth_two = [0.0; 3];

    for j in (0..n).rev() {
        for i in 0..=j {
            let hold = discount * (prob_up * values[i] + (1.0 - prob_up) * values[i + 1]);
            values[i] = match exercise {
                ExerciseStyle::American => {
                    let node_spot =
                        contract.spot * up.powi((j - i) as i32) * down.powi(i as i32);
                    hold.max(right.intrinsic(node_spot, contract.strike))
                }
                ExerciseStyle::European => hold,
            };
        }
        if j == 2 {
            depth_two.copy_from_slice(&values[..3]);
        }
        if j == 1 {
            depth_one.copy_from_slice(&values[..2]);
        }
    }

    (values[0], depth_one, depth_two)
}

/// Price an option on the lattice and extract delta and gamma from the
/// retained depth-1 and depth-2 node values.
///
/// Callers are expected to have validated the contract and `steps >= 3`.
pub fn value(
    contract: &OptionContract,
    right: OptionRight,
    scheme: LatticeScheme,
    exercise: ExerciseStyle,
    steps: usize,
) -> Result<LatticeValue, PricingError> {
    let params = params_for(contract, scheme, steps)?;
    let (price, depth_one, depth_two) = roll_back(contract, right, &params, exercise);

    let spot = contract.spot;
    let (up, down) = (params.up, params.down);

    // Delta from the two depth-1 nodes
    let delta_spread = spot * up - spot * down;
    // Gamma from the three depth-2 nodes via a central difference of the
    // two one-sided delta estimates
    let s_uu = spot * up * up;
    let s_ud = spot * up * down;
    let s_dd = spot * down * down;
    let h_upper = s_uu - s_ud;
    let h_lower = s_ud - s_dd;
    let half_span = 0.5 * (s_uu - s_dd);

    let floor = f64::EPSILON * spot;
    if delta_spread.abs() < floor
        || h_upper.abs() < floor
        || h_lower.abs() < floor
        || half_span.abs() < floor
    {
        return Err(PricingError::DegenerateLattice {
            reason: "Greek extraction divisor collapsed to zero",
        });
    }

    let delta = (depth_one[0] - depth_one[1]) / delta_spread;
    let upper_slope = (depth_two[0] - depth_two[1]) / h_upper;
    let lower_slope = (depth_two[1] - depth_two[2]) / h_lower;
    let gamma = (upper_slope - lower_slope) / half_span;

    Ok(LatticeValue { price, delta, gamma })
}

/// Price only, skipping Greek extraction. Used by the finite-difference
/// bumps and the implied-volatility bisection, where the tree-Greek
/// divisors of a perturbed contract must not be able to fail the call.
pub fn price_only(
    contract: &OptionContract,
    right: OptionRight,
    scheme: LatticeScheme,
    exercise: ExerciseStyle,
    steps: usize,
) -> Result<f64, PricingError> {
    let params = params_for(contract, scheme, steps)?;
    let (price, _, _) = roll_back(contract, right, &params, exercise);
    Ok(price)
}
