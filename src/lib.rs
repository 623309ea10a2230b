//! # Pricer-Lib: Vanilla Option Pricing and Risk Engine
//!
//! `pricer-lib` is a Rust library for quantitative finance applications,
//! focused on pricing vanilla European and American options, deriving their
//! risk sensitivities (Greeks), and inverting market prices into implied
//! volatility.
//!
//! ## Core Features
//!
//! - **Closed-Form Pricing**: Black-Scholes-Merton valuation with analytic
//!   delta, gamma, and vega for European exercise
//! - **Binomial Lattices**: Cox-Ross-Rubinstein and Leisen-Reimer trees for
//!   American exercise, with delta and gamma extracted from the tree
//! - **Greeks Engine**: full sensitivity set for call and put in one pass,
//!   theta/vega/rho by bump-and-reprice against the selected model
//! - **Implied Volatility**: Newton-Raphson (closed form) and bisection
//!   (lattices) with explicit convergence reporting
//!
//! ## Quick Start
//!
//! ```rust
//! use pricer_lib::{price_both, ModelConfig, Model, OptionContract};
//!
//! // S=185.61, K=185, 18 calendar days, 42.09% vol, r=3.49%, q=0.02%
//! let contract = OptionContract::new(185.61, 185.0, 18.0 / 365.0, 0.4209, 0.0349, 0.0002)?;
//!
//! // American pricing on a 300-step CRR lattice
//! let config = ModelConfig::for_model(Model::LatticeCrr);
//! let pair = price_both(&contract, &config)?;
//!
//! println!("call {:.2} (delta {:.4})", pair.call.price, pair.call.delta);
//! println!("put  {:.2} (delta {:.4})", pair.put.price, pair.put.delta);
//! # Ok::<(), pricer_lib::PricingError>(())
//! ```
//!
//! ## Model Support
//!
//! | Model          | Exercise | Identifier      |
//! |----------------|----------|-----------------|
//! | Black-Scholes  | European | `"closed-form"` |
//! | CRR lattice    | American | `"lattice-crr"` |
//! | Leisen-Reimer  | American | `"lattice-lr"`  |
//!
//! ## Design Notes
//!
//! Every operation is a pure, synchronous, CPU-bound computation over plain
//! value types: no I/O, no shared state, no internal caching. Independent
//! calls may run concurrently with zero coordination. Precondition failures
//! (`S, K, T, σ ≤ 0`, too few lattice steps) are rejected before any
//! numerical work; the engine never returns NaN or infinity silently.

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod iv;
pub mod math;
pub mod models;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Core value types
pub use contract::{
    ExerciseStyle, ImpliedVol, ImpliedVolQuery, OptionContract, OptionRight, PricedPair,
    PricingResult,
};

// Model selection and configuration
pub use config::{DayCount, Model, ModelConfig};

// Error taxonomy
pub use error::PricingError;

// Lattice internals useful to callers running convergence checks
pub use models::lattice::{LatticeScheme, LatticeValue};

// ================================================================================================
// TOP-LEVEL API
// ================================================================================================

/// Price a single option and its Greeks under the configured model.
///
/// Delta and gamma come from the closed form (European) or off the tree
/// (American); theta, vega and rho are finite differences against the same
/// pricer, so the whole result is internally consistent with `price`.
///
/// # Errors
///
/// * [`PricingError::InvalidInput`] if any of `S, K, T, σ` is not strictly
///   positive, a rate is non-finite, or `steps < 3`
/// * [`PricingError::DegenerateLattice`] if a tree-Greek divisor collapses
///   (expiry at or near zero)
///
/// # Example
///
/// ```rust
/// use pricer_lib::{price, Model, ModelConfig, OptionContract, OptionRight};
///
/// let contract = OptionContract::new(100.0, 100.0, 0.5, 0.25, 0.03, 0.01)?;
/// let result = price(&contract, OptionRight::Call, &ModelConfig::for_model(Model::ClosedForm))?;
/// assert!(result.price > 0.0);
/// # Ok::<(), pricer_lib::PricingError>(())
/// ```
pub fn price(
    contract: &OptionContract,
    right: OptionRight,
    config: &ModelConfig,
) -> Result<PricingResult, PricingError> {
    engine::price(contract, right, config)
}

/// Price both sides of a contract in one invocation.
///
/// The surrounding application always wants call and put together; this
/// shares input validation across the two sides and returns a
/// [`PricedPair`].
pub fn price_both(
    contract: &OptionContract,
    config: &ModelConfig,
) -> Result<PricedPair, PricingError> {
    engine::price_both(contract, config)
}

/// Recover the volatility at which the configured model reproduces an
/// observed market price.
///
/// Uses Newton-Raphson with the analytic vega for the closed-form model and
/// bisection over `[0.0001, 5.0]` for the lattice models. An exhausted
/// iteration budget is reported through [`ImpliedVol::converged`], not as
/// an error: the best estimate found is still returned.
///
/// # Example
///
/// ```rust
/// use pricer_lib::{implied_volatility, ImpliedVolQuery, Model, ModelConfig, OptionRight};
///
/// let query = ImpliedVolQuery {
///     observed_price: 7.40,
///     right: OptionRight::Call,
///     spot: 185.61,
///     strike: 185.0,
///     expiry: 18.0 / 365.0,
///     rate: 0.0349,
///     dividend_yield: 0.0002,
/// };
/// let result = implied_volatility(&query, &ModelConfig::for_model(Model::ClosedForm))?;
/// assert!((result.volatility - 0.42).abs() < 0.005);
/// # Ok::<(), pricer_lib::PricingError>(())
/// ```
pub fn implied_volatility(
    query: &ImpliedVolQuery,
    config: &ModelConfig,
) -> Result<ImpliedVol, PricingError> {
    iv::implied_volatility(query, config)
}
