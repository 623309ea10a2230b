// src/contract.rs

//! Value types exchanged with the pricing engine.
//!
//! Every type here is a plain, immutable, copyable record. Each engine call
//! is independent and referentially transparent given its inputs; nothing is
//! cached or shared between calls.

use crate::error::{validation, PricingError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Option right (call or put).
///
/// Supplied per call rather than stored on the contract so that both sides
/// of the same contract can be evaluated in one pass (see
/// [`crate::price_both`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionRight {
    Call,
    Put,
}

impl OptionRight {
    /// Payoff direction: +1 for call, -1 for put
    pub fn sign(&self) -> f64 {
        match self {
            OptionRight::Call => 1.0,
            OptionRight::Put => -1.0,
        }
    }

    /// Intrinsic value at the given spot level
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionRight::Call => (spot - strike).max(0.0),
            OptionRight::Put => (strike - spot).max(0.0),
        }
    }
}

/// Exercise style.
///
/// The lattice pricers value American exercise by taking the maximum of
/// holding and immediate exercise at every node; European valuation on the
/// same lattice omits that maximum and exists mainly as a convergence check
/// against the closed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExerciseStyle {
    European,
    American,
}

/// A fully-specified vanilla option contract.
///
/// `expiry` is the time to expiry in years; converting a day count into a
/// year fraction is the caller's job (see [`crate::config::DayCount`]).
/// All of `spot`, `strike`, `expiry`, `volatility` must be strictly
/// positive; `rate` and `dividend_yield` may take any sign. Violations are
/// precondition failures, never silent clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptionContract {
    /// Underlying spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub expiry: f64,
    /// Annualized volatility (sigma, as a decimal)
    pub volatility: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend / cost-of-carry yield (q)
    pub dividend_yield: f64,
}

impl OptionContract {
    /// Creates a new contract with validation.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        volatility: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> Result<Self, PricingError> {
        let contract = Self {
            spot,
            strike,
            expiry,
            volatility,
            rate,
            dividend_yield,
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Validates the contract preconditions.
    pub fn validate(&self) -> Result<(), PricingError> {
        validation::validate_positive("spot", self.spot)?;
        validation::validate_positive("strike", self.strike)?;
        validation::validate_positive("expiry", self.expiry)?;
        validation::validate_positive("volatility", self.volatility)?;
        validation::validate_finite("rate", self.rate)?;
        validation::validate_finite("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    /// Same contract with a different volatility
    pub fn with_volatility(&self, volatility: f64) -> Self {
        Self { volatility, ..*self }
    }

    /// Same contract with a different time to expiry
    pub fn with_expiry(&self, expiry: f64) -> Self {
        Self { expiry, ..*self }
    }

    /// Same contract with a different risk-free rate
    pub fn with_rate(&self, rate: f64) -> Self {
        Self { rate, ..*self }
    }
}

/// Price and sensitivities for one side of a contract.
///
/// `theta` is quoted per day (one day-count unit), `vega` per vol point
/// (+1%), `rho` per 1% rate move, matching the finite-difference bump sizes
/// in the Greeks engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingResult {
    pub price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

/// Call and put results for one contract, produced in a single invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricedPair {
    pub call: PricingResult,
    pub put: PricingResult,
}

/// An implied-volatility inversion request: an observed market price plus a
/// contract whose volatility is the unknown being solved for.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpliedVolQuery {
    /// Observed market price to invert
    pub observed_price: f64,
    /// Which side of the contract the observed price belongs to
    pub right: OptionRight,
    /// Underlying spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Continuous dividend / cost-of-carry yield (q)
    pub dividend_yield: f64,
}

impl ImpliedVolQuery {
    /// Validates the query preconditions.
    pub fn validate(&self) -> Result<(), PricingError> {
        validation::validate_positive("observed_price", self.observed_price)?;
        validation::validate_positive("spot", self.spot)?;
        validation::validate_positive("strike", self.strike)?;
        validation::validate_positive("expiry", self.expiry)?;
        validation::validate_finite("rate", self.rate)?;
        validation::validate_finite("dividend_yield", self.dividend_yield)?;
        Ok(())
    }

    /// The query's contract evaluated at a candidate volatility.
    pub fn contract_at(&self, volatility: f64) -> OptionContract {
        OptionContract {
            spot: self.spot,
            strike: self.strike,
            expiry: self.expiry,
            volatility,
            rate: self.rate,
            dividend_yield: self.dividend_yield,
        }
    }
}

/// Implied-volatility estimate.
///
/// When the iteration budget runs out before the price tolerance is met,
/// `converged` is false and `volatility` holds the best estimate found; an
/// approximate IV is still useful to display, so this is not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpliedVol {
    /// Volatility estimate (annualized decimal)
    pub volatility: f64,
    /// Whether the solver met its price tolerance within budget
    pub converged: bool,
    /// Iterations consumed
    pub iterations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_right() {
        assert_eq!(OptionRight::Call.sign(), 1.0);
        assert_eq!(OptionRight::Put.sign(), -1.0);

        assert_eq!(OptionRight::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionRight::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionRight::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionRight::Put.intrinsic(110.0, 100.0), 0.0);
    }

    #[test]
    fn test_contract_validation() {
        assert!(OptionContract::new(100.0, 100.0, 0.5, 0.2, 0.03, 0.01).is_ok());

        // Each strictly-positive field rejected at zero
        assert!(OptionContract::new(0.0, 100.0, 0.5, 0.2, 0.03, 0.01).is_err());
        assert!(OptionContract::new(100.0, 0.0, 0.5, 0.2, 0.03, 0.01).is_err());
        assert!(OptionContract::new(100.0, 100.0, 0.0, 0.2, 0.03, 0.01).is_err());
        assert!(OptionContract::new(100.0, 100.0, 0.5, 0.0, 0.03, 0.01).is_err());

        // Rates may be negative
        assert!(OptionContract::new(100.0, 100.0, 0.5, 0.2, -0.005, -0.01).is_ok());

        // Non-finite inputs rejected
        assert!(OptionContract::new(f64::NAN, 100.0, 0.5, 0.2, 0.03, 0.01).is_err());
        assert!(OptionContract::new(100.0, 100.0, 0.5, 0.2, f64::INFINITY, 0.01).is_err());
    }

    #[test]
    fn test_bump_constructors() {
        let c = OptionContract::new(100.0, 100.0, 0.5, 0.2, 0.03, 0.01).unwrap();
        assert_eq!(c.with_volatility(0.21).volatility, 0.21);
        assert_eq!(c.with_volatility(0.21).spot, 100.0);
        assert_eq!(c.with_expiry(0.25).expiry, 0.25);
        assert_eq!(c.with_rate(0.04).rate, 0.04);
    }

    #[test]
    fn test_query_contract_at() {
        let query = ImpliedVolQuery {
            observed_price: 7.40,
            right: OptionRight::Call,
            spot: 185.61,
            strike: 185.0,
            expiry: 18.0 / 365.0,
            rate: 0.0349,
            dividend_yield: 0.0002,
        };
        assert!(query.validate().is_ok());

        let contract = query.contract_at(0.42);
        assert_eq!(contract.volatility, 0.42);
        assert_eq!(contract.spot, 185.61);
        assert!(contract.validate().is_ok());

        let bad = ImpliedVolQuery {
            observed_price: 0.0,
            ..query
        };
        assert!(bad.validate().is_err());
    }
}
