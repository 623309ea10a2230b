mod test_utils;

use pricer_lib::{
    implied_volatility, price, ImpliedVolQuery, Model, OptionRight, PricingError,
};
use test_utils::{reference_contract, test_config};

fn query_for(observed_price: f64, right: OptionRight) -> ImpliedVolQuery {
    let contract = reference_contract();
    ImpliedVolQuery {
        observed_price,
        right,
        spot: contract.spot,
        strike: contract.strike,
        expiry: contract.expiry,
        rate: contract.rate,
        dividend_yield: contract.dividend_yield,
    }
}

/// Round trip: price the reference contract at v = 42.09%, feed the price
/// back in, and recover the volatility within half a vol point. Exercised
/// under all three models so Newton-Raphson and bisection are both covered.
#[test]
fn test_iv_round_trip_all_models() {
    let contract = reference_contract();
    for model in [Model::ClosedForm, Model::LatticeCrr, Model::LatticeLr] {
        let config = test_config(model);
        for right in [OptionRight::Call, OptionRight::Put] {
            let observed = price(&contract, right, &config).unwrap().price;
            let result = implied_volatility(&query_for(observed, right), &config).unwrap();
            assert!(result.converged, "{:?} {:?} did not converge", model, right);
            assert!(
                (result.volatility - 0.4209).abs() < 0.005,
                "{:?} {:?}: recovered {}",
                model,
                right,
                result.volatility
            );
        }
    }
}

/// The reference scenario's observed call price of 7.40 implies a
/// volatility of roughly 42% under the closed form.
#[test]
fn test_observed_price_implies_42_percent() {
    let result = implied_volatility(
        &query_for(7.40, OptionRight::Call),
        &test_config(Model::ClosedForm),
    )
    .unwrap();
    assert!(result.converged);
    assert!(
        (result.volatility - 0.42).abs() < 0.005,
        "implied vol {}",
        result.volatility
    );
}

/// An unattainable observed price exhausts the budget; the solver must
/// still return a finite best estimate, flagged as not converged.
#[test]
fn test_did_not_converge_returns_best_estimate() {
    for model in [Model::ClosedForm, Model::LatticeCrr] {
        let result = implied_volatility(
            &query_for(1000.0, OptionRight::Call),
            &test_config(model),
        )
        .unwrap();
        assert!(!result.converged, "{:?} should not converge", model);
        assert!(result.volatility.is_finite() && result.volatility > 0.0);
        assert!(result.iterations > 0);
    }
}

/// Newton-Raphson needs only a few iterations on a well-behaved surface;
/// bisection takes most of its budget but stays inside it.
#[test]
fn test_iteration_budgets() {
    let config = test_config(Model::ClosedForm);
    let observed = price(&reference_contract(), OptionRight::Call, &config)
        .unwrap()
        .price;
    let newton = implied_volatility(&query_for(observed, OptionRight::Call), &config).unwrap();
    assert!(newton.iterations <= 5, "Newton used {} iterations", newton.iterations);

    let config = test_config(Model::LatticeCrr);
    let observed = price(&reference_contract(), OptionRight::Call, &config)
        .unwrap()
        .price;
    let bisect = implied_volatility(&query_for(observed, OptionRight::Call), &config).unwrap();
    assert!(bisect.iterations <= 30, "bisection used {} iterations", bisect.iterations);
}

/// Query preconditions fail fast, before any solver iteration.
#[test]
fn test_invalid_queries_rejected() {
    let config = test_config(Model::ClosedForm);

    let mut query = query_for(7.40, OptionRight::Call);
    query.observed_price = 0.0;
    assert!(matches!(
        implied_volatility(&query, &config),
        Err(PricingError::InvalidInput { parameter: "observed_price", .. })
    ));

    let mut query = query_for(7.40, OptionRight::Call);
    query.spot = -10.0;
    assert!(matches!(
        implied_volatility(&query, &config),
        Err(PricingError::InvalidInput { parameter: "spot", .. })
    ));
}

/// Model identifiers parse into the tagged variant; unknown strings are
/// rejected with the identifier echoed back.
#[test]
fn test_model_identifier_parsing() {
    assert_eq!("closed-form".parse::<Model>().unwrap(), Model::ClosedForm);
    assert_eq!("lattice-crr".parse::<Model>().unwrap(), Model::LatticeCrr);
    assert_eq!("lattice-lr".parse::<Model>().unwrap(), Model::LatticeLr);

    match "binomial".parse::<Model>() {
        Err(PricingError::UnknownModel { identifier }) => assert_eq!(identifier, "binomial"),
        other => panic!("expected UnknownModel, got {:?}", other),
    }
}
