// demos/pricing_demo.rs

//! Demonstration of option pricing, Greeks, and implied volatility
//!
//! This example shows how to:
//! 1. Build a contract and a model configuration (including from TOML)
//! 2. Price both sides with the Greeks engine
//! 3. Compare the three models on the same contract
//! 4. Invert an observed market price into implied volatility

use anyhow::Result;
use pricer_lib::{
    implied_volatility, price_both, DayCount, ImpliedVolQuery, Model, ModelConfig,
    OptionContract, OptionRight,
};

fn main() -> Result<()> {
    println!("Option Pricing and Risk Demo");
    println!("============================");

    // Contract: S=269.48, K=270, 17 calendar days, 23.52% vol,
    // r=3.49%, q=0.40%
    let day_count = DayCount::Calendar365;
    let contract = OptionContract::new(
        269.48,
        270.0,
        day_count.year_fraction(17.0),
        0.2352,
        0.0349,
        0.0040,
    )?;

    println!("Underlying price: ${:.2}", contract.spot);
    println!("Strike:           ${:.2}", contract.strike);
    println!(
        "Expiry:           {:.4} years ({:.0} days)",
        contract.expiry,
        contract.expiry * day_count.divisor()
    );

    // Model configuration can also come from TOML, with defaults for
    // anything omitted
    let config = ModelConfig::from_toml_str(
        r#"
        model = "lattice-crr"
        steps = 300
        "#,
    )?;

    println!("\nStep 1: Pricing both sides on a {}-step CRR lattice...", config.steps);
    let pair = price_both(&contract, &config)?;

    println!("\n{:<8} {:>10} {:>10}", "", "CALL", "PUT");
    println!("{}", "-".repeat(30));
    println!("{:<8} {:>10.4} {:>10.4}", "Price", pair.call.price, pair.put.price);
    println!("{:<8} {:>10.5} {:>10.5}", "Delta", pair.call.delta, pair.put.delta);
    println!("{:<8} {:>10.5} {:>10.5}", "Gamma", pair.call.gamma, pair.put.gamma);
    println!("{:<8} {:>10.5} {:>10.5}", "Theta", pair.call.theta, pair.put.theta);
    println!("{:<8} {:>10.5} {:>10.5}", "Vega", pair.call.vega, pair.put.vega);
    println!("{:<8} {:>10.5} {:>10.5}", "Rho", pair.call.rho, pair.put.rho);

    println!("\nStep 2: Comparing models on the same contract...");
    println!("\n{:<14} {:>10} {:>10}", "Model", "Call", "Put");
    println!("{}", "-".repeat(36));
    for model in [Model::ClosedForm, Model::LatticeCrr, Model::LatticeLr] {
        let pair = price_both(&contract, &ModelConfig::for_model(model))?;
        println!(
            "{:<14} {:>10.4} {:>10.4}",
            model.identifier(),
            pair.call.price,
            pair.put.price
        );
    }

    println!("\nStep 3: Implied volatility from an observed price...");
    let query = ImpliedVolQuery {
        observed_price: 7.40,
        right: OptionRight::Call,
        spot: 185.61,
        strike: 185.0,
        expiry: day_count.year_fraction(18.0),
        rate: 0.0349,
        dividend_yield: 0.0002,
    };
    let result = implied_volatility(&query, &ModelConfig::for_model(Model::ClosedForm))?;

    println!(
        "Observed ${:.2} call implies {:.2}% vol ({} in {} iterations)",
        query.observed_price,
        result.volatility * 100.0,
        if result.converged { "converged" } else { "best estimate" },
        result.iterations
    );

    Ok(())
}
