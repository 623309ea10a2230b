// demos/plot_convergence.rs
// Plots the European lattice price against step count for the CRR and
// Leisen-Reimer schemes, with the closed-form price as the limit line.
// CRR's O(1/n) oscillation and LR's early flatline are both visible.
//
// Usage:
//     cargo run --example plot_convergence
//
// The output image will be written to convergence.svg in the working
// directory.

use std::error::Error;

use plotters::prelude::*;
use pricer_lib::models::black_scholes;
use pricer_lib::models::lattice::{self, LatticeScheme};
use pricer_lib::{ExerciseStyle, OptionContract, OptionRight};

fn main() -> Result<(), Box<dyn Error>> {
    let contract = OptionContract::new(185.61, 185.0, 18.0 / 365.0, 0.4209, 0.0349, 0.0002)?;
    let right = OptionRight::Put;

    let closed_form = black_scholes::price(&contract, right);
    println!("Closed-form European put: {:.6}", closed_form);

    let mut crr_points = Vec::new();
    let mut lr_points = Vec::new();
    let mut n = 11;
    while n <= 401 {
        let crr = lattice::value(
            &contract,
            right,
            LatticeScheme::CoxRossRubinstein,
            ExerciseStyle::European,
            n,
        )?
        .price;
        let lr = lattice::value(
            &contract,
            right,
            LatticeScheme::LeisenReimer,
            ExerciseStyle::European,
            n,
        )?
        .price;
        crr_points.push((n as f64, crr));
        lr_points.push((n as f64, lr));
        n += 2;
    }

    let prices: Vec<f64> = crr_points.iter().map(|p| p.1).collect();
    let y_min = prices.iter().cloned().fold(f64::INFINITY, f64::min).min(closed_form) - 0.002;
    let y_max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max).max(closed_form) + 0.002;

    let root = SVGBackend::new("convergence.svg", (1280, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(
            "Lattice convergence to the closed form (European put)",
            ("sans-serif", 30),
        )
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(11.0..401.0, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Lattice steps")
        .y_desc("Price ($)")
        .draw()?;

    chart
        .draw_series(vec![PathElement::new(
            vec![(11.0, closed_form), (401.0, closed_form)],
            BLACK.stroke_width(1),
        )])?
        .label("closed form")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .draw_series(vec![PathElement::new(crr_points, RED.stroke_width(1))])?
        .label("CRR")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart
        .draw_series(vec![PathElement::new(lr_points, BLUE.stroke_width(1))])?
        .label("Leisen-Reimer")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    println!("Chart saved to convergence.svg");
    Ok(())
}
