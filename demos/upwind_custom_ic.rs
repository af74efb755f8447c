use burgers::{
    faer_add::linspace, Driver, InstabilityGuard, Logger, Problem, Simulation, Solver, Upwind,
};
use tracing::info;

// Stand-in for an initial condition produced by a trained network: the exact profile
// with a small smooth perturbation.
fn predicted_initial_condition(n_spatial: usize) -> Vec<f64> {
    let x = linspace(-1.0, n_spatial, 2.0 / (n_spatial - 1) as f64);
    (0..n_spatial)
        .map(|i| {
            let x = x[(i, 0)];
            -(std::f64::consts::PI * x).sin() * (1.0 + 0.01 * (1.0 - x * x))
        })
        .collect()
}

fn main() -> Result<(), burgers::SolverError> {
    tracing_subscriber::fmt::init();

    let n_spatial = 641;
    let n_temporal = 5001;

    let problem = Problem::burgers()
        .with_name("upwind_custom_ic")
        .with_initial_condition(predicted_initial_condition(n_spatial));
    let mut sim = Simulation::with_method(problem, n_spatial, n_temporal, Upwind::with_order(2)?)?;

    Driver::new(&mut sim)
        .with_observer(Logger)
        .with_observer(InstabilityGuard)
        .run()?;

    let l2 = sim.l2_error(None)?;
    info!("Upwind L2 error: {l2:e}");
    info!("Upwind L2 error squared: {:e}", l2 * l2);
    info!("Upwind MSE: {:e}", sim.mean_squared_error(None)?);
    info!("Upwind MAE: {:e}", sim.mean_absolute_error(None)?);

    Ok(())
}
