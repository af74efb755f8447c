//! End-to-end behaviour of the Burgers solvers.

use std::f64::consts::PI;

use burgers::{
    faer_add::{first_non_finite, max_abs},
    metrics, Driver, Float, Ftcs, InstabilityGuard, Method, Problem, Simulation, Solver,
    SolverError, Upwind, DEFAULT_VISCOSITY,
};
use faer::Mat;
use faer_core::MatRef;

fn interior(u: MatRef<'_, Float>, level: usize) -> MatRef<'_, Float> {
    u.submatrix(1, level, u.nrows() - 2, 1)
}

fn assert_dissipates(u: MatRef<'_, Float>) {
    assert_eq!(first_non_finite(u), None);
    let start = max_abs(interior(u, 0));
    let end = max_abs(interior(u, u.ncols() - 1));
    assert!(end < start, "max |u| went from {start} to {end}");
}

fn solve<M: Method>(
    problem: Problem,
    n_spatial: usize,
    n_temporal: usize,
    method: M,
) -> Simulation<M> {
    let mut sim = Simulation::with_method(problem, n_spatial, n_temporal, method).unwrap();
    sim.time_integrate().unwrap();
    sim
}

fn solve_field<M: Method>(
    problem: Problem,
    n_spatial: usize,
    n_temporal: usize,
    method: M,
) -> Mat<Float> {
    solve(problem, n_spatial, n_temporal, method)
        .solution()
        .to_owned()
}

#[test]
fn boundary_rows_keep_their_initial_values() {
    let n = 41;
    let u0: Vec<Float> = (0..n)
        .map(|i| 0.3 + 0.5 * (PI * i as Float / (n - 1) as Float).sin())
        .collect();
    let problem = Problem::burgers()
        .with_viscosity(0.02)
        .with_initial_condition(u0.clone());

    let fields = [
        solve_field(problem.clone(), n, 201, Ftcs::new()),
        solve_field(problem.clone(), n, 201, Ftcs::conservative()),
        solve_field(problem.clone(), n, 201, Upwind::first_order()),
        solve_field(problem, n, 201, Upwind::second_order()),
    ];

    for u in &fields {
        for level in 0..u.ncols() {
            assert_eq!(u[(0, level)], u0[0]);
            assert_eq!(u[(n - 1, level)], u0[n - 1]);
        }
    }
}

#[test]
fn zero_velocity_is_a_fixed_point_without_viscosity() {
    let problem = Problem::burgers()
        .with_viscosity(0.0)
        .with_initial_condition(vec![0.0; 21]);

    let fields = [
        solve_field(problem.clone(), 21, 51, Ftcs::new()),
        solve_field(problem.clone(), 21, 51, Ftcs::conservative()),
        solve_field(problem.clone(), 21, 51, Upwind::first_order()),
        solve_field(problem, 21, 51, Upwind::second_order()),
    ];

    for u in &fields {
        assert_eq!(max_abs(u.as_ref()), 0.0);
    }
}

#[test]
fn conservative_and_advective_forms_agree_at_low_amplitude() {
    let (n_spatial, n_temporal, nu) = (41, 401, 0.05);
    let amplitude = 0.01;
    let h = 2.0 / (n_spatial - 1) as Float;
    let u0: Vec<Float> = (0..n_spatial)
        .map(|i| -amplitude * (PI * (-1.0 + h * i as Float)).sin())
        .collect();
    let problem = Problem::burgers()
        .with_viscosity(nu)
        .with_initial_condition(u0.clone());

    let advective = solve(problem.clone(), n_spatial, n_temporal, Ftcs::new());
    let conservative = solve(problem, n_spatial, n_temporal, Ftcs::conservative());

    let difference = Mat::from_fn(n_spatial, n_temporal, |i, j| {
        advective.solution()[(i, j)] - conservative.solution()[(i, j)]
    });
    assert!(max_abs(difference.as_ref()) < 1e-5);

    // with negligible advection both decay like the heat equation
    let decay = (-PI * PI * nu).exp();
    for (i, u0) in u0.iter().enumerate() {
        let u = advective.solution()[(i, n_temporal - 1)];
        assert!((u - u0 * decay).abs() < 1e-4);
    }
}

#[test]
fn mean_squared_error_between_solvers_is_symmetric() {
    let problem = Problem::burgers().with_viscosity(0.05);
    let ftcs = solve(problem.clone(), 41, 401, Ftcs::new());
    let upwind = solve(problem, 41, 401, Upwind::first_order());

    let ab = ftcs.mean_squared_error(Some(upwind.solution())).unwrap();
    let ba = upwind.mean_squared_error(Some(ftcs.solution())).unwrap();
    assert_eq!(ab, ba);
    assert!(ab > 0.0);
    assert_eq!(ftcs.mean_squared_error(Some(ftcs.solution())).unwrap(), 0.0);

    let l2 = ftcs.l2_error(Some(upwind.solution())).unwrap();
    assert!((l2 * l2 / (41.0 * 401.0) - ab).abs() < 1e-12);
}

#[test]
fn mismatched_reference_is_a_shape_error() {
    let sim = solve(Problem::burgers(), 21, 31, Ftcs::new());
    let reference = Mat::<Float>::zeros(21, 30);

    assert!(matches!(
        sim.l2_error(Some(reference.as_ref())),
        Err(SolverError::Shape { .. })
    ));
    assert!(matches!(
        sim.mean_squared_error(Some(reference.as_ref().transpose())),
        Err(SolverError::Shape { .. })
    ));
}

#[test]
fn wrong_initial_condition_length_fails_before_integration() {
    let problem = Problem::burgers().with_initial_condition(vec![0.0; 99]);
    let err = Simulation::with_method(problem, 101, 2001, Upwind::second_order()).unwrap_err();
    assert!(matches!(
        err,
        SolverError::Shape {
            expected: (101, 1),
            found: (99, 1),
            ..
        }
    ));
}

#[test]
fn benchmark_case_dissipates_with_upwind_and_conservative_ftcs() {
    let problem = Problem::burgers();
    assert_eq!(problem.nu(), DEFAULT_VISCOSITY);

    assert_dissipates(solve(problem.clone(), 101, 2001, Upwind::first_order()).solution());
    assert_dissipates(solve(problem.clone(), 101, 2001, Upwind::second_order()).solution());
    assert_dissipates(solve(problem, 101, 2001, Ftcs::conservative()).solution());
}

#[test]
fn advective_ftcs_dissipates_once_the_front_is_resolved() {
    assert_dissipates(solve(Problem::burgers(), 201, 2001, Ftcs::new()).solution());
}

#[test]
fn plain_integration_leaves_non_finite_values_in_the_field() {
    let mut sim = Simulation::new(Problem::burgers(), 101, 2001).unwrap();
    assert!(sim.time_integrate().is_ok());
    assert_eq!(sim.levels(), 2001);

    let (_, level) = first_non_finite(sim.solution()).unwrap();
    assert!(level > 0);
    // boundaries are never touched by the update
    assert_eq!(sim.solution()[(0, 2000)], sim.solution()[(0, 0)]);
    assert_eq!(sim.solution()[(100, 2000)], sim.solution()[(100, 0)]);
}

#[test]
fn instability_guard_stops_the_under_resolved_advective_ftcs() {
    let mut sim = Simulation::new(Problem::burgers(), 101, 2001).unwrap();
    let result = Driver::new(&mut sim)
        .with_sampling_period(1)
        .with_observer(InstabilityGuard)
        .run();

    match result {
        Err(SolverError::NumericalInstability { level, time }) => {
            assert!(level > 0 && level < 2001);
            assert_eq!(sim.levels(), level + 1);
            assert!((time - level as Float / 2000.0).abs() < 1e-12);
            assert!(first_non_finite(interior(sim.solution(), level)).is_some());
            assert!(first_non_finite(sim.solution().submatrix(0, 0, 101, level)).is_none());
        }
        other => panic!("expected an instability, got {other:?}"),
    }
}

#[test]
fn ftcs_tracks_the_analytical_solution_at_moderate_viscosity() {
    let problem = Problem::burgers().with_viscosity(0.05);
    let sim = solve(problem, 41, 401, Ftcs::new());
    let mse = sim.mean_squared_error(None).unwrap();
    assert!(mse < 1e-4, "mse = {mse}");
    assert!(sim.mean_absolute_error(None).unwrap() < 1e-2);
}

#[test]
fn second_order_upwind_is_closer_to_the_analytical_solution() {
    let first = solve(Problem::burgers(), 51, 501, Upwind::first_order());
    let second = solve(Problem::burgers(), 51, 501, Upwind::second_order());

    let (e1, e2) = (
        first.mean_squared_error(None).unwrap(),
        second.mean_squared_error(None).unwrap(),
    );
    assert!(e1 < 5e-3, "first order mse = {e1}");
    assert!(e2 < e1, "second order mse = {e2}, first order mse = {e1}");

    // the initial level is exact
    let exact = first.analytical().unwrap();
    let initial =
        metrics::l2_error_in(first.solution(), exact, metrics::Region::level(51, 0)).unwrap();
    assert_eq!(initial, 0.0);
}

#[test]
fn integrating_twice_gives_the_same_field() {
    let mut sim = Simulation::with_method(
        Problem::burgers().with_viscosity(0.05),
        41,
        401,
        Upwind::second_order(),
    )
    .unwrap();
    sim.time_integrate().unwrap();
    let first = sim.solution().to_owned();
    sim.time_integrate().unwrap();
    assert_eq!(sim.l2_error(Some(first.as_ref())).unwrap(), 0.0);
}
