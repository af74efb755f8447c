use std::{fs, io};

use burgers::{Csff1Writer, Driver, Ftcs, Logger, Problem, Simulation, Solver};
use tracing::info;

fn main() -> Result<(), burgers::SolverError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let problem = Problem::burgers().with_name("burgers_ftcs");
    let mut sim = Simulation::with_method(problem, 201, 2001, Ftcs::new())?;

    info!("problem summary: {sim}");

    fs::create_dir_all("bin")?;
    let mut output = io::BufWriter::new(fs::File::create("bin/burgers_ftcs.csff1")?);

    Driver::new(&mut sim)
        .with_sampling_period(20)
        .with_observer(Logger)
        .with_observer(Csff1Writer::new(&mut output))
        .run()?;

    info!("L2 error: {:e}", sim.l2_error(None)?);
    info!("MSE: {:e}", sim.mean_squared_error(None)?);

    Ok(())
}
