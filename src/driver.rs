use std::io::Write;

use bytemuck::bytes_of;
use faer_core::MatRef;

use crate::{
    error::SolverError, faer_add::first_non_finite, mesh::Mesh, method::Method, problem::Problem,
    sim::Simulation, Ctx, Float,
};

pub struct ObsCtx<'ctx> {
    // Meta
    problem: &'ctx Problem,
    mesh: &'ctx Mesh,
    method: &'ctx dyn Method,
    sampling_period: usize,

    // Iteration info
    level: usize,
    time: Float,
    solution: MatRef<'ctx, Float>, // full column of the current level
}

impl<'ctx> ObsCtx<'ctx> {
    pub fn problem(&self) -> &Problem {
        self.problem
    }

    pub fn mesh(&self) -> &Mesh {
        self.mesh
    }

    pub fn method(&self) -> &dyn Method {
        self.method
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn time(&self) -> Float {
        self.time
    }

    pub fn solution(&self) -> MatRef<'_, Float> {
        self.solution
    }

    pub fn sampling_period(&self) -> usize {
        self.sampling_period
    }
}

#[allow(unused_variables)]
pub trait Observer {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Ok(())
    }
}

/// Runs the time recurrence of a [`Simulation`] while notifying observers.
///
/// Level `n + 1` is computed from level `n` only, into a scratch column, and then
/// copied into the interior rows of the field; boundary rows are never written.
pub struct Driver<'s, 'd, M> {
    pub(crate) sim: &'s mut Simulation<M>,
    pub(crate) observers: Vec<Box<dyn Observer + 'd>>,
    pub(crate) sampling_period: usize,
    pub(crate) step_limit: Option<usize>,
}

impl<'s, 'd, M: Method> Driver<'s, 'd, M> {
    pub fn new(sim: &'s mut Simulation<M>) -> Self {
        let sampling_period = 1 + sim.mesh.time.steps / 10;
        Self {
            sim,
            observers: Vec::new(),
            sampling_period,
            step_limit: None,
        }
    }

    /// Observers see every `period`-th level (the first and last are always reported
    /// through `at_startup` and `at_cleanup`).
    pub fn with_sampling_period(mut self, period: usize) -> Self {
        self.sampling_period = period.max(1);
        self
    }

    /// Stop after `steps` time steps instead of running up to the last level.
    pub fn with_step_limit(mut self, steps: usize) -> Self {
        self.step_limit = Some(steps);
        self
    }

    pub fn with_observer(mut self, observer: impl Observer + 'd) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn run(&mut self) -> Result<(), SolverError> {
        let Simulation {
            problem,
            mesh,
            method,
            field,
            next,
            levels,
            ..
        } = &mut *self.sim;

        let interior = mesh.n_spatial() - 2;
        let steps = match self.step_limit {
            Some(limit) => limit.min(mesh.time.steps),
            None => mesh.time.steps,
        };

        for o in self.observers.iter_mut() {
            o.at_startup(ObsCtx {
                problem,
                mesh,
                method: &*method,
                sampling_period: self.sampling_period,
                level: 0,
                time: mesh.time.lower,
                solution: field.as_ref().col(0),
            })?;
        }

        *levels = 1;
        for n in 0..steps {
            let ctx = Ctx::new(mesh, problem.nu, n);

            // read level n, write the interior of level n + 1
            method.apply(ctx, field.as_ref().col(n), next.as_mut());
            field
                .as_mut()
                .col(n + 1)
                .subrows(1, interior)
                .clone_from(next.as_ref());
            *levels = n + 2;

            if (n + 1).is_multiple_of(self.sampling_period) {
                for o in self.observers.iter_mut() {
                    o.at_each_iteration(ObsCtx {
                        problem,
                        mesh,
                        method: &*method,
                        sampling_period: self.sampling_period,
                        level: n + 1,
                        time: mesh.time.at(n + 1),
                        solution: field.as_ref().col(n + 1),
                    })?;
                }
            }
        }

        for o in self.observers.iter_mut() {
            o.at_cleanup(ObsCtx {
                problem,
                mesh,
                method: &*method,
                sampling_period: self.sampling_period,
                level: steps,
                time: mesh.time.at(steps),
                solution: field.as_ref().col(steps),
            })?;
        }

        Ok(())
    }
}

pub struct Logger;

impl Observer for Logger {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        tracing::event!(
            tracing::Level::INFO,
            "start of simulation of problem `{}` (`{}` method, nu={:e}, Δx={:e} ({} points), Δt={:e} ({} levels))",
            ctx.problem().name(),
            ctx.method().name(),
            ctx.problem().nu(),
            ctx.mesh().h(),
            ctx.mesh().n_spatial(),
            ctx.mesh().k(),
            ctx.mesh().n_temporal(),
        );
        Ok(())
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        tracing::event!(
            tracing::Level::TRACE,
            "problem `{}`: level {} (t={:.4})",
            ctx.problem().name(),
            ctx.level(),
            ctx.time()
        );
        Ok(())
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        tracing::event!(
            tracing::Level::INFO,
            "finished simulation of problem `{}` at level {}",
            ctx.problem().name(),
            ctx.level()
        );
        Ok(())
    }
}

/// Fails the run with [`SolverError::NumericalInstability`] as soon as a sampled level
/// holds a NaN or an infinite value. Sample every level to stop at the first one.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstabilityGuard;

impl InstabilityGuard {
    fn check(ctx: &ObsCtx) -> Result<(), SolverError> {
        match first_non_finite(ctx.solution()) {
            None => Ok(()),
            Some((row, _)) => {
                tracing::warn!(
                    level = ctx.level(),
                    row,
                    "non-finite value in the solution of problem `{}`",
                    ctx.problem().name()
                );
                Err(SolverError::NumericalInstability {
                    level: ctx.level(),
                    time: ctx.time(),
                })
            }
        }
    }
}

impl Observer for InstabilityGuard {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Self::check(&ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Self::check(&ctx)
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        Self::check(&ctx)
    }
}

pub const CSFF1_HEADER: &[u8] = b"CSFF1";
pub const CSFF1_MARKER: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Streams the sampled levels in the CSFF1 binary layout: header, dimensions, bounds,
/// viscosity and method name, a marker, then one column of `n_spatial` floats per
/// reported level and a closing marker.
pub struct Csff1Writer<W> {
    output: W,
    column: Vec<Float>,
}

impl<W: Write> Csff1Writer<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            column: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}

impl<W: Write> Observer for Csff1Writer<W> {
    fn at_startup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        let output = &mut self.output;
        // magic bytes
        output.write_all(CSFF1_HEADER)?;
        // write float precision
        output.write_all(bytes_of(&(std::mem::size_of::<Float>() as u8)))?;
        // write dimensions
        output.write_all(bytes_of(&(ctx.mesh.n_spatial() as u32)))?;
        output.write_all(bytes_of(&(ctx.mesh.n_temporal() as u32)))?;
        output.write_all(bytes_of(&(ctx.sampling_period as u32)))?;
        // write bounds
        output.write_all(bytes_of(&ctx.mesh.space.lower))?;
        output.write_all(bytes_of(&ctx.mesh.space.upper))?;
        output.write_all(bytes_of(&ctx.mesh.time.lower))?;
        output.write_all(bytes_of(&ctx.mesh.time.upper))?;
        output.write_all(bytes_of(&ctx.problem.nu))?;
        // write method name
        let name = ctx.method.name().as_bytes();
        output.write_all(bytes_of(&(name.len() as u32)))?;
        output.write_all(name)?;

        // marker
        output.write_all(&CSFF1_MARKER)?;

        // write initial condition
        self.at_each_iteration(ctx)
    }

    fn at_each_iteration(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        let u = ctx.solution;
        self.column.clear();
        self.column.extend((0..u.nrows()).map(|i| u[(i, 0)]));
        self.output
            .write_all(bytemuck::cast_slice(self.column.as_slice()))
            .map_err(SolverError::from)
    }

    fn at_cleanup(&mut self, ctx: ObsCtx) -> Result<(), SolverError> {
        // the last level is already written when it falls on the sampling grid
        if !ctx.level.is_multiple_of(ctx.sampling_period) {
            self.at_each_iteration(ctx)?;
        }
        self.output.write_all(&CSFF1_MARKER)?;
        self.output.flush().map_err(SolverError::from)
    }
}
