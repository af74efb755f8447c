use std::{cell::OnceCell, fmt};

use faer::Mat;
use faer_core::MatRef;
use tracing::{debug, warn};

use crate::{
    analytical::ColeHopf,
    bc::Dirichlet,
    driver::Driver,
    error::SolverError,
    faer_add::{first_non_finite, max_abs},
    mesh::Mesh,
    method::Method,
    methods::Ftcs,
    metrics::{self, Region},
    problem::Problem,
    Ctx, Float,
};

/// Operations shared by every Burgers solver.
pub trait Solver {
    /// Runs the explicit recurrence over all time levels, overwriting the interior of
    /// every level after the first. NaN or infinite values produced by an unstable
    /// discretization are left in the field; see [`crate::InstabilityGuard`] to stop on them.
    fn time_integrate(&mut self) -> Result<(), SolverError>;

    /// The `(n_spatial, n_temporal)` solution field, one time level per column.
    fn solution(&self) -> MatRef<'_, Float>;

    /// L2 distance to `reference`, or to the analytical solution when `None`.
    fn l2_error(&self, reference: Option<MatRef<'_, Float>>) -> Result<Float, SolverError>;

    /// Mean squared difference to `reference`, or to the analytical solution when `None`.
    fn mean_squared_error(
        &self,
        reference: Option<MatRef<'_, Float>>,
    ) -> Result<Float, SolverError>;
}

pub struct Simulation<M> {
    pub(crate) problem: Problem,
    pub(crate) mesh: Mesh,
    pub(crate) method: M,
    pub(crate) boundary: Dirichlet,
    pub(crate) field: Mat<Float>,
    // interior of the level being computed
    pub(crate) next: Mat<Float>,
    pub(crate) levels: usize,
    reference: OnceCell<Mat<Float>>,
}

impl Simulation<Ftcs> {
    pub fn new(problem: Problem, n_spatial: usize, n_temporal: usize) -> Result<Self, SolverError> {
        Self::with_method(problem, n_spatial, n_temporal, Ftcs::new())
    }
}

impl<M: Method> Simulation<M> {
    pub fn with_method(
        problem: Problem,
        n_spatial: usize,
        n_temporal: usize,
        mut method: M,
    ) -> Result<Self, SolverError> {
        problem.validate()?;
        let mesh = Mesh::new(n_spatial, n_temporal)?;
        let u0 = problem.sample_initial(&mesh)?;
        if let Some((row, _)) = first_non_finite(u0.as_ref()) {
            warn!(row, "non-finite value in the initial condition");
        }

        let boundary = Dirichlet::hold(u0.as_ref());
        let mut field = Mat::<Float>::zeros(n_spatial, n_temporal);
        field.as_mut().col(0).clone_from(u0.as_ref());
        boundary.apply(field.as_mut());

        method.init(Ctx::new(&mesh, problem.nu, 0));

        let c = mesh.diffusion_number(problem.nu);
        let courant = mesh.courant_number(max_abs(u0.as_ref()));
        debug!(
            h = mesh.h(),
            k = mesh.k(),
            c,
            courant,
            "discretized problem `{}` for the `{}` method",
            problem.name,
            method.name()
        );
        if c > 0.5 {
            warn!(
                c,
                "diffusion number above 1/2, the explicit update is likely unstable"
            );
        }
        if courant > 1.0 {
            warn!(
                courant,
                "advective Courant number above 1, the explicit update is likely unstable"
            );
        }

        Ok(Self {
            problem,
            mesh,
            method,
            boundary,
            field,
            next: Mat::zeros(n_spatial - 2, 1),
            levels: 1,
            reference: OnceCell::new(),
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn boundary(&self) -> Dirichlet {
        self.boundary
    }

    pub fn levels(&self) -> usize {
        self.levels
    }

    pub fn driver<'d>(&mut self) -> Driver<'_, 'd, M> {
        Driver::new(self)
    }

    /// The analytical Cole-Hopf field on this mesh, computed on first use.
    ///
    /// Only meaningful for the default `-sin(πx)` profile; a supplied initial condition
    /// approximating it (e.g. a trained network) is compared against the same field.
    pub fn analytical(&self) -> Result<MatRef<'_, Float>, SolverError> {
        if let Some(reference) = self.reference.get() {
            return Ok(reference.as_ref());
        }
        let exact = ColeHopf::new(self.problem.nu)?;
        debug!(nu = self.problem.nu, "computing analytical reference");
        let field = exact.field(&self.mesh);
        Ok(self.reference.get_or_init(|| field).as_ref())
    }

    pub fn mean_absolute_error(
        &self,
        reference: Option<MatRef<'_, Float>>,
    ) -> Result<Float, SolverError> {
        match reference {
            Some(reference) => metrics::mean_absolute_error(self.field.as_ref(), reference),
            None => metrics::mean_absolute_error(self.field.as_ref(), self.analytical()?),
        }
    }

    pub fn l2_error_in(
        &self,
        reference: Option<MatRef<'_, Float>>,
        region: Region,
    ) -> Result<Float, SolverError> {
        match reference {
            Some(reference) => metrics::l2_error_in(self.field.as_ref(), reference, region),
            None => metrics::l2_error_in(self.field.as_ref(), self.analytical()?, region),
        }
    }
}

impl<M: Method> Solver for Simulation<M> {
    fn time_integrate(&mut self) -> Result<(), SolverError> {
        Driver::new(self).run()
    }

    fn solution(&self) -> MatRef<'_, Float> {
        self.field.as_ref()
    }

    fn l2_error(&self, reference: Option<MatRef<'_, Float>>) -> Result<Float, SolverError> {
        match reference {
            Some(reference) => metrics::l2_error(self.field.as_ref(), reference),
            None => metrics::l2_error(self.field.as_ref(), self.analytical()?),
        }
    }

    fn mean_squared_error(
        &self,
        reference: Option<MatRef<'_, Float>>,
    ) -> Result<Float, SolverError> {
        match reference {
            Some(reference) => metrics::mean_squared_error(self.field.as_ref(), reference),
            None => metrics::mean_squared_error(self.field.as_ref(), self.analytical()?),
        }
    }
}

impl<M: Method> fmt::Debug for Simulation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("problem", &self.problem)
            .field("mesh", &self.mesh)
            .field("method", &self.method.name())
            .field("levels", &self.levels)
            .finish()
    }
}

impl<M: Method> fmt::Display for Simulation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "simulation of `{}` problem:\n\t- `{}` method\n\t- nu = {:e}\n\t- Δx = {:e} ({} points)\n\t- Δt = {:e} ({} levels)",
            self.problem.name,
            self.method.name(),
            self.problem.nu,
            self.mesh.h(),
            self.mesh.n_spatial(),
            self.mesh.k(),
            self.mesh.n_temporal()
        )
    }
}
