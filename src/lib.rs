//! Explicit finite-difference solvers for the viscous Burgers equation
//!
//! ```text
//! u_t + u u_x = nu u_xx,    x ∈ [-1, 1],  t ∈ [0, 1]
//! ```
//!
//! with the boundary values of the initial profile held fixed. A [`Simulation`] owns the
//! whole `(n_spatial, n_temporal)` solution field and advances it one level at a time with
//! a [`Method`] ([`Ftcs`] or [`Upwind`]); the [`metrics`] compare a finished field with a
//! reference, by default the exact solution of [`analytical::ColeHopf`].

pub mod analytical;
pub mod bc;
pub mod driver;
pub mod error;
pub mod faer_add;
pub mod mesh;
pub mod method;
pub mod methods;
pub mod metrics;
pub mod problem;
pub mod sim;
pub mod stencil;

pub use driver::{Csff1Writer, Driver, InstabilityGuard, Logger, ObsCtx, Observer};
pub use error::{ConfigurationError, SolverError};
pub use mesh::{Grid, Mesh};
pub use method::Method;
pub use methods::{Form, Ftcs, Upwind};
pub use problem::{InitialCondition, Problem, DEFAULT_VISCOSITY};
pub use sim::{Simulation, Solver};

pub type Float = f64;

/// What a [`Method`] sees of the simulation at a given time level.
#[derive(Debug, Clone, Copy)]
pub struct Ctx<'a> {
    pub(crate) mesh: &'a Mesh,
    pub(crate) nu: Float,
    pub(crate) level: usize,
}

impl<'a> Ctx<'a> {
    pub fn new(mesh: &'a Mesh, nu: Float, level: usize) -> Self {
        Self { mesh, nu, level }
    }

    pub fn mesh(&self) -> &'a Mesh {
        self.mesh
    }

    pub fn nu(&self) -> Float {
        self.nu
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn time(&self) -> Float {
        self.mesh.time().at(self.level)
    }
}
