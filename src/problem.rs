use core::fmt;
use std::f64::consts::PI;

use faer::Mat;

use crate::{
    error::{ConfigurationError, SolverError},
    faer_add::column,
    mesh::Mesh,
    Float,
};

/// Viscosity of the classical Burgers benchmark, `1 / (100π)`.
pub const DEFAULT_VISCOSITY: Float = 1.0 / (100.0 * PI);

/// Profile `u(x, 0)` of the solution field.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    /// `u(x, 0) = -sin(πx)`
    Sine,
    /// Values at the `n_spatial` grid nodes, e.g. the output of a trained network.
    Values(Vec<Float>),
}

impl InitialCondition {
    pub fn sine(x: Float) -> Float {
        -(PI * x).sin()
    }
}

/// The viscous Burgers equation `u_t + u u_x = nu u_xx` on `[-1, 1] × [0, 1]`.
#[derive(Clone, PartialEq)]
pub struct Problem {
    pub(crate) name: String,
    pub(crate) nu: Float,
    pub(crate) u0: InitialCondition,
}

impl Problem {
    pub fn burgers() -> Self {
        Self {
            name: "burgers".to_string(),
            nu: DEFAULT_VISCOSITY,
            u0: InitialCondition::Sine,
        }
    }

    pub fn with_name(mut self, name: impl AsRef<str>) -> Self {
        self.name = name.as_ref().to_string();
        self
    }

    pub fn with_viscosity(mut self, nu: Float) -> Self {
        self.nu = nu;
        self
    }

    pub fn with_initial_condition(mut self, values: impl Into<Vec<Float>>) -> Self {
        self.u0 = InitialCondition::Values(values.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nu(&self) -> Float {
        self.nu
    }

    pub fn initial_condition(&self) -> &InitialCondition {
        &self.u0
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.nu.is_finite() || self.nu < 0.0 {
            return Err(ConfigurationError::Viscosity(self.nu));
        }
        Ok(())
    }

    pub fn sample_initial(&self, mesh: &Mesh) -> Result<Mat<Float>, SolverError> {
        match &self.u0 {
            InitialCondition::Sine => Ok(Mat::from_fn(mesh.n_spatial(), 1, |i, _| {
                InitialCondition::sine(mesh.space().at(i))
            })),
            InitialCondition::Values(values) => {
                if values.len() != mesh.n_spatial() {
                    return Err(SolverError::shape(
                        "initial condition",
                        (mesh.n_spatial(), 1),
                        (values.len(), 1),
                    ));
                }
                Ok(column(values))
            }
        }
    }
}

impl Default for Problem {
    fn default() -> Self {
        Self::burgers()
    }
}

impl fmt::Debug for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name)
            .field("nu", &self.nu)
            .field(
                "u0",
                match &self.u0 {
                    InitialCondition::Sine => &"-sin(πx)",
                    InitialCondition::Values(_) => &"<supplied values>",
                },
            )
            .finish()
    }
}
