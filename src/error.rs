use thiserror::Error;

use crate::Float;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("at least 3 spatial points are required (got {0})")]
    SpatialPoints(usize),
    #[error("at least 2 time levels are required (got {0})")]
    TemporalPoints(usize),
    #[error("viscosity must be finite and non-negative (got {0})")]
    Viscosity(Float),
    #[error("the analytical reference needs a positive viscosity (got {0})")]
    ReferenceViscosity(Float),
    #[error("unsupported upwind order {0} (expected 1 or 2)")]
    Order(usize),
}

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("shape mismatch for {what}: expected {expected:?}, found {found:?}")]
    Shape {
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("non-finite value at time level {level} (t={time})")]
    NumericalInstability { level: usize, time: Float },
    #[error("output error")]
    Io(#[from] std::io::Error),
}

impl SolverError {
    pub(crate) fn shape(
        what: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Self {
        SolverError::Shape {
            what,
            expected,
            found,
        }
    }
}
