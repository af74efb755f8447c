//! Exact solution of the viscous Burgers equation for `u(x, 0) = -sin(πx)` with
//! homogeneous boundaries, obtained through the Cole-Hopf transform:
//!
//! ```text
//! u(x, t) = - ∫ sin(π(x - η)) f(x - η) exp(-η² / 4νt) dη / ∫ f(x - η) exp(-η² / 4νt) dη
//! f(y)    = exp(-cos(πy) / 2πν)
//! ```
//!
//! Both integrals are evaluated after the substitution `η = √(4νt) z` with a
//! trapezoid rule on `z ∈ [-L, L]`. The exponents are shifted by their maximum
//! before exponentiation, `f` alone reaches `e^{50}` for the default viscosity.

use std::f64::consts::PI;

use faer::Mat;

use crate::{error::ConfigurationError, mesh::Mesh, problem::InitialCondition, Float};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColeHopf {
    nu: Float,
    half_width: Float,
    nodes: usize,
}

impl ColeHopf {
    pub const HALF_WIDTH: Float = 12.0;
    pub const NODES: usize = 1201;

    pub fn new(nu: Float) -> Result<Self, ConfigurationError> {
        if !nu.is_finite() || nu <= 0.0 {
            return Err(ConfigurationError::ReferenceViscosity(nu));
        }
        Ok(Self {
            nu,
            half_width: Self::HALF_WIDTH,
            nodes: Self::NODES,
        })
    }

    /// Overrides the quadrature rule, `nodes` is clamped to at least 3.
    pub fn with_quadrature(mut self, half_width: Float, nodes: usize) -> Self {
        self.half_width = half_width;
        self.nodes = nodes.max(3);
        self
    }

    pub fn evaluate(&self, x: Float, t: Float) -> Float {
        if t <= 0.0 {
            return InitialCondition::sine(x);
        }

        let spread = (4.0 * self.nu * t).sqrt();
        let inv = 1.0 / (2.0 * PI * self.nu);
        let dz = 2.0 * self.half_width / (self.nodes - 1) as Float;

        let exponent = |z: Float| -z * z - (PI * (x - spread * z)).cos() * inv;
        let shift = (0..self.nodes)
            .map(|i| exponent(-self.half_width + dz * i as Float))
            .fold(Float::NEG_INFINITY, Float::max);

        let (mut num, mut den) = (0.0, 0.0);
        for i in 0..self.nodes {
            let z = -self.half_width + dz * i as Float;
            let w = if i == 0 || i == self.nodes - 1 {
                0.5
            } else {
                1.0
            };
            let g = w * (exponent(z) - shift).exp();
            num -= g * (PI * (x - spread * z)).sin();
            den += g;
        }

        num / den
    }

    pub fn field(&self, mesh: &Mesh) -> Mat<Float> {
        let (space, time) = (mesh.space(), mesh.time());
        Mat::from_fn(mesh.n_spatial(), mesh.n_temporal(), |i, n| {
            self.evaluate(space.at(i), time.at(n))
        })
    }
}
