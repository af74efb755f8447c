use crate::{error::ConfigurationError, Float};

// grid[0] <-> lower
// grid[i] <-> lower + i * delta forall i
// grid[steps] <-> upper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub(crate) lower: Float,
    pub(crate) upper: Float,
    pub(crate) delta: Float,
    pub(crate) steps: usize,
}

impl Grid {
    pub fn from_steps(lower: Float, upper: Float, steps: usize) -> Self {
        let delta = (upper - lower) / steps as Float;
        Self {
            lower,
            upper,
            delta,
            steps,
        }
    }

    pub fn lower(&self) -> Float {
        self.lower
    }

    pub fn upper(&self) -> Float {
        self.upper
    }

    pub fn delta(&self) -> Float {
        self.delta
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn points(&self) -> usize {
        self.steps + 1
    }

    pub fn at(&self, i: usize) -> Float {
        self.lower + self.delta * i as Float
    }

    pub fn iter(self) -> impl Iterator<Item = Float> {
        (0..(self.steps + 1)).map(move |i| self.at(i))
    }
}

/// Space-time grid of the Burgers problem: `x ∈ [-1, 1]`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) time: Grid,
    pub(crate) space: Grid,
}

impl Mesh {
    pub const SPACE: (Float, Float) = (-1.0, 1.0);
    pub const TIME: (Float, Float) = (0.0, 1.0);

    pub fn new(n_spatial: usize, n_temporal: usize) -> Result<Self, ConfigurationError> {
        if n_spatial < 3 {
            return Err(ConfigurationError::SpatialPoints(n_spatial));
        }
        if n_temporal < 2 {
            return Err(ConfigurationError::TemporalPoints(n_temporal));
        }

        Ok(Self {
            time: Grid::from_steps(Self::TIME.0, Self::TIME.1, n_temporal - 1),
            space: Grid::from_steps(Self::SPACE.0, Self::SPACE.1, n_spatial - 1),
        })
    }

    pub fn time(&self) -> Grid {
        self.time
    }

    pub fn space(&self) -> Grid {
        self.space
    }

    pub fn n_spatial(&self) -> usize {
        self.space.points()
    }

    pub fn n_temporal(&self) -> usize {
        self.time.points()
    }

    pub fn h(&self) -> Float {
        self.space.delta
    }

    pub fn k(&self) -> Float {
        self.time.delta
    }

    /// Diffusion number `c = k·nu / h²`.
    pub fn diffusion_number(&self, nu: Float) -> Float {
        self.k() * nu / (self.h() * self.h())
    }

    pub fn courant_number(&self, speed: Float) -> Float {
        speed * self.k() / self.h()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_follow_point_counts() {
        let mesh = Mesh::new(101, 2001).unwrap();
        assert!((mesh.h() - 0.02).abs() < 1e-15);
        assert!((mesh.k() - 5e-4).abs() < 1e-15);
        assert_eq!(mesh.n_spatial(), 101);
        assert_eq!(mesh.n_temporal(), 2001);

        let xs: Vec<_> = mesh.space().iter().collect();
        assert_eq!(xs.len(), 101);
        assert_eq!(xs[0], -1.0);
        assert!((xs[100] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn too_small_grids_are_rejected() {
        assert_eq!(Mesh::new(2, 10), Err(ConfigurationError::SpatialPoints(2)));
        assert_eq!(Mesh::new(3, 1), Err(ConfigurationError::TemporalPoints(1)));
        assert!(Mesh::new(3, 2).is_ok());
    }
}
