use faer_core::{MatMut, MatRef};

use crate::Float;

/// Fixed boundary values, taken from the first and last node of the initial column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dirichlet {
    pub(crate) left: Float,
    pub(crate) right: Float,
}

impl Dirichlet {
    pub fn new(left: Float, right: Float) -> Self {
        Self { left, right }
    }

    pub fn hold(u0: MatRef<'_, Float>) -> Self {
        Self::new(u0[(0, 0)], u0[(u0.nrows() - 1, 0)])
    }

    pub fn left(&self) -> Float {
        self.left
    }

    pub fn right(&self) -> Float {
        self.right
    }

    /// Stamps the boundary rows of every time level of `field`.
    pub fn apply(&self, mut field: MatMut<'_, Float>) {
        let last = field.nrows() - 1;
        for n in 0..field.ncols() {
            field[(0, n)] = self.left;
            field[(last, n)] = self.right;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::Mat;

    #[test]
    fn every_level_receives_the_initial_boundary() {
        let u0 = crate::faer_add::column(&[0.25, 1.0, -0.5]);
        let bc = Dirichlet::hold(u0.as_ref());
        let mut field = Mat::<Float>::zeros(3, 4);
        bc.apply(field.as_mut());
        for n in 0..4 {
            assert_eq!(field[(0, n)], 0.25);
            assert_eq!(field[(1, n)], 0.0);
            assert_eq!(field[(2, n)], -0.5);
        }
    }
}
