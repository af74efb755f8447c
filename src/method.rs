use faer::Mat;
use faer_core::{MatMut, MatRef};

use crate::{Ctx, Float};

/// An explicit two-level scheme: one call to `apply` advances the solution by one time level.
pub trait Method {
    /// Builds the operators of the scheme for `ctx.mesh()`. Called exactly once, before the
    /// first step.
    fn init(&mut self, ctx: Ctx);

    /// Writes into `v` (the `n_spatial - 2` interior nodes of level `ctx.level() + 1`) the
    /// update computed from `u`, the full column of level `ctx.level()`.
    fn apply(&mut self, ctx: Ctx, u: MatRef<'_, Float>, v: MatMut<'_, Float>);

    fn name(&self) -> &'static str;
}

/// `N` scratch columns of equal length.
#[derive(Debug, Clone)]
pub struct Buffers<const N: usize> {
    inner: Mat<Float>,
}

impl<const N: usize> Default for Buffers<N> {
    fn default() -> Self {
        Self {
            inner: Mat::zeros(0, N),
        }
    }
}

impl<const N: usize> Buffers<N> {
    pub fn resize(&mut self, size: usize) {
        self.inner = Mat::zeros(size, N);
    }

    pub fn get(&self, n: usize) -> MatRef<'_, Float> {
        self.inner.as_ref().col(n)
    }

    pub fn get_mut(&mut self, n: usize) -> MatMut<'_, Float> {
        self.inner.as_mut().col(n)
    }
}
