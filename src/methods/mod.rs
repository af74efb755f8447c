use faer::Mat;
use faer_core::{mul::matmul, zipped, MatMut, MatRef, Parallelism};

use crate::{
    error::ConfigurationError,
    method::{Buffers, Method},
    stencil, Ctx, Float,
};

/// Discretization of the advection term of the FTCS scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Form {
    /// `u ∂u/∂x` with centered differences.
    #[default]
    Advective,
    /// `∂(u²/2)/∂x` with centered differences.
    Conservative,
}

/// Forward-time centered-space scheme:
///
/// ```text
/// U^{n+1}_i = U^n_i + (A U^n)_i - U^n_i (B U^n)_i              (advective form)
/// U^{n+1}_i = U^n_i + (A U^n)_i - (B (U^n)²)_i                  (conservative form)
/// ```
///
/// where `A` carries `{c, -2c, c}` with `c = k·nu/h²` and `B` carries `{-d, 0, d}` with
/// `d = k/2h` (advective) or `d = k/4h` (conservative), both on the interior offsets `{0, 1, 2}`.
#[derive(Debug, Clone)]
pub struct Ftcs {
    form: Form,
    diffusion: Mat<Float>,
    advection: Mat<Float>,
    squares: Mat<Float>,
    buf: Buffers<2>,
}

impl Default for Ftcs {
    fn default() -> Self {
        Self::new()
    }
}

impl Ftcs {
    pub fn new() -> Self {
        Self::with_form(Form::Advective)
    }

    pub fn conservative() -> Self {
        Self::with_form(Form::Conservative)
    }

    pub fn with_form(form: Form) -> Self {
        Self {
            form,
            diffusion: Mat::zeros(0, 0),
            advection: Mat::zeros(0, 0),
            squares: Mat::zeros(0, 1),
            buf: Buffers::default(),
        }
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn diffusion(&self) -> MatRef<'_, Float> {
        self.diffusion.as_ref()
    }

    pub fn advection(&self) -> MatRef<'_, Float> {
        self.advection.as_ref()
    }
}

impl Method for Ftcs {
    fn init(&mut self, ctx: Ctx) {
        let mesh = ctx.mesh();
        let size = mesh.n_spatial();
        let c = mesh.diffusion_number(ctx.nu());
        let d = match self.form {
            Form::Advective => mesh.k() / (2.0 * mesh.h()),
            Form::Conservative => mesh.k() / (4.0 * mesh.h()),
        };

        self.diffusion = stencil::diffusion(size, c);
        self.advection = stencil::centered_advection(size, d);
        self.squares = Mat::zeros(size, 1);
        self.buf.resize(size - 2);
    }

    fn apply(&mut self, _ctx: Ctx, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        let inner = u.subrows(1, u.nrows() - 2);

        matmul(
            self.buf.get_mut(0),
            self.diffusion.as_ref(),
            u,
            None,
            1.0,
            Parallelism::None,
        );

        match self.form {
            Form::Advective => {
                matmul(
                    self.buf.get_mut(1),
                    self.advection.as_ref(),
                    u,
                    None,
                    1.0,
                    Parallelism::None,
                );

                let schema = |u: Float, au: Float, bu: Float| u + au - u * bu;
                zipped!(v, inner, self.buf.get(0), self.buf.get(1))
                    .for_each(|mut v, u, au, bu| v.write(schema(u.read(), au.read(), bu.read())));
            }
            Form::Conservative => {
                zipped!(self.squares.as_mut(), u)
                    .for_each(|mut s, u| s.write(u.read() * u.read()));
                matmul(
                    self.buf.get_mut(1),
                    self.advection.as_ref(),
                    self.squares.as_ref(),
                    None,
                    1.0,
                    Parallelism::None,
                );

                zipped!(v, inner, self.buf.get(0), self.buf.get(1))
                    .for_each(|mut v, u, au, bf| v.write(u.read() + au.read() - bf.read()));
            }
        }
    }

    fn name(&self) -> &'static str {
        match self.form {
            Form::Advective => "FTCS",
            Form::Conservative => "FTCS (conservation form)",
        }
    }
}

/// Forward Euler in time with one-sided differences for the advection term, taken
/// on the upstream side of the local velocity `U^n_i`. Order 1 uses two-point
/// differences, order 2 the three-point ones (with a two-point fallback next to
/// the boundaries). Diffusion stays centered as in [`Ftcs`].
#[derive(Debug, Clone)]
pub struct Upwind {
    order: usize,
    diffusion: Mat<Float>,
    backward: Mat<Float>,
    forward: Mat<Float>,
    buf: Buffers<3>,
}

impl Default for Upwind {
    fn default() -> Self {
        Self::empty(1)
    }
}

impl Upwind {
    pub const MAX_ORDER: usize = 2;

    pub fn with_order(order: usize) -> Result<Self, ConfigurationError> {
        if order == 0 || order > Self::MAX_ORDER {
            return Err(ConfigurationError::Order(order));
        }
        Ok(Self::empty(order))
    }

    pub fn first_order() -> Self {
        Self::empty(1)
    }

    pub fn second_order() -> Self {
        Self::empty(2)
    }

    fn empty(order: usize) -> Self {
        Self {
            order,
            diffusion: Mat::zeros(0, 0),
            backward: Mat::zeros(0, 0),
            forward: Mat::zeros(0, 0),
            buf: Buffers::default(),
        }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn diffusion(&self) -> MatRef<'_, Float> {
        self.diffusion.as_ref()
    }

    pub fn backward(&self) -> MatRef<'_, Float> {
        self.backward.as_ref()
    }

    pub fn forward(&self) -> MatRef<'_, Float> {
        self.forward.as_ref()
    }
}

impl Method for Upwind {
    fn init(&mut self, ctx: Ctx) {
        let mesh = ctx.mesh();
        let size = mesh.n_spatial();
        let r = mesh.k() / mesh.h();

        self.diffusion = stencil::diffusion(size, mesh.diffusion_number(ctx.nu()));
        self.backward = stencil::backward_advection(size, r, self.order);
        self.forward = stencil::forward_advection(size, r, self.order);
        self.buf.resize(size - 2);
    }

    fn apply(&mut self, _ctx: Ctx, u: MatRef<'_, Float>, v: MatMut<'_, Float>) {
        let inner = u.subrows(1, u.nrows() - 2);

        for (n, op) in [&self.diffusion, &self.backward, &self.forward]
            .into_iter()
            .enumerate()
        {
            matmul(
                self.buf.get_mut(n),
                op.as_ref(),
                u,
                None,
                1.0,
                Parallelism::None,
            );
        }

        // component-wise schema
        let schema = |u: Float, au: Float, bw: Float, fw: Float| {
            let slope = if u > 0.0 { bw } else { fw };
            u + au - u * slope
        };

        zipped!(v, inner, self.buf.get(0), self.buf.get(1), self.buf.get(2)).for_each(
            |mut v, u, au, bw, fw| v.write(schema(u.read(), au.read(), bw.read(), fw.read())),
        );
    }

    fn name(&self) -> &'static str {
        match self.order {
            1 => "First-order upwind",
            _ => "Second-order upwind",
        }
    }
}
