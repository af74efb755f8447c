//! Distances between a solution field and a reference field of the same shape.
//!
//! Shapes are never broadcast: any mismatch is a [`SolverError::Shape`].

use std::ops::Range;

use faer_core::MatRef;

use crate::{error::SolverError, Float};

/// Rectangular block of a field, rows being spatial nodes and columns time levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Region {
    pub fn new(rows: Range<usize>, cols: Range<usize>) -> Self {
        Self { rows, cols }
    }

    /// Interior nodes of every time level of an `(n_spatial, n_temporal)` field.
    pub fn interior(n_spatial: usize, n_temporal: usize) -> Self {
        Self::new(1..n_spatial.saturating_sub(1), 0..n_temporal)
    }

    /// Every node of the time level `n`.
    pub fn level(n_spatial: usize, n: usize) -> Self {
        Self::new(0..n_spatial, n..n + 1)
    }
}

fn check_shapes(u: MatRef<'_, Float>, reference: MatRef<'_, Float>) -> Result<(), SolverError> {
    if (u.nrows(), u.ncols()) != (reference.nrows(), reference.ncols()) {
        return Err(SolverError::shape(
            "reference field",
            (u.nrows(), u.ncols()),
            (reference.nrows(), reference.ncols()),
        ));
    }
    Ok(())
}

fn fold(u: MatRef<'_, Float>, reference: MatRef<'_, Float>, f: impl Fn(Float) -> Float) -> Float {
    let mut acc = 0.0;
    for j in 0..u.ncols() {
        for i in 0..u.nrows() {
            acc += f(u[(i, j)] - reference[(i, j)]);
        }
    }
    acc
}

fn mean(
    u: MatRef<'_, Float>,
    reference: MatRef<'_, Float>,
    f: impl Fn(Float) -> Float,
) -> Result<Float, SolverError> {
    check_shapes(u, reference)?;
    let count = u.nrows() * u.ncols();
    if count == 0 {
        return Ok(0.0);
    }
    Ok(fold(u, reference, f) / count as Float)
}

/// `sqrt(Σ (u - reference)²)` over the whole field, not normalized.
pub fn l2_error(u: MatRef<'_, Float>, reference: MatRef<'_, Float>) -> Result<Float, SolverError> {
    check_shapes(u, reference)?;
    Ok(fold(u, reference, |e| e * e).sqrt())
}

/// [`l2_error`] restricted to `region`.
pub fn l2_error_in(
    u: MatRef<'_, Float>,
    reference: MatRef<'_, Float>,
    region: Region,
) -> Result<Float, SolverError> {
    check_shapes(u, reference)?;
    let Region { rows, cols } = region;
    if rows.start > rows.end
        || cols.start > cols.end
        || rows.end > u.nrows()
        || cols.end > u.ncols()
    {
        return Err(SolverError::shape(
            "region",
            (u.nrows(), u.ncols()),
            (rows.end, cols.end),
        ));
    }

    let (nrows, ncols) = (rows.end - rows.start, cols.end - cols.start);
    Ok(fold(
        u.submatrix(rows.start, cols.start, nrows, ncols),
        reference.submatrix(rows.start, cols.start, nrows, ncols),
        |e| e * e,
    )
    .sqrt())
}

/// Average of `(u - reference)²`, i.e. `l2_error² / (n_spatial · n_temporal)`.
pub fn mean_squared_error(
    u: MatRef<'_, Float>,
    reference: MatRef<'_, Float>,
) -> Result<Float, SolverError> {
    mean(u, reference, |e| e * e)
}

/// Average of `|u - reference|`.
pub fn mean_absolute_error(
    u: MatRef<'_, Float>,
    reference: MatRef<'_, Float>,
) -> Result<Float, SolverError> {
    mean(u, reference, Float::abs)
}
