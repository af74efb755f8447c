use crate::Float;
use faer::Mat;
use faer_core::MatMut;

// generic interior operator builder where each diagonal is a pair (m, q_m) in
// W^n_i = \sum_m q_m U^n_{i+m}
// with i ranging over the interior rows 0..size-2 and U the full-width state, so that
// row i of the operator is aligned with grid node i + 1 (the FTCS centered stencil
// therefore sits on the offsets {0, 1, 2}).
pub fn band(size: usize, diagonals: &[(isize, Float)]) -> Mat<Float> {
    assert!(size >= 3);

    Mat::from_fn(size - 2, size, |i, j| {
        let m = j as isize - i as isize;
        diagonals
            .iter()
            .filter(|(offset, _)| *offset == m)
            .map(|(_, q)| *q)
            .sum::<Float>()
    })
}

/// Replace the diagonals of row `row` of a banded operator.
pub fn set_row(mut op: MatMut<'_, Float>, row: usize, diagonals: &[(isize, Float)]) {
    for j in 0..op.ncols() {
        op[(row, j)] = 0.0;
    }
    for &(offset, q) in diagonals {
        let j = row as isize + offset;
        assert!(0 <= j && (j as usize) < op.ncols());
        op[(row, j as usize)] += q;
    }
}

/// Centered second difference scaled by `c = k·nu / h²`.
pub fn diffusion(size: usize, c: Float) -> Mat<Float> {
    band(size, &[(0, c), (1, -2.0 * c), (2, c)])
}

/// Centered first difference scaled by `d` (`k / 2h` for the non-conservative form).
pub fn centered_advection(size: usize, d: Float) -> Mat<Float> {
    band(size, &[(0, -d), (1, 0.0), (2, d)])
}

/// One-sided difference looking upstream when the local velocity is positive,
/// scaled by `r = k / h`.
pub fn backward_advection(size: usize, r: Float, order: usize) -> Mat<Float> {
    let first = [(0, -r), (1, r)];
    match order {
        1 => band(size, &first),
        _ => {
            let mut op = band(size, &[(-1, 0.5 * r), (0, -2.0 * r), (1, 1.5 * r)]);
            // node 1 has a single upstream neighbour
            set_row(op.as_mut(), 0, &first);
            op
        }
    }
}

/// One-sided difference looking upstream when the local velocity is negative,
/// scaled by `r = k / h`.
pub fn forward_advection(size: usize, r: Float, order: usize) -> Mat<Float> {
    let first = [(1, -r), (2, r)];
    match order {
        1 => band(size, &first),
        _ => {
            let mut op = band(size, &[(1, -1.5 * r), (2, 2.0 * r), (3, -0.5 * r)]);
            // node n-2 has a single upstream neighbour
            set_row(op.as_mut(), size - 3, &first);
            op
        }
    }
}
