use crate::Float;
use faer::Mat;
use faer_core::MatRef;

pub fn linspace(a: Float, size: usize, h: Float) -> Mat<Float> {
    Mat::<Float>::from_fn(size, 1, |i, _| a + h * i as Float)
}

pub fn column(values: &[Float]) -> Mat<Float> {
    Mat::<Float>::from_fn(values.len(), 1, |i, _| values[i])
}

pub fn max_abs(m: MatRef<'_, Float>) -> Float {
    let mut max = 0.0 as Float;
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            max = max.max(m[(i, j)].abs());
        }
    }
    max
}

/// Position `(row, col)` of the first NaN or infinite entry, if any.
pub fn first_non_finite(m: MatRef<'_, Float>) -> Option<(usize, usize)> {
    for j in 0..m.ncols() {
        for i in 0..m.nrows() {
            if !m[(i, j)].is_finite() {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_abs_and_finiteness() {
        let m = column(&[0.5, -2.0, 1.0]);
        assert_eq!(max_abs(m.as_ref()), 2.0);
        assert_eq!(first_non_finite(m.as_ref()), None);

        let n = column(&[0.0, Float::NAN, Float::INFINITY]);
        assert_eq!(first_non_finite(n.as_ref()), Some((1, 0)));
    }

    #[test]
    fn linspace_matches_step() {
        let x = linspace(-1.0, 5, 0.5);
        assert_eq!(x.nrows(), 5);
        assert_eq!(x[(0, 0)], -1.0);
        assert_eq!(x[(4, 0)], 1.0);
    }
}
