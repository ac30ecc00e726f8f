//! Intersection and union of the two directions.
//!
//! `e2f` has rows indexed by E and columns by F, `f2e` the other way around, so every cell of
//! `f2e` is read transposed.

use crate::matrix::{AlignmentMatrix, Point};

fn combine<F>(
    e2f: &AlignmentMatrix,
    f2e: &AlignmentMatrix,
    e_len: usize,
    f_len: usize,
    op: F,
) -> AlignmentMatrix
where
    F: Fn(bool, bool) -> bool,
{
    let mut result = AlignmentMatrix::new(e_len, f_len);
    for e in 0..e_len {
        for f in 0..f_len {
            let point = Point::new(e, f);
            if op(e2f.contains(point), f2e.contains(point.transpose())) {
                result.insert(point);
            }
        }
    }
    result
}

/// Cells aligned in both directions, as an `e_len` x `f_len` grid.
pub fn intersection(
    e2f: &AlignmentMatrix,
    f2e: &AlignmentMatrix,
    e_len: usize,
    f_len: usize,
) -> AlignmentMatrix {
    combine(e2f, f2e, e_len, f_len, |a, b| a && b)
}

/// Cells aligned in at least one direction, as an `e_len` x `f_len` grid.
pub fn union(
    e2f: &AlignmentMatrix,
    f2e: &AlignmentMatrix,
    e_len: usize,
    f_len: usize,
) -> AlignmentMatrix {
    combine(e2f, f2e, e_len, f_len, |a, b| a || b)
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::{vec, vec::Vec};

    fn matrix(rows: usize, cols: usize, points: &[(usize, usize)]) -> AlignmentMatrix {
        let mut m = AlignmentMatrix::new(rows, cols);
        for &(r, c) in points {
            m.insert(Point::new(r, c));
        }
        m
    }

    #[test]
    fn test_transposed_access() {
        // E has 3 positions, F has 4.
        let e2f = matrix(3, 4, &[(1, 2), (2, 3)]);
        let f2e = matrix(4, 3, &[(2, 1), (1, 2)]);
        let inter = intersection(&e2f, &f2e, 3, 4);
        assert_eq!(inter.points().collect::<Vec<_>>(), vec![Point::new(1, 2)]);
        let uni = union(&e2f, &f2e, 3, 4);
        assert_eq!(
            uni.points().collect::<Vec<_>>(),
            vec![Point::new(1, 2), Point::new(2, 1), Point::new(2, 3)]
        );
    }

    #[test]
    fn test_short_matrices_read_as_unaligned() {
        let e2f = matrix(2, 3, &[(1, 1)]);
        let f2e = AlignmentMatrix::new(0, 3);
        let inter = intersection(&e2f, &f2e, 3, 3);
        assert_eq!((inter.rows(), inter.cols()), (3, 3));
        assert_eq!(inter.count(), 0);
        assert_eq!(union(&e2f, &f2e, 3, 3).count(), 1);
    }
}
