use core::fmt::Write;

use alloc::string::String;

use crate::matrix::{AlignmentMatrix, Point, NULL_INDEX};

/// Aligned pairs of real words as `(f, e)`, ordered by `f` then `e`.
pub fn pairs(alignment: &AlignmentMatrix) -> impl Iterator<Item = (usize, usize)> + '_ {
    (NULL_INDEX + 1..alignment.cols()).flat_map(move |f| {
        (NULL_INDEX + 1..alignment.rows())
            .filter(move |&e| alignment.contains(Point::new(e, f)))
            .map(move |e| (f, e))
    })
}

/// Writes the alignment as space-separated `f-e` pairs into `buf`, replacing its contents.
pub fn write_pairs(alignment: &AlignmentMatrix, buf: &mut String) {
    buf.clear();
    for (f, e) in pairs(alignment) {
        if !buf.is_empty() {
            buf.push(' ');
        }
        // fmt::Write for String is infallible.
        let _ = write!(buf, "{f}-{e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use alloc::{vec, vec::Vec};

    #[test]
    fn test_pairs_order() {
        let mut m = AlignmentMatrix::new(4, 3);
        for (e, f) in [(3, 1), (1, 2), (2, 1), (0, 1), (2, 0)] {
            m.insert(Point::new(e, f));
        }
        assert_eq!(pairs(&m).collect::<Vec<_>>(), vec![(1, 2), (1, 3), (2, 1)]);
    }

    #[test]
    fn test_write_pairs() {
        let mut m = AlignmentMatrix::new(3, 3);
        m.insert(Point::new(1, 1));
        m.insert(Point::new(2, 2));
        let mut buf = String::from("stale");
        write_pairs(&m, &mut buf);
        assert_eq!(buf, "1-1 2-2");
    }

    #[test]
    fn test_write_pairs_empty() {
        let mut m = AlignmentMatrix::new(3, 3);
        m.insert(Point::new(0, 2));
        let mut buf = String::from("stale");
        write_pairs(&m, &mut buf);
        assert_eq!(buf, "");
    }
}
