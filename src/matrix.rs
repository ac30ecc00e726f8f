use alloc::{vec, vec::Vec};

/// Position of the NULL sentinel on both axes.
pub const NULL_INDEX: usize = 0;

/// A cell of an alignment grid: `e` is the row, `f` the column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub e: usize,
    pub f: usize,
}

impl Point {
    pub const fn new(e: usize, f: usize) -> Self {
        Self { e, f }
    }

    /// The same cell seen from the opposite direction.
    pub const fn transpose(self) -> Self {
        Self {
            e: self.f,
            f: self.e,
        }
    }

    pub const fn is_null(self) -> bool {
        self.e == NULL_INDEX || self.f == NULL_INDEX
    }
}

/// Row-major boolean grid including the NULL row and column.
///
/// Reads outside the grid yield `None` (or `false` through [`contains`](Self::contains)),
/// writes outside the grid are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlignmentMatrix {
    rows: usize,
    cols: usize,
    data: Vec<bool>,
}

impl AlignmentMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            self.data.get(col + self.cols * row).copied()
        } else {
            None
        }
    }

    fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut bool> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(col + self.cols * row)
        } else {
            None
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        self.get(point.e, point.f).unwrap_or(false)
    }

    /// Sets the cell and returns `true` if it was previously unset.
    pub fn insert(&mut self, point: Point) -> bool {
        match self.get_mut(point.e, point.f) {
            Some(cell) if !*cell => {
                *cell = true;
                true
            }
            _ => false,
        }
    }

    /// Appends an all-false row and returns its index.
    pub fn push_row(&mut self) -> usize {
        self.data.resize(self.data.len() + self.cols, false);
        self.rows += 1;
        self.rows - 1
    }

    /// Whether `row` has any set cell in columns `from..`.
    pub fn row_aligned(&self, row: usize, from: usize) -> bool {
        (from..self.cols).any(|col| self.get(row, col).unwrap_or(false))
    }

    /// Whether `col` has any set cell in rows `from..`.
    pub fn col_aligned(&self, col: usize, from: usize) -> bool {
        (from..self.rows).any(|row| self.get(row, col).unwrap_or(false))
    }

    /// Set cells in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &set)| set)
            .map(move |(i, _)| Point::new(i / self.cols, i % self.cols))
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&set| set).count()
    }
}
