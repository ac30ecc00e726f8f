use crate::combine::{intersection, union};
use crate::config::{FinalMode, SymmetrizeConfig};
use crate::matrix::{AlignmentMatrix, Point};

/// Offsets of the eight neighbours, in the order they are tried.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

fn neighbors(
    point: Point,
    start: usize,
    e_len: usize,
    f_len: usize,
) -> impl Iterator<Item = Point> {
    NEIGHBORS.iter().filter_map(move |&(de, df)| {
        let e = point.e.checked_add_signed(de)?;
        let f = point.f.checked_add_signed(df)?;
        ((start..e_len).contains(&e) && (start..f_len).contains(&f)).then_some(Point::new(e, f))
    })
}

/// GROW-DIAG-FINAL symmetrization of two directional alignments.
pub struct Symmetrizer {
    config: SymmetrizeConfig,
}

impl Symmetrizer {
    pub fn new(config: SymmetrizeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SymmetrizeConfig {
        &self.config
    }

    fn start(&self) -> usize {
        self.config.null_policy.start_index()
    }

    /// A point may be added only while its E word or its F word is still unaligned.
    fn is_novel(&self, alignment: &AlignmentMatrix, point: Point) -> bool {
        let start = self.start();
        !(alignment.row_aligned(point.e, start) && alignment.col_aligned(point.f, start))
    }

    /// Extends `alignment` with neighbouring points of `union` until a full pass adds nothing.
    ///
    /// Returns the number of added points.
    pub fn grow_diag(&self, union: &AlignmentMatrix, alignment: &mut AlignmentMatrix) -> usize {
        let start = self.start();
        let (e_len, f_len) = (alignment.rows(), alignment.cols());
        let mut added = 0;
        loop {
            let mut added_in_pass = 0;
            for e in start..e_len {
                for f in start..f_len {
                    let point = Point::new(e, f);
                    if !alignment.contains(point) {
                        continue;
                    }
                    for neighbor in neighbors(point, start, e_len, f_len) {
                        if union.contains(neighbor)
                            && self.is_novel(alignment, neighbor)
                            && alignment.insert(neighbor)
                        {
                            added_in_pass += 1;
                        }
                    }
                }
            }
            if added_in_pass == 0 {
                return added;
            }
            added += added_in_pass;
        }
    }

    fn final_with<F>(&self, alignment: &mut AlignmentMatrix, evidence: F) -> usize
    where
        F: Fn(Point) -> bool,
    {
        let start = self.start();
        let mut added = 0;
        for e in start..alignment.rows() {
            for f in start..alignment.cols() {
                let point = Point::new(e, f);
                if evidence(point) && self.is_novel(alignment, point) && alignment.insert(point) {
                    added += 1;
                }
            }
        }
        added
    }

    /// FINAL over points of either direction.
    pub fn final_union(
        &self,
        alignment: &mut AlignmentMatrix,
        e2f: &AlignmentMatrix,
        f2e: &AlignmentMatrix,
    ) -> usize {
        self.final_with(alignment, |p| e2f.contains(p) || f2e.contains(p.transpose()))
    }

    /// FINAL(e2f): only points of the e2f direction.
    pub fn final_e2f(&self, alignment: &mut AlignmentMatrix, e2f: &AlignmentMatrix) -> usize {
        self.final_with(alignment, |p| e2f.contains(p))
    }

    /// FINAL(f2e): only points of the f2e direction.
    pub fn final_f2e(&self, alignment: &mut AlignmentMatrix, f2e: &AlignmentMatrix) -> usize {
        self.final_with(alignment, |p| f2e.contains(p.transpose()))
    }

    /// Runs the final step selected by the configuration.
    pub fn finalize(
        &self,
        alignment: &mut AlignmentMatrix,
        e2f: &AlignmentMatrix,
        f2e: &AlignmentMatrix,
    ) -> usize {
        match self.config.final_mode {
            FinalMode::Union => self.final_union(alignment, e2f, f2e),
            FinalMode::E2f => self.final_e2f(alignment, e2f),
            FinalMode::F2e => self.final_f2e(alignment, f2e),
        }
    }

    /// Symmetrizes one sentence pair.
    ///
    /// `e_len` and `f_len` include the NULL position. `e2f` is indexed `[e][f]`, `f2e` is
    /// indexed `[f][e]`.
    pub fn symmetrize(
        &self,
        e2f: &AlignmentMatrix,
        f2e: &AlignmentMatrix,
        e_len: usize,
        f_len: usize,
    ) -> AlignmentMatrix {
        let mut alignment = intersection(e2f, f2e, e_len, f_len);
        let seeds = alignment.count();
        let union = union(e2f, f2e, e_len, f_len);
        let grown = self.grow_diag(&union, &mut alignment);
        let finalized = self.finalize(&mut alignment, e2f, f2e);
        log::debug!(
            "{}x{} grid: {} intersection, {} union, {} grown, {} final",
            e_len,
            f_len,
            seeds,
            union.count(),
            grown,
            finalized,
        );
        alignment
    }
}

impl Default for Symmetrizer {
    fn default() -> Self {
        Self::new(SymmetrizeConfig::default())
    }
}
