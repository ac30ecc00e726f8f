use crate::matrix::{AlignmentMatrix, Point};

/// Token the aligner puts in front of every annotation line.
pub const NULL_TOKEN: &str = "NULL";

pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// One `token ({ positions })` segment of an annotation line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub token: &'a str,
    pub positions: &'a str,
}

impl<'a> Segment<'a> {
    /// The raw position strings between the braces. Only ASCII digits can occur.
    pub fn positions(&self) -> impl Iterator<Item = &'a str> {
        self.positions
            .split(|c: char| c.is_ascii() && is_space(c as u8))
            .filter(|s| !s.is_empty())
    }
}

/// Finds segments left to right without overlap.
///
/// A segment is a run of non-whitespace, exactly one whitespace character, `({`, any mix of
/// whitespace and digits, then `})`. Text in between that does not fit is skipped; each
/// maximal skipped stretch is counted once.
pub struct Segments<'a> {
    line: &'a str,
    pos: usize,
    skipped: usize,
    in_gap: bool,
}

impl<'a> Segments<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            skipped: 0,
            in_gap: false,
        }
    }

    /// Number of skipped stretches seen so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Matches ` ({ ... })` right after a token ending at `end`.
    /// Returns the range of the positions and the end of the segment.
    fn match_tail(bytes: &[u8], end: usize) -> Option<(usize, usize, usize)> {
        if !bytes.get(end).copied().is_some_and(is_space) {
            return None;
        }
        if bytes.get(end + 1..end + 3)? != b"({" {
            return None;
        }
        let start = end + 3;
        let mut i = start;
        while i < bytes.len() && (is_space(bytes[i]) || bytes[i].is_ascii_digit()) {
            i += 1;
        }
        if bytes.get(i..i + 2)? != b"})" {
            return None;
        }
        Some((start, i, i + 2))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.line.as_bytes();
        loop {
            while self.pos < bytes.len() && is_space(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= bytes.len() {
                return None;
            }
            let start = self.pos;
            while self.pos < bytes.len() && !is_space(bytes[self.pos]) {
                self.pos += 1;
            }
            let end = self.pos;
            if let Some((inner_start, inner_end, next)) = Self::match_tail(bytes, end) {
                self.pos = next;
                self.in_gap = false;
                return Some(Segment {
                    token: &self.line[start..end],
                    positions: &self.line[inner_start..inner_end],
                });
            }
            log::trace!("skipping unparseable text {:?}", &self.line[start..end]);
            if !self.in_gap {
                self.skipped += 1;
                self.in_gap = true;
            }
        }
    }
}

/// One direction of a sentence pair's word alignment.
///
/// Rows follow the annotated sentence (row 0 is NULL), columns the opposite sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionalAlignment {
    pub matrix: AlignmentMatrix,
    pub skipped_segments: usize,
    pub dropped_positions: usize,
}

impl DirectionalAlignment {
    /// Parses an annotation line such as `NULL ({ 3 }) the ({ 1 }) cat ({ 2 })`.
    ///
    /// `opposite_len` is the length of the opposite sentence including NULL. A line that does
    /// not start with a `NULL` segment gets an empty NULL row, so annotated tokens always start
    /// at row 1. Positions that fall outside the opposite sentence are dropped.
    pub fn parse(line: &str, opposite_len: usize) -> Self {
        let mut matrix = AlignmentMatrix::new(0, opposite_len);
        let mut dropped_positions = 0;
        let mut segments = Segments::new(line);
        for segment in segments.by_ref() {
            if matrix.rows() == 0 && segment.token != NULL_TOKEN {
                matrix.push_row();
            }
            let row = matrix.push_row();
            for position in segment.positions() {
                match position.parse::<usize>() {
                    Ok(col) if col < opposite_len => {
                        matrix.insert(Point::new(row, col));
                    }
                    _ => {
                        log::trace!(
                            "dropping position {} of {:?} (opposite length {})",
                            position,
                            segment.token,
                            opposite_len,
                        );
                        dropped_positions += 1;
                    }
                }
            }
        }
        Self {
            matrix,
            skipped_segments: segments.skipped(),
            dropped_positions,
        }
    }
}
