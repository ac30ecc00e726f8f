//! Streams sentence pairs out of two aligner output files.
//!
//! Each file repeats three lines per sentence: a comment line, the opposite sentence as plain
//! tokens, and the annotated sentence. The e2f file carries the F sentence on its second line
//! and the annotated E sentence on its third; the f2e file the other way around.

use std::fmt;
use std::io::{self, BufRead, Write};

use crate::config::SymmetrizeConfig;
use crate::format::{pairs, write_pairs};
use crate::matrix::AlignmentMatrix;
use crate::parse::{is_space, DirectionalAlignment, NULL_TOKEN};
use crate::symmetrize::Symmetrizer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    E2f,
    F2e,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::E2f => "e2f",
            Self::F2e => "f2e",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to read the {0} alignment stream")]
    Read(Direction, #[source] io::Error),

    #[error("failed to write the symmetrized alignment")]
    Write(#[source] io::Error),
}

/// Both sides of one sentence pair, NULL-prefixed, with their directional alignments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentencePair {
    pub e_tokens: Vec<String>,
    pub f_tokens: Vec<String>,
    pub e2f: DirectionalAlignment,
    pub f2e: DirectionalAlignment,
}

impl SentencePair {
    pub fn e_len(&self) -> usize {
        self.e_tokens.len()
    }

    pub fn f_len(&self) -> usize {
        self.f_tokens.len()
    }
}

fn tokens(line: &str) -> Vec<String> {
    std::iter::once(NULL_TOKEN)
        .chain(
            line.split(|c: char| c.is_ascii() && is_space(c as u8))
                .filter(|s| !s.is_empty()),
        )
        .map(String::from)
        .collect()
}

/// Yields sentence pairs until either stream runs out.
pub struct SentencePairReader<A, B> {
    e2f: A,
    f2e: B,
    e2f_line: Vec<u8>,
    f2e_line: Vec<u8>,
    lines: usize,
    finished: bool,
}

impl<A, B> SentencePairReader<A, B>
where
    A: BufRead,
    B: BufRead,
{
    pub fn new(e2f: A, f2e: B) -> Self {
        Self {
            e2f,
            f2e,
            e2f_line: vec![],
            f2e_line: vec![],
            lines: 0,
            finished: false,
        }
    }

    /// Number of line pairs consumed so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    fn read_line<R: BufRead>(
        reader: &mut R,
        buf: &mut Vec<u8>,
        direction: Direction,
    ) -> Result<bool, DriverError> {
        buf.clear();
        let n = reader
            .read_until(b'\n', buf)
            .map_err(|e| DriverError::Read(direction, e))?;
        Ok(n != 0)
    }

    /// Reads one line from each stream. Returns `false` once either stream is exhausted.
    fn advance(&mut self) -> Result<bool, DriverError> {
        if !Self::read_line(&mut self.e2f, &mut self.e2f_line, Direction::E2f)? {
            return Ok(false);
        }
        if !Self::read_line(&mut self.f2e, &mut self.f2e_line, Direction::F2e)? {
            return Ok(false);
        }
        self.lines += 1;
        Ok(true)
    }

    fn read_pair(&mut self) -> Result<Option<SentencePair>, DriverError> {
        // Comment line.
        if !self.advance()? {
            return Ok(None);
        }
        if !self.advance()? {
            log::debug!("streams ended inside a sentence after {} lines", self.lines);
            return Ok(None);
        }
        let f_tokens = tokens(&String::from_utf8_lossy(&self.e2f_line));
        let e_tokens = tokens(&String::from_utf8_lossy(&self.f2e_line));
        if !self.advance()? {
            log::debug!("streams ended inside a sentence after {} lines", self.lines);
            return Ok(None);
        }
        let e2f = DirectionalAlignment::parse(
            &String::from_utf8_lossy(&self.e2f_line),
            f_tokens.len(),
        );
        let f2e = DirectionalAlignment::parse(
            &String::from_utf8_lossy(&self.f2e_line),
            e_tokens.len(),
        );
        Ok(Some(SentencePair {
            e_tokens,
            f_tokens,
            e2f,
            f2e,
        }))
    }
}

impl<A, B> Iterator for SentencePairReader<A, B>
where
    A: BufRead,
    B: BufRead,
{
    type Item = Result<SentencePair, DriverError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.read_pair().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.finished = true;
        }
        result
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub sentences: usize,
    pub points: usize,
    pub skipped_segments: usize,
    pub dropped_positions: usize,
}

impl RunStats {
    fn record(&mut self, pair: &SentencePair, alignment: &AlignmentMatrix) {
        self.sentences += 1;
        self.points += pairs(alignment).count();
        self.skipped_segments += pair.e2f.skipped_segments + pair.f2e.skipped_segments;
        self.dropped_positions += pair.e2f.dropped_positions + pair.f2e.dropped_positions;
    }
}

/// Symmetrizes every sentence pair of the two streams and writes one line per pair to `out`.
pub fn run<A, B, W>(
    e2f: A,
    f2e: B,
    mut out: W,
    config: SymmetrizeConfig,
) -> Result<RunStats, DriverError>
where
    A: BufRead,
    B: BufRead,
    W: Write,
{
    let symmetrizer = Symmetrizer::new(config);
    let mut stats = RunStats::default();
    let mut buf = String::new();
    for pair in SentencePairReader::new(e2f, f2e) {
        let pair = pair?;
        if pair.e2f.skipped_segments + pair.f2e.skipped_segments > 0 {
            log::debug!(
                "sentence {}: skipped {} e2f and {} f2e segments",
                stats.sentences,
                pair.e2f.skipped_segments,
                pair.f2e.skipped_segments,
            );
        }
        let alignment =
            symmetrizer.symmetrize(&pair.e2f.matrix, &pair.f2e.matrix, pair.e_len(), pair.f_len());
        write_pairs(&alignment, &mut buf);
        writeln!(out, "{buf}").map_err(DriverError::Write)?;
        stats.record(&pair, &alignment);
    }
    out.flush().map_err(DriverError::Write)?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::{BufReader, Read};

    use crate::config::FinalMode;

    const E2F: &str = "\
# Sentence pair (1) source length 2 target length 2 alignment score : 0.1
le chat
NULL ({ }) the ({ 1 }) cat ({ 2 })
# Sentence pair (2) source length 2 target length 2 alignment score : 0.2
le chat
NULL ({ 1 }) the ({ }) cat ({ 2 })
";

    const F2E: &str = "\
# Sentence pair (1) source length 2 target length 2 alignment score : 0.3
the cat
NULL ({ }) le ({ 1 }) chat ({ 2 })
# Sentence pair (2) source length 2 target length 2 alignment score : 0.4
the cat
NULL ({ }) le ({ 2 }) chat ({ 2 })
";

    fn run_str(e2f: &str, f2e: &str, config: SymmetrizeConfig) -> (String, RunStats) {
        let mut out = vec![];
        let stats = run(e2f.as_bytes(), f2e.as_bytes(), &mut out, config).unwrap();
        (String::from_utf8(out).unwrap(), stats)
    }

    #[test]
    fn test_tokens() {
        assert_eq!(tokens("le  chat\r\n"), vec!["NULL", "le", "chat"]);
        assert_eq!(tokens("\n"), vec!["NULL"]);
    }

    #[test]
    fn test_reader_pairs() {
        let pairs: Vec<_> = SentencePairReader::new(E2F.as_bytes(), F2E.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].e_tokens, vec!["NULL", "the", "cat"]);
        assert_eq!(pairs[0].f_tokens, vec!["NULL", "le", "chat"]);
        assert_eq!((pairs[1].e_len(), pairs[1].f_len()), (3, 3));
        assert_eq!(pairs[1].e2f.matrix.rows(), 3);
        assert_eq!(pairs[1].f2e.matrix.cols(), 3);
    }

    #[test]
    fn test_run() {
        let (out, stats) = run_str(E2F, F2E, SymmetrizeConfig::default());
        assert_eq!(out, "1-1 2-2\n1-2 2-2\n");
        assert_eq!(
            stats,
            RunStats {
                sentences: 2,
                points: 4,
                skipped_segments: 0,
                dropped_positions: 0,
            }
        );
    }

    #[test]
    fn test_run_shorter_stream_wins() {
        let e2f: String = E2F.lines().take(5).map(|l| format!("{l}\n")).collect();
        let (out, stats) = run_str(&e2f, F2E, SymmetrizeConfig::default());
        assert_eq!(out, "1-1 2-2\n");
        assert_eq!(stats.sentences, 1);
    }

    #[test]
    fn test_run_empty_alignment_line() {
        let e2f = "#\nle chat\nNULL ({ 1 2 }) the ({ }) cat ({ })\n";
        let f2e = "#\nthe cat\nNULL ({ 1 2 }) le ({ }) chat ({ })\n";
        let (out, stats) = run_str(e2f, f2e, SymmetrizeConfig::default());
        assert_eq!(out, "\n");
        assert_eq!(stats.points, 0);
    }

    #[test]
    fn test_run_counts_skipped_segments() {
        let e2f = "#\nle chat\nNULL ({ }) the ({ 1 }) cat {{ 2 }}\n";
        let f2e = "#\nthe cat\nNULL ({ }) le ({ 1 9 }) chat ({ 2 })\n";
        let (out, stats) = run_str(e2f, f2e, SymmetrizeConfig::default());
        // "cat" gets no e2f row; chat-cat is grown diagonally from le-the.
        assert_eq!(out, "1-1 2-2\n");
        assert_eq!(stats.skipped_segments, 1);
        assert_eq!(stats.dropped_positions, 1);
    }

    #[test]
    fn test_run_restricted_final() {
        // Only a-x is shared; c-z comes from e2f and b-z from f2e, both out of reach of growing.
        let e2f = "#\nx y z\nNULL ({ }) a ({ 1 }) b ({ }) c ({ 3 })\n";
        let f2e = "#\na b c\nNULL ({ }) x ({ 1 }) y ({ }) z ({ 2 })\n";
        let config = |final_mode| SymmetrizeConfig {
            final_mode,
            ..Default::default()
        };
        let (out, _) = run_str(e2f, f2e, config(FinalMode::Union));
        assert_eq!(out, "1-1 3-2 3-3\n");
        let (out, _) = run_str(e2f, f2e, config(FinalMode::E2f));
        assert_eq!(out, "1-1 3-3\n");
        let (out, _) = run_str(e2f, f2e, config(FinalMode::F2e));
        assert_eq!(out, "1-1 3-2\n");
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn test_run_read_error() {
        let err = run(
            E2F.as_bytes(),
            BufReader::new(Broken),
            io::sink(),
            SymmetrizeConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DriverError::Read(Direction::F2e, _)));
        assert_eq!(err.to_string(), "failed to read the f2e alignment stream");
    }
}
