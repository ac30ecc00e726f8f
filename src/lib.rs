//! GROW-DIAG-FINAL symmetrization of directional word alignments.
//!
//! Reference:
//! Philipp Koehn, Franz Josef Och and Daniel Marcu.
//! Statistical Phrase-Based Translation. HLT-NAACL 2003.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod combine;
mod config;
#[cfg(feature = "std")]
mod driver;
mod format;
mod matrix;
mod parse;
mod symmetrize;

pub use combine::{intersection, union};
pub use config::{FinalMode, NullPolicy, ParseFinalModeError, SymmetrizeConfig};
#[cfg(feature = "std")]
pub use driver::{run, Direction, DriverError, RunStats, SentencePair, SentencePairReader};
pub use format::{pairs, write_pairs};
pub use matrix::{AlignmentMatrix, Point, NULL_INDEX};
pub use parse::{DirectionalAlignment, Segment, Segments, NULL_TOKEN};
pub use symmetrize::Symmetrizer;
