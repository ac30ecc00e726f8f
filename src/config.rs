use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};

use crate::matrix::NULL_INDEX;

/// Whether alignments to the NULL token take part in growing and the final step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NullPolicy {
    #[default]
    Exclude,
    Include,
}

impl NullPolicy {
    /// First index visited on either axis.
    pub const fn start_index(self) -> usize {
        match self {
            Self::Exclude => NULL_INDEX + 1,
            Self::Include => NULL_INDEX,
        }
    }
}

/// Evidence consulted by the final step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FinalMode {
    /// Points of either direction.
    #[default]
    Union,
    /// Points of the e2f direction only.
    E2f,
    /// Points of the f2e direction only.
    F2e,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown final step `{0}`, expected `union`, `e2f` or `f2e`")]
pub struct ParseFinalModeError(String);

impl FromStr for FinalMode {
    type Err = ParseFinalModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(Self::Union),
            "e2f" => Ok(Self::E2f),
            "f2e" => Ok(Self::F2e),
            _ => Err(ParseFinalModeError(s.to_string())),
        }
    }
}

impl fmt::Display for FinalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Union => "union",
            Self::E2f => "e2f",
            Self::F2e => "f2e",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymmetrizeConfig {
    pub null_policy: NullPolicy,
    pub final_mode: FinalMode,
}
