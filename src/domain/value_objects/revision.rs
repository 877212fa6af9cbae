use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw value callers use to ask for the repository head
pub const HEAD_SENTINEL: i64 = -1;

/// Revision selector for commands that accept `-r`
///
/// `Head` is resolved by the tool (or by an explicit head lookup) and is
/// never stored in a parsed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// The repository's youngest revision
    Head,
    /// A concrete revision number
    Number(u64),
}

impl Default for Revision {
    fn default() -> Self {
        Self::Head
    }
}

impl Revision {
    /// Convert a raw revision value where `-1` means HEAD
    pub fn from_raw(raw: i64) -> Result<Self, RevisionError> {
        match raw {
            HEAD_SENTINEL => Ok(Self::Head),
            n if n >= 0 => Ok(Self::Number(n as u64)),
            n => Err(RevisionError::Negative(n)),
        }
    }

    /// Concrete revision number, using `head` for the HEAD selector
    pub fn resolve(&self, head: u64) -> u64 {
        match self {
            Self::Head => head,
            Self::Number(n) => *n,
        }
    }
}

impl From<u64> for Revision {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Head => write!(f, "HEAD"),
            Revision::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for Revision {
    type Err = RevisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("head") {
            return Ok(Revision::Head);
        }
        let raw: i64 = trimmed
            .parse()
            .map_err(|_| RevisionError::Invalid(s.to_string()))?;
        Revision::from_raw(raw)
    }
}

/// Errors that can occur when building a revision selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionError {
    /// Negative values other than the HEAD sentinel
    Negative(i64),
    /// Not a number and not `HEAD`
    Invalid(String),
}

impl fmt::Display for RevisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionError::Negative(n) => {
                write!(f, "Invalid revision {}: only -1 (HEAD) may be negative", n)
            }
            RevisionError::Invalid(s) => write!(f, "Invalid revision: '{}'", s),
        }
    }
}

impl std::error::Error for RevisionError {}
