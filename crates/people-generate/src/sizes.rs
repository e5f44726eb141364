//! Validated size-per-level sequences.

use std::fmt;
use std::str::FromStr;

use crate::error::{GenerateError, Result};

/// Upper bound on the records a single size sequence may produce.
pub const MAX_TOTAL_RECORDS: usize = 1_000_000;

/// Number of records per nesting level: `[top, children per node, ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelSizes(Vec<usize>);

impl LevelSizes {
    /// Validate `sizes` against [`MAX_TOTAL_RECORDS`].
    pub fn new(sizes: Vec<usize>) -> Result<Self> {
        total_records(&sizes).ok_or(GenerateError::TooLarge {
            max: MAX_TOTAL_RECORDS,
        })?;
        Ok(Self(sizes))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Total records this shape produces, nested levels included.
    pub fn total(&self) -> usize {
        total_records(&self.0).unwrap_or(MAX_TOTAL_RECORDS)
    }
}

/// Sum over levels of the product of sizes down to that level, or `None`
/// when it exceeds [`MAX_TOTAL_RECORDS`].
fn total_records(sizes: &[usize]) -> Option<usize> {
    let mut level = 1usize;
    let mut total = 0usize;
    for &size in sizes {
        level = level.checked_mul(size)?;
        total = total.checked_add(level)?;
        if total > MAX_TOTAL_RECORDS {
            return None;
        }
        if level == 0 {
            break;
        }
    }
    Some(total)
}

impl FromStr for LevelSizes {
    type Err = GenerateError;

    /// Parse a comma-separated list such as `2000` or `2,2`.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let sizes = s
            .split(',')
            .enumerate()
            .map(|(position, part)| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| GenerateError::InvalidSize {
                        position,
                        value: part.trim().to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(sizes)
    }
}

impl fmt::Display for LevelSizes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}
