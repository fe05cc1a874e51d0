//! Core types for QPuzzle
//!
//! Type aliases and the validated bitstring used as the interchange format
//! between circuits, backends and puzzle validators.

use crate::error::{QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
pub type QubitId = usize;

/// Measurement counts: bitstring -> count
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Bitstring
// ============================================================================

/// Fixed-length string of bits
///
/// Character `i` of the textual form is bit `i`, which is qubit `i` of a
/// measured register and cell `i` (row-major) of a flattened board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring {
    bits: Vec<bool>,
}

impl Bitstring {
    /// Create from a vector of bools
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create from string (e.g., "0110")
    pub fn parse(s: &str) -> QpuzzleResult<Self> {
        let bits: Result<Vec<bool>, _> = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(QpuzzleError::InvalidBitstring(s.to_string())),
            })
            .collect();
        Ok(Self { bits: bits? })
    }

    /// Parse and require an exact length
    pub fn parse_exact(s: &str, len: usize) -> QpuzzleResult<Self> {
        let bs = Self::parse(s)?;
        if bs.len() != len {
            return Err(QpuzzleError::BitstringLengthMismatch {
                expected: len,
                actual: bs.len(),
            });
        }
        Ok(bs)
    }

    /// Create zero bitstring of given length
    pub fn zeros(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// Create a bitstring of length `n` with the given positions set
    pub fn from_ones(n: usize, ones: impl IntoIterator<Item = usize>) -> QpuzzleResult<Self> {
        let mut bits = vec![false; n];
        for i in ones {
            let slot = bits.get_mut(i).ok_or(QpuzzleError::BitstringLengthMismatch {
                expected: n,
                actual: i + 1,
            })?;
            *slot = true;
        }
        Ok(Self { bits })
    }

    /// Build from a basis-state index (bit `i` of `value` is qubit `i`)
    pub fn from_index(value: usize, n: usize) -> Self {
        Self {
            bits: (0..n).map(|i| (value >> i) & 1 == 1).collect(),
        }
    }

    /// Basis-state index (inverse of [`Bitstring::from_index`])
    pub fn to_index(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| 1usize << i)
            .sum()
    }

    /// Get the number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Count number of 1s (Hamming weight)
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Check whether every bit is 0
    pub fn is_all_zeros(&self) -> bool {
        self.bits.iter().all(|&b| !b)
    }

    /// Get bit at index
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Indices of the set bits, ascending
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(|(i, _)| i)
    }

    /// Iterate over bits
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl FromStr for Bitstring {
    type Err = QpuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Bitstring {
    type Error = QpuzzleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Bitstring> for String {
    fn from(bits: Bitstring) -> Self {
        bits.to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
