//! Reading N-Queens answers out of measurement counts

use qpuzzle_backend::{most_frequent, sorted_counts};
use qpuzzle_core::{Bitstring, Counts, QpuzzleError, QpuzzleResult};
use qpuzzle_puzzles::{is_valid_solution, Board, Queen};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The most frequent outcome, checked against the board rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Winning bitstring
    pub bitstring: Bitstring,

    /// Shots that produced it
    pub count: u64,

    /// Total shots in the counts
    pub total: u64,

    /// Board decoded from the bitstring
    pub board: Board,

    /// Queen coordinates when the board is a valid solution
    pub queens: Option<Vec<Queen>>,
}

impl Interpretation {
    /// The winning board is a valid N-Queens solution
    pub fn is_valid(&self) -> bool {
        self.queens.is_some()
    }

    /// Fraction of shots on the winning bitstring
    pub fn frequency(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} shots, {})",
            self.bitstring,
            self.count,
            self.total,
            if self.is_valid() { "valid" } else { "invalid" }
        )
    }
}

/// Pick the most frequent bitstring and check it as an N×N board
///
/// Ties go to the lexicographically smallest bitstring.
pub fn interpret_counts(size: usize, counts: &Counts) -> QpuzzleResult<Interpretation> {
    let (winner, count) = most_frequent(counts).ok_or(QpuzzleError::EmptyCounts)?;
    let bitstring = Bitstring::parse_exact(winner, size * size)?;
    let board = Board::from_bitstring(size, &bitstring)?;
    let queens = is_valid_solution(&board).then(|| board.queens());

    Ok(Interpretation {
        bitstring,
        count,
        total: counts.values().sum(),
        board,
        queens,
    })
}

/// One row of a ranked outcome table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOutcome {
    /// Measured bitstring
    pub bitstring: String,

    /// Shots
    pub count: u64,

    /// Fraction of all shots
    pub probability: f64,

    /// Whether it decodes to a valid board
    pub valid: bool,
}

/// The `k` most frequent outcomes with their validity
pub fn top_results(size: usize, counts: &Counts, k: usize) -> QpuzzleResult<Vec<RankedOutcome>> {
    if counts.is_empty() {
        return Err(QpuzzleError::EmptyCounts);
    }
    let total: u64 = counts.values().sum();
    sorted_counts(counts)
        .into_iter()
        .take(k)
        .map(|(bs, count)| {
            let bits = Bitstring::parse_exact(bs, size * size)?;
            let valid = is_valid_solution(&Board::from_bitstring(size, &bits)?);
            Ok(RankedOutcome {
                bitstring: bs.to_string(),
                count,
                probability: count as f64 / total as f64,
                valid,
            })
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SOLUTION_4: &str = "0010100000010100";

    fn counts(entries: &[(&str, u64)]) -> Counts {
        entries.iter().map(|&(b, c)| (b.to_string(), c)).collect()
    }

    #[test]
    fn test_valid_winner_is_decoded() {
        let c = counts(&[(SOLUTION_4, 700), ("0000000000000000", 300)]);
        let interp = interpret_counts(4, &c).unwrap();

        assert!(interp.is_valid());
        assert_eq!(interp.count, 700);
        assert_eq!(interp.total, 1000);
        let mut queens = interp.queens.unwrap();
        queens.sort();
        assert_eq!(queens, vec![(0, 2), (1, 0), (2, 3), (3, 1)]);
    }

    #[test]
    fn test_invalid_winner() {
        let c = counts(&[("0000000000000000", 10), (SOLUTION_4, 3)]);
        let interp = interpret_counts(4, &c).unwrap();

        assert!(!interp.is_valid());
        assert!(interp.queens.is_none());
        assert_eq!(interp.bitstring.to_string(), "0000000000000000");
    }

    #[test]
    fn test_tie_goes_to_smallest_bitstring() {
        let c = counts(&[("1001", 5), ("0110", 5), ("1000", 2)]);
        let interp = interpret_counts(2, &c).unwrap();
        assert_eq!(interp.bitstring.to_string(), "0110");
    }

    #[test]
    fn test_empty_counts() {
        assert_eq!(interpret_counts(4, &HashMap::new()), Err(QpuzzleError::EmptyCounts));
        assert!(top_results(4, &HashMap::new(), 3).is_err());
    }

    #[test]
    fn test_wrong_length() {
        let c = counts(&[("0101", 1)]);
        assert_eq!(
            interpret_counts(3, &c),
            Err(QpuzzleError::BitstringLengthMismatch { expected: 9, actual: 4 })
        );
    }

    #[test]
    fn test_top_results() {
        let c = counts(&[
            (SOLUTION_4, 50),
            ("0100000110000010", 30),
            ("1000000000000000", 20),
        ]);
        let top = top_results(4, &c, 2).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].bitstring, SOLUTION_4);
        assert!(top[0].valid);
        assert!((top[0].probability - 0.5).abs() < 1e-12);
        assert!(top[1].valid);
        assert_eq!(top[1].count, 30);
    }
}
