//! N-Queens board model and validator
//!
//! A board is an N×N grid of 0/1 cells stored row-major, so cell `(r, c)`
//! is flat index `r * N + c` and bit `r * N + c` of the board's bitstring.

use qpuzzle_core::board::MAX_BOARD_SIZE;
use qpuzzle_core::{Bitstring, QpuzzleError, QpuzzleResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Queen coordinate `(row, col)`, zero-based
pub type Queen = (usize, usize);

/// N×N grid of queen placements
///
/// Serialized as its grid of 0/1 rows; deserializing runs [`Board::from_grid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Board {
    /// Board size N
    size: usize,

    /// Row-major cells, 0 or 1
    cells: Vec<u8>,
}

impl Board {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty board
    pub fn empty(size: usize) -> QpuzzleResult<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(QpuzzleError::BoardSizeOutOfRange {
                size,
                min: 1,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self {
            size,
            cells: vec![0; size * size],
        })
    }

    /// Create a board with queens at the given coordinates
    pub fn from_queens(size: usize, queens: &[Queen]) -> QpuzzleResult<Self> {
        let mut board = Self::empty(size)?;
        for &(row, col) in queens {
            board.place(row, col)?;
        }
        Ok(board)
    }

    /// Create a board from a square grid of 0/1 values
    pub fn from_grid(grid: &[Vec<u8>]) -> QpuzzleResult<Self> {
        let size = grid.len();
        let mut board = Self::empty(size)?;
        for (row, line) in grid.iter().enumerate() {
            if line.len() != size {
                return Err(QpuzzleError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    line.len(),
                    size
                )));
            }
            for (col, &value) in line.iter().enumerate() {
                match value {
                    0 => {}
                    1 => board.cells[row * size + col] = 1,
                    other => {
                        return Err(QpuzzleError::InvalidBoard(format!(
                            "cell ({}, {}) holds {}, expected 0 or 1",
                            row, col, other
                        )))
                    }
                }
            }
        }
        Ok(board)
    }

    /// Decode a flattened board (bit `i` is cell `i / N, i % N`)
    pub fn from_bitstring(size: usize, bits: &Bitstring) -> QpuzzleResult<Self> {
        let mut board = Self::empty(size)?;
        if bits.len() != size * size {
            return Err(QpuzzleError::BitstringLengthMismatch {
                expected: size * size,
                actual: bits.len(),
            });
        }
        for i in bits.ones() {
            board.cells[i] = 1;
        }
        Ok(board)
    }

    /// Place `queens` queens on uniformly random cells
    ///
    /// Cells are drawn with replacement, so collisions can leave fewer queens.
    pub fn random<R: Rng + ?Sized>(size: usize, queens: usize, rng: &mut R) -> QpuzzleResult<Self> {
        let mut board = Self::empty(size)?;
        for _ in 0..queens {
            let row = rng.gen_range(0..size);
            let col = rng.gen_range(0..size);
            board.cells[row * size + col] = 1;
        }
        Ok(board)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Board size N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²), which is also the Grover register width
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Check whether a queen sits on `(row, col)`
    pub fn has_queen(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size && self.cells[row * self.size + col] == 1
    }

    /// Put a queen on `(row, col)`
    pub fn place(&mut self, row: usize, col: usize) -> QpuzzleResult<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = 1;
        Ok(())
    }

    /// Remove the queen on `(row, col)`, if any
    pub fn remove(&mut self, row: usize, col: usize) -> QpuzzleResult<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = 0;
        Ok(())
    }

    /// Number of queens on the board
    pub fn queen_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }

    /// Queen coordinates in row-major order
    pub fn queens(&self) -> Vec<Queen> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == 1)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Rows of the grid as 0/1 vectors
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Flatten to a bitstring of length N²
    pub fn to_bitstring(&self) -> Bitstring {
        Bitstring::new(self.cells.iter().map(|&c| c == 1).collect())
    }

    fn index(&self, row: usize, col: usize) -> QpuzzleResult<usize> {
        if row >= self.size || col >= self.size {
            return Err(QpuzzleError::CellOutOfRange {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

impl TryFrom<Vec<Vec<u8>>> for Board {
    type Error = QpuzzleError;

    fn try_from(grid: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Board::from_grid(&grid)
    }
}

impl From<Board> for Vec<Vec<u8>> {
    fn from(board: Board) -> Self {
        board.to_grid()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Two queens attack each other along a row, column or diagonal
pub fn attacks(a: Queen, b: Queen) -> bool {
    a.0 == b.0 || a.1 == b.1 || a.0.abs_diff(b.0) == a.1.abs_diff(b.1)
}

/// No two queens on the board attack each other (queen count unchecked)
pub fn is_conflict_free(board: &Board) -> bool {
    let queens = board.queens();
    queens
        .iter()
        .enumerate()
        .all(|(i, &a)| queens[i + 1..].iter().all(|&b| !attacks(a, b)))
}

/// Exactly N queens and no two share a row, column or diagonal
pub fn is_valid_solution(board: &Board) -> bool {
    board.queen_count() == board.size() && is_conflict_free(board)
}

/// Validate a flattened board
pub fn is_valid_bitstring(size: usize, bits: &Bitstring) -> QpuzzleResult<bool> {
    Board::from_bitstring(size, bits).map(|b| is_valid_solution(&b))
}

// ============================================================================
// Encoding
// ============================================================================

/// Encode queen coordinates as a flat bitstring of length N²
pub fn encode_queens(size: usize, queens: &[Queen]) -> QpuzzleResult<Bitstring> {
    Board::from_queens(size, queens).map(|b| b.to_bitstring())
}

/// Decode the set bits of a flat bitstring into `(i / N, i % N)` pairs
pub fn decode_queens(size: usize, bits: &Bitstring) -> QpuzzleResult<Vec<Queen>> {
    Board::from_bitstring(size, bits).map(|b| b.queens())
}

// ============================================================================
// Known Solutions
// ============================================================================

/// Fixed demonstration solution for an N×N board; `None` when none exists
pub fn known_solution(size: usize) -> Option<Vec<Queen>> {
    match size {
        1 => Some(vec![(0, 0)]),
        4 => Some(vec![(1, 0), (3, 1), (0, 2), (2, 3)]),
        5 => Some(vec![(0, 0), (2, 1), (4, 2), (1, 3), (3, 4)]),
        6 => Some(vec![(1, 0), (3, 1), (5, 2), (0, 3), (2, 4), (4, 5)]),
        _ => None,
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = (0..self.size)
            .map(|c| ((b'A' + c as u8) as char).to_string())
            .collect();
        writeln!(f, "   {}", header.join(" "))?;
        for row in 0..self.size {
            let cells: Vec<&str> = (0..self.size)
                .map(|col| if self.has_queen(row, col) { "Q" } else { "." })
                .collect();
            writeln!(f, "{:>2} {}", self.size - row, cells.join(" "))?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_solutions_validate() {
        for n in 4..=6 {
            let queens = known_solution(n).unwrap();
            let board = Board::from_queens(n, &queens).unwrap();
            assert!(is_valid_solution(&board), "known solution for {} rejected", n);
        }
        assert!(known_solution(2).is_none());
        assert!(known_solution(3).is_none());
    }

    #[test]
    fn test_removing_a_queen_fails_count() {
        let mut board = Board::from_queens(4, &[(1, 0), (3, 1), (0, 2), (2, 3)]).unwrap();
        assert!(is_valid_solution(&board));
        board.remove(2, 3).unwrap();
        assert!(!is_valid_solution(&board));
        assert!(is_conflict_free(&board));
    }

    #[test]
    fn test_empty_board_rejected() {
        for n in 1..=6 {
            assert!(!is_valid_solution(&Board::empty(n).unwrap()));
        }
    }

    #[test]
    fn test_too_many_queens_rejected() {
        let mut board = Board::from_queens(4, &known_solution(4).unwrap()).unwrap();
        board.place(3, 3).unwrap();
        assert_eq!(board.queen_count(), 5);
        assert!(!is_valid_solution(&board));
    }

    #[test]
    fn test_row_conflict() {
        // (0,1) and (0,3) share row 0; remaining queens avoid each other
        let board = Board::from_queens(4, &[(0, 1), (0, 3), (2, 0), (3, 2)]).unwrap();
        assert!(!is_valid_solution(&board));
    }

    #[test]
    fn test_column_conflict() {
        let board = Board::from_queens(4, &[(0, 1), (2, 1), (1, 3), (3, 2)]).unwrap();
        assert!(!is_valid_solution(&board));
    }

    #[test]
    fn test_diagonal_conflict() {
        assert!(attacks((0, 0), (3, 3)));
        assert!(attacks((0, 3), (2, 1)));
        assert!(!attacks((0, 0), (1, 2)));
        let board = Board::from_queens(4, &[(0, 0), (1, 1), (2, 3), (3, 2)]).unwrap();
        assert!(!is_valid_solution(&board));
    }

    #[test]
    fn test_from_grid() {
        let grid = vec![
            vec![0, 0, 1, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 1],
            vec![0, 1, 0, 0],
        ];
        let board = Board::from_grid(&grid).unwrap();
        assert!(is_valid_solution(&board));
        assert_eq!(board.to_grid(), grid);
    }

    #[test]
    fn test_from_grid_rejects_bad_input() {
        assert!(Board::from_grid(&[vec![0, 1], vec![1]]).is_err());
        assert!(Board::from_grid(&[vec![0, 2], vec![0, 0]]).is_err());
        assert!(Board::from_grid(&[]).is_err());
    }

    #[test]
    fn test_size_bounds() {
        assert!(Board::empty(0).is_err());
        assert!(Board::empty(7).is_err());
        assert!(Board::empty(6).is_ok());
    }

    #[test]
    fn test_place_out_of_range() {
        let mut board = Board::empty(4).unwrap();
        assert!(matches!(
            board.place(4, 0),
            Err(QpuzzleError::CellOutOfRange { row: 4, col: 0, size: 4 })
        ));
    }

    #[test]
    fn test_encode_decode_recovers_coordinates() {
        for n in 4..=6 {
            let mut queens = known_solution(n).unwrap();
            let bits = encode_queens(n, &queens).unwrap();
            assert_eq!(bits.len(), n * n);
            let mut decoded = decode_queens(n, &bits).unwrap();
            queens.sort_unstable();
            decoded.sort_unstable();
            assert_eq!(decoded, queens);
        }
    }

    #[test]
    fn test_known_4_bitstring() {
        let bits = encode_queens(4, &known_solution(4).unwrap()).unwrap();
        assert_eq!(bits.to_string(), "0010100000010100");
        assert!(is_valid_bitstring(4, &bits).unwrap());
        assert!(is_valid_bitstring(4, &Bitstring::zeros(9)).is_err());
    }

    #[test]
    fn test_random_board_is_seeded() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let x = Board::random(5, 5, &mut a).unwrap();
        let y = Board::random(5, 5, &mut b).unwrap();
        assert_eq!(x, y);
        assert!(x.queen_count() <= 5 && x.queen_count() >= 1);
    }

    #[test]
    fn test_display() {
        let board = Board::from_queens(4, &known_solution(4).unwrap()).unwrap();
        let text = board.to_string();
        assert!(text.starts_with("   A B C D"));
        assert!(text.contains(" 4 . . Q ."));
        assert_eq!(text.matches('Q').count(), 4);
    }
}
