//! Exhaustive N-Queens enumeration
//!
//! Backtracking with one queen per row. Used to build the constraint oracle
//! and as ground truth for the validator.

use crate::board::{attacks, Board, Queen};
use qpuzzle_core::board::MAX_BOARD_SIZE;
use qpuzzle_core::{QpuzzleError, QpuzzleResult};

/// Every valid N-Queens board, ordered by column vector (row 0 column first)
pub fn all_solutions(size: usize) -> QpuzzleResult<Vec<Board>> {
    check_size(size)?;
    let mut found = Vec::new();
    let mut placed: Vec<Queen> = Vec::with_capacity(size);
    extend(size, &mut placed, &mut found)?;
    Ok(found)
}

/// Number of valid boards for N
pub fn solution_count(size: usize) -> QpuzzleResult<usize> {
    all_solutions(size).map(|s| s.len())
}

fn check_size(size: usize) -> QpuzzleResult<()> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(QpuzzleError::BoardSizeOutOfRange {
            size,
            min: 1,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(())
}

fn extend(size: usize, placed: &mut Vec<Queen>, found: &mut Vec<Board>) -> QpuzzleResult<()> {
    let row = placed.len();
    if row == size {
        found.push(Board::from_queens(size, placed)?);
        return Ok(());
    }
    for col in 0..size {
        if placed.iter().all(|&q| !attacks(q, (row, col))) {
            placed.push((row, col));
            extend(size, placed, found)?;
            placed.pop();
        }
    }
    Ok(())
}

/// All placements with one queen per row and column (N! boards)
pub fn permutation_boards(size: usize) -> QpuzzleResult<Vec<Board>> {
    check_size(size)?;
    let mut cols: Vec<usize> = (0..size).collect();
    let mut boards = Vec::new();
    permute(&mut cols, 0, &mut |perm| {
        let queens: Vec<Queen> = perm.iter().copied().enumerate().collect();
        boards.push(Board::from_queens(size, &queens));
    });
    boards.into_iter().collect()
}

fn permute(cols: &mut [usize], k: usize, visit: &mut dyn FnMut(&[usize])) {
    if k == cols.len() {
        visit(cols);
        return;
    }
    for i in k..cols.len() {
        cols.swap(k, i);
        permute(cols, k + 1, visit);
        cols.swap(k, i);
    }
}

// ============================================================================
// Tests
// ============================================================================
