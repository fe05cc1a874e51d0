//! # QPuzzle Puzzles
//!
//! Classical side of the demos: N-Queens boards with their validator and
//! solution enumeration, the built-in graph catalog, and coloring checks.
//!
//! ## Architecture
//!
//! ```text
//! qpuzzle_puzzles
//!     board      // Board, attack rule, bitstring encoding, known solutions
//!     solutions  // backtracking enumeration, permutation boards
//!     graph      // Graph, 10-entry catalog, lookup by name
//!     coloring   // Coloring, validator, greedy search, ColorBudget
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qpuzzle_puzzles::prelude::*;
//!
//! let board = Board::from_queens(4, &[(0, 1), (1, 3), (2, 0), (3, 2)]).unwrap();
//! assert!(is_valid_solution(&board));
//!
//! let k4 = find_graph("Complete K4").unwrap();
//! assert!(greedy_coloring(&k4, 3).is_none());
//! assert!(greedy_coloring(&k4, 4).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// N-Queens boards and validation
pub mod board;

/// N-Queens solution enumeration
pub mod solutions;

/// Graph type and catalog
pub mod graph;

/// Graph coloring
pub mod coloring;

pub use board::{
    attacks, decode_queens, encode_queens, is_conflict_free, is_valid_bitstring,
    is_valid_solution, known_solution, Board, Queen,
};
pub use coloring::{
    assess_color_count, conflicts, greedy_coloring, is_valid_coloring, smallest_free_color,
    Color, ColorBudget, Coloring, UNCOLORED,
};
pub use graph::{catalog, catalog_names, find_graph, Edge, Graph};
pub use solutions::{all_solutions, permutation_boards, solution_count};

pub mod prelude {
    //! Convenient imports for common use cases

    pub use crate::board::{is_valid_bitstring, is_valid_solution, known_solution, Board, Queen};
    pub use crate::coloring::{
        assess_color_count, greedy_coloring, is_valid_coloring, ColorBudget, Coloring,
    };
    pub use crate::graph::{catalog, find_graph, Graph};
    pub use crate::solutions::all_solutions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_solutions_survive_bitstring_encoding() {
        for board in all_solutions(5).unwrap() {
            let bits = board.to_bitstring();
            assert_eq!(bits.popcount(), 5);
            assert!(is_valid_bitstring(5, &bits).unwrap());
        }
    }

    #[test]
    fn test_random_probes_rarely_solve() {
        let mut rng = StdRng::seed_from_u64(7);
        let solutions = all_solutions(4).unwrap();
        for _ in 0..20 {
            let board = Board::random(4, 4, &mut rng).unwrap();
            assert_eq!(is_valid_solution(&board), solutions.contains(&board));
        }
    }

    #[test]
    fn test_board_serde() {
        let board = Board::from_queens(4, &known_solution(4).unwrap()).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, back);
        assert!(json.starts_with("[[0,0,1,0],[1,0,0,0]"));
    }

    #[test]
    fn test_malformed_board_json_is_rejected() {
        for json in [
            "[]",
            "[[0,1],[1]]",
            "[[0,5],[1,0]]",
            "[[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0]]",
            r#"{"size":4,"cells":[]}"#,
        ] {
            assert!(serde_json::from_str::<Board>(json).is_err(), "{} accepted", json);
        }
    }

    #[test]
    fn test_coloring_catalog_summary() {
        let optimal = catalog()
            .iter()
            .filter(|g| assess_color_count(g, 3) == ColorBudget::Optimal)
            .count();
        // K3, pentagon, W4
        assert_eq!(optimal, 3);
    }
}
