//! # QPuzzle Grover
//!
//! Oracle and diffuser construction, Grover search assembly, reading
//! N-Queens answers out of counts, and the Deutsch-Jozsa algorithm.
//!
//! ## Architecture
//!
//! ```text
//! qpuzzle_grover
//!     oracle         // marked-state, simplified and constraint oracles
//!     diffuser       // inversion about the mean
//!     search         // IterationPolicy, GroverSearch, SearchOutcome
//!     interpret      // interpret_counts, top_results
//!     deutsch_jozsa  // DjOracle, circuit, classify
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qpuzzle_grover::prelude::*;
//! use qpuzzle_backend::StatevectorSimulator;
//! use qpuzzle_core::Bitstring;
//!
//! let target = Bitstring::parse("101").unwrap();
//! let oracle = Oracle::from_marked(3, vec![target]).unwrap();
//! let search = GroverSearch::new(oracle);
//!
//! let backend = StatevectorSimulator::new().with_seed(42);
//! let outcome = search.run(&backend, 1000).unwrap();
//! assert_eq!(outcome.result.most_frequent().unwrap().0, "101");
//! ```
//!
//! ## Iterations
//!
//! | Policy | Rounds |
//! |---|---|
//! | `Fixed(k)` | k |
//! | `Legacy` | 1 up to 16 qubits, else 2 |
//! | `Optimal` | floor(pi/4 * sqrt(2^q / M)), at least 1 |

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Phase oracles
pub mod oracle;

/// Grover diffuser
pub mod diffuser;

/// Grover search
pub mod search;

/// Result interpretation
pub mod interpret;

/// Deutsch-Jozsa algorithm
pub mod deutsch_jozsa;

// ============================================================================
// Re-exports
// ============================================================================

pub use deutsch_jozsa::{
    classify, deutsch_jozsa_circuit, run_deutsch_jozsa, DjOracle, DjOutcome, DjVerdict,
};
pub use diffuser::diffuser;
pub use interpret::{interpret_counts, top_results, Interpretation, RankedOutcome};
pub use oracle::{
    constraint_oracle, marked_state_oracle, multi_target_oracle, nqueens_oracle, Oracle,
    OracleKind,
};
pub use search::{GroverSearch, IterationPolicy, SearchOutcome};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports

    pub use crate::deutsch_jozsa::{run_deutsch_jozsa, DjOracle, DjVerdict};
    pub use crate::interpret::{interpret_counts, top_results, Interpretation};
    pub use crate::oracle::{Oracle, OracleKind};
    pub use crate::search::{GroverSearch, IterationPolicy, SearchOutcome};
}

// ============================================================================
// Integration Tests
// ============================================================================
