//! # QPuzzle Backend
//!
//! Execution backends for QPuzzle circuits.
//!
//! ## Architecture
//!
//! ```text
//! qpuzzle_backend
//!     execution    // Backend trait, ExecutionResult, count helpers
//!     simulator    // StatevectorSimulator (ideal, qubit-limited)
//!     unavailable  // UnavailableBackend, BackendKind selection
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qpuzzle_backend::prelude::*;
//! use qpuzzle_core::CircuitBuilder;
//!
//! let backend = StatevectorSimulator::new().with_seed(42);
//!
//! let circuit = CircuitBuilder::new(3)
//!     .h(0)
//!     .cnot(0, 1)
//!     .cnot(1, 2)
//!     .measure_all()
//!     .build();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! println!("P(000) = {:.3}", result.probability("000"));
//! ```
//!
//! ## Qubit Limit
//!
//! Circuits wider than the limit are refused rather than approximated:
//!
//! ```rust
//! use qpuzzle_backend::prelude::*;
//! use qpuzzle_core::CircuitBuilder;
//!
//! let backend = StatevectorSimulator::new().with_max_qubits(4);
//! let wide = CircuitBuilder::new(16).h_layer().measure_all().build();
//!
//! let err = backend.execute(&wide, 100).unwrap_err();
//! assert!(err.is_backend_unavailable());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait
pub mod execution;

/// State-vector simulator
pub mod simulator;

/// Unavailable backend and backend selection
pub mod unavailable;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{
    most_frequent, sorted_counts, validate_shots, Backend, ExecutionMetadata, ExecutionResult,
};
pub use simulator::StatevectorSimulator;
pub use unavailable::{BackendKind, UnavailableBackend};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qpuzzle_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::StatevectorSimulator;
    pub use crate::unavailable::{BackendKind, UnavailableBackend};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qpuzzle_core::CircuitBuilder;

    #[test]
    fn test_ghz_outcomes() {
        let backend = StatevectorSimulator::new().with_seed(42);
        let circuit = CircuitBuilder::new(4)
            .h(0)
            .cnot(0, 1)
            .cnot(1, 2)
            .cnot(2, 3)
            .measure_all()
            .build();

        let result = backend.execute(&circuit, 1000).unwrap();

        assert_eq!(result.unique_outcomes(), 2);
        assert_eq!(
            result.counts.get("0000").copied().unwrap_or(0)
                + result.counts.get("1111").copied().unwrap_or(0),
            1000
        );
    }

    #[test]
    fn test_batch_execution() {
        let backend = StatevectorSimulator::new().with_seed(42);

        let circuits: Vec<_> = (0..5)
            .map(|i| CircuitBuilder::new(2).h(i % 2).build())
            .collect();

        let results = backend.execute_batch(&circuits, 100).unwrap();

        assert_eq!(results.len(), 5);
        for result in &results {
            assert_eq!(result.shots, 100);
        }
    }

    #[test]
    fn test_trait_object_dispatch() {
        let backends: Vec<Box<dyn Backend>> = vec![
            BackendKind::Statevector.build(6, Some(7)),
            BackendKind::None.build(6, Some(7)),
        ];
        let circuit = CircuitBuilder::new(2).x(1).measure_all().build();

        let outcomes: Vec<bool> = backends
            .iter()
            .map(|b| b.execute(&circuit, 10).is_ok())
            .collect();
        assert_eq!(outcomes, vec![true, false]);
    }

    #[test]
    fn test_result_serializes() {
        let backend = StatevectorSimulator::new().with_seed(9);
        let circuit = CircuitBuilder::new(1).x(0).measure_all().build();
        let result = backend.execute(&circuit, 5).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: ExecutionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counts, result.counts);
        assert_eq!(back.metadata.measured, vec![0]);
    }
}
