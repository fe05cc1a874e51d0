//! # QPuzzle Core
//!
//! Foundation types, gates and circuits shared by the QPuzzle workspace.
//!
//! ## Architecture
//!
//! ```text
//! qpuzzle_core
//!     Foundation
//!         types      // Bitstring, Counts, QubitId
//!         constants  // board bounds, search defaults, simulator limits
//!         error      // QpuzzleError / QpuzzleResult
//!     Circuit
//!         gate       // Gate enum (incl. multi-controlled X)
//!         circuit    // Circuit: gate list, depth, op counts, QASM
//!         builder    // CircuitBuilder fluent API
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qpuzzle_core::prelude::*;
//!
//! // Phase-flip |11⟩ on two qubits
//! let circuit = CircuitBuilder::new(2)
//!     .h_layer()
//!     .mcz(vec![0], 1)
//!     .measure_all()
//!     .build();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Bitstrings
//!
//! ```rust
//! use qpuzzle_core::Bitstring;
//!
//! // Character i is qubit i
//! let bs = Bitstring::parse("0010").unwrap();
//! assert_eq!(bs.to_index(), 4);
//! assert_eq!(bs.ones().collect::<Vec<_>>(), vec![2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types
pub mod types;

/// Constants
pub mod constants;

/// Error types
pub mod error;

/// Quantum gates
pub mod gate;

/// Circuit structure
pub mod circuit;

/// Circuit builder
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use constants::{backend, board, search};
pub use error::{QpuzzleError, QpuzzleResult};
pub use gate::Gate;
pub use types::{Bitstring, Counts, QubitId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qpuzzle_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::constants::{backend, board, search};
    pub use crate::error::{QpuzzleError, QpuzzleResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Bitstring, Counts, QubitId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_grover_shaped_circuit() {
        // H layer, phase flip on |111⟩, inversion about the mean
        let n = 3;
        let circuit = CircuitBuilder::new(n)
            .h_layer()
            .mcz(vec![0, 1], 2)
            .h_layer()
            .x_layer()
            .mcz(vec![0, 1], 2)
            .x_layer()
            .h_layer()
            .measure_all()
            .build_validated()
            .unwrap();

        assert_eq!(circuit.count_multi(), 2);
        assert_eq!(circuit.count_ops().get("h"), Some(&13));
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_bitstring_matches_qubit_order() {
        let bs = Bitstring::from_ones(4, [0, 3]).unwrap();
        assert_eq!(bs.to_string(), "1001");
        assert_eq!(bs.to_index(), 0b1001);
    }

    #[test]
    fn test_qasm_lists_every_gate() {
        let circuit = CircuitBuilder::new(3)
            .h(0)
            .mcx(vec![0, 1], 2)
            .measure_all()
            .build();
        let qasm = circuit.to_qasm();
        assert!(qasm.contains("ccx q[0],q[1],q[2];"));
        assert!(qasm.ends_with("measure q -> c;"));
    }

    #[test]
    fn test_version_info() {
        assert_eq!(crate::NAME, "qpuzzle_core");
        assert!(!crate::VERSION.is_empty());
    }
}
