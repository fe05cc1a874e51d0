//! Quantum gate definitions for QPuzzle
//!
//! The gate set needed by Grover search and Deutsch-Jozsa circuits.

use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    H(QubitId),

    /// Pauli-X gate (NOT)
    X(QubitId),

    // ========================================================================
    // Controlled Gates
    // ========================================================================
    /// Controlled-NOT (CX)
    Cnot(QubitId, QubitId),

    /// Toffoli (CCX)
    Ccx(QubitId, QubitId, QubitId),

    /// Multi-controlled X: flips the target when every control is |1⟩
    Mcx(Vec<QubitId>, QubitId),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Single qubit measurement
    Measure(QubitId),

    /// Measure all qubits
    MeasureAll,

    /// Barrier (visual separation only)
    Barrier(Vec<QubitId>),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate (controls first, target last)
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Measure(q) => vec![*q],

            Gate::Cnot(c, t) => vec![*c, *t],

            Gate::Ccx(c1, c2, t) => vec![*c1, *c2, *t],

            Gate::Mcx(controls, t) => {
                let mut qs = controls.clone();
                qs.push(*t);
                qs
            }

            Gate::MeasureAll => vec![],
            Gate::Barrier(qs) => qs.clone(),
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        matches!(self, Gate::H(_) | Gate::X(_))
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cnot(_, _))
    }

    /// Check if gate acts on three or more qubits
    pub fn is_multi_qubit(&self) -> bool {
        match self {
            Gate::Ccx(_, _, _) => true,
            Gate::Mcx(controls, _) => controls.len() >= 2,
            _ => false,
        }
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_) | Gate::MeasureAll)
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Check if gate changes the state vector
    pub fn is_unitary(&self) -> bool {
        !self.is_measurement() && !self.is_barrier()
    }

    /// Get gate name
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Cnot(_, _) => "cx",
            Gate::Ccx(_, _, _) => "ccx",
            Gate::Mcx(_, _) => "mcx",
            Gate::Measure(_) | Gate::MeasureAll => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::H(q) => format!("h q[{}];", q),
            Gate::X(q) => format!("x q[{}];", q),

            Gate::Cnot(c, t) => format!("cx q[{}],q[{}];", c, t),
            Gate::Ccx(c1, c2, t) => format!("ccx q[{}],q[{}],q[{}];", c1, c2, t),
            Gate::Mcx(controls, t) => match controls.as_slice() {
                [] => format!("x q[{}];", t),
                [c] => format!("cx q[{}],q[{}];", c, t),
                [c1, c2] => format!("ccx q[{}],q[{}],q[{}];", c1, c2, t),
                _ => {
                    let args: Vec<String> = self.qubits().iter().map(|q| format!("q[{}]", q)).collect();
                    format!("mcx {};", args.join(","))
                }
            },

            Gate::Measure(q) => format!("measure q[{}] -> c[{}];", q, q),
            Gate::MeasureAll => "measure q -> c;".to_string(),
            Gate::Barrier(qs) => {
                if qs.is_empty() {
                    "barrier q;".to_string()
                } else {
                    let qubits: Vec<String> = qs.iter().map(|q| format!("q[{}]", q)).collect();
                    format!("barrier {};", qubits.join(","))
                }
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================
