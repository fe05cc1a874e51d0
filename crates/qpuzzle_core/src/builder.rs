//! Circuit builder for QPuzzle
//!
//! Fluent builder for constructing quantum circuits. Invalid gates are
//! recorded and surfaced by [`CircuitBuilder::build_validated`].

use crate::circuit::Circuit;
use crate::error::{QpuzzleError, QpuzzleResult};
use crate::gate::Gate;
use crate::types::QubitId;

/// Fluent circuit builder (consuming self pattern)
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First error raised while adding gates
    error: Option<QpuzzleError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    fn push(mut self, gate: Gate) -> Self {
        if let Err(e) = self.circuit.add_gate(gate) {
            self.error.get_or_insert(e);
        }
        self
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Gate::H(qubit))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Gate::X(qubit))
    }

    // ========================================================================
    // Controlled Gates
    // ========================================================================

    /// Add CNOT gate
    pub fn cnot(self, control: QubitId, target: QubitId) -> Self {
        self.push(Gate::Cnot(control, target))
    }

    /// Alias for cnot
    pub fn cx(self, control: QubitId, target: QubitId) -> Self {
        self.cnot(control, target)
    }

    /// Add Toffoli gate
    pub fn ccx(self, c1: QubitId, c2: QubitId, target: QubitId) -> Self {
        self.push(Gate::Ccx(c1, c2, target))
    }

    /// Add multi-controlled X gate
    pub fn mcx(self, controls: Vec<QubitId>, target: QubitId) -> Self {
        self.push(Gate::Mcx(controls, target))
    }

    /// Multi-controlled Z as H·MCX·H on the target
    pub fn mcz(self, controls: Vec<QubitId>, target: QubitId) -> Self {
        self.h(target).mcx(controls, target).h(target)
    }

    // ========================================================================
    // Layers
    // ========================================================================

    /// Hadamard on every qubit
    pub fn h_layer(self) -> Self {
        let n = self.circuit.num_qubits();
        self.h_on(0..n)
    }

    /// Pauli-X on every qubit
    pub fn x_layer(self) -> Self {
        let n = self.circuit.num_qubits();
        self.x_on(0..n)
    }

    /// Hadamard on the given qubits
    pub fn h_on(self, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        qubits.into_iter().fold(self, |b, q| b.h(q))
    }

    /// Pauli-X on the given qubits
    pub fn x_on(self, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        qubits.into_iter().fold(self, |b, q| b.x(q))
    }

    /// Append a whole sub-circuit of the same width
    pub fn append(mut self, other: &Circuit) -> Self {
        if let Err(e) = self.circuit.append(other) {
            self.error.get_or_insert(e);
        }
        self
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Measure a single qubit
    pub fn measure(self, qubit: QubitId) -> Self {
        self.push(Gate::Measure(qubit))
    }

    /// Measure all qubits
    pub fn measure_all(self) -> Self {
        self.push(Gate::MeasureAll)
    }

    /// Barrier across all qubits
    pub fn barrier(self) -> Self {
        self.push(Gate::Barrier(vec![]))
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the circuit, dropping any gate that failed validation
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build the circuit, returning the first validation error
    pub fn build_validated(self) -> QpuzzleResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }

    /// Peek at the circuit under construction
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================
