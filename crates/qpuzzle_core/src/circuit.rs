//! Quantum circuit structure for QPuzzle
//!
//! A circuit is a width plus an ordered gate list. Oracles, diffusers and
//! full search circuits are all plain `Circuit`s composed with [`Circuit::append`].

use crate::error::{QpuzzleError, QpuzzleResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Quantum circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> QpuzzleResult<Self> {
        let mut circuit = Self::new(num_qubits);
        circuit.add_gates(gates)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    pub fn add_gate(&mut self, gate: Gate) -> QpuzzleResult<()> {
        self.check_gate(&gate)?;
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QpuzzleResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Append every gate of `other` (same width required)
    pub fn append(&mut self, other: &Circuit) -> QpuzzleResult<()> {
        if other.num_qubits != self.num_qubits {
            return Err(QpuzzleError::WidthMismatch {
                this: self.num_qubits,
                other: other.num_qubits,
            });
        }
        self.gates.extend(other.gates.iter().cloned());
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set circuit name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Check if circuit ends with a measurement of any kind
    pub fn has_measurements(&self) -> bool {
        self.gates.iter().any(|g| g.is_measurement())
    }

    /// Qubits measured by the circuit, ascending; every qubit for `MeasureAll`
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        if self.gates.iter().any(|g| matches!(g, Gate::MeasureAll)) {
            return (0..self.num_qubits).collect();
        }
        let mut measured: Vec<QubitId> = self
            .gates
            .iter()
            .filter_map(|g| match g {
                Gate::Measure(q) => Some(*q),
                _ => None,
            })
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        measured.sort_unstable();
        measured
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path, barriers excluded)
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for gate in self.gates.iter().filter(|g| !g.is_barrier()) {
            let qubits = gate.qubits();
            if qubits.is_empty() {
                // MeasureAll touches every qubit
                let max_depth = qubit_depths.iter().copied().max().unwrap_or(0);
                qubit_depths.iter_mut().for_each(|d| *d = max_depth + 1);
            } else {
                let max_depth = qubits
                    .iter()
                    .filter_map(|&q| qubit_depths.get(q))
                    .max()
                    .copied()
                    .unwrap_or(0);
                for &q in &qubits {
                    if let Some(d) = qubit_depths.get_mut(q) {
                        *d = max_depth + 1;
                    }
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-qubit gates
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Count gates on three or more qubits
    pub fn count_multi(&self) -> usize {
        self.gates.iter().filter(|g| g.is_multi_qubit()).count()
    }

    /// Gate histogram by name, sorted by name
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut ops = BTreeMap::new();
        for gate in &self.gates {
            *ops.entry(gate.name()).or_insert(0) += 1;
        }
        ops
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_gate(&self, gate: &Gate) -> QpuzzleResult<()> {
        let qubits = gate.qubits();
        let mut seen = HashSet::with_capacity(qubits.len());
        for &qubit in &qubits {
            if qubit >= self.num_qubits {
                return Err(QpuzzleError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
            if !gate.is_barrier() && !seen.insert(qubit) {
                return Err(QpuzzleError::DuplicateQubit(qubit));
            }
        }
        Ok(())
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 2.0;".to_string(),
            "include \"qelib1.inc\";".to_string(),
            String::new(),
            format!("qreg q[{}];", self.num_qubits),
            format!("creg c[{}];", self.num_qubits),
            String::new(),
        ];
        lines.extend(self.gates.iter().map(Gate::to_qasm));
        lines.join("\n")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => writeln!(
                f,
                "Circuit '{}' ({} qubits, {} gates)",
                name,
                self.num_qubits,
                self.gates.len()
            )?,
            None => writeln!(
                f,
                "Circuit({} qubits, {} gates)",
                self.num_qubits,
                self.gates.len()
            )?,
        }
        writeln!(f, "  Depth: {}", self.depth())?;
        let ops: Vec<String> = self
            .count_ops()
            .iter()
            .map(|(name, n)| format!("{}={}", name, n))
            .collect();
        writeln!(f, "  Ops: {}", ops.join(", "))?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
