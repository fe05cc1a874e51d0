//! Phase oracles for Grover search
//!
//! Every oracle here flips the sign of a fixed set of basis states and
//! leaves all other amplitudes untouched. No ancilla qubits are used.

use qpuzzle_core::{Bitstring, Circuit, CircuitBuilder, QpuzzleError, QpuzzleResult};
use qpuzzle_puzzles::{all_solutions, known_solution, Board};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase-flip `|target⟩` on `target.len()` qubits
///
/// X on every qubit whose target bit is 0, a multi-controlled Z onto the
/// last qubit, then the X layer again.
pub fn marked_state_oracle(target: &Bitstring) -> QpuzzleResult<Circuit> {
    let n = target.len();
    if n == 0 {
        return Err(QpuzzleError::InvalidOracle(
            "marked state must have at least one bit".into(),
        ));
    }
    let zeros: Vec<usize> = (0..n).filter(|&q| target.get(q) == Some(false)).collect();

    CircuitBuilder::with_name(n, format!("oracle[{}]", target))
        .x_on(zeros.iter().copied())
        .mcz((0..n - 1).collect(), n - 1)
        .x_on(zeros)
        .build_validated()
}

/// Phase-flip every state in `targets`, one marked-state block each
pub fn multi_target_oracle(num_qubits: usize, targets: &[Bitstring]) -> QpuzzleResult<Circuit> {
    let mut circuit = Circuit::with_name(num_qubits, format!("oracle[{} marked]", targets.len()));
    for target in targets {
        if target.len() != num_qubits {
            return Err(QpuzzleError::BitstringLengthMismatch {
                expected: num_qubits,
                actual: target.len(),
            });
        }
        circuit.append(&marked_state_oracle(target)?)?;
    }
    Ok(circuit)
}

// ============================================================================
// N-Queens Oracles
// ============================================================================

/// Oracle construction used for an N-Queens search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// Mark the single known solution
    #[default]
    Simplified,
    /// Mark every board the validator accepts
    Constraint,
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Simplified => write!(f, "simplified"),
            OracleKind::Constraint => write!(f, "constraint"),
        }
    }
}

impl FromStr for OracleKind {
    type Err = QpuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplified" | "known" => Ok(OracleKind::Simplified),
            "constraint" | "all" => Ok(OracleKind::Constraint),
            other => Err(QpuzzleError::InvalidConfig(format!(
                "unknown oracle kind '{}'",
                other
            ))),
        }
    }
}

/// An oracle circuit together with the states it marks
#[derive(Debug, Clone)]
pub struct Oracle {
    /// Phase-flip circuit
    pub circuit: Circuit,

    /// Marked basis states
    pub marked: Vec<Bitstring>,
}

impl Oracle {
    /// Build from marked states
    pub fn from_marked(num_qubits: usize, marked: Vec<Bitstring>) -> QpuzzleResult<Self> {
        let circuit = multi_target_oracle(num_qubits, &marked)?;
        Ok(Self { circuit, marked })
    }

    /// Register width
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }

    /// Number of marked states
    pub fn num_marked(&self) -> usize {
        self.marked.len()
    }

    /// Nothing is marked; the circuit is the identity
    pub fn is_identity(&self) -> bool {
        self.marked.is_empty()
    }

    /// N-Queens oracle of the given kind on N² qubits
    pub fn nqueens(size: usize, kind: OracleKind) -> QpuzzleResult<Self> {
        Board::empty(size)?;
        let marked = match kind {
            OracleKind::Simplified => match known_solution(size) {
                Some(queens) => vec![Board::from_queens(size, &queens)?.to_bitstring()],
                None => Vec::new(),
            },
            OracleKind::Constraint => all_solutions(size)?
                .iter()
                .map(Board::to_bitstring)
                .collect(),
        };
        log::debug!(
            "{} oracle for N={}: {} marked state(s)",
            kind,
            size,
            marked.len()
        );
        Self::from_marked(size * size, marked)
    }
}

/// Oracle marking the known N-Queens solution; identity when none exists
pub fn nqueens_oracle(size: usize) -> QpuzzleResult<Circuit> {
    Oracle::nqueens(size, OracleKind::Simplified).map(|o| o.circuit)
}

/// Oracle marking every valid N-Queens board
pub fn constraint_oracle(size: usize) -> QpuzzleResult<Circuit> {
    Oracle::nqueens(size, OracleKind::Constraint).map(|o| o.circuit)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qpuzzle_backend::StatevectorSimulator;

    fn signs(circuit: &Circuit) -> Vec<f64> {
        let n = circuit.num_qubits();
        let prepared = CircuitBuilder::new(n).h_layer().append(circuit).build_validated().unwrap();
        let scale = ((1u64 << n) as f64).sqrt();
        StatevectorSimulator::new()
            .statevector(&prepared)
            .unwrap()
            .iter()
            .map(|a| a.re * scale)
            .collect()
    }

    #[test]
    fn test_marked_state_flips_only_target() {
        for target in ["101", "000", "111", "010"] {
            let bits = Bitstring::parse(target).unwrap();
            let s = signs(&marked_state_oracle(&bits).unwrap());
            for (index, sign) in s.iter().enumerate() {
                let expected = if index == bits.to_index() { -1.0 } else { 1.0 };
                assert_relative_eq!(*sign, expected, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_single_qubit_oracle() {
        let s = signs(&marked_state_oracle(&Bitstring::parse("1").unwrap()).unwrap());
        assert_relative_eq!(s[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(s[1], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_multi_target() {
        let targets = vec![
            Bitstring::parse("0011").unwrap(),
            Bitstring::parse("1100").unwrap(),
        ];
        let s = signs(&multi_target_oracle(4, &targets).unwrap());
        let negative: Vec<usize> = (0..16).filter(|&i| s[i] < 0.0).collect();
        assert_eq!(negative, vec![0b0011, 0b1100]);
    }

    #[test]
    fn test_empty_target_rejected() {
        assert!(marked_state_oracle(&Bitstring::zeros(0)).is_err());
        assert!(matches!(
            multi_target_oracle(3, &[Bitstring::parse("01").unwrap()]),
            Err(QpuzzleError::BitstringLengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_nqueens_oracle_is_identity_without_solution() {
        for n in [2, 3] {
            let oracle = Oracle::nqueens(n, OracleKind::Simplified).unwrap();
            assert!(oracle.is_identity());
            assert!(oracle.circuit.is_empty());
            assert_eq!(oracle.num_qubits(), n * n);
        }
    }

    #[test]
    fn test_nqueens_oracle_marks_known_solution() {
        let oracle = Oracle::nqueens(4, OracleKind::Simplified).unwrap();
        assert_eq!(oracle.num_marked(), 1);
        assert_eq!(oracle.marked[0].to_string(), "0010100000010100");
        assert_eq!(oracle.num_qubits(), 16);
    }

    #[test]
    fn test_constraint_oracle_marks_all_solutions() {
        let oracle = Oracle::nqueens(4, OracleKind::Constraint).unwrap();
        assert_eq!(oracle.num_marked(), 2);
        assert_eq!(oracle.circuit.count_multi(), 2);

        assert_eq!(constraint_oracle(1).unwrap().num_qubits(), 1);
        assert!(nqueens_oracle(7).is_err());
    }

    #[test]
    fn test_nqueens_oracle_rejects_board_size() {
        for kind in [OracleKind::Simplified, OracleKind::Constraint] {
            for size in [0, 7, 10] {
                assert!(matches!(
                    Oracle::nqueens(size, kind),
                    Err(QpuzzleError::BoardSizeOutOfRange { .. })
                ));
            }
        }
    }

    #[test]
    fn test_oracle_kind_parse() {
        assert_eq!("Constraint".parse::<OracleKind>().unwrap(), OracleKind::Constraint);
        assert_eq!("simplified".parse::<OracleKind>().unwrap(), OracleKind::Simplified);
        assert!("ancilla".parse::<OracleKind>().is_err());
    }
}
