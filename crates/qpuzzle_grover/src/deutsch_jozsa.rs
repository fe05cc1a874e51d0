//! Deutsch-Jozsa: constant or balanced in one query
//!
//! Inputs are qubits `0..n`, the ancilla is qubit `n`. Only the inputs are
//! measured, so outcome bitstrings have length `n`.

use qpuzzle_backend::{most_frequent, Backend, ExecutionResult};
use qpuzzle_core::{Bitstring, Circuit, CircuitBuilder, Counts, QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Promise function f: {0,1}^n -> {0,1}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DjOracle {
    /// f(x) = value for every x
    Constant(bool),
    /// f(x) = mask · x mod 2; the mask must be non-zero
    Balanced(Bitstring),
}

/// Answer of the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DjVerdict {
    /// f is constant
    Constant,
    /// f is balanced
    Balanced,
}

impl fmt::Display for DjVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjVerdict::Constant => write!(f, "constant"),
            DjVerdict::Balanced => write!(f, "balanced"),
        }
    }
}

impl DjOracle {
    /// The verdict a correct run must produce
    pub fn expected(&self) -> DjVerdict {
        match self {
            DjOracle::Constant(_) => DjVerdict::Constant,
            DjOracle::Balanced(_) => DjVerdict::Balanced,
        }
    }

    /// Classical evaluation of f
    pub fn evaluate(&self, x: &Bitstring) -> bool {
        match self {
            DjOracle::Constant(value) => *value,
            DjOracle::Balanced(mask) => {
                mask.ones().filter(|&q| x.get(q) == Some(true)).count() % 2 == 1
            }
        }
    }

    /// Check the oracle against an `n`-bit input register
    pub fn validate(&self, n: usize) -> QpuzzleResult<()> {
        if n == 0 {
            return Err(QpuzzleError::InvalidOracle(
                "Deutsch-Jozsa needs at least one input qubit".into(),
            ));
        }
        if let DjOracle::Balanced(mask) = self {
            if mask.len() != n {
                return Err(QpuzzleError::BitstringLengthMismatch {
                    expected: n,
                    actual: mask.len(),
                });
            }
            if mask.is_all_zeros() {
                return Err(QpuzzleError::InvalidOracle(
                    "an all-zero mask is constant, not balanced".into(),
                ));
            }
        }
        Ok(())
    }
}

impl fmt::Display for DjOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjOracle::Constant(value) => write!(f, "constant({})", u8::from(*value)),
            DjOracle::Balanced(mask) => write!(f, "balanced(mask={})", mask),
        }
    }
}

/// Full circuit on `n + 1` qubits
pub fn deutsch_jozsa_circuit(n: usize, oracle: &DjOracle) -> QpuzzleResult<Circuit> {
    oracle.validate(n)?;
    let ancilla = n;

    let mut builder = CircuitBuilder::with_name(n + 1, format!("deutsch-jozsa[{}]", oracle))
        .x(ancilla)
        .h(ancilla)
        .h_on(0..n)
        .barrier();
    builder = match oracle {
        DjOracle::Constant(true) => builder.x(ancilla),
        DjOracle::Constant(false) => builder,
        DjOracle::Balanced(mask) => mask.ones().fold(builder, |b, q| b.cnot(q, ancilla)),
    };
    (0..n)
        .fold(builder.barrier().h_on(0..n), |b, q| b.measure(q))
        .build_validated()
}

/// Verdict from input-register counts: all zeros means constant
pub fn classify(counts: &Counts) -> QpuzzleResult<DjVerdict> {
    let (winner, _) = most_frequent(counts).ok_or(QpuzzleError::EmptyCounts)?;
    let bits = Bitstring::parse(winner)?;
    Ok(if bits.is_all_zeros() {
        DjVerdict::Constant
    } else {
        DjVerdict::Balanced
    })
}

/// Result of one Deutsch-Jozsa run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DjOutcome {
    /// Oracle that was queried
    pub oracle: DjOracle,

    /// Algorithm's answer
    pub verdict: DjVerdict,

    /// Raw execution result
    pub result: ExecutionResult,
}

impl DjOutcome {
    /// The verdict matches the oracle's promise
    pub fn is_correct(&self) -> bool {
        self.verdict == self.oracle.expected()
    }
}

/// Build, execute and classify
pub fn run_deutsch_jozsa<B: Backend + ?Sized>(
    n: usize,
    oracle: &DjOracle,
    backend: &B,
    shots: u64,
) -> QpuzzleResult<DjOutcome> {
    let circuit = deutsch_jozsa_circuit(n, oracle)?;
    log::info!(
        "Deutsch-Jozsa: {} input qubits, oracle {}, {} shots on {}",
        n,
        oracle,
        shots,
        backend.name()
    );
    let result = backend.execute(&circuit, shots)?;
    let verdict = classify(&result.counts)?;
    log::info!("Deutsch-Jozsa verdict: {}", verdict);
    Ok(DjOutcome {
        oracle: oracle.clone(),
        verdict,
        result,
    })
}

// ============================================================================
// Tests
// ============================================================================
