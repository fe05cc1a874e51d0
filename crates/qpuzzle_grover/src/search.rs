//! Grover search assembly and execution

use crate::diffuser::diffuser;
use crate::oracle::Oracle;
use qpuzzle_backend::{Backend, ExecutionResult};
use qpuzzle_core::search::{
    optimal_iterations, success_probability, LEGACY_ITERATIONS_LARGE, LEGACY_ITERATIONS_SMALL,
    MAX_ITERATIONS,
};
use qpuzzle_core::{Circuit, CircuitBuilder, QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many oracle+diffuser rounds to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IterationPolicy {
    /// Exactly this many rounds
    Fixed(usize),
    /// 1 round for boards up to 4x4, 2 otherwise
    Legacy,
    /// floor(pi/4 * sqrt(2^q / M)), at least 1
    #[default]
    Optimal,
}

impl IterationPolicy {
    /// Rounds for a `num_qubits` register with `num_marked` solutions
    pub fn iterations(self, num_qubits: usize, num_marked: usize) -> usize {
        match self {
            IterationPolicy::Fixed(k) => k,
            // Boards up to 4x4 have at most 16 cells
            IterationPolicy::Legacy => {
                if num_qubits <= 16 {
                    LEGACY_ITERATIONS_SMALL
                } else {
                    LEGACY_ITERATIONS_LARGE
                }
            }
            IterationPolicy::Optimal => optimal_iterations(num_qubits, num_marked),
        }
    }
}

impl fmt::Display for IterationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IterationPolicy::Fixed(k) => write!(f, "fixed({})", k),
            IterationPolicy::Legacy => write!(f, "legacy"),
            IterationPolicy::Optimal => write!(f, "optimal"),
        }
    }
}

impl FromStr for IterationPolicy {
    type Err = QpuzzleError;

    /// `optimal`, `legacy`, or a round count
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimal" => Ok(IterationPolicy::Optimal),
            "legacy" => Ok(IterationPolicy::Legacy),
            other => other.parse().map(IterationPolicy::Fixed).map_err(|_| {
                QpuzzleError::InvalidConfig(format!("unknown iteration policy '{}'", other))
            }),
        }
    }
}

/// Outcome of one Grover run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Rounds applied
    pub iterations: usize,

    /// Predicted probability of measuring a marked state
    pub predicted_success: f64,

    /// Fraction of shots that landed on a marked state
    pub observed_success: f64,

    /// Circuit that was executed
    pub circuit: Circuit,

    /// Raw execution result
    pub result: ExecutionResult,
}

/// A Grover search over a phase oracle
#[derive(Debug, Clone)]
pub struct GroverSearch {
    oracle: Oracle,
    policy: IterationPolicy,
}

impl GroverSearch {
    /// Search with the default (optimal) iteration policy
    pub fn new(oracle: Oracle) -> Self {
        Self {
            oracle,
            policy: IterationPolicy::default(),
        }
    }

    /// Set iteration policy
    pub fn with_policy(mut self, policy: IterationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The oracle
    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Register width
    pub fn num_qubits(&self) -> usize {
        self.oracle.num_qubits()
    }

    /// Number of marked states
    pub fn num_marked(&self) -> usize {
        self.oracle.num_marked()
    }

    /// Rounds under the configured policy
    pub fn iterations(&self) -> usize {
        self.policy.iterations(self.num_qubits(), self.num_marked())
    }

    /// Theoretical success probability
    pub fn success_probability(&self) -> f64 {
        success_probability(self.num_qubits(), self.num_marked(), self.iterations())
    }

    /// H layer, `iterations` × (oracle, diffuser), measure all
    pub fn circuit(&self) -> QpuzzleResult<Circuit> {
        let n = self.num_qubits();
        let iterations = self.iterations();
        if iterations > MAX_ITERATIONS {
            return Err(QpuzzleError::InvalidConfig(format!(
                "{} Grover iterations exceed the limit of {}",
                iterations, MAX_ITERATIONS
            )));
        }
        let diffuser = diffuser(n)?;
        let mut builder = CircuitBuilder::with_name(n, "grover").h_layer();
        for _ in 0..iterations {
            builder = builder.append(&self.oracle.circuit).append(&diffuser);
        }
        builder.measure_all().build_validated()
    }

    /// Build, execute and score the search
    pub fn run<B: Backend + ?Sized>(&self, backend: &B, shots: u64) -> QpuzzleResult<SearchOutcome> {
        let n = self.num_qubits();
        if !backend.supports(n) {
            log::warn!(
                "{} cannot run a {}-qubit search (limit {})",
                backend.name(),
                n,
                backend.max_qubits()
            );
            return Err(QpuzzleError::unavailable(
                backend.name(),
                format!("search needs {} qubits, limit is {}", n, backend.max_qubits()),
            ));
        }

        let iterations = self.iterations();
        log::info!(
            "Grover search: {} qubits, {} marked, {} iteration(s) [{}], {} shots on {}",
            n,
            self.num_marked(),
            iterations,
            self.policy,
            shots,
            backend.name()
        );

        let circuit = self.circuit()?;
        let result = backend.execute(&circuit, shots)?;
        let hits: u64 = self
            .oracle
            .marked
            .iter()
            .filter_map(|m| result.counts.get(&m.to_string()))
            .sum();
        let observed_success = hits as f64 / shots as f64;

        log::info!(
            "Grover search finished: observed success {:.3}, predicted {:.3}",
            observed_success,
            self.success_probability()
        );

        Ok(SearchOutcome {
            iterations,
            predicted_success: self.success_probability(),
            observed_success,
            circuit,
            result,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
