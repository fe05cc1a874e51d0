//! Ideal state-vector simulator
//!
//! Evolves the full state once, then samples every shot from the final
//! distribution. Measurements are deferred to the end of the circuit.
//! Qubit `q` is bit `q` of the basis index, and character `j` of an output
//! bitstring is the `j`-th measured qubit in ascending order.

use crate::execution::{validate_shots, Backend, ExecutionMetadata, ExecutionResult};
use num_complex::Complex64;
use qpuzzle_core::backend::{AMPLITUDE_EPSILON, DEFAULT_MAX_QUBITS, HARD_MAX_QUBITS};
use qpuzzle_core::{Circuit, Counts, Gate, QpuzzleError, QpuzzleResult};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::f64::consts::FRAC_1_SQRT_2;
use std::time::Instant;

/// Noiseless state-vector simulator with a qubit limit
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    /// Backend name
    name: String,

    /// Widest circuit accepted
    max_qubits: usize,

    /// Random seed for shot sampling
    seed: Option<u64>,
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatevectorSimulator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Simulator with the default qubit limit
    pub fn new() -> Self {
        Self {
            name: "statevector".to_string(),
            max_qubits: DEFAULT_MAX_QUBITS,
            seed: None,
        }
    }

    /// Set the qubit limit, capped at [`HARD_MAX_QUBITS`]
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits.min(HARD_MAX_QUBITS);
        self
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set seed if one is given
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Configured seed
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Final state of `circuit` starting from |0...0⟩
    pub fn statevector(&self, circuit: &Circuit) -> QpuzzleResult<Vec<Complex64>> {
        self.check_width(circuit.num_qubits())?;

        let n = circuit.num_qubits();
        let mut state = vec![Complex64::new(0.0, 0.0); 1 << n];
        state[0] = Complex64::new(1.0, 0.0);

        for gate in circuit.gates() {
            apply_gate(&mut state, gate);
        }
        Ok(state)
    }

    /// Probability of each basis index in the final state
    pub fn probabilities(&self, circuit: &Circuit) -> QpuzzleResult<Vec<f64>> {
        Ok(self
            .statevector(circuit)?
            .iter()
            .map(|a| a.norm_sqr())
            .collect())
    }

    /// Probability of each measured outcome, keyed by bitstring
    pub fn outcome_distribution(&self, circuit: &Circuit) -> QpuzzleResult<HashMap<String, f64>> {
        let measured = measured_or_all(circuit);
        let mut dist: HashMap<String, f64> = HashMap::new();
        for (index, p) in self.probabilities(circuit)?.into_iter().enumerate() {
            if p > AMPLITUDE_EPSILON {
                *dist.entry(project(index, &measured)).or_insert(0.0) += p;
            }
        }
        Ok(dist)
    }

    fn check_width(&self, num_qubits: usize) -> QpuzzleResult<()> {
        if num_qubits > self.max_qubits {
            return Err(QpuzzleError::unavailable(
                &self.name,
                format!(
                    "circuit needs {} qubits, simulator limit is {}",
                    num_qubits, self.max_qubits
                ),
            ));
        }
        Ok(())
    }

    /// Sample `shots` outcomes from the final distribution
    fn sample(&self, circuit: &Circuit, shots: u64, rng: &mut StdRng) -> QpuzzleResult<Counts> {
        let measured = measured_or_all(circuit);
        let probs = self.probabilities(circuit)?;
        let dist = WeightedIndex::new(&probs)
            .map_err(|e| QpuzzleError::BackendError(format!("invalid final state: {}", e)))?;

        let mut by_index: HashMap<usize, u64> = HashMap::new();
        for _ in 0..shots {
            *by_index.entry(dist.sample(rng)).or_insert(0) += 1;
        }

        let mut counts: Counts = HashMap::new();
        for (index, count) in by_index {
            *counts.entry(project(index, &measured)).or_insert(0) += count;
        }
        Ok(counts)
    }
}

impl Backend for StatevectorSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QpuzzleResult<ExecutionResult> {
        self.check_width(circuit.num_qubits())?;
        validate_shots(shots, self.max_shots())?;

        log::debug!(
            "{}: simulating {} qubits, {} gates, {} shots",
            self.name,
            circuit.num_qubits(),
            circuit.gate_count(),
            shots
        );

        let started = Instant::now();
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let counts = self.sample(circuit, shots, &mut rng)?;
        let elapsed = started.elapsed().as_millis() as u64;

        log::debug!(
            "{}: {} distinct outcomes in {} ms",
            self.name,
            counts.len(),
            elapsed
        );

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                execution_time_ms: Some(elapsed),
                simulated: true,
                seed: self.seed,
                measured: measured_or_all(circuit),
                ..Default::default()
            },
        })
    }
}

// ============================================================================
// Measurement Helpers
// ============================================================================

/// Measured qubits, or every qubit when the circuit has no measurement
fn measured_or_all(circuit: &Circuit) -> Vec<usize> {
    if circuit.has_measurements() {
        circuit.measured_qubits()
    } else {
        (0..circuit.num_qubits()).collect()
    }
}

/// Bitstring of `index` restricted to `measured`
fn project(index: usize, measured: &[usize]) -> String {
    measured
        .iter()
        .map(|&q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

// ============================================================================
// Gate Application
// ============================================================================

fn apply_gate(state: &mut [Complex64], gate: &Gate) {
    match gate {
        Gate::H(q) => apply_single(state, *q, |a, b| {
            ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
        }),
        Gate::X(q) => apply_single(state, *q, |a, b| (b, a)),
        Gate::Cnot(c, t) => apply_controlled_x(state, &[*c], *t),
        Gate::Ccx(c1, c2, t) => apply_controlled_x(state, &[*c1, *c2], *t),
        Gate::Mcx(controls, t) => apply_controlled_x(state, controls, *t),
        Gate::Measure(_) | Gate::MeasureAll | Gate::Barrier(_) => {}
    }
}

fn apply_single<F>(state: &mut [Complex64], q: usize, f: F)
where
    F: Fn(Complex64, Complex64) -> (Complex64, Complex64),
{
    let mask = 1 << q;
    for index in 0..state.len() {
        if index & mask == 0 {
            let j = index | mask;
            let (a, b) = f(state[index], state[j]);
            state[index] = a;
            state[j] = b;
        }
    }
}

fn apply_controlled_x(state: &mut [Complex64], controls: &[usize], target: usize) {
    let control_mask = controls.iter().fold(0usize, |m, &c| m | (1 << c));
    let target_mask = 1 << target;
    for index in 0..state.len() {
        if index & control_mask == control_mask && index & target_mask == 0 {
            state.swap(index, index | target_mask);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
