//! Backend execution types and traits
//!
//! Defines the interface every execution backend implements.

use qpuzzle_core::search::{MAX_SHOTS, MIN_SHOTS};
use qpuzzle_core::{Circuit, Counts, QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Result of circuit execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Wall-clock execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Qubits in measurement order; character `j` of a bitstring is `measured[j]`
    pub measured: Vec<usize>,

    /// Additional info
    pub extra: HashMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Most frequent bitstring; ties go to the lexicographically smallest
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        most_frequent(&self.counts)
    }

    /// Outcomes by descending count, ties by ascending bitstring
    pub fn sorted_counts(&self) -> Vec<(&str, u64)> {
        sorted_counts(&self.counts)
    }

    /// Number of distinct outcomes observed
    pub fn unique_outcomes(&self) -> usize {
        self.counts.len()
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={})",
            self.metadata.backend,
            self.shots,
            self.counts.len()
        )?;
        if let Some((bs, count)) = self.most_frequent() {
            write!(f, " top={}x{}", bs, count)?;
        }
        Ok(())
    }
}

// ============================================================================
// Count Helpers
// ============================================================================

/// Most frequent bitstring in `counts`; ties go to the lexicographically smallest
pub fn most_frequent(counts: &Counts) -> Option<(&str, u64)> {
    counts
        .iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(bs, &count)| (bs.as_str(), count))
}

/// Outcomes by descending count, ties by ascending bitstring
pub fn sorted_counts(counts: &Counts) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.iter().map(|(bs, &c)| (bs.as_str(), c)).collect();
    entries.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
    entries
}

/// Check `shots` against the global range and a backend ceiling
pub fn validate_shots(shots: u64, backend_max: u64) -> QpuzzleResult<()> {
    let max = backend_max.min(MAX_SHOTS);
    if !(MIN_SHOTS..=max).contains(&shots) {
        return Err(QpuzzleError::ShotsOutOfRange(shots, MIN_SHOTS, max));
    }
    Ok(())
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Quantum backend trait
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Largest circuit width this backend accepts
    fn max_qubits(&self) -> usize;

    /// Execute a circuit
    fn execute(&self, circuit: &Circuit, shots: u64) -> QpuzzleResult<ExecutionResult>;

    /// Execute multiple circuits (batch)
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> QpuzzleResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Whether a circuit of `num_qubits` can run here
    fn supports(&self, num_qubits: usize) -> bool {
        num_qubits <= self.max_qubits()
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        MAX_SHOTS
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_counts() -> Counts {
        let mut counts = HashMap::new();
        counts.insert("000".to_string(), 400);
        counts.insert("001".to_string(), 100);
        counts.insert("010".to_string(), 100);
        counts.insert("011".to_string(), 100);
        counts.insert("100".to_string(), 100);
        counts.insert("101".to_string(), 50);
        counts.insert("110".to_string(), 100);
        counts.insert("111".to_string(), 50);
        counts
    }

    #[test]
    fn test_execution_result_new() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        assert_eq!(result.shots, 1000);
        assert_eq!(result.metadata.backend, "test");
        assert_eq!(result.total_counts(), 1000);
        assert_eq!(result.unique_outcomes(), 8);
    }

    #[test]
    fn test_probability() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        assert!((result.probability("000") - 0.4).abs() < 1e-10);
        assert!((result.probability("111") - 0.05).abs() < 1e-10);
        assert_eq!(result.probability("1111"), 0.0);
    }

    #[test]
    fn test_most_frequent() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");

        let (bs, count) = result.most_frequent().unwrap();
        assert_eq!(bs, "000");
        assert_eq!(count, 400);
    }

    #[test]
    fn test_most_frequent_tie_break() {
        let mut counts = HashMap::new();
        counts.insert("110".to_string(), 7);
        counts.insert("011".to_string(), 7);
        counts.insert("101".to_string(), 7);
        counts.insert("000".to_string(), 2);

        assert_eq!(most_frequent(&counts), Some(("011", 7)));
        assert_eq!(most_frequent(&HashMap::new()), None);
    }

    #[test]
    fn test_sorted_counts() {
        let result = ExecutionResult::new(make_test_counts(), 1000, "test");
        let sorted = result.sorted_counts();

        assert_eq!(sorted[0], ("000", 400));
        assert_eq!(sorted[1], ("001", 100));
        assert_eq!(sorted[5], ("110", 100));
        assert_eq!(sorted[6], ("101", 50));
        assert_eq!(sorted[7], ("111", 50));
    }

    #[test]
    fn test_validate_shots() {
        assert!(validate_shots(1, MAX_SHOTS).is_ok());
        assert!(validate_shots(MAX_SHOTS, MAX_SHOTS).is_ok());
        assert_eq!(
            validate_shots(0, MAX_SHOTS),
            Err(QpuzzleError::ShotsOutOfRange(0, 1, MAX_SHOTS))
        );
        assert!(validate_shots(500, 100).is_err());
    }
}
