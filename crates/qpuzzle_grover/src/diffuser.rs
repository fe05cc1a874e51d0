//! Grover diffuser (inversion about the mean)

use qpuzzle_core::{Circuit, CircuitBuilder, QpuzzleError, QpuzzleResult};

/// H all, X all, multi-controlled Z onto the last qubit, X all, H all
pub fn diffuser(num_qubits: usize) -> QpuzzleResult<Circuit> {
    if num_qubits == 0 {
        return Err(QpuzzleError::InvalidOracle(
            "diffuser needs at least one qubit".into(),
        ));
    }
    let last = num_qubits - 1;
    CircuitBuilder::with_name(num_qubits, "diffuser")
        .h_layer()
        .x_layer()
        .mcz((0..last).collect(), last)
        .x_layer()
        .h_layer()
        .build_validated()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use qpuzzle_backend::StatevectorSimulator;

    #[test]
    fn test_gate_counts() {
        let d = diffuser(4).unwrap();
        assert_eq!(d.count_ops().get("h"), Some(&10));
        assert_eq!(d.count_ops().get("x"), Some(&8));
        assert_eq!(d.count_multi(), 1);
    }

    #[test]
    fn test_uniform_state_is_fixed_point() {
        // Inversion about the mean leaves the mean itself alone, up to global phase
        let n = 3;
        let circuit = CircuitBuilder::new(n)
            .h_layer()
            .append(&diffuser(n).unwrap())
            .build_validated()
            .unwrap();
        let probs = StatevectorSimulator::new().probabilities(&circuit).unwrap();
        for p in probs {
            assert_relative_eq!(p, 1.0 / 8.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_zero_width_rejected() {
        assert!(diffuser(0).is_err());
    }
}
