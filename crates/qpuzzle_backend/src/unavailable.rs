//! Explicit "no backend" stand-in and backend selection

use crate::execution::{Backend, ExecutionResult};
use crate::simulator::StatevectorSimulator;
use qpuzzle_core::{Circuit, QpuzzleError, QpuzzleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend that refuses every circuit with `BackendUnavailable`
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    name: String,
    reason: String,
}

impl UnavailableBackend {
    /// Create with the reason reported on every call
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Reason reported on every call
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl Backend for UnavailableBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_qubits(&self) -> usize {
        0
    }

    fn execute(&self, circuit: &Circuit, _shots: u64) -> QpuzzleResult<ExecutionResult> {
        log::warn!(
            "{}: refusing {}-qubit circuit ({})",
            self.name,
            circuit.num_qubits(),
            self.reason
        );
        Err(QpuzzleError::unavailable(&self.name, &self.reason))
    }

    fn is_simulator(&self) -> bool {
        false
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Which execution backend a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Built-in ideal simulator
    #[default]
    Statevector,
    /// No backend; every execution reports `BackendUnavailable`
    None,
}

impl BackendKind {
    /// Instantiate the backend
    pub fn build(self, max_qubits: usize, seed: Option<u64>) -> Box<dyn Backend> {
        log::info!("Selected backend: {}", self);
        match self {
            BackendKind::Statevector => Box::new(
                StatevectorSimulator::new()
                    .with_max_qubits(max_qubits)
                    .with_optional_seed(seed),
            ),
            BackendKind::None => Box::new(UnavailableBackend::new(
                "none",
                "no execution backend configured",
            )),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Statevector => write!(f, "statevector"),
            BackendKind::None => write!(f, "none"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = QpuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "statevector" | "simulator" => Ok(BackendKind::Statevector),
            "none" => Ok(BackendKind::None),
            other => Err(QpuzzleError::InvalidConfig(format!(
                "unknown backend '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qpuzzle_core::CircuitBuilder;

    #[test]
    fn test_unavailable_always_errors() {
        let backend = UnavailableBackend::new("offline", "no device");
        let circuit = CircuitBuilder::new(1).h(0).measure_all().build();

        let err = backend.execute(&circuit, 100).unwrap_err();
        assert_eq!(
            err,
            QpuzzleError::BackendUnavailable {
                backend: "offline".into(),
                reason: "no device".into()
            }
        );
        assert!(!backend.supports(1));
        assert!(backend.execute_batch(&[circuit], 10).is_err());
    }

    #[test]
    fn test_build_kinds() {
        let sim = BackendKind::Statevector.build(8, Some(1));
        assert_eq!(sim.max_qubits(), 8);
        assert!(sim.is_simulator());

        let none = BackendKind::None.build(8, None);
        let circuit = CircuitBuilder::new(1).x(0).build();
        assert!(none.execute(&circuit, 1).unwrap_err().is_backend_unavailable());
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("Statevector".parse::<BackendKind>().unwrap(), BackendKind::Statevector);
        assert_eq!("none".parse::<BackendKind>().unwrap(), BackendKind::None);
        assert!("qpu".parse::<BackendKind>().is_err());
    }
}
