//! Demo configuration
//!
//! One serde struct covers every demo; the `problem` field picks which one
//! runs and the other problem-specific fields are ignored.

use qpuzzle_backend::BackendKind;
use qpuzzle_core::backend::{DEFAULT_MAX_QUBITS, HARD_MAX_QUBITS};
use qpuzzle_core::board::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use qpuzzle_core::search::{DEFAULT_SHOTS, MAX_ITERATIONS, MAX_SHOTS, MIN_SHOTS};
use qpuzzle_core::{Bitstring, QpuzzleError, QpuzzleResult};
use qpuzzle_grover::{DjOracle, IterationPolicy, OracleKind};
use qpuzzle_puzzles::find_graph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Which puzzle a demo solves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Problem {
    /// N-Queens with Grover search
    #[default]
    NQueens,
    /// Graph coloring
    GraphColoring,
    /// Deutsch-Jozsa
    DeutschJozsa,
}

impl Problem {
    /// Every problem, in menu order
    pub const ALL: [Problem; 3] = [
        Problem::NQueens,
        Problem::GraphColoring,
        Problem::DeutschJozsa,
    ];
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::NQueens => write!(f, "n-queens"),
            Problem::GraphColoring => write!(f, "graph-coloring"),
            Problem::DeutschJozsa => write!(f, "deutsch-jozsa"),
        }
    }
}

impl FromStr for Problem {
    type Err = QpuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n-queens" | "nqueens" | "queens" => Ok(Problem::NQueens),
            "graph-coloring" | "coloring" => Ok(Problem::GraphColoring),
            "deutsch-jozsa" | "dj" => Ok(Problem::DeutschJozsa),
            other => Err(QpuzzleError::InvalidConfig(format!(
                "unknown problem '{}'",
                other
            ))),
        }
    }
}

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    // ========================================================================
    // Problem
    // ========================================================================
    /// Which demo runs
    pub problem: Problem,

    /// N-Queens board size
    pub board_size: usize,

    /// N-Queens oracle construction
    pub oracle: OracleKind,

    /// Catalog graph name
    pub graph: String,

    /// Number of colors offered
    pub colors: usize,

    /// Deutsch-Jozsa input qubits
    pub dj_qubits: usize,

    /// Deutsch-Jozsa oracle
    pub dj_oracle: DjOracle,

    // ========================================================================
    // Execution
    // ========================================================================
    /// Measurement shots
    pub shots: u64,

    /// Random seed for sampling and random boards
    pub seed: Option<u64>,

    /// Grover iteration policy
    pub iterations: IterationPolicy,

    /// Simulator qubit limit
    pub max_qubits: usize,

    /// Execution backend
    pub backend: BackendKind,
}

impl DemoConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// N-Queens demo on an N×N board
    pub fn nqueens(board_size: usize) -> Self {
        Self {
            problem: Problem::NQueens,
            board_size,
            ..Self::default()
        }
    }

    /// Coloring demo for a catalog graph with `colors` colors
    pub fn coloring(graph: impl Into<String>, colors: usize) -> Self {
        Self {
            problem: Problem::GraphColoring,
            graph: graph.into(),
            colors,
            ..Self::default()
        }
    }

    /// Deutsch-Jozsa demo
    pub fn deutsch_jozsa(dj_qubits: usize, dj_oracle: DjOracle) -> Self {
        Self {
            problem: Problem::DeutschJozsa,
            dj_qubits,
            dj_oracle,
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set Grover iteration policy
    pub fn with_iterations(mut self, iterations: IterationPolicy) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set N-Queens oracle construction
    pub fn with_oracle(mut self, oracle: OracleKind) -> Self {
        self.oracle = oracle;
        self
    }

    /// Set simulator qubit limit
    pub fn with_max_qubits(mut self, max_qubits: usize) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set execution backend
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate the fields the selected problem uses
    pub fn validate(&self) -> QpuzzleResult<()> {
        if !(MIN_SHOTS..=MAX_SHOTS).contains(&self.shots) {
            return Err(QpuzzleError::InvalidConfig(format!(
                "shots must be in [{}, {}], got {}",
                MIN_SHOTS, MAX_SHOTS, self.shots
            )));
        }

        if self.max_qubits > HARD_MAX_QUBITS {
            return Err(QpuzzleError::InvalidConfig(format!(
                "max_qubits must be <= {}, got {}",
                HARD_MAX_QUBITS, self.max_qubits
            )));
        }

        match self.problem {
            Problem::NQueens => {
                if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
                    return Err(QpuzzleError::InvalidConfig(format!(
                        "board_size must be in [{}, {}], got {}",
                        MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
                    )));
                }
                if let IterationPolicy::Fixed(k) = self.iterations {
                    if k > MAX_ITERATIONS {
                        return Err(QpuzzleError::InvalidConfig(format!(
                            "iterations must be <= {}, got {}",
                            MAX_ITERATIONS, k
                        )));
                    }
                }
            }
            Problem::GraphColoring => {
                find_graph(&self.graph)
                    .map_err(|e| QpuzzleError::InvalidConfig(e.to_string()))?;
                if self.colors == 0 {
                    return Err(QpuzzleError::InvalidConfig("colors must be > 0".into()));
                }
            }
            Problem::DeutschJozsa => {
                if self.dj_qubits >= HARD_MAX_QUBITS {
                    return Err(QpuzzleError::InvalidConfig(format!(
                        "dj_qubits must be < {}, got {}",
                        HARD_MAX_QUBITS, self.dj_qubits
                    )));
                }
                self.dj_oracle
                    .validate(self.dj_qubits)
                    .map_err(|e| QpuzzleError::InvalidConfig(e.to_string()))?;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> QpuzzleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QpuzzleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> QpuzzleResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading config from {}", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Save as a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> QpuzzleResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            problem: Problem::NQueens,
            board_size: 4,
            oracle: OracleKind::Simplified,
            graph: "Square Cycle".to_string(),
            colors: 2,
            dj_qubits: 3,
            dj_oracle: DjOracle::Balanced(Bitstring::new(vec![true, false, true])),
            shots: DEFAULT_SHOTS,
            seed: None,
            iterations: IterationPolicy::Optimal,
            max_qubits: DEFAULT_MAX_QUBITS,
            backend: BackendKind::Statevector,
        }
    }
}

impl fmt::Display for DemoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.problem {
            Problem::NQueens => write!(
                f,
                "DemoConfig(n-queens, N={}, oracle={}, iterations={}",
                self.board_size, self.oracle, self.iterations
            )?,
            Problem::GraphColoring => write!(
                f,
                "DemoConfig(graph-coloring, graph={}, colors={}",
                self.graph, self.colors
            )?,
            Problem::DeutschJozsa => write!(
                f,
                "DemoConfig(deutsch-jozsa, n={}, oracle={}",
                self.dj_qubits, self.dj_oracle
            )?,
        }
        write!(f, ", shots={}, backend={})", self.shots, self.backend)
    }
}

// ============================================================================
// Tests
// ============================================================================
