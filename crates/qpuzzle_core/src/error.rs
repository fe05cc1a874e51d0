//! Error types for QPuzzle
//!
//! One error enum shared by every crate in the workspace.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QPuzzle
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QpuzzleError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Bitstring has the wrong number of bits
    #[error("Bitstring length {actual} does not match expected {expected}")]
    BitstringLengthMismatch { expected: usize, actual: usize },

    /// Board size outside the supported range
    #[error("Board size {size} out of range [{min}, {max}]")]
    BoardSizeOutOfRange { size: usize, min: usize, max: usize },

    /// Malformed board grid
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Coordinate outside the board
    #[error("Cell ({row}, {col}) is outside a {size}x{size} board")]
    CellOutOfRange { row: usize, col: usize, size: usize },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Puzzle Errors
    // ========================================================================
    /// Graph name not present in the catalog
    #[error("Unknown graph '{0}'")]
    UnknownGraph(String),

    /// Edge references a vertex that does not exist
    #[error("Edge ({0}, {1}) references a vertex outside the graph")]
    InvalidEdge(usize, usize),

    /// Oracle definition cannot be built
    #[error("Invalid oracle: {0}")]
    InvalidOracle(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Gate uses the same qubit twice
    #[error("Gate uses qubit {0} more than once")]
    DuplicateQubit(usize),

    /// Composed circuits have different widths
    #[error("Cannot append a {other}-qubit circuit to a {this}-qubit circuit")]
    WidthMismatch { this: usize, other: usize },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    #[error("Backend error: {0}")]
    BackendError(String),

    /// No usable execution backend
    #[error("Backend '{backend}' unavailable: {reason}")]
    BackendUnavailable { backend: String, reason: String },

    /// Shots out of range
    #[error("Shots {0} out of range [{1}, {2}]")]
    ShotsOutOfRange(u64, u64, u64),

    /// Result carries no measurement outcomes
    #[error("Measurement counts are empty")]
    EmptyCounts,

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QPuzzle operations
pub type QpuzzleResult<T> = Result<T, QpuzzleError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QpuzzleError {
    fn from(err: serde_json::Error) -> Self {
        QpuzzleError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QpuzzleError {
    fn from(err: std::io::Error) -> Self {
        QpuzzleError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QpuzzleError {
    /// Shorthand for [`QpuzzleError::BackendUnavailable`]
    pub fn unavailable(backend: impl Into<String>, reason: impl Into<String>) -> Self {
        QpuzzleError::BackendUnavailable {
            backend: backend.into(),
            reason: reason.into(),
        }
    }

    /// Check if the error means "nothing could execute the circuit"
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, QpuzzleError::BackendUnavailable { .. })
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QpuzzleError::InvalidBitstring(_)
                | QpuzzleError::BitstringLengthMismatch { .. }
                | QpuzzleError::BoardSizeOutOfRange { .. }
                | QpuzzleError::InvalidBoard(_)
                | QpuzzleError::CellOutOfRange { .. }
                | QpuzzleError::InvalidConfig(_)
        )
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QpuzzleError::GateQubitMismatch { .. }
                | QpuzzleError::DuplicateQubit(_)
                | QpuzzleError::WidthMismatch { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
