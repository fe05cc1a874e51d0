//! Constants for QPuzzle
//!
//! Puzzle bounds, search defaults and simulator limits.

// ============================================================================
// Board Constants
// ============================================================================

pub mod board {
    //! N-Queens board bounds

    /// Smallest board the demos accept
    pub const MIN_BOARD_SIZE: usize = 2;

    /// Largest board the model accepts (36 cells)
    pub const MAX_BOARD_SIZE: usize = 6;

    /// Random boards shown between the placement steps and the final solution
    pub const RANDOM_PROBES: usize = 2;
}

// ============================================================================
// Search Constants
// ============================================================================

pub mod search {
    //! Grover search defaults

    /// Default number of measurement shots
    pub const DEFAULT_SHOTS: u64 = 1000;

    /// Minimum shots accepted by a backend
    pub const MIN_SHOTS: u64 = 1;

    /// Maximum shots accepted by a backend
    pub const MAX_SHOTS: u64 = 100_000;

    /// Most oracle+diffuser rounds a search may apply; covers the optimal
    /// count of a single marked state on the widest simulator register
    pub const MAX_ITERATIONS: usize = 10_000;

    /// Legacy iteration count for boards up to 4x4
    pub const LEGACY_ITERATIONS_SMALL: usize = 1;

    /// Legacy iteration count for larger boards
    pub const LEGACY_ITERATIONS_LARGE: usize = 2;

    /// Optimal Grover iteration count: floor(pi/4 * sqrt(2^n / m)), at least 1
    pub fn optimal_iterations(num_qubits: usize, num_marked: usize) -> usize {
        if num_marked == 0 {
            return 1;
        }
        let space = 2f64.powi(num_qubits as i32);
        let k = (std::f64::consts::FRAC_PI_4 * (space / num_marked as f64).sqrt()).floor();
        (k as usize).max(1)
    }

    /// Theoretical success probability after `iterations` rounds
    /// sin²((2k+1)·θ) with θ = asin(sqrt(m / 2^n))
    pub fn success_probability(num_qubits: usize, num_marked: usize, iterations: usize) -> f64 {
        let space = 2f64.powi(num_qubits as i32);
        let ratio = (num_marked as f64 / space).min(1.0);
        let theta = ratio.sqrt().asin();
        ((2 * iterations + 1) as f64 * theta).sin().powi(2)
    }
}

// ============================================================================
// Backend Constants
// ============================================================================

pub mod backend {
    //! Simulator limits

    /// Default qubit limit of the state-vector simulator (2^20 amplitudes)
    pub const DEFAULT_MAX_QUBITS: usize = 20;

    /// Hard ceiling for the simulator qubit limit
    pub const HARD_MAX_QUBITS: usize = 26;

    /// Amplitudes below this norm are treated as zero when sampling
    pub const AMPLITUDE_EPSILON: f64 = 1e-12;
}

// ============================================================================
// Tests
// ============================================================================
