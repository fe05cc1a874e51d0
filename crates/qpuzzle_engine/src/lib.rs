//! # QPuzzle Engine
//!
//! Demo configuration, the `AlgorithmDemo` strategy, per-algorithm
//! progressions and text rendering.
//!
//! ## Architecture
//!
//! ```text
//! qpuzzle_engine
//!     config         // DemoConfig, Problem, JSON load/save, validate()
//!     demo           // AlgorithmDemo, DemoReport, DemoStep, demo_for(), run_demo()
//!     nqueens_demo   // placements, random probes, Grover search, final board
//!     coloring_demo  // incremental greedy, forced conflicts, final coloring
//!     dj_demo        // Deutsch-Jozsa build, run, classify
//!     render         // render_report(), render_catalog()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qpuzzle_engine::prelude::*;
//!
//! let config = DemoConfig::coloring("Pentagon Cycle", 3).with_seed(42);
//! let report = run_demo(&config).unwrap();
//!
//! assert!(report.is_solved());
//! println!("{}", render_report(&report));
//! ```
//!
//! ## Configuration Files
//!
//! ```rust
//! use qpuzzle_engine::prelude::*;
//!
//! let config = DemoConfig::from_json(r#"{ "problem": "n-queens", "board_size": 3 }"#).unwrap();
//! assert_eq!(config.board_size, 3);
//! assert_eq!(config.shots, 1000);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration
pub mod config;

/// Demo trait and reports
pub mod demo;

/// N-Queens demo
pub mod nqueens_demo;

/// Graph coloring demo
pub mod coloring_demo;

/// Deutsch-Jozsa demo
pub mod dj_demo;

/// Text rendering
pub mod render;

// ============================================================================
// Re-exports
// ============================================================================

pub use coloring_demo::{coloring_report, GraphColoringDemo};
pub use config::{DemoConfig, Problem};
pub use demo::{demo_for, run_demo, AlgorithmDemo, DemoReport, DemoStep, Fact};
pub use dj_demo::DeutschJozsaDemo;
pub use nqueens_demo::NQueensDemo;
pub use render::{render_catalog, render_report};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qpuzzle_engine::prelude::*;
    //! ```

    pub use crate::config::{DemoConfig, Problem};
    pub use crate::demo::{demo_for, run_demo, AlgorithmDemo, DemoReport, DemoStep};
    pub use crate::render::render_report;
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use qpuzzle_backend::BackendKind;
    use qpuzzle_grover::DjOracle;

    #[test]
    fn test_every_problem_runs() {
        let configs = [
            DemoConfig::nqueens(5).with_seed(42).with_max_qubits(16),
            DemoConfig::coloring("Bipartite K2,3", 2).with_seed(42),
            DemoConfig::deutsch_jozsa(3, DjOracle::Constant(false)).with_seed(42),
        ];
        for config in configs {
            let report = run_demo(&config).unwrap();
            assert_eq!(report.problem, config.problem);
            assert!(report.is_solved(), "{}", report.title);
            assert!(!render_report(&report).is_empty());
        }
    }

    #[test]
    fn test_report_json() {
        let report = run_demo(&DemoConfig::coloring("Triangle (K3)", 2)).unwrap();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"graph-coloring\""));

        let back: DemoReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_missing_backend_keeps_nqueens_going() {
        let config = DemoConfig::nqueens(4)
            .with_seed(5)
            .with_backend(BackendKind::None);
        let report = run_demo(&config).unwrap();
        assert!(report.is_solved());
        assert!(report.fact("search").is_some());
    }

    #[test]
    fn test_config_file_drives_demo() {
        let json = r#"{ "problem": "graph-coloring", "graph": "complete k5", "colors": 5 }"#;
        let config = DemoConfig::from_json(json).unwrap();
        let report = run_demo(&config).unwrap();
        assert_eq!(report.fact("chromatic number"), Some("5"));
        assert!(report.is_solved());
    }
}
