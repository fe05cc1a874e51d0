//! N-Queens demo: placement progression plus a Grover search

use crate::config::{DemoConfig, Problem};
use crate::demo::{backend_for, AlgorithmDemo, DemoReport, DemoStep};
use qpuzzle_core::board::RANDOM_PROBES;
use qpuzzle_core::{Circuit, QpuzzleResult};
use qpuzzle_grover::{interpret_counts, top_results, GroverSearch, Oracle};
use qpuzzle_puzzles::{is_valid_solution, known_solution, solution_count, Board};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Outcomes listed from a successful search
const TOP_OUTCOMES: usize = 3;

/// Places the known solution queen by queen, probes random boards, then
/// searches the N² qubit register with Grover's algorithm
#[derive(Debug, Clone, Copy, Default)]
pub struct NQueensDemo;

impl AlgorithmDemo for NQueensDemo {
    fn name(&self) -> &'static str {
        "n-queens"
    }

    fn summary(&self) -> &'static str {
        "Place N queens so that none attack each other, searched with Grover's algorithm"
    }

    fn run(&self, config: &DemoConfig) -> QpuzzleResult<DemoReport> {
        let n = config.board_size;
        let mut report = DemoReport::new(format!("{}-Queens", n), Problem::NQueens);
        report.add_fact("board", format!("{}x{}", n, n));
        report.add_fact("qubits", n * n);
        report.add_fact("solutions", solution_count(n)?);

        let queens = match known_solution(n) {
            Some(queens) => queens,
            None => {
                report.push_step(DemoStep::new(
                    format!("No solution exists for {}-Queens", n),
                    Board::empty(n)?.to_string(),
                    false,
                ));
                return Ok(report);
            }
        };

        for i in 1..=queens.len() {
            let board = Board::from_queens(n, &queens[..i])?;
            report.push_step(DemoStep::new(
                format!("Placing queen {}/{}", i, queens.len()),
                board.to_string(),
                is_valid_solution(&board),
            ));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        for probe in 1..=RANDOM_PROBES {
            let board = Board::random(n, n, &mut rng)?;
            report.push_step(DemoStep::new(
                format!("Testing random configuration {}", probe),
                board.to_string(),
                is_valid_solution(&board),
            ));
        }

        search(config, &mut report)?;

        let solution = Board::from_queens(n, &queens)?;
        report.push_step(DemoStep::new(
            "Final valid solution",
            solution.to_string(),
            is_valid_solution(&solution),
        ));
        Ok(report)
    }
}

/// Run the Grover search and record its outcome; an unusable backend is a fact, not an error
fn search(config: &DemoConfig, report: &mut DemoReport) -> QpuzzleResult<()> {
    let n = config.board_size;
    let oracle = Oracle::nqueens(n, config.oracle)?;
    let search = GroverSearch::new(oracle).with_policy(config.iterations);
    report.add_fact("oracle", config.oracle);
    report.add_fact("marked states", search.num_marked());

    let backend = backend_for(config);
    let outcome = match search.run(backend.as_ref(), config.shots) {
        Ok(outcome) => outcome,
        Err(e) if e.is_backend_unavailable() => {
            log::warn!("Skipping Grover search: {}", e);
            report.add_fact("search", format!("skipped ({})", e));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    report.add_fact("backend", backend.name());
    report.add_fact("iterations", outcome.iterations);
    report.add_fact(
        "predicted success",
        format!("{:.3}", outcome.predicted_success),
    );
    report.add_fact("observed success", format!("{:.3}", outcome.observed_success));

    let counts = &outcome.result.counts;
    let interpretation = interpret_counts(n, counts)?;
    report.add_fact("most probable", &interpretation.bitstring);
    for (rank, row) in top_results(n, counts, TOP_OUTCOMES)?.iter().enumerate() {
        report.add_fact(
            format!("outcome #{}", rank + 1),
            format!(
                "{} x{} ({})",
                row.bitstring,
                row.count,
                if row.valid { "valid" } else { "invalid" }
            ),
        );
    }
    report.push_step(DemoStep::new(
        format!(
            "Grover measurement: {}/{} shots on the most probable board",
            interpretation.count, interpretation.total
        ),
        interpretation.board.to_string(),
        interpretation.is_valid(),
    ));

    let circuit = &outcome.circuit;
    report.add_fact("search space", 1u128 << circuit.num_qubits());
    report.add_fact("circuit depth", circuit.depth());
    report.add_fact("gates", gate_summary(circuit));
    report.qasm = Some(circuit.to_qasm());
    Ok(())
}

/// Total gate count followed by the per-name histogram
fn gate_summary(circuit: &Circuit) -> String {
    let ops: Vec<String> = circuit
        .count_ops()
        .iter()
        .map(|(name, count)| format!("{}: {}", name, count))
        .collect();
    format!("{} ({})", circuit.gate_count(), ops.join(", "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qpuzzle_backend::BackendKind;
    use qpuzzle_grover::{IterationPolicy, OracleKind};

    #[test]
    fn test_unsolvable_boards() {
        for n in [2, 3] {
            let report = NQueensDemo.run(&DemoConfig::nqueens(n)).unwrap();
            assert_eq!(report.steps.len(), 1);
            assert!(report.steps[0].description.contains("No solution"));
            assert!(!report.is_solved());
            assert_eq!(report.fact("solutions"), Some("0"));
        }
    }

    #[test]
    fn test_progression_without_backend() {
        let config = DemoConfig::nqueens(5)
            .with_seed(42)
            .with_backend(BackendKind::None);
        let report = NQueensDemo.run(&config).unwrap();

        // 5 placements, 2 random probes, final solution
        assert_eq!(report.steps.len(), 5 + RANDOM_PROBES + 1);
        assert!(report.steps[..4].iter().all(|s| !s.valid));
        assert!(report.steps[4].valid);
        assert!(report.is_solved());
        assert!(report.fact("search").unwrap().starts_with("skipped"));
        assert!(report.qasm.is_none());
    }

    #[test]
    fn test_register_above_limit_is_skipped() {
        let config = DemoConfig::nqueens(6).with_seed(1);
        let report = NQueensDemo.run(&config).unwrap();
        assert_eq!(report.fact("qubits"), Some("36"));
        assert!(report.fact("search").is_some());
        assert!(report.is_solved());
    }

    #[test]
    fn test_seeded_probes_repeat() {
        let config = DemoConfig::nqueens(4)
            .with_seed(9)
            .with_backend(BackendKind::None);
        let a = NQueensDemo.run(&config).unwrap();
        let b = NQueensDemo.run(&config).unwrap();
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn test_search_runs_on_small_board() {
        // One legacy round on 16 qubits
        let config = DemoConfig::nqueens(4)
            .with_seed(3)
            .with_shots(200)
            .with_iterations(IterationPolicy::Legacy)
            .with_oracle(OracleKind::Constraint);
        let report = NQueensDemo.run(&config).unwrap();

        assert_eq!(report.fact("iterations"), Some("1"));
        assert_eq!(report.fact("marked states"), Some("2"));
        assert!(report.fact("most probable").is_some());
        assert!(report.fact("outcome #1").is_some());
        assert!(report.qasm.as_deref().unwrap().starts_with("OPENQASM"));

        let executed = GroverSearch::new(Oracle::nqueens(4, OracleKind::Constraint).unwrap())
            .with_policy(IterationPolicy::Legacy)
            .circuit()
            .unwrap();
        assert_eq!(report.fact("search space"), Some("65536"));
        assert_eq!(report.fact("circuit depth"), Some(executed.depth().to_string().as_str()));
        assert_eq!(report.fact("gates"), Some(gate_summary(&executed).as_str()));
        assert!(report.fact("gates").unwrap().contains("measure: "));
        // placements, probes, measurement, final
        assert_eq!(report.steps.len(), 4 + RANDOM_PROBES + 2);
        assert!(report.is_solved());
    }

    #[test]
    #[ignore = "201 rounds on 16 qubits; run with --ignored in release"]
    fn test_default_search_finds_known_solution() {
        let config = DemoConfig::nqueens(4).with_seed(11);
        let report = NQueensDemo.run(&config).unwrap();

        assert_eq!(report.fact("iterations"), Some("201"));
        assert_eq!(report.fact("most probable"), Some("0010100000010100"));
        let measurement = &report.steps[report.steps.len() - 2];
        assert!(measurement.description.starts_with("Grover measurement"));
        assert!(measurement.valid);
    }
}
