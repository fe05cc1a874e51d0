//! Graph coloring demo: incremental greedy pass, forced conflicts, final answer

use crate::config::{DemoConfig, Problem};
use crate::demo::{AlgorithmDemo, DemoReport, DemoStep};
use qpuzzle_core::QpuzzleResult;
use qpuzzle_puzzles::{
    assess_color_count, conflicts, find_graph, greedy_coloring, is_valid_coloring,
    smallest_free_color, Color, ColorBudget, Coloring, Graph,
};

/// Forced-conflict configurations shown after a failed incremental pass
const FORCED_ATTEMPTS: usize = 2;

/// Colors a catalog graph vertex by vertex with the smallest free color
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphColoringDemo;

impl AlgorithmDemo for GraphColoringDemo {
    fn name(&self) -> &'static str {
        "graph-coloring"
    }

    fn summary(&self) -> &'static str {
        "Color a graph so that no edge joins two vertices of the same color"
    }

    fn run(&self, config: &DemoConfig) -> QpuzzleResult<DemoReport> {
        let graph = find_graph(&config.graph)?;
        Ok(coloring_report(&graph, config.colors))
    }
}

/// Full progression for `graph` with `k` colors
///
/// When the incremental pass ends in a clash, two forced configurations
/// `(v + attempt) % min(2, k)` are shown before the greedy verdict.
pub fn coloring_report(graph: &Graph, k: usize) -> DemoReport {
    let mut report = DemoReport::new(
        format!("{} with {} colors", graph.name, k),
        Problem::GraphColoring,
    );
    report.add_fact("vertices", graph.vertices);
    report.add_fact("edges", graph.edge_count());
    report.add_fact("chromatic number", graph.chromatic);

    let budget = assess_color_count(graph, k);
    report.add_fact("color budget", budget);
    if let ColorBudget::Impossible { required } = budget {
        report.push_step(DemoStep::new(
            format!("Impossible: need at least {} colors", required),
            snapshot(graph, &Coloring::new()),
            false,
        ));
        return report;
    }

    let mut partial = Coloring::new();
    for vertex in 0..graph.vertices {
        // A vertex with no legal color is forced to 0 to expose the clash
        let color = smallest_free_color(graph, &partial, vertex, k).unwrap_or(0);
        partial.assign(vertex, color);
        report.push_step(DemoStep::new(
            format!("Coloring vertex {} (color {})", vertex, color),
            snapshot(graph, &partial),
            is_valid_coloring(graph, &partial),
        ));
    }

    if !is_valid_coloring(graph, &partial) {
        let modulus = k.min(2) as Color;
        for attempt in 0..FORCED_ATTEMPTS {
            let colors: Vec<Color> = (0..graph.vertices)
                .map(|v| (v + attempt) as Color % modulus)
                .collect();
            let forced = Coloring::from_colors(&colors);
            report.push_step(DemoStep::new(
                format!("Testing configuration {}", attempt + 1),
                snapshot(graph, &forced),
                is_valid_coloring(graph, &forced),
            ));
        }
    }

    match greedy_coloring(graph, k) {
        Some(coloring) => {
            report.add_fact("colors used", coloring.colors_used());
            report.push_step(DemoStep::new(
                format!("Valid {}-coloring found", k),
                snapshot(graph, &coloring),
                true,
            ));
        }
        None => {
            log::info!("Greedy pass found no {}-coloring of {}", k, graph.name);
            report.push_step(DemoStep::new(
                format!("No valid {}-coloring exists", k),
                snapshot(graph, &partial),
                false,
            ));
        }
    }
    report
}

/// Coloring followed by any conflicting edges
fn snapshot(graph: &Graph, coloring: &Coloring) -> String {
    let clashes = conflicts(graph, coloring);
    if clashes.is_empty() {
        coloring.to_string()
    } else {
        let edges: Vec<String> = clashes.iter().map(|(a, b)| format!("{}-{}", a, b)).collect();
        format!("{}  conflicts: {}", coloring, edges.join(" "))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qpuzzle_puzzles::catalog_names;

    #[test]
    fn test_impossible_budget_single_step() {
        let report = GraphColoringDemo
            .run(&DemoConfig::coloring("Complete K4", 3))
            .unwrap();
        assert_eq!(report.steps.len(), 1);
        assert!(report.steps[0].description.starts_with("Impossible"));
        assert!(!report.is_solved());
    }

    #[test]
    fn test_square_with_two_colors() {
        let report = GraphColoringDemo
            .run(&DemoConfig::coloring("Square Cycle", 2))
            .unwrap();
        // 4 incremental steps, all valid, then the final coloring
        assert_eq!(report.steps.len(), 5);
        assert!(report.steps.iter().all(|s| s.valid));
        assert_eq!(report.final_step().unwrap().snapshot, "{0:0, 1:1, 2:0, 3:1}");
        assert_eq!(report.fact("colors used"), Some("2"));
    }

    #[test]
    fn test_every_catalog_graph_solves_at_chromatic_number() {
        for name in catalog_names() {
            let graph = find_graph(name).unwrap();
            let report = GraphColoringDemo
                .run(&DemoConfig::coloring(name, graph.chromatic))
                .unwrap();
            assert!(report.is_solved(), "{} not solved", name);
            assert_eq!(report.fact("color budget"), Some("optimal"));
        }
    }

    #[test]
    fn test_over_coloring_is_reported() {
        let report = GraphColoringDemo
            .run(&DemoConfig::coloring("Star S5", 4))
            .unwrap();
        assert!(report.is_solved());
        assert!(report.fact("color budget").unwrap().starts_with("over-coloring"));
    }

    #[test]
    fn test_greedy_order_failure_shows_forced_attempts() {
        // Bipartite path 0-2-3-1; vertex order 0,1,2,3 strands vertex 3
        let path = Graph::new("Path P4", 4, vec![(0, 2), (2, 3), (3, 1)], 2).unwrap();
        let report = coloring_report(&path, 2);

        assert_eq!(report.fact("color budget"), Some("optimal"));
        // 4 incremental steps, 2 forced attempts, verdict
        assert_eq!(report.steps.len(), 7);
        assert!(report.steps[..3].iter().all(|s| s.valid));
        assert_eq!(report.steps[3].description, "Coloring vertex 3 (color 0)");
        assert!(!report.steps[3].valid);

        assert_eq!(report.steps[4].description, "Testing configuration 1");
        assert_eq!(report.steps[4].snapshot, "{0:0, 1:1, 2:0, 3:1}  conflicts: 0-2 3-1");
        assert_eq!(report.steps[5].description, "Testing configuration 2");
        assert_eq!(report.steps[5].snapshot, "{0:1, 1:0, 2:1, 3:0}  conflicts: 0-2 3-1");
        assert!(!report.steps[4].valid && !report.steps[5].valid);

        let last = report.final_step().unwrap();
        assert_eq!(last.description, "No valid 2-coloring exists");
        assert_eq!(last.snapshot, "{0:0, 1:0, 2:1, 3:0}  conflicts: 3-1");
        assert!(!report.is_solved());
        assert_eq!(report.fact("colors used"), None);
    }

    #[test]
    fn test_snapshot_lists_conflicts() {
        let graph = find_graph("Triangle (K3)").unwrap();
        let coloring = Coloring::from_colors(&[0, 0, 1]);
        assert_eq!(snapshot(&graph, &coloring), "{0:0, 1:0, 2:1}  conflicts: 0-1");
    }

    #[test]
    fn test_unknown_graph() {
        assert!(GraphColoringDemo
            .run(&DemoConfig::coloring("Petersen", 3))
            .is_err());
    }
}
