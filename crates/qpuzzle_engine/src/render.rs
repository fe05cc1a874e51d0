//! Plain-text rendering of reports and the graph catalog

use crate::demo::DemoReport;
use qpuzzle_puzzles::Graph;
use std::fmt::Write;

/// Terminal text for a report; QASM is left out
pub fn render_report(report: &DemoReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", report.title);

    for (i, step) in report.steps.iter().enumerate() {
        let _ = writeln!(
            out,
            "\n[{}/{}] {} ({})",
            i + 1,
            report.steps.len(),
            step.description,
            if step.valid { "valid" } else { "invalid" }
        );
        for line in step.snapshot.lines() {
            let _ = writeln!(out, "    {}", line);
        }
    }

    if !report.facts.is_empty() {
        let width = report.facts.iter().map(|f| f.key.len()).max().unwrap_or(0);
        let _ = writeln!(out, "\nFacts:");
        for fact in &report.facts {
            let _ = writeln!(out, "  {:<width$}  {}", fact.key, fact.value, width = width);
        }
    }
    out
}

/// One line per catalog graph
pub fn render_catalog(graphs: &[Graph]) -> String {
    let width = graphs.iter().map(|g| g.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for g in graphs {
        let _ = writeln!(
            out,
            "{:<width$}  V={}  E={:<2}  chromatic={}",
            g.name,
            g.vertices,
            g.edge_count(),
            g.chromatic,
            width = width
        );
    }
    out
}
