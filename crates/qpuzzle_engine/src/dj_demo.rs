//! Deutsch-Jozsa demo

use crate::config::{DemoConfig, Problem};
use crate::demo::{backend_for, AlgorithmDemo, DemoReport, DemoStep};
use qpuzzle_core::{Bitstring, QpuzzleResult};
use qpuzzle_grover::{deutsch_jozsa_circuit, run_deutsch_jozsa};

/// Decides constant versus balanced with a single oracle query
#[derive(Debug, Clone, Copy, Default)]
pub struct DeutschJozsaDemo;

impl AlgorithmDemo for DeutschJozsaDemo {
    fn name(&self) -> &'static str {
        "deutsch-jozsa"
    }

    fn summary(&self) -> &'static str {
        "Tell a constant function from a balanced one with one query"
    }

    fn run(&self, config: &DemoConfig) -> QpuzzleResult<DemoReport> {
        let n = config.dj_qubits;
        let oracle = &config.dj_oracle;
        let mut report = DemoReport::new(
            format!("Deutsch-Jozsa on {} input qubits", n),
            Problem::DeutschJozsa,
        );
        report.add_fact("oracle", oracle);
        report.add_fact("expected", oracle.expected());

        let circuit = deutsch_jozsa_circuit(n, oracle)?;
        report.add_fact("depth", circuit.depth());
        report.push_step(DemoStep::new(
            "Oracle circuit built",
            circuit.to_string(),
            true,
        ));

        let table: Vec<String> = (0..(1usize << n.min(3)))
            .map(|x| {
                let input = Bitstring::from_index(x, n);
                format!("f({}) = {}", input, u8::from(oracle.evaluate(&input)))
            })
            .collect();
        report.push_step(DemoStep::new(
            "Classical values of f (first inputs)",
            table.join("\n"),
            true,
        ));

        let backend = backend_for(config);
        let outcome = run_deutsch_jozsa(n, oracle, backend.as_ref(), config.shots)?;
        report.add_fact("backend", backend.name());
        report.add_fact("verdict", outcome.verdict);
        if let Some((bits, count)) = outcome.result.most_frequent() {
            report.add_fact("most probable", format!("{} x{}", bits, count));
        }
        report.push_step(DemoStep::new(
            format!("One query says: {}", outcome.verdict),
            format!("{}", outcome.result),
            outcome.is_correct(),
        ));
        report.qasm = Some(circuit.to_qasm());
        Ok(report)
    }
}
