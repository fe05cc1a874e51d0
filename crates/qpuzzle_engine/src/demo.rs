//! Demo abstraction and step-by-step reports
//!
//! Every algorithm demo turns a [`DemoConfig`] into a [`DemoReport`]: an
//! ordered list of snapshots with a validity flag, plus key/value facts.

use crate::coloring_demo::GraphColoringDemo;
use crate::config::{DemoConfig, Problem};
use crate::dj_demo::DeutschJozsaDemo;
use crate::nqueens_demo::NQueensDemo;
use qpuzzle_backend::Backend;
use qpuzzle_core::QpuzzleResult;
use serde::{Deserialize, Serialize};

/// One frame of a demo progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoStep {
    /// What the step shows
    pub description: String,

    /// Text rendering of the state at this step
    pub snapshot: String,

    /// Whether the state satisfies the puzzle
    pub valid: bool,
}

impl DemoStep {
    /// Create a step
    pub fn new(description: impl Into<String>, snapshot: impl Into<String>, valid: bool) -> Self {
        Self {
            description: description.into(),
            snapshot: snapshot.into(),
            valid,
        }
    }
}

/// Named value attached to a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    /// Label
    pub key: String,
    /// Value
    pub value: String,
}

/// Full output of one demo run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoReport {
    /// Headline
    pub title: String,

    /// Problem the demo solved
    pub problem: Problem,

    /// Ordered progression
    pub steps: Vec<DemoStep>,

    /// Facts in insertion order
    pub facts: Vec<Fact>,

    /// OpenQASM of the executed circuit, if one ran
    pub qasm: Option<String>,
}

impl DemoReport {
    /// Empty report
    pub fn new(title: impl Into<String>, problem: Problem) -> Self {
        Self {
            title: title.into(),
            problem,
            steps: Vec::new(),
            facts: Vec::new(),
            qasm: None,
        }
    }

    /// Append a step
    pub fn push_step(&mut self, step: DemoStep) {
        self.steps.push(step);
    }

    /// Record a fact; a repeated key replaces the earlier value
    pub fn add_fact(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.facts.iter_mut().find(|f| f.key == key) {
            Some(fact) => fact.value = value,
            None => self.facts.push(Fact { key, value }),
        }
    }

    /// Look up a fact
    pub fn fact(&self, key: &str) -> Option<&str> {
        self.facts
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }

    /// Last step of the progression
    pub fn final_step(&self) -> Option<&DemoStep> {
        self.steps.last()
    }

    /// The progression ends in a valid state
    pub fn is_solved(&self) -> bool {
        self.final_step().is_some_and(|s| s.valid)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QpuzzleResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An algorithm demo
pub trait AlgorithmDemo {
    /// Short name
    fn name(&self) -> &'static str;

    /// One-line description for menus
    fn summary(&self) -> &'static str;

    /// Run with the given configuration
    fn run(&self, config: &DemoConfig) -> QpuzzleResult<DemoReport>;
}

/// The demo for `problem`
pub fn demo_for(problem: Problem) -> Box<dyn AlgorithmDemo> {
    match problem {
        Problem::NQueens => Box::new(NQueensDemo),
        Problem::GraphColoring => Box::new(GraphColoringDemo),
        Problem::DeutschJozsa => Box::new(DeutschJozsaDemo),
    }
}

/// Validate the config and run the matching demo
pub fn run_demo(config: &DemoConfig) -> QpuzzleResult<DemoReport> {
    config.validate()?;
    let demo = demo_for(config.problem);
    log::info!("Running {} demo: {}", demo.name(), config);
    let report = demo.run(config)?;
    log::info!(
        "{} demo finished with {} step(s), solved={}",
        demo.name(),
        report.steps.len(),
        report.is_solved()
    );
    Ok(report)
}

/// Backend described by the config
pub(crate) fn backend_for(config: &DemoConfig) -> Box<dyn Backend> {
    config.backend.build(config.max_qubits, config.seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facts_keep_order_and_replace() {
        let mut report = DemoReport::new("t", Problem::NQueens);
        report.add_fact("a", 1);
        report.add_fact("b", "two");
        report.add_fact("a", 3);

        assert_eq!(report.fact("a"), Some("3"));
        assert_eq!(report.facts[1].key, "b");
        assert_eq!(report.fact("missing"), None);
    }

    #[test]
    fn test_is_solved_follows_last_step() {
        let mut report = DemoReport::new("t", Problem::NQueens);
        assert!(!report.is_solved());
        report.push_step(DemoStep::new("ok", "", true));
        report.push_step(DemoStep::new("bad", "", false));
        assert!(!report.is_solved());
        report.push_step(DemoStep::new("ok again", "", true));
        assert!(report.is_solved());
    }

    #[test]
    fn test_demo_for_names() {
        let names: Vec<&str> = Problem::ALL.iter().map(|&p| demo_for(p).name()).collect();
        assert_eq!(names, vec!["n-queens", "graph-coloring", "deutsch-jozsa"]);
        for p in Problem::ALL {
            assert!(!demo_for(p).summary().is_empty());
        }
    }

    #[test]
    fn test_run_demo_validates_first() {
        let err = run_demo(&DemoConfig::nqueens(9)).unwrap_err();
        assert!(err.is_validation_error());
    }
}
