//! QPuzzle command-line demo runner

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use qpuzzle_backend::BackendKind;
use qpuzzle_core::Bitstring;
use qpuzzle_engine::{render_catalog, render_report, run_demo, DemoConfig, DemoReport, Problem};
use qpuzzle_grover::{DjOracle, IterationPolicy, OracleKind};
use qpuzzle_puzzles::catalog;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "qpuzzle")]
#[command(version, about = "Quantum puzzle demos: N-Queens, graph coloring and Deutsch-Jozsa")]
struct Cli {
    /// Measurement shots
    #[arg(long)]
    shots: Option<u64>,

    /// Random seed for sampling and random boards
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Append the executed circuit as OpenQASM
    #[arg(long)]
    show_qasm: bool,

    /// Simulator qubit limit
    #[arg(long)]
    max_qubits: Option<usize>,

    /// Execution backend (statevector, none)
    #[arg(long)]
    backend: Option<BackendKind>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// N-Queens with Grover search
    Queens {
        /// Board size N
        #[arg(long, default_value = "4")]
        size: usize,

        /// Oracle construction (simplified, constraint)
        #[arg(long)]
        oracle: Option<OracleKind>,

        /// Grover rounds: optimal, legacy, or a number
        #[arg(long)]
        iterations: Option<IterationPolicy>,
    },

    /// Graph coloring on a catalog graph
    Coloring {
        /// Catalog graph name (see `graphs`)
        #[arg(long)]
        graph: String,

        /// Number of colors
        #[arg(long)]
        colors: usize,
    },

    /// Deutsch-Jozsa constant/balanced test
    DeutschJozsa {
        /// Input qubits
        #[arg(long, default_value = "3")]
        qubits: usize,

        /// Constant oracle returning 0 or 1
        #[arg(long, conflicts_with = "balanced")]
        constant: Option<u8>,

        /// Balanced oracle f(x) = mask . x mod 2, e.g. 101
        #[arg(long)]
        balanced: Option<String>,
    },

    /// Run the demo described by --config as-is
    Run,

    /// List the graph catalog
    Graphs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level: LevelFilter = cli
        .log_level
        .parse()
        .with_context(|| format!("invalid log level '{}'", cli.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Command::Graphs = cli.command {
        emit(&cli, &render_catalog(&catalog()))?;
        return Ok(());
    }

    let config = build_config(&cli)?;
    log::info!("{}", config);
    let report = run_demo(&config).context("demo failed")?;
    emit(&cli, &format_report(&cli, &report)?)
}

/// Config file (or defaults), then the subcommand, then global overrides
fn build_config(cli: &Cli) -> Result<DemoConfig> {
    let mut config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DemoConfig::default(),
    };

    match &cli.command {
        Command::Queens {
            size,
            oracle,
            iterations,
        } => {
            config.problem = Problem::NQueens;
            config.board_size = *size;
            if let Some(oracle) = oracle {
                config.oracle = *oracle;
            }
            if let Some(iterations) = iterations {
                config.iterations = *iterations;
            }
        }
        Command::Coloring { graph, colors } => {
            config.problem = Problem::GraphColoring;
            config.graph = graph.clone();
            config.colors = *colors;
        }
        Command::DeutschJozsa {
            qubits,
            constant,
            balanced,
        } => {
            config.problem = Problem::DeutschJozsa;
            config.dj_qubits = *qubits;
            config.dj_oracle = match (constant, balanced) {
                (Some(0), None) => DjOracle::Constant(false),
                (Some(1), None) => DjOracle::Constant(true),
                (Some(v), None) => bail!("--constant must be 0 or 1, got {}", v),
                (None, Some(mask)) => DjOracle::Balanced(
                    Bitstring::parse(mask).with_context(|| format!("invalid mask '{}'", mask))?,
                ),
                (None, None) => config.dj_oracle.clone(),
                (Some(_), Some(_)) => bail!("--constant and --balanced are exclusive"),
            };
        }
        Command::Run => {
            if cli.config.is_none() {
                bail!("`run` needs --config FILE");
            }
        }
        Command::Graphs => {}
    }

    if let Some(shots) = cli.shots {
        config.shots = shots;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_qubits) = cli.max_qubits {
        config.max_qubits = max_qubits;
    }
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    Ok(config)
}

fn format_report(cli: &Cli, report: &DemoReport) -> Result<String> {
    if cli.json {
        return report.to_json().context("failed to serialize report");
    }
    let mut text = render_report(report);
    if cli.show_qasm {
        match &report.qasm {
            Some(qasm) => {
                text.push_str("\nCircuit (OpenQASM 2.0):\n");
                text.push_str(qasm);
                text.push('\n');
            }
            None => text.push_str("\nNo circuit was executed.\n"),
        }
    }
    Ok(text)
}

fn emit(cli: &Cli, text: &str) -> Result<()> {
    match &cli.output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
