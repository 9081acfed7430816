//! Command-line driver: read two DFA descriptions, combine them and write
//! the product automaton.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dfa_union::config::Config;
use dfa_union::{ProductOp, product, text};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dfa-union")]
#[command(about = "Combine two DFAs with the cross-product construction", long_about = None)]
struct Cli {
    /// Description of the left operand
    #[arg(default_value = "dfaA.txt")]
    left: PathBuf,

    /// Description of the right operand
    #[arg(default_value = "dfaB.txt")]
    right: PathBuf,

    /// Where to write the resulting automaton
    #[arg(short, long, default_value = "dfaUnion.txt")]
    output: PathBuf,

    /// Boolean operation applied to the operands' languages
    #[arg(long, value_enum, default_value = "union")]
    op: Operation,

    /// Text placed between the halves of composite state names
    #[arg(long)]
    separator: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "dfa-union.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Report whether the result accepts WORD, given as comma-separated symbols
    #[arg(long, value_name = "WORD")]
    check: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Operation {
    Union,
    Intersection,
    Difference,
}

impl From<Operation> for ProductOp {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Union => ProductOp::Union,
            Operation::Intersection => ProductOp::Intersection,
            Operation::Difference => ProductOp::Difference,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&cli.config)?;
    let mut options = config.render_options();
    if let Some(separator) = cli.separator {
        options.separator = separator;
    }

    let left = text::load(&cli.left)
        .with_context(|| format!("failed to load {}", cli.left.display()))?;
    let right = text::load(&cli.right)
        .with_context(|| format!("failed to load {}", cli.right.display()))?;

    let result = product(&left, &right, cli.op.into()).with_context(|| {
        format!(
            "cannot combine {} with {}",
            cli.left.display(),
            cli.right.display()
        )
    })?;

    info!(
        states = result.num_states(),
        reachable = result.reachable_states().len(),
        accepting = result.accept_states().len(),
        "combined automata"
    );
    if result.is_empty() {
        warn!("resulting automaton accepts no words");
    }

    text::write(&cli.output, &result, &options)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    for word in &cli.check {
        let symbols: Vec<&str> = if word.is_empty() {
            Vec::new()
        } else {
            word.split(',').map(str::trim).collect()
        };
        let accepted = result
            .accepts(symbols)
            .with_context(|| format!("cannot run word `{word}`"))?;
        println!(
            "{word}: {}",
            if accepted { "accepted" } else { "rejected" }
        );
    }

    Ok(())
}
