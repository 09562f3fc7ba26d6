//! fasris command-line runner
//!
//! Runs the alternating RIS / antenna optimization on the reference
//! scenario or on a YAML problem file, then prints the best design.
//!
//! # Usage
//!
//! ```bash
//! fasris
//! fasris -c problem.yaml --seed 7 -v
//! fasris --baseline-trials 200
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, Level};

use fasris::report::{HistoryTable, ResultReport};
use fasris::{random_baseline, AlternatingOptimizer, Codebook, Problem};

/// Joint RIS phase / fluid-antenna position optimizer
#[derive(Parser, Debug)]
#[command(name = "fasris")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Problem description (YAML); defaults to the reference scenario
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Override the master seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the outer iteration count
    #[arg(long)]
    iterations: Option<usize>,

    /// Override the Monte-Carlo snapshot count
    #[arg(long)]
    snapshots: Option<usize>,

    /// Also run the random baseline with this many trials
    #[arg(long, value_name = "N")]
    baseline_trials: Option<usize>,

    /// Print the per-iteration history table
    #[arg(long)]
    history: bool,

    /// Print the effective problem as YAML and exit
    #[arg(long)]
    dump_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_problem(args: &Args) -> Result<Problem> {
    let mut problem = match &args.config_file {
        Some(path) => Problem::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Problem::default(),
    };

    if let Some(seed) = args.seed {
        problem.opt.rng_seed = seed;
    }
    if let Some(iterations) = args.iterations {
        problem.opt.outer_iters = iterations;
    }
    if let Some(snapshots) = args.snapshots {
        problem.opt.snapshots = snapshots;
    }
    problem.validate().context("Invalid problem configuration")?;
    Ok(problem)
}

fn run(args: Args) -> Result<()> {
    let problem = load_problem(&args)?;

    if args.dump_config {
        print!("{}", problem.to_yaml()?);
        return Ok(());
    }

    info!(
        elements = problem.ris.elements,
        snapshots = problem.opt.snapshots,
        outer_iters = problem.opt.outer_iters,
        seed = problem.opt.rng_seed,
        "starting optimization"
    );

    let codebook = Codebook::new(problem.ris.phase_bits)?;
    let optimizer = AlternatingOptimizer::new(problem.clone())?;
    let result = optimizer.run();

    println!();
    print!(
        "{}",
        ResultReport {
            title: "Optimization Result",
            solution: &result.best,
            codebook: &codebook,
            shape: result.array.shape(),
        }
    );

    if args.history {
        println!();
        print!("{}", HistoryTable(&result.history));
    }

    if let Some(trials) = args.baseline_trials {
        let baseline = random_baseline(&problem, problem.opt.snapshots, trials, problem.opt.rng_seed)?;
        println!();
        print!(
            "{}",
            ResultReport {
                title: "Random Baseline",
                solution: &baseline,
                codebook: &codebook,
                shape: result.array.shape(),
            }
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
