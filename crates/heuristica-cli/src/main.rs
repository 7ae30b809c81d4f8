//! # Heuristica
//!
//! Command-line front end for the 8-puzzle solver and the blocks-world
//! goal-stack planner.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use heuristica_core::HeuristicaError;
use heuristica_planner::{GoalStackPlanner, PlannerConfig, PlanningProblem};
use heuristica_puzzle::{Board, PuzzleSolver, SearchResult, SolverConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser)]
#[command(name = "heuristica")]
#[command(about = "8-puzzle A* search and blocks-world goal-stack planning")]
#[command(version)]
struct Cli {
    /// Print the outcome as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve an 8-puzzle board
    Solve(SolveArgs),
    /// Run the goal-stack planner on a blocks-world problem
    Plan(PlanArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Nine tiles in row-major order, 0 for the blank
    #[arg(value_name = "TILE", num_args = 9, required_unless_present = "random")]
    tiles: Vec<u8>,

    /// Solve a random solvable board instead
    #[arg(long, conflicts_with = "tiles")]
    random: bool,

    /// Stop after this many node expansions
    #[arg(long)]
    max_expansions: Option<usize>,

    /// Report odd-parity boards as unsolvable without searching
    #[arg(long)]
    parity_precheck: bool,
}

#[derive(Args)]
struct PlanArgs {
    /// JSON problem file; the three-block sample is used when omitted
    #[arg(long, value_name = "FILE")]
    problem: Option<PathBuf>,

    /// Maximum goal-stack pops
    #[arg(long, default_value = "1000")]
    max_iterations: usize,

    /// Maximum goal-stack depth
    #[arg(long, default_value = "256")]
    max_stack_depth: usize,
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

fn run_solve(args: SolveArgs, json: bool) -> anyhow::Result<()> {
    let start = if args.random {
        let board = Board::random_solvable(&mut rand::thread_rng());
        info!("Drew random board [{}]", board.inline());
        board
    } else {
        Board::new(&args.tiles)?
    };

    let config = SolverConfig {
        max_expansions: args.max_expansions,
        parity_precheck: args.parity_precheck,
    };
    let outcome = PuzzleSolver::with_config(config).solve(start)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
        return Ok(());
    }

    match &outcome.result {
        SearchResult::Solved(solution) => print!("{}", render::SolutionReport(solution)),
        SearchResult::Unsolvable => {
            println!("No solution found (unsolvable configuration).")
        }
    }
    Ok(())
}

fn run_plan(args: PlanArgs, json: bool) -> anyhow::Result<()> {
    let problem = match &args.problem {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PlanningProblem::from_json(&json)?
        }
        None => PlanningProblem::sample(),
    };
    let planner = GoalStackPlanner::with_config(PlannerConfig {
        max_iterations: args.max_iterations,
        max_stack_depth: args.max_stack_depth,
        record_trace: true,
    });

    let outcome = match planner.plan(&problem) {
        Ok(outcome) => outcome,
        Err(err @ HeuristicaError::PlanningDidNotConverge { .. }) => {
            anyhow::bail!("{} (try raising --max-iterations or --max-stack-depth)", err)
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print!(
        "{}",
        render::PlanReport {
            problem: &problem,
            outcome: &outcome,
        }
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command {
        Commands::Solve(args) => run_solve(args, cli.json),
        Commands::Plan(args) => run_plan(args, cli.json),
    }
}
