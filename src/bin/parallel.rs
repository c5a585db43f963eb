use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use word_2048::session::{Session, SessionConfig};
use word_2048::solver::{NoSolutionReason, SolverConfig};

#[derive(Debug, Parser)]
#[command(name = "parallel", about = "Solve many seeded word-2048 games in parallel")]
struct Args {
    /// Number of games to solve
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// First seed; game i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Per-game expansion budget
    #[arg(long, default_value_t = 200_000)]
    budget: u64,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

/// Result of one seeded game.
enum GameResult {
    Solved { moves: usize },
    Unsolved(NoSolutionReason),
    Failed,
}

fn run_game(seed: u64, budget: u64) -> GameResult {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = match Session::new(SessionConfig::default(), &mut rng) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(seed, error = %e, "could not start game");
            return GameResult::Failed;
        }
    };
    match session.solve(SolverConfig::with_budget(budget), &mut rng) {
        Ok(plan) => GameResult::Solved { moves: plan.len() },
        Err(e) => GameResult::Unsolved(e.reason),
    }
}

#[derive(Default)]
struct Summary {
    solved: u64,
    total_moves: u64,
    loss_reached: u64,
    exhausted: u64,
    budget_exceeded: u64,
    failed: u64,
}

impl Summary {
    fn add(mut self, r: &GameResult) -> Self {
        match r {
            GameResult::Solved { moves } => {
                self.solved += 1;
                self.total_moves += *moves as u64;
            }
            GameResult::Unsolved(NoSolutionReason::LossReached) => self.loss_reached += 1,
            GameResult::Unsolved(NoSolutionReason::Exhausted) => self.exhausted += 1,
            GameResult::Unsolved(NoSolutionReason::BudgetExceeded) => self.budget_exceeded += 1,
            GameResult::Failed => self.failed += 1,
        }
        self
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let start = Instant::now();

    let pb = if !args.quiet {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:40}] {pos}/{len} games")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let r = run_game(args.seed.wrapping_add(i), args.budget);
            if let Some(pb) = &pb { pb.inc(1); }
            r
        })
        .collect();

    if let Some(pb) = pb { pb.finish_and_clear(); }
    let summary = results.iter().fold(Summary::default(), Summary::add);
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    let mean = if summary.solved > 0 { summary.total_moves as f64 / summary.solved as f64 } else { 0.0 };

    println!(
        "Games: {} | solved: {} | mean plan: {:.2} moves | games/sec: {:.1}",
        args.games,
        summary.solved,
        mean,
        args.games as f64 / elapsed
    );
    println!(
        "Unsolved: lost board {} | exhausted {} | over budget {} | failed {}",
        summary.loss_reached, summary.exhausted, summary.budget_exceeded, summary.failed
    );
    Ok(())
}
