use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;
use word_2048::engine::TargetWord;
use word_2048::session::{Session, SessionConfig, Status};
use word_2048::solver::{Plan, SolverConfig};

#[derive(Debug, Parser)]
#[command(name = "word-2048", about = "Start a word-2048 game and solve it with breadth-first search")]
struct Args {
    /// RNG seed; a random one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Three-letter target word; drawn from the word bank when omitted
    #[arg(long)]
    target: Option<TargetWord>,

    #[arg(long, default_value_t = 4)]
    rows: usize,

    #[arg(long, default_value_t = 4)]
    cols: usize,

    /// Give up after expanding this many states
    #[arg(long)]
    budget: Option<u64>,

    /// Print the plan as JSON instead of replaying it
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let cfg = SessionConfig { rows: args.rows, cols: args.cols, target: args.target, ..SessionConfig::default() };
    let mut session = Session::new(cfg, &mut rng).context("could not start a game")?;
    let start = session.grid().clone();

    let solver_cfg = SolverConfig { max_expansions: args.budget };
    let plan: Plan = match session.solve(solver_cfg, &mut rng) {
        Ok(plan) => plan,
        Err(e) => {
            println!("Seed: {seed} | Target: {}", session.target());
            println!("{start}");
            println!("{e} (expanded {}, visited {})", e.stats.expanded, e.stats.visited);
            return Ok(());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Seed: {seed} | Target: {}", session.target());
    println!("{}", session.grid());
    for (i, step) in plan.steps.iter().enumerate() {
        session.replay_step(step).with_context(|| format!("replaying step {}", i + 1))?;
        println!("{}. {}", i + 1, step.direction);
        println!("{}", session.grid());
    }
    match session.status() {
        Status::Won(run) => println!("Solved in {} moves: {:?}", plan.len(), run.tiles),
        other => println!("Plan of {} moves ended with {:?}", plan.len(), other),
    }
    Ok(())
}
