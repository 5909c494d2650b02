mod config;
mod output;
mod sim;
mod stats;

use clap::Parser;
use matchpoint_core::{
    default_total_rounds, reinstein_schedule, repeat_penalty_weight, PlayerId, Tournament,
    TournamentError,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

use crate::sim::SimRoster;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "matchpoint", version, about = "Simulate tournaments and compare pairing strategies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Simulate one tournament and print standings and quality metrics
    Run(RunArgs),
    /// Measure ranking quality per pairing strategy over many simulated tournaments
    Compare(CompareArgs),
}

#[derive(Parser)]
struct RunArgs {
    /// Number of players (must be even)
    #[arg(long, default_value_t = 8)]
    players: usize,

    /// Pairing strategy: "round-robin", "random-swiss", "swiss-pairs",
    /// "penalty", or "power"
    #[arg(long, default_value = "round-robin")]
    strategy: String,

    /// Number of rounds (default: the strategy's natural schedule length)
    #[arg(long)]
    rounds: Option<usize>,

    /// RNG seed for abilities and match noise (default: fresh entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Match noise scale; 0 means the stronger player always wins
    #[arg(long, default_value_t = 1.0)]
    noise: f64,

    /// Card-system TOML file for the power strategy (default: a generated
    /// schedule)
    #[arg(long)]
    card_system: Option<PathBuf>,

    /// Print pairings, results, and standings for every round
    #[arg(short, long)]
    verbose: bool,

    /// Output JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CompareArgs {
    /// Number of players per trial (must be even)
    #[arg(long, default_value_t = 20)]
    players: usize,

    /// Rounds per trial (default: the swiss schedule length, ceil(log2 n))
    #[arg(long)]
    rounds: Option<usize>,

    /// Simulated tournaments per strategy
    #[arg(long, default_value_t = 1000)]
    trials: usize,

    /// Match noise scale
    #[arg(long, default_value_t = 1.0)]
    noise: f64,

    /// RNG seed (default: fresh entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Show per-strategy progress
    #[arg(short, long)]
    verbose: bool,

    /// Output JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_tournament(args),
        Commands::Compare(args) => run_compare(args),
    }
}

/// Advance a tournament by `rounds` simulated rounds.
fn play_rounds(
    tournament: &mut Tournament,
    roster: &SimRoster,
    rounds: usize,
    noise: f64,
    rng: &mut SmallRng,
) -> Result<(), TournamentError> {
    for _ in 0..rounds {
        let pairs = tournament.next_pairing()?;
        let results = sim::simulate_round(&pairs, roster, noise, rng);
        tournament.push_results(&results)?;
    }
    Ok(())
}

/// Build the tournament for `run`, returning it with the strategy's
/// natural round count (used when --rounds is absent).
fn build_tournament(args: &RunArgs, ids: &[PlayerId]) -> (Tournament, usize) {
    let n = ids.len();
    match args.strategy.as_str() {
        "round-robin" => {
            let t = Tournament::round_robin(ids).unwrap_or_else(|e| bail(e));
            (t, n.saturating_sub(1))
        }
        "random-swiss" => {
            let t = match args.rounds {
                Some(r) => Tournament::random_swiss_with_rounds(ids, r),
                None => Tournament::random_swiss(ids),
            }
            .unwrap_or_else(|e| bail(e));
            let natural = t.scheduled_rounds().unwrap_or(0);
            (t, natural)
        }
        "swiss-pairs" => {
            let t = Tournament::swiss_pairs(ids).unwrap_or_else(|e| bail(e));
            (t, default_total_rounds(n))
        }
        "penalty" => {
            let t = Tournament::matching(ids, Box::new(repeat_penalty_weight))
                .unwrap_or_else(|e| bail(e));
            (t, n.saturating_sub(1))
        }
        "power" => {
            let system = match args.card_system {
                Some(ref path) => config::load_card_system(path),
                None => {
                    let rounds = args.rounds.unwrap_or_else(|| n.trailing_zeros() as usize);
                    reinstein_schedule(n, rounds).unwrap_or_else(|e| bail(e))
                }
            };
            let natural = system.num_rounds();
            let t = Tournament::power_matched(ids, system).unwrap_or_else(|e| bail(e));
            (t, natural)
        }
        other => bail(format!(
            "Unknown strategy \"{other}\". Use \"round-robin\", \"random-swiss\", \
             \"swiss-pairs\", \"penalty\", or \"power\"."
        )),
    }
}

fn run_tournament(args: RunArgs) {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);

    let roster = SimRoster::generate(args.players, &mut rng);
    let ids = roster.ids();

    let (mut tournament, natural_rounds) = build_tournament(&args, &ids);
    let rounds = args.rounds.unwrap_or(natural_rounds);

    if args.verbose {
        eprintln!(
            "Simulating {} players, {} rounds, strategy {} (seed {})",
            args.players, rounds, args.strategy, seed,
        );
    }

    for round in 0..rounds {
        if args.verbose {
            eprintln!("Starting round {}", round + 1);
        }
        let pairs = tournament
            .next_pairing()
            .unwrap_or_else(|e| bail(format!("No pairing for round {}: {e}", round + 1)));
        if args.verbose && !args.json {
            output::print_pairing(&pairs, &tournament, &roster);
        }
        let results = sim::simulate_round(&pairs, &roster, args.noise, &mut rng);
        if args.verbose && !args.json {
            output::print_results(&results, &roster);
        }
        tournament
            .push_results(&results)
            .unwrap_or_else(|e| bail(format!("Round {} rejected: {e}", round + 1)));
        if args.verbose && !args.json {
            output::print_standings(&mut tournament, &roster, true);
            println!();
        }
    }

    let metrics = stats::compute(&mut tournament, roster.abilities());

    if args.json {
        output::print_run_json(&mut tournament, &roster, &args.strategy, rounds, seed, &metrics);
    } else {
        output::print_standings(&mut tournament, &roster, true);
        println!();
        output::print_metrics(&metrics);
    }
}

/// The strategies `compare` measures. Power matching is excluded: its
/// dyadic round ceiling rules out a common round count.
const COMPARE_STRATEGIES: [&str; 4] = ["round-robin", "random-swiss", "swiss-pairs", "penalty"];

fn compare_tournament(
    strategy: &str,
    ids: &[PlayerId],
    rounds: usize,
) -> Result<Tournament, TournamentError> {
    match strategy {
        "round-robin" => Tournament::round_robin(ids),
        "random-swiss" => Tournament::random_swiss_with_rounds(ids, rounds),
        "swiss-pairs" => Tournament::swiss_pairs(ids),
        "penalty" => Tournament::matching(ids, Box::new(repeat_penalty_weight)),
        other => bail(format!("Unknown comparison strategy \"{other}\"")),
    }
}

fn run_compare(args: CompareArgs) {
    let rounds = args.rounds.unwrap_or_else(|| default_total_rounds(args.players));
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut outcomes = Vec::with_capacity(COMPARE_STRATEGIES.len());
    for &strategy in &COMPARE_STRATEGIES {
        if args.verbose {
            eprintln!("{}: {} trials x {} rounds", strategy, args.trials, rounds);
        }
        let mut coefficients = Vec::with_capacity(args.trials);
        for trial in 0..args.trials {
            let roster = SimRoster::generate(args.players, &mut rng);
            let ids = roster.ids();
            let mut tournament =
                compare_tournament(strategy, &ids, rounds).unwrap_or_else(|e| bail(e));
            if let Err(e) = play_rounds(&mut tournament, &roster, rounds, args.noise, &mut rng) {
                bail(format!("{strategy} trial {} failed: {e}", trial + 1));
            }
            coefficients.push(stats::rank_correlation(&mut tournament, roster.abilities()));
        }
        let (mean, std_dev) = stats::mean_and_std(&coefficients);
        outcomes.push(output::StrategyOutcome { strategy, mean, std_dev });
    }

    if args.json {
        output::print_compare_json(&outcomes, args.players, rounds, args.trials, seed);
    } else {
        output::print_compare_table(&outcomes, args.players, rounds, args.trials);
    }
}
