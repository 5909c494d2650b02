/// Output formatting: terminal tables, per-round displays, and JSON.
use matchpoint_core::{MatchResult, Pair, PlayerId, Tournament};
use serde::Serialize;

use crate::sim::SimRoster;
use crate::stats::Metrics;

#[derive(Serialize)]
struct JsonStanding {
    rank: usize,
    name: String,
    ability: f64,
    value: f64,
    wins: u32,
}

#[derive(Serialize)]
struct JsonMetrics {
    rank_coefficient: f64,
    closeness: f64,
    match_information: f64,
    win_share: f64,
}

#[derive(Serialize)]
struct JsonRun {
    strategy: String,
    players: usize,
    rounds: usize,
    seed: u64,
    standings: Vec<JsonStanding>,
    metrics: JsonMetrics,
}

/// One strategy's aggregate result from a comparison run.
pub struct StrategyOutcome {
    pub strategy: &'static str,
    pub mean: f64,
    pub std_dev: f64,
}

#[derive(Serialize)]
struct JsonStrategyOutcome {
    strategy: String,
    mean: f64,
    std_dev: f64,
}

#[derive(Serialize)]
struct JsonCompare {
    players: usize,
    rounds: usize,
    trials: usize,
    seed: u64,
    strategies: Vec<JsonStrategyOutcome>,
}

fn name_width(roster: &SimRoster) -> usize {
    roster.names().iter().map(|n| n.len()).max().unwrap_or(4).max(4)
}

/// Ranking rows sorted for display: highest value first, names breaking
/// ties.
fn standings_order(tournament: &mut Tournament, roster: &SimRoster) -> Vec<(PlayerId, f64)> {
    let mut rows = tournament.ranking();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| roster.name(a.0).cmp(roster.name(b.0))));
    rows
}

/// Print a scheduled round with each player's current score.
pub fn print_pairing(pairs: &[Pair], tournament: &Tournament, roster: &SimRoster) {
    println!("Pairing");
    println!("=======");
    let width = name_width(roster);
    for &(a, b) in pairs {
        println!(
            "{:<width$} [{:>2}] v. {:<width$} [{:>2}]",
            roster.name(a),
            tournament.score_table_entry(a),
            roster.name(b),
            tournament.score_table_entry(b),
        );
    }
}

/// Print a resolved round.
pub fn print_results(results: &[MatchResult], roster: &SimRoster) {
    println!("Results");
    println!("=======");
    let width = name_width(roster);
    for r in results {
        println!("{:<width$} beat {}", roster.name(r.winner), roster.name(r.loser));
    }
}

/// One grid character per completed round: the opponent's initial,
/// uppercase for a win and lowercase for a loss.
fn results_grid(tournament: &Tournament, roster: &SimRoster, player: PlayerId) -> String {
    let mut grid = String::with_capacity(tournament.rounds_complete());
    for round in tournament.scoreboard() {
        let mut mark = '.';
        for result in round {
            if result.winner == player {
                mark = roster.initial(result.loser).to_ascii_uppercase();
                break;
            }
            if result.loser == player {
                mark = roster.initial(result.winner).to_ascii_lowercase();
                break;
            }
        }
        grid.push(mark);
    }
    grid
}

/// Print the standings table, optionally with the per-round results grid.
pub fn print_standings(tournament: &mut Tournament, roster: &SimRoster, show_grid: bool) {
    println!("Score table");
    println!("===========");
    let width = name_width(roster);
    if show_grid {
        println!("{:<width$} | Ability |     Score | Results", "Name");
        println!("{}-|---------|-----------|--------", "-".repeat(width));
    } else {
        println!("{:<width$} | Ability |     Score", "Name");
        println!("{}-|---------|----------", "-".repeat(width));
    }
    for (player, value) in standings_order(tournament, roster) {
        if show_grid {
            println!(
                "{:<width$} | {:>7.4} | {:>9.5} | {}",
                roster.name(player),
                roster.ability(player),
                value,
                results_grid(tournament, roster, player),
            );
        } else {
            println!(
                "{:<width$} | {:>7.4} | {:>9.5}",
                roster.name(player),
                roster.ability(player),
                value,
            );
        }
    }
}

/// Print the metric block for a finished tournament.
pub fn print_metrics(metrics: &Metrics) {
    println!("Rank coefficient:  {:>9.4}", metrics.rank_coefficient);
    println!("Closeness value:   {:>9.4}", metrics.closeness);
    println!("Match information: {:>9.4}", metrics.match_information);
    println!("Win share:         {:>9.4}", metrics.win_share);
}

/// Print a whole `run` invocation as JSON.
pub fn print_run_json(
    tournament: &mut Tournament,
    roster: &SimRoster,
    strategy: &str,
    rounds: usize,
    seed: u64,
    metrics: &Metrics,
) {
    let standings = standings_order(tournament, roster)
        .iter()
        .enumerate()
        .map(|(i, &(player, value))| JsonStanding {
            rank: i + 1,
            name: roster.name(player).to_string(),
            ability: roster.ability(player),
            value,
            wins: tournament.score_table_entry(player),
        })
        .collect();

    let output = JsonRun {
        strategy: strategy.to_string(),
        players: roster.names().len(),
        rounds,
        seed,
        standings,
        metrics: JsonMetrics {
            rank_coefficient: metrics.rank_coefficient,
            closeness: metrics.closeness,
            match_information: metrics.match_information,
            win_share: metrics.win_share,
        },
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

/// Print the strategy comparison as an aligned table.
pub fn print_compare_table(
    outcomes: &[StrategyOutcome],
    players: usize,
    rounds: usize,
    trials: usize,
) {
    let width = outcomes
        .iter()
        .map(|o| o.strategy.len())
        .max()
        .unwrap_or(8)
        .max(8);

    println!("{:<width$} |     Mean | Std. Dev.", "Strategy");
    println!("{}-|----------|----------", "-".repeat(width));
    for o in outcomes {
        println!("{:<width$} | {:>8.6} | {:>9.6}", o.strategy, o.mean, o.std_dev);
    }
    println!(
        "\nSpearman rank coefficient over {} trials per strategy ({} players, {} rounds)",
        trials, players, rounds,
    );
}

/// Print the strategy comparison as JSON.
pub fn print_compare_json(
    outcomes: &[StrategyOutcome],
    players: usize,
    rounds: usize,
    trials: usize,
    seed: u64,
) {
    let output = JsonCompare {
        players,
        rounds,
        trials,
        seed,
        strategies: outcomes
            .iter()
            .map(|o| JsonStrategyOutcome {
                strategy: o.strategy.to_string(),
                mean: o.mean,
                std_dev: o.std_dev,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
