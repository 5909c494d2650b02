/// Modified Bradley-Terry ratings (R. A. Bradley and M. E. Terry, 1952).
///
/// Iterative maximum-likelihood fixed point over the win matrix, with two
/// regularizing tweaks that keep every rating finite and strictly positive
/// even for perfect or winless records: each player gets half a win added
/// to their tally, and each player owes one virtual game to a ghost
/// opponent whose rating is pinned at 1.0.
///
/// Internal module — operates on the dense win matrix and score table,
/// indexed by roster position.
use crate::constants::{INITIAL_RATING, RATING_EPSILON};

/// One full sweep of the fixed-point update:
///
/// `new[x] = (wins[x] + 0.5) / (sum_y matches(x,y) / (r[x] + r[y]) + 1 / (1 + r[x]))`
///
/// where `matches(x,y)` counts games between x and y in either direction.
fn sweep(win_matrix: &[u32], score_table: &[u32], ratings: &[f64]) -> Vec<f64> {
    let n = ratings.len();
    let mut next = vec![0.0; n];
    for x in 0..n {
        let mut denominator = 1.0 / (1.0 + ratings[x]);
        for y in 0..n {
            if y == x {
                continue;
            }
            let matches = (win_matrix[x * n + y] + win_matrix[y * n + x]) as f64;
            if matches > 0.0 {
                denominator += matches / (ratings[x] + ratings[y]);
            }
        }
        next[x] = (score_table[x] as f64 + 0.5) / denominator;
    }
    next
}

/// Solve to convergence, starting from `start` (warm start from the
/// previous solution; `initial_ratings` for a cold start). The iteration
/// ends once no rating moves by `RATING_EPSILON` or more in a sweep.
pub fn solve(win_matrix: &[u32], score_table: &[u32], start: &[f64]) -> Vec<f64> {
    let mut ratings = start.to_vec();
    if ratings.is_empty() {
        return ratings;
    }
    loop {
        let next = sweep(win_matrix, score_table, &ratings);
        let max_change = next
            .iter()
            .zip(ratings.iter())
            .map(|(new, old)| (new - old).abs())
            .fold(0.0_f64, f64::max);
        ratings = next;
        if max_change < RATING_EPSILON {
            return ratings;
        }
    }
}

/// Cold-start rating vector: everyone at the neutral rating.
pub fn initial_ratings(num_players: usize) -> Vec<f64> {
    vec![INITIAL_RATING; num_players]
}
