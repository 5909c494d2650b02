/// Ranking-quality metrics, computed against the latent abilities.
///
/// Every metric asks a different question of the same tournament: did the
/// final ranking recover the true ability order (Spearman), were matches
/// played between closely-matched players (closeness), how much did each
/// match tell us (information, after Glickman and Jensen 2005), and did
/// the strongest player actually finish on top (win share).
use matchpoint_core::Tournament;

/// The full metric block for one finished tournament.
pub struct Metrics {
    pub rank_coefficient: f64,
    pub closeness: f64,
    pub match_information: f64,
    pub win_share: f64,
}

/// Computes every metric. `abilities` is indexed in roster order.
pub fn compute(tournament: &mut Tournament, abilities: &[f64]) -> Metrics {
    Metrics {
        rank_coefficient: rank_correlation(tournament, abilities),
        closeness: closeness_value(tournament, abilities),
        match_information: match_information(tournament, abilities),
        win_share: win_share(tournament, abilities),
    }
}

/// Fractional ranks, 1-based: tied values share the average of the
/// positions they span.
pub fn fractional_ranks(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        let shared = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = shared;
        }
        i = j + 1;
    }
    ranks
}

/// Spearman rank correlation between two aligned value lists, ties
/// handled by fractional ranks. Returns 0.0 when either list is constant
/// (no order to correlate with).
pub fn spearman(xs: &[f64], ys: &[f64]) -> f64 {
    assert_eq!(xs.len(), ys.len(), "value lists must have equal length");
    let rx = fractional_ranks(xs);
    let ry = fractional_ranks(ys);
    let n = rx.len();
    if n == 0 {
        return 0.0;
    }
    // Fractional ranks always sum to n(n+1)/2, so the mean is (n+1)/2.
    let mean = (n as f64 + 1.0) / 2.0;
    let mut numerator = 0.0;
    let mut xx = 0.0;
    let mut yy = 0.0;
    for i in 0..n {
        let dx = rx[i] - mean;
        let dy = ry[i] - mean;
        numerator += dx * dy;
        xx += dx * dx;
        yy += dy * dy;
    }
    let denominator = (xx * yy).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Spearman correlation between latent abilities and the tournament's own
/// ranking values.
pub fn rank_correlation(tournament: &mut Tournament, abilities: &[f64]) -> f64 {
    let values: Vec<f64> = tournament.ranking().iter().map(|&(_, v)| v).collect();
    spearman(abilities, &values)
}

/// Sum over unordered pairs of `matches * ability gap squared`. Lower
/// means the schedule kept matches close.
pub fn closeness_value(tournament: &Tournament, abilities: &[f64]) -> f64 {
    let players = tournament.players();
    let mut total = 0.0;
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let games = tournament.matches_between(players[i], players[j]) as f64;
            if games > 0.0 {
                let gap = abilities[i] - abilities[j];
                total += games * gap * gap;
            }
        }
    }
    total
}

/// Sum over unordered pairs of `matches * p * (1 - p)` with
/// `p = Phi(ability gap)`: the Glickman-Jensen measure of how much
/// information the schedule extracted. A coin-flip match contributes
/// 0.25, a foregone conclusion nearly nothing.
pub fn match_information(tournament: &Tournament, abilities: &[f64]) -> f64 {
    let players = tournament.players();
    let mut total = 0.0;
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let games = tournament.matches_between(players[i], players[j]) as f64;
            if games > 0.0 {
                let p = normal_cdf(abilities[i] - abilities[j]);
                total += games * p * (1.0 - p);
            }
        }
    }
    total
}

/// 1/k if the truly strongest player finished among the k players tied
/// for the top ranking value, 0 otherwise.
pub fn win_share(tournament: &mut Tournament, abilities: &[f64]) -> f64 {
    if abilities.is_empty() {
        return 0.0;
    }
    let best = abilities
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let ranking = tournament.ranking();
    let top_value = ranking
        .iter()
        .map(|&(_, v)| v)
        .fold(f64::NEG_INFINITY, f64::max);
    let leaders = ranking.iter().filter(|&&(_, v)| v == top_value).count();
    if ranking[best].1 == top_value {
        1.0 / leaders as f64
    } else {
        0.0
    }
}

/// Sample mean and standard deviation (n - 1 denominator).
pub fn mean_and_std(samples: &[f64]) -> (f64, f64) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    if samples.len() < 2 {
        return (mean, 0.0);
    }
    let variance = samples.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

/// Standard normal CDF via the Abramowitz and Stegun 7.1.26 erf
/// polynomial (absolute error under 1.5e-7).
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    const P: f64 = 0.3275911;
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchpoint_core::MatchResult;

    #[test]
    fn test_fractional_ranks_average_over_ties() {
        let ranks = fractional_ranks(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        assert_eq!(ranks, vec![3.0, 1.5, 4.0, 1.5, 5.0]);
    }

    #[test]
    fn test_spearman_perfect_agreement() {
        let rho = spearman(&[1.0, 2.0, 3.0, 4.0], &[10.0, 20.0, 30.0, 40.0]);
        assert!((rho - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_perfect_reversal() {
        let rho = spearman(&[1.0, 2.0, 3.0, 4.0], &[9.0, 7.0, 5.0, 3.0]);
        assert!((rho + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_with_ties() {
        // Ranks [1, 2.5, 2.5, 4] against [1, 2, 3, 4]: rho = sqrt(0.9).
        let rho = spearman(&[1.0, 2.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0]);
        assert!((rho - 0.9486832980505138).abs() < 1e-12);
    }

    #[test]
    fn test_spearman_constant_list_is_zero() {
        assert_eq!(spearman(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(spearman(&[], &[]), 0.0);
    }

    #[test]
    fn test_normal_cdf_reference_points() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-4);
        assert!((normal_cdf(1.0) + normal_cdf(-1.0) - 1.0).abs() < 1e-9);
        assert!(normal_cdf(0.5) > normal_cdf(0.4));
    }

    #[test]
    fn test_mean_and_std_sample_denominator() {
        let (mean, std) = mean_and_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((mean - 5.0).abs() < 1e-12);
        assert!((std - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(mean_and_std(&[3.5]), (3.5, 0.0));
    }

    fn two_round_tournament() -> Tournament {
        // 0 beats 1 and 2 beats 3, then 0 beats 2 and 1 beats 3, leaving
        // the score table [2, 1, 1, 0].
        let mut t = Tournament::round_robin(&[0, 1, 2, 3]).unwrap();
        t.push_results(&[MatchResult::new(0, 1), MatchResult::new(2, 3)])
            .unwrap();
        t.push_results(&[MatchResult::new(0, 2), MatchResult::new(1, 3)])
            .unwrap();
        t
    }

    #[test]
    fn test_rank_correlation_against_abilities() {
        let mut t = two_round_tournament();
        // Scores [2,1,1,0] rank as [4, 2.5, 2.5, 1]; abilities rank
        // [4, 3, 2, 1]; rho = 4.5 / sqrt(5 * 4.5).
        let rho = rank_correlation(&mut t, &[3.0, 2.0, 1.0, 0.0]);
        assert!((rho - 0.9486832980505138).abs() < 1e-12);
    }

    #[test]
    fn test_closeness_weights_gaps_by_matches_played() {
        let mut t = Tournament::round_robin(&[0, 1, 2, 3]).unwrap();
        t.push_results(&[MatchResult::new(0, 1), MatchResult::new(2, 3)])
            .unwrap();
        let value = closeness_value(&t, &[2.0, 0.0, 1.0, 1.0]);
        assert!((value - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_match_information_counts_close_matches_most() {
        let mut t = Tournament::round_robin(&[0, 1, 2, 3]).unwrap();
        t.push_results(&[MatchResult::new(0, 1), MatchResult::new(2, 3)])
            .unwrap();
        // Pair (2,3) is a coin flip (0.25); pair (0,1) has a 2.0 gap.
        let value = match_information(&t, &[2.0, 0.0, 1.0, 1.0]);
        let p = normal_cdf(2.0);
        let expected = p * (1.0 - p) + 0.25;
        assert!((value - expected).abs() < 1e-9);
        assert!(value < 0.5);
    }

    #[test]
    fn test_win_share_splits_ties_and_punishes_misses() {
        let mut t = Tournament::round_robin(&[0, 1, 2, 3]).unwrap();
        t.push_results(&[MatchResult::new(0, 1), MatchResult::new(2, 3)])
            .unwrap();
        // Scores [1, 0, 1, 0]: players 0 and 2 tie on top.
        assert_eq!(win_share(&mut t, &[2.0, 0.0, 1.0, 1.5]), 0.5);
        // The strongest player sits at the bottom of the table.
        assert_eq!(win_share(&mut t, &[0.0, 2.0, 1.0, 1.5]), 0.0);
    }
}
