/// Weight-driven pairing.
///
/// A weight function scores every unordered pair of players; `None` marks
/// a pairing as inadmissible (no edge in the matching graph). The round is
/// then the maximum-cardinality matching of maximum total weight. If even
/// the best matching leaves somebody without an opponent, the round cannot
/// be formed and pairing fails.
use crate::blossom::maximum_weight_matching;
use crate::error::TournamentError;
use crate::tournament::Tournament;
use crate::types::{Pair, PlayerId};

/// Scores the pair (a, b) in the context of the tournament so far, or
/// `None` if a and b must not meet. Called exactly once per unordered
/// pair, in roster order (a before b).
pub type WeightFn = Box<dyn Fn(&Tournament, PlayerId, PlayerId) -> Option<f64> + Send>;

/// Classic Swiss pairing as a weight function: rematches are forbidden,
/// and the penalty is the score gap, so equal scores pair up first.
pub fn swiss_pairs_weight(t: &Tournament, a: PlayerId, b: PlayerId) -> Option<f64> {
    if t.have_met(a, b) {
        return None;
    }
    let diff = score_diff(t, a, b);
    Some(-diff)
}

/// Softer Swiss variant for long tournaments: rematches are allowed but
/// penalized harder each time, and score gaps count double. No pair is
/// ever forbidden outright, so pairing cannot fail on a full roster.
pub fn repeat_penalty_weight(t: &Tournament, a: PlayerId, b: PlayerId) -> Option<f64> {
    let met = t.matches_between(a, b);
    let repeat = if met == 0 { 0.0 } else { (2 * met + 1) as f64 };
    Some(-(repeat + 2.0 * score_diff(t, a, b)))
}

fn score_diff(t: &Tournament, a: PlayerId, b: PlayerId) -> f64 {
    let sa = t.score_table_entry(a) as f64;
    let sb = t.score_table_entry(b) as f64;
    (sa - sb).abs()
}

/// Builds the admissible-pair graph and extracts the best full round.
pub(crate) fn weighted_pairing(
    t: &Tournament,
    weight: &WeightFn,
) -> Result<Vec<Pair>, TournamentError> {
    let players = t.players();
    let n = players.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    let mut edges = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(w) = weight(t, players[i], players[j]) {
                edges.push((i, j, w));
            }
        }
    }
    let matching = maximum_weight_matching(n, &edges, true);
    let mut pairs = Vec::with_capacity(n / 2);
    for (i, mate) in matching.iter().enumerate() {
        match mate {
            None => {
                return Err(TournamentError::NoValidPairing(format!(
                    "no complete pairing exists (player {} cannot be matched)",
                    players[i]
                )))
            }
            Some(j) if *j > i => pairs.push((players[i], players[*j])),
            Some(_) => {}
        }
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchResult;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_swiss_pairs_weight_blocks_rematches() {
        let mut t = Tournament::swiss_pairs(&[1, 2, 3, 4]).unwrap();
        t.push_results(&[MatchResult::new(1, 2), MatchResult::new(3, 4)])
            .unwrap();
        assert_eq!(swiss_pairs_weight(&t, 1, 2), None);
        assert_eq!(swiss_pairs_weight(&t, 2, 1), None);
        // 1 and 3 both won; no gap, no penalty.
        assert_eq!(swiss_pairs_weight(&t, 1, 3), Some(0.0));
        // Winner against loser costs the score gap.
        assert_eq!(swiss_pairs_weight(&t, 1, 4), Some(-1.0));
    }

    #[test]
    fn test_repeat_penalty_escalates() {
        let mut t = Tournament::matching(&[1, 2, 3, 4], Box::new(repeat_penalty_weight)).unwrap();
        assert_eq!(repeat_penalty_weight(&t, 1, 2), Some(0.0));
        t.push_results(&[MatchResult::new(1, 2), MatchResult::new(3, 4)])
            .unwrap();
        // One prior meeting (penalty 3) plus a score gap of 1 counted twice.
        assert_eq!(repeat_penalty_weight(&t, 1, 2), Some(-5.0));
        // Two meetings: penalty 5, gap now 2.
        t.push_results(&[MatchResult::new(1, 2), MatchResult::new(3, 4)])
            .unwrap();
        assert_eq!(repeat_penalty_weight(&t, 1, 2), Some(-9.0));
        // Never met, equal scores: still free.
        assert_eq!(repeat_penalty_weight(&t, 1, 3), Some(0.0));
    }

    #[test]
    fn test_weighted_pairing_picks_best_total() {
        let t = Tournament::swiss_pairs(&[10, 20, 30, 40]).unwrap();
        let weight: WeightFn = Box::new(|_, a, b| Some(-((a - b).abs() as f64)));
        let pairs = weighted_pairing(&t, &weight).unwrap();
        assert_eq!(pairs, vec![(10, 20), (30, 40)]);
    }

    #[test]
    fn test_weighted_pairing_probes_each_pair_once() {
        let t = Tournament::swiss_pairs(&[1, 2, 3, 4, 5, 6]).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let weight: WeightFn = Box::new(move |_, a, b| {
            seen.fetch_add(1, Ordering::Relaxed);
            assert!(a < b);
            Some(0.0)
        });
        weighted_pairing(&t, &weight).unwrap();
        assert_eq!(calls.load(Ordering::Relaxed), 15);
    }

    #[test]
    fn test_no_admissible_pairs_is_an_error() {
        let t = Tournament::swiss_pairs(&[1, 2, 3, 4]).unwrap();
        let weight: WeightFn = Box::new(|_, _, _| None);
        let err = weighted_pairing(&t, &weight).unwrap_err();
        assert!(matches!(err, TournamentError::NoValidPairing(_)));
    }

    #[test]
    fn test_partial_block_still_fails_when_no_perfect_matching() {
        // Only 1-2 may meet; 3 and 4 are stranded.
        let t = Tournament::swiss_pairs(&[1, 2, 3, 4]).unwrap();
        let weight: WeightFn =
            Box::new(|_, a, b| if (a, b) == (1, 2) { Some(1.0) } else { None });
        let err = weighted_pairing(&t, &weight).unwrap_err();
        assert!(matches!(err, TournamentError::NoValidPairing(_)));
    }

    #[test]
    fn test_empty_roster_pairs_trivially() {
        let t = Tournament::swiss_pairs(&[]).unwrap();
        let weight: WeightFn = Box::new(|_, _, _| Some(1.0));
        assert_eq!(weighted_pairing(&t, &weight).unwrap(), Vec::<Pair>::new());
    }
}
