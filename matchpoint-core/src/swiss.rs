/// Swiss pairing with repeats allowed.
///
/// Players are bucketed by score, shuffled within each bucket, laid out
/// from the highest bucket to the lowest, and then paired off two at a
/// time from the end of the list. Pairing therefore proceeds from the
/// bottom of the standings upward and every pair is score-adjacent;
/// nothing prevents a rematch. With an even roster nobody is ever left
/// over, so this never fails.
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Pair, PlayerId};

/// Default number of swiss rounds for n players: ceil(log2 n), the count
/// needed for a single undefeated player to emerge.
pub fn default_total_rounds(num_players: usize) -> usize {
    if num_players <= 1 {
        0
    } else {
        ((num_players - 1).ilog2() + 1) as usize
    }
}

/// Shuffled score-group pairing with an injected RNG (deterministic in
/// tests). `scores` is indexed parallel to `players`.
pub fn score_group_pairing(
    players: &[PlayerId],
    scores: &[u32],
    rng: &mut impl Rng,
) -> Vec<Pair> {
    let mut groups: BTreeMap<u32, Vec<PlayerId>> = BTreeMap::new();
    for (idx, &id) in players.iter().enumerate() {
        groups.entry(scores[idx]).or_default().push(id);
    }

    let mut candidates = Vec::with_capacity(players.len());
    for group in groups.values_mut().rev() {
        group.shuffle(rng);
        candidates.extend_from_slice(group);
    }

    let mut pairs = Vec::with_capacity(players.len() / 2);
    while candidates.len() >= 2 {
        let p1 = candidates.pop().expect("len checked");
        let p2 = candidates.pop().expect("len checked");
        pairs.push((p1, p2));
    }
    pairs
}

/// Entropy-seeded wrapper used by the engine.
pub(crate) fn random_swiss_pairing(players: &[PlayerId], scores: &[u32]) -> Vec<Pair> {
    score_group_pairing(players, scores, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_default_total_rounds() {
        assert_eq!(default_total_rounds(0), 0);
        assert_eq!(default_total_rounds(2), 1);
        assert_eq!(default_total_rounds(4), 2);
        assert_eq!(default_total_rounds(6), 3);
        assert_eq!(default_total_rounds(8), 3);
        assert_eq!(default_total_rounds(16), 4);
        assert_eq!(default_total_rounds(20), 5);
    }

    #[test]
    fn test_everyone_paired_exactly_once() {
        let players: Vec<PlayerId> = (0..10).collect();
        let scores = [3, 2, 2, 2, 1, 1, 1, 1, 0, 0];
        let mut rng = SmallRng::seed_from_u64(7);
        let pairs = score_group_pairing(&players, &scores, &mut rng);
        assert_eq!(pairs.len(), 5);
        let mut seen = HashSet::new();
        for &(a, b) in &pairs {
            assert!(seen.insert(a));
            assert!(seen.insert(b));
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_pairs_are_score_adjacent() {
        // Distinct scores force a fully deterministic layout: 3,2,1,0
        // becomes [3,2,1,0] and pairing from the end gives (0,1) and (2,3)
        // by score.
        let players: Vec<PlayerId> = vec![11, 22, 33, 44];
        let scores = [3, 2, 1, 0];
        let mut rng = SmallRng::seed_from_u64(0);
        let pairs = score_group_pairing(&players, &scores, &mut rng);
        let normalized: HashSet<_> = pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
        let expected: HashSet<_> = [(33, 44), (11, 22)].into_iter().collect();
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_top_scorer_pairs_into_adjacent_group() {
        // One leader, a middle bucket of two, one straggler: the leader
        // must draw an opponent from the middle bucket regardless of
        // shuffle order.
        let players: Vec<PlayerId> = vec![1, 2, 3, 4];
        let scores = [2, 1, 1, 0];
        for seed in 0..20 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let pairs = score_group_pairing(&players, &scores, &mut rng);
            let leaders_pair = pairs
                .iter()
                .find(|&&(a, b)| a == 1 || b == 1)
                .expect("leader must be paired");
            let opponent = if leaders_pair.0 == 1 { leaders_pair.1 } else { leaders_pair.0 };
            assert!(opponent == 2 || opponent == 3, "seed {}: {:?}", seed, pairs);
        }
    }

    #[test]
    fn test_empty_roster_yields_no_pairs() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(score_group_pairing(&[], &[], &mut rng).is_empty());
    }
}
