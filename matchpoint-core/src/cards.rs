/// Card-based power matching.
///
/// A card system fixes the whole schedule in advance in terms of card
/// numbers rather than players: round r says which card meets which card.
/// Players start holding their own index as a card and swap cards with
/// their opponent whenever the winner held the numerically larger (worse)
/// one, so winners drift toward card 0 and the final card order is the
/// final standing.
use std::cmp::Reverse;
use std::collections::VecDeque;

use crate::error::TournamentError;

/// Immutable schedule for a power-matched tournament: one set of card
/// pairs per round, plus optional explicit ranking values per card.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardSystem {
    rounds: Vec<Vec<(usize, usize)>>,
    rankings: Option<Vec<f64>>,
}

impl CardSystem {
    pub fn new(rounds: Vec<Vec<(usize, usize)>>) -> CardSystem {
        CardSystem {
            rounds,
            rankings: None,
        }
    }

    /// Like `new`, but with an explicit ranking value for every card
    /// instead of the default n, n-1, .., 1 ladder.
    pub fn with_rankings(rounds: Vec<Vec<(usize, usize)>>, rankings: Vec<f64>) -> CardSystem {
        CardSystem {
            rounds,
            rankings: Some(rankings),
        }
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn round(&self, round: usize) -> Option<&[(usize, usize)]> {
        self.rounds.get(round).map(|r| r.as_slice())
    }

    /// Ranking score for finishing on `card`; card 0 is worth the most.
    pub fn ranking_value(&self, card: usize, num_players: usize) -> f64 {
        match &self.rankings {
            Some(values) => values[card],
            None => (num_players - card) as f64,
        }
    }

    /// Checks the schedule against a roster size: every round must pair
    /// each of the n cards exactly once, and explicit rankings must cover
    /// every card.
    pub fn validate_for(&self, num_players: usize) -> Result<(), TournamentError> {
        for (r, round) in self.rounds.iter().enumerate() {
            if round.len() * 2 != num_players {
                return Err(TournamentError::MalformedCardSystem(format!(
                    "round {} pairs {} cards but the roster holds {}",
                    r,
                    round.len() * 2,
                    num_players
                )));
            }
            let mut seen = vec![false; num_players];
            for &(a, b) in round {
                for card in [a, b] {
                    if card >= num_players {
                        return Err(TournamentError::MalformedCardSystem(format!(
                            "round {} references card {} but the roster holds {}",
                            r, card, num_players
                        )));
                    }
                    if seen[card] {
                        return Err(TournamentError::MalformedCardSystem(format!(
                            "round {} pairs card {} more than once",
                            r, card
                        )));
                    }
                    seen[card] = true;
                }
            }
        }
        if let Some(values) = &self.rankings {
            if values.len() != num_players {
                return Err(TournamentError::MalformedCardSystem(format!(
                    "{} ranking values for {} cards",
                    values.len(),
                    num_players
                )));
            }
        }
        Ok(())
    }
}

/// Generates a card system by Reinstein's merging-groups scheme.
///
/// Every card starts in its own group with record 0. Each round pairs the
/// first group against the last: the first sorted by (record, card)
/// ascending, the last by record descending then card ascending, zipped
/// position by position. The two groups then merge, with records combined
/// pairwise as if the lower-numbered card had won. `num_players` must be
/// even. Group counts halve every round, so `num_rounds` may not exceed
/// the number of times 2 divides `num_players`; the odd remainder admits
/// no further rounds and that extension is deliberately unsupported.
pub fn reinstein_schedule(
    num_players: usize,
    num_rounds: usize,
) -> Result<CardSystem, TournamentError> {
    if num_players % 2 != 0 {
        return Err(TournamentError::PlayerParity(num_players));
    }
    let supported = if num_players == 0 {
        0
    } else {
        num_players.trailing_zeros() as usize
    };
    if num_rounds > supported {
        return Err(TournamentError::UnsupportedScheduleLength {
            players: num_players,
            supported,
            requested: num_rounds,
        });
    }
    let mut groups: VecDeque<Vec<(usize, i64)>> =
        (0..num_players).map(|card| vec![(card, 0)]).collect();
    let mut rounds = Vec::with_capacity(num_rounds);
    for _ in 0..num_rounds {
        let mut merged_groups = VecDeque::with_capacity(groups.len() / 2);
        let mut round = Vec::with_capacity(num_players / 2);
        while groups.len() >= 2 {
            let (front, back) = match (groups.pop_front(), groups.pop_back()) {
                (Some(f), Some(b)) => (f, b),
                _ => break,
            };
            let mut a = front;
            let mut b = back;
            a.sort_by_key(|&(card, record)| (record, card));
            b.sort_by_key(|&(card, record)| (Reverse(record), card));
            let mut merged = Vec::with_capacity(a.len() + b.len());
            for (&(ca, ra), &(cb, rb)) in a.iter().zip(b.iter()) {
                let (winner, winner_rec, loser, loser_rec) = if ca < cb {
                    (ca, ra, cb, rb)
                } else {
                    (cb, rb, ca, ra)
                };
                let (new_winner, new_loser) = merge_records(winner_rec, loser_rec)?;
                merged.push((winner, new_winner));
                merged.push((loser, new_loser));
                round.push((ca, cb));
            }
            merged_groups.push_back(merged);
        }
        rounds.push(round);
        groups = merged_groups;
    }
    Ok(CardSystem::new(rounds))
}

/// Combines the records of a provisional winner and loser. The schedule
/// stays feasible only while records meet at an absolute difference of 0
/// or 2; anything else means the group structure has degenerated.
fn merge_records(winner: i64, loser: i64) -> Result<(i64, i64), TournamentError> {
    let diff = (winner - loser).abs();
    if diff == 0 {
        Ok((winner + 2, loser))
    } else if diff == 2 {
        if winner.max(loser) % 2 != 0 {
            return Err(TournamentError::NoValidPairing(format!(
                "cannot merge group records {} and {} (upper record is odd)",
                winner, loser
            )));
        }
        let mid = (winner + loser) / 2;
        Ok((mid + 1, mid - 1))
    } else {
        Err(TournamentError::NoValidPairing(format!(
            "cannot merge group records {} and {} (difference too large)",
            winner, loser
        )))
    }
}

/// Live card assignment for one power-matched tournament.
#[derive(Debug, Clone)]
pub(crate) struct CardState {
    system: CardSystem,
    /// assignment[player_index] = card currently held.
    assignment: Vec<usize>,
}

impl CardState {
    /// Starts from the identity assignment: player i holds card i.
    pub(crate) fn new(system: CardSystem, num_players: usize) -> CardState {
        CardState {
            system,
            assignment: (0..num_players).collect(),
        }
    }

    pub(crate) fn scheduled_rounds(&self) -> usize {
        self.system.num_rounds()
    }

    /// Player-index pairs for the given round, found by inverting the
    /// current card assignment.
    pub(crate) fn pairing(&self, round: usize) -> Result<Vec<(usize, usize)>, TournamentError> {
        let card_pairs = match self.system.round(round) {
            Some(pairs) => pairs,
            None => {
                return Err(TournamentError::NoValidPairing(format!(
                    "card schedule is exhausted after {} rounds",
                    self.system.num_rounds()
                )))
            }
        };
        let mut holder = vec![0; self.assignment.len()];
        for (player, &card) in self.assignment.iter().enumerate() {
            holder[card] = player;
        }
        Ok(card_pairs.iter().map(|&(a, b)| (holder[a], holder[b])).collect())
    }

    /// The winner keeps the better (lower) card of the two.
    pub(crate) fn apply_result(&mut self, winner: usize, loser: usize) {
        if self.assignment[winner] > self.assignment[loser] {
            self.assignment.swap(winner, loser);
        }
    }

    /// Ranking value for every player under the current assignment.
    pub(crate) fn ranking_values(&self) -> Vec<f64> {
        let n = self.assignment.len();
        self.assignment
            .iter()
            .map(|&card| self.system.ranking_value(card, n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_player_three_round_schedule() {
        let system = reinstein_schedule(8, 3).unwrap();
        assert_eq!(system.num_rounds(), 3);
        assert_eq!(system.round(0).unwrap(), &[(0, 7), (1, 6), (2, 5), (3, 4)]);
        assert_eq!(system.round(1).unwrap(), &[(7, 3), (0, 4), (6, 2), (1, 5)]);
        assert_eq!(system.round(2).unwrap(), &[(4, 1), (7, 2), (0, 5), (3, 6)]);
    }

    #[test]
    fn test_four_player_schedule() {
        let system = reinstein_schedule(4, 2).unwrap();
        assert_eq!(system.round(0).unwrap(), &[(0, 3), (1, 2)]);
        assert_eq!(system.round(1).unwrap(), &[(3, 1), (0, 2)]);
    }

    #[test]
    fn test_round_limit_is_the_power_of_two() {
        assert!(reinstein_schedule(12, 2).is_ok());
        let err = reinstein_schedule(12, 3).unwrap_err();
        match err {
            TournamentError::UnsupportedScheduleLength {
                players,
                supported,
                requested,
            } => {
                assert_eq!(players, 12);
                assert_eq!(supported, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(reinstein_schedule(16, 4).is_ok());
        assert!(reinstein_schedule(16, 5).is_err());
        assert!(reinstein_schedule(6, 1).is_ok());
        assert!(reinstein_schedule(6, 2).is_err());
    }

    #[test]
    fn test_odd_roster_is_a_parity_error() {
        let err = reinstein_schedule(5, 1).unwrap_err();
        assert!(matches!(err, TournamentError::PlayerParity(5)));
        assert!(matches!(
            reinstein_schedule(5, 0),
            Err(TournamentError::PlayerParity(5))
        ));
        assert_eq!(reinstein_schedule(8, 0).unwrap().num_rounds(), 0);
    }

    #[test]
    fn test_generated_schedules_cover_every_card() {
        for n in [2usize, 4, 6, 8, 12, 16, 24, 32] {
            let k = n.trailing_zeros() as usize;
            let system = reinstein_schedule(n, k).unwrap();
            assert_eq!(system.num_rounds(), k);
            system.validate_for(n).unwrap();
        }
    }

    #[test]
    fn test_validation_rejects_short_round() {
        let system = CardSystem::new(vec![vec![(0, 1)]]);
        let err = system.validate_for(4).unwrap_err();
        assert!(matches!(err, TournamentError::MalformedCardSystem(_)));
    }

    #[test]
    fn test_validation_rejects_duplicate_card() {
        let system = CardSystem::new(vec![vec![(0, 1), (1, 2)]]);
        let err = system.validate_for(4).unwrap_err();
        assert!(matches!(err, TournamentError::MalformedCardSystem(_)));
    }

    #[test]
    fn test_validation_rejects_out_of_range_card() {
        let system = CardSystem::new(vec![vec![(0, 1), (2, 7)]]);
        let err = system.validate_for(4).unwrap_err();
        assert!(matches!(err, TournamentError::MalformedCardSystem(_)));
    }

    #[test]
    fn test_validation_rejects_wrong_ranking_count() {
        let system = CardSystem::with_rankings(vec![vec![(0, 1)]], vec![5.0]);
        let err = system.validate_for(2).unwrap_err();
        assert!(matches!(err, TournamentError::MalformedCardSystem(_)));
    }

    #[test]
    fn test_assignment_starts_as_identity() {
        let system = reinstein_schedule(8, 3).unwrap();
        let state = CardState::new(system, 8);
        let pairs = state.pairing(0).unwrap();
        assert_eq!(pairs, vec![(0, 7), (1, 6), (2, 5), (3, 4)]);
    }

    #[test]
    fn test_winner_takes_the_better_card() {
        let system = CardSystem::new(vec![vec![(0, 1)], vec![(0, 1)]]);
        let mut state = CardState::new(system, 2);
        // Player 1 wins while holding card 1: cards swap.
        state.apply_result(1, 0);
        assert_eq!(state.pairing(1).unwrap(), vec![(1, 0)]);
        assert_eq!(state.ranking_values(), vec![1.0, 2.0]);
        // Player 1 wins again, now holding card 0: nothing moves.
        state.apply_result(1, 0);
        assert_eq!(state.ranking_values(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_lower_card_winner_keeps_cards() {
        let system = CardSystem::new(vec![vec![(0, 1)]]);
        let mut state = CardState::new(system, 2);
        state.apply_result(0, 1);
        assert_eq!(state.ranking_values(), vec![2.0, 1.0]);
    }

    #[test]
    fn test_exhausted_schedule_is_an_error() {
        let system = reinstein_schedule(4, 1).unwrap();
        let state = CardState::new(system, 4);
        assert!(state.pairing(0).is_ok());
        let err = state.pairing(1).unwrap_err();
        assert!(matches!(err, TournamentError::NoValidPairing(_)));
    }

    #[test]
    fn test_explicit_rankings_override_the_ladder() {
        let system = CardSystem::with_rankings(vec![vec![(0, 1)]], vec![10.0, 2.5]);
        system.validate_for(2).unwrap();
        let state = CardState::new(system, 2);
        assert_eq!(state.ranking_values(), vec![10.0, 2.5]);
    }
}
