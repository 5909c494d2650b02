/// The tournament state machine.
///
/// A `Tournament` binds a fixed even-sized roster to one pairing strategy
/// and accumulates results round by round. `next_pairing` is a read-only
/// query; `push_results` is the sole mutator. Scoreboard, win matrix and
/// score table only ever grow; the Bradley-Terry rating cache is lazily
/// recomputed behind a dirty flag whenever results have arrived since the
/// last query.
use crate::cards::{CardState, CardSystem};
use crate::error::TournamentError;
use crate::matching::{self, WeightFn};
use crate::rating;
use crate::round_robin;
use crate::swiss;
use crate::types::{MatchResult, Pair, PlayerId, Roster};

/// Strategy variants, fixed at construction.
enum PairingRule {
    RoundRobin,
    RandomSwiss { total_rounds: usize },
    Matching { weight: WeightFn },
    PowerMatched { cards: CardState },
}

pub struct Tournament {
    roster: Roster,
    /// One entry per completed round, in push order.
    scoreboard: Vec<Vec<MatchResult>>,
    /// Dense n*n matrix, row winner, column loser.
    win_matrix: Vec<u32>,
    score_table: Vec<u32>,
    ratings: Vec<f64>,
    ratings_dirty: bool,
    rule: PairingRule,
}

// Manual impl: `rule` can hold a boxed weight closure, which has no Debug.
impl std::fmt::Debug for Tournament {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tournament")
            .field("roster", &self.roster)
            .field("scoreboard", &self.scoreboard)
            .field("win_matrix", &self.win_matrix)
            .field("score_table", &self.score_table)
            .field("ratings", &self.ratings)
            .field("ratings_dirty", &self.ratings_dirty)
            .finish_non_exhaustive()
    }
}

impl Tournament {
    /// Round-robin rotation: over n-1 consecutive rounds every pair meets
    /// exactly once, and the cycle repeats indefinitely after that.
    pub fn round_robin(players: &[PlayerId]) -> Result<Tournament, TournamentError> {
        Tournament::with_rule(players, PairingRule::RoundRobin)
    }

    /// Random Swiss with the conventional ceil(log2 n) round count.
    pub fn random_swiss(players: &[PlayerId]) -> Result<Tournament, TournamentError> {
        let total_rounds = swiss::default_total_rounds(players.len());
        Tournament::random_swiss_with_rounds(players, total_rounds)
    }

    pub fn random_swiss_with_rounds(
        players: &[PlayerId],
        total_rounds: usize,
    ) -> Result<Tournament, TournamentError> {
        Tournament::with_rule(players, PairingRule::RandomSwiss { total_rounds })
    }

    /// Maximum-weight-matching pairing driven by `weight`.
    pub fn matching(players: &[PlayerId], weight: WeightFn) -> Result<Tournament, TournamentError> {
        Tournament::with_rule(players, PairingRule::Matching { weight })
    }

    /// Swiss pairs by matching: no rematches, minimal score gaps.
    pub fn swiss_pairs(players: &[PlayerId]) -> Result<Tournament, TournamentError> {
        Tournament::matching(players, Box::new(matching::swiss_pairs_weight))
    }

    /// Power matching over a fixed card schedule.
    pub fn power_matched(
        players: &[PlayerId],
        system: CardSystem,
    ) -> Result<Tournament, TournamentError> {
        system.validate_for(players.len())?;
        let cards = CardState::new(system, players.len());
        Tournament::with_rule(players, PairingRule::PowerMatched { cards })
    }

    fn with_rule(players: &[PlayerId], rule: PairingRule) -> Result<Tournament, TournamentError> {
        if players.len() % 2 != 0 {
            return Err(TournamentError::PlayerParity(players.len()));
        }
        let roster = Roster::from_ids(players);
        let n = roster.len();
        Ok(Tournament {
            roster,
            scoreboard: Vec::new(),
            win_matrix: vec![0; n * n],
            score_table: vec![0; n],
            ratings: rating::initial_ratings(n),
            ratings_dirty: false,
            rule,
        })
    }

    /// The pairing for the upcoming round. Does not mutate anything, so
    /// it may be queried repeatedly (random Swiss will reshuffle).
    pub fn next_pairing(&self) -> Result<Vec<Pair>, TournamentError> {
        match &self.rule {
            PairingRule::RoundRobin => Ok(round_robin::circle_pairing(
                self.roster.ids(),
                self.rounds_complete(),
            )),
            PairingRule::RandomSwiss { .. } => Ok(swiss::random_swiss_pairing(
                self.roster.ids(),
                &self.score_table,
            )),
            PairingRule::Matching { weight } => matching::weighted_pairing(self, weight),
            PairingRule::PowerMatched { cards } => {
                let pairs = cards.pairing(self.rounds_complete())?;
                Ok(pairs
                    .into_iter()
                    .map(|(a, b)| (self.roster.id(a), self.roster.id(b)))
                    .collect())
            }
        }
    }

    /// Records one completed round. The round must cover every player
    /// exactly once; otherwise nothing is recorded and `MalformedResult`
    /// is returned. Power matching also swaps cards here.
    pub fn push_results(&mut self, results: &[MatchResult]) -> Result<(), TournamentError> {
        let n = self.roster.len();
        let mut seen = vec![false; n];
        let mut covered = 0;
        for result in results {
            for id in [result.winner, result.loser] {
                let idx = match self.roster.try_idx(id) {
                    Some(idx) => idx,
                    None => {
                        return Err(TournamentError::MalformedResult(format!(
                            "player {} is not in this tournament",
                            id
                        )))
                    }
                };
                if seen[idx] {
                    return Err(TournamentError::MalformedResult(format!(
                        "player {} appears more than once in the round",
                        id
                    )));
                }
                seen[idx] = true;
                covered += 1;
            }
        }
        if covered != n {
            return Err(TournamentError::MalformedResult(format!(
                "round covers {} of {} players",
                covered, n
            )));
        }
        for result in results {
            let winner = self.roster.idx(result.winner);
            let loser = self.roster.idx(result.loser);
            self.win_matrix[winner * n + loser] += 1;
            self.score_table[winner] += 1;
            if let PairingRule::PowerMatched { cards } = &mut self.rule {
                cards.apply_result(winner, loser);
            }
        }
        self.scoreboard.push(results.to_vec());
        self.ratings_dirty = true;
        Ok(())
    }

    /// Standing values per player, in roster order. Round robin and Swiss
    /// rank by win count, matching strategies by Bradley-Terry rating,
    /// power matching by final card value.
    pub fn ranking(&mut self) -> Vec<(PlayerId, f64)> {
        if matches!(self.rule, PairingRule::Matching { .. }) {
            self.refresh_ratings();
        }
        let values: Vec<f64> = match &self.rule {
            PairingRule::RoundRobin | PairingRule::RandomSwiss { .. } => {
                self.score_table.iter().map(|&s| s as f64).collect()
            }
            PairingRule::Matching { .. } => self.ratings.clone(),
            PairingRule::PowerMatched { cards } => cards.ranking_values(),
        };
        self.roster.ids().iter().copied().zip(values).collect()
    }

    /// Modified Bradley-Terry ratings, in roster order. Served from cache
    /// unless results arrived since the last computation.
    pub fn bradley_terry_ratings(&mut self) -> Vec<(PlayerId, f64)> {
        self.refresh_ratings();
        self.roster
            .ids()
            .iter()
            .copied()
            .zip(self.ratings.iter().copied())
            .collect()
    }

    pub fn bradley_terry_rating(&mut self, player: PlayerId) -> f64 {
        self.refresh_ratings();
        self.ratings[self.roster.idx(player)]
    }

    fn refresh_ratings(&mut self) {
        if self.ratings_dirty {
            self.ratings = rating::solve(&self.win_matrix, &self.score_table, &self.ratings);
            self.ratings_dirty = false;
        }
    }

    pub fn players(&self) -> &[PlayerId] {
        self.roster.ids()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.len() == 0
    }

    pub fn rounds_complete(&self) -> usize {
        self.scoreboard.len()
    }

    pub fn scoreboard(&self) -> &[Vec<MatchResult>] {
        &self.scoreboard
    }

    /// Times `winner` has beaten `loser`.
    pub fn win_matrix_entry(&self, winner: PlayerId, loser: PlayerId) -> u32 {
        self.win_matrix[self.roster.idx(winner) * self.roster.len() + self.roster.idx(loser)]
    }

    /// The full dense matrix over all ordered player pairs, zeros and
    /// diagonal included.
    pub fn win_matrix(&self) -> Vec<((PlayerId, PlayerId), u32)> {
        let n = self.roster.len();
        let mut entries = Vec::with_capacity(n * n);
        for (i, &a) in self.roster.ids().iter().enumerate() {
            for (j, &b) in self.roster.ids().iter().enumerate() {
                entries.push(((a, b), self.win_matrix[i * n + j]));
            }
        }
        entries
    }

    pub fn score_table(&self) -> Vec<(PlayerId, u32)> {
        self.roster
            .ids()
            .iter()
            .copied()
            .zip(self.score_table.iter().copied())
            .collect()
    }

    pub fn score_table_entry(&self, player: PlayerId) -> u32 {
        self.score_table[self.roster.idx(player)]
    }

    /// Total games played between the two, regardless of direction.
    pub fn matches_between(&self, a: PlayerId, b: PlayerId) -> u32 {
        self.win_matrix_entry(a, b) + self.win_matrix_entry(b, a)
    }

    /// Whether the two have already played, in either direction. Unknown
    /// players simply have not met anyone.
    pub fn have_met(&self, p: PlayerId, q: PlayerId) -> bool {
        self.scoreboard.iter().flatten().any(|m| {
            (m.winner == p && m.loser == q) || (m.winner == q && m.loser == p)
        })
    }

    /// The planned round count, where the strategy has one: the Swiss
    /// total-round convention, or the card schedule length. Advisory for
    /// Swiss (extra rounds still pair), hard for power matching.
    pub fn scheduled_rounds(&self) -> Option<usize> {
        match &self.rule {
            PairingRule::RandomSwiss { total_rounds } => Some(*total_rounds),
            PairingRule::PowerMatched { cards } => Some(cards.scheduled_rounds()),
            _ => None,
        }
    }
}
