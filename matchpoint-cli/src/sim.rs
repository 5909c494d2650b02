/// Synthetic players and stochastic match resolution.
///
/// Each simulated player gets a latent ability drawn from N(0, 1). A
/// match between a and b resolves by comparing `ability(a) + noise * z`
/// against `ability(b)` with `z` a fresh standard normal draw, so the
/// stronger player usually wins and `noise = 0` makes ability decisive.
use matchpoint_core::{MatchResult, Pair, PlayerId};
use rand::Rng;
use rand_distr::StandardNormal;

/// NATO call signs keep grid initials distinct for demo-sized rosters.
const CALL_SIGNS: [&str; 26] = [
    "Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf", "Hotel", "India", "Juliett",
    "Kilo", "Lima", "Mike", "November", "Oscar", "Papa", "Quebec", "Romeo", "Sierra", "Tango",
    "Uniform", "Victor", "Whiskey", "Xray", "Yankee", "Zulu",
];

/// A fixed roster of named players with latent abilities. Player IDs are
/// the roster positions `0..n`.
pub struct SimRoster {
    names: Vec<String>,
    abilities: Vec<f64>,
}

impl SimRoster {
    /// Rolls `num_players` fresh abilities. Names come from the call-sign
    /// list, with numbered fallbacks past 26 players.
    pub fn generate(num_players: usize, rng: &mut impl Rng) -> SimRoster {
        let names = (0..num_players)
            .map(|i| match CALL_SIGNS.get(i) {
                Some(&name) => name.to_string(),
                None => format!("P{}", i + 1),
            })
            .collect();
        let abilities = (0..num_players).map(|_| rng.sample(StandardNormal)).collect();
        SimRoster { names, abilities }
    }

    /// Player IDs in roster order, ready for a tournament constructor.
    pub fn ids(&self) -> Vec<PlayerId> {
        (0..self.names.len() as PlayerId).collect()
    }

    pub fn name(&self, player: PlayerId) -> &str {
        &self.names[player as usize]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ability(&self, player: PlayerId) -> f64 {
        self.abilities[player as usize]
    }

    /// Abilities in roster order (aligned with `ids`).
    pub fn abilities(&self) -> &[f64] {
        &self.abilities
    }

    /// First letter of the player's name, for the results grid.
    pub fn initial(&self, player: PlayerId) -> char {
        self.names[player as usize].chars().next().unwrap_or('?')
    }
}

/// Resolves every scheduled pair into a result. The first-listed player
/// wins exact ties, which matters only at `noise = 0`.
pub fn simulate_round(
    pairs: &[Pair],
    roster: &SimRoster,
    noise: f64,
    rng: &mut impl Rng,
) -> Vec<MatchResult> {
    pairs
        .iter()
        .map(|&(a, b)| {
            let z: f64 = rng.sample(StandardNormal);
            if roster.ability(a) + noise * z < roster.ability(b) {
                MatchResult::new(b, a)
            } else {
                MatchResult::new(a, b)
            }
        })
        .collect()
}
