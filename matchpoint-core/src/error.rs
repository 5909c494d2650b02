use thiserror::Error;

/// Errors surfaced by tournament construction, pairing and result entry.
///
/// An impossible matchup has no variant here: weight functions signal it
/// by returning `None` for the pair, which leaves the edge out of the
/// pairing graph.
#[derive(Error, Debug)]
pub enum TournamentError {
    /// Paired tournaments need an even number of players.
    #[error("cannot pair an odd number of players ({0})")]
    PlayerParity(usize),

    /// The strategy cannot produce a perfect matching for the next round.
    #[error("no valid pairing: {0}")]
    NoValidPairing(String),

    /// A round result failed validation; tournament state is unchanged.
    #[error("malformed round result: {0}")]
    MalformedResult(String),

    /// A card system or final-ranking table does not fit the roster.
    #[error("malformed card system: {0}")]
    MalformedCardSystem(String),

    /// The schedule generator only supports as many rounds as n has
    /// factors of two.
    #[error(
        "card schedules for {players} players support at most {supported} rounds ({requested} requested)"
    )]
    UnsupportedScheduleLength {
        players: usize,
        supported: usize,
        requested: usize,
    },
}
