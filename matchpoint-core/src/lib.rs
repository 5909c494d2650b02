/// matchpoint-core: Pure-computation tournament pairing engine.
///
/// Round-by-round pairings → pushed results → standings. Four strategies
/// behind one contract: round-robin rotation, random Swiss, weight-driven
/// maximum-weight matching, and card-based power matching, plus modified
/// Bradley-Terry ratings that stay well-defined on disconnected results.
/// No IO, no clock, no threads — just math.
///
/// Players are identified by caller-provided `i64` IDs. The crate handles
/// the internal mapping to dense array indices — callers never think about
/// indices.
///
/// # Quick start
///
/// ```rust
/// use matchpoint_core::{MatchResult, Tournament};
///
/// let mut tournament = Tournament::swiss_pairs(&[100, 200, 300, 400]).unwrap();
///
/// let pairs = tournament.next_pairing().unwrap();
/// assert_eq!(pairs.len(), 2);
///
/// // Resolve the round however you like; here the lower ID always wins.
/// let results: Vec<MatchResult> = pairs
///     .iter()
///     .map(|&(a, b)| if a < b { MatchResult::new(a, b) } else { MatchResult::new(b, a) })
///     .collect();
/// tournament.push_results(&results).unwrap();
///
/// for (player, rating) in tournament.ranking() {
///     println!("Player {}: {:.4}", player, rating);
/// }
/// ```

pub mod blossom;
pub mod cards;
pub mod constants;
pub mod error;
pub mod matching;
pub mod rating;
pub mod round_robin;
pub mod swiss;
pub mod tournament;
pub mod types;

// Re-export primary public API at crate root.
pub use blossom::maximum_weight_matching;
pub use cards::{reinstein_schedule, CardSystem};
pub use error::TournamentError;
pub use matching::{repeat_penalty_weight, swiss_pairs_weight, WeightFn};
pub use round_robin::circle_pairing;
pub use swiss::{default_total_rounds, score_group_pairing};
pub use tournament::Tournament;
pub use types::{MatchResult, Pair, PlayerId};
