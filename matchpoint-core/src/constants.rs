/// Rating assigned to every player before any results arrive.
/// 1.0 is the neutral point of the Bradley-Terry scale and also the fixed
/// rating of the ghost opponent used for regularization.
pub const INITIAL_RATING: f64 = 1.0;

/// Convergence threshold for the Bradley-Terry fixed-point iteration.
/// A sweep that moves no rating by at least this much ends the solve.
pub const RATING_EPSILON: f64 = 1e-5;
