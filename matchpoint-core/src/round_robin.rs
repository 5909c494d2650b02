/// Round-robin pairing via the circle method.
///
/// Player 0 stays anchored while the rest rotate one seat per round, so any
/// n-1 consecutive rounds starting from round 0 meet every pair exactly
/// once. The rotation index is taken modulo n-1, which makes the schedule
/// restartable: round n-1 replays round 0 and so on indefinitely.
use crate::types::{Pair, PlayerId};

pub fn circle_pairing(players: &[PlayerId], round: usize) -> Vec<Pair> {
    let n = players.len();
    if n < 2 {
        return Vec::new();
    }
    let k = n - 1 - (round % (n - 1));

    let mut pairs = Vec::with_capacity(n / 2);
    pairs.push((players[0], players[k]));
    for i in 1..n / 2 {
        let mut x = k + i;
        if x >= n {
            x -= n - 1;
        }
        let mut y = k as isize - i as isize;
        if y <= 0 {
            y += n as isize - 1;
        }
        pairs.push((players[x], players[y as usize]));
    }
    pairs
}
