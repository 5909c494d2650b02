/// Card-system files for the power strategy.
///
/// A card system is a TOML file with one `[[round]]` table per round and
/// an optional `final_rankings` array (which must appear before the first
/// round to parse as a top-level key):
///
/// ```toml
/// final_rankings = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]
///
/// [[round]]
/// pairs = [[0, 7], [1, 6], [2, 5], [3, 4]]
///
/// [[round]]
/// pairs = [[7, 3], [0, 4], [6, 2], [1, 5]]
/// ```
///
/// Card indices are validated against the roster when the tournament is
/// constructed, not here.
use matchpoint_core::CardSystem;
use serde::Deserialize;
use std::path::Path;

use crate::bail;

#[derive(Deserialize)]
struct CardSystemFile {
    final_rankings: Option<Vec<f64>>,
    #[serde(rename = "round")]
    rounds: Vec<RoundEntry>,
}

#[derive(Deserialize)]
struct RoundEntry {
    pairs: Vec<(usize, usize)>,
}

fn build_card_system(file: CardSystemFile) -> CardSystem {
    let rounds: Vec<Vec<(usize, usize)>> = file.rounds.into_iter().map(|r| r.pairs).collect();
    match file.final_rankings {
        Some(values) => CardSystem::with_rankings(rounds, values),
        None => CardSystem::new(rounds),
    }
}

/// Load a card system from a TOML file.
pub fn load_card_system(path: &Path) -> CardSystem {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| bail(format!("Failed to read card system {}: {e}", path.display())));
    let file: CardSystemFile = toml::from_str(&content)
        .unwrap_or_else(|e| bail(format!("Failed to parse card system {}: {e}", path.display())));
    build_card_system(file)
}
