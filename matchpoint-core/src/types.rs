use std::collections::HashMap;

/// Caller-provided player identity.
///
/// The engine never interprets these values; it maps them to internal
/// `0..N` indices at construction and hands them back unchanged.
pub type PlayerId = i64;

/// A scheduled match: two player IDs. Order carries no meaning.
pub type Pair = (PlayerId, PlayerId);

/// Resolved outcome of a single match. There are no draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchResult {
    /// ID of the player who won.
    pub winner: PlayerId,
    /// ID of the player who lost.
    pub loser: PlayerId,
}

impl MatchResult {
    pub fn new(winner: PlayerId, loser: PlayerId) -> Self {
        MatchResult { winner, loser }
    }
}

/// Maps between caller-provided player IDs and internal 0..N indices.
///
/// The roster is fixed at construction; player order is the index order.
#[derive(Debug)]
pub(crate) struct Roster {
    ids: Vec<PlayerId>,
    id_to_idx: HashMap<PlayerId, usize>,
}

impl Roster {
    pub fn from_ids(ids: &[PlayerId]) -> Self {
        let mut id_to_idx = HashMap::with_capacity(ids.len());
        for (idx, &id) in ids.iter().enumerate() {
            let prev = id_to_idx.insert(id, idx);
            assert!(prev.is_none(), "Duplicate player ID: {}", id);
        }
        Roster {
            ids: ids.to_vec(),
            id_to_idx,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    /// Index of a known player. Panics on unknown IDs; validation paths
    /// should use `try_idx` first.
    pub fn idx(&self, id: PlayerId) -> usize {
        *self
            .id_to_idx
            .get(&id)
            .unwrap_or_else(|| panic!("Unknown player ID: {}", id))
    }

    pub fn try_idx(&self, id: PlayerId) -> Option<usize> {
        self.id_to_idx.get(&id).copied()
    }

    pub fn id(&self, idx: usize) -> PlayerId {
        self.ids[idx]
    }
}
