//! Round storage.
//!
//! The registry talks to a `RoundStore` rather than a concrete map so a
//! persistent backend can be dropped in later. `MemoryStore` is the only
//! backend today: process-lifetime, insertion-ordered.

use std::collections::HashMap;
use tracing::debug;

use crate::types::Round;

/// Abstraction over where rounds live.
///
/// Implementors must return rounds from `rounds` in a stable order for
/// an unchanged store.
pub trait RoundStore: Send + Sync {
    /// Insert a round, replacing any existing round with the same id.
    fn insert(&mut self, round: Round);

    fn contains(&self, id: &str) -> bool;

    fn get(&self, id: &str) -> Option<&Round>;

    fn get_mut(&mut self, id: &str) -> Option<&mut Round>;

    /// All rounds, in a stable order.
    fn rounds(&self) -> Vec<&Round>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store. Rounds are listed in creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rounds: HashMap<String, Round>,
    order: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoundStore for MemoryStore {
    fn insert(&mut self, round: Round) {
        if !self.rounds.contains_key(&round.id) {
            self.order.push(round.id.clone());
        }
        debug!(round_id = %round.id, "Round stored");
        self.rounds.insert(round.id.clone(), round);
    }

    fn contains(&self, id: &str) -> bool {
        self.rounds.contains_key(id)
    }

    fn get(&self, id: &str) -> Option<&Round> {
        self.rounds.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Round> {
        self.rounds.get_mut(id)
    }

    fn rounds(&self) -> Vec<&Round> {
        self.order
            .iter()
            .filter_map(|id| self.rounds.get(id))
            .collect()
    }

    fn len(&self) -> usize {
        self.rounds.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
