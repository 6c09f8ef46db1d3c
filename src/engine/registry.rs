//! Round registry — the lifecycle state machine.
//!
//! `Closed --open--> Open --close--> Closed(settled) --open--> Open(fresh)`.
//! `open` on an open round is a no-op; wagers and `close` need `Open`.
//! A failed operation never mutates the round.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::engine::settlement::{color_of, settle_all};
use crate::engine::validator::validate_wager;
use crate::storage::{MemoryStore, RoundStore};
use crate::types::{
    OpenedRound, Outcome, Round, RoundDetail, RoundError, RoundStatus, RoundSummary, Settlement,
    Wager, WagerRequest,
};
use crate::wheel::{RandomWheel, Spinner};

/// Length of generated round ids.
const ROUND_ID_LEN: usize = 8;

/// Owns every round and the wheel used to settle them.
pub struct RoundRegistry {
    store: Box<dyn RoundStore>,
    wheel: Box<dyn Spinner>,
}

impl RoundRegistry {
    pub fn new(store: Box<dyn RoundStore>, wheel: Box<dyn Spinner>) -> Self {
        Self { store, wheel }
    }

    /// In-memory registry with a random wheel, optionally seeded.
    pub fn in_memory(seed: Option<u64>) -> Self {
        Self::new(
            Box::new(MemoryStore::new()),
            Box::new(RandomWheel::from_seed(seed)),
        )
    }

    /// Create a new closed round and return its id.
    pub fn create(&mut self) -> String {
        let id = loop {
            let candidate = new_round_id();
            if !self.store.contains(&candidate) {
                break candidate;
            }
        };
        self.store.insert(Round::new(id.clone()));
        info!(round_id = %id, "Round created");
        id
    }

    /// Summaries of every round, in store order.
    pub fn list(&self) -> Vec<RoundSummary> {
        self.store.rounds().into_iter().map(Round::summary).collect()
    }

    /// Full view of one round.
    pub fn get(&self, id: &str) -> Result<RoundDetail, RoundError> {
        self.store
            .get(id)
            .map(Round::detail)
            .ok_or(RoundError::NotFound)
    }

    /// Open a round for wagers. Re-opening an open round keeps its wagers;
    /// opening a closed one starts a fresh round under the same id.
    pub fn open(&mut self, id: &str) -> Result<OpenedRound, RoundError> {
        let round = self.store.get_mut(id).ok_or(RoundError::NotFound)?;

        if round.is_open() {
            debug!(round_id = %id, status = %round.status, "Round already open");
        } else {
            round.status = RoundStatus::Open;
            round.wagers.clear();
            round.settlement = None;
            info!(round_id = %id, "Round opened");
        }

        Ok(OpenedRound {
            id: round.id.clone(),
            status: round.status,
        })
    }

    /// Validate and record a wager on an open round.
    pub fn place_wager(&mut self, id: &str, req: &WagerRequest) -> Result<Wager, RoundError> {
        let round = self.store.get_mut(id).ok_or(RoundError::NotFound)?;
        if !round.is_open() {
            warn!(round_id = %id, "Wager rejected: round not open");
            return Err(RoundError::NotOpen);
        }

        let wager = validate_wager(req).map_err(|e| {
            warn!(round_id = %id, code = e.code(), "Wager rejected");
            e
        })?;

        round.wagers.push(wager.clone());
        debug!(
            round_id = %id,
            wager = %wager,
            total_wagers = round.wagers.len(),
            "Wager placed"
        );
        Ok(wager)
    }

    /// Draw the winning number, settle every wager and close the round.
    ///
    /// The wager sequence is left in place for reads until the next `open`.
    pub fn close(&mut self, id: &str) -> Result<Outcome, RoundError> {
        let round = self.store.get_mut(id).ok_or(RoundError::NotFound)?;
        if !round.is_open() {
            warn!(round_id = %id, "Close rejected: round not open");
            return Err(RoundError::NotOpen);
        }

        let winning_number = self.wheel.spin();
        let winning_color = color_of(winning_number);
        let results = settle_all(&round.wagers, winning_number);

        round.status = RoundStatus::Closed;
        round.settlement = Some(Settlement {
            winning_number,
            winning_color,
            settled_at: Utc::now(),
        });

        let winners = results.iter().filter(|r| r.payout > Decimal::ZERO).count();
        info!(
            round_id = %id,
            winning_number,
            winning_color = %winning_color,
            wagers = results.len(),
            winners,
            "Round closed and settled"
        );

        Ok(Outcome {
            id: round.id.clone(),
            winning_number,
            winning_color,
            results,
        })
    }

}

fn new_round_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ROUND_ID_LEN);
    id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
