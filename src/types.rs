//! Shared types for the RULETA service.
//!
//! These types form the data model used across all modules: rounds,
//! wagers, settlement records and the domain error taxonomy. The engine,
//! storage and HTTP layers all depend on this module and nothing else
//! depends back on them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Round lifecycle state.
///
/// `Closed` is both the state a round is created in and the state it
/// returns to after settlement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Open,
    #[default]
    Closed,
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundStatus::Open => write!(f, "open"),
            RoundStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Wheel colour. Canonical wire values are `rojo` and `negro`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    #[serde(rename = "rojo")]
    Red,
    #[serde(rename = "negro")]
    Black,
}

impl Color {
    /// Tokens accepted from players, two per colour.
    pub const TOKENS: &'static [&'static str] = &["rojo", "negro", "red", "black"];

    /// Parse a player-supplied colour token (case-insensitive).
    ///
    /// Any accepted token starting with `r` is red, everything else black.
    pub fn from_token(token: &str) -> Option<Self> {
        let lower = token.to_lowercase();
        if !Self::TOKENS.contains(&lower.as_str()) {
            return None;
        }
        if lower.starts_with('r') {
            Some(Color::Red)
        } else {
            Some(Color::Black)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "rojo"),
            Color::Black => write!(f, "negro"),
        }
    }
}

/// Per-wager settlement verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Win,
    Lose,
}

// ---------------------------------------------------------------------------
// Wagers
// ---------------------------------------------------------------------------

/// What a wager is placed on. Exactly one target per wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BetTarget {
    Number { number: u8 },
    Color { color: Color },
}

impl fmt::Display for BetTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetTarget::Number { number } => write!(f, "number {number}"),
            BetTarget::Color { color } => write!(f, "{color}"),
        }
    }
}

/// A validated wager stored on a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wager {
    #[serde(flatten)]
    pub target: BetTarget,
    pub amount: Decimal,
}

impl fmt::Display for Wager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.amount, self.target)
    }
}

/// Raw wager payload as received from a caller.
///
/// Fields are kept as loose JSON values so validation can tell a
/// non-numeric amount apart from a missing one. JSON `null` reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WagerRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub number: Option<Value>,
    #[serde(default)]
    pub color: Option<Value>,
}

impl WagerRequest {
    /// Payload for a straight-up bet on `number`.
    pub fn on_number(number: i64, amount: f64) -> Self {
        Self {
            amount: Some(Value::from(amount)),
            number: Some(Value::from(number)),
            color: None,
        }
    }

    /// Payload for a colour bet using any accepted token.
    pub fn on_color(color: &str, amount: f64) -> Self {
        Self {
            amount: Some(Value::from(amount)),
            number: None,
            color: Some(Value::from(color)),
        }
    }
}

/// A wager after settlement: the original wager plus verdict and payout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettledWager {
    #[serde(flatten)]
    pub wager: Wager,
    pub result: Verdict,
    pub payout: Decimal,
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

/// The drawn result recorded on a round when it is closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub winning_number: u8,
    pub winning_color: Color,
    pub settled_at: DateTime<Utc>,
}

/// One roulette table. Each opening starts a fresh round instance under
/// the same id.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: String,
    pub status: RoundStatus,
    /// Wagers placed during the current (or just settled) opening.
    pub wagers: Vec<Wager>,
    /// Present iff the round was settled since it was last opened.
    pub settlement: Option<Settlement>,
}

impl Round {
    /// A fresh round: closed, no wagers, never settled.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: RoundStatus::Closed,
            wagers: Vec::new(),
            settlement: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == RoundStatus::Open
    }

    /// Summary view for listings. Winning fields only appear on a closed,
    /// settled round.
    pub fn summary(&self) -> RoundSummary {
        let settled = match (&self.settlement, self.status) {
            (Some(s), RoundStatus::Closed) => Some(s),
            _ => None,
        };
        RoundSummary {
            id: self.id.clone(),
            status: self.status,
            total_wagers: self.wagers.len(),
            winning_number: settled.map(|s| s.winning_number),
            winning_color: settled.map(|s| s.winning_color),
        }
    }

    /// Full view including the wager sequence of record.
    pub fn detail(&self) -> RoundDetail {
        RoundDetail {
            id: self.id.clone(),
            status: self.status,
            wagers: self.wagers.clone(),
            winning_number: self.settlement.as_ref().map(|s| s.winning_number),
            winning_color: self.settlement.as_ref().map(|s| s.winning_color),
            settled_at: self.settlement.as_ref().map(|s| s.settled_at),
        }
    }
}

// ---------------------------------------------------------------------------
// Views returned by the registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub id: String,
    pub status: RoundStatus,
    pub total_wagers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundDetail {
    pub id: String,
    pub status: RoundStatus,
    pub wagers: Vec<Wager>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settled_at: Option<DateTime<Utc>>,
}

/// Public state after an `open` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenedRound {
    pub id: String,
    pub status: RoundStatus,
}

/// Result of closing a round. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: String,
    pub winning_number: u8,
    pub winning_color: Color,
    pub results: Vec<SettledWager>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain errors. A closed set: lifecycle violations and wager validation.
///
/// The `Display` text is for logs; callers facing users map the variant
/// to their own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoundError {
    #[error("round not found")]
    NotFound,

    #[error("round is not open")]
    NotOpen,

    #[error("invalid wager amount")]
    InvalidAmount,

    #[error("wager needs exactly one of number or color")]
    BetTypeRequired,

    #[error("invalid wager number")]
    InvalidNumber,

    #[error("invalid wager color")]
    InvalidColor,
}

impl RoundError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RoundError::NotFound => "NOT_FOUND",
            RoundError::NotOpen => "NOT_OPEN",
            RoundError::InvalidAmount => "INVALID_AMOUNT",
            RoundError::BetTypeRequired => "BET_TYPE_REQUIRED",
            RoundError::InvalidNumber => "INVALID_NUMBER",
            RoundError::InvalidColor => "INVALID_COLOR",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
