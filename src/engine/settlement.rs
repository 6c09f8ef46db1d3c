//! Settlement — verdicts and payouts for a drawn number.
//!
//! Pure functions: no clock, no randomness, no round state. The registry
//! draws the number and hands the wagers in; this module decides who won.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use crate::types::{BetTarget, Color, SettledWager, Verdict, Wager};

/// Payout multiplier for a straight-up number hit.
pub const NUMBER_MULTIPLIER: Decimal = dec!(5.0);

/// Payout multiplier for a colour hit.
pub const COLOR_MULTIPLIER: Decimal = dec!(1.8);

/// Decimal places payouts are rounded to.
const PAYOUT_DP: u32 = 2;

/// Colour of a pocket: even numbers (zero included) are red, odd are black.
pub fn color_of(number: u8) -> Color {
    if number % 2 == 0 {
        Color::Red
    } else {
        Color::Black
    }
}

/// Settle a single wager against the winning number.
pub fn settle_wager(wager: &Wager, winning_number: u8) -> SettledWager {
    let multiplier = match wager.target {
        BetTarget::Number { number } if number == winning_number => Some(NUMBER_MULTIPLIER),
        BetTarget::Color { color } if color == color_of(winning_number) => Some(COLOR_MULTIPLIER),
        _ => None,
    };

    let (result, payout) = match multiplier {
        Some(m) => (Verdict::Win, round_payout(wager.amount * m)),
        None => (Verdict::Lose, Decimal::ZERO),
    };

    SettledWager {
        wager: wager.clone(),
        result,
        payout,
    }
}

/// Settle every wager, preserving insertion order.
pub fn settle_all(wagers: &[Wager], winning_number: u8) -> Vec<SettledWager> {
    wagers
        .iter()
        .map(|w| settle_wager(w, winning_number))
        .collect()
}

fn round_payout(raw: Decimal) -> Decimal {
    raw.round_dp_with_strategy(PAYOUT_DP, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
