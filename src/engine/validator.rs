//! Wager validation — turns a loose payload into a stored `Wager`.
//!
//! Checks run in a fixed order (amount, bet type, target) and the first
//! failure wins. Validation is pure: nothing is touched on rejection.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::types::{BetTarget, Color, RoundError, Wager, WagerRequest};
use crate::wheel::MAX_NUMBER;

/// Largest stake accepted on a single wager (inclusive).
pub const MAX_WAGER_AMOUNT: Decimal = dec!(10000);

const MAX_WAGER_F64: f64 = 10_000.0;

/// Smallest positive amount `Decimal` can hold (scale 28).
const MIN_POSITIVE_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

/// Validate a wager payload.
pub fn validate_wager(req: &WagerRequest) -> Result<Wager, RoundError> {
    let amount = parse_amount(req.amount.as_ref())?;

    let target = match (&req.number, &req.color) {
        (Some(number), None) => BetTarget::Number {
            number: parse_number(number)?,
        },
        (None, Some(color)) => BetTarget::Color {
            color: parse_color(color)?,
        },
        _ => return Err(RoundError::BetTypeRequired),
    };

    Ok(Wager { target, amount })
}

/// Bounds are checked on the raw `f64` so conversion can never pull an
/// out-of-range stake back in range, and a positive stake never stores as zero.
fn parse_amount(value: Option<&Value>) -> Result<Decimal, RoundError> {
    let raw = value.and_then(Value::as_f64).ok_or(RoundError::InvalidAmount)?;
    if !raw.is_finite() || raw <= 0.0 || raw > MAX_WAGER_F64 {
        return Err(RoundError::InvalidAmount);
    }
    let positive = |d: &Decimal| *d > Decimal::ZERO;
    let amount = Decimal::from_f64(raw)
        .filter(positive)
        .or_else(|| Decimal::from_f64_retain(raw).filter(positive))
        .unwrap_or(MIN_POSITIVE_AMOUNT);
    Ok(amount)
}

/// Integral JSON numbers only; `7.0` is accepted, `7.5` and `"7"` are not.
fn parse_number(value: &Value) -> Result<u8, RoundError> {
    let n = match value.as_u64() {
        Some(n) => n,
        None => {
            let f = value.as_f64().ok_or(RoundError::InvalidNumber)?;
            if f.fract() != 0.0 || f < 0.0 {
                return Err(RoundError::InvalidNumber);
            }
            f as u64
        }
    };
    if n > u64::from(MAX_NUMBER) {
        return Err(RoundError::InvalidNumber);
    }
    Ok(n as u8)
}

fn parse_color(value: &Value) -> Result<Color, RoundError> {
    value
        .as_str()
        .and_then(Color::from_token)
        .ok_or(RoundError::InvalidColor)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
